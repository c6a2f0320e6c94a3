// STD Dependencies -----------------------------------------------------------
use std::fmt;


// Internal Dependencies ------------------------------------------------------
use crate::error::ConversionError;
use crate::format::{ByteReader, MAGIC_LENGTH};
use crate::format::level::{LevelHeader, LEVEL_MAGIC};
use crate::format::sprites::{SpritesHeader, SPRITES_MAGIC};
use crate::format::tiles::{TilePalette, TilesHeader, TILES_MAGIC};


// RATR0 File Information -----------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileInfo {
    Tiles {
        header: TilesHeader,
        palette: TilePalette
    },
    Sprites {
        header: SpritesHeader,
        palette: Vec<u16>
    },
    Level {
        header: LevelHeader
    }
}

impl FileInfo {
    /// Detects the file type from its identifier and reads the header and
    /// palette.
    pub fn parse(bytes: &[u8]) -> Result<Self, ConversionError> {
        let magic = bytes.get(0..MAGIC_LENGTH).ok_or_else(|| {
            ConversionError::header(format!("file is only {} byte(s) long", bytes.len()))
        })?;

        let mut reader = ByteReader::new(bytes);
        if magic == TILES_MAGIC {
            let header = TilesHeader::read(&mut reader)?;
            let palette = TilePalette::read(&mut reader, &header)?;
            Ok(FileInfo::Tiles {
                header,
                palette
            })

        } else if magic == SPRITES_MAGIC {
            let header = SpritesHeader::read(&mut reader)?;
            reader.take(header.num_sprites as usize * 2)?;
            let mut palette = Vec::with_capacity(header.num_colors as usize);
            for _ in 0..header.num_colors {
                palette.push(reader.u16()? & 0x0fff);
            }
            Ok(FileInfo::Sprites {
                header,
                palette
            })

        } else if magic == LEVEL_MAGIC {
            Ok(FileInfo::Level {
                header: LevelHeader::read(&mut reader)?
            })

        } else {
            Err(ConversionError::header(format!(
                "unknown file type \"{}\"",
                String::from_utf8_lossy(magic)
            )))
        }
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FileInfo::Tiles { header, palette } => {
                writeln!(f, "RATR0 Tile File")?;
                writeln!(f, "Version: {}", header.version)?;
                writeln!(f, "Endianess: {}", header.endian().name())?;
                writeln!(f, "RGB Format: {}", if header.palette24() { 24 } else { 12 })?;
                writeln!(f, "Interleaved: {}", header.interleaved())?;
                writeln!(f, "Contains Mask: {}", header.has_mask())?;
                writeln!(f, "width: {}, height: {}", header.width, header.height)?;
                writeln!(f, "# bitplanes: {}", header.depth)?;
                writeln!(f, "tile size: {}x{}", header.tile_width, header.tile_height)?;
                writeln!(f, "num tiles: {}x{}", header.tiles_h, header.tiles_v)?;
                writeln!(f, "num palette entries: {}", header.palette_size)?;
                writeln!(f, "# image data bytes: {}", header.imgdata_size)?;
                writeln!(f, "# checksum: {}", header.checksum)?;
                match palette {
                    TilePalette::Rgb12(colors) => write_palette(f, colors.iter().map(|c| format!("{:03x}", c))),
                    TilePalette::Rgb24(colors) => write_palette(
                        f,
                        colors.iter().map(|c| format!("{:02x}{:02x}{:02x}", c.r, c.g, c.b))
                    )
                }
            },
            FileInfo::Sprites { header, palette } => {
                writeln!(f, "RATR0 Sprite File")?;
                writeln!(f, "Version: {}", header.version)?;
                writeln!(f, "Endianess: {}", header.endian().name())?;
                writeln!(f, "# colors: {}", header.num_colors)?;
                writeln!(f, "# sprites: {}", header.num_sprites)?;
                writeln!(f, "# image data bytes: {}", header.imgdata_size)?;
                writeln!(f, "# checksum: {}", header.checksum)?;
                write_palette(f, palette.iter().map(|c| format!("{:03x}", c)))
            },
            FileInfo::Level { header } => {
                writeln!(f, "RATR0 Level File")?;
                writeln!(f, "Version: {}", header.version)?;
                writeln!(f, "Endianess: {}", header.endian().name())?;
                writeln!(f, "size: {}x{} tiles", header.width, header.height)?;
                write!(f, "# checksum: {}", header.checksum)
            }
        }
    }
}

fn write_palette<I: ExactSizeIterator<Item=String>>(f: &mut fmt::Formatter, colors: I) -> fmt::Result {
    write!(f, "Palette entries ({}):", colors.len())?;
    for (index, color) in colors.enumerate() {
        write!(f, "\n{:02}: {}", index, color)?;
    }
    Ok(())
}
