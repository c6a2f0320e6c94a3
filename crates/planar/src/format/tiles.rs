// External Dependencies ------------------------------------------------------
use log::debug;


// Internal Dependencies ------------------------------------------------------
use crate::error::ConversionError;
use crate::interleave::{arrange, arrange_mask, Layout};
use crate::palette::{Palette, Rgb};
use crate::pixels::PixelBuffer;
use crate::planes::PlaneSet;
use super::{overflow, push_words, to_u16, ByteReader, Endian};


// Statics --------------------------------------------------------------------
pub const TILES_MAGIC: &[u8; 8] = b"RATR0TIL";
pub const TILES_VERSION: u8 = 2;
pub const TILES_HEADER_SIZE: usize = 32;

pub const FLAG_PALETTE_24: u8 = 0x02;
pub const FLAG_NON_INTERLEAVED: u8 = 0x04;
pub const FLAG_MASK: u8 = 0x08;


// Tile Sheet Header ----------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesHeader {
    pub version: u8,
    pub flags: u8,
    pub depth: u8,
    pub width: u16,
    pub height: u16,
    pub tile_width: u16,
    pub tile_height: u16,
    pub tiles_h: u16,
    pub tiles_v: u16,
    pub palette_size: u16,
    pub imgdata_size: u32,
    /// Reserved, always written as 0.
    pub checksum: u16
}

impl TilesHeader {
    pub fn endian(&self) -> Endian {
        Endian::from_flags(self.flags)
    }

    pub fn palette24(&self) -> bool {
        self.flags & FLAG_PALETTE_24 != 0
    }

    pub fn interleaved(&self) -> bool {
        self.flags & FLAG_NON_INTERLEAVED == 0
    }

    pub fn has_mask(&self) -> bool {
        self.flags & FLAG_MASK != 0
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(TILES_MAGIC);
        out.extend_from_slice(&[self.version, self.flags, 0, self.depth]);
        out.extend_from_slice(&self.width.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.tile_width.to_be_bytes());
        out.extend_from_slice(&self.tile_height.to_be_bytes());
        out.extend_from_slice(&self.tiles_h.to_be_bytes());
        out.extend_from_slice(&self.tiles_v.to_be_bytes());
        out.extend_from_slice(&self.palette_size.to_be_bytes());
        out.extend_from_slice(&self.imgdata_size.to_be_bytes());
        out.extend_from_slice(&self.checksum.to_be_bytes());
    }

    pub fn read(reader: &mut ByteReader) -> Result<Self, ConversionError> {
        reader.expect_magic(TILES_MAGIC)?;
        let version = reader.u8()?;
        let flags = reader.u8()?;
        reader.set_endian(Endian::from_flags(flags));
        let _reserved = reader.u8()?;
        Ok(Self {
            version,
            flags,
            depth: reader.u8()?,
            width: reader.u16()?,
            height: reader.u16()?,
            tile_width: reader.u16()?,
            tile_height: reader.u16()?,
            tiles_h: reader.u16()?,
            tiles_v: reader.u16()?,
            palette_size: reader.u16()?,
            imgdata_size: reader.u32()?,
            checksum: reader.u16()?
        })
    }
}

/// Palette as stored in a tile sheet file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TilePalette {
    Rgb12(Vec<u16>),
    Rgb24(Vec<Rgb>)
}

impl TilePalette {
    pub fn read(reader: &mut ByteReader, header: &TilesHeader) -> Result<Self, ConversionError> {
        let count = header.palette_size as usize;
        if header.palette24() {
            let mut colors = Vec::with_capacity(count);
            for _ in 0..count {
                let c = reader.take(3)?;
                colors.push(Rgb::new(c[0], c[1], c[2]));
            }
            Ok(TilePalette::Rgb24(colors))

        } else {
            let mut colors = Vec::with_capacity(count);
            for _ in 0..count {
                colors.push(reader.u16()? & 0x0fff);
            }
            Ok(TilePalette::Rgb12(colors))
        }
    }
}


// Tile Sheet -----------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSheetOptions {
    pub tile_size: (usize, usize),
    pub layout: Layout,
    pub palette24: bool,
    pub mask: bool
}

impl Default for TileSheetOptions {
    fn default() -> Self {
        Self {
            tile_size: (16, 16),
            layout: Layout::Interleaved,
            palette24: false,
            mask: false
        }
    }
}

/// Image data of equally sized tiles together with its palette.
///
/// Works for level tiles, full screens and blitter objects alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSheet {
    header: TilesHeader,
    palette: Palette,
    data: Vec<u16>
}

impl TileSheet {
    pub fn from_image(
        buffer: &PixelBuffer,
        palette: Palette,
        options: &TileSheetOptions

    ) -> Result<Self, ConversionError> {
        buffer.validate(palette.len())?;

        let (tile_width, tile_height) = options.tile_size;
        let (width, height) = (buffer.width(), buffer.height());
        if tile_width == 0 || tile_height == 0 || width % tile_width != 0 || height % tile_height != 0 {
            return Err(ConversionError::InvalidTileSize {
                image: (width, height),
                tile: options.tile_size
            });
        }
        debug!("tile size h: {} v: {}", tile_width, tile_height);
        debug!("tile sheet width: {} height: {}", width / tile_width, height / tile_height);

        let depth = palette.depth();
        let planes = PlaneSet::encode(buffer, depth);
        let mut data = arrange(&planes, options.layout);
        if options.mask {
            let mask = planes.mask();
            data.extend(arrange_mask(&mask, planes.depth(), planes.words_per_row(), options.layout));
        }

        let mut flags = 0;
        if options.palette24 {
            flags |= FLAG_PALETTE_24;
        }
        if !options.layout.is_interleaved() {
            flags |= FLAG_NON_INTERLEAVED;
        }
        if options.mask {
            flags |= FLAG_MASK;
        }

        let imgdata_size = u32::try_from(data.len() * 2).map_err(|_| {
            overflow("image data size", data.len() * 2, u32::MAX as usize)
        })?;

        let header = TilesHeader {
            version: TILES_VERSION,
            flags,
            depth,
            width: to_u16(width, "image width")?,
            height: to_u16(height, "image height")?,
            tile_width: to_u16(tile_width, "tile width")?,
            tile_height: to_u16(tile_height, "tile height")?,
            tiles_h: to_u16(width / tile_width, "horizontal tile count")?,
            tiles_v: to_u16(height / tile_height, "vertical tile count")?,
            palette_size: to_u16(palette.len(), "palette size")?,
            imgdata_size,
            checksum: 0
        };

        Ok(Self {
            header,
            palette,
            data
        })
    }

    pub fn header(&self) -> &TilesHeader {
        &self.header
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Plane words in file order, mask planes included.
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            TILES_HEADER_SIZE + self.palette.len() * 3 + self.header.imgdata_size as usize
        );
        self.header.write(&mut out);
        if self.header.palette24() {
            self.palette.write_rgb24(&mut out);

        } else {
            self.palette.write_rgb12(&mut out);
        }
        push_words(&mut out, &self.data);
        out
    }
}
