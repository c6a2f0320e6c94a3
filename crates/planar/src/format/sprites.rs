// External Dependencies ------------------------------------------------------
use log::debug;


// Internal Dependencies ------------------------------------------------------
use crate::error::ConversionError;
use crate::palette::Palette;
use crate::pixels::PixelBuffer;
use crate::planes::PlaneSet;
use crate::sprite::{pack_sprites, SpriteRecord};
use super::{overflow, push_words, to_u16, ByteReader, Endian};


// Statics --------------------------------------------------------------------
pub const SPRITES_MAGIC: &[u8; 8] = b"RATR0SPR";
pub const SPRITES_VERSION: u8 = 1;
pub const SPRITES_HEADER_SIZE: usize = 20;


// Sprite Sheet Header --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpritesHeader {
    pub version: u8,
    pub flags: u8,
    pub num_colors: u8,
    pub num_sprites: u16,
    pub imgdata_size: u32,
    pub checksum: u16
}

impl SpritesHeader {
    pub fn endian(&self) -> Endian {
        Endian::from_flags(self.flags)
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(SPRITES_MAGIC);
        out.extend_from_slice(&[self.version, self.flags, 0, self.num_colors]);
        out.extend_from_slice(&self.num_sprites.to_be_bytes());
        out.extend_from_slice(&self.imgdata_size.to_be_bytes());
        out.extend_from_slice(&self.checksum.to_be_bytes());
    }

    pub fn read(reader: &mut ByteReader) -> Result<Self, ConversionError> {
        reader.expect_magic(SPRITES_MAGIC)?;
        let version = reader.u8()?;
        let flags = reader.u8()?;
        reader.set_endian(Endian::from_flags(flags));
        let _reserved = reader.u8()?;
        Ok(Self {
            version,
            flags,
            num_colors: reader.u8()?,
            num_sprites: reader.u16()?,
            imgdata_size: reader.u32()?,
            checksum: reader.u16()?
        })
    }
}


// Sprite Sheet ---------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSheet {
    palette: Palette,
    sprites: Vec<SpriteRecord>
}

impl SpriteSheet {
    pub fn from_image(buffer: &PixelBuffer, palette: Palette) -> Result<Self, ConversionError> {
        buffer.validate(palette.len())?;
        let planes = PlaneSet::encode(buffer, palette.depth());
        let sprites = pack_sprites(planes, buffer.width())?;
        debug!("writing {} sprites", sprites.len());
        Ok(Self {
            palette,
            sprites
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn sprites(&self) -> &[SpriteRecord] {
        &self.sprites
    }

    /// Byte offset of every sprite record relative to the start of the
    /// record data.
    pub fn offsets(&self) -> Result<Vec<u16>, ConversionError> {
        let mut offsets = Vec::with_capacity(self.sprites.len());
        let mut offset = 0;
        for sprite in &self.sprites {
            offsets.push(to_u16(offset, "sprite offset")?);
            offset += sprite.byte_size();
        }
        Ok(offsets)
    }

    pub fn imgdata_size(&self) -> usize {
        self.sprites.iter().map(SpriteRecord::byte_size).sum()
    }

    pub fn header(&self) -> Result<SpritesHeader, ConversionError> {
        let num_colors = u8::try_from(self.palette.len()).map_err(|_| {
            overflow("sprite color count", self.palette.len(), u8::MAX as usize)
        })?;
        let imgdata_size = u32::try_from(self.imgdata_size()).map_err(|_| {
            overflow("sprite data size", self.imgdata_size(), u32::MAX as usize)
        })?;
        Ok(SpritesHeader {
            version: SPRITES_VERSION,
            flags: 0,
            num_colors,
            num_sprites: to_u16(self.sprites.len(), "sprite count")?,
            imgdata_size,
            checksum: 0
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConversionError> {
        let header = self.header()?;
        let mut out = Vec::with_capacity(
            SPRITES_HEADER_SIZE + self.sprites.len() * 2 + self.palette.len() * 2 + self.imgdata_size()
        );
        header.write(&mut out);
        push_words(&mut out, &self.offsets()?);
        self.palette.write_rgb12(&mut out);
        for sprite in &self.sprites {
            push_words(&mut out, &sprite.words());
        }
        Ok(out)
    }
}
