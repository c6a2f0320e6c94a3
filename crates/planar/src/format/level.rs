// External Dependencies ------------------------------------------------------
use log::debug;


// Internal Dependencies ------------------------------------------------------
use crate::error::ConversionError;
use super::{to_u16, ByteReader, Endian};


// Statics --------------------------------------------------------------------
pub const LEVEL_MAGIC: &[u8; 8] = b"RATR0LVL";
pub const LEVEL_VERSION: u8 = 1;
pub const LEVEL_HEADER_SIZE: usize = 16;

/// Tile index of empty map cells, these are never rendered.
pub const NULL_TILE: u8 = 0;


// Level Header ---------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelHeader {
    pub version: u8,
    pub flags: u8,
    pub width: u16,
    pub height: u16,
    pub checksum: u16
}

impl LevelHeader {
    pub fn endian(&self) -> Endian {
        Endian::from_flags(self.flags)
    }

    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(LEVEL_MAGIC);
        out.extend_from_slice(&[self.version, self.flags]);
        out.extend_from_slice(&self.width.to_be_bytes());
        out.extend_from_slice(&self.height.to_be_bytes());
        out.extend_from_slice(&self.checksum.to_be_bytes());
    }

    pub fn read(reader: &mut ByteReader) -> Result<Self, ConversionError> {
        reader.expect_magic(LEVEL_MAGIC)?;
        let version = reader.u8()?;
        let flags = reader.u8()?;
        reader.set_endian(Endian::from_flags(flags));
        Ok(Self {
            version,
            flags,
            width: reader.u16()?,
            height: reader.u16()?,
            checksum: reader.u16()?
        })
    }
}


// Level Map ------------------------------------------------------------------
/// Row-major grid of 1-based tile indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelMap {
    width: u16,
    height: u16,
    tiles: Vec<u8>
}

impl LevelMap {
    pub fn new(width: usize, height: usize, tiles: &[u32]) -> Result<Self, ConversionError> {
        if tiles.len() != width * height {
            return Err(ConversionError::map(format!(
                "{}x{} tiles require {} entries but the map has {}",
                width, height, width * height, tiles.len()
            )));
        }

        let tiles = tiles.iter().enumerate().map(|(position, index)| {
            u8::try_from(*index).map_err(|_| ConversionError::InvalidTileIndex {
                index: *index,
                position,
                max: u8::MAX as u32
            })

        }).collect::<Result<Vec<u8>, ConversionError>>()?;

        debug!("level size {}x{} tiles", width, height);
        Ok(Self {
            width: to_u16(width, "level width")?,
            height: to_u16(height, "level height")?,
            tiles
        })
    }

    /// Parses a complete level file.
    pub fn read(bytes: &[u8]) -> Result<(LevelHeader, Self), ConversionError> {
        let mut reader = ByteReader::new(bytes);
        let header = LevelHeader::read(&mut reader)?;
        let count = header.width as usize * header.height as usize;
        let tiles = reader.take(count)?.to_vec();
        let map = Self {
            width: header.width,
            height: header.height,
            tiles
        };
        Ok((header, map))
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn tiles(&self) -> &[u8] {
        &self.tiles
    }

    /// Returns `None` for null tiles and cells outside of the map.
    pub fn tile(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        match self.tiles[y * self.width() + x] {
            NULL_TILE => None,
            index => Some(index)
        }
    }

    pub fn header(&self) -> LevelHeader {
        LevelHeader {
            version: LEVEL_VERSION,
            flags: 0,
            width: self.width,
            height: self.height,
            checksum: 0
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(LEVEL_HEADER_SIZE + self.tiles.len());
        self.header().write(&mut out);
        out.extend_from_slice(&self.tiles);
        out
    }
}
