// Modules --------------------------------------------------------------------
pub mod c_source;
pub mod level;
pub mod sprites;
pub mod tiles;


// Internal Dependencies ------------------------------------------------------
use crate::error::ConversionError;


// Statics --------------------------------------------------------------------
pub const MAGIC_LENGTH: usize = 8;

/// Flag bit shared by all RATR0 headers, headers are always written big
/// endian.
pub const FLAG_LITTLE_ENDIAN: u8 = 0x01;


// Byte Order -----------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little
}

impl Endian {
    pub fn from_flags(flags: u8) -> Self {
        if flags & FLAG_LITTLE_ENDIAN != 0 {
            Endian::Little

        } else {
            Endian::Big
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endian::Big => "big",
            Endian::Little => "little"
        }
    }
}


// Header Reader --------------------------------------------------------------
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
    endian: Endian
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            endian: Endian::Big
        }
    }

    pub fn set_endian(&mut self, endian: Endian) {
        self.endian = endian;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn expect_magic(&mut self, magic: &[u8; MAGIC_LENGTH]) -> Result<(), ConversionError> {
        let found = self.take(MAGIC_LENGTH)?;
        if found != magic {
            return Err(ConversionError::header(format!(
                "expected file identifier \"{}\" but found \"{}\"",
                String::from_utf8_lossy(magic),
                String::from_utf8_lossy(found)
            )));
        }
        Ok(())
    }

    pub fn take(&mut self, count: usize) -> Result<&'a [u8], ConversionError> {
        let end = self.offset + count;
        if end > self.bytes.len() {
            return Err(ConversionError::header(format!(
                "file truncated, expected {} more byte(s) at offset {} but only {} remain",
                count,
                self.offset,
                self.bytes.len() - self.offset
            )));
        }
        let bytes = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(bytes)
    }

    pub fn u8(&mut self) -> Result<u8, ConversionError> {
        Ok(self.take(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16, ConversionError> {
        let b = self.take(2)?;
        Ok(match self.endian {
            Endian::Big => u16::from_be_bytes([b[0], b[1]]),
            Endian::Little => u16::from_le_bytes([b[0], b[1]])
        })
    }

    pub fn u32(&mut self) -> Result<u32, ConversionError> {
        let b = self.take(4)?;
        Ok(match self.endian {
            Endian::Big => u32::from_be_bytes([b[0], b[1], b[2], b[3]]),
            Endian::Little => u32::from_le_bytes([b[0], b[1], b[2], b[3]])
        })
    }
}


// Helpers --------------------------------------------------------------------
pub fn push_words(out: &mut Vec<u8>, words: &[u16]) {
    out.reserve(words.len() * 2);
    for word in words {
        out.extend_from_slice(&word.to_be_bytes());
    }
}

pub fn to_u16(value: usize, field: &'static str) -> Result<u16, ConversionError> {
    u16::try_from(value).map_err(|_| overflow(field, value, u16::MAX as usize))
}

pub fn overflow(field: &'static str, value: usize, max: usize) -> ConversionError {
    ConversionError::HeaderFieldOverflow {
        field,
        value,
        max
    }
}
