// STD Dependencies -----------------------------------------------------------
use std::fmt;
use std::error::Error;


// Conversion Error Abstraction -----------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Image palette resolves to a depth of zero (a single color).
    InvalidPalette {
        colors: usize
    },
    TooManyColors {
        colors: usize,
        max: usize
    },
    InvalidDepth {
        requested: u8,
        actual: u8,
        max: u8
    },
    InvalidPixelData {
        message: String
    },
    InvalidMap {
        message: String
    },
    HeaderFieldOverflow {
        field: &'static str,
        value: usize,
        max: usize
    },
    InvalidTileSize {
        image: (usize, usize),
        tile: (usize, usize)
    },
    InvalidSpriteWidth {
        width: usize
    },
    TooManyPlanes {
        planes: usize,
        max: usize
    },
    ExceededSpriteCapacity {
        sprites: usize,
        max: usize
    },
    InvalidTileIndex {
        index: u32,
        position: usize,
        max: u32
    },
    UnknownSymbol {
        name: String,
        line: usize
    },
    UnknownInstruction {
        mnemonic: String,
        line: usize
    },
    InvalidOperand {
        operand: String,
        line: usize,
        message: String
    },
    InvalidHeader {
        message: String
    }
}

impl ConversionError {
    pub fn pixel_data<S: Into<String>>(message: S) -> Self {
        ConversionError::InvalidPixelData {
            message: message.into()
        }
    }

    pub fn map<S: Into<String>>(message: S) -> Self {
        ConversionError::InvalidMap {
            message: message.into()
        }
    }

    pub fn header<S: Into<String>>(message: S) -> Self {
        ConversionError::InvalidHeader {
            message: message.into()
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConversionError::InvalidPalette { colors } => write!(
                f,
                "Images with only {} color(s) can't be handled, at least 2 colors are required.",
                colors
            ),
            ConversionError::TooManyColors { colors, max } => write!(
                f,
                "Image palette with {} colors exceeds the maximum of {} colors.",
                colors, max
            ),
            ConversionError::InvalidDepth { requested, actual, max } => if requested > max {
                write!(f, "Requested depth of {} exceeds the maximum depth of {}.", requested, max)

            } else {
                write!(
                    f,
                    "Requested depth of {} must be greater or equal to the actual image depth of {}.",
                    requested, actual
                )
            },
            ConversionError::InvalidPixelData { message } => write!(f, "Invalid pixel data: {}", message),
            ConversionError::InvalidMap { message } => write!(f, "Invalid level map: {}", message),
            ConversionError::HeaderFieldOverflow { field, value, max } => write!(
                f,
                "The {} of {} does not fit into its header field (at most {}).",
                field, value, max
            ),
            ConversionError::InvalidTileSize { image, tile } => write!(
                f,
                "Image size of {}x{} pixel(s) is not a multiple of the tile size {}x{}.",
                image.0, image.1, tile.0, tile.1
            ),
            ConversionError::InvalidSpriteWidth { width } => write!(
                f,
                "Sprite image width must be a multiple of 16 (was {}).",
                width
            ),
            ConversionError::TooManyPlanes { planes, max } => write!(
                f,
                "{} planes exceed the maximum number of sprite planes (should be at most {}).",
                planes, max
            ),
            ConversionError::ExceededSpriteCapacity { sprites, max } => write!(
                f,
                "Sprite sheet requires {} hardware sprites but at most {} are available (2 planes x 128 pixels or 4 planes x 64 pixels).",
                sprites, max
            ),
            ConversionError::InvalidTileIndex { index, position, max } => write!(
                f,
                "Tile index {} at map position {} exceeds the maximum tile index of {}.",
                index, position, max
            ),
            ConversionError::UnknownSymbol { name, line } => write!(
                f,
                "Unknown symbol \"{}\" on line {}.",
                name, line
            ),
            ConversionError::UnknownInstruction { mnemonic, line } => write!(
                f,
                "Can't recognize instruction \"{}\" on line {}.",
                mnemonic, line
            ),
            ConversionError::InvalidOperand { operand, line, message } => write!(
                f,
                "Invalid operand \"{}\" on line {}: {}",
                operand, line, message
            ),
            ConversionError::InvalidHeader { message } => write!(f, "Invalid RATR0 file: {}", message)
        }
    }
}

impl Error for ConversionError {}


// Conversion Warnings --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionWarning {
    /// Only the first map layer is converted.
    MultiLayerUnsupported {
        layers: usize
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConversionWarning::MultiLayerUnsupported { layers } => write!(
                f,
                "Map contains {} layers but only a single layer is supported, using the first one.",
                layers
            )
        }
    }
}
