// Modules --------------------------------------------------------------------
mod config;
pub mod convert;
mod error;
pub mod image;
mod reader;
pub mod tiled;

#[cfg(test)]
mod mocks;


// Internal Dependencies ------------------------------------------------------
pub use self::config::{ProjectConfig, CONFIG_FILE};
pub use self::convert::TilesOptions;
pub use self::error::ConvertError;
pub use self::reader::ProjectReader;
