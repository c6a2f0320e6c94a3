// STD Dependencies -----------------------------------------------------------
use std::fmt;
use std::path::{Path, PathBuf};


// External Dependencies ------------------------------------------------------
use file_io::FileError;
use planar::ConversionError;


// Internal Dependencies ------------------------------------------------------
use crate::image::ImageError;


// Conversion Driver Errors ---------------------------------------------------
#[derive(Debug)]
pub enum ConvertError {
    File(FileError),
    Image {
        path: PathBuf,
        error: ImageError
    },
    Json {
        path: PathBuf,
        error: serde_json::Error
    },
    Config {
        path: PathBuf,
        error: toml::de::Error
    },
    MissingConfig {
        dir: PathBuf
    },
    Conversion {
        path: PathBuf,
        error: ConversionError
    }
}

impl ConvertError {
    pub fn conversion(path: &Path, error: ConversionError) -> Self {
        ConvertError::Conversion {
            path: path.to_path_buf(),
            error
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConvertError::File(err) => write!(f, "{}", err),
            ConvertError::Image { path, error } => write!(f, "In image \"{}\": {}", path.display(), error),
            ConvertError::Json { path, error } => write!(f, "Failed to parse JSON file \"{}\": {}", path.display(), error),
            ConvertError::Config { path, error } => write!(
                f,
                "Failed when trying to parse project configuration file \"{}\":\n\n{}",
                path.display(),
                error
            ),
            ConvertError::MissingConfig { dir } => write!(
                f,
                "No ratr0.toml project configuration file found in \"{}\" or any of its parent directories.",
                dir.display()
            ),
            ConvertError::Conversion { path, error } => write!(f, "In file \"{}\": {}", path.display(), error)
        }
    }
}

impl From<FileError> for ConvertError {
    fn from(err: FileError) -> Self {
        ConvertError::File(err)
    }
}
