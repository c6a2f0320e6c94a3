// STD Dependencies -----------------------------------------------------------
use std::env;
use std::fs::{self, DirBuilder, File};
use std::io::{Error as IOError, Read, Write};
use std::path::{Path, PathBuf};


// External Dependencies ------------------------------------------------------
use file_io::{FileError, FileReader, FileWriter};


// Concrete File IO Implementation --------------------------------------------
#[derive(Debug)]
pub struct ProjectReader {
    base: PathBuf
}

impl ProjectReader {
    pub fn from_absolute(base: PathBuf) -> Self {
        Self {
            base
        }
    }

    pub fn from_current_dir() -> Result<Self, FileError> {
        env::current_dir().map(Self::from_absolute).map_err(|io| FileError {
            io,
            path: PathBuf::from(".")
        })
    }

    fn read_file_inner(&self, full_path: &Path) -> Result<Vec<u8>, IOError> {
        let mut file = File::open(full_path)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Writes into a temporary sibling file first and renames it over the
    /// target, the target is never left partially written.
    fn write_file_inner(&self, path: &Path, data: &[u8]) -> Result<(), IOError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            DirBuilder::new().recursive(true).create(parent)?;
        }

        let mut temp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        let result = File::create(&temp_path).and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        });
        match result.and_then(|_| fs::rename(&temp_path, path)) {
            Ok(()) => Ok(()),
            Err(err) => {
                fs::remove_file(&temp_path).ok();
                Err(err)
            }
        }
    }
}

impl FileReader for ProjectReader {
    fn base_dir(&self) -> &Path {
        &self.base
    }

    fn read_file(&self, parent: Option<&PathBuf>, child: &Path) -> Result<(PathBuf, String), FileError> {
        let path = Self::resolve_path(&self.base, parent, child);
        let bytes = self.read_file_inner(&path).map_err(|io| FileError {
            io,
            path: path.clone()
        })?;
        let text = String::from_utf8(bytes).map_err(|err| FileError {
            io: IOError::new(std::io::ErrorKind::InvalidData, err),
            path: path.clone()
        })?;
        Ok((path, text))
    }

    fn read_binary_file(&self, parent: Option<&PathBuf>, child: &Path) -> Result<(PathBuf, Vec<u8>), FileError> {
        let path = Self::resolve_path(&self.base, parent, child);
        self.read_file_inner(&path)
            .map(|bytes| (path.clone(), bytes))
            .map_err(|io| FileError { io, path })
    }
}

impl FileWriter for ProjectReader {
    fn write_file(&mut self, path: &Path, data: String) -> Result<(), FileError> {
        self.write_binary_file(path, data.into_bytes())
    }

    fn write_binary_file(&mut self, path: &Path, data: Vec<u8>) -> Result<(), FileError> {
        self.write_file_inner(path, &data).map_err(|io| FileError {
            io,
            path: path.to_path_buf()
        })
    }
}
