// STD Dependencies -----------------------------------------------------------
use std::fmt;
use std::path::{Path, PathBuf};
use std::io::Error as IOError;


// External Dependencies ------------------------------------------------------
use colored::Colorize;


// Generic Traits -------------------------------------------------------------
#[derive(Debug)]
pub struct FileError {
    pub io: IOError,
    pub path: PathBuf
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Failed to access file \"{}\": {}", self.path.display(), self.io)
    }
}

pub struct Logger {
    silent: bool,
    output: Vec<String>
}

impl Logger {

    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            silent: false,
            output: Vec::new()
        }
    }

    pub fn format_error<S: Into<String>>(s: S) -> String {
        format!("       {} {}", "Error".bright_red(), s.into())
    }

    pub fn set_silent(&mut self) {
        self.silent = true;
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn log<S: Into<String>>(&mut self, s: S) {
        if !self.silent {
            self.output.push(s.into());
        }
    }

    /// Command results, buffered even in silent mode.
    pub fn report<S: Into<String>>(&mut self, s: S) {
        self.output.push(s.into());
    }

    pub fn warning<S: Into<String>>(&mut self, s: S) {
        if !self.silent {
            self.output.push(format!("     {} {}", "Warning".bright_yellow(), s.into()));
        }
    }

    pub fn info<S: Into<String>>(&mut self, s: S) {
        if !self.silent {
            self.output.push(format!("        {} {}", "Info".bright_blue(), s.into()));
        }
    }

    pub fn status<S: Into<String>, U: Into<String>>(&mut self, s: S, m: U) {
        if !self.silent {
            self.output.push(format!("{: >12} {}", s.into().bright_green(), m.into()));
        }
    }

    pub fn flush(&mut self) {
        if !self.output.is_empty() {
            println!("{}", self);
        }
        self.output.clear();
    }

    /// Errors are printed even in silent mode.
    pub fn error<S: Into<String>>(&mut self, s: S) {
        self.flush();
        eprintln!("{}", Self::format_error(s));
    }

    /// Buffered lines, used by tests to inspect what would be printed.
    pub fn lines(&self) -> &[String] {
        &self.output
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.output.join("\n"))
    }
}

pub trait FileReader {

    fn read_file(&self, parent: Option<&PathBuf>, child: &Path) -> Result<(PathBuf, String), FileError>;

    fn read_binary_file(&self, parent: Option<&PathBuf>, child: &Path) -> Result<(PathBuf, Vec<u8>), FileError>;

    fn base_dir(&self) -> &Path;

    /// Joins `child` onto the directory of `parent`, or onto `base` when no
    /// parent is given. Absolute children are kept as they are.
    fn resolve_path(base: &Path, parent: Option<&PathBuf>, child: &Path) -> PathBuf {
        if child.is_absolute() {
            child.to_path_buf()

        } else if let Some(parent) = parent {
            let mut full_path = if parent.is_absolute() {
                parent.clone()

            } else {
                base.join(parent)
            };
            full_path.set_file_name("");
            full_path.push(child);
            full_path

        } else {
            base.join(child)
        }
    }

}

pub trait FileWriter {
    fn write_file(&mut self, path: &Path, data: String) -> Result<(), FileError>;
    fn write_binary_file(&mut self, path: &Path, data: Vec<u8>) -> Result<(), FileError>;
}
