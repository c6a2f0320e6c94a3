// STD Dependencies -----------------------------------------------------------
use std::path::{Path, PathBuf};
use std::collections::HashMap;
use std::io::{Error as IOError, ErrorKind};


// External Dependencies ------------------------------------------------------
use png::{BitDepth, ColorType};
use file_io::{FileError, FileReader, FileWriter, Logger};
use planar::Rgb;


// Mock File IO ---------------------------------------------------------------
pub struct MockFileReader {
    pub base: PathBuf,
    files: HashMap<PathBuf, Vec<u8>>,
    pub written: HashMap<PathBuf, Vec<u8>>
}

impl Default for MockFileReader {
    fn default() -> Self {
        Self {
            base: PathBuf::from("/project"),
            files: HashMap::new(),
            written: HashMap::new()
        }
    }
}

impl MockFileReader {
    pub fn add_file<S: Into<String>>(&mut self, path: S, content: S) {
        let path = Self::resolve_path(&self.base, None, Path::new(&path.into()));
        self.files.insert(path, content.into().into_bytes());
    }

    pub fn add_binary_file<S: Into<String>>(&mut self, path: S, bytes: Vec<u8>) {
        let path = Self::resolve_path(&self.base, None, Path::new(&path.into()));
        self.files.insert(path, bytes);
    }

    pub fn written_file(&self, path: &str) -> Option<&Vec<u8>> {
        self.written.get(&Self::resolve_path(&self.base, None, Path::new(path)))
    }

    pub fn written_text(&self, path: &str) -> Option<String> {
        self.written_file(path).map(|bytes| String::from_utf8_lossy(bytes).to_string())
    }

    fn lookup(&self, parent: Option<&PathBuf>, child: &Path) -> Result<(PathBuf, Vec<u8>), FileError> {
        let path = Self::resolve_path(&self.base, parent, child);
        let contents = self.files.get(&path).cloned().ok_or_else(|| {
            FileError {
                io: IOError::new(ErrorKind::NotFound, "No Mock file provided"),
                path: path.clone()
            }
        })?;
        Ok((path, contents))
    }
}

impl FileReader for MockFileReader {
    fn read_file(&self, parent: Option<&PathBuf>, child: &Path) -> Result<(PathBuf, String), FileError> {
        let (path, bytes) = self.lookup(parent, child)?;
        Ok((path, String::from_utf8_lossy(&bytes).to_string()))
    }

    fn read_binary_file(&self, parent: Option<&PathBuf>, child: &Path) -> Result<(PathBuf, Vec<u8>), FileError> {
        self.lookup(parent, child)
    }

    fn base_dir(&self) -> &Path {
        &self.base
    }
}

impl FileWriter for MockFileReader {
    fn write_file(&mut self, path: &Path, data: String) -> Result<(), FileError> {
        self.written.insert(path.to_path_buf(), data.into_bytes());
        Ok(())
    }

    fn write_binary_file(&mut self, path: &Path, data: Vec<u8>) -> Result<(), FileError> {
        self.written.insert(path.to_path_buf(), data);
        Ok(())
    }
}

pub fn silent_logger() -> Logger {
    let mut logger = Logger::new();
    logger.set_silent();
    logger
}


// PNG Fixtures ---------------------------------------------------------------
pub fn indexed_png(width: u32, height: u32, palette: &[Rgb], pixels: &[u8], bits: u8) -> Vec<u8> {
    let depth = match bits {
        1 => BitDepth::One,
        2 => BitDepth::Two,
        4 => BitDepth::Four,
        _ => BitDepth::Eight
    };
    let plte: Vec<u8> = palette.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
    encode(width, height, ColorType::Indexed, depth, Some(plte), &pack(width, pixels, bits))
}

pub fn gray_png(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
    encode(width, height, ColorType::Grayscale, BitDepth::One, None, &pack(width, pixels, 1))
}

pub fn rgb_png(width: u32, height: u32, pixels: &[Rgb]) -> Vec<u8> {
    let data: Vec<u8> = pixels.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
    encode(width, height, ColorType::Rgb, BitDepth::Eight, None, &data)
}

fn pack(width: u32, pixels: &[u8], bits: u8) -> Vec<u8> {
    let per_byte = 8 / bits as usize;
    let mut data = Vec::new();
    for row in pixels.chunks(width as usize) {
        for group in row.chunks(per_byte) {
            let mut byte = 0u8;
            for (i, index) in group.iter().enumerate() {
                byte |= index << (8 - bits as usize * (i + 1));
            }
            data.push(byte);
        }
    }
    data
}

fn encode(width: u32, height: u32, color: ColorType, depth: BitDepth, palette: Option<Vec<u8>>, data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(depth);
        if let Some(palette) = palette {
            encoder.set_palette(palette);
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}
