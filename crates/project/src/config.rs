// STD Dependencies -----------------------------------------------------------
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};


// External Dependencies ------------------------------------------------------
use log::debug;
use serde::Deserialize;
use file_io::{FileReader, FileWriter, Logger};
use planar::{Layout, TileSheetOptions};


// Internal Dependencies ------------------------------------------------------
use crate::convert::{self, TilesOptions};
use crate::error::ConvertError;


// Statics --------------------------------------------------------------------
pub const CONFIG_FILE: &str = "ratr0.toml";


// RATR0 Project Configuration ------------------------------------------------
#[derive(Debug, Default, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub tiles: BTreeMap<String, TilesConfig>,
    #[serde(default)]
    pub tilesets: BTreeMap<String, TilesetConfig>,
    #[serde(default)]
    pub sprites: BTreeMap<String, SpritesConfig>,
    #[serde(default)]
    pub levels: BTreeMap<String, AssetConfig>,
    #[serde(default)]
    pub copper: BTreeMap<String, AssetConfig>
}

impl ProjectConfig {
    /// Searches for the configuration file starting at the reader's base
    /// directory and walking up through its parents.
    ///
    /// All asset paths of the returned configuration are resolved against
    /// the directory containing the configuration file.
    pub fn try_load<R: FileReader>(logger: &mut Logger, reader: &R) -> Result<ProjectConfig, ConvertError> {
        let mut dir = reader.base_dir().to_path_buf();
        loop {
            let config_file = dir.join(CONFIG_FILE);

            // Check if config file exists at this level
            match reader.read_file(None, &config_file) {
                Ok((path, text)) => {
                    let mut project = toml::from_str::<ProjectConfig>(&text).map_err(|error| {
                        ConvertError::Config {
                            path: path.clone(),
                            error
                        }
                    })?;
                    project.resolve_paths(&dir);
                    logger.info(format!("Loaded project configuration from {}", path.display()));
                    return Ok(project);
                },
                Err(err) if err.io.kind() == ErrorKind::NotFound => if let Some(parent) = dir.parent() {
                    dir = parent.into();

                } else {
                    return Err(ConvertError::MissingConfig {
                        dir: reader.base_dir().to_path_buf()
                    });
                },
                Err(err) => return Err(err.into())
            }
        }
    }

    /// Converts every configured asset, stopping at the first failure.
    pub fn build<R: FileReader + FileWriter>(&self, logger: &mut Logger, reader: &mut R) -> Result<usize, ConvertError> {
        let mut count = 0;
        for (name, tiles) in &self.tiles {
            debug!("building tiles \"{}\"", name);
            convert::convert_tiles(logger, reader, &tiles.input, &tiles.output, &tiles.options())?;
            count += 1;
        }
        for (name, tileset) in &self.tilesets {
            debug!("building tileset \"{}\"", name);
            convert::convert_tileset(logger, reader, &tileset.input, &tileset.output, &tileset.options())?;
            count += 1;
        }
        for (name, sprites) in &self.sprites {
            debug!("building sprites \"{}\"", name);
            convert::convert_sprites(logger, reader, &sprites.input, &sprites.output, sprites.c_source)?;
            count += 1;
        }
        for (name, level) in &self.levels {
            debug!("building level \"{}\"", name);
            convert::convert_level(logger, reader, &level.input, &level.output)?;
            count += 1;
        }
        for (name, copper) in &self.copper {
            debug!("building copper list \"{}\"", name);
            convert::convert_copper(logger, reader, &copper.input, &copper.output)?;
            count += 1;
        }
        Ok(count)
    }

    fn resolve_paths(&mut self, dir: &Path) {
        for tiles in self.tiles.values_mut() {
            resolve(dir, &mut tiles.input, &mut tiles.output);
            if let Some(preview) = tiles.mask_preview.as_mut() {
                *preview = dir.join(&*preview);
            }
        }
        for tileset in self.tilesets.values_mut() {
            resolve(dir, &mut tileset.input, &mut tileset.output);
        }
        for sprites in self.sprites.values_mut() {
            resolve(dir, &mut sprites.input, &mut sprites.output);
        }
        for asset in self.levels.values_mut().chain(self.copper.values_mut()) {
            resolve(dir, &mut asset.input, &mut asset.output);
        }
    }
}

fn resolve(dir: &Path, input: &mut PathBuf, output: &mut PathBuf) {
    *input = dir.join(&*input);
    *output = dir.join(&*output);
}

#[derive(Debug, Deserialize)]
pub struct TilesConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default = "default_tile_size")]
    pub tile_width: usize,
    #[serde(default = "default_tile_size")]
    pub tile_height: usize,
    pub depth: Option<u8>,
    #[serde(default)]
    pub palette24: bool,
    #[serde(default)]
    pub non_interleaved: bool,
    #[serde(default)]
    pub mask: bool,
    pub mask_preview: Option<PathBuf>,
    #[serde(default)]
    pub c_source: bool
}

impl TilesConfig {
    pub fn options(&self) -> TilesOptions {
        TilesOptions {
            sheet: TileSheetOptions {
                tile_size: (self.tile_width, self.tile_height),
                layout: layout(self.non_interleaved),
                palette24: self.palette24,
                mask: self.mask
            },
            depth: self.depth,
            c_source: self.c_source,
            mask_preview: self.mask_preview.clone()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TilesetConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub depth: Option<u8>,
    #[serde(default)]
    pub palette24: bool,
    #[serde(default)]
    pub non_interleaved: bool
}

impl TilesetConfig {
    pub fn options(&self) -> TilesOptions {
        TilesOptions {
            sheet: TileSheetOptions {
                layout: layout(self.non_interleaved),
                palette24: self.palette24,
                ..TileSheetOptions::default()
            },
            depth: self.depth,
            c_source: false,
            mask_preview: None
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SpritesConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(default)]
    pub c_source: bool
}

#[derive(Debug, Deserialize)]
pub struct AssetConfig {
    pub input: PathBuf,
    pub output: PathBuf
}

fn default_tile_size() -> usize {
    16
}

fn layout(non_interleaved: bool) -> Layout {
    if non_interleaved {
        Layout::NonInterleaved

    } else {
        Layout::Interleaved
    }
}
