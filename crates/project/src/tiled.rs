// STD Dependencies -----------------------------------------------------------
use std::path::PathBuf;


// External Dependencies ------------------------------------------------------
use log::debug;
use serde::Deserialize;
use planar::{ConversionError, ConversionWarning, LevelMap};


// Tiled JSON Structures ------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct TiledMap {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub layers: Vec<TiledLayer>
}

#[derive(Debug, Deserialize)]
pub struct TiledLayer {
    #[serde(default)]
    pub name: String,
    /// Global tile ids, 0 marks an empty cell.
    #[serde(default)]
    pub data: Vec<u32>
}

#[derive(Debug, Deserialize)]
pub struct TiledTileset {
    pub image: PathBuf,
    #[serde(rename = "tilewidth")]
    pub tile_width: usize,
    #[serde(rename = "tileheight")]
    pub tile_height: usize
}

impl TiledMap {
    /// Builds a level from the first layer of the map.
    pub fn to_level(&self) -> Result<(LevelMap, Vec<ConversionWarning>), ConversionError> {
        let layer = self.layers.first().ok_or_else(|| {
            ConversionError::map("map does not contain any layers")
        })?;

        let mut warnings = Vec::new();
        if self.layers.len() > 1 {
            warnings.push(ConversionWarning::MultiLayerUnsupported {
                layers: self.layers.len()
            });
        }
        debug!("using layer \"{}\" of {}", layer.name, self.layers.len());
        Ok((LevelMap::new(self.width, self.height, &layer.data)?, warnings))
    }
}
