// External Dependencies ------------------------------------------------------
use log::debug;


// Internal Dependencies ------------------------------------------------------
use crate::error::ConversionError;
use crate::format::overflow;
use crate::planes::PlaneSet;


// Statics --------------------------------------------------------------------
pub const MAX_SPRITES: usize = 8;
pub const MAX_SPRITE_PLANES: usize = 4;
pub const SPRITE_WIDTH: usize = 16;
pub const ATTACH_FLAG: u16 = 0x80;


// Sprite Records -------------------------------------------------------------
/// A single 16 pixel wide hardware sprite.
///
/// Serialized as the row count, the control word, one `(plane 0, plane 1)`
/// word pair per row and a terminating `(0, 0)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteRecord {
    pub attached: bool,
    pub rows: Vec<(u16, u16)>
}

impl SpriteRecord {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn control_word(&self) -> u16 {
        if self.attached {
            ATTACH_FLAG

        } else {
            0
        }
    }

    pub fn words(&self) -> Vec<u16> {
        let mut words = Vec::with_capacity((self.rows.len() + 2) * 2);
        words.push(self.rows.len() as u16);
        words.push(self.control_word());
        for (lo, hi) in &self.rows {
            words.push(*lo);
            words.push(*hi);
        }
        words.push(0);
        words.push(0);
        words
    }

    pub fn byte_size(&self) -> usize {
        (self.rows.len() + 2) * 4
    }
}


// Sprite Packer --------------------------------------------------------------
/// Splits the planes of a sprite image into hardware sprite records.
///
/// Images with 1 or 3 planes receive an additional empty plane. 4 plane
/// images are split into two 2 plane batches where the second batch is
/// attached to the first one. Records are emitted per 16 pixel slice, with
/// all batches of a slice before the next slice.
pub fn pack_sprites(mut planes: PlaneSet, width: usize) -> Result<Vec<SpriteRecord>, ConversionError> {
    if width % SPRITE_WIDTH != 0 {
        return Err(ConversionError::InvalidSpriteWidth {
            width
        });
    }

    if planes.depth() == 1 || planes.depth() == 3 {
        debug!("adding empty plane to {} plane sprite", planes.depth());
        planes.push_empty_plane();
    }

    let depth = planes.depth();
    if depth > MAX_SPRITE_PLANES {
        return Err(ConversionError::TooManyPlanes {
            planes: depth,
            max: MAX_SPRITE_PLANES
        });
    }

    let slices = width / SPRITE_WIDTH;
    let count = slices * (depth / 2);
    if count > MAX_SPRITES {
        return Err(ConversionError::ExceededSpriteCapacity {
            sprites: count,
            max: MAX_SPRITES
        });
    }

    let height = planes.height();
    if height > u16::MAX as usize {
        return Err(overflow("sprite height", height, u16::MAX as usize));
    }

    let batches: Vec<&[Vec<u16>]> = planes.planes().chunks(2).collect();
    let mut sprites = Vec::with_capacity(count);
    for x in 0..slices {
        for (batch, pair) in batches.iter().enumerate() {
            let record = SpriteRecord {
                attached: batch == 1,
                rows: (0..height).map(|y| {
                    let index = y * slices + x;
                    (pair[0][index], pair[1][index])

                }).collect()
            };
            debug!(
                "sprite {} (height: {}, attach: {:02x})",
                sprites.len(),
                record.height(),
                record.control_word()
            );
            sprites.push(record);
        }
    }
    Ok(sprites)
}
