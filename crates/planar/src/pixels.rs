// Internal Dependencies ------------------------------------------------------
use crate::error::ConversionError;


// Indexed Pixel Buffer -------------------------------------------------------
/// Decoded image with one palette index per pixel, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self, ConversionError> {
        if pixels.len() != width * height {
            return Err(ConversionError::pixel_data(format!(
                "expected {} pixel(s) for a {}x{} image but got {}",
                width * height, width, height, pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    /// Fails on the first pixel whose index does not fit into the palette.
    pub fn validate(&self, palette_size: usize) -> Result<(), ConversionError> {
        if let Some(index) = self.pixels.iter().position(|p| *p as usize >= palette_size) {
            return Err(ConversionError::pixel_data(format!(
                "pixel at {}x{} uses color index {} outside of the {} color palette",
                index % self.width,
                index / self.width,
                self.pixels[index],
                palette_size
            )));
        }
        Ok(())
    }
}
