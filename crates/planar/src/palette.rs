// External Dependencies ------------------------------------------------------
use log::debug;


// Internal Dependencies ------------------------------------------------------
use crate::error::ConversionError;


// Statics --------------------------------------------------------------------
pub const MAX_DEPTH: u8 = 8;


// Colors ---------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs the upper nibble of each component into a `0x0RGB` word.
    pub fn to_rgb12(&self) -> u16 {
        ((self.r as u16 >> 4) & 0x0f) << 8
            | ((self.g as u16 >> 4) & 0x0f) << 4
            | ((self.b as u16 >> 4) & 0x0f)
    }
}


// Palette Builder ------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
    depth: u8
}

impl Palette {
    /// Derives the bit depth from the decoded palette and pads it with black
    /// entries up to `2^depth` colors.
    ///
    /// A missing palette defaults to black and white.
    pub fn build(colors: Option<Vec<Rgb>>, requested_depth: Option<u8>) -> Result<Self, ConversionError> {
        let mut colors = colors.unwrap_or_else(|| vec![Rgb::BLACK, Rgb::WHITE]);
        let actual = depth_for(colors.len());
        debug!("input image depth: {}", actual);

        if actual == 0 {
            return Err(ConversionError::InvalidPalette {
                colors: colors.len()
            });

        } else if actual > MAX_DEPTH as u32 {
            return Err(ConversionError::TooManyColors {
                colors: colors.len(),
                max: 1 << MAX_DEPTH
            });
        }

        let actual = actual as u8;
        let depth = if let Some(requested) = requested_depth {
            if requested < actual || requested > MAX_DEPTH {
                return Err(ConversionError::InvalidDepth {
                    requested,
                    actual,
                    max: MAX_DEPTH
                });
            }
            if requested != actual {
                debug!("overriding input depth ({}) with {}", actual, requested);
            }
            requested

        } else {
            actual
        };

        let size = 1usize << depth;
        debug!("adding {} missing colors", size - colors.len());
        colors.resize(size, Rgb::BLACK);
        Ok(Self {
            colors,
            depth
        })
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn to_rgb12(&self) -> Vec<u16> {
        self.colors.iter().map(Rgb::to_rgb12).collect()
    }

    /// Two big endian bytes per entry.
    pub fn write_rgb12(&self, out: &mut Vec<u8>) {
        for color in &self.colors {
            out.extend_from_slice(&color.to_rgb12().to_be_bytes());
        }
    }

    /// Three raw bytes per entry.
    pub fn write_rgb24(&self, out: &mut Vec<u8>) {
        for color in &self.colors {
            out.extend_from_slice(&[color.r, color.g, color.b]);
        }
    }
}

fn depth_for(colors: usize) -> u32 {
    if colors <= 1 {
        0

    } else {
        usize::BITS - (colors - 1).leading_zeros()
    }
}


// Tests ----------------------------------------------------------------------
#[cfg(test)]
mod test {
    use super::{Palette, Rgb, ConversionError};

    #[test]
    fn test_rgb12_packing() {
        assert_eq!(Rgb::new(0xff, 0x80, 0x1f).to_rgb12(), 0x0f81);
        assert_eq!(Rgb::BLACK.to_rgb12(), 0x0000);
        assert_eq!(Rgb::WHITE.to_rgb12(), 0x0fff);
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::build(None, None).unwrap();
        assert_eq!(palette.depth(), 1);
        assert_eq!(palette.colors(), &[Rgb::BLACK, Rgb::WHITE]);
    }

    #[test]
    fn test_single_color_rejected() {
        assert_eq!(
            Palette::build(Some(vec![Rgb::WHITE]), None),
            Err(ConversionError::InvalidPalette { colors: 1 })
        );
    }

    #[test]
    fn test_too_many_colors() {
        let err = Palette::build(Some(vec![Rgb::WHITE; 300]), None).unwrap_err();
        assert_eq!(err, ConversionError::TooManyColors { colors: 300, max: 256 });
        assert_eq!(err.to_string(), "Image palette with 300 colors exceeds the maximum of 256 colors.");

        let palette = Palette::build(Some(vec![Rgb::WHITE; 256]), None).unwrap();
        assert_eq!(palette.depth(), 8);
    }

    #[test]
    fn test_pads_to_power_of_two() {
        let colors = vec![Rgb::WHITE; 5];
        let palette = Palette::build(Some(colors), None).unwrap();
        assert_eq!(palette.depth(), 3);
        assert_eq!(palette.len(), 8);
        assert_eq!(palette.colors()[4], Rgb::WHITE);
        assert_eq!(palette.colors()[5], Rgb::BLACK);
        assert_eq!(palette.colors()[7], Rgb::BLACK);
    }

    #[test]
    fn test_requested_depth() {
        let palette = Palette::build(Some(vec![Rgb::WHITE; 4]), Some(5)).unwrap();
        assert_eq!(palette.depth(), 5);
        assert_eq!(palette.len(), 32);

        assert_eq!(
            Palette::build(Some(vec![Rgb::WHITE; 8]), Some(2)),
            Err(ConversionError::InvalidDepth { requested: 2, actual: 3, max: 8 })
        );
        assert_eq!(
            Palette::build(Some(vec![Rgb::WHITE; 2]), Some(9)),
            Err(ConversionError::InvalidDepth { requested: 9, actual: 1, max: 8 })
        );
    }

    #[test]
    fn test_palette_bytes() {
        let palette = Palette::build(Some(vec![Rgb::new(0x10, 0x20, 0x30), Rgb::WHITE]), None).unwrap();
        let mut out = Vec::new();
        palette.write_rgb12(&mut out);
        assert_eq!(out, vec![0x01, 0x23, 0x0f, 0xff]);

        let mut out = Vec::new();
        palette.write_rgb24(&mut out);
        assert_eq!(out, vec![0x10, 0x20, 0x30, 0xff, 0xff, 0xff]);
    }
}
