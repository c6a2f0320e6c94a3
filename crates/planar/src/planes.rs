// External Dependencies ------------------------------------------------------
use log::{debug, log_enabled, trace, Level};


// Internal Dependencies ------------------------------------------------------
use crate::error::ConversionError;
use crate::pixels::PixelBuffer;
use crate::palette::MAX_DEPTH;


// Types ----------------------------------------------------------------------
pub type Plane = Vec<u16>;

pub fn words_per_row(width: usize) -> usize {
    (width + 15) / 16
}


// Planar Encoder -------------------------------------------------------------
/// One bitplane per bit of the palette index, lowest bit first.
///
/// Every plane holds `words_per_row * height` words, row-major. Pixel `x` of
/// a row lands in bit `15 - x % 16` of word `x / 16`, so the leftmost pixel
/// is the most significant bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaneSet {
    words_per_row: usize,
    height: usize,
    planes: Vec<Plane>
}

impl PlaneSet {
    pub fn encode(buffer: &PixelBuffer, depth: u8) -> Self {
        debug_assert!(depth <= MAX_DEPTH, "depth {} exceeds {} planes", depth, MAX_DEPTH);
        let words_per_row = words_per_row(buffer.width());
        debug!("source image width: {} height: {}", buffer.width(), buffer.height());
        debug!("bitmap words/row: {}", words_per_row);

        let mut planes = vec![vec![0u16; words_per_row * buffer.height()]; depth as usize];
        for y in 0..buffer.height() {
            // Trailing bits of a partial last word stay unset
            for (x, color) in buffer.row(y).iter().enumerate() {
                let index = y * words_per_row + x / 16;
                let bit = 1u16 << (15 - (x % 16));
                for (p, plane) in planes.iter_mut().enumerate() {
                    if (*color >> p) & 1 == 1 {
                        plane[index] |= bit;
                    }
                }
            }
        }

        let set = Self {
            words_per_row,
            height: buffer.height(),
            planes
        };
        set.trace_planes();
        set
    }

    pub fn from_planes(words_per_row: usize, height: usize, planes: Vec<Plane>) -> Result<Self, ConversionError> {
        let expected = words_per_row * height;
        if let Some((index, plane)) = planes.iter().enumerate().find(|(_, p)| p.len() != expected) {
            return Err(ConversionError::pixel_data(format!(
                "plane {} has {} word(s) but {} are required",
                index,
                plane.len(),
                expected
            )));
        }
        Ok(Self {
            words_per_row,
            height,
            planes
        })
    }

    pub fn depth(&self) -> usize {
        self.planes.len()
    }

    pub fn words_per_row(&self) -> usize {
        self.words_per_row
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn plane_len(&self) -> usize {
        self.words_per_row * self.height
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn into_planes(self) -> Vec<Plane> {
        self.planes
    }

    pub fn push_empty_plane(&mut self) {
        self.planes.push(vec![0; self.plane_len()]);
    }

    /// Word `i` of the mask is the OR of word `i` over all planes, i.e. set
    /// for every pixel that is not background.
    pub fn mask(&self) -> Plane {
        let mut mask = vec![0u16; self.plane_len()];
        for plane in &self.planes {
            for (m, word) in mask.iter_mut().zip(plane) {
                *m |= *word;
            }
        }
        mask
    }

    fn trace_planes(&self) {
        if log_enabled!(Level::Trace) {
            for (i, plane) in self.planes.iter().enumerate() {
                trace!("plane {}:", i);
                for word in plane {
                    trace!("{:04x} {:016b}", word, word);
                }
            }
        }
    }
}


// Tests ----------------------------------------------------------------------
#[cfg(test)]
mod test {
    use super::{PlaneSet, words_per_row};
    use crate::pixels::PixelBuffer;

    fn encode(width: usize, height: usize, pixels: Vec<u8>, depth: u8) -> Vec<Vec<u16>> {
        let buffer = PixelBuffer::new(width, height, pixels).unwrap();
        PlaneSet::encode(&buffer, depth).into_planes()
    }

    #[test]
    fn test_words_per_row() {
        assert_eq!(words_per_row(1), 1);
        assert_eq!(words_per_row(16), 1);
        assert_eq!(words_per_row(17), 2);
        assert_eq!(words_per_row(320), 20);
    }

    #[test]
    fn test_plane_dimensions() {
        for (width, height, depth) in [(1, 1, 1), (15, 3, 2), (16, 4, 3), (33, 2, 5), (320, 8, 8)] {
            let buffer = PixelBuffer::new(width, height, vec![0; width * height]).unwrap();
            let set = PlaneSet::encode(&buffer, depth);
            assert_eq!(set.depth(), depth as usize);
            for plane in set.planes() {
                assert_eq!(plane.len(), words_per_row(width) * height);
            }
        }
    }

    #[test]
    fn test_depth_zero() {
        assert!(encode(2, 2, vec![1, 0, 0, 1], 0).is_empty());
    }

    #[test]
    fn test_all_zero() {
        assert_eq!(encode(2, 2, vec![0; 4], 1), vec![vec![0, 0]]);
        assert_eq!(encode(32, 2, vec![0; 64], 2), vec![vec![0; 4], vec![0; 4]]);
    }

    #[test]
    fn test_partial_word() {
        let row = 0b11 << (16 - 2);
        assert_eq!(encode(2, 2, vec![1; 4], 1), vec![vec![row, row]]);
    }

    #[test]
    fn test_full_row() {
        assert_eq!(encode(16, 2, vec![1; 32], 1), vec![vec![0xffff, 0xffff]]);
    }

    #[test]
    fn test_two_words_per_row() {
        let mut pixels = Vec::new();
        for _ in 0..2 {
            pixels.extend_from_slice(&[1; 16]);
            pixels.extend_from_slice(&[0; 16]);
        }
        assert_eq!(encode(32, 2, pixels, 1), vec![vec![0xffff, 0x0000, 0xffff, 0x0000]]);
    }

    #[test]
    fn test_bit_distribution() {
        // Colors 0..=3 in the first four pixels
        let mut pixels = vec![0; 16];
        pixels[0] = 1;
        pixels[1] = 2;
        pixels[2] = 3;
        pixels[15] = 1;
        assert_eq!(encode(16, 1, pixels, 2), vec![
            vec![0b1010_0000_0000_0001],
            vec![0b0110_0000_0000_0000]
        ]);
    }

    #[test]
    fn test_width_not_multiple_of_16() {
        // 18 pixel wide row, last pixel set
        let mut pixels = vec![0; 18];
        pixels[17] = 1;
        pixels[0] = 1;
        assert_eq!(encode(18, 1, pixels, 1), vec![vec![0x8000, 0x4000]]);
    }

    #[test]
    fn test_mask() {
        let buffer = PixelBuffer::new(16, 1, vec![0, 1, 2, 3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4]).unwrap();
        let set = PlaneSet::encode(&buffer, 3);
        let mask = set.mask();
        assert_eq!(mask, vec![0b0111_0000_0000_0001]);
        for i in 0..mask.len() {
            let or = set.planes().iter().fold(0, |acc, p| acc | p[i]);
            assert_eq!(mask[i], or);
        }
    }

    #[test]
    fn test_push_empty_plane() {
        let buffer = PixelBuffer::new(16, 2, vec![1; 32]).unwrap();
        let mut set = PlaneSet::encode(&buffer, 1);
        set.push_empty_plane();
        assert_eq!(set.planes(), &[vec![0xffff, 0xffff], vec![0, 0]]);
    }

    #[test]
    fn test_from_planes_length_mismatch() {
        assert!(PlaneSet::from_planes(1, 2, vec![vec![0, 0]]).is_ok());
        assert_eq!(
            PlaneSet::from_planes(1, 2, vec![vec![0, 0], vec![0]]).unwrap_err().to_string(),
            "Invalid pixel data: plane 1 has 1 word(s) but 2 are required"
        );
    }
}
