// STD Dependencies -----------------------------------------------------------
use std::fmt;
use std::collections::HashMap;


// External Dependencies ------------------------------------------------------
use log::debug;
use png::{BitDepth, ColorType, DecodingError, EncodingError, Transformations};
use planar::{ConversionError, Layout, PixelBuffer, Rgb};
use planar::interleave::mask_depth;


// Statics --------------------------------------------------------------------
const MAX_COLORS: usize = 256;


// Image Errors ---------------------------------------------------------------
#[derive(Debug)]
pub enum ImageError {
    Decode(DecodingError),
    Encode(EncodingError),
    Unsupported(String),
    Pixels(ConversionError)
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ImageError::Decode(err) => write!(f, "Failed to decode PNG: {}", err),
            ImageError::Encode(err) => write!(f, "Failed to encode PNG: {}", err),
            ImageError::Unsupported(message) => write!(f, "Unsupported PNG: {}", message),
            ImageError::Pixels(err) => write!(f, "{}", err)
        }
    }
}

impl From<DecodingError> for ImageError {
    fn from(err: DecodingError) -> Self {
        ImageError::Decode(err)
    }
}

impl From<EncodingError> for ImageError {
    fn from(err: EncodingError) -> Self {
        ImageError::Encode(err)
    }
}


// Indexed Image --------------------------------------------------------------
/// Palette indices of a decoded image together with the palette stored in
/// the file, if any.
#[derive(Debug)]
pub struct IndexedImage {
    pub buffer: PixelBuffer,
    pub colors: Option<Vec<Rgb>>
}

impl IndexedImage {
    /// Decodes a PNG without any color transformations.
    ///
    /// Indexed images keep their palette. 1-bit grayscale images have no
    /// palette and get the default black and white one. True color images
    /// get a palette made from their distinct colors in order of appearance.
    pub fn from_png(bytes: &[u8]) -> Result<Self, ImageError> {
        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(Transformations::IDENTITY);

        let mut reader = decoder.read_info()?;
        let mut data = vec![0; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut data)?;
        let (width, height) = (frame.width as usize, frame.height as usize);
        debug!(
            "png {}x{} ({:?}, {} bit)",
            width,
            height,
            frame.color_type,
            frame.bit_depth as u8
        );

        match (frame.color_type, frame.bit_depth) {
            (ColorType::Indexed, BitDepth::Sixteen) => Err(ImageError::Unsupported(
                "indexed images with 16 bits per pixel are not valid".to_string()
            )),
            (ColorType::Indexed, bit_depth) => {
                let colors = reader.info().palette.as_ref().map(|palette| {
                    palette.chunks_exact(3).map(|c| Rgb::new(c[0], c[1], c[2])).collect::<Vec<Rgb>>()

                }).ok_or_else(|| ImageError::Unsupported("indexed image without a palette".to_string()))?;
                let pixels = unpack_indices(&data, frame.line_size, width, height, bit_depth as u8);
                Ok(Self {
                    buffer: PixelBuffer::new(width, height, pixels).map_err(ImageError::Pixels)?,
                    colors: Some(colors)
                })
            },
            (ColorType::Grayscale, BitDepth::One) => {
                let pixels = unpack_indices(&data, frame.line_size, width, height, 1);
                Ok(Self {
                    buffer: PixelBuffer::new(width, height, pixels).map_err(ImageError::Pixels)?,
                    colors: None
                })
            },
            (ColorType::Rgb, BitDepth::Eight) => Self::from_true_color(&data, frame.line_size, width, height, 3),
            (ColorType::Rgba, BitDepth::Eight) => Self::from_true_color(&data, frame.line_size, width, height, 4),
            (color_type, bit_depth) => Err(ImageError::Unsupported(format!(
                "{:?} images with {} bits per channel can't be converted, use an indexed PNG",
                color_type,
                bit_depth as u8
            )))
        }
    }

    fn from_true_color(
        data: &[u8],
        line_size: usize,
        width: usize,
        height: usize,
        channels: usize

    ) -> Result<Self, ImageError> {
        let mut colors: Vec<Rgb> = Vec::new();
        let mut lookup: HashMap<Rgb, u8> = HashMap::new();
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = &data[y * line_size..y * line_size + width * channels];
            for pixel in row.chunks_exact(channels) {
                let color = Rgb::new(pixel[0], pixel[1], pixel[2]);
                let index = if let Some(index) = lookup.get(&color) {
                    *index

                } else {
                    if colors.len() == MAX_COLORS {
                        return Err(ImageError::Unsupported(format!(
                            "image uses more than {} colors",
                            MAX_COLORS
                        )));
                    }
                    let index = colors.len() as u8;
                    colors.push(color);
                    lookup.insert(color, index);
                    index
                };
                pixels.push(index);
            }
        }
        debug!("collected {} colors from true color image", colors.len());
        Ok(Self {
            buffer: PixelBuffer::new(width, height, pixels).map_err(ImageError::Pixels)?,
            colors: Some(colors)
        })
    }
}


// Mask Preview ---------------------------------------------------------------
/// Renders all non-background pixels as white into a 1-bit grayscale PNG.
///
/// Rows are laid out like the mask planes of a tile sheet, so interleaved
/// sheets repeat every row once per bitplane.
pub fn mask_preview_png(buffer: &PixelBuffer, depth: usize, layout: Layout) -> Result<Vec<u8>, ImageError> {
    let repeat = mask_depth(depth, layout);
    let (width, height) = (buffer.width(), buffer.height());
    let row_bytes = (width + 7) / 8;

    let mut data = Vec::with_capacity(row_bytes * height * repeat);
    for y in 0..height {
        let mut row = vec![0u8; row_bytes];
        for (x, pixel) in buffer.row(y).iter().enumerate() {
            if *pixel != 0 {
                row[x / 8] |= 0x80 >> (x % 8);
            }
        }
        for _ in 0..repeat {
            data.extend_from_slice(&row);
        }
    }
    debug!("mask preview {}x{} ({} row(s) per image row)", width, height * repeat, repeat);

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width as u32, (height * repeat) as u32);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::One);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
        writer.finish()?;
    }
    Ok(out)
}

/// Unpacks rows of `bits` wide samples, leftmost pixel in the most
/// significant bits. Every row starts on a byte boundary.
fn unpack_indices(data: &[u8], line_size: usize, width: usize, height: usize, bits: u8) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height);
    let per_byte = 8 / bits as usize;
    let mask = ((1u16 << bits) - 1) as u8;
    for y in 0..height {
        let row = &data[y * line_size..(y + 1) * line_size];
        for x in 0..width {
            let byte = row[x / per_byte];
            let shift = 8 - bits as usize * (x % per_byte + 1);
            pixels.push((byte >> shift) & mask);
        }
    }
    pixels
}


// Tests ----------------------------------------------------------------------
#[cfg(test)]
mod test {
    use super::{mask_preview_png, unpack_indices, IndexedImage};
    use crate::mocks::{indexed_png, rgb_png, gray_png};
    use planar::{Layout, PixelBuffer, Rgb};

    #[test]
    fn test_unpack_indices() {
        assert_eq!(unpack_indices(&[0b1010_0000], 1, 4, 1, 1), vec![1, 0, 1, 0]);
        assert_eq!(unpack_indices(&[0b1101_0010, 0b1100_0000], 2, 5, 1, 2), vec![3, 1, 0, 2, 3]);
        assert_eq!(unpack_indices(&[0x1f, 0x20, 0x3f, 0x40], 2, 3, 2, 4), vec![1, 15, 2, 3, 15, 4]);
        assert_eq!(unpack_indices(&[7, 8, 9, 10], 2, 2, 2, 8), vec![7, 8, 9, 10]);
    }

    #[test]
    fn test_indexed_png() {
        let palette = [Rgb::BLACK, Rgb::new(0xff, 0, 0), Rgb::new(0, 0xff, 0)];
        for bits in [2, 4, 8] {
            let bytes = indexed_png(3, 2, &palette, &[0, 1, 2, 2, 1, 0], bits);
            let image = IndexedImage::from_png(&bytes).unwrap();
            assert_eq!(image.buffer.width(), 3);
            assert_eq!(image.buffer.height(), 2);
            assert_eq!(image.buffer.pixels(), &[0, 1, 2, 2, 1, 0]);
            assert_eq!(image.colors, Some(palette.to_vec()));
        }
    }

    #[test]
    fn test_grayscale_png() {
        let bytes = gray_png(10, 1, &[1, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        let image = IndexedImage::from_png(&bytes).unwrap();
        assert_eq!(image.buffer.pixels(), &[1, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(image.colors, None);
    }

    #[test]
    fn test_true_color_png() {
        let red = Rgb::new(0xff, 0, 0);
        let blue = Rgb::new(0, 0, 0xff);
        let bytes = rgb_png(2, 2, &[red, blue, blue, red]);
        let image = IndexedImage::from_png(&bytes).unwrap();
        assert_eq!(image.buffer.pixels(), &[0, 1, 1, 0]);
        assert_eq!(image.colors, Some(vec![red, blue]));
    }

    #[test]
    fn test_invalid_png() {
        assert!(IndexedImage::from_png(b"not a png").unwrap_err().to_string().starts_with("Failed to decode PNG: "));
    }

    #[test]
    fn test_mask_preview() {
        let buffer = PixelBuffer::new(10, 2, vec![
            0, 3, 0, 0, 0, 0, 0, 0, 0, 1,
            2, 0, 0, 0, 0, 0, 0, 0, 0, 0
        ]).unwrap();

        let image = IndexedImage::from_png(&mask_preview_png(&buffer, 2, Layout::Interleaved).unwrap()).unwrap();
        assert_eq!(image.buffer.width(), 10);
        assert_eq!(image.buffer.height(), 4);
        assert_eq!(image.buffer.row(0), &[0, 1, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(image.buffer.row(1), &[0, 1, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(image.buffer.row(2), &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(image.buffer.row(3), &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(image.colors, None);

        let image = IndexedImage::from_png(&mask_preview_png(&buffer, 2, Layout::NonInterleaved).unwrap()).unwrap();
        assert_eq!(image.buffer.height(), 2);
        assert_eq!(image.buffer.row(1), &[1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }
}
