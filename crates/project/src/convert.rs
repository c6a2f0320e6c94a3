// STD Dependencies -----------------------------------------------------------
use std::path::{Path, PathBuf};


// External Dependencies ------------------------------------------------------
use log::debug;
use file_io::{FileReader, FileWriter, Logger};
use planar::{
    CopperProgram, FileInfo, Palette, PlaneSet, SpriteSheet, TileSheet,
    TileSheetOptions
};
use planar::format::c_source::{planes_to_c, sprites_to_c};


// Internal Dependencies ------------------------------------------------------
use crate::error::ConvertError;
use crate::image::{mask_preview_png, IndexedImage};
use crate::tiled::{TiledMap, TiledTileset};


// Options --------------------------------------------------------------------
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TilesOptions {
    pub sheet: TileSheetOptions,
    /// Forces a bit depth larger than the one of the image palette.
    pub depth: Option<u8>,
    pub c_source: bool,
    /// PNG file receiving a preview of the mask planes.
    pub mask_preview: Option<PathBuf>
}


// Asset Conversion -----------------------------------------------------------
pub fn convert_tiles<R: FileReader + FileWriter>(
    logger: &mut Logger,
    reader: &mut R,
    input: &Path,
    output: &Path,
    options: &TilesOptions

) -> Result<(), ConvertError> {
    tiles_from_image(logger, reader, None, input, output, options)
}

/// Converts the image of a Tiled tileset using the tileset's tile size.
pub fn convert_tileset<R: FileReader + FileWriter>(
    logger: &mut Logger,
    reader: &mut R,
    input: &Path,
    output: &Path,
    options: &TilesOptions

) -> Result<(), ConvertError> {
    let (path, text) = reader.read_file(None, input)?;
    let tileset: TiledTileset = parse_json(&path, &text)?;
    debug!("tileset image \"{}\"", tileset.image.display());

    let options = TilesOptions {
        sheet: TileSheetOptions {
            tile_size: (tileset.tile_width, tileset.tile_height),
            mask: false,
            ..options.sheet
        },
        c_source: false,
        ..options.clone()
    };
    tiles_from_image(logger, reader, Some(&path), &tileset.image, output, &options)
}

pub fn convert_sprites<R: FileReader + FileWriter>(
    logger: &mut Logger,
    reader: &mut R,
    input: &Path,
    output: &Path,
    c_source: bool

) -> Result<(), ConvertError> {
    let (path, image) = load_image(reader, None, input)?;
    let palette = Palette::build(image.colors, None).map_err(|e| ConvertError::conversion(&path, e))?;
    debug!("sprite colors: {:03x?}", palette.to_rgb12());

    let sheet = SpriteSheet::from_image(&image.buffer, palette).map_err(|e| ConvertError::conversion(&path, e))?;
    let output = R::resolve_path(reader.base_dir(), None, output);
    if c_source {
        reader.write_file(&output, sprites_to_c(&sheet))?;

    } else {
        let bytes = sheet.to_bytes().map_err(|e| ConvertError::conversion(&path, e))?;
        reader.write_binary_file(&output, bytes)?;
    }
    logger.status("Converted", format!(
        "{} sprite(s) from \"{}\" into \"{}\"",
        sheet.sprites().len(),
        path.display(),
        output.display()
    ));
    Ok(())
}

pub fn convert_level<R: FileReader + FileWriter>(
    logger: &mut Logger,
    reader: &mut R,
    input: &Path,
    output: &Path

) -> Result<(), ConvertError> {
    let (path, text) = reader.read_file(None, input)?;
    let map: TiledMap = parse_json(&path, &text)?;
    let (level, warnings) = map.to_level().map_err(|e| ConvertError::conversion(&path, e))?;
    for warning in warnings {
        logger.warning(format!("In map \"{}\": {}", path.display(), warning));
    }

    let output = R::resolve_path(reader.base_dir(), None, output);
    reader.write_binary_file(&output, level.to_bytes())?;
    logger.status("Converted", format!(
        "{}x{} tile level from \"{}\" into \"{}\"",
        level.width(),
        level.height(),
        path.display(),
        output.display()
    ));
    Ok(())
}

/// Writes the copper list as C source and a header with the label offsets
/// next to it.
pub fn convert_copper<R: FileReader + FileWriter>(
    logger: &mut Logger,
    reader: &mut R,
    input: &Path,
    output: &Path

) -> Result<(), ConvertError> {
    let (path, text) = reader.read_file(None, input)?;
    let program = CopperProgram::assemble(&text).map_err(|e| ConvertError::conversion(&path, e))?;

    let output = R::resolve_path(reader.base_dir(), None, output);
    let header = output.with_extension("h");
    reader.write_file(&header, program.to_c_header())?;
    reader.write_file(&output, program.to_c_source())?;
    logger.status("Assembled", format!(
        "{} copper word(s) from \"{}\" into \"{}\" and \"{}\"",
        program.words.len(),
        path.display(),
        output.display(),
        header.display()
    ));
    Ok(())
}

pub fn file_info<R: FileReader>(reader: &R, input: &Path) -> Result<FileInfo, ConvertError> {
    let (path, bytes) = reader.read_binary_file(None, input)?;
    FileInfo::parse(&bytes).map_err(|e| ConvertError::conversion(&path, e))
}


// Helpers --------------------------------------------------------------------
fn tiles_from_image<R: FileReader + FileWriter>(
    logger: &mut Logger,
    reader: &mut R,
    parent: Option<&PathBuf>,
    input: &Path,
    output: &Path,
    options: &TilesOptions

) -> Result<(), ConvertError> {
    let (path, image) = load_image(reader, parent, input)?;
    let palette = Palette::build(image.colors, options.depth).map_err(|e| ConvertError::conversion(&path, e))?;
    let depth = palette.depth();
    let output = R::resolve_path(reader.base_dir(), None, output);

    if options.c_source {
        image.buffer.validate(palette.len()).map_err(|e| ConvertError::conversion(&path, e))?;
        let planes = PlaneSet::encode(&image.buffer, depth);
        reader.write_file(&output, planes_to_c(&planes, options.sheet.layout))?;

    } else {
        let sheet = TileSheet::from_image(&image.buffer, palette, &options.sheet).map_err(|e| {
            ConvertError::conversion(&path, e)
        })?;
        reader.write_binary_file(&output, sheet.to_bytes())?;
    }

    if let Some(preview) = &options.mask_preview {
        let bytes = mask_preview_png(&image.buffer, depth as usize, options.sheet.layout).map_err(|error| {
            ConvertError::Image {
                path: path.clone(),
                error
            }
        })?;
        let preview = R::resolve_path(reader.base_dir(), None, preview);
        reader.write_binary_file(&preview, bytes)?;
        logger.info(format!("Wrote mask preview \"{}\"", preview.display()));
    }

    logger.status("Converted", format!(
        "{}x{} image with {} bitplane(s) from \"{}\" into \"{}\"",
        image.buffer.width(),
        image.buffer.height(),
        depth,
        path.display(),
        output.display()
    ));
    Ok(())
}

fn load_image<R: FileReader>(
    reader: &R,
    parent: Option<&PathBuf>,
    input: &Path

) -> Result<(PathBuf, IndexedImage), ConvertError> {
    let (path, bytes) = reader.read_binary_file(parent, input)?;
    let image = IndexedImage::from_png(&bytes).map_err(|error| ConvertError::Image {
        path: path.clone(),
        error
    })?;
    Ok((path, image))
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> Result<T, ConvertError> {
    serde_json::from_str(text).map_err(|error| ConvertError::Json {
        path: path.to_path_buf(),
        error
    })
}


// Tests ----------------------------------------------------------------------
#[cfg(test)]
mod test {
    use std::path::{Path, PathBuf};
    use planar::{Layout, Rgb, TileSheetOptions};
    use planar::format::tiles::TILES_HEADER_SIZE;
    use super::{
        convert_copper, convert_level, convert_sprites, convert_tiles,
        convert_tileset, file_info, TilesOptions
    };
    use crate::image::IndexedImage;
    use crate::mocks::{indexed_png, silent_logger, MockFileReader};

    fn palette() -> Vec<Rgb> {
        vec![Rgb::BLACK, Rgb::WHITE, Rgb::new(0xff, 0, 0), Rgb::new(0, 0, 0xff)]
    }

    fn reader_with_image(path: &str, width: u32, height: u32, pixels: &[u8]) -> MockFileReader {
        let mut reader = MockFileReader::default();
        reader.add_binary_file(path, indexed_png(width, height, &palette(), pixels, 2));
        reader
    }

    #[test]
    fn test_convert_tiles() {
        let mut reader = reader_with_image("gfx/tiles.png", 16, 2, &[1; 32]);
        let options = TilesOptions {
            sheet: TileSheetOptions {
                tile_size: (16, 1),
                layout: Layout::NonInterleaved,
                ..TileSheetOptions::default()
            },
            ..TilesOptions::default()
        };
        convert_tiles(&mut silent_logger(), &mut reader, Path::new("gfx/tiles.png"), Path::new("out/tiles.ts"), &options).unwrap();

        let bytes = reader.written_file("out/tiles.ts").unwrap();
        assert_eq!(&bytes[0..8], b"RATR0TIL");
        assert_eq!(bytes[9], 0x04);
        assert_eq!(bytes[11], 2);
        // 4 color palette followed by plane 0 and plane 1
        assert_eq!(bytes[TILES_HEADER_SIZE + 8..].to_vec(), vec![0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0]);
    }

    #[test]
    fn test_convert_tiles_mask_preview() {
        let mut pixels = vec![0; 32];
        pixels[0] = 2;
        pixels[31] = 1;
        let mut reader = reader_with_image("tiles.png", 16, 2, &pixels);
        let options = TilesOptions {
            sheet: TileSheetOptions {
                tile_size: (16, 2),
                mask: true,
                ..TileSheetOptions::default()
            },
            mask_preview: Some(PathBuf::from("debug/mask.png")),
            ..TilesOptions::default()
        };
        convert_tiles(&mut silent_logger(), &mut reader, Path::new("tiles.png"), Path::new("tiles.ts"), &options).unwrap();
        assert!(reader.written_file("tiles.ts").is_some());

        // Interleaved mask rows are repeated for both bitplanes
        let preview = IndexedImage::from_png(reader.written_file("debug/mask.png").unwrap()).unwrap();
        assert_eq!(preview.buffer.width(), 16);
        assert_eq!(preview.buffer.height(), 4);
        assert_eq!(preview.buffer.row(0)[0], 1);
        assert_eq!(preview.buffer.row(1)[0], 1);
        assert_eq!(preview.buffer.row(2)[15], 1);
        assert_eq!(preview.buffer.row(3)[15], 1);
        assert_eq!(preview.buffer.pixels().iter().filter(|p| **p != 0).count(), 4);
    }

    #[test]
    fn test_convert_tiles_c_source() {
        let mut reader = reader_with_image("tiles.png", 16, 1, &[3; 16]);
        let options = TilesOptions {
            c_source: true,
            ..TilesOptions::default()
        };
        convert_tiles(&mut silent_logger(), &mut reader, Path::new("tiles.png"), Path::new("tiles.c"), &options).unwrap();
        assert_eq!(
            reader.written_text("tiles.c").unwrap(),
            "UINT16 data[] = {\n    0xffff,\n    0xffff,\n\n};\n"
        );
    }

    #[test]
    fn test_convert_tiles_forced_depth() {
        let mut reader = reader_with_image("tiles.png", 16, 16, &[0; 256]);
        let options = TilesOptions {
            depth: Some(1),
            ..TilesOptions::default()
        };
        let err = convert_tiles(&mut silent_logger(), &mut reader, Path::new("tiles.png"), Path::new("tiles.ts"), &options).unwrap_err();
        assert_eq!(
            err.to_string(),
            "In file \"/project/tiles.png\": Requested depth of 1 must be greater or equal to the actual image depth of 2."
        );
        assert!(reader.written.is_empty());
    }

    #[test]
    fn test_convert_tileset() {
        let mut reader = reader_with_image("maps/tiles.png", 32, 16, &[2; 512]);
        reader.add_file("maps/tiles.json", r#"{ "image": "tiles.png", "tilewidth": 16, "tileheight": 8 }"#);
        let options = TilesOptions {
            c_source: true,
            ..TilesOptions::default()
        };
        convert_tileset(&mut silent_logger(), &mut reader, Path::new("maps/tiles.json"), Path::new("tiles.ts"), &options).unwrap();

        let bytes = reader.written_file("tiles.ts").unwrap();
        assert_eq!(&bytes[0..8], b"RATR0TIL");
        // Tile size and count
        assert_eq!(bytes[16..24].to_vec(), vec![0, 16, 0, 8, 0, 2, 0, 2]);
    }

    #[test]
    fn test_convert_sprites() {
        let mut reader = reader_with_image("sprite.png", 16, 2, &[3; 32]);
        convert_sprites(&mut silent_logger(), &mut reader, Path::new("sprite.png"), Path::new("sprite.spr"), false).unwrap();
        let bytes = reader.written_file("sprite.spr").unwrap();
        assert_eq!(&bytes[0..8], b"RATR0SPR");
        assert_eq!(bytes.len(), 20 + 2 + 8 + 16);

        convert_sprites(&mut silent_logger(), &mut reader, Path::new("sprite.png"), Path::new("sprite.c"), true).unwrap();
        assert!(reader.written_text("sprite.c").unwrap().starts_with("UWORD palette[] = {\n  0x0000, 0x0fff, 0x0f00, 0x000f\n};"));
    }

    #[test]
    fn test_convert_sprites_too_wide() {
        let mut reader = reader_with_image("sprite.png", 8, 1, &[0; 8]);
        let err = convert_sprites(&mut silent_logger(), &mut reader, Path::new("sprite.png"), Path::new("sprite.spr"), false).unwrap_err();
        assert_eq!(err.to_string(), "In file \"/project/sprite.png\": Sprite image width must be a multiple of 16 (was 8).");
    }

    #[test]
    fn test_convert_level() {
        let mut reader = MockFileReader::default();
        reader.add_file("level.json", r#"{
            "width": 2, "height": 1,
            "layers": [{ "data": [1, 0] }, { "data": [2, 2] }]
        }"#);
        let mut logger = file_io::Logger::new();
        convert_level(&mut logger, &mut reader, Path::new("level.json"), Path::new("level.lvl")).unwrap();
        assert_eq!(reader.written_file("level.lvl").unwrap()[16..].to_vec(), vec![1, 0]);
        assert_eq!(logger.lines().len(), 2);
        assert!(logger.lines()[0].contains("only a single layer is supported"));
    }

    #[test]
    fn test_convert_level_invalid_json() {
        let mut reader = MockFileReader::default();
        reader.add_file("level.json", "{ \"width\": 2");
        let err = convert_level(&mut silent_logger(), &mut reader, Path::new("level.json"), Path::new("level.lvl")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse JSON file \"/project/level.json\": "));
    }

    #[test]
    fn test_convert_copper() {
        let mut reader = MockFileReader::default();
        reader.add_file("copper.txt", "# display\nCMOVE COLOR00,0x0f0\nirq:\nCWAIT 0,0xff\nCEND\n");
        convert_copper(&mut silent_logger(), &mut reader, Path::new("copper.txt"), Path::new("src/copper.c")).unwrap();
        assert_eq!(
            reader.written_text("src/copper.c").unwrap(),
            "#include <ratr0/data_types.h>\n\n\nUINT16 __chip clist[] = {\n\t0x180, 0x0f0, 0xff01, 0xfffe, 0xffff, 0xfffe\n};\n"
        );
        assert!(reader.written_text("src/copper.h").unwrap().contains("#define irq (2)\n"));
    }

    #[test]
    fn test_convert_copper_error_names_file_and_line() {
        let mut reader = MockFileReader::default();
        reader.add_file("copper.txt", "CMOVE NOPE,0\n");
        let err = convert_copper(&mut silent_logger(), &mut reader, Path::new("copper.txt"), Path::new("copper.c")).unwrap_err();
        assert_eq!(err.to_string(), "In file \"/project/copper.txt\": Unknown symbol \"NOPE\" on line 1.");
        assert!(reader.written.is_empty());
    }

    #[test]
    fn test_file_info() {
        let mut reader = MockFileReader::default();
        reader.add_file("level.json", r#"{ "width": 1, "height": 1, "layers": [{ "data": [1] }] }"#);
        convert_level(&mut silent_logger(), &mut reader, Path::new("level.json"), Path::new("level.lvl")).unwrap();
        let bytes = reader.written_file("level.lvl").unwrap().clone();
        reader.add_binary_file("level.lvl", bytes);
        assert!(file_info(&reader, Path::new("level.lvl")).unwrap().to_string().starts_with("RATR0 Level File"));

        let err = file_info(&reader, Path::new("missing.lvl")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to access file \"/project/missing.lvl\": No Mock file provided");
    }
}
