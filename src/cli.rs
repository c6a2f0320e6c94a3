// External Dependencies ------------------------------------------------------
use clap::{Arg, Command};


// CLI Definition -------------------------------------------------------------
pub fn app() -> Command<'static> {
    Command::new("ratr0")
        .version("0.1.0")
        .about("Converts images, level maps and copper lists into RATR0 engine assets")
        .arg(Arg::new("silent")
            .long("silent")
            .short('s')
            .global(true)
            .help("Suppress all output except errors")
        )
        .arg(Arg::new("verbose")
            .long("verbose")
            .short('v')
            .global(true)
            .multiple_occurrences(true)
            .help("Print conversion details, repeat for plane dumps")
        )
        .subcommand(Command::new("tiles")
            .about("converts an image into a RATR0 tile sheet")
            .arg(input_arg("IMAGE_FILE", "Input PNG image"))
            .arg(output_arg("RATR0 tile sheet to generate"))
            .arg(Arg::new("TILE_SIZE")
                .long("tile-size")
                .short('t')
                .takes_value(true)
                .default_value("16x16")
                .validator(is_tile_size)
                .help("Tile size in pixels as WIDTHxHEIGHT")
            )
            .arg(depth_arg())
            .arg(palette24_arg())
            .arg(non_interleaved_arg())
            .arg(Arg::new("MASK")
                .long("mask")
                .short('m')
                .help("Append a mask of all non-background pixels")
            )
            .arg(Arg::new("MASK_PREVIEW")
                .long("mask-preview")
                .takes_value(true)
                .value_name("FILE")
                .help("Write the mask planes into a PNG file for visual inspection")
            )
            .arg(c_source_arg())
        )
        .subcommand(Command::new("sprites")
            .about("converts an image into a RATR0 hardware sprite sheet")
            .arg(input_arg("IMAGE_FILE", "Input PNG image, its width must be a multiple of 16"))
            .arg(output_arg("RATR0 sprite sheet to generate"))
            .arg(c_source_arg())
        )
        .subcommand(Command::new("level")
            .about("converts a Tiled JSON map into a RATR0 level")
            .arg(input_arg("MAP_FILE", "Input Tiled JSON map"))
            .arg(output_arg("RATR0 level file to generate"))
        )
        .subcommand(Command::new("tiled")
            .about("converts the image of a Tiled JSON tileset into a RATR0 tile sheet")
            .arg(input_arg("TILESET_FILE", "Input Tiled JSON tileset"))
            .arg(output_arg("RATR0 tile sheet to generate"))
            .arg(depth_arg())
            .arg(palette24_arg())
            .arg(non_interleaved_arg())
        )
        .subcommand(Command::new("copper")
            .about("assembles a copper list into C source and header files")
            .arg(input_arg("COPPER_FILE", "Input copper list"))
            .arg(output_arg("C source file to generate, the header is written next to it"))
        )
        .subcommand(Command::new("info")
            .about("prints the header of a RATR0 asset file")
            .arg(input_arg("ASSET_FILE", "RATR0 tile sheet, sprite sheet or level"))
        )
        .subcommand(Command::new("build")
            .about("converts all assets listed in the ratr0.toml project configuration")
        )
}

fn input_arg(name: &'static str, help: &'static str) -> Arg<'static> {
    Arg::new(name)
        .help(help)
        .required(true)
        .index(1)
}

fn output_arg(help: &'static str) -> Arg<'static> {
    Arg::new("OUTPUT_FILE")
        .long("out-file")
        .short('o')
        .takes_value(true)
        .required(true)
        .help(help)
}

fn depth_arg() -> Arg<'static> {
    Arg::new("DEPTH")
        .long("depth")
        .short('d')
        .takes_value(true)
        .validator(is_depth)
        .help("Force a bit depth larger than the one of the image palette")
}

fn palette24_arg() -> Arg<'static> {
    Arg::new("PALETTE_24")
        .long("palette24")
        .help("Store the palette as 24-bit RGB instead of 12-bit")
}

fn non_interleaved_arg() -> Arg<'static> {
    Arg::new("NON_INTERLEAVED")
        .long("non-interleaved")
        .short('n')
        .help("Store each bitplane in full instead of interleaving rows")
}

fn c_source_arg() -> Arg<'static> {
    Arg::new("C_SOURCE")
        .long("c-source")
        .short('c')
        .help("Generate C source instead of a binary file")
}


// Helpers --------------------------------------------------------------------
pub fn parse_tile_size(size: &str) -> Option<(usize, usize)> {
    let (width, height) = size.split_once(|c| c == 'x' || c == 'X')?;
    Some((width.parse().ok()?, height.parse().ok()?))
}

fn is_tile_size(size: &str) -> Result<(), String> {
    match parse_tile_size(size) {
        Some((w, h)) if w > 0 && h > 0 => Ok(()),
        _ => Err(format!("Tile size \"{}\" must be given as WIDTHxHEIGHT e.g. 16x16", size))
    }
}

fn is_depth(depth: &str) -> Result<(), String> {
    match depth.parse::<u8>() {
        Ok(d) if (1..=8).contains(&d) => Ok(()),
        _ => Err(format!("Depth \"{}\" must be a number of bitplanes between 1 and 8", depth))
    }
}
