// STD Dependencies -----------------------------------------------------------
use std::path::PathBuf;
use std::process;


// External Dependencies ------------------------------------------------------
use clap::ArgMatches;
use log::LevelFilter;
use file_io::Logger;
use planar::{Layout, TileSheetOptions};
use project::{convert, ConvertError, ProjectConfig, ProjectReader, TilesOptions};


// Modules --------------------------------------------------------------------
mod cli;


// CLI Interface --------------------------------------------------------------
fn main() {
    let matches = cli::app().get_matches();
    init_logging(matches.occurrences_of("verbose"));

    let mut logger = Logger::new();

    // Support Silent Flag for all Commands
    if matches.is_present("silent") {
        logger.set_silent();
    }

    let mut reader = match ProjectReader::from_current_dir() {
        Ok(reader) => reader,
        Err(err) => {
            logger.error(err.to_string());
            process::exit(1);
        }
    };

    let result = match matches.subcommand() {
        Some(("tiles", matches)) => convert::convert_tiles(
            &mut logger,
            &mut reader,
            &path(matches, "IMAGE_FILE"),
            &path(matches, "OUTPUT_FILE"),
            &TilesOptions {
                sheet: TileSheetOptions {
                    tile_size: matches.value_of("TILE_SIZE").and_then(cli::parse_tile_size).unwrap_or((16, 16)),
                    layout: layout(matches),
                    palette24: matches.is_present("PALETTE_24"),
                    mask: matches.is_present("MASK")
                },
                depth: depth(matches),
                c_source: matches.is_present("C_SOURCE"),
                mask_preview: matches.value_of("MASK_PREVIEW").map(PathBuf::from)
            }
        ),

        Some(("sprites", matches)) => convert::convert_sprites(
            &mut logger,
            &mut reader,
            &path(matches, "IMAGE_FILE"),
            &path(matches, "OUTPUT_FILE"),
            matches.is_present("C_SOURCE")
        ),

        Some(("level", matches)) => convert::convert_level(
            &mut logger,
            &mut reader,
            &path(matches, "MAP_FILE"),
            &path(matches, "OUTPUT_FILE")
        ),

        Some(("tiled", matches)) => convert::convert_tileset(
            &mut logger,
            &mut reader,
            &path(matches, "TILESET_FILE"),
            &path(matches, "OUTPUT_FILE"),
            &TilesOptions {
                sheet: TileSheetOptions {
                    layout: layout(matches),
                    palette24: matches.is_present("PALETTE_24"),
                    ..TileSheetOptions::default()
                },
                depth: depth(matches),
                c_source: false,
                mask_preview: None
            }
        ),

        Some(("copper", matches)) => convert::convert_copper(
            &mut logger,
            &mut reader,
            &path(matches, "COPPER_FILE"),
            &path(matches, "OUTPUT_FILE")
        ),

        Some(("info", matches)) => convert::file_info(&reader, &path(matches, "ASSET_FILE")).map(|info| {
            logger.report(info.to_string());
        }),

        Some(("build", _)) => build(&mut logger, &mut reader),

        _ => {
            cli::app().print_help().ok();
            Ok(())
        }
    };

    match result {
        Ok(()) => logger.flush(),
        Err(err) => {
            logger.error(err.to_string());
            process::exit(1);
        }
    }
}

fn build(logger: &mut Logger, reader: &mut ProjectReader) -> Result<(), ConvertError> {
    let config = ProjectConfig::try_load(logger, &*reader)?;
    let count = config.build(logger, reader)?;
    logger.status("Finished", format!("{} asset(s)", count));
    Ok(())
}


// Helpers --------------------------------------------------------------------
fn init_logging(verbosity: u64) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbosity {
        0 => {},
        1 => {
            builder.filter_level(LevelFilter::Debug);
        },
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.format_timestamp(None).init();
}

fn path(matches: &ArgMatches, name: &str) -> PathBuf {
    PathBuf::from(matches.value_of(name).unwrap_or_default())
}

fn depth(matches: &ArgMatches) -> Option<u8> {
    matches.value_of("DEPTH").and_then(|d| d.parse().ok())
}

fn layout(matches: &ArgMatches) -> Layout {
    if matches.is_present("NON_INTERLEAVED") {
        Layout::NonInterleaved

    } else {
        Layout::Interleaved
    }
}
