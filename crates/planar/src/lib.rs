// Modules --------------------------------------------------------------------
pub mod copper;
pub mod error;
pub mod format;
pub mod info;
pub mod interleave;
pub mod palette;
pub mod pixels;
pub mod planes;
pub mod sprite;


// Internal Dependencies ------------------------------------------------------
pub use self::copper::CopperProgram;
pub use self::error::{ConversionError, ConversionWarning};
pub use self::format::level::LevelMap;
pub use self::format::sprites::SpriteSheet;
pub use self::format::tiles::{TileSheet, TileSheetOptions};
pub use self::info::FileInfo;
pub use self::interleave::Layout;
pub use self::palette::{Palette, Rgb};
pub use self::pixels::PixelBuffer;
pub use self::planes::PlaneSet;
