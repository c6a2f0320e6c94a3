// STD Dependencies -----------------------------------------------------------
use std::fmt::Write;


// Internal Dependencies ------------------------------------------------------
use crate::interleave::{arrange, Layout};
use crate::planes::PlaneSet;
use super::sprites::SpriteSheet;


// Statics --------------------------------------------------------------------
const DATA_INDENT: usize = 4;


// Plane Data -----------------------------------------------------------------
/// Renders the plane words as a C array with one image row of a single plane
/// per line.
pub fn planes_to_c(planes: &PlaneSet, layout: Layout) -> String {
    let words = arrange(planes, layout);
    let mut out = String::from("UINT16 data[] = {\n");
    for row in words.chunks(planes.words_per_row().max(1)) {
        out.push_str(&" ".repeat(DATA_INDENT));
        out.push_str(&hex_words(row));
        out.push_str(",\n");
    }
    out.push_str("\n};\n");
    out
}


// Sprite Data ----------------------------------------------------------------
pub fn sprites_to_c(sheet: &SpriteSheet) -> String {
    let mut out = String::from("UWORD palette[] = {\n");
    out.push_str("  ");
    out.push_str(&hex_words(&sheet.palette().to_rgb12()));
    out.push_str("\n};\n\n");

    for (index, sprite) in sheet.sprites().iter().enumerate() {
        // Writing into a String can't fail
        let _ = writeln!(out, "UWORD __chip sprdata{}[] = {{", index);
        let _ = writeln!(out, "  0x{:04x}, 0x{:04x},", sprite.height(), sprite.control_word());
        for (lo, hi) in &sprite.rows {
            let _ = writeln!(out, "  0x{:04x}, 0x{:04x},", lo, hi);
        }
        out.push_str("  0x0000, 0x0000\n");
        out.push_str("};\n\n");
    }
    out
}

fn hex_words(words: &[u16]) -> String {
    words.iter().map(|w| format!("0x{:04x}", w)).collect::<Vec<String>>().join(", ")
}
