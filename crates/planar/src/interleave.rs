// Internal Dependencies ------------------------------------------------------
use crate::planes::{Plane, PlaneSet};


// Plane Layouts --------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// All planes of one image row are stored next to each other.
    Interleaved,
    /// Each plane is stored in full before the next one.
    NonInterleaved
}

impl Layout {
    pub fn is_interleaved(&self) -> bool {
        matches!(self, Layout::Interleaved)
    }
}


// Plane Interleaver ----------------------------------------------------------
/// Emits the `words_per_row` segment of every plane for row 0, then for
/// row 1 and so on.
pub fn interleave(planes: &[Plane], words_per_row: usize) -> Vec<u16> {
    let total = planes.iter().map(|p| p.len()).sum();
    let mut words = Vec::with_capacity(total);
    if words_per_row == 0 || planes.is_empty() {
        return words;
    }

    let rows = planes[0].len() / words_per_row;
    for row in 0..rows {
        let segment = row * words_per_row..(row + 1) * words_per_row;
        for plane in planes {
            words.extend_from_slice(&plane[segment.clone()]);
        }
    }
    words
}

pub fn arrange(set: &PlaneSet, layout: Layout) -> Vec<u16> {
    match layout {
        Layout::Interleaved => interleave(set.planes(), set.words_per_row()),
        Layout::NonInterleaved => set.planes().concat()
    }
}

/// Lays out the mask so it can be used together with image data of `depth`
/// planes.
///
/// Interleaved masks repeat each mask row once per image plane, block masks
/// are stored as a single plane.
pub fn arrange_mask(mask: &Plane, depth: usize, words_per_row: usize, layout: Layout) -> Vec<u16> {
    match layout {
        Layout::NonInterleaved => mask.clone(),
        Layout::Interleaved => {
            let mut words = Vec::with_capacity(mask.len() * depth);
            if words_per_row == 0 {
                return words;
            }
            for row in mask.chunks(words_per_row) {
                for _ in 0..depth {
                    words.extend_from_slice(row);
                }
            }
            words
        }
    }
}

/// Number of planes the mask occupies in a file for the given layout.
pub fn mask_depth(depth: usize, layout: Layout) -> usize {
    match layout {
        Layout::Interleaved => depth,
        Layout::NonInterleaved => 1
    }
}
