//! Static board topology for the Royal Game of Ur.
//!
//! Each side walks its own 14-square path. The two paths share the eight
//! middle-row cells (path indices 4–11) and are private elsewhere.
//!
//! ```text
//!  A:  3  2  1  0  .  . 13 12
//!     4  5  6  7  8  9 10 11     <- shared lane
//!  B:  3  2  1  0  .  . 13 12
//! ```

use crate::core::Side;

/// Pieces per side.
pub const PIECES: usize = 7;

/// A piece that has not entered the board.
pub const START: i8 = -1;

/// A piece that has borne off. Reached only with an exact throw.
pub const SCORED: i8 = 14;

/// Path indices of the rosettes (safe, grant an extra turn).
pub const ROSETTES: [i8; 3] = [3, 7, 13];

/// First and last path index of the shared middle lane.
pub const SHARED_FIRST: i8 = 4;
pub const SHARED_LAST: i8 = 11;

/// Board cell ids for each side's path, indexed by path position.
const PATHS: [[u8; SCORED as usize]; 2] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13],
    [20, 21, 22, 23, 4, 5, 6, 7, 8, 9, 10, 11, 24, 25],
];

/// Check if a path index is a rosette.
#[must_use]
pub fn is_rosette(pos: i8) -> bool {
    ROSETTES.contains(&pos)
}

/// Check if a path index lies in the lane both sides share.
#[must_use]
pub fn is_shared(pos: i8) -> bool {
    (SHARED_FIRST..=SHARED_LAST).contains(&pos)
}

/// Physical cell a side's piece occupies, or `None` when off the board.
#[must_use]
pub fn cell(side: Side, pos: i8) -> Option<u8> {
    if (0..SCORED).contains(&pos) {
        Some(PATHS[side.index()][pos as usize])
    } else {
        None
    }
}
