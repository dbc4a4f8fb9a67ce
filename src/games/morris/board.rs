//! Static topology of the Nine Men's Morris board.
//!
//! ```text
//!  0 ----------- 1 ----------- 2
//!  |             |             |
//!  |    8 ------ 9 ------ 10   |
//!  |    |        |        |    |
//!  |    |   16 - 17 - 18  |    |
//!  |    |   |         |   |    |
//!  7 -- 15 -23        19- 11 - 3
//!  |    |   |         |   |    |
//!  |    |   22 - 21 - 20  |    |
//!  |    |        |        |    |
//!  |   14 ----- 13 ------ 12   |
//!  |             |             |
//!  6 ----------- 5 ----------- 4
//! ```

/// Number of points on the board.
pub const POINTS: usize = 24;

/// Pieces each side places.
pub const PIECES: u8 = 9;

/// On-board count at which a side starts flying.
pub const FLYING_AT: u8 = 3;

/// Neighbours of each point.
pub const ADJACENT: [&[u8]; POINTS] = [
    &[1, 7],
    &[0, 2, 9],
    &[1, 3],
    &[2, 4, 11],
    &[3, 5],
    &[4, 6, 13],
    &[5, 7],
    &[0, 6, 15],
    &[9, 15],
    &[1, 8, 10, 17],
    &[9, 11],
    &[3, 10, 12, 19],
    &[11, 13],
    &[5, 12, 14, 21],
    &[13, 15],
    &[7, 8, 14, 23],
    &[17, 23],
    &[9, 16, 18],
    &[17, 19],
    &[11, 18, 20],
    &[19, 21],
    &[13, 20, 22],
    &[21, 23],
    &[15, 16, 22],
];

/// The sixteen mill lines.
#[rustfmt::skip]
pub const MILLS: [[u8; 3]; 16] = [
    [0, 1, 2], [2, 3, 4], [4, 5, 6], [6, 7, 0],
    [8, 9, 10], [10, 11, 12], [12, 13, 14], [14, 15, 8],
    [16, 17, 18], [18, 19, 20], [20, 21, 22], [22, 23, 16],
    [1, 9, 17], [3, 11, 19], [5, 13, 21], [7, 15, 23],
];

/// Midpoints of the middle and inner squares, where lines cross.
pub const CROSS_POINTS: [u8; 8] = [9, 11, 13, 15, 17, 19, 21, 23];

/// Mill lines through `point`.
pub fn mills_through(point: u8) -> impl Iterator<Item = &'static [u8; 3]> {
    MILLS.iter().filter(move |line| line.contains(&point))
}
