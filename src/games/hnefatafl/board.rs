//! Static board topology for 11×11 Hnefatafl.

use serde::{Deserialize, Serialize};

use crate::core::Side;

/// Board edge length.
pub const SIZE: u8 = 11;

/// Orthogonal step directions as (row, col) deltas.
pub const DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// A board coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The neighbouring square `steps` away in direction `dir`, if on the board.
    #[must_use]
    pub fn offset(self, dir: (i8, i8), steps: i8) -> Option<Square> {
        let row = self.row as i8 + dir.0 * steps;
        let col = self.col as i8 + dir.1 * steps;
        let range = 0..SIZE as i8;
        (range.contains(&row) && range.contains(&col)).then(|| Square::new(row as u8, col as u8))
    }

    /// Check if this is one of the four corner refuges.
    #[must_use]
    pub fn is_corner(self) -> bool {
        let edge = |v: u8| v == 0 || v == SIZE - 1;
        edge(self.row) && edge(self.col)
    }

    /// Check if this is the central throne.
    #[must_use]
    pub fn is_throne(self) -> bool {
        self == THRONE
    }

    /// Manhattan distance.
    #[must_use]
    pub fn distance(self, other: Square) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Manhattan distance to the nearest corner.
    #[must_use]
    pub fn corner_distance(self) -> u8 {
        CORNERS.iter().map(|&c| self.distance(c)).min().unwrap_or(0)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The central square. Only the king may stop here.
pub const THRONE: Square = Square::new(5, 5);

/// Escape squares. Only the king may enter them.
pub const CORNERS: [Square; 4] = [
    Square::new(0, 0),
    Square::new(0, SIZE - 1),
    Square::new(SIZE - 1, 0),
    Square::new(SIZE - 1, SIZE - 1),
];

/// A piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    Attacker,
    Defender,
    King,
}

impl Piece {
    /// Owning side: attackers are side A, defenders and king side B.
    #[must_use]
    pub const fn side(self) -> Side {
        match self {
            Piece::Attacker => Side::A,
            Piece::Defender | Piece::King => Side::B,
        }
    }
}

/// Attacker starting squares: a T on each edge midpoint.
#[rustfmt::skip]
pub const ATTACKER_START: [(u8, u8); 24] = [
    (0, 3), (0, 4), (0, 5), (0, 6), (0, 7), (1, 5),
    (10, 3), (10, 4), (10, 5), (10, 6), (10, 7), (9, 5),
    (3, 0), (4, 0), (5, 0), (6, 0), (7, 0), (5, 1),
    (3, 10), (4, 10), (5, 10), (6, 10), (7, 10), (5, 9),
];

/// Defender starting squares: a diamond around the throne.
#[rustfmt::skip]
pub const DEFENDER_START: [(u8, u8); 12] = [
    (3, 5), (4, 4), (4, 5), (4, 6),
    (5, 3), (5, 4), (5, 6), (5, 7),
    (6, 4), (6, 5), (6, 6), (7, 5),
];
