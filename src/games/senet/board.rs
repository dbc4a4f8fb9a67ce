//! Static board topology for Senet.
//!
//! Thirty squares in three rows of ten, walked boustrophedon:
//!
//! ```text
//!   0  1  2  3  4  5  6  7  8  9
//!  19 18 17 16 15 14 13 12 11 10
//!  20 21 22 23 24 25 26 27 28 29
//! ```
//!
//! A piece leaves the board by moving exactly one step past square 29.

/// Squares on the path.
pub const SQUARES: usize = 30;

/// Pieces per side.
pub const PIECES: usize = 5;

/// Virtual target of a bearing-off move.
pub const EXIT: u8 = SQUARES as u8;

/// House of Rebirth: safe, and where drowned pieces return.
pub const REBIRTH: u8 = 14;

/// House of Beauty: safe, must be landed on before going further.
pub const BEAUTY: u8 = 25;

/// House of Water: a piece landing here is sent back to rebirth.
pub const WATER: u8 = 26;

/// House of Three Truths: leaves only with a throw of 3.
pub const THREE_TRUTHS: u8 = 27;

/// House of Re-Atoum: leaves only with a throw of 2.
pub const RE_ATOUM: u8 = 28;

/// House of Horus, the last square.
pub const HORUS: u8 = 29;

/// Special squares, for presentation layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Special {
    Rebirth,
    Beauty,
    Water,
    ThreeTruths,
    ReAtoum,
    Horus,
}

/// The special meaning of a square, if any.
#[must_use]
pub fn special(square: u8) -> Option<Special> {
    match square {
        REBIRTH => Some(Special::Rebirth),
        BEAUTY => Some(Special::Beauty),
        WATER => Some(Special::Water),
        THREE_TRUTHS => Some(Special::ThreeTruths),
        RE_ATOUM => Some(Special::ReAtoum),
        HORUS => Some(Special::Horus),
        _ => None,
    }
}

/// Squares where a piece cannot be displaced.
#[must_use]
pub fn is_safe(square: u8) -> bool {
    matches!(square, REBIRTH | BEAUTY)
}

/// The only throw that lets a piece leave `square`, if restricted.
#[must_use]
pub fn required_throw(square: u8) -> Option<u8> {
    match square {
        THREE_TRUTHS => Some(3),
        RE_ATOUM => Some(2),
        _ => None,
    }
}

/// Row and column of a square on the physical board.
#[must_use]
pub fn grid_position(square: u8) -> (u8, u8) {
    let row = square / 10;
    let col = square % 10;
    if row == 1 {
        (row, 9 - col)
    } else {
        (row, col)
    }
}
