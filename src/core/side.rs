//! Side identification and per-side data storage.
//!
//! ## Side
//!
//! Every game in this crate is strictly two-player. `Side::A` is the side the
//! original boards label "player 1" (light pieces, attackers in Hnefatafl),
//! `Side::B` is "player 2".
//!
//! ## SideMap
//!
//! Fixed two-slot storage indexed by `Side`, so per-side counters never need
//! bounds checks or hash lookups.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Both sides, in turn order.
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Slot index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "Side A"),
            Side::B => write!(f, "Side B"),
        }
    }
}

/// Per-side data storage with O(1) access.
///
/// ```
/// use ancient_games::core::{Side, SideMap};
///
/// let mut pieces: SideMap<u8> = SideMap::with_value(9);
/// pieces[Side::B] -= 1;
/// assert_eq!(pieces[Side::A], 9);
/// assert_eq!(pieces[Side::B], 8);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create a map from explicit per-side values.
    pub const fn from_pair(a: T, b: T) -> Self {
        Self { data: [a, b] }
    }

    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::A), factory(Side::B)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over (Side, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_basics() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other(), Side::A);
        assert_eq!(Side::A.index(), 0);
        assert_eq!(Side::B.index(), 1);
        assert_eq!(format!("{}", Side::B), "Side B");
    }

    #[test]
    fn test_side_map_new() {
        let map: SideMap<usize> = SideMap::new(|s| s.index() * 10);

        assert_eq!(map[Side::A], 0);
        assert_eq!(map[Side::B], 10);
    }

    #[test]
    fn test_side_map_mutation() {
        let mut map: SideMap<i32> = SideMap::with_value(0);

        map[Side::A] = 10;
        map[Side::B] = 20;

        assert_eq!(map[Side::A], 10);
        assert_eq!(map[Side::B], 20);
    }

    #[test]
    fn test_side_map_iter() {
        let map = SideMap::from_pair(1, 2);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Side::A, &1), (Side::B, &2)]);
    }

    #[test]
    fn test_side_map_serialization() {
        let map = SideMap::from_pair(7u8, 3u8);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SideMap<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
