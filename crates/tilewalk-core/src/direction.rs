//! The eight walking directions.
//!
//! Indices run clockwise from North. Odd indices are diagonals; the opposite
//! of a direction is `index ^ 4`.

use std::fmt;

use crate::geom::Point;

/// One of the eight compass directions an actor can step or face.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    #[default]
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

/// Tile offsets, indexed by [`Direction::index`].
const OFFSETS: [Point; 8] = [
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
];

impl Direction {
    /// All directions in index order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Direction for an index; only the low three bits are used.
    #[inline]
    pub const fn from_index(index: u8) -> Self {
        Self::ALL[(index & 7) as usize]
    }

    /// Index in `0..8`.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Whether this is one of the four diagonal directions.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.index() % 2 != 0
    }

    /// The direction pointing the other way.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() ^ 4)
    }

    /// Rotate clockwise by `steps` (negative rotates counter-clockwise).
    #[inline]
    pub const fn rotate(self, steps: i8) -> Self {
        Self::from_index((self.index() as i16 + steps as i16).rem_euclid(8) as u8)
    }

    /// Tile delta for one step in this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        OFFSETS[self.index() as usize]
    }

    /// The tile reached by stepping once from `p`.
    #[inline]
    pub fn step(self, p: Point) -> Point {
        p + self.offset()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::NorthEast => "north-east",
            Direction::East => "east",
            Direction::SouthEast => "south-east",
            Direction::South => "south",
            Direction::SouthWest => "south-west",
            Direction::West => "west",
            Direction::NorthWest => "north-west",
        };
        f.write_str(name)
    }
}
