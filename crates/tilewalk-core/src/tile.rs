//! Objects that occupy a tile: the land layer and everything stacked on it.

use crate::direction::Direction;

// ---------------------------------------------------------------------------
// LandTile
// ---------------------------------------------------------------------------

/// The land layer of a tile.
///
/// A land tile is drawn between four corner heights: its own `z` at the
/// north corner and the base heights of the east (x+1, y), south
/// (x+1, y+1) and west (x, y+1) neighbours. A *stretched* tile is rendered
/// as a slope across those corners; a flat tile ignores them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LandTile {
    pub graphic: u16,
    pub z: i8,
    pub east_z: i8,
    pub south_z: i8,
    pub west_z: i8,
    pub stretched: bool,
}

impl LandTile {
    /// A flat land tile at height `z`.
    pub const fn flat(graphic: u16, z: i8) -> Self {
        Self {
            graphic,
            z,
            east_z: z,
            south_z: z,
            west_z: z,
            stretched: false,
        }
    }

    /// A sloped land tile with explicit corner heights.
    pub const fn sloped(graphic: u16, z: i8, east_z: i8, south_z: i8, west_z: i8) -> Self {
        Self {
            graphic,
            z,
            east_z,
            south_z,
            west_z,
            stretched: true,
        }
    }

    /// Lowest point of the tile.
    pub fn min_z(&self) -> i32 {
        if !self.stretched {
            return self.z as i32;
        }
        (self.z as i32)
            .min(self.east_z as i32)
            .min(self.south_z as i32)
            .min(self.west_z as i32)
    }

    /// Stand height: the mean of whichever diagonal is flatter.
    pub fn average_z(&self) -> i32 {
        if !self.stretched {
            return self.z as i32;
        }
        let (z, east, south, west) = (
            self.z as i32,
            self.east_z as i32,
            self.south_z as i32,
            self.west_z as i32,
        );
        if (z - south).abs() <= (east - west).abs() {
            (z + south) >> 1
        } else {
            (east + west) >> 1
        }
    }

    /// Height of corner `corner` (0 = north, then clockwise).
    pub fn corner_z(&self, corner: u8) -> i32 {
        match corner & 3 {
            1 => self.east_z as i32,
            2 => self.south_z as i32,
            3 => self.west_z as i32,
            _ => self.z as i32,
        }
    }

    /// Elevation of the tile edge an actor walking in `direction` enters
    /// from.
    ///
    /// Diagonal moves enter over a single corner; orthogonal moves cross
    /// an edge and take the mean of its two corners.
    pub fn current_average_z(&self, direction: Direction) -> i32 {
        let d = direction.index();
        let result = self.corner_z(((d >> 1) + 1) & 3);
        if d & 1 != 0 {
            return result;
        }
        (result + self.corner_z(d >> 1)) >> 1
    }
}

// ---------------------------------------------------------------------------
// Stacked objects
// ---------------------------------------------------------------------------

/// A dynamic item lying on (or built into) a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemObject {
    pub graphic: u16,
    pub z: i8,
    /// Component graphic when the item is a placed multi (house, boat).
    pub multi_graphic: Option<u16>,
    pub locked: bool,
}

impl ItemObject {
    pub const fn new(graphic: u16, z: i8) -> Self {
        Self {
            graphic,
            z,
            multi_graphic: None,
            locked: false,
        }
    }

    /// Graphic used for attribute lookups.
    #[inline]
    pub fn data_graphic(&self) -> u16 {
        self.multi_graphic.unwrap_or(self.graphic)
    }
}

/// One component of a multi (house, boat) rendered on this tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MultiObject {
    pub graphic: u16,
    pub z: i8,
    /// Placement preview that does not exist in the world yet.
    pub preview: bool,
    /// Component hidden from rendering; it keeps its surface but no longer
    /// blocks.
    pub ignore_in_render: bool,
}

/// A character standing on the tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MobileObject {
    pub z: i8,
    pub dead: bool,
    /// The mobile itself is allowed to walk through characters.
    pub ignores_characters: bool,
}

/// Everything that can occupy a tile, in the order the map stacks it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileObject {
    Land(LandTile),
    Static { graphic: u16, z: i8 },
    Item(ItemObject),
    Multi(MultiObject),
    Mobile(MobileObject),
    /// Visual effects never take part in collision.
    Effect { z: i8 },
}

impl TileObject {
    /// Base height of the object.
    pub fn z(&self) -> i8 {
        match self {
            TileObject::Land(land) => land.z,
            TileObject::Static { z, .. } | TileObject::Effect { z } => *z,
            TileObject::Item(item) => item.z,
            TileObject::Multi(multi) => multi.z,
            TileObject::Mobile(mobile) => mobile.z,
        }
    }
}
