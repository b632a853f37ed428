//! Shared tile attributes: [`TileFlags`], [`LandData`], [`StaticData`] and the
//! [`TileData`] table that maps graphic ids to them.

use std::ops::{BitAnd, BitOr, BitOrAssign};

// ---------------------------------------------------------------------------
// TileFlags
// ---------------------------------------------------------------------------

/// Bitmask of static tile attributes relevant to movement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileFlags(pub u32);

impl TileFlags {
    pub const NONE: Self = Self(0);
    pub const IMPASSABLE: Self = Self(1 << 0);
    pub const SURFACE: Self = Self(1 << 1);
    /// Stairs and ramps: stand height is half the structural height.
    pub const BRIDGE: Self = Self(1 << 2);
    pub const NO_DIAGONAL: Self = Self(1 << 3);
    pub const WET: Self = Self(1 << 4);
    pub const DOOR: Self = Self(1 << 5);
    pub const INTERNAL: Self = Self(1 << 6);

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TileFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TileFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for TileFlags {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Per-graphic records
// ---------------------------------------------------------------------------

/// Attributes of a land graphic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LandData {
    pub flags: TileFlags,
}

impl LandData {
    pub const fn new(flags: TileFlags) -> Self {
        Self { flags }
    }

    #[inline]
    pub const fn is_impassable(self) -> bool {
        self.flags.contains(TileFlags::IMPASSABLE)
    }

    #[inline]
    pub const fn is_wet(self) -> bool {
        self.flags.contains(TileFlags::WET)
    }

    #[inline]
    pub const fn is_no_diagonal(self) -> bool {
        self.flags.contains(TileFlags::NO_DIAGONAL)
    }
}

/// Attributes of a static or dynamic item graphic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticData {
    pub flags: TileFlags,
    pub height: u8,
    pub weight: u8,
}

impl StaticData {
    pub const fn new(flags: TileFlags, height: u8) -> Self {
        Self {
            flags,
            height,
            weight: u8::MAX,
        }
    }

    /// Same record with a different weight.
    pub const fn with_weight(self, weight: u8) -> Self {
        Self { weight, ..self }
    }

    #[inline]
    pub const fn is_impassable(self) -> bool {
        self.flags.contains(TileFlags::IMPASSABLE)
    }

    #[inline]
    pub const fn is_surface(self) -> bool {
        self.flags.contains(TileFlags::SURFACE)
    }

    #[inline]
    pub const fn is_bridge(self) -> bool {
        self.flags.contains(TileFlags::BRIDGE)
    }

    #[inline]
    pub const fn is_no_diagonal(self) -> bool {
        self.flags.contains(TileFlags::NO_DIAGONAL)
    }

    #[inline]
    pub const fn is_wet(self) -> bool {
        self.flags.contains(TileFlags::WET)
    }

    #[inline]
    pub const fn is_door(self) -> bool {
        self.flags.contains(TileFlags::DOOR)
    }

    #[inline]
    pub const fn is_internal(self) -> bool {
        self.flags.contains(TileFlags::INTERNAL)
    }
}

// ---------------------------------------------------------------------------
// TileData
// ---------------------------------------------------------------------------

/// Attribute table for every land and static graphic.
///
/// Lookups of ids that were never registered return the empty default
/// record, so unknown graphics neither block nor support.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileData {
    land: Vec<LandData>,
    statics: Vec<StaticData>,
}

impl TileData {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes of land graphic `graphic`.
    #[inline]
    pub fn land(&self, graphic: u16) -> LandData {
        self.land.get(graphic as usize).copied().unwrap_or_default()
    }

    /// Attributes of static graphic `graphic`.
    #[inline]
    pub fn static_data(&self, graphic: u16) -> StaticData {
        self.statics.get(graphic as usize).copied().unwrap_or_default()
    }

    /// Register land attributes, growing the table as needed.
    pub fn set_land(&mut self, graphic: u16, data: LandData) -> &mut Self {
        let idx = graphic as usize;
        if self.land.len() <= idx {
            self.land.resize(idx + 1, LandData::default());
        }
        self.land[idx] = data;
        self
    }

    /// Register static attributes, growing the table as needed.
    pub fn set_static(&mut self, graphic: u16, data: StaticData) -> &mut Self {
        let idx = graphic as usize;
        if self.statics.len() <= idx {
            self.statics.resize(idx + 1, StaticData::default());
        }
        self.statics[idx] = data;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_combine_and_contain() {
        let f = TileFlags::SURFACE | TileFlags::BRIDGE;
        assert!(f.contains(TileFlags::SURFACE));
        assert!(f.contains(TileFlags::BRIDGE));
        assert!(!f.contains(TileFlags::IMPASSABLE));
        assert!(!f.contains(TileFlags::SURFACE | TileFlags::WET));
        assert!((f & TileFlags::WET).is_empty());
    }

    #[test]
    fn unknown_graphics_default_to_empty() {
        let td = TileData::new();
        assert_eq!(td.land(0x1234), LandData::default());
        assert_eq!(td.static_data(0xFFFF), StaticData::default());
    }

    #[test]
    fn set_grows_table() {
        let mut td = TileData::new();
        td.set_static(0x0500, StaticData::new(TileFlags::IMPASSABLE, 20))
            .set_land(0x00A8, LandData::new(TileFlags::WET | TileFlags::IMPASSABLE));
        assert!(td.static_data(0x0500).is_impassable());
        assert_eq!(td.static_data(0x0500).height, 20);
        assert_eq!(td.static_data(0x04FF), StaticData::default());
        assert!(td.land(0x00A8).is_wet());
        assert!(td.land(0x00A8).is_impassable());
    }

    #[test]
    fn new_static_is_heavy_by_default() {
        let data = StaticData::new(TileFlags::SURFACE, 5);
        assert_eq!(data.weight, u8::MAX);
        assert_eq!(data.with_weight(10).weight, 10);
        assert_eq!(data.with_weight(10).height, 5);
    }
}
