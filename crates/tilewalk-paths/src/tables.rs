//! Legacy graphic-id tables that special-case collision.
//!
//! These ids come from the classic game content and have no derivable
//! rule behind them; they are kept as data so they can be inspected,
//! overridden from configuration, and tested on their own.

use std::ops::RangeInclusive;

/// Inclusive range of graphic ids.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphicRange {
    pub first: u16,
    pub last: u16,
}

impl GraphicRange {
    pub const fn new(first: u16, last: u16) -> Self {
        Self { first, last }
    }

    pub const fn single(graphic: u16) -> Self {
        Self::new(graphic, graphic)
    }

    #[inline]
    pub const fn contains(self, graphic: u16) -> bool {
        graphic >= self.first && graphic <= self.last
    }
}

impl From<RangeInclusive<u16>> for GraphicRange {
    fn from(r: RangeInclusive<u16>) -> Self {
        Self::new(*r.start(), *r.end())
    }
}

fn any_contains(ranges: &[GraphicRange], graphic: u16) -> bool {
    ranges.iter().any(|r| r.contains(graphic))
}

/// Special-case graphic tables consulted by the passability evaluator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LegacyTables {
    /// Land graphics that mark "no tile here" rather than real ground.
    pub land_placeholders: Vec<GraphicRange>,
    /// Item graphics that never block, whoever walks.
    pub item_drop_ranges: Vec<GraphicRange>,
    /// Graphics that stop blocking for ghosts and game masters.
    pub ghost_drop_ranges: Vec<GraphicRange>,
    /// Ghosts and game masters pass items at or below this weight.
    pub ghost_light_weight: u8,
    /// Body graphic of a game master.
    pub gm_body_graphic: u16,
    /// Mount that walks on water instead of land.
    pub sea_mount_graphic: u16,
}

impl Default for LegacyTables {
    fn default() -> Self {
        Self {
            land_placeholders: vec![
                GraphicRange::single(0x0002),
                GraphicRange::new(0x01AE, 0x01B5),
                GraphicRange::single(0x01DB),
            ],
            item_drop_ranges: vec![GraphicRange::new(0x3946, 0x3964), GraphicRange::single(0x0082)],
            ghost_drop_ranges: vec![
                GraphicRange::single(0x0692),
                GraphicRange::new(0x06F5, 0x06F6),
                GraphicRange::single(0x0846),
                GraphicRange::single(0x0873),
            ],
            ghost_light_weight: 0x5A,
            gm_body_graphic: 0x03DB,
            sea_mount_graphic: 0x3EB3,
        }
    }
}

impl LegacyTables {
    #[inline]
    pub fn is_land_placeholder(&self, graphic: u16) -> bool {
        any_contains(&self.land_placeholders, graphic)
    }

    #[inline]
    pub fn is_item_drop(&self, graphic: u16) -> bool {
        any_contains(&self.item_drop_ranges, graphic)
    }

    #[inline]
    pub fn is_ghost_drop(&self, graphic: u16) -> bool {
        any_contains(&self.ghost_drop_ranges, graphic)
    }

    #[inline]
    pub fn is_gm_body(&self, graphic: u16) -> bool {
        graphic == self.gm_body_graphic
    }

    #[inline]
    pub fn is_sea_mount(&self, graphic: u16) -> bool {
        graphic == self.sea_mount_graphic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn land_placeholders() {
        let t = LegacyTables::default();
        for g in [0x0002, 0x01AE, 0x01B0, 0x01B5, 0x01DB] {
            assert!(t.is_land_placeholder(g), "{g:#06x}");
        }
        for g in [0x0001, 0x0003, 0x01AD, 0x01B6, 0x01DA, 0x01DC] {
            assert!(!t.is_land_placeholder(g), "{g:#06x}");
        }
    }

    #[test]
    fn item_drop_ranges() {
        let t = LegacyTables::default();
        assert!(t.is_item_drop(0x3946));
        assert!(t.is_item_drop(0x3950));
        assert!(t.is_item_drop(0x3964));
        assert!(t.is_item_drop(0x0082));
        assert!(!t.is_item_drop(0x3945));
        assert!(!t.is_item_drop(0x3965));
        assert!(!t.is_item_drop(0x0083));
    }

    #[test]
    fn ghost_drop_ranges() {
        let t = LegacyTables::default();
        for g in [0x0692, 0x06F5, 0x06F6, 0x0846, 0x0873] {
            assert!(t.is_ghost_drop(g), "{g:#06x}");
        }
        for g in [0x0691, 0x06F4, 0x06F7, 0x0845, 0x0847, 0x0872, 0x0874] {
            assert!(!t.is_ghost_drop(g), "{g:#06x}");
        }
    }

    #[test]
    fn bodies_and_mounts() {
        let t = LegacyTables::default();
        assert!(t.is_gm_body(0x03DB));
        assert!(!t.is_gm_body(0x0190));
        assert!(t.is_sea_mount(0x3EB3));
        assert!(!t.is_sea_mount(0x3EA2));
    }

    #[test]
    fn graphic_range_from_inclusive() {
        let r: GraphicRange = (0x10..=0x20).into();
        assert!(r.contains(0x10));
        assert!(r.contains(0x20));
        assert!(!r.contains(0x21));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let t: LegacyTables = serde_json::from_str(r#"{"sea_mount_graphic": 16000}"#).unwrap();
        assert_eq!(t.sea_mount_graphic, 16000);
        assert_eq!(t.gm_body_graphic, 0x03DB);
        assert!(t.is_item_drop(0x0082));
    }
}
