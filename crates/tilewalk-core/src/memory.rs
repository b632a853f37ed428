//! An in-memory [`WorldMap`] backed by one object stack per tile.

use crate::geom::{Point, Range};
use crate::tile::{LandTile, TileObject};
use crate::tiledata::TileData;
use crate::world::WorldMap;

/// A rectangular world held entirely in memory.
///
/// Tiles outside the bounds report as not loaded. Useful for synthetic
/// worlds in tests and tools.
#[derive(Clone, Debug)]
pub struct TileStackMap {
    bounds: Range,
    width: usize,
    stacks: Vec<Vec<TileObject>>,
    tile_data: TileData,
    map_index: u8,
}

impl TileStackMap {
    /// Create a map whose tiles hold nothing at all.
    pub fn new(bounds: Range, tile_data: TileData) -> Self {
        Self {
            bounds,
            width: bounds.width().max(0) as usize,
            stacks: vec![Vec::new(); bounds.len()],
            tile_data,
            map_index: 0,
        }
    }

    /// Create a map covered by flat land of `graphic` at height `z`.
    pub fn flat(bounds: Range, graphic: u16, z: i8, tile_data: TileData) -> Self {
        let mut map = Self::new(bounds, tile_data);
        for stack in &mut map.stacks {
            stack.push(TileObject::Land(LandTile::flat(graphic, z)));
        }
        map
    }

    /// The loaded rectangle.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    pub fn tile_data(&self) -> &TileData {
        &self.tile_data
    }

    pub fn tile_data_mut(&mut self) -> &mut TileData {
        &mut self.tile_data
    }

    pub fn set_map_index(&mut self, index: u8) {
        self.map_index = index;
    }

    /// Objects on `p`, bottom first, or `None` if out of bounds.
    pub fn stack(&self, p: Point) -> Option<&[TileObject]> {
        self.idx(p).map(|i| self.stacks[i].as_slice())
    }

    /// Remove everything from `p`, land included.
    pub fn clear(&mut self, p: Point) {
        if let Some(i) = self.idx(p) {
            self.stacks[i].clear();
        }
    }

    /// Replace the land layer of `p` (or add one at the bottom).
    pub fn set_land(&mut self, p: Point, land: LandTile) {
        let Some(i) = self.idx(p) else {
            return;
        };
        let stack = &mut self.stacks[i];
        match stack.iter_mut().find(|o| matches!(o, TileObject::Land(_))) {
            Some(slot) => *slot = TileObject::Land(land),
            None => stack.insert(0, TileObject::Land(land)),
        }
    }

    /// Put `object` on top of the stack at `p`. Does nothing if out of
    /// bounds.
    pub fn push(&mut self, p: Point, object: TileObject) {
        if let Some(i) = self.idx(p) {
            self.stacks[i].push(object);
        }
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let x = (p.x - self.bounds.min.x) as usize;
        let y = (p.y - self.bounds.min.y) as usize;
        Some(y * self.width + x)
    }
}

impl WorldMap for TileStackMap {
    fn objects_at(&self, p: Point, buf: &mut Vec<TileObject>) -> bool {
        match self.stack(p) {
            Some(stack) => {
                buf.extend_from_slice(stack);
                true
            }
            None => false,
        }
    }

    fn tile_data(&self) -> &TileData {
        &self.tile_data
    }

    fn map_index(&self) -> u8 {
        self.map_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::MobileObject;

    #[test]
    fn flat_map_has_land_everywhere() {
        let map = TileStackMap::flat(Range::new(0, 0, 4, 3), 3, 5, TileData::new());
        for y in 0..3 {
            for x in 0..4 {
                let stack = map.stack(Point::new(x, y)).unwrap();
                assert_eq!(stack, &[TileObject::Land(LandTile::flat(3, 5))]);
            }
        }
        assert!(map.stack(Point::new(4, 0)).is_none());
    }

    #[test]
    fn out_of_bounds_is_not_loaded() {
        let map = TileStackMap::flat(Range::new(0, 0, 2, 2), 3, 0, TileData::new());
        let mut buf = Vec::new();
        assert!(!map.objects_at(Point::new(2, 0), &mut buf));
        assert!(!map.objects_at(Point::new(-1, 1), &mut buf));
        assert!(buf.is_empty());
        assert!(map.objects_at(Point::new(1, 1), &mut buf));
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn set_land_replaces_in_place() {
        let mut map = TileStackMap::flat(Range::new(0, 0, 2, 2), 3, 0, TileData::new());
        let p = Point::new(1, 0);
        map.push(p, TileObject::Mobile(MobileObject::default()));
        map.set_land(p, LandTile::flat(4, 10));
        let stack = map.stack(p).unwrap();
        assert_eq!(stack.len(), 2);
        assert_eq!(stack[0], TileObject::Land(LandTile::flat(4, 10)));
    }

    #[test]
    fn set_land_on_cleared_tile_goes_to_bottom() {
        let mut map = TileStackMap::new(Range::new(0, 0, 1, 1), TileData::new());
        let p = Point::ZERO;
        map.push(p, TileObject::Static { graphic: 9, z: 0 });
        map.set_land(p, LandTile::flat(3, 0));
        assert!(matches!(map.stack(p).unwrap()[0], TileObject::Land(_)));
        map.clear(p);
        assert!(map.stack(p).unwrap().is_empty());
    }

    #[test]
    fn offset_bounds_index_correctly() {
        let mut map = TileStackMap::new(Range::new(100, 200, 103, 202), TileData::new());
        map.push(Point::new(102, 201), TileObject::Effect { z: 1 });
        assert_eq!(map.stack(Point::new(102, 201)).unwrap().len(), 1);
        assert!(map.stack(Point::new(100, 200)).unwrap().is_empty());
    }
}
