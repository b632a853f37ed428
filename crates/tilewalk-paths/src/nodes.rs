//! Fixed-capacity node pools for the search.
//!
//! Nodes live in two arrays, *open* and *closed*, allocated once and
//! reused by every search. A slot is free when its `used` flag is clear.
//! Parent links are closed-pool indices, so a finished route is read back
//! by walking from the goal (in the open pool) through the closed pool.

use tilewalk_core::{Direction, Point};

/// A search node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Direction of the move that reached this node.
    pub direction: Direction,
    pub used: bool,
    pub dist_from_start_cost: i32,
    pub dist_from_goal_cost: i32,
    /// `dist_from_start_cost + dist_from_goal_cost`.
    pub cost: i32,
    /// Closed-pool slot of the node this one was reached from.
    pub parent: Option<usize>,
}

impl PathNode {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    fn is_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.used && self.x == x && self.y == y && self.z == z
    }
}

/// Open and closed node pools plus the reconstructed route.
#[derive(Debug, Clone)]
pub struct NodeStore {
    open: Vec<PathNode>,
    closed: Vec<PathNode>,
    path: Vec<PathNode>,
    // Slots at or past these indices are untouched since the last reset.
    open_high: usize,
    closed_high: usize,
    active_open: usize,
    active_closed: usize,
}

impl NodeStore {
    /// Pools holding `capacity` nodes each.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            open: vec![PathNode::default(); capacity],
            closed: vec![PathNode::default(); capacity],
            path: Vec::with_capacity(capacity),
            open_high: 0,
            closed_high: 0,
            active_open: 0,
            active_closed: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.open.len()
    }

    /// Free every slot and forget the route.
    pub fn reset(&mut self) {
        for node in self.open.iter_mut().chain(self.closed.iter_mut()) {
            node.used = false;
        }
        self.path.clear();
        self.open_high = 0;
        self.closed_high = 0;
        self.active_open = 0;
        self.active_closed = 0;
    }

    /// Number of used slots in `(open, closed)`, counted slot by slot.
    pub fn used_slots(&self) -> (usize, usize) {
        let count = |pool: &[PathNode]| pool.iter().filter(|n| n.used).count();
        (count(&self.open), count(&self.closed))
    }

    /// Nodes currently waiting in the open pool.
    pub fn active_open(&self) -> usize {
        self.active_open
    }

    /// Nodes expanded so far, the root excluded.
    pub fn active_closed(&self) -> usize {
        self.active_closed
    }

    pub fn open_node(&self, slot: usize) -> Option<&PathNode> {
        self.open.get(slot).filter(|n| n.used)
    }

    pub fn closed_node(&self, slot: usize) -> Option<&PathNode> {
        self.closed.get(slot).filter(|n| n.used)
    }

    /// The last reconstructed route, start node first.
    pub fn path(&self) -> &[PathNode] {
        &self.path
    }

    pub(crate) fn clear_path(&mut self) {
        self.path.clear();
    }

    /// Place the search root in closed slot 0.
    pub(crate) fn seed_root(&mut self, root: PathNode) {
        self.closed[0] = PathNode { used: true, ..root };
        self.closed_high = self.closed_high.max(1);
    }

    pub(crate) fn closed_at(&self, slot: usize) -> PathNode {
        self.closed[slot]
    }

    pub(crate) fn open_mut(&mut self, slot: usize) -> &mut PathNode {
        &mut self.open[slot]
    }

    pub(crate) fn find_open(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        self.open[..self.open_high].iter().position(|n| n.is_at(x, y, z))
    }

    pub(crate) fn is_closed(&self, x: i32, y: i32, z: i32) -> bool {
        self.closed[..self.closed_high].iter().any(|n| n.is_at(x, y, z))
    }

    /// Put `node` in the first free open slot. `None` when the pool is
    /// full.
    pub(crate) fn insert_open(&mut self, node: PathNode) -> Option<usize> {
        let slot = free_slot(&self.open, &mut self.open_high)?;
        self.open[slot] = PathNode { used: true, ..node };
        self.active_open += 1;
        Some(slot)
    }

    /// Open slot with the lowest total cost; the lowest index wins ties.
    pub(crate) fn cheapest_open(&self) -> Option<usize> {
        let mut best = None;
        let mut best_cost = i32::MAX;
        for (i, node) in self.open[..self.open_high].iter().enumerate() {
            if node.used && node.cost < best_cost {
                best_cost = node.cost;
                best = Some(i);
            }
        }
        best
    }

    /// Move the node in open `slot` to the first free closed slot and
    /// return that slot. `None` when the closed pool is full.
    pub(crate) fn close(&mut self, slot: usize) -> Option<usize> {
        let node = self.open[slot];
        self.open[slot].used = false;
        self.active_open -= 1;
        let target = free_slot(&self.closed, &mut self.closed_high)?;
        self.closed[target] = node;
        self.active_closed += 1;
        Some(target)
    }

    /// Rebuild the route ending at open `goal_slot` and return its length.
    pub(crate) fn build_path(&mut self, goal_slot: usize) -> usize {
        self.path.clear();
        let goal = self.open[goal_slot];
        self.path.push(goal);
        let mut parent = goal.parent;
        while let Some(slot) = parent {
            let node = self.closed[slot];
            self.path.push(node);
            parent = node.parent;
        }
        self.path.reverse();
        self.path.len()
    }

    /// Make the route a single node: the search root.
    pub(crate) fn path_to_root(&mut self) -> usize {
        self.path.clear();
        self.path.push(self.closed[0]);
        1
    }
}

fn free_slot(pool: &[PathNode], high: &mut usize) -> Option<usize> {
    if let Some(slot) = pool[..*high].iter().position(|n| !n.used) {
        return Some(slot);
    }
    if *high < pool.len() {
        *high += 1;
        return Some(*high - 1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: i32, y: i32, cost: i32) -> PathNode {
        PathNode {
            x,
            y,
            cost,
            ..PathNode::default()
        }
    }

    #[test]
    fn insert_and_find() {
        let mut s = NodeStore::new(4);
        let a = s.insert_open(node(1, 2, 5)).unwrap();
        let b = s.insert_open(node(3, 4, 5)).unwrap();
        assert_eq!((a, b), (0, 1));
        assert_eq!(s.find_open(3, 4, 0), Some(1));
        assert_eq!(s.find_open(3, 4, 1), None);
        assert_eq!(s.active_open(), 2);
        assert_eq!(s.used_slots(), (2, 0));
    }

    #[test]
    fn open_pool_fills_up() {
        let mut s = NodeStore::new(2);
        assert!(s.insert_open(node(0, 0, 1)).is_some());
        assert!(s.insert_open(node(1, 0, 1)).is_some());
        assert_eq!(s.insert_open(node(2, 0, 1)), None);
        assert_eq!(s.active_open(), 2);
    }

    #[test]
    fn cheapest_prefers_lowest_slot_on_ties() {
        let mut s = NodeStore::new(8);
        s.insert_open(node(0, 0, 7));
        s.insert_open(node(1, 0, 3));
        s.insert_open(node(2, 0, 3));
        s.insert_open(node(3, 0, 4));
        assert_eq!(s.cheapest_open(), Some(1));
    }

    #[test]
    fn closing_frees_the_open_slot() {
        let mut s = NodeStore::new(4);
        s.seed_root(node(0, 0, 9));
        let slot = s.insert_open(node(5, 5, 1)).unwrap();
        let closed = s.close(slot).unwrap();
        assert_eq!(closed, 1);
        assert!(s.is_closed(5, 5, 0));
        assert_eq!(s.find_open(5, 5, 0), None);
        assert_eq!(s.active_open(), 0);
        assert_eq!(s.active_closed(), 1);
        // freed slot is reused
        assert_eq!(s.insert_open(node(6, 6, 1)), Some(slot));
    }

    #[test]
    fn closed_pool_fills_up() {
        let mut s = NodeStore::new(2);
        s.seed_root(node(0, 0, 0));
        let a = s.insert_open(node(1, 0, 1)).unwrap();
        assert_eq!(s.close(a), Some(1));
        let b = s.insert_open(node(2, 0, 1)).unwrap();
        assert_eq!(s.close(b), None);
    }

    #[test]
    fn path_follows_parents() {
        let mut s = NodeStore::new(8);
        s.seed_root(node(0, 0, 0));
        let a = s.insert_open(PathNode {
            parent: Some(0),
            direction: Direction::East,
            ..node(1, 0, 0)
        });
        let a = s.close(a.unwrap()).unwrap();
        let goal = s
            .insert_open(PathNode {
                parent: Some(a),
                direction: Direction::South,
                ..node(1, 1, 0)
            })
            .unwrap();
        assert_eq!(s.build_path(goal), 3);
        let points: Vec<_> = s.path().iter().map(|n| n.position()).collect();
        assert_eq!(points, vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)]);
        assert_eq!(s.path()[2].direction, Direction::South);
    }

    #[test]
    fn reset_frees_everything() {
        let mut s = NodeStore::new(4);
        s.seed_root(node(0, 0, 0));
        s.insert_open(node(1, 0, 1));
        s.insert_open(node(2, 0, 1));
        s.path_to_root();
        s.reset();
        assert_eq!(s.used_slots(), (0, 0));
        assert_eq!((s.active_open(), s.active_closed()), (0, 0));
        assert!(s.path().is_empty());
        assert_eq!(s.cheapest_open(), None);
        assert!(!s.is_closed(0, 0, 0));
    }
}
