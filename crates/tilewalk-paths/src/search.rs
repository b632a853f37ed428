//! Best-first search over validated steps.
//!
//! The root sits in closed slot 0. Each round expands the current closed
//! node in all eight directions, stops as soon as a node within the goal
//! tolerance is opened, and otherwise closes the cheapest open node.

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, warn};
use tilewalk_core::{Direction, Point, WorldMap};

use crate::error::WalkError;
use crate::nodes::{NodeStore, PathNode};
use crate::step::StepValidator;

/// Parameters and progress of one search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchContext {
    pub start: Point,
    pub start_z: i32,
    pub goal: Point,
    /// Any tile within this Chebyshev distance of `goal` ends the search.
    pub distance: i32,
    /// Expanded-node limit.
    pub node_budget: usize,
    /// Whether the route should be run rather than walked.
    pub run: bool,
    goal_slot: Option<usize>,
}

impl SearchContext {
    /// A search from `(start, start_z)` to `goal`. Routes longer than
    /// `run_distance` are run.
    pub fn new(
        start: Point,
        start_z: i32,
        goal: Point,
        distance: i32,
        node_budget: usize,
        run_distance: i32,
    ) -> Self {
        Self {
            start,
            start_z,
            goal,
            distance,
            node_budget,
            run: start.distance(goal) > run_distance,
            goal_slot: None,
        }
    }

    #[inline]
    fn goal_cost(&self, p: Point) -> i32 {
        p.distance(self.goal)
    }

    /// Run the search, leaving the route in `nodes`. Returns the route
    /// length, start node included.
    ///
    /// The search keeps going while `walking` is set; clearing it from
    /// elsewhere aborts with [`WalkError::Cancelled`].
    pub fn find_path<M: WorldMap + ?Sized>(
        &mut self,
        nodes: &mut NodeStore,
        steps: &mut StepValidator<'_, M>,
        walking: &AtomicBool,
    ) -> Result<usize, WalkError> {
        let h = self.goal_cost(self.start);
        nodes.seed_root(PathNode {
            x: self.start.x,
            y: self.start.y,
            z: self.start_z,
            dist_from_goal_cost: h,
            cost: h,
            ..PathNode::default()
        });
        self.goal_slot = None;

        if h <= self.distance {
            debug!("already within {} of {}", self.distance, self.goal);
            return Ok(nodes.path_to_root());
        }

        let mut current = 0;
        while walking.load(Ordering::Acquire) {
            self.open_nodes(nodes, steps, current);

            if let Some(goal) = self.goal_slot {
                let len = nodes.build_path(goal);
                debug!(
                    "path {} -> {}: {} nodes, {} expanded",
                    self.start,
                    self.goal,
                    len,
                    nodes.active_closed()
                );
                return Ok(len);
            }

            let Some(cheapest) = nodes.cheapest_open() else {
                debug!("no path {} -> {}", self.start, self.goal);
                return Err(WalkError::NoPath);
            };
            let budget_exhausted = WalkError::NodeBudgetExhausted {
                budget: self.node_budget,
            };
            let Some(slot) = nodes.close(cheapest) else {
                warn!("closed pool full searching {} -> {}", self.start, self.goal);
                return Err(budget_exhausted);
            };
            if nodes.active_closed() >= self.node_budget {
                warn!(
                    "gave up on {} -> {} after {} nodes",
                    self.start, self.goal, self.node_budget
                );
                return Err(budget_exhausted);
            }
            current = slot;
        }

        debug!("search {} -> {} cancelled", self.start, self.goal);
        Err(WalkError::Cancelled)
    }

    /// Expand closed node `current` in every direction.
    fn open_nodes<M: WorldMap + ?Sized>(
        &mut self,
        nodes: &mut NodeStore,
        steps: &mut StepValidator<'_, M>,
        current: usize,
    ) {
        let node = nodes.closed_at(current);
        let from = node.position();

        for direction in Direction::ALL {
            let Some(step) = steps.can_walk(direction, from, node.z) else {
                continue;
            };
            // a diagonal resolved into a side move is reached by that
            // side's own expansion
            if step.direction != direction {
                continue;
            }
            let mut cost = 1;
            if direction.is_diagonal() {
                if step.position != direction.step(from) {
                    continue;
                }
                cost = 2;
            }
            self.add_node(nodes, direction, step.position, step.z, current, cost);
        }
    }

    /// Open (or relax) the node at `(p, z)` reached from closed `parent`.
    fn add_node(
        &mut self,
        nodes: &mut NodeStore,
        direction: Direction,
        p: Point,
        z: i32,
        parent: usize,
        cost: i32,
    ) -> Option<usize> {
        if nodes.is_closed(p.x, p.y, z) {
            return None;
        }
        let start_cost = nodes.closed_at(parent).dist_from_start_cost + cost;

        if let Some(slot) = nodes.find_open(p.x, p.y, z) {
            let node = nodes.open_mut(slot);
            if node.dist_from_start_cost > start_cost {
                node.parent = Some(parent);
                node.direction = direction;
                node.dist_from_start_cost = start_cost;
                node.cost = start_cost + node.dist_from_goal_cost;
            }
            return Some(slot);
        }

        let goal_cost = self.goal_cost(p);
        let slot = nodes.insert_open(PathNode {
            x: p.x,
            y: p.y,
            z,
            direction,
            used: true,
            dist_from_start_cost: start_cost,
            dist_from_goal_cost: goal_cost,
            cost: start_cost + goal_cost,
            parent: Some(parent),
        })?;
        if goal_cost <= self.distance {
            self.goal_slot = Some(slot);
        }
        Some(slot)
    }
}
