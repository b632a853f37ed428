//! The auto-walk executor: plan a route with [`Pathfinder::walk_to`], then
//! call [`Pathfinder::process_auto_walk`] once per tick to feed it to the
//! actor one step at a time.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, trace};
use tilewalk_core::{Direction, Point, Preferences, Walker, WorldMap};

use crate::config::PathfinderConfig;
use crate::error::WalkError;
use crate::nodes::{NodeStore, PathNode};
use crate::passability::Evaluator;
use crate::search::SearchContext;
use crate::step::StepValidator;

/// What a call to [`Pathfinder::process_auto_walk`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AutoWalkTick {
    /// No walk in progress, or no actor.
    Idle,
    /// Waiting on the actor's step queue or step timer.
    Throttled,
    /// A step (or turn) toward the next node was requested.
    Stepped { direction: Direction, run: bool },
    /// The world refused the step; the walk is over.
    Rejected(Direction),
    /// The whole route has been requested; the walk is over.
    Finished,
}

/// Stops a walk from outside the owning [`Pathfinder`].
///
/// Clearing the walking flag also aborts a search in progress at its next
/// expansion round.
#[derive(Clone, Debug)]
pub struct StopHandle {
    walking: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.walking.store(false, Ordering::Release);
    }

    pub fn is_walking(&self) -> bool {
        self.walking.load(Ordering::Acquire)
    }
}

/// Pathfinding engine for one controlled actor.
///
/// Owns the node pools, which are allocated once and reused by every
/// walk.
#[derive(Debug)]
pub struct Pathfinder {
    config: PathfinderConfig,
    prefs: Preferences,
    nodes: NodeStore,
    walking: Arc<AtomicBool>,
    run: bool,
    cancellable: bool,
    point_index: usize,
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new(PathfinderConfig::default(), Preferences::default())
    }
}

impl Pathfinder {
    pub fn new(config: PathfinderConfig, prefs: Preferences) -> Self {
        let nodes = NodeStore::new(config.max_nodes);
        Self {
            config,
            prefs,
            nodes,
            walking: Arc::new(AtomicBool::new(false)),
            run: false,
            cancellable: false,
            point_index: 0,
        }
    }

    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Preferences apply from the next [`walk_to`](Self::walk_to).
    pub fn set_preferences(&mut self, prefs: Preferences) {
        self.prefs = prefs;
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            walking: Arc::clone(&self.walking),
        }
    }

    pub fn is_auto_walking(&self) -> bool {
        self.walking.load(Ordering::Acquire)
    }

    /// Whether the current route is run rather than walked.
    pub fn is_running(&self) -> bool {
        self.run
    }

    /// Whether the user may interrupt the current walk.
    pub fn is_cancellable(&self) -> bool {
        self.cancellable
    }

    /// The current route, start node first. Empty once the walk stops.
    pub fn path(&self) -> &[PathNode] {
        self.nodes.path()
    }

    /// Index of the next route node to walk to.
    pub fn path_index(&self) -> usize {
        self.point_index
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    /// Plan a route from the actor's position to within `distance` tiles
    /// of `target` and start walking it.
    ///
    /// `z` is the target's height; the route settles its own heights.
    /// On success the first step is requested right away and the route
    /// length (start node included) is returned.
    pub fn walk_to<M, W>(
        &mut self,
        map: &M,
        walker: &mut W,
        now: u64,
        target: Point,
        z: i32,
        distance: i32,
    ) -> Result<usize, WalkError>
    where
        M: WorldMap + ?Sized,
        W: Walker + ?Sized,
    {
        let Some(actor) = walker.actor().copied() else {
            debug!("walk to {target}: no actor");
            return Err(WalkError::ActorUnavailable);
        };
        if actor.paralyzed {
            debug!("walk to {target}: actor paralyzed");
            return Err(WalkError::Paralyzed);
        }

        self.nodes.reset();
        self.stop_auto_walk();
        self.cancellable = true;
        self.walking.store(true, Ordering::Release);

        debug!(
            "walk {} z={} -> {} z={} within {}",
            actor.position, actor.z, target, z, distance
        );
        let mut search = SearchContext::new(
            actor.position,
            actor.z as i32,
            target,
            distance,
            self.config.max_nodes,
            self.config.run_distance,
        );
        let result = {
            let evaluator = Evaluator::new(map, &actor, &self.prefs, &self.config.tables);
            let mut steps = StepValidator::new(evaluator);
            search.find_path(&mut self.nodes, &mut steps, &self.walking)
        };

        match result {
            Ok(len) => {
                self.run = search.run;
                self.point_index = 1;
                self.process_auto_walk(walker, now);
                Ok(len)
            }
            Err(err) => {
                self.walking.store(false, Ordering::Release);
                self.nodes.clear_path();
                Err(err)
            }
        }
    }

    /// Advance the walk by at most one step request.
    pub fn process_auto_walk<W: Walker + ?Sized>(
        &mut self,
        walker: &mut W,
        now: u64,
    ) -> AutoWalkTick {
        if !self.is_auto_walking() {
            return AutoWalkTick::Idle;
        }
        let Some(actor) = walker.actor() else {
            return AutoWalkTick::Idle;
        };
        if actor.steps_count >= self.config.max_step_count || actor.last_step_request_time > now {
            return AutoWalkTick::Throttled;
        }
        let facing = actor.direction;

        let Some(node) = self.nodes.path().get(self.point_index).copied() else {
            debug!("auto-walk finished at node {}", self.point_index);
            self.stop_auto_walk();
            return AutoWalkTick::Finished;
        };

        // A request in another direction only turns the actor, so the
        // node stays current until the actor faces it.
        if facing == node.direction {
            self.point_index += 1;
        }

        if !walker.request_step(node.direction, self.run) {
            debug!("step {} to {} refused", node.direction, node.position());
            self.stop_auto_walk();
            return AutoWalkTick::Rejected(node.direction);
        }
        trace!("step {} to {}", node.direction, node.position());
        AutoWalkTick::Stepped {
            direction: node.direction,
            run: self.run,
        }
    }

    /// End the current walk. Safe to call at any time.
    pub fn stop_auto_walk(&mut self) {
        self.walking.store(false, Ordering::Release);
        self.run = false;
        self.point_index = 0;
        self.nodes.clear_path();
    }
}
