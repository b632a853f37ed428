//! Bounded-node pathfinding and auto-walk for an actor in a stacked tile
//! world.
//!
//! The engine is layered bottom-up:
//!
//! - [`Evaluator`] turns a tile's object stack into [`PathObject`]
//!   obstacles for the actor's current [`StepState`].
//! - [`StepValidator`] decides whether a single step is possible and at
//!   what height the actor lands.
//! - [`SearchContext::find_path`] runs a best-first search over valid
//!   steps, keeping nodes in a fixed-capacity [`NodeStore`].
//! - [`Pathfinder`] ties it together: [`Pathfinder::walk_to`] plans a
//!   route and [`Pathfinder::process_auto_walk`] replays it one step per
//!   tick through a [`Walker`](tilewalk_core::Walker).
//!
//! ```no_run
//! use tilewalk_core::{ActorState, Direction, Point, Range, TileData, TileStackMap, Walker};
//! use tilewalk_paths::Pathfinder;
//!
//! struct Actor(ActorState);
//!
//! impl Walker for Actor {
//!     fn actor(&self) -> Option<&ActorState> {
//!         Some(&self.0)
//!     }
//!     fn request_step(&mut self, direction: Direction, _run: bool) -> bool {
//!         if self.0.direction == direction {
//!             self.0.position = direction.step(self.0.position);
//!         } else {
//!             self.0.direction = direction;
//!         }
//!         true
//!     }
//! }
//!
//! let map = TileStackMap::flat(Range::new(0, 0, 16, 16), 3, 0, TileData::new());
//! let mut actor = Actor(ActorState::new(Point::new(1, 1), 0));
//! let mut pathfinder = Pathfinder::default();
//! if pathfinder.walk_to(&map, &mut actor, 0, Point::new(10, 7), 0, 0).is_ok() {
//!     while pathfinder.is_auto_walking() {
//!         pathfinder.process_auto_walk(&mut actor, 0);
//!     }
//! }
//! ```

pub mod autowalk;
pub mod config;
pub mod error;
pub mod nodes;
pub mod passability;
pub mod search;
pub mod step;
pub mod tables;

#[cfg(test)]
mod testing;

pub use autowalk::{AutoWalkTick, Pathfinder, StopHandle};
pub use config::{DEFAULT_MAX_NODES, PathfinderConfig};
pub use error::WalkError;
pub use nodes::{NodeStore, PathNode};
pub use passability::{DEFAULT_CHARACTER_HEIGHT, Evaluator, PathFlags, PathObject, StepState};
pub use search::SearchContext;
pub use step::{DEFAULT_BLOCK_HEIGHT, Step, StepValidator};
pub use tables::{GraphicRange, LegacyTables};
