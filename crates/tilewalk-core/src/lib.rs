//! **tilewalk-core**: data types for a stacked isometric tile world.
//!
//! This crate provides what the pathfinding engine and its collaborators
//! share: geometry, walking directions, the tile attribute table, the
//! objects that stack on a tile, and the traits through which the engine
//! reads the world and moves the actor.

pub mod direction;
pub mod geom;
pub mod memory;
pub mod tile;
pub mod tiledata;
pub mod world;

pub use direction::Direction;
pub use geom::{Point, Range};
pub use memory::TileStackMap;
pub use tile::{ItemObject, LandTile, MobileObject, MultiObject, TileObject};
pub use tiledata::{LandData, StaticData, TileData, TileFlags};
pub use world::{ActorState, Preferences, Walker, WorldMap};
