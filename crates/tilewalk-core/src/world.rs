//! Interfaces to the live world: map lookup, actor state, preferences and
//! the step actuator.

use crate::direction::Direction;
use crate::geom::Point;
use crate::tile::TileObject;
use crate::tiledata::TileData;

/// Read access to the loaded world map.
pub trait WorldMap {
    /// Append the objects on tile `p` into `buf`, bottom of the stack first.
    /// The caller clears `buf` before calling.
    ///
    /// Returns `false` if the tile is not loaded.
    fn objects_at(&self, p: Point, buf: &mut Vec<TileObject>) -> bool;

    /// Attribute table shared by every graphic on this map.
    fn tile_data(&self) -> &TileData;

    /// Index of the facet being walked. Facet 0 has stamina-based
    /// collision with other characters.
    fn map_index(&self) -> u8 {
        0
    }
}

/// Snapshot of the controlled actor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub position: Point,
    pub z: i8,
    /// Facing once every queued step has resolved.
    pub direction: Direction,
    /// Body graphic.
    pub graphic: u16,
    pub dead: bool,
    pub gargoyle: bool,
    pub flying: bool,
    pub mount_graphic: Option<u16>,
    pub paralyzed: bool,
    pub stamina: u16,
    pub stamina_max: u16,
    /// Step requests sent but not yet confirmed.
    pub steps_count: u8,
    /// Earliest tick at which another step may be requested.
    pub last_step_request_time: u64,
}

impl ActorState {
    /// A living, unmounted actor with full stamina.
    pub fn new(position: Point, z: i8) -> Self {
        Self {
            position,
            z,
            graphic: 0x0190,
            stamina: 100,
            stamina_max: 100,
            ..Self::default()
        }
    }

    /// Gargoyle flight.
    #[inline]
    pub fn is_flying(&self) -> bool {
        self.gargoyle && self.flying
    }
}

/// User settings that change how the actor collides.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Preferences {
    /// Walk through characters regardless of stamina.
    pub ignore_stamina_check: bool,
    /// Never treat characters as obstacles.
    pub ignore_characters: bool,
    /// Doors never block; the server opens them on contact.
    pub smooth_doors: bool,
}

/// The controlled actor, as seen by the auto-walk executor.
pub trait Walker {
    /// Current actor state, or `None` when no actor is in the world.
    fn actor(&self) -> Option<&ActorState>;

    /// Ask the world to move (or turn) one step. Returns `false` if the
    /// request was refused.
    fn request_step(&mut self, direction: Direction, run: bool) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_actor_is_able_bodied() {
        let a = ActorState::new(Point::new(3, 4), 7);
        assert_eq!(a.position, Point::new(3, 4));
        assert_eq!(a.z, 7);
        assert!(!a.dead);
        assert!(!a.paralyzed);
        assert_eq!(a.stamina, a.stamina_max);
        assert_eq!(a.mount_graphic, None);
    }

    #[test]
    fn flying_requires_gargoyle() {
        let mut a = ActorState::new(Point::ZERO, 0);
        a.flying = true;
        assert!(!a.is_flying());
        a.gargoyle = true;
        assert!(a.is_flying());
    }
}
