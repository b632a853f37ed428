//! Synthetic worlds and a scripted actor for unit tests.

use tilewalk_core::{
    ActorState, Direction, LandData, Point, Range, StaticData, TileData, TileFlags, TileObject,
    TileStackMap, Walker,
};

pub const GRASS: u16 = 0x0003;
pub const ROCK: u16 = 0x0220;
pub const WATER: u16 = 0x00A8;

pub const WALL: u16 = 0x0080;
pub const FLOOR: u16 = 0x0519;
pub const STAIRS: u16 = 0x0749;
pub const RAMP: u16 = 0x0789;
pub const DOOR: u16 = 0x0675;
pub const CRATE: u16 = 0x0E3D;
pub const PILLAR: u16 = 0x0196;
pub const RAFT: u16 = 0x3E65;

pub fn tile_data() -> TileData {
    let mut td = TileData::new();
    td.set_land(GRASS, LandData::new(TileFlags::NONE))
        .set_land(ROCK, LandData::new(TileFlags::IMPASSABLE))
        .set_land(WATER, LandData::new(TileFlags::IMPASSABLE | TileFlags::WET))
        .set_static(WALL, StaticData::new(TileFlags::IMPASSABLE, 20))
        .set_static(FLOOR, StaticData::new(TileFlags::SURFACE, 0))
        .set_static(
            STAIRS,
            StaticData::new(TileFlags::SURFACE | TileFlags::BRIDGE, 20),
        )
        .set_static(
            RAMP,
            StaticData::new(TileFlags::SURFACE | TileFlags::BRIDGE, 10),
        )
        .set_static(
            DOOR,
            StaticData::new(TileFlags::IMPASSABLE | TileFlags::DOOR, 20),
        )
        .set_static(
            CRATE,
            StaticData::new(TileFlags::IMPASSABLE, 10).with_weight(0x20),
        )
        .set_static(
            PILLAR,
            StaticData::new(TileFlags::IMPASSABLE | TileFlags::NO_DIAGONAL, 20),
        )
        .set_static(RAFT, StaticData::new(TileFlags::WET | TileFlags::SURFACE, 0));
    td
}

/// Flat grass covering `0..w` by `0..h`.
pub fn open_map(w: i32, h: i32) -> TileStackMap {
    TileStackMap::flat(Range::new(0, 0, w, h), GRASS, 0, tile_data())
}

/// Parse a grid of `.` (grass) and `#` (wall) rows into a map.
pub fn grid_map(rows: &[&str]) -> TileStackMap {
    let h = rows.len() as i32;
    let w = rows.first().map_or(0, |r| r.len()) as i32;
    let mut map = open_map(w, h);
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if c == '#' {
                let p = Point::new(x as i32, y as i32);
                map.push(p, TileObject::Static { graphic: WALL, z: 0 });
            }
        }
    }
    map
}

pub fn actor_at(x: i32, y: i32) -> ActorState {
    ActorState::new(Point::new(x, y), 0)
}

/// An actor too tired to push through other characters.
pub fn tired_actor_at(x: i32, y: i32) -> ActorState {
    ActorState {
        stamina: 50,
        ..actor_at(x, y)
    }
}

/// A [`Walker`] that records requests and plays them out instantly.
///
/// A request facing away from the actor only turns it; a request in the
/// facing direction moves it one tile.
#[derive(Debug, Clone)]
pub struct ScriptedWalker {
    pub actor: Option<ActorState>,
    pub accept: bool,
    pub requests: Vec<(Direction, bool)>,
}

impl ScriptedWalker {
    pub fn new(actor: ActorState) -> Self {
        Self {
            actor: Some(actor),
            accept: true,
            requests: Vec::new(),
        }
    }

    pub fn position(&self) -> Option<Point> {
        self.actor.map(|a| a.position)
    }
}

impl Walker for ScriptedWalker {
    fn actor(&self) -> Option<&ActorState> {
        self.actor.as_ref()
    }

    fn request_step(&mut self, direction: Direction, run: bool) -> bool {
        self.requests.push((direction, run));
        if !self.accept {
            return false;
        }
        if let Some(actor) = self.actor.as_mut() {
            if actor.direction == direction {
                actor.position = direction.step(actor.position);
            } else {
                actor.direction = direction;
            }
        }
        true
    }
}
