//! Plan and walk a route across a small synthetic world, then print it.
//!
//! The world has a wall to go around and a river crossed by a raised
//! deck with stairs at both ends.
//!
//! Run: RUST_LOG=debug cargo run --bin walk

use std::collections::HashMap;

use log::info;
use tilewalk_core::{
    ActorState, Direction, LandData, LandTile, Point, Range, StaticData, TileData, TileFlags,
    TileObject, TileStackMap, Walker,
};
use tilewalk_paths::{AutoWalkTick, Pathfinder, PathfinderConfig};

const WIDTH: i32 = 20;
const HEIGHT: i32 = 10;

const GRASS: u16 = 0x0003;
const WATER: u16 = 0x00A8;
const WALL: u16 = 0x0080;
const DECK: u16 = 0x0519;
const STAIRS: u16 = 0x0749;

const DECK_ROW: i32 = 5;
const RIVER: [i32; 2] = [11, 12];
const WALL_COLUMN: i32 = 5;

fn tile_data() -> TileData {
    let mut td = TileData::new();
    td.set_land(GRASS, LandData::new(TileFlags::NONE))
        .set_land(WATER, LandData::new(TileFlags::IMPASSABLE | TileFlags::WET))
        .set_static(WALL, StaticData::new(TileFlags::IMPASSABLE, 20))
        .set_static(DECK, StaticData::new(TileFlags::SURFACE, 0))
        .set_static(
            STAIRS,
            StaticData::new(TileFlags::SURFACE | TileFlags::BRIDGE, 20),
        );
    td
}

fn build_world() -> TileStackMap {
    let mut map = TileStackMap::flat(Range::new(0, 0, WIDTH, HEIGHT), GRASS, 0, tile_data());
    for y in 0..HEIGHT - 2 {
        map.push(Point::new(WALL_COLUMN, y), TileObject::Static { graphic: WALL, z: 0 });
    }
    for x in RIVER {
        for y in 0..HEIGHT {
            map.set_land(Point::new(x, y), LandTile::flat(WATER, 0));
        }
        map.push(Point::new(x, DECK_ROW), TileObject::Static { graphic: DECK, z: 10 });
    }
    for x in [RIVER[0] - 1, RIVER[1] + 1] {
        map.push(Point::new(x, DECK_ROW), TileObject::Static { graphic: STAIRS, z: 0 });
    }
    map
}

/// An actor that carries out every request on the spot.
struct SimWalker {
    actor: ActorState,
}

impl Walker for SimWalker {
    fn actor(&self) -> Option<&ActorState> {
        Some(&self.actor)
    }

    fn request_step(&mut self, direction: Direction, run: bool) -> bool {
        if self.actor.direction == direction {
            self.actor.position = direction.step(self.actor.position);
            info!(
                "{} to {}",
                if run { "run" } else { "walk" },
                self.actor.position
            );
        } else {
            self.actor.direction = direction;
            info!("turn {direction}");
        }
        true
    }
}

fn glyph(map: &TileStackMap, p: Point) -> char {
    let Some(stack) = map.stack(p) else {
        return ' ';
    };
    let mut c = '.';
    for object in stack {
        c = match object {
            TileObject::Land(land) if land.graphic == WATER => '~',
            TileObject::Static { graphic: WALL, .. } => '#',
            TileObject::Static { graphic: DECK, .. } => '=',
            TileObject::Static { graphic: STAIRS, .. } => '/',
            _ => c,
        };
    }
    c
}

fn main() {
    env_logger::init();

    let map = build_world();
    let start = Point::new(1, 1);
    let goal = Point::new(WIDTH - 2, 1);

    let mut walker = SimWalker {
        actor: ActorState::new(start, 0),
    };
    let mut pathfinder = Pathfinder::new(PathfinderConfig::default(), Default::default());

    let len = match pathfinder.walk_to(&map, &mut walker, 0, goal, 0, 0) {
        Ok(len) => len,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let route: HashMap<Point, i32> = pathfinder
        .path()
        .iter()
        .map(|n| (n.position(), n.z))
        .collect();
    println!("route of {len} nodes from {start} to {goal}");

    let mut tick = 1;
    loop {
        match pathfinder.process_auto_walk(&mut walker, tick) {
            AutoWalkTick::Stepped { .. } | AutoWalkTick::Throttled => tick += 1,
            AutoWalkTick::Finished => break,
            other => {
                eprintln!("walk ended early: {other:?}");
                std::process::exit(1);
            }
        }
    }
    println!("arrived at {} after {tick} ticks", walker.actor.position);

    for y in 0..HEIGHT {
        let row: String = (0..WIDTH)
            .map(|x| {
                let p = Point::new(x, y);
                match route.get(&p) {
                    _ if p == start => '@',
                    _ if p == goal => 'X',
                    Some(z) if *z > 0 => '^',
                    Some(_) => '*',
                    None => glyph(&map, p),
                }
            })
            .collect();
        println!("{row}");
    }
}
