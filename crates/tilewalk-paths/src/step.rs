//! Single-step validation: can the actor move one tile, and at what height
//! does it land?

use tilewalk_core::{Direction, Point, WorldMap};

use crate::passability::{Evaluator, PathFlags, PathObject, StepState};

/// Vertical room an actor needs above the surface it stands on.
pub const DEFAULT_BLOCK_HEIGHT: i32 = 16;

/// Flying actors snap onto a no-diagonal object within this many units.
const FLIGHT_SNAP_RANGE: i32 = 25;

/// Lowest representable height; doubles as "no result".
const FLOOR_Z: i32 = -128;

/// Synthetic ceiling appended above every stack.
const CEILING_Z: i32 = 128;

const CEILING: PathObject = PathObject {
    flags: PathFlags::IMPASSABLE_OR_SURFACE,
    z: CEILING_Z,
    average_z: CEILING_Z,
    height: CEILING_Z,
    source: None,
};

/// A validated step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// The direction actually taken. A blocked diagonal may be resolved
    /// into one of its neighbouring directions.
    pub direction: Direction,
    pub position: Point,
    pub z: i32,
}

/// Answers step queries for one actor, reusing its scratch buffers.
pub struct StepValidator<'a, M: ?Sized> {
    evaluator: Evaluator<'a, M>,
    state: StepState,
    behind: Vec<PathObject>,
    ahead: Vec<PathObject>,
}

impl<'a, M: WorldMap + ?Sized> StepValidator<'a, M> {
    pub fn new(evaluator: Evaluator<'a, M>) -> Self {
        let state = evaluator.step_state();
        Self {
            evaluator,
            state,
            behind: Vec::with_capacity(16),
            ahead: Vec::with_capacity(16),
        }
    }

    /// Movement mode used for every query.
    pub fn step_state(&self) -> StepState {
        self.state
    }

    /// Height band `(min_z, max_z)` the actor can step into when entering
    /// `dest` in `direction` from height `current_z`.
    ///
    /// The band is derived from the tile the actor leaves. When that tile
    /// holds nothing the band is returned without headroom.
    pub fn departure_band(&mut self, dest: Point, current_z: i32, direction: Direction) -> (i32, i32) {
        let mut min_z = FLOOR_Z;
        let mut max_z = current_z;

        let mut list = std::mem::take(&mut self.behind);
        list.clear();
        let from = direction.opposite().step(dest);
        if !self.evaluator.collect_obstacles(from, self.state, &mut list) {
            self.behind = list;
            return (min_z, max_z);
        }

        for obj in &list {
            let average_z = obj.average_z;
            match obj.stretched_land() {
                Some(land) if average_z <= current_z => {
                    let edge_z = land.current_average_z(direction);
                    min_z = min_z.max(edge_z);
                    max_z = max_z.max(edge_z);
                }
                _ => {
                    if obj.flags.contains(PathFlags::IMPASSABLE_OR_SURFACE)
                        && average_z <= current_z
                        && min_z < average_z
                    {
                        min_z = average_z;
                    }
                    if obj.flags.contains(PathFlags::BRIDGE) && current_z == average_z {
                        max_z = max_z.max(obj.z + obj.height);
                        min_z = min_z.min(obj.z);
                    }
                }
            }
        }

        self.behind = list;
        (min_z, max_z + 2)
    }

    /// Landing height on `dest` when arriving from height `z` in
    /// `direction`, or `None` if the tile can't be entered.
    pub fn calculate_new_z(&mut self, dest: Point, z: i32, direction: Direction) -> Option<i32> {
        let (mut min_z, max_z) = self.departure_band(dest, z, direction);

        let mut list = std::mem::take(&mut self.ahead);
        list.clear();
        if !self.evaluator.collect_obstacles(dest, self.state, &mut list) {
            self.ahead = list;
            return None;
        }
        list.sort_by_key(PathObject::sort_key);
        list.push(CEILING);

        let z = z.max(min_z);
        let mut result_z = FLOOR_Z;
        let mut best_delta = 1_000_000;
        let mut current_z = FLOOR_Z;

        for i in 0..list.len() {
            let obj = list[i];

            if obj.flags.contains(PathFlags::NO_DIAGONAL)
                && self.state == StepState::Flying
                && (obj.average_z - z).abs() <= FLIGHT_SNAP_RANGE
            {
                result_z = if obj.average_z != FLOOR_Z {
                    obj.average_z
                } else {
                    current_z
                };
                break;
            }

            if !obj.flags.contains(PathFlags::IMPASSABLE_OR_SURFACE) {
                continue;
            }

            // Enough room below this object: look for somewhere to stand.
            if obj.z - min_z >= DEFAULT_BLOCK_HEIGHT {
                for below in list[..i].iter().rev() {
                    if !below.flags.intersects(PathFlags::SURFACE | PathFlags::BRIDGE) {
                        continue;
                    }
                    let stand_z = below.average_z;
                    let standable = (stand_z <= max_z && below.flags.contains(PathFlags::SURFACE))
                        || (below.flags.contains(PathFlags::BRIDGE) && below.z <= max_z);
                    if stand_z >= current_z && obj.z - stand_z >= DEFAULT_BLOCK_HEIGHT && standable {
                        let delta = (z - stand_z).abs();
                        if delta < best_delta {
                            best_delta = delta;
                            result_z = stand_z;
                        }
                    }
                }
            }

            min_z = min_z.max(obj.average_z);
            current_z = current_z.max(obj.average_z);
        }

        self.ahead = list;
        (result_z != FLOOR_Z).then_some(result_z)
    }

    /// Try to step from `(from, z)` in `direction`.
    ///
    /// A diagonal step also needs both orthogonal neighbours to be
    /// enterable. If it fails, the neighbouring directions (clockwise
    /// first) are tried instead and the first that works is returned.
    pub fn can_walk(&mut self, direction: Direction, from: Point, z: i32) -> Option<Step> {
        let mut step = Step {
            direction,
            position: direction.step(from),
            z: 0,
        };
        let mut new_z = self.calculate_new_z(step.position, z, direction);

        if direction.is_diagonal() {
            if new_z.is_some() {
                for turn in [1, -1] {
                    let side = direction.rotate(turn);
                    if self.calculate_new_z(side.step(from), z, side).is_none() {
                        new_z = None;
                        break;
                    }
                }
            }

            if new_z.is_none() {
                for turn in [1, -1] {
                    let side = direction.rotate(turn);
                    let position = side.step(from);
                    if let Some(side_z) = self.calculate_new_z(position, z, side) {
                        step.direction = side;
                        step.position = position;
                        new_z = Some(side_z);
                        break;
                    }
                }
            }
        }

        new_z.map(|z| Step { z, ..step })
    }
}
