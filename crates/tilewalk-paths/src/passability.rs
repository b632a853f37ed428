//! Passability evaluation: turning a tile's object stack into movement
//! obstacles.
//!
//! Every land, static, item, multi and mobile object on a tile becomes a
//! [`PathObject`] carrying collision flags and three heights: base `z`,
//! `average_z` (where an actor standing on it ends up) and `height`.

use std::ops::{BitOr, BitOrAssign};

use tilewalk_core::{
    ActorState, ItemObject, LandTile, MobileObject, MultiObject, Point, Preferences, StaticData,
    TileObject, WorldMap,
};

use crate::tables::LegacyTables;

/// Height a standing character occupies.
pub const DEFAULT_CHARACTER_HEIGHT: i32 = 16;

/// Movement mode of the actor, which changes how objects are classified.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepState {
    Normal,
    /// Ghosts and game masters pass doors and light clutter.
    DeadOrGm,
    /// Riding a mount that walks on water instead of land.
    OnSeaMount,
    /// Gargoyle flight.
    Flying,
}

impl StepState {
    /// Movement mode for the actor's current condition.
    pub fn of(actor: &ActorState, tables: &LegacyTables) -> Self {
        if actor.dead || tables.is_gm_body(actor.graphic) {
            StepState::DeadOrGm
        } else if actor.is_flying() {
            StepState::Flying
        } else if actor.mount_graphic.is_some_and(|g| tables.is_sea_mount(g)) {
            StepState::OnSeaMount
        } else {
            StepState::Normal
        }
    }
}

// ---------------------------------------------------------------------------
// PathFlags
// ---------------------------------------------------------------------------

/// Collision flags of a [`PathObject`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct PathFlags(pub u32);

impl PathFlags {
    pub const NONE: Self = Self(0);
    /// Occupies its full height: either blocks or can be stood on.
    pub const IMPASSABLE_OR_SURFACE: Self = Self(1 << 0);
    pub const SURFACE: Self = Self(1 << 1);
    pub const BRIDGE: Self = Self(1 << 2);
    pub const NO_DIAGONAL: Self = Self(1 << 3);

    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether any bit of `other` is set.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl BitOr for PathFlags {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PathFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

// ---------------------------------------------------------------------------
// PathObject
// ---------------------------------------------------------------------------

/// One obstacle on a tile, as seen by the step validator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathObject {
    pub flags: PathFlags,
    pub z: i32,
    pub average_z: i32,
    pub height: i32,
    /// The world object this was derived from; `None` for synthetic ones.
    pub source: Option<TileObject>,
}

impl PathObject {
    /// Ordering key: bottom first, thinner first.
    #[inline]
    pub fn sort_key(&self) -> (i32, i32) {
        (self.z, self.height)
    }

    /// The land tile behind this object, if it is a sloped one.
    pub fn stretched_land(&self) -> Option<&LandTile> {
        match &self.source {
            Some(TileObject::Land(land)) if land.stretched => Some(land),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluator
// ---------------------------------------------------------------------------

/// Classifies tile contents for one actor in one world.
pub struct Evaluator<'a, M: ?Sized> {
    map: &'a M,
    actor: &'a ActorState,
    prefs: &'a Preferences,
    tables: &'a LegacyTables,
    tiles: Vec<TileObject>,
}

impl<'a, M: WorldMap + ?Sized> Evaluator<'a, M> {
    pub fn new(
        map: &'a M,
        actor: &'a ActorState,
        prefs: &'a Preferences,
        tables: &'a LegacyTables,
    ) -> Self {
        Self {
            map,
            actor,
            prefs,
            tables,
            tiles: Vec::with_capacity(16),
        }
    }

    /// Movement mode of the actor this evaluator was built for.
    pub fn step_state(&self) -> StepState {
        StepState::of(self.actor, self.tables)
    }

    /// Characters don't block when the actor may push through them.
    ///
    /// Pushing through needs full stamina on facet 0; anywhere else
    /// characters never block.
    fn ignores_characters(&self, state: StepState) -> bool {
        self.prefs.ignore_stamina_check
            || state == StepState::DeadOrGm
            || self.prefs.ignore_characters
            || !(self.actor.stamina < self.actor.stamina_max && self.map.map_index() == 0)
    }

    /// Append the obstacles on tile `p` to `out`.
    ///
    /// Returns `false` if the tile is not loaded or nothing on it takes
    /// part in collision.
    pub fn collect_obstacles(
        &mut self,
        p: Point,
        state: StepState,
        out: &mut Vec<PathObject>,
    ) -> bool {
        let mut tiles = std::mem::take(&mut self.tiles);
        tiles.clear();
        if !self.map.objects_at(p, &mut tiles) {
            self.tiles = tiles;
            return false;
        }

        let before = out.len();
        let ignore_characters = self.ignores_characters(state);

        for object in &tiles {
            match object {
                TileObject::Land(land) => {
                    if let Some(po) = self.classify_land(land, state) {
                        out.push(po);
                    }
                }
                TileObject::Effect { .. } => {}
                TileObject::Mobile(mobile) => {
                    if !ignore_characters && !mobile.dead && !mobile.ignores_characters {
                        out.push(mobile_obstacle(mobile));
                    }
                }
                TileObject::Item(item) => {
                    let drop = self.item_drops_flags(item, state);
                    let data = self.map.tile_data().static_data(item.data_graphic());
                    self.push_static(out, *object, item.graphic, item.z, data, drop, state);
                }
                TileObject::Multi(multi) => {
                    if multi.preview {
                        continue;
                    }
                    let data = self.map.tile_data().static_data(multi.graphic);
                    self.push_multi(out, *object, multi, data, state);
                }
                TileObject::Static { graphic, z } => {
                    let data = self.map.tile_data().static_data(*graphic);
                    self.push_static(out, *object, *graphic, *z, data, false, state);
                }
            }
        }

        self.tiles = tiles;
        out.len() > before
    }

    fn classify_land(&self, land: &LandTile, state: StepState) -> Option<PathObject> {
        if self.tables.is_land_placeholder(land.graphic) {
            return None;
        }
        let data = self.map.tile_data().land(land.graphic);
        let walkable =
            PathFlags::IMPASSABLE_OR_SURFACE | PathFlags::SURFACE | PathFlags::BRIDGE;
        let mut flags = PathFlags::IMPASSABLE_OR_SURFACE;

        if state == StepState::OnSeaMount {
            if data.is_wet() {
                flags = walkable;
            }
        } else {
            if !data.is_impassable() {
                flags = walkable;
            }
            if state == StepState::Flying && data.is_no_diagonal() {
                flags |= PathFlags::NO_DIAGONAL;
            }
        }

        let min_z = land.min_z();
        let average_z = land.average_z();
        Some(PathObject {
            flags,
            z: min_z,
            average_z,
            height: average_z - min_z,
            source: Some(TileObject::Land(*land)),
        })
    }

    /// Whether an item loses its blocking flag for this actor.
    fn item_drops_flags(&self, item: &ItemObject, state: StepState) -> bool {
        let td = self.map.tile_data();
        let own = td.static_data(item.graphic);
        if item.multi_graphic.is_some() || own.is_internal() {
            return false;
        }
        let is_gm = self.tables.is_gm_body(self.actor.graphic);
        let ghost_passes = own.is_door()
            || own.weight <= self.tables.ghost_light_weight
            || (is_gm && !item.locked);
        if state == StepState::DeadOrGm && ghost_passes {
            true
        } else if self.prefs.smooth_doors && own.is_door() {
            true
        } else {
            self.tables.is_item_drop(item.graphic)
        }
    }

    fn push_multi(
        &self,
        out: &mut Vec<PathObject>,
        source: TileObject,
        multi: &MultiObject,
        data: StaticData,
        state: StepState,
    ) {
        self.push_static(
            out,
            source,
            multi.graphic,
            multi.z,
            data,
            multi.ignore_in_render,
            state,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn push_static(
        &self,
        out: &mut Vec<PathObject>,
        source: TileObject,
        graphic: u16,
        z: i8,
        data: StaticData,
        mut drop: bool,
        state: StepState,
    ) {
        let mut flags = PathFlags::NONE;

        if state == StepState::OnSeaMount {
            if data.is_wet() {
                flags = PathFlags::SURFACE | PathFlags::BRIDGE;
            }
        } else {
            if data.is_impassable() || data.is_surface() {
                flags = PathFlags::IMPASSABLE_OR_SURFACE;
            }
            if !data.is_impassable() {
                if data.is_surface() {
                    flags |= PathFlags::SURFACE;
                }
                if data.is_bridge() {
                    flags |= PathFlags::BRIDGE;
                }
            }
            if state == StepState::DeadOrGm && self.tables.is_ghost_drop(graphic) {
                drop = true;
            }
            if drop {
                flags.remove(PathFlags::IMPASSABLE_OR_SURFACE);
            }
            if state == StepState::Flying && data.is_no_diagonal() {
                flags |= PathFlags::NO_DIAGONAL;
            }
        }

        if flags.is_empty() {
            return;
        }

        let z = z as i32;
        let height = data.height as i32;
        let stand = if data.is_bridge() { height / 2 } else { height };
        out.push(PathObject {
            flags,
            z,
            average_z: z + stand,
            height,
            source: Some(source),
        });
    }
}

fn mobile_obstacle(mobile: &MobileObject) -> PathObject {
    let z = mobile.z as i32;
    PathObject {
        flags: PathFlags::IMPASSABLE_OR_SURFACE,
        z,
        average_z: z + DEFAULT_CHARACTER_HEIGHT,
        height: DEFAULT_CHARACTER_HEIGHT,
        source: Some(TileObject::Mobile(*mobile)),
    }
}
