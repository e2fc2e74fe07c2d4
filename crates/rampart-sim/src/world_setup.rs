//! Entity spawn factories for setting up the combat world.
//!
//! Creates towers, grunts and pickups with the right component bundles.
//! The player and boss are owned by the engine, not the world.

use glam::Vec2;
use hecs::World;

use rampart_ai::profiles::grunt_profile;
use rampart_ai::targeting::TargetSelector;
use rampart_core::components::{Enemy, Pickup, Unit};
use rampart_core::constants::TOWER_MUZZLE_HEIGHT;
use rampart_core::enums::{GruntKind, PickupKind, TowerKind};
use rampart_core::types::ArenaGeometry;

use crate::stage::StageLayout;
use crate::systems::towers::Tower;

/// Place the stage's towers. Grunts come later from the wave scheduler.
pub fn setup_stage(
    world: &mut World,
    layout: &StageLayout,
    arena: &ArenaGeometry,
    recheck_secs: f32,
) {
    for placement in &layout.towers {
        spawn_tower(world, placement.kind, placement.x, arena, recheck_secs);
    }
}

pub fn spawn_tower(
    world: &mut World,
    kind: TowerKind,
    x: f32,
    arena: &ArenaGeometry,
    recheck_secs: f32,
) -> hecs::Entity {
    world.spawn((Tower {
        kind,
        position: Vec2::new(x, arena.ground_y + TOWER_MUZZLE_HEIGHT),
        selector: TargetSelector::new(recheck_secs),
        cooldown: 0.0,
    },))
}

/// Spawn a grunt standing on the floor at `x`.
pub fn spawn_enemy(
    world: &mut World,
    kind: GruntKind,
    x: f32,
    hold_x: f32,
    arena: &ArenaGeometry,
) -> hecs::Entity {
    let profile = grunt_profile(kind);
    let position = Vec2::new(x, arena.standing_y(profile.half_extents));
    world.spawn((
        Unit::new(position, profile.half_extents, profile.max_health),
        Enemy::new(kind, hold_x),
    ))
}

/// Spawn a pickup that falls from `position` to the floor.
pub fn spawn_pickup(world: &mut World, kind: PickupKind, position: Vec2) -> hecs::Entity {
    world.spawn((Pickup::new(kind, position),))
}
