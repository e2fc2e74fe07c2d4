//! Pickup system: falling physics, collection by the player, and timed
//! supply drops during the boss fight.

use glam::Vec2;
use hecs::{Entity, World};

use rampart_core::combat::Damageable;
use rampart_core::components::Pickup;
use rampart_core::constants::*;
use rampart_core::enums::{PickupKind, PickupPhase};
use rampart_core::events::{AudioCue, CombatEvent};
use rampart_core::types::{ArenaGeometry, Timer};

use crate::score::ScoreState;
use crate::systems::player::Player;
use crate::world_setup;

/// Run the pickup system for one step.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    player: &mut Player,
    dt: f32,
    arena: &ArenaGeometry,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<CombatEvent>,
    audio: &mut Vec<AudioCue>,
    score: &mut ScoreState,
) {
    let floor = arena.standing_y(PICKUP_HALF_EXTENTS);
    let player_bounds = player.bounds();
    let player_alive = player.is_alive();
    let mut collected: Vec<PickupKind> = Vec::new();

    for (entity, pickup) in world.query_mut::<&mut Pickup>() {
        if pickup.collected {
            continue;
        }

        match pickup.phase {
            PickupPhase::Falling => {
                pickup.velocity_y -= PICKUP_GRAVITY * dt;
                pickup.position.y += pickup.velocity_y * dt;
                if pickup.position.y <= floor {
                    pickup.position.y = floor;
                    pickup.velocity_y = 0.0;
                    pickup.phase = PickupPhase::Resting;
                }
            }
            PickupPhase::Resting => {
                pickup.resting.advance(dt);
                if pickup.resting.has_elapsed(PICKUP_RESTING_LIFETIME_SECS) {
                    despawn_buffer.push(entity);
                    continue;
                }
            }
        }

        if player_alive && pickup.bounds().intersects(&player_bounds) {
            pickup.collected = true;
            collected.push(pickup.kind);
        }
    }

    for kind in collected {
        match kind {
            PickupKind::Health => player.body.heal(HEALTH_PICKUP_AMOUNT),
            PickupKind::GrenadeAmmo => {
                player.grenades = (player.grenades + GRENADE_PICKUP_AMOUNT).min(PLAYER_MAX_GRENADES);
            }
        }
        score.pickups_collected += 1;
        events.push(CombatEvent::PickupCollected { kind });
        audio.push(AudioCue::PickupCollected);
    }
}

/// Drop a grenade crate from the top of the camera every
/// `SUPPLY_DROP_INTERVAL_SECS` while the boss fight is on.
pub fn run_supply_drops(
    world: &mut World,
    timer: &mut Timer,
    player: &Player,
    dt: f32,
    arena: &ArenaGeometry,
    events: &mut Vec<CombatEvent>,
) {
    timer.advance(dt);
    if !timer.has_elapsed(SUPPLY_DROP_INTERVAL_SECS) {
        return;
    }
    timer.reset();

    let camera_left = arena.boss_camera_left() + PICKUP_HALF_EXTENTS.x;
    let camera_right = (arena.right - PICKUP_HALF_EXTENTS.x).max(camera_left);
    let position = Vec2::new(
        player.position().x.clamp(camera_left, camera_right),
        arena.ground_y + CAMERA_HEIGHT,
    );
    world_setup::spawn_pickup(world, PickupKind::GrenadeAmmo, position);
    events.push(CombatEvent::PickupDropped {
        kind: PickupKind::GrenadeAmmo,
        position,
    });
}
