//! Cleanup system: end-of-tick removal of dead grunts, spent pickups,
//! inactive projectiles and expired grenades.

use hecs::{Entity, World};

use rampart_core::components::{Enemy, Pickup};
use rampart_core::constants::ENEMY_CORPSE_SECS;
use rampart_core::enums::GruntState;

use crate::ballistics::ProjectileSet;
use crate::grenade::Grenade;

/// Despawn everything marked for removal this tick.
///
/// `despawn_buffer` may already hold entities queued by earlier systems; it
/// is drained here.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    projectile_sets: [&mut ProjectileSet; 2],
    grenades: &mut Vec<Grenade>,
) {
    // Grunts whose corpse timer ran out.
    for (entity, enemy) in world.query_mut::<&Enemy>() {
        if enemy.state == GruntState::Dead && enemy.state_timer.has_elapsed(ENEMY_CORPSE_SECS) {
            despawn_buffer.push(entity);
        }
    }

    // Collected pickups.
    for (entity, pickup) in world.query_mut::<&Pickup>() {
        if pickup.collected {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    for set in projectile_sets {
        set.sweep();
    }

    // Reverse index order so a removal never skips an unvisited grenade.
    for i in (0..grenades.len()).rev() {
        if grenades[i].is_expired() {
            grenades.remove(i);
        }
    }
}
