//! Projectile motion system.

use rampart_core::types::ArenaGeometry;

use crate::ballistics::ProjectileSet;

/// Move every live projectile. Straight shots that leave the arena or time
/// out are deactivated; the sweep removes them at the end of the tick.
pub fn run(sets: [&mut ProjectileSet; 2], dt: f32, arena: &ArenaGeometry) {
    for set in sets {
        set.update(dt, arena);
    }
}
