//! Tower system: target acquisition and firing for player-side emplacements.
//!
//! Towers are indestructible. Each holds a [`TargetSelector`] over enemy
//! entities; candidates are the live grunts in world iteration order.

use glam::Vec2;
use hecs::{Entity, World};

use rampart_ai::profiles::tower_profile;
use rampart_ai::targeting::TargetSelector;
use rampart_core::combat::Damageable;
use rampart_core::components::{Enemy, Unit};
use rampart_core::enums::{Owner, TowerKind};
use rampart_core::events::AudioCue;

use crate::ballistics::{Effect, ProjectileSet, ProjectileSpec};
use crate::score::ScoreState;

/// A tower placed by the stage layout.
#[derive(Debug, Clone)]
pub struct Tower {
    pub kind: TowerKind,
    /// Muzzle position.
    pub position: Vec2,
    pub selector: TargetSelector<Entity>,
    /// Seconds until the next shot.
    pub cooldown: f32,
}

/// Run the tower system for one step. Only grunts are candidates; the boss
/// is never targeted.
pub fn run(
    world: &mut World,
    dt: f32,
    player_fire: &mut ProjectileSet,
    audio: &mut Vec<AudioCue>,
    score: &mut ScoreState,
) {
    let candidates: Vec<(Entity, Vec2)> = world
        .query::<(&Unit, &Enemy)>()
        .iter()
        .filter(|(_, (unit, _))| unit.is_alive())
        .map(|(entity, (unit, _))| (entity, unit.position))
        .collect();

    for (_entity, tower) in world.query_mut::<&mut Tower>() {
        let profile = tower_profile(tower.kind);
        tower.cooldown = (tower.cooldown - dt).max(0.0);

        let origin = tower.position;
        let in_range = |id: &Entity| {
            candidates
                .iter()
                .any(|(candidate, position)| {
                    candidate == id && (position.x - origin.x).abs() <= profile.range
                })
        };
        let target = tower
            .selector
            .update(dt, in_range, candidates.iter().map(|(entity, _)| *entity));

        let Some(target) = target else {
            continue;
        };
        // Dead targets are dropped from the candidate list.
        let Some(&(_, target_position)) = candidates.iter().find(|(e, _)| *e == target) else {
            continue;
        };
        if tower.cooldown > 0.0 {
            continue;
        }

        let spec = match (profile.shell, profile.slow) {
            (Some(shell), _) => ProjectileSpec::lobbed(
                origin,
                target_position,
                shell.apex_height,
                profile.projectile_speed,
                Effect::Blast {
                    damage: profile.damage,
                    radius: shell.radius,
                },
                Owner::Tower,
            ),
            (None, Some(slow)) => ProjectileSpec::straight(
                origin,
                target_position.x,
                profile.projectile_speed,
                Effect::Slow {
                    damage: profile.damage,
                    strength: slow.strength,
                    secs: slow.secs,
                },
                Owner::Tower,
            ),
            (None, None) => ProjectileSpec::straight(
                origin,
                target_position.x,
                profile.projectile_speed,
                Effect::Direct {
                    damage: profile.damage,
                },
                Owner::Tower,
            ),
        };
        player_fire.spawn(spec);
        tower.cooldown = profile.fire_interval;
        score.shots_fired += 1;
        audio.push(AudioCue::TowerShot);
    }
}
