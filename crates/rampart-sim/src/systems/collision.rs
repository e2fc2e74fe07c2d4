//! Collision and damage resolver.
//!
//! Matches live projectiles against live targets once per tick. Player fire
//! (player and tower shots) is resolved against grunts and then the boss, in
//! that order; hostile fire is resolved against the player. A single-target
//! projectile stops at its first overlap. An area projectile detonates when it
//! touches a live target or meets its arc's explosion condition, then hits
//! everything in radius. Spent projectiles stay in their set, inactive, until
//! the end-of-tick sweep.

use hecs::{Entity, World};
use tracing::trace;

use rampart_ai::boss::BossFsm;
use rampart_core::combat::{DamageOutcome, Damageable};
use rampart_core::components::{Enemy, Unit};
use rampart_core::events::{AudioCue, CombatEvent};

use crate::ballistics::{Explosion, ProjectileSet};
use crate::systems::player::Player;

/// Identifies whoever took a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKey {
    Enemy(Entity),
    Boss,
    Player,
}

/// Grunts in world iteration order, then the boss if present.
pub fn enemy_side<'w>(
    world: &'w mut World,
    boss: Option<&'w mut BossFsm>,
) -> impl Iterator<Item = (TargetKey, &'w mut dyn Damageable)> + 'w {
    world
        .query_mut::<(&mut Unit, &Enemy)>()
        .into_iter()
        .map(|(entity, (unit, _))| (TargetKey::Enemy(entity), unit as &mut dyn Damageable))
        .chain(boss.map(|boss| (TargetKey::Boss, boss as &mut dyn Damageable)))
}

/// Publish an explosion to presentation.
pub fn report_explosion(
    explosion: &Explosion,
    events: &mut Vec<CombatEvent>,
    audio: &mut Vec<AudioCue>,
) {
    events.push(CombatEvent::Explosion {
        origin: explosion.origin,
        radius: explosion.radius,
        faction: explosion.faction,
    });
    audio.push(AudioCue::Explosion);
}

/// Resolve player and tower fire against grunts and the boss.
pub fn resolve_player_fire(
    projectiles: &mut ProjectileSet,
    world: &mut World,
    mut boss: Option<&mut BossFsm>,
    events: &mut Vec<CombatEvent>,
    audio: &mut Vec<AudioCue>,
) -> Vec<(TargetKey, DamageOutcome)> {
    let mut hits = Vec::new();

    for projectile in projectiles.iter_mut() {
        if !projectile.is_active() {
            continue;
        }
        if projectile.effect().is_area() {
            let bounds = projectile.bounds();
            let touching = enemy_side(world, boss.as_deref_mut())
                .any(|(_, target)| target.is_alive() && target.bounds().intersects(&bounds));
            if !touching && !projectile.should_explode() {
                continue;
            }
            if let Some(explosion) = projectile.explosion() {
                report_explosion(&explosion, events, audio);
            }
        }

        let resolved = projectile.on_hit(enemy_side(world, boss.as_deref_mut()));
        for (key, outcome) in &resolved {
            trace!(?key, ?outcome, owner = ?projectile.owner(), "player fire hit");
        }
        hits.extend(resolved);
    }

    hits
}

/// Resolve grunt and boss fire against the player.
pub fn resolve_hostile_fire(
    projectiles: &mut ProjectileSet,
    player: &mut Player,
    events: &mut Vec<CombatEvent>,
    audio: &mut Vec<AudioCue>,
) -> Vec<(TargetKey, DamageOutcome)> {
    let mut hits = Vec::new();

    for projectile in projectiles.iter_mut() {
        if !projectile.is_active() {
            continue;
        }
        if projectile.effect().is_area() {
            let touching = player.is_alive() && player.bounds().intersects(&projectile.bounds());
            if !touching && !projectile.should_explode() {
                continue;
            }
            if let Some(explosion) = projectile.explosion() {
                report_explosion(&explosion, events, audio);
            }
        }

        let resolved = projectile.on_hit(std::iter::once((TargetKey::Player, &mut *player)));
        for (key, outcome) in &resolved {
            trace!(?key, ?outcome, owner = ?projectile.owner(), "hostile fire hit");
        }
        hits.extend(resolved);
    }

    hits
}
