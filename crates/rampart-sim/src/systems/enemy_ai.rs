//! Enemy AI system: runs the grunt FSM for every enemy and handles deaths.
//!
//! Calls the grunt FSM from rampart-ai to compute transitions and fire
//! orders, then updates ECS components accordingly. A grunt whose unit died
//! this tick gets its death edge here: it enters `Dead`, the kill is counted,
//! and the drop roll is made exactly once.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use rampart_ai::grunt::{evaluate, FireOrder, GruntContext};
use rampart_ai::profiles::grunt_profile;
use rampart_core::combat::Damageable;
use rampart_core::components::{Enemy, Unit};
use rampart_core::constants::*;
use rampart_core::enums::{GruntKind, GruntState, Owner, PickupKind};
use rampart_core::events::{AudioCue, CombatEvent};

use crate::ballistics::{Effect, ProjectileSet, ProjectileSpec};
use crate::score::ScoreState;
use crate::systems::player::Player;
use crate::world_setup;

/// Run the enemy AI system for one step.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    player: &Player,
    dt: f32,
    hostile_fire: &mut ProjectileSet,
    rng: &mut ChaCha8Rng,
    drop_chance: f64,
    events: &mut Vec<CombatEvent>,
    audio: &mut Vec<AudioCue>,
    score: &mut ScoreState,
) {
    let player_position = player.position();
    let player_alive = player.is_alive();
    let mut drops: Vec<(PickupKind, Vec2)> = Vec::new();
    let mut deaths: Vec<(GruntKind, Vec2)> = Vec::new();

    for (_entity, (unit, enemy)) in world.query_mut::<(&mut Unit, &mut Enemy)>() {
        if !unit.is_alive() {
            if enemy.state != GruntState::Dead {
                enemy.state = GruntState::Dead;
                enemy.state_timer.reset();
                deaths.push((enemy.kind, unit.position));
            } else {
                enemy.state_timer.advance(dt);
            }
            if !enemy.drop_checked {
                enemy.drop_checked = true;
                if rng.gen_bool(drop_chance) {
                    let kind = if rng.gen_bool(HEALTH_DROP_SHARE) {
                        PickupKind::Health
                    } else {
                        PickupKind::GrenadeAmmo
                    };
                    drops.push((kind, unit.position));
                }
            }
            continue;
        }

        unit.status.tick(dt);
        if let Some(knockback) = unit.status.knockback {
            unit.position.x += knockback.direction * KNOCKBACK_SPEED * dt;
        }

        let ctx = GruntContext {
            kind: enemy.kind,
            state: enemy.state,
            position: unit.position,
            hold_x: enemy.hold_x,
            player_position,
            player_alive,
            can_act: unit.can_act(),
            knocked_back: unit.status.is_knocked_back(),
            speed_multiplier: unit.status.speed_multiplier(),
            dt,
        };
        let update = evaluate(&ctx);
        let profile = grunt_profile(enemy.kind);

        unit.position.x += update.displacement_x;
        if update.state_changed {
            enemy.state = update.new_state;
            enemy.state_timer.reset();
            // Entry action: arm the first shot.
            if matches!(update.new_state, GruntState::Attacking | GruntState::Stationary) {
                unit.status.attack_cooldown = profile.first_shot_delay;
            }
        } else {
            enemy.state_timer.advance(dt);
        }

        if let Some(order) = update.fire {
            let spec = match (order, profile.shell) {
                (FireOrder::Shell { origin, target }, Some(shell)) => ProjectileSpec::lobbed(
                    origin,
                    target,
                    shell.apex_height,
                    profile.projectile_speed,
                    Effect::Blast {
                        damage: profile.damage,
                        radius: shell.radius,
                    },
                    Owner::Grunt,
                ),
                (FireOrder::Shell { origin, target }, None) => ProjectileSpec::straight(
                    origin,
                    target.x,
                    profile.projectile_speed,
                    Effect::Direct {
                        damage: profile.damage,
                    },
                    Owner::Grunt,
                ),
                (FireOrder::Bullet { origin, target_x }, _) => ProjectileSpec::straight(
                    origin,
                    target_x,
                    profile.projectile_speed,
                    Effect::Direct {
                        damage: profile.damage,
                    },
                    Owner::Grunt,
                ),
            };
            hostile_fire.spawn(spec);
            unit.status.attack_cooldown = profile.fire_interval;
            audio.push(AudioCue::EnemyShot);
        }
    }

    for (kind, position) in deaths {
        score.enemies_destroyed += 1;
        debug!(?kind, x = position.x, "grunt destroyed");
        events.push(CombatEvent::EnemyKilled { kind, position });
        audio.push(AudioCue::EnemyDeath);
    }

    for (kind, position) in drops {
        debug!(?kind, x = position.x, "pickup dropped");
        world_setup::spawn_pickup(world, kind, position);
        events.push(CombatEvent::PickupDropped { kind, position });
    }
}
