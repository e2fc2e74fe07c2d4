//! Boss system: runs the boss FSM and carries out the actions it requests.

use glam::Vec2;
use tracing::debug;

use rampart_ai::boss::{BossAction, BossContext, BossFsm};
use rampart_core::combat::{DamageOutcome, Damageable, Hit};
use rampart_core::constants::*;
use rampart_core::enums::{BossState, Owner};
use rampart_core::events::{AudioCue, CombatEvent};
use rampart_core::types::ArenaGeometry;

use crate::ballistics::{Effect, ProjectileSet, ProjectileSpec};
use crate::grenade::Grenade;
use crate::systems::player::Player;

/// Advance the boss one step. Returns the outcome of a charge contact on
/// the player, if one landed this step.
#[allow(clippy::too_many_arguments)]
pub fn run(
    boss: &mut BossFsm,
    player: &mut Player,
    dt: f32,
    arena: &ArenaGeometry,
    hostile_fire: &mut ProjectileSet,
    grenades: &mut Vec<Grenade>,
    events: &mut Vec<CombatEvent>,
    audio: &mut Vec<AudioCue>,
) -> Option<DamageOutcome> {
    let ctx = BossContext {
        player_position: player.position(),
        arena: *arena,
    };

    for action in boss.update(dt, &ctx) {
        match action {
            BossAction::StateChanged { from, to } => {
                debug!(?from, ?to, "boss transition");
                events.push(CombatEvent::BossStateChanged { from, to });
            }
            BossAction::ArrivedInArena => {
                debug!(x = boss.position().x, "boss in position");
            }
            BossAction::FireVolley {
                origin,
                target_x,
                count,
            } => {
                let center = (count.saturating_sub(1)) as f32 * 0.5;
                for i in 0..count {
                    let offset = (i as f32 - center) * BOSS_VOLLEY_SPREAD;
                    hostile_fire.spawn(ProjectileSpec::straight(
                        origin + Vec2::new(0.0, offset),
                        target_x,
                        BOSS_BULLET_SPEED,
                        Effect::Knockback {
                            damage: BOSS_BULLET_DAMAGE,
                            secs: BOSS_BULLET_KNOCKBACK_SECS,
                        },
                        Owner::Boss,
                    ));
                }
                audio.push(AudioCue::BossVolley);
            }
            BossAction::TossGrenade { origin, target } => {
                grenades.push(Grenade::tossed(origin, target));
                audio.push(AudioCue::BossGrenade);
            }
            BossAction::ChargeWindup { .. } => audio.push(AudioCue::BossChargeWindup),
            BossAction::ChargeStarted => audio.push(AudioCue::BossCharge),
        }
    }

    // Charge contact: at most one hit per charge.
    if boss.state() != BossState::Charge
        || !player.is_alive()
        || !boss.bounds().intersects(&player.bounds())
        || !boss.claim_charge_contact()
    {
        return None;
    }
    let direction = if player.position().x < boss.position().x {
        -1.0
    } else {
        1.0
    };
    let hit = Hit::damage(BOSS_CHARGE_DAMAGE).with_knockback(BOSS_CHARGE_KNOCKBACK_SECS, direction);
    Some(player.take_hit(&hit))
}
