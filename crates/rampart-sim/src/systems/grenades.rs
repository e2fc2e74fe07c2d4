//! Grenade system: flight plus the two-phase detonate/damage protocol.
//!
//! Player grenades check grunts and the boss; boss grenades check the player.

use hecs::World;
use tracing::trace;

use rampart_ai::boss::BossFsm;
use rampart_core::combat::DamageOutcome;
use rampart_core::enums::Faction;
use rampart_core::events::{AudioCue, CombatEvent};

use crate::grenade::{Grenade, GrenadeCheck};
use crate::systems::collision::{enemy_side, report_explosion, TargetKey};
use crate::systems::player::Player;

pub fn run(
    grenades: &mut [Grenade],
    dt: f32,
    world: &mut World,
    mut boss: Option<&mut BossFsm>,
    player: &mut Player,
    events: &mut Vec<CombatEvent>,
    audio: &mut Vec<AudioCue>,
) -> Vec<(TargetKey, DamageOutcome)> {
    let mut hits = Vec::new();

    for grenade in grenades.iter_mut() {
        grenade.update(dt);
        let check = match grenade.owner().faction() {
            Faction::Player => grenade.check(enemy_side(world, boss.as_deref_mut())),
            Faction::Hostile => grenade.check(std::iter::once((TargetKey::Player, &mut *player))),
        };
        match check {
            GrenadeCheck::Detonated(explosion) => report_explosion(&explosion, events, audio),
            GrenadeCheck::Damaged(resolved) => {
                for (key, outcome) in &resolved {
                    trace!(?key, ?outcome, owner = ?grenade.owner(), "grenade hit");
                }
                hits.extend(resolved);
            }
            GrenadeCheck::Flying | GrenadeCheck::Spent => {}
        }
    }

    hits
}
