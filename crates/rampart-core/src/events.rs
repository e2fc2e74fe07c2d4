//! Events emitted by the simulation for audio and presentation feedback.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Fire-and-forget audio cues. The sink never acknowledges them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    PlayerShot,
    PlayerHurt,
    PlayerDeath,
    GrenadeThrow,
    Explosion,
    EnemyShot,
    EnemyDeath,
    TowerShot,
    PickupCollected,
    WallRise,
    BossIntro,
    BossVolley,
    BossGrenade,
    BossChargeWindup,
    BossCharge,
    BossDefeat,
}

impl AudioCue {
    /// Stable cue name used by audio backends.
    pub fn name(self) -> &'static str {
        match self {
            AudioCue::PlayerShot => "player-shot",
            AudioCue::PlayerHurt => "player-hurt",
            AudioCue::PlayerDeath => "player-death",
            AudioCue::GrenadeThrow => "grenade-throw",
            AudioCue::Explosion => "explosion",
            AudioCue::EnemyShot => "enemy-shot",
            AudioCue::EnemyDeath => "enemy-death",
            AudioCue::TowerShot => "tower-shot",
            AudioCue::PickupCollected => "pickup-collected",
            AudioCue::WallRise => "wall-rise",
            AudioCue::BossIntro => "boss-intro",
            AudioCue::BossVolley => "boss-volley",
            AudioCue::BossGrenade => "boss-grenade",
            AudioCue::BossChargeWindup => "boss-charge-windup",
            AudioCue::BossCharge => "boss-charge",
            AudioCue::BossDefeat => "boss-defeat",
        }
    }
}

/// Gameplay events drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    EnemyKilled { kind: GruntKind, position: Vec2 },
    PickupDropped { kind: PickupKind, position: Vec2 },
    PickupCollected { kind: PickupKind },
    Explosion { origin: Vec2, radius: f32, faction: Faction },
    WallTrapArmed,
    BossIntroStarted,
    BossSpawned { stop_x: f32 },
    BossStateChanged { from: BossState, to: BossState },
    BossProjectilesCleared { count: usize },
    BossDefeated,
    /// Raised once per stage; the progress collaborator persists it.
    StageCompleted { stage: u32 },
    PlayerDefeated,
}
