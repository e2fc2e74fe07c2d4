//! Combat snapshot: the complete visible state handed to the render surface
//! after each tick. Renderers only read it; nothing flows back into the core.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioCue, CombatEvent};
use crate::types::SimTime;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub time: SimTime,
    pub phase: CombatPhase,
    /// True when the tick was skipped because a cutscene or dialogue was active.
    pub gated: bool,
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub boss: Option<BossView>,
    pub projectiles: Vec<ProjectileView>,
    pub grenades: Vec<GrenadeView>,
    pub pickups: Vec<PickupView>,
    pub wall: WallView,
    pub audio_cues: Vec<AudioCue>,
    pub events: Vec<CombatEvent>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub alive: bool,
    pub facing: f32,
    pub grenades: u32,
    pub knocked_back: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub kind: GruntKind,
    pub state: GruntState,
    pub position: Vec2,
    pub health: f32,
    pub slowed: bool,
    pub visual: VisualKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub kind: TowerKind,
    pub position: Vec2,
    pub has_target: bool,
    pub visual: VisualKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossView {
    pub state: BossState,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub invincible: bool,
    pub visual: VisualKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec2,
    pub owner: Owner,
    pub visual: VisualKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrenadeView {
    pub position: Vec2,
    pub owner: Owner,
    pub exploded: bool,
    pub radius: f32,
    pub visual: VisualKey,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub kind: PickupKind,
    pub position: Vec2,
    pub phase: PickupPhase,
    pub visual: VisualKey,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WallView {
    pub x: f32,
    pub height: f32,
    pub target_height: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_destroyed: u32,
    pub enemies_total: u32,
    pub shots_fired: u32,
    pub pickups_collected: u32,
}
