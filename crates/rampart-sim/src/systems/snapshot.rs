//! Snapshot system: reads the world and engine state and builds a complete
//! `CombatSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use rampart_ai::boss::BossFsm;
use rampart_core::combat::Damageable;
use rampart_core::components::{Enemy, Pickup, Unit};
use rampart_core::enums::*;
use rampart_core::events::{AudioCue, CombatEvent};
use rampart_core::state::*;
use rampart_core::types::SimTime;

use crate::ballistics::{Effect, Projectile, ProjectileSet};
use crate::grenade::Grenade;
use crate::score::ScoreState;
use crate::systems::player::Player;
use crate::systems::towers::Tower;
use crate::systems::triggers::Wall;

/// Borrowed view of everything a snapshot is built from.
pub struct SnapshotSource<'a> {
    pub world: &'a World,
    pub time: SimTime,
    pub phase: CombatPhase,
    pub gated: bool,
    pub player: &'a Player,
    pub boss: Option<&'a BossFsm>,
    pub projectile_sets: [&'a ProjectileSet; 2],
    pub grenades: &'a [Grenade],
    pub wall: &'a Wall,
    pub score: &'a ScoreState,
}

/// Build a complete snapshot. Audio cues and events are moved in, having been
/// drained from the engine.
pub fn build_snapshot(
    source: &SnapshotSource<'_>,
    audio_cues: Vec<AudioCue>,
    events: Vec<CombatEvent>,
) -> CombatSnapshot {
    CombatSnapshot {
        time: source.time,
        phase: source.phase,
        gated: source.gated,
        player: build_player(source.player),
        enemies: build_enemies(source.world),
        towers: build_towers(source.world),
        boss: source.boss.map(build_boss),
        projectiles: source
            .projectile_sets
            .iter()
            .flat_map(|set| set.iter())
            .filter(|p| p.is_active())
            .map(build_projectile)
            .collect(),
        grenades: source.grenades.iter().map(build_grenade).collect(),
        pickups: build_pickups(source.world),
        wall: WallView {
            x: source.wall.x,
            height: source.wall.height,
            target_height: source.wall.target_height,
        },
        audio_cues,
        events,
        score: ScoreView {
            enemies_destroyed: source.score.enemies_destroyed,
            enemies_total: source.score.enemies_total,
            shots_fired: source.score.shots_fired,
            pickups_collected: source.score.pickups_collected,
        },
    }
}

fn build_player(player: &Player) -> PlayerView {
    PlayerView {
        position: player.position(),
        health: player.body.health().current(),
        max_health: player.body.health().max(),
        alive: player.is_alive(),
        facing: player.facing,
        grenades: player.grenades,
        knocked_back: player.body.status.is_knocked_back(),
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    world
        .query::<(&Unit, &Enemy)>()
        .iter()
        .map(|(_, (unit, enemy))| EnemyView {
            kind: enemy.kind,
            state: enemy.state,
            position: unit.position,
            health: unit.health().current(),
            slowed: unit.status.slow.is_some(),
            visual: match enemy.kind {
                GruntKind::Rifleman => VisualKey::Rifleman,
                GruntKind::Heavy => VisualKey::Heavy,
            },
        })
        .collect()
}

fn build_towers(world: &World) -> Vec<TowerView> {
    world
        .query::<&Tower>()
        .iter()
        .map(|(_, tower)| TowerView {
            kind: tower.kind,
            position: tower.position,
            has_target: tower.selector.current().is_some(),
            visual: match tower.kind {
                TowerKind::Gun => VisualKey::GunTower,
                TowerKind::Frost => VisualKey::FrostTower,
                TowerKind::Mortar => VisualKey::MortarTower,
            },
        })
        .collect()
}

fn build_boss(boss: &BossFsm) -> BossView {
    BossView {
        state: boss.state(),
        position: boss.position(),
        health: boss.health().current(),
        max_health: boss.health().max(),
        invincible: boss.is_invincible(),
        visual: VisualKey::Boss,
    }
}

fn build_projectile(projectile: &Projectile) -> ProjectileView {
    let visual = match (projectile.owner(), projectile.effect()) {
        (_, Effect::Blast { .. }) => VisualKey::Shell,
        (Owner::Tower, Effect::Slow { .. }) => VisualKey::FrostShot,
        (Owner::Player | Owner::Tower, _) => VisualKey::PlayerShot,
        (Owner::Grunt, _) => VisualKey::EnemyBullet,
        (Owner::Boss, _) => VisualKey::BossBullet,
    };
    ProjectileView {
        position: projectile.position(),
        owner: projectile.owner(),
        visual,
    }
}

fn build_grenade(grenade: &Grenade) -> GrenadeView {
    GrenadeView {
        position: grenade.position(),
        owner: grenade.owner(),
        exploded: grenade.is_exploded(),
        radius: grenade.radius(),
        visual: if grenade.is_exploded() {
            VisualKey::Explosion
        } else {
            VisualKey::Grenade
        },
    }
}

fn build_pickups(world: &World) -> Vec<PickupView> {
    world
        .query::<&Pickup>()
        .iter()
        .filter(|(_, pickup)| !pickup.collected)
        .map(|(_, pickup)| PickupView {
            kind: pickup.kind,
            position: pickup.position,
            phase: pickup.phase,
            visual: match pickup.kind {
                PickupKind::Health => VisualKey::HealthPickup,
                PickupKind::GrenadeAmmo => VisualKey::GrenadePickup,
            },
        })
        .collect()
}
