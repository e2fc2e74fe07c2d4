//! Combat engine: the orchestrator of a fight.
//!
//! `CombatEngine` owns the hecs ECS world, the player, the boss, every
//! projectile and grenade, runs all systems in a fixed order on each update,
//! and produces `CombatSnapshot`s. Completely headless, so identical configs
//! and identical `(delta, input)` sequences replay to identical snapshots.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use rampart_ai::boss::BossFsm;
use rampart_core::combat::{DamageOutcome, Damageable};
use rampart_core::config::CombatConfig;
use rampart_core::constants::MAX_FRAME_DELTA;
use rampart_core::enums::{CombatPhase, Owner};
use rampart_core::events::{AudioCue, CombatEvent};
use rampart_core::input::InputSnapshot;
use rampart_core::state::CombatSnapshot;
use rampart_core::types::{SimTime, Timer};

use crate::ballistics::ProjectileSet;
use crate::grenade::Grenade;
use crate::score::ScoreState;
use crate::stage;
use crate::systems;
use crate::systems::collision::TargetKey;
use crate::systems::player::Player;
use crate::systems::snapshot::SnapshotSource;
use crate::systems::triggers::{Trigger, TriggerInput, TriggerState, Wall};
use crate::systems::wave_spawner::WaveSchedule;
use crate::world_setup;

/// Dialogue or cutscene presentation. While active, combat does not advance.
pub trait CutsceneGate {
    fn is_active(&self) -> bool;
}

/// A gate that never blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCutscene;

impl CutsceneGate for NoCutscene {
    fn is_active(&self) -> bool {
        false
    }
}

/// The combat engine. Owns the ECS world and all fight state.
pub struct CombatEngine {
    world: World,
    config: CombatConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    drop_chance: f64,
    player: Player,
    boss: Option<BossFsm>,
    player_fire: ProjectileSet,
    hostile_fire: ProjectileSet,
    grenades: Vec<Grenade>,
    wall: Wall,
    triggers: TriggerState,
    schedule: WaveSchedule,
    heavy_hold_x: f32,
    supply_timer: Timer,
    despawn_buffer: Vec<Entity>,
    audio_cues: Vec<AudioCue>,
    events: Vec<CombatEvent>,
    score: ScoreState,
}

impl CombatEngine {
    /// Set up the configured stage: towers placed, player spawned, waves
    /// scheduled. The config is expected to be validated.
    pub fn new(config: CombatConfig) -> Self {
        let arena = config.arena;
        let layout = stage::build_stage(config.stage);

        let mut world = World::new();
        world_setup::setup_stage(&mut world, &layout, &arena, config.tower_recheck_secs);

        let drop_chance = if config.drop_chance.is_finite() {
            config.drop_chance.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let score = ScoreState {
            enemies_total: layout.schedule.total_grunts(),
            ..Default::default()
        };

        Self {
            world,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            drop_chance,
            player: Player::new(&arena, config.player_max_health, config.player_grenades),
            boss: None,
            player_fire: ProjectileSet::new(),
            hostile_fire: ProjectileSet::new(),
            grenades: Vec::new(),
            wall: Wall::new(&arena),
            triggers: TriggerState::default(),
            schedule: layout.schedule,
            heavy_hold_x: layout.heavy_hold_x,
            supply_timer: Timer::new(),
            despawn_buffer: Vec::new(),
            audio_cues: Vec::new(),
            events: Vec::new(),
            score,
            config,
        }
    }

    /// Advance the fight by `delta` seconds and return the resulting snapshot.
    ///
    /// While `gate` is active nothing advances, not even time; the snapshot
    /// is flagged `gated`.
    pub fn update(
        &mut self,
        delta: f32,
        input: InputSnapshot,
        gate: &dyn CutsceneGate,
    ) -> CombatSnapshot {
        if gate.is_active() {
            return self.snapshot(true);
        }
        let dt = if delta.is_finite() {
            delta.clamp(0.0, MAX_FRAME_DELTA)
        } else {
            0.0
        };
        self.run_systems(dt, &input);
        self.time.advance(dt);
        self.snapshot(false)
    }

    pub fn phase(&self) -> CombatPhase {
        self.triggers.phase()
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn boss(&self) -> Option<&BossFsm> {
        self.boss.as_ref()
    }

    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    pub fn triggers(&self) -> &TriggerState {
        &self.triggers
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32, input: &InputSnapshot) {
        let arena = self.config.arena;

        // 1. Collisions: hostile fire vs player, player fire vs grunts and boss
        let hostile_hits = systems::collision::resolve_hostile_fire(
            &mut self.hostile_fire,
            &mut self.player,
            &mut self.events,
            &mut self.audio_cues,
        );
        self.apply_hits(&hostile_hits);
        let player_hits = systems::collision::resolve_player_fire(
            &mut self.player_fire,
            &mut self.world,
            self.boss.as_mut(),
            &mut self.events,
            &mut self.audio_cues,
        );
        self.apply_hits(&player_hits);

        // 2. Player
        let wall_x = self.wall.is_raised().then_some(self.wall.x);
        systems::player::run(
            &mut self.player,
            input,
            dt,
            &arena,
            wall_x,
            &mut self.player_fire,
            &mut self.grenades,
            &mut self.audio_cues,
            &mut self.score,
        );

        // 3. Pickups (physics, collection, supply drops)
        systems::pickups::run(
            &mut self.world,
            &mut self.player,
            dt,
            &arena,
            &mut self.despawn_buffer,
            &mut self.events,
            &mut self.audio_cues,
            &mut self.score,
        );
        if self.boss_fight_active() {
            systems::pickups::run_supply_drops(
                &mut self.world,
                &mut self.supply_timer,
                &self.player,
                dt,
                &arena,
                &mut self.events,
            );
        }

        // 4. Wave spawning + enemy AI (death edge, drop roll)
        systems::wave_spawner::run(
            &mut self.world,
            &mut self.schedule,
            &arena,
            self.heavy_hold_x,
            self.time.elapsed_secs,
        );
        systems::enemy_ai::run(
            &mut self.world,
            &self.player,
            dt,
            &mut self.hostile_fire,
            &mut self.rng,
            self.drop_chance,
            &mut self.events,
            &mut self.audio_cues,
            &mut self.score,
        );

        // 5. Towers
        systems::towers::run(
            &mut self.world,
            dt,
            &mut self.player_fire,
            &mut self.audio_cues,
            &mut self.score,
        );

        // 6. Projectile motion
        systems::projectiles::run([&mut self.player_fire, &mut self.hostile_fire], dt, &arena);

        // 7. Grenades (two-phase protocol)
        let grenade_hits = systems::grenades::run(
            &mut self.grenades,
            dt,
            &mut self.world,
            self.boss.as_mut(),
            &mut self.player,
            &mut self.events,
            &mut self.audio_cues,
        );
        self.apply_hits(&grenade_hits);

        // 8. Boss
        let mut charge_hit = None;
        if let Some(boss) = self.boss.as_mut().filter(|boss| !boss.is_dead()) {
            charge_hit = systems::boss::run(
                boss,
                &mut self.player,
                dt,
                &arena,
                &mut self.hostile_fire,
                &mut self.grenades,
                &mut self.events,
                &mut self.audio_cues,
            );
        }
        if let Some(outcome) = charge_hit {
            self.apply_hits(&[(TargetKey::Player, outcome)]);
        }

        // 9. Triggers
        let trigger_input = TriggerInput {
            all_waves_spawned: self.schedule.all_spawned(),
            enemies_destroyed: self.score.enemies_destroyed,
            enemies_total: self.score.enemies_total,
            player_alive: self.player.is_alive(),
            player_in_arena: self
                .wall
                .is_behind(self.player.position().x, self.player.body.half_extents.x),
        };
        for trigger in systems::triggers::run(&mut self.triggers, &mut self.wall, trigger_input, dt)
        {
            self.handle_trigger(trigger);
        }

        // 10. Cleanup (dead grunts, spent pickups, projectile sweep)
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            [&mut self.player_fire, &mut self.hostile_fire],
            &mut self.grenades,
        );
    }

    /// React to resolved hits. Grunt deaths are picked up by the enemy AI
    /// on its death edge; the player and boss are handled here.
    fn apply_hits(&mut self, hits: &[(TargetKey, DamageOutcome)]) {
        for &(key, outcome) in hits {
            match (key, outcome) {
                (TargetKey::Player, DamageOutcome::Damaged) => {
                    self.audio_cues.push(AudioCue::PlayerHurt);
                }
                (TargetKey::Player, DamageOutcome::Killed) => {
                    self.audio_cues.push(AudioCue::PlayerDeath);
                }
                (TargetKey::Boss, DamageOutcome::Killed) => self.on_boss_killed(),
                _ => {}
            }
        }
    }

    /// Clear the boss's projectiles and start the defeat sequence. Runs once.
    fn on_boss_killed(&mut self) {
        if !self.triggers.start_defeat() {
            return;
        }
        let mut cleared = self.hostile_fire.deactivate_owned_by(Owner::Boss);
        for grenade in &mut self.grenades {
            if grenade.owner() == Owner::Boss && !grenade.is_expired() {
                grenade.deactivate();
                cleared += 1;
            }
        }
        info!(cleared, "boss defeated");
        self.events
            .push(CombatEvent::BossProjectilesCleared { count: cleared });
        self.events.push(CombatEvent::BossDefeated);
        self.audio_cues.push(AudioCue::BossDefeat);
    }

    fn handle_trigger(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::WallTrapArmed => {
                self.events.push(CombatEvent::WallTrapArmed);
                self.audio_cues.push(AudioCue::WallRise);
            }
            Trigger::BossIntroStarted => {
                self.events.push(CombatEvent::BossIntroStarted);
                self.audio_cues.push(AudioCue::BossIntro);
            }
            Trigger::SpawnBoss => {
                let boss = BossFsm::initialize(&self.config.arena, self.config.boss_max_health);
                self.events.push(CombatEvent::BossSpawned {
                    stop_x: boss.stop_x(),
                });
                self.boss = Some(boss);
                self.supply_timer.reset();
            }
            Trigger::StageCompleted => {
                self.events.push(CombatEvent::StageCompleted {
                    stage: self.config.stage,
                });
            }
            Trigger::PlayerDefeated => self.events.push(CombatEvent::PlayerDefeated),
        }
    }

    fn boss_fight_active(&self) -> bool {
        self.triggers.boss_spawned
            && !self.triggers.boss_defeated
            && self.boss.as_ref().is_some_and(|boss| !boss.is_dead())
    }

    fn snapshot(&mut self, gated: bool) -> CombatSnapshot {
        let audio_cues = std::mem::take(&mut self.audio_cues);
        let events = std::mem::take(&mut self.events);
        let source = SnapshotSource {
            world: &self.world,
            time: self.time,
            phase: self.triggers.phase(),
            gated,
            player: &self.player,
            boss: self.boss.as_ref(),
            projectile_sets: [&self.player_fire, &self.hostile_fire],
            grenades: &self.grenades,
            wall: &self.wall,
            score: &self.score,
        };
        systems::snapshot::build_snapshot(&source, audio_cues, events)
    }

    // ---- Test hooks ----

    /// Get a mutable reference to the ECS world.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    #[cfg(test)]
    pub fn player_fire_mut(&mut self) -> &mut ProjectileSet {
        &mut self.player_fire
    }

    #[cfg(test)]
    pub fn hostile_fire_mut(&mut self) -> &mut ProjectileSet {
        &mut self.hostile_fire
    }

    #[cfg(test)]
    pub fn grenades_mut(&mut self) -> &mut Vec<Grenade> {
        &mut self.grenades
    }

    /// Spawn a grunt outside the wave schedule.
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, kind: rampart_core::enums::GruntKind, x: f32) -> Entity {
        world_setup::spawn_enemy(&mut self.world, kind, x, self.heavy_hold_x, &self.config.arena)
    }

    /// Skip the skirmish: latch the wall and intro and bring the boss in.
    #[cfg(test)]
    pub fn spawn_test_boss(&mut self) {
        self.triggers.wall_armed = true;
        self.triggers.intro_started = true;
        self.triggers.boss_spawned = true;
        self.handle_trigger(Trigger::SpawnBoss);
    }

    /// Hit the boss directly, routing the outcome like any resolved hit.
    #[cfg(test)]
    pub fn strike_boss(&mut self, damage: f32) -> Option<DamageOutcome> {
        let hit = rampart_core::combat::Hit::damage(damage);
        let outcome = self.boss.as_mut()?.take_hit(&hit);
        self.apply_hits(&[(TargetKey::Boss, outcome)]);
        Some(outcome)
    }
}
