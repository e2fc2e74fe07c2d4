//! Cross-cutting fight triggers.
//!
//! Each trigger fires on an edge and is guarded by a one-shot latch, so a
//! condition that keeps holding on later ticks never fires it again:
//!
//! ```text
//! all grunts down + player in the arena → wall trap armed → wall at height → boss intro
//!   → intro done → boss spawned → boss killed → defeat sequence → stage completed
//! player down → player defeated
//! ```

use tracing::info;

use rampart_core::constants::*;
use rampart_core::enums::CombatPhase;
use rampart_core::types::{ArenaGeometry, Timer};

/// The barrier that seals the boss arena on its left side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub x: f32,
    pub height: f32,
    pub target_height: f32,
    pub rising: bool,
}

impl Wall {
    pub fn new(arena: &ArenaGeometry) -> Self {
        Self {
            x: arena.boss_camera_left(),
            height: 0.0,
            target_height: WALL_TARGET_HEIGHT,
            rising: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if self.rising {
            self.height = (self.height + WALL_RISE_SPEED * dt).min(self.target_height);
        }
    }

    /// Whether the wall blocks the player.
    pub fn is_raised(&self) -> bool {
        self.height > 0.0
    }

    pub fn is_complete(&self) -> bool {
        self.height >= self.target_height
    }

    /// Whether a body with this center X and half width stands wholly on the
    /// arena side of the wall.
    pub fn is_behind(&self, x: f32, half_width: f32) -> bool {
        x - half_width >= self.x + WALL_THICKNESS * 0.5
    }
}

/// One-shot latches plus the timers of the timed sequences.
#[derive(Debug, Clone, Default)]
pub struct TriggerState {
    pub wall_armed: bool,
    pub intro_started: bool,
    pub boss_spawned: bool,
    pub boss_defeated: bool,
    pub stage_completed: bool,
    pub player_defeated: bool,
    intro: Timer,
    defeat: Timer,
}

impl TriggerState {
    /// Latch the boss kill and start the defeat sequence. True only the first time.
    pub fn start_defeat(&mut self) -> bool {
        if self.boss_defeated {
            return false;
        }
        self.boss_defeated = true;
        self.defeat.reset();
        true
    }

    pub fn phase(&self) -> CombatPhase {
        if self.player_defeated {
            CombatPhase::Defeat
        } else if self.stage_completed {
            CombatPhase::Victory
        } else if self.boss_defeated {
            CombatPhase::BossDefeated
        } else if self.boss_spawned {
            CombatPhase::BossFight
        } else if self.intro_started {
            CombatPhase::BossIntro
        } else if self.wall_armed {
            CombatPhase::WallRising
        } else {
            CombatPhase::Skirmish
        }
    }
}

/// What the triggers saw this tick.
#[derive(Debug, Clone, Copy)]
pub struct TriggerInput {
    pub all_waves_spawned: bool,
    pub enemies_destroyed: u32,
    pub enemies_total: u32,
    pub player_alive: bool,
    /// The player has crossed the wall line into the boss arena.
    pub player_in_arena: bool,
}

/// Edges fired this tick, for the engine to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    WallTrapArmed,
    BossIntroStarted,
    SpawnBoss,
    StageCompleted,
    PlayerDefeated,
}

/// Advance the wall and timed sequences, then evaluate every latch.
pub fn run(
    state: &mut TriggerState,
    wall: &mut Wall,
    input: TriggerInput,
    dt: f32,
) -> Vec<Trigger> {
    let mut fired = Vec::new();

    if !input.player_alive && !state.player_defeated {
        state.player_defeated = true;
        info!("player defeated");
        fired.push(Trigger::PlayerDefeated);
    }
    // A lost fight goes no further.
    if state.player_defeated {
        return fired;
    }

    wall.update(dt);

    // 1. Every tracked grunt destroyed and the player inside → arm the wall trap
    if !state.wall_armed
        && input.player_in_arena
        && input.all_waves_spawned
        && input.enemies_total > 0
        && input.enemies_destroyed >= input.enemies_total
    {
        state.wall_armed = true;
        wall.rising = true;
        info!(
            destroyed = input.enemies_destroyed,
            total = input.enemies_total,
            "wall trap armed"
        );
        fired.push(Trigger::WallTrapArmed);
    }

    // 2. Wall at full height → boss intro
    if state.wall_armed && !state.intro_started && wall.is_complete() {
        state.intro_started = true;
        state.intro.reset();
        info!("boss intro started");
        fired.push(Trigger::BossIntroStarted);
    } else if state.intro_started && !state.boss_spawned {
        // 3. Intro finished → boss enters
        state.intro.advance(dt);
        if state.intro.has_elapsed(BOSS_INTRO_SECS) {
            state.boss_spawned = true;
            info!("boss spawned");
            fired.push(Trigger::SpawnBoss);
        }
    }

    // 4. Defeat sequence finished → stage completed
    if state.boss_defeated && !state.stage_completed {
        state.defeat.advance(dt);
        if state.defeat.has_elapsed(BOSS_DEFEAT_SEQUENCE_SECS) {
            state.stage_completed = true;
            info!("stage completed");
            fired.push(Trigger::StageCompleted);
        }
    }

    fired
}
