//! Wave spawning system: brings grunt waves in from the right at scheduled times.

use hecs::World;

use rampart_core::constants::ENEMY_SPAWN_SPACING;
use rampart_core::enums::GruntKind;
use rampart_core::types::ArenaGeometry;

use crate::world_setup;

/// A single wave definition.
#[derive(Debug, Clone)]
pub struct WaveEntry {
    /// Combat time at which this wave spawns.
    pub spawn_at_secs: f64,
    /// Grunts to spawn: (kind, count).
    pub grunts: Vec<(GruntKind, u32)>,
    /// Whether this wave has already been spawned.
    pub spawned: bool,
}

impl WaveEntry {
    pub fn at(spawn_at_secs: f64, grunts: Vec<(GruntKind, u32)>) -> Self {
        Self {
            spawn_at_secs,
            grunts,
            spawned: false,
        }
    }
}

/// The complete wave schedule for a stage.
#[derive(Debug, Clone, Default)]
pub struct WaveSchedule {
    pub waves: Vec<WaveEntry>,
}

impl WaveSchedule {
    /// Total number of grunts across all waves.
    pub fn total_grunts(&self) -> u32 {
        self.waves
            .iter()
            .flat_map(|w| w.grunts.iter())
            .map(|(_, count)| count)
            .sum()
    }

    pub fn all_spawned(&self) -> bool {
        self.waves.iter().all(|w| w.spawned)
    }
}

/// Check the schedule and spawn any due waves just past the right arena edge.
pub fn run(
    world: &mut World,
    schedule: &mut WaveSchedule,
    arena: &ArenaGeometry,
    heavy_hold_x: f32,
    elapsed_secs: f64,
) {
    for wave in &mut schedule.waves {
        if wave.spawned || elapsed_secs < wave.spawn_at_secs {
            continue;
        }
        let mut slot = 0.0;
        for &(kind, count) in &wave.grunts {
            for _ in 0..count {
                let x = arena.right + slot * ENEMY_SPAWN_SPACING;
                world_setup::spawn_enemy(world, kind, x, heavy_hold_x, arena);
                slot += 1.0;
            }
        }
        wave.spawned = true;
    }
}
