//! Stage definitions: tower layouts and grunt wave schedules.
//!
//! Each stage places its towers, picks where heavy units park, and defines
//! wave composition and timing. Stage ids past the last defined stage reuse
//! the hardest one.

use rampart_core::enums::{GruntKind, TowerKind};

use crate::systems::wave_spawner::{WaveEntry, WaveSchedule};

/// Where a tower stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerPlacement {
    pub kind: TowerKind,
    pub x: f32,
}

#[derive(Debug, Clone)]
pub struct StageLayout {
    pub towers: Vec<TowerPlacement>,
    /// X at which heavy units stop and start shelling.
    pub heavy_hold_x: f32,
    pub schedule: WaveSchedule,
}

/// Build the layout for a stage id (1-based).
pub fn build_stage(stage: u32) -> StageLayout {
    match stage {
        0 | 1 => build_outpost(),
        2 => build_crossing(),
        _ => build_stronghold(),
    }
}

/// Stage 1: "Outpost"
/// 3 waves, 7 grunts, a single gun tower. Riflemen only until the last wave.
fn build_outpost() -> StageLayout {
    StageLayout {
        towers: vec![TowerPlacement {
            kind: TowerKind::Gun,
            x: 260.0,
        }],
        heavy_hold_x: 1100.0,
        schedule: WaveSchedule {
            waves: vec![
                WaveEntry::at(0.0, vec![(GruntKind::Rifleman, 2)]),
                WaveEntry::at(8.0, vec![(GruntKind::Rifleman, 3)]),
                WaveEntry::at(
                    18.0,
                    vec![(GruntKind::Rifleman, 1), (GruntKind::Heavy, 1)],
                ),
            ],
        },
    }
}

/// Stage 2: "Crossing"
/// 4 waves, 12 grunts. Gun + frost towers; heavies park closer.
fn build_crossing() -> StageLayout {
    StageLayout {
        towers: vec![
            TowerPlacement {
                kind: TowerKind::Gun,
                x: 260.0,
            },
            TowerPlacement {
                kind: TowerKind::Frost,
                x: 420.0,
            },
        ],
        heavy_hold_x: 1000.0,
        schedule: WaveSchedule {
            waves: vec![
                WaveEntry::at(0.0, vec![(GruntKind::Rifleman, 3)]),
                WaveEntry::at(
                    7.0,
                    vec![(GruntKind::Rifleman, 2), (GruntKind::Heavy, 1)],
                ),
                WaveEntry::at(16.0, vec![(GruntKind::Rifleman, 4)]),
                WaveEntry::at(
                    26.0,
                    vec![(GruntKind::Heavy, 1), (GruntKind::Rifleman, 1)],
                ),
            ],
        },
    }
}

/// Stage 3: "Stronghold"
/// 5 waves, 20 grunts, all three tower kinds and tight spacing.
fn build_stronghold() -> StageLayout {
    StageLayout {
        towers: vec![
            TowerPlacement {
                kind: TowerKind::Gun,
                x: 240.0,
            },
            TowerPlacement {
                kind: TowerKind::Frost,
                x: 400.0,
            },
            TowerPlacement {
                kind: TowerKind::Mortar,
                x: 160.0,
            },
        ],
        heavy_hold_x: 950.0,
        schedule: WaveSchedule {
            waves: vec![
                WaveEntry::at(0.0, vec![(GruntKind::Rifleman, 4)]),
                WaveEntry::at(
                    6.0,
                    vec![(GruntKind::Rifleman, 2), (GruntKind::Heavy, 2)],
                ),
                WaveEntry::at(14.0, vec![(GruntKind::Rifleman, 5)]),
                WaveEntry::at(
                    22.0,
                    vec![(GruntKind::Heavy, 2), (GruntKind::Rifleman, 2)],
                ),
                WaveEntry::at(30.0, vec![(GruntKind::Rifleman, 3)]),
            ],
        },
    }
}
