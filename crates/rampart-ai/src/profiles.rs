//! Kind-specific behavioral profiles.
//!
//! Consolidates per-kind parameters for the grunt FSM and the tower system.

use glam::Vec2;

use rampart_core::enums::{GruntKind, TowerKind};

/// Parameters of a lobbed, area-damage shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellProfile {
    pub apex_height: f32,
    pub radius: f32,
}

/// Behavioral profile for a grunt kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GruntProfile {
    pub max_health: f32,
    pub half_extents: Vec2,
    /// Walking speed (units/s) before slow effects.
    pub speed: f32,
    /// Distance to the player at which a ranged grunt stops and shoots.
    /// `None` for units that walk to a hold X instead.
    pub firing_range: Option<f32>,
    pub fire_interval: f32,
    /// Cooldown armed on entering the attack state.
    pub first_shot_delay: f32,
    pub projectile_speed: f32,
    pub damage: f32,
    /// `Some` for units that lob shells instead of firing straight.
    pub shell: Option<ShellProfile>,
}

/// Get the behavioral profile for a grunt kind.
pub fn grunt_profile(kind: GruntKind) -> GruntProfile {
    use rampart_core::constants::*;

    match kind {
        GruntKind::Rifleman => GruntProfile {
            max_health: RIFLEMAN_MAX_HEALTH,
            half_extents: RIFLEMAN_HALF_EXTENTS,
            speed: RIFLEMAN_SPEED,
            firing_range: Some(RIFLEMAN_FIRING_RANGE),
            fire_interval: RIFLEMAN_FIRE_INTERVAL,
            first_shot_delay: RIFLEMAN_FIRST_SHOT_DELAY,
            projectile_speed: RIFLEMAN_BULLET_SPEED,
            damage: RIFLEMAN_BULLET_DAMAGE,
            shell: None,
        },
        GruntKind::Heavy => GruntProfile {
            max_health: HEAVY_MAX_HEALTH,
            half_extents: HEAVY_HALF_EXTENTS,
            speed: HEAVY_SPEED,
            firing_range: None,
            fire_interval: HEAVY_FIRE_INTERVAL,
            first_shot_delay: HEAVY_FIRST_SHOT_DELAY,
            projectile_speed: HEAVY_SHELL_SPEED,
            damage: HEAVY_SHELL_DAMAGE,
            shell: Some(ShellProfile {
                apex_height: HEAVY_SHELL_APEX,
                radius: HEAVY_SHELL_RADIUS,
            }),
        },
    }
}

/// Slow applied by a tower's shots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlowProfile {
    pub strength: f32,
    pub secs: f32,
}

/// Firing profile for a tower kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerProfile {
    pub range: f32,
    pub fire_interval: f32,
    pub damage: f32,
    pub projectile_speed: f32,
    pub slow: Option<SlowProfile>,
    pub shell: Option<ShellProfile>,
}

/// Get the firing profile for a tower kind.
pub fn tower_profile(kind: TowerKind) -> TowerProfile {
    use rampart_core::constants::*;

    match kind {
        TowerKind::Gun => TowerProfile {
            range: GUN_TOWER_RANGE,
            fire_interval: GUN_TOWER_INTERVAL,
            damage: GUN_TOWER_DAMAGE,
            projectile_speed: GUN_TOWER_SHOT_SPEED,
            slow: None,
            shell: None,
        },
        TowerKind::Frost => TowerProfile {
            range: FROST_TOWER_RANGE,
            fire_interval: FROST_TOWER_INTERVAL,
            damage: FROST_TOWER_DAMAGE,
            projectile_speed: FROST_TOWER_SHOT_SPEED,
            slow: Some(SlowProfile {
                strength: FROST_SLOW_STRENGTH,
                secs: FROST_SLOW_SECS,
            }),
            shell: None,
        },
        TowerKind::Mortar => TowerProfile {
            range: MORTAR_TOWER_RANGE,
            fire_interval: MORTAR_TOWER_INTERVAL,
            damage: MORTAR_TOWER_DAMAGE,
            projectile_speed: MORTAR_TOWER_SHELL_SPEED,
            slow: None,
            shell: Some(ShellProfile {
                apex_height: MORTAR_TOWER_APEX,
                radius: MORTAR_TOWER_RADIUS,
            }),
        },
    }
}
