//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Boss behaviour state. `Dead` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossState {
    /// Walking in from off-screen to the stop position. Invincible.
    #[default]
    EnteringArena,
    Idle,
    /// Fires one volley on entry.
    PerformingBurst,
    BurstCooldown,
    PreGrenadeDelay,
    /// Tosses one grenade on entry, alternating target side.
    PerformingGrenadeToss,
    GrenadeTossCooldown,
    /// Freezes the charge direction and distance on entry.
    PrepareCharge,
    Charge,
    Dead,
}

impl BossState {
    pub fn is_invincible(self) -> bool {
        matches!(self, BossState::EnteringArena | BossState::Dead)
    }
}

/// Grunt enemy archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GruntKind {
    /// Ranged infantry: advances until in firing range, then shoots bullets.
    Rifleman,
    /// Mobile heavy unit: advances to a hold X, then lobs shells.
    Heavy,
}

/// Grunt behaviour state. `Dead` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GruntState {
    #[default]
    Moving,
    /// Rifleman in firing range.
    Attacking,
    /// Heavy unit parked at its hold X.
    Stationary,
    Dead,
}

/// Player-side emplacement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// Linear shots, direct damage.
    Gun,
    /// Linear shots that slow.
    Frost,
    /// Lobbed shells with area damage.
    Mortar,
}

/// Which side a projectile fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Player,
    Hostile,
}

/// Who fired a projectile. Used to clear a boss's projectiles on its death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Tower,
    Grunt,
    Boss,
}

impl Owner {
    pub fn faction(self) -> Faction {
        match self {
            Owner::Player | Owner::Tower => Faction::Player,
            Owner::Grunt | Owner::Boss => Faction::Hostile,
        }
    }
}

/// Boss grenade target side, alternating each toss.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TossSide {
    #[default]
    Left,
    Right,
}

impl TossSide {
    pub fn flipped(self) -> Self {
        match self {
            TossSide::Left => TossSide::Right,
            TossSide::Right => TossSide::Left,
        }
    }

    /// -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            TossSide::Left => -1.0,
            TossSide::Right => 1.0,
        }
    }
}

/// Pickup type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    GrenadeAmmo,
}

/// Falling-physics sub-state of a pickup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupPhase {
    #[default]
    Falling,
    Resting,
}

/// Top-level progress of a fight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatPhase {
    /// Grunt waves are in play.
    #[default]
    Skirmish,
    /// All tracked enemies are down; the wall barrier is rising.
    WallRising,
    /// Barrier is up; the boss intro sequence is running.
    BossIntro,
    BossFight,
    /// Boss is dead; the defeat sequence is running.
    BossDefeated,
    Victory,
    Defeat,
}

/// Stable key for the visual a presentation layer draws for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualKey {
    Player,
    Rifleman,
    Heavy,
    GunTower,
    FrostTower,
    MortarTower,
    Boss,
    PlayerShot,
    FrostShot,
    EnemyBullet,
    BossBullet,
    Shell,
    Grenade,
    Explosion,
    HealthPickup,
    GrenadePickup,
    Wall,
}
