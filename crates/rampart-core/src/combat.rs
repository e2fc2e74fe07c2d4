//! The damage contract shared by every unit that can be hit.

use serde::{Deserialize, Serialize};

use crate::types::Bounds;

/// Slow effect: movement is scaled by `1 - strength` for `remaining_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slow {
    pub strength: f32,
    pub remaining_secs: f32,
}

/// Knockback effect: the unit is pushed along `direction` (-1 or +1) and cannot act.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knockback {
    pub remaining_secs: f32,
    pub direction: f32,
}

/// Everything a single hit applies to its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    pub damage: f32,
    pub slow: Option<Slow>,
    pub knockback: Option<Knockback>,
}

impl Hit {
    pub fn damage(damage: f32) -> Self {
        Self {
            damage,
            slow: None,
            knockback: None,
        }
    }

    pub fn with_slow(mut self, strength: f32, secs: f32) -> Self {
        self.slow = Some(Slow {
            strength,
            remaining_secs: secs,
        });
        self
    }

    pub fn with_knockback(mut self, secs: f32, direction: f32) -> Self {
        self.knockback = Some(Knockback {
            remaining_secs: secs,
            direction,
        });
        self
    }
}

/// Result of applying a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Target was dead, invincible, or the hit carried no damage.
    Ignored,
    Damaged,
    /// Health crossed to zero on this hit. Reported at most once per target.
    Killed,
}

impl DamageOutcome {
    pub fn landed(self) -> bool {
        !matches!(self, DamageOutcome::Ignored)
    }
}

/// Anything projectiles and explosions can hit.
pub trait Damageable {
    fn bounds(&self) -> Bounds;

    fn is_alive(&self) -> bool;

    /// Apply a hit. Must be a no-op returning [`DamageOutcome::Ignored`] once dead.
    fn take_hit(&mut self, hit: &Hit) -> DamageOutcome;
}
