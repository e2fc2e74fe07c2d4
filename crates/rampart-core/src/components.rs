//! Unit components.
//!
//! `Unit` is the body every combatant shares. Grunt and pickup components are
//! plain data attached to hecs entities; game logic lives in systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::combat::{DamageOutcome, Damageable, Hit, Knockback, Slow};
use crate::enums::*;
use crate::types::{Bounds, Timer};

/// Health clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        Self { current: max, max }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtract `amount`. Reports `Killed` only on the hit that reaches zero.
    pub fn apply_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_depleted() || !amount.is_finite() || amount <= 0.0 {
            return DamageOutcome::Ignored;
        }
        self.current = (self.current - amount).clamp(0.0, self.max);
        if self.is_depleted() {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged
        }
    }

    /// Restore health. A depleted pool stays depleted.
    pub fn heal(&mut self, amount: f32) {
        if self.is_depleted() || !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.current = (self.current + amount).clamp(0.0, self.max);
    }
}

/// Timed effects on a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusEffects {
    pub slow: Option<Slow>,
    pub knockback: Option<Knockback>,
    /// Seconds until the next attack is allowed.
    pub attack_cooldown: f32,
}

impl StatusEffects {
    /// Count all timers down by `dt`, dropping expired effects.
    pub fn tick(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        if let Some(slow) = &mut self.slow {
            slow.remaining_secs -= dt;
            if slow.remaining_secs <= 0.0 {
                self.slow = None;
            }
        }
        if let Some(knockback) = &mut self.knockback {
            knockback.remaining_secs -= dt;
            if knockback.remaining_secs <= 0.0 {
                self.knockback = None;
            }
        }
    }

    pub fn is_knocked_back(&self) -> bool {
        self.knockback.is_some()
    }

    /// The uniform attack gate shared by every unit kind.
    pub fn can_act(&self) -> bool {
        self.attack_cooldown <= 0.0 && !self.is_knocked_back()
    }

    /// Multiplier applied to movement speed.
    pub fn speed_multiplier(&self) -> f32 {
        self.slow
            .map_or(1.0, |slow| (1.0 - slow.strength).clamp(0.0, 1.0))
    }

    /// Merge a new slow: the stronger one wins, ties keep the longer duration.
    pub fn apply_slow(&mut self, incoming: Slow) {
        let strength = incoming.strength.clamp(0.0, 0.95);
        let incoming = Slow {
            strength,
            remaining_secs: incoming.remaining_secs.max(0.0),
        };
        self.slow = match self.slow {
            Some(current) if current.strength > incoming.strength => Some(current),
            Some(current) if current.strength == incoming.strength => Some(Slow {
                strength,
                remaining_secs: current.remaining_secs.max(incoming.remaining_secs),
            }),
            _ => Some(incoming),
        };
    }

    pub fn apply_knockback(&mut self, incoming: Knockback) {
        if incoming.remaining_secs > 0.0 {
            self.knockback = Some(incoming);
        }
    }
}

/// A combatant body: position, bounds, health, alive flag and status effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub position: Vec2,
    pub half_extents: Vec2,
    health: Health,
    alive: bool,
    pub status: StatusEffects,
}

impl Unit {
    pub fn new(position: Vec2, half_extents: Vec2, max_health: f32) -> Self {
        let health = Health::new(max_health);
        Self {
            position,
            half_extents,
            alive: !health.is_depleted(),
            health,
            status: StatusEffects::default(),
        }
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn heal(&mut self, amount: f32) {
        if self.alive {
            self.health.heal(amount);
        }
    }

    /// Alive and not locked out by cooldown or knockback.
    pub fn can_act(&self) -> bool {
        self.alive && self.status.can_act()
    }
}

impl Damageable for Unit {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.half_extents)
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn take_hit(&mut self, hit: &Hit) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }
        let outcome = self.health.apply_damage(hit.damage);
        match outcome {
            DamageOutcome::Killed => {
                self.alive = false;
                self.status = StatusEffects::default();
            }
            DamageOutcome::Damaged => {
                if let Some(slow) = hit.slow {
                    self.status.apply_slow(slow);
                }
                if let Some(knockback) = hit.knockback {
                    self.status.apply_knockback(knockback);
                }
            }
            DamageOutcome::Ignored => {}
        }
        outcome
    }
}

/// Grunt enemy brain state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: GruntKind,
    pub state: GruntState,
    /// X at which a heavy unit parks. Unused by riflemen.
    pub hold_x: f32,
    /// Time in the current state.
    pub state_timer: Timer,
    /// Set once the death drop roll has been made.
    pub drop_checked: bool,
}

impl Enemy {
    pub fn new(kind: GruntKind, hold_x: f32) -> Self {
        Self {
            kind,
            state: GruntState::default(),
            hold_x,
            state_timer: Timer::new(),
            drop_checked: false,
        }
    }
}

/// A collectible lying in (or falling into) the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub position: Vec2,
    pub velocity_y: f32,
    pub phase: PickupPhase,
    /// Time spent resting on the floor.
    pub resting: Timer,
    pub collected: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            velocity_y: 0.0,
            phase: PickupPhase::Falling,
            resting: Timer::new(),
            collected: false,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, crate::constants::PICKUP_HALF_EXTENTS)
    }
}
