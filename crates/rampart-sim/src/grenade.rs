//! Grenades: lobbed charges resolved in two phases.
//!
//! While flying, a grenade follows an [`Arc`]. Coming within proximity of a
//! live target, or meeting one of the arc's explosion conditions, detonates it
//! and records the impact point. The area damage is applied on the next check
//! and only once, guarded by the `damage_dealt` latch; the explosion then
//! lingers briefly for presentation and expires.

use glam::Vec2;

use rampart_core::combat::{DamageOutcome, Damageable};
use rampart_core::constants::*;
use rampart_core::enums::Owner;
use rampart_core::types::{Bounds, Timer};

use crate::ballistics::{Arc, Explosion};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GrenadeState {
    Flying,
    Exploded { impact: Vec2, linger: Timer },
}

/// Result of checking a grenade against its targets.
#[derive(Debug, Clone, PartialEq)]
pub enum GrenadeCheck<K> {
    /// Still in the air, nothing happened.
    Flying,
    /// Detonated this check; damage follows on the next one.
    Detonated(Explosion),
    /// The one-time area damage was applied.
    Damaged(Vec<(K, DamageOutcome)>),
    /// Already resolved or expired.
    Spent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Grenade {
    arc: Arc,
    position: Vec2,
    elapsed: Timer,
    owner: Owner,
    damage: f32,
    radius: f32,
    knockback_secs: f32,
    state: GrenadeState,
    damage_dealt: bool,
    expired: bool,
}

impl Grenade {
    pub fn new(
        origin: Vec2,
        target: Vec2,
        owner: Owner,
        damage: f32,
        radius: f32,
        apex_height: f32,
        speed: f32,
    ) -> Self {
        Self {
            arc: Arc::new(origin, target, apex_height, speed),
            position: origin,
            elapsed: Timer::new(),
            owner,
            damage,
            radius,
            knockback_secs: 0.0,
            state: GrenadeState::Flying,
            damage_dealt: false,
            expired: false,
        }
    }

    /// A grenade thrown by the player.
    pub fn thrown(origin: Vec2, target: Vec2) -> Self {
        Self::new(
            origin,
            target,
            Owner::Player,
            GRENADE_DAMAGE,
            GRENADE_RADIUS,
            GRENADE_APEX_HEIGHT,
            GRENADE_SPEED,
        )
        .with_knockback(GRENADE_KNOCKBACK_SECS)
    }

    /// A grenade tossed by the boss.
    pub fn tossed(origin: Vec2, target: Vec2) -> Self {
        Self::new(
            origin,
            target,
            Owner::Boss,
            BOSS_GRENADE_DAMAGE,
            BOSS_GRENADE_RADIUS,
            BOSS_GRENADE_APEX,
            BOSS_GRENADE_SPEED,
        )
    }

    /// Knock back every target the blast damages for `secs`.
    pub fn with_knockback(mut self, secs: f32) -> Self {
        self.knockback_secs = secs;
        self
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn state(&self) -> GrenadeState {
        self.state
    }

    pub fn is_exploded(&self) -> bool {
        matches!(self.state, GrenadeState::Exploded { .. })
    }

    pub fn damage_dealt(&self) -> bool {
        self.damage_dealt
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Remove the grenade without exploding it.
    pub fn deactivate(&mut self) {
        self.expired = true;
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, GRENADE_HALF_EXTENTS)
    }

    pub fn update(&mut self, dt: f32) {
        if self.expired {
            return;
        }
        match &mut self.state {
            GrenadeState::Flying => {
                self.elapsed.advance(dt);
                self.position = self.arc.position_at(self.elapsed.elapsed());
            }
            GrenadeState::Exploded { linger, .. } => {
                linger.advance(dt);
                if self.damage_dealt && linger.has_elapsed(EXPLOSION_LINGER_SECS) {
                    self.expired = true;
                }
            }
        }
    }

    /// Run one phase of the protocol against `targets`.
    pub fn check<'t, K, I, D>(&mut self, targets: I) -> GrenadeCheck<K>
    where
        I: IntoIterator<Item = (K, &'t mut D)>,
        D: Damageable + ?Sized + 't,
    {
        if self.expired {
            return GrenadeCheck::Spent;
        }
        match self.state {
            GrenadeState::Flying => {
                let proximity_sq = GRENADE_PROXIMITY * GRENADE_PROXIMITY;
                let near_target = targets.into_iter().any(|(_, target)| {
                    target.is_alive() && target.bounds().distance_sq(self.position) < proximity_sq
                });
                if near_target || self.arc.should_explode(self.elapsed.elapsed(), self.position) {
                    self.state = GrenadeState::Exploded {
                        impact: self.position,
                        linger: Timer::new(),
                    };
                    return GrenadeCheck::Detonated(self.explosion(self.position));
                }
                GrenadeCheck::Flying
            }
            GrenadeState::Exploded { impact, .. } => {
                if self.damage_dealt {
                    return GrenadeCheck::Spent;
                }
                self.damage_dealt = true;
                GrenadeCheck::Damaged(self.explosion(impact).apply(targets))
            }
        }
    }

    fn explosion(&self, origin: Vec2) -> Explosion {
        Explosion {
            origin,
            radius: self.radius,
            damage: self.damage,
            knockback_secs: self.knockback_secs,
            faction: self.owner.faction(),
        }
    }
}
