//! Boss behavior finite state machine.
//!
//! ```text
//! EnteringArena → Idle → PerformingBurst ⇄ BurstCooldown → PreGrenadeDelay
//!   → PerformingGrenadeToss ⇄ GrenadeTossCooldown → PrepareCharge → Charge → Idle
//! ```
//!
//! `Dead` is terminal and reachable from any state that is not invincible.
//! Every transition resets the state timer and runs the new state's entry
//! actions exactly once, on the edge. Per-state behavior is a `match` over
//! [`BossState`]; the FSM reports what it wants done as [`BossAction`]s and
//! leaves spawning projectiles to the simulation.

use glam::Vec2;

use rampart_core::combat::{DamageOutcome, Damageable, Hit};
use rampart_core::components::{Health, Unit};
use rampart_core::constants::*;
use rampart_core::enums::{BossState, TossSide};
use rampart_core::types::{ArenaGeometry, Bounds, Timer};

/// What the boss sees each tick.
#[derive(Debug, Clone, Copy)]
pub struct BossContext {
    pub player_position: Vec2,
    pub arena: ArenaGeometry,
}

/// Side effects requested by the FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BossAction {
    StateChanged { from: BossState, to: BossState },
    ArrivedInArena,
    /// Fire `count` straight bullets toward `target_x`.
    FireVolley {
        origin: Vec2,
        target_x: f32,
        count: u32,
    },
    TossGrenade { origin: Vec2, target: Vec2 },
    ChargeWindup { direction: f32, distance: f32 },
    ChargeStarted,
}

#[derive(Debug, Clone)]
pub struct BossFsm {
    state: BossState,
    timer: Timer,
    body: Unit,
    stop_x: f32,
    facing: f32,
    burst_count: u32,
    grenade_count: u32,
    toss_side: TossSide,
    charge_direction: f32,
    charge_remaining: f32,
    charge_contact_spent: bool,
}

impl BossFsm {
    /// Place the boss off-screen right and compute where it stops.
    pub fn initialize(arena: &ArenaGeometry, max_health: f32) -> Self {
        let camera_left = arena.boss_camera_left();
        let camera_right = camera_left + arena.camera_width;
        let stop_x = camera_left + arena.camera_width * BOSS_STOP_FRACTION;
        let spawn = Vec2::new(
            camera_right + BOSS_SPAWN_OFFSET,
            arena.standing_y(BOSS_HALF_EXTENTS),
        );
        Self {
            state: BossState::EnteringArena,
            timer: Timer::new(),
            body: Unit::new(spawn, BOSS_HALF_EXTENTS, max_health),
            stop_x,
            facing: -1.0,
            burst_count: 0,
            grenade_count: 0,
            toss_side: TossSide::default(),
            charge_direction: 0.0,
            charge_remaining: 0.0,
            charge_contact_spent: false,
        }
    }

    pub fn state(&self) -> BossState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn health(&self) -> &Health {
        self.body.health()
    }

    pub fn stop_x(&self) -> f32 {
        self.stop_x
    }

    pub fn is_invincible(&self) -> bool {
        self.state.is_invincible()
    }

    pub fn is_dead(&self) -> bool {
        self.state == BossState::Dead
    }

    pub fn state_elapsed(&self) -> f32 {
        self.timer.elapsed()
    }

    pub fn burst_count(&self) -> u32 {
        self.burst_count
    }

    pub fn grenade_count(&self) -> u32 {
        self.grenade_count
    }

    pub fn charge_remaining(&self) -> f32 {
        self.charge_remaining
    }

    /// Claim the single contact hit allowed per charge.
    pub fn claim_charge_contact(&mut self) -> bool {
        if self.state != BossState::Charge || self.charge_contact_spent {
            return false;
        }
        self.charge_contact_spent = true;
        true
    }

    /// Advance the shared timer and run the current state's update.
    pub fn update(&mut self, dt: f32, ctx: &BossContext) -> Vec<BossAction> {
        let mut actions = Vec::new();
        if self.is_dead() {
            return actions;
        }
        self.timer.advance(dt);

        if !matches!(self.state, BossState::Charge | BossState::PrepareCharge) {
            let dx = ctx.player_position.x - self.body.position.x;
            if dx != 0.0 {
                self.facing = dx.signum();
            }
        }

        match self.state {
            BossState::EnteringArena => {
                let step = BOSS_ENTRY_SPEED * dt.max(0.0);
                let dx = self.stop_x - self.body.position.x;
                if dx.abs() <= step {
                    self.body.position.x = self.stop_x;
                    actions.push(BossAction::ArrivedInArena);
                    self.transition(BossState::Idle, ctx, &mut actions);
                } else {
                    self.body.position.x += step * dx.signum();
                }
            }
            BossState::Idle => {
                if self.timer.has_elapsed(BOSS_IDLE_SECS) {
                    self.burst_count = 0;
                    self.transition(BossState::PerformingBurst, ctx, &mut actions);
                }
            }
            BossState::PerformingBurst => {
                if self.timer.has_elapsed(BOSS_BURST_SECS) {
                    self.transition(BossState::BurstCooldown, ctx, &mut actions);
                }
            }
            BossState::BurstCooldown => {
                if self.timer.has_elapsed(BOSS_BURST_COOLDOWN_SECS) {
                    let next = if self.burst_count < BOSS_BURSTS_PER_CYCLE {
                        BossState::PerformingBurst
                    } else {
                        BossState::PreGrenadeDelay
                    };
                    self.transition(next, ctx, &mut actions);
                }
            }
            BossState::PreGrenadeDelay => {
                if self.timer.has_elapsed(BOSS_PRE_GRENADE_SECS) {
                    self.transition(BossState::PerformingGrenadeToss, ctx, &mut actions);
                }
            }
            BossState::PerformingGrenadeToss => {
                if self.timer.has_elapsed(BOSS_TOSS_SECS) {
                    self.transition(BossState::GrenadeTossCooldown, ctx, &mut actions);
                }
            }
            BossState::GrenadeTossCooldown => {
                if self.timer.has_elapsed(BOSS_TOSS_COOLDOWN_SECS) {
                    let next = if self.grenade_count < BOSS_GRENADES_PER_CYCLE {
                        BossState::PerformingGrenadeToss
                    } else {
                        BossState::PrepareCharge
                    };
                    self.transition(next, ctx, &mut actions);
                }
            }
            BossState::PrepareCharge => {
                if self.timer.has_elapsed(BOSS_PREPARE_CHARGE_SECS) {
                    self.transition(BossState::Charge, ctx, &mut actions);
                }
            }
            BossState::Charge => {
                let step = (BOSS_CHARGE_SPEED * dt.max(0.0)).min(self.charge_remaining);
                self.body.position.x += self.charge_direction * step;
                self.charge_remaining -= step;
                if self.charge_remaining <= 0.0 {
                    self.charge_remaining = 0.0;
                    self.transition(BossState::Idle, ctx, &mut actions);
                }
            }
            BossState::Dead => {}
        }

        actions
    }

    /// Apply damage. Ignored while invincible; the killing hit forces `Dead`.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.is_invincible() {
            return DamageOutcome::Ignored;
        }
        let outcome = self.body.take_hit(&Hit::damage(amount));
        if outcome == DamageOutcome::Killed {
            self.state = BossState::Dead;
            self.timer.reset();
            self.charge_remaining = 0.0;
        }
        outcome
    }

    fn transition(&mut self, next: BossState, ctx: &BossContext, actions: &mut Vec<BossAction>) {
        let from = self.state;
        self.state = next;
        self.timer.reset();
        actions.push(BossAction::StateChanged { from, to: next });
        self.on_enter(next, ctx, actions);
    }

    /// Entry actions. Runs once per transition edge.
    fn on_enter(&mut self, state: BossState, ctx: &BossContext, actions: &mut Vec<BossAction>) {
        match state {
            BossState::PerformingBurst => {
                self.burst_count += 1;
                actions.push(BossAction::FireVolley {
                    origin: self.muzzle(),
                    target_x: ctx.player_position.x,
                    count: BOSS_VOLLEY_SIZE,
                });
            }
            BossState::PreGrenadeDelay => {
                self.grenade_count = 0;
                self.toss_side = TossSide::default();
            }
            BossState::PerformingGrenadeToss => {
                self.grenade_count += 1;
                let target = Vec2::new(
                    ctx.player_position.x + self.toss_side.sign() * BOSS_GRENADE_SIDE_OFFSET,
                    ctx.arena.ground_y,
                );
                let origin = self.body.position + Vec2::new(0.0, self.body.half_extents.y);
                actions.push(BossAction::TossGrenade { origin, target });
                self.toss_side = self.toss_side.flipped();
            }
            BossState::PrepareCharge => {
                let (direction, distance) = self.plan_charge(ctx);
                self.charge_direction = direction;
                self.charge_remaining = distance;
                actions.push(BossAction::ChargeWindup {
                    direction,
                    distance,
                });
            }
            BossState::Charge => {
                self.charge_contact_spent = false;
                actions.push(BossAction::ChargeStarted);
            }
            BossState::EnteringArena
            | BossState::Idle
            | BossState::BurstCooldown
            | BossState::GrenadeTossCooldown
            | BossState::Dead => {}
        }
    }

    /// Direction and distance toward the player's position right now, kept
    /// inside the locked camera so the boss never charges off-screen.
    fn plan_charge(&self, ctx: &BossContext) -> (f32, f32) {
        let half = self.body.half_extents.x;
        let min_x = ctx.arena.boss_camera_left() + half;
        let max_x = (ctx.arena.boss_camera_left() + ctx.arena.camera_width - half).max(min_x);
        let goal = ctx.player_position.x.clamp(min_x, max_x);
        let dx = goal - self.body.position.x;
        let direction = if dx == 0.0 { self.facing } else { dx.signum() };
        (direction, dx.abs())
    }

    fn muzzle(&self) -> Vec2 {
        self.body.position + Vec2::new(self.facing * self.body.half_extents.x, 0.0)
    }
}

impl Damageable for BossFsm {
    fn bounds(&self) -> Bounds {
        Bounds::new(self.body.position, self.body.half_extents)
    }

    fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    /// The boss shrugs off slow and knockback; only damage applies.
    fn take_hit(&mut self, hit: &Hit) -> DamageOutcome {
        self.take_damage(hit.damage)
    }
}
