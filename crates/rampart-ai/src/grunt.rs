//! Grunt behavior finite state machine.
//!
//! Pure functions that compute state transitions, walking displacement and
//! fire orders for grunt enemies. Riflemen go `Moving → Attacking` once the
//! player is within firing range; heavy units go `Moving → Stationary` at
//! their hold X. Both stay in their attack state until destroyed.

use glam::Vec2;

use rampart_core::enums::{GruntKind, GruntState};

use crate::profiles::{grunt_profile, GruntProfile};

/// Input to the grunt FSM for a single entity.
pub struct GruntContext {
    pub kind: GruntKind,
    pub state: GruntState,
    pub position: Vec2,
    pub hold_x: f32,
    pub player_position: Vec2,
    pub player_alive: bool,
    /// The uniform gate: cooldown elapsed and not knocked back.
    pub can_act: bool,
    pub knocked_back: bool,
    pub speed_multiplier: f32,
    pub dt: f32,
}

/// What the grunt wants to fire this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireOrder {
    /// Straight shot toward `target_x`.
    Bullet { origin: Vec2, target_x: f32 },
    /// Lobbed shell landing at `target`.
    Shell { origin: Vec2, target: Vec2 },
}

/// Output from the grunt FSM.
pub struct GruntUpdate {
    pub new_state: GruntState,
    pub state_changed: bool,
    pub displacement_x: f32,
    pub fire: Option<FireOrder>,
}

impl GruntUpdate {
    fn unchanged(state: GruntState) -> Self {
        Self {
            new_state: state,
            state_changed: false,
            displacement_x: 0.0,
            fire: None,
        }
    }

    fn transition(state: GruntState, displacement_x: f32) -> Self {
        Self {
            new_state: state,
            state_changed: true,
            displacement_x,
            fire: None,
        }
    }
}

/// Evaluate the FSM for one grunt.
pub fn evaluate(ctx: &GruntContext) -> GruntUpdate {
    // Terminal state; knocked-back units are pushed by the sim, not the AI.
    if ctx.state == GruntState::Dead || ctx.knocked_back {
        return GruntUpdate::unchanged(ctx.state);
    }

    let profile = grunt_profile(ctx.kind);

    match ctx.state {
        GruntState::Moving => evaluate_moving(ctx, &profile),
        GruntState::Attacking => evaluate_attacking(ctx),
        GruntState::Stationary => evaluate_stationary(ctx),
        GruntState::Dead => GruntUpdate::unchanged(ctx.state),
    }
}

fn evaluate_moving(ctx: &GruntContext, profile: &GruntProfile) -> GruntUpdate {
    let step = (profile.speed * ctx.speed_multiplier * ctx.dt).max(0.0);

    match profile.firing_range {
        Some(range) => {
            let dx = ctx.player_position.x - ctx.position.x;
            if dx.abs() <= range {
                return GruntUpdate::transition(GruntState::Attacking, 0.0);
            }
            GruntUpdate {
                new_state: ctx.state,
                state_changed: false,
                displacement_x: step * dx.signum(),
                fire: None,
            }
        }
        None => {
            let dx = ctx.hold_x - ctx.position.x;
            if dx.abs() <= step {
                // Snap onto the hold position on arrival.
                return GruntUpdate::transition(GruntState::Stationary, dx);
            }
            GruntUpdate {
                new_state: ctx.state,
                state_changed: false,
                displacement_x: step * dx.signum(),
                fire: None,
            }
        }
    }
}

fn evaluate_attacking(ctx: &GruntContext) -> GruntUpdate {
    let mut update = GruntUpdate::unchanged(ctx.state);
    if ctx.can_act && ctx.player_alive {
        update.fire = Some(FireOrder::Bullet {
            origin: ctx.position,
            target_x: ctx.player_position.x,
        });
    }
    update
}

fn evaluate_stationary(ctx: &GruntContext) -> GruntUpdate {
    let mut update = GruntUpdate::unchanged(ctx.state);
    if ctx.can_act && ctx.player_alive {
        update.fire = Some(FireOrder::Shell {
            origin: ctx.position,
            target: ctx.player_position,
        });
    }
    update
}
