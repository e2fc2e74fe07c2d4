//! Per-tick input snapshot and press-edge detection.
//!
//! The simulation never polls devices. A platform layer samples raw button
//! state once per tick and feeds it through an [`InputTracker`], which turns
//! held buttons into "just pressed" edges.

use serde::{Deserialize, Serialize};

/// Raw device state sampled by the platform layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Horizontal axis in `[-1, 1]`.
    pub move_axis: f32,
    pub jump_held: bool,
    pub fire_held: bool,
    pub grenade_held: bool,
}

/// What the simulation reads for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub move_axis: f32,
    /// True only on the first tick of a jump press.
    pub jump: bool,
    pub fire_held: bool,
    pub fire_just_pressed: bool,
    pub grenade_just_pressed: bool,
}

/// Derives press edges from consecutive raw samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputTracker {
    previous: RawInput,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample one tick. Each just-pressed flag is true on exactly the first
    /// tick its button is held, and stays false until release and re-press.
    pub fn sample(&mut self, raw: RawInput) -> InputSnapshot {
        let move_axis = if raw.move_axis.is_finite() {
            raw.move_axis.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let snapshot = InputSnapshot {
            move_axis,
            jump: raw.jump_held && !self.previous.jump_held,
            fire_held: raw.fire_held,
            fire_just_pressed: raw.fire_held && !self.previous.fire_held,
            grenade_just_pressed: raw.grenade_held && !self.previous.grenade_held,
        };
        self.previous = raw;
        snapshot
    }
}
