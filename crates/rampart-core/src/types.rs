//! Fundamental geometric and timing types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box described by its center and half extents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Bounds {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Box-vs-box overlap. Touching edges do not count.
    pub fn intersects(&self, other: &Bounds) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x < reach.x && delta.y < reach.y
    }

    /// Squared distance from `point` to the nearest point of this box.
    /// Zero when the point is inside.
    pub fn distance_sq(&self, point: Vec2) -> f32 {
        let nearest = point.clamp(self.min(), self.max());
        nearest.distance_squared(point)
    }
}

/// Monotonic elapsed-time accumulator fed a variable step.
///
/// Negative and non-finite steps are ignored, so elapsed time never decreases
/// except through an explicit [`Timer::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    elapsed: f32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Whether at least `secs` have accumulated since the last reset.
    pub fn has_elapsed(&self, secs: f32) -> bool {
        self.elapsed >= secs
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of processed ticks (ticks skipped by the cutscene gate excluded).
    pub tick: u64,
    /// Elapsed combat time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

/// Horizontal extent of the playable arena plus the floor height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaGeometry {
    pub left: f32,
    pub right: f32,
    pub ground_y: f32,
    pub camera_width: f32,
}

impl Default for ArenaGeometry {
    fn default() -> Self {
        use crate::constants::*;
        Self {
            left: ARENA_LEFT,
            right: ARENA_RIGHT,
            ground_y: ARENA_GROUND_Y,
            camera_width: CAMERA_WIDTH,
        }
    }
}

impl ArenaGeometry {
    /// Left edge of the camera once it locks onto the boss arena at the right end.
    pub fn boss_camera_left(&self) -> f32 {
        (self.right - self.camera_width).max(self.left)
    }

    /// Whether a point has left the arena by more than `margin`.
    pub fn is_out_of_bounds(&self, point: Vec2, margin: f32) -> bool {
        point.x < self.left - margin
            || point.x > self.right + margin
            || point.y < self.ground_y - margin
            || point.y > self.ground_y + crate::constants::CAMERA_HEIGHT + margin
    }

    /// Y coordinate of a body's center when standing on the floor.
    pub fn standing_y(&self, half_extents: Vec2) -> f32 {
        self.ground_y + half_extents.y
    }
}
