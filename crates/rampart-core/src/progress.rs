//! Persisted stage progress.

use serde::{Deserialize, Serialize};

/// Highest unlocked stage. Only ever increases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub highest_unlocked: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            highest_unlocked: 1,
        }
    }
}

impl Progress {
    /// Record that `stage` was completed, unlocking the next one.
    /// Returns whether the record changed.
    pub fn record_completion(&mut self, stage: u32) -> bool {
        let unlocked = stage.saturating_add(1);
        if unlocked > self.highest_unlocked {
            self.highest_unlocked = unlocked;
            true
        } else {
            false
        }
    }

    pub fn is_unlocked(&self, stage: u32) -> bool {
        stage <= self.highest_unlocked
    }
}
