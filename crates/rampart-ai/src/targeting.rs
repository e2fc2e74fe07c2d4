//! Tower target acquisition.
//!
//! A tower locks onto the first valid candidate in iteration order (no
//! distance sort). Validity is only re-checked every `recheck_secs`, and a
//! target that is still valid at a re-check is kept.

/// Target selector generic over the id type of the candidates.
#[derive(Debug, Clone)]
pub struct TargetSelector<T> {
    current: Option<T>,
    recheck_secs: f32,
    until_recheck: f32,
}

impl<T: Copy> TargetSelector<T> {
    pub fn new(recheck_secs: f32) -> Self {
        Self {
            current: None,
            recheck_secs: recheck_secs.max(f32::EPSILON),
            // First update evaluates immediately.
            until_recheck: 0.0,
        }
    }

    pub fn current(&self) -> Option<T> {
        self.current
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Advance by `dt`; on a re-check tick keep the current target if
    /// `is_valid` still holds, otherwise take the first valid candidate.
    pub fn update<I, F>(&mut self, dt: f32, is_valid: F, candidates: I) -> Option<T>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> bool,
    {
        if dt.is_finite() && dt > 0.0 {
            self.until_recheck -= dt;
        }
        if self.until_recheck > 0.0 {
            return self.current;
        }
        self.until_recheck = self.recheck_secs;

        if let Some(current) = self.current {
            if is_valid(&current) {
                return self.current;
            }
        }
        self.current = candidates.into_iter().find(|candidate| is_valid(candidate));
        self.current
    }
}
