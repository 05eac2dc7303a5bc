use rand::Rng;

use crate::constants::{LOADING_COMPLETE, LOADING_MAX_INCREMENT};

/// Progress counter shown while the scene "loads".
///
/// Purely cosmetic: each step adds a random amount in
/// `[0, LOADING_MAX_INCREMENT)` until the counter reaches 100.
#[derive(Clone, Debug, Default)]
pub struct LoadingSequence {
    progress: f64,
}

impl LoadingSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one random increment. Returns true once progress is complete;
    /// progress is clamped to exactly 100 at that point.
    pub fn step(&mut self, rng: &mut impl Rng) -> bool {
        if self.is_complete() {
            return true;
        }
        self.progress += rng.random_range(0.0..LOADING_MAX_INCREMENT);
        if self.progress >= LOADING_COMPLETE {
            self.progress = LOADING_COMPLETE;
        }
        self.is_complete()
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= LOADING_COMPLETE
    }
}
