//! Lookahead statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected across lookahead decisions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Turns decided.
    pub decisions: u32,

    /// Candidate plays simulated on a cloned state.
    pub simulations: u32,

    /// Decisions that fell back to discarding.
    pub discards: u32,

    /// Simulated plays that won the game.
    pub winning_simulations: u32,

    /// Best score of the most recent decision.
    pub last_best_score: Option<i32>,

    /// Total time spent deciding (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Average simulations per decision.
    #[must_use]
    pub fn simulations_per_decision(&self) -> f64 {
        if self.decisions == 0 {
            0.0
        } else {
            self.simulations as f64 / self.decisions as f64
        }
    }

    /// Calculate decisions per second.
    #[must_use]
    pub fn decisions_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.decisions as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
