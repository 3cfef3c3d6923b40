//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one decision.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Determinized simulations run.
    pub simulations: u32,

    /// Histories registered for the first time.
    pub histories_expanded: u32,

    /// Random rollouts played from newly registered histories.
    pub rollouts: u32,

    /// Deepest recursion reached below the root.
    pub max_depth: u16,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record that a simulation reached `depth`.
    pub fn observe_depth(&mut self, depth: u16) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of simulations that ended in a rollout.
    #[must_use]
    pub fn rollout_rate(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.rollouts as f64 / self.simulations as f64
        }
    }
}
