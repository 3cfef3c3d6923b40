//! Forward search configuration parameters.

use serde::{Deserialize, Serialize};

use crate::belief::BeliefConfig;

/// Forward search configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForwardSearchConfig {
    /// Plies searched before falling back to the leaf heuristic.
    ///
    /// At zero the root itself is a leaf: `evaluate` reports no action and
    /// `choose_action` plays the first legal one.
    pub max_depth: u32,

    /// Hard ceiling on recursive calls per decision, shared by all branches.
    pub node_budget: u32,

    /// Likelihood heuristic for the opponent belief.
    pub belief: BeliefConfig,
}

impl Default for ForwardSearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            node_budget: 1000,
            belief: BeliefConfig::default(),
        }
    }
}

impl ForwardSearchConfig {
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_node_budget(mut self, budget: u32) -> Self {
        self.node_budget = budget;
        self
    }

    pub fn with_belief(mut self, belief: BeliefConfig) -> Self {
        self.belief = belief;
        self
    }
}
