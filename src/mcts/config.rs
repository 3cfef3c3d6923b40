//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

use crate::belief::BeliefConfig;
use crate::rules::PerspectiveView;

use super::policy::{ActionEligibility, FixedWidth, Unrestricted};
use super::widening::{ProgressiveWidening, SimilarityWidening};

/// Which legal actions selection may consider at each history.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Eligibility {
    /// Every legal action.
    Unrestricted,

    /// A fixed random subset of `width` actions per history.
    FixedWidth { width: usize },

    /// Prefix of a random permutation, `floor(theta1 * visits^theta2)` long.
    ProgressiveWidening { theta1: f64, theta2: f64 },

    /// Widening toward the neighbourhood of the best admitted action.
    SimilarityWidening { theta1: f64, theta2: f64 },
}

impl Default for Eligibility {
    fn default() -> Self {
        Self::Unrestricted
    }
}

impl Eligibility {
    /// Instantiate the matching policy.
    ///
    /// # Panics
    ///
    /// Panics on a fixed width of zero.
    pub fn build<O: PerspectiveView + 'static>(&self) -> Box<dyn ActionEligibility<O>> {
        match *self {
            Self::Unrestricted => Box::new(Unrestricted),
            Self::FixedWidth { width } => Box::new(FixedWidth::new(width)),
            Self::ProgressiveWidening { theta1, theta2 } => {
                Box::new(ProgressiveWidening::new(theta1, theta2))
            }
            Self::SimilarityWidening { theta1, theta2 } => {
                Box::new(SimilarityWidening::new(theta1, theta2))
            }
        }
    }
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Simulations per decision.
    pub simulations: u32,

    /// UCB exploration constant `c`.
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Random seed for determinization, rollouts, and policy sampling.
    /// Same seed produces deterministic searches.
    pub seed: u64,

    /// Likelihood heuristic for the opponent belief.
    pub belief: BeliefConfig,

    /// Action-restriction policy.
    pub eligibility: Eligibility,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            simulations: 100,
            exploration_constant: 1.0,
            seed: 42,
            belief: BeliefConfig::default(),
            eligibility: Eligibility::Unrestricted,
        }
    }
}

impl MctsConfig {
    pub fn with_simulations(mut self, simulations: u32) -> Self {
        self.simulations = simulations;
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_belief(mut self, belief: BeliefConfig) -> Self {
        self.belief = belief;
        self
    }

    pub fn with_eligibility(mut self, eligibility: Eligibility) -> Self {
        self.eligibility = eligibility;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kuhn::KuhnObservation;

    #[test]
    fn test_default_config() {
        let config = MctsConfig::default();
        assert_eq!(config.simulations, 100);
        assert_eq!(config.exploration_constant, 1.0);
        assert_eq!(config.seed, 42);
        assert_eq!(config.eligibility, Eligibility::Unrestricted);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MctsConfig::default()
            .with_simulations(1000)
            .with_exploration(2.0)
            .with_seed(123)
            .with_eligibility(Eligibility::FixedWidth { width: 4 });

        assert_eq!(config.simulations, 1000);
        assert_eq!(config.exploration_constant, 2.0);
        assert_eq!(config.seed, 123);
        assert_eq!(config.eligibility, Eligibility::FixedWidth { width: 4 });
    }

    #[test]
    fn test_build_names() {
        let cases = [
            (Eligibility::Unrestricted, "unrestricted"),
            (Eligibility::FixedWidth { width: 2 }, "fixed_width"),
            (
                Eligibility::ProgressiveWidening { theta1: 1.5, theta2: 0.5 },
                "progressive_widening",
            ),
            (
                Eligibility::SimilarityWidening { theta1: 1.5, theta2: 0.5 },
                "similarity_widening",
            ),
        ];

        for (eligibility, name) in cases {
            let policy = eligibility.build::<KuhnObservation>();
            assert_eq!(policy.name(), name);
        }
    }

    #[test]
    fn test_serialization() {
        let config = MctsConfig::default()
            .with_eligibility(Eligibility::ProgressiveWidening { theta1: 1.5, theta2: 0.5 });
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""kind":"progressive_widening""#));

        let deserialized: MctsConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
