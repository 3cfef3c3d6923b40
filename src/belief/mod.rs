//! Belief over the opponent's hidden information.
//!
//! ## Overview
//!
//! - `BeliefDistribution`: probability mass per candidate hidden value
//! - `BeliefModel`: owns a distribution and updates it by Bayesian
//!   filtering on the opponent's observed actions
//!
//! The planners treat the distribution as read-only during search and
//! sample from it to determinize hypothetical states.
//!
//! ```
//! use history_mcts::belief::{BeliefConfig, BeliefModel};
//!
//! let belief = BeliefModel::new(&[0u8, 1, 2], BeliefConfig::default());
//! let candidates = belief.distribution().conditioned_on(1);
//! assert_eq!(candidates, vec![(0, 0.5), (2, 0.5)]);
//! ```

pub mod distribution;
pub mod model;

pub use distribution::BeliefDistribution;
pub use model::{BeliefConfig, BeliefModel, BeliefUpdate};
