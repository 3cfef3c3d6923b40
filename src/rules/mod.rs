//! Game model interface.
//!
//! Games implement `RulesEngine` (and `PerspectiveView` for their
//! observations) to define:
//! - Legal actions for each state and observation
//! - How actions modify state
//! - Payoffs, observations, and reconstruction of hypothetical states
//!
//! The planners call into these traits but never interpret game-specific
//! concepts directly.

pub mod engine;

pub use engine::{PerspectiveView, RulesEngine, RulesError};
