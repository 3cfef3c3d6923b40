//! # history-mcts
//!
//! Online planners for two-player games with one hidden value per seat.
//!
//! ## Design Principles
//!
//! 1. **Histories, not states**: The searching player only ever sees its
//!    own observation sequence. The opponent's hidden value enters search
//!    through an explicit belief, never by peeking at the real state.
//!
//! 2. **Game-Agnostic**: Planners run against any `RulesEngine`. Kuhn
//!    poker is the bundled test harness.
//!
//! 3. **One engine, pluggable restriction**: History-MCTS is a single
//!    search parameterized by an `ActionEligibility` policy rather than a
//!    family of near-duplicate searches.
//!
//! ## Architecture
//!
//! - **Belief Model**: Bayesian filtering of the opponent's hidden value
//!   from observed bet increments, with a configurable likelihood heuristic.
//!
//! - **Forward Search**: Depth- and budget-limited expectimax over
//!   belief-weighted reconstructions of the current observation.
//!
//! - **History-MCTS**: Tables keyed by (history, action), per-simulation
//!   determinization, random rollouts, incremental-mean backups.
//!
//! - **Persistent Data Structures**: O(1) history cloning via `im-rs`.
//!
//! ## Modules
//!
//! - `core`: Players, actions, histories, RNG
//! - `rules`: `RulesEngine` and `PerspectiveView` traits for games
//! - `games`: Kuhn poker
//! - `belief`: Belief distribution and Bayesian update
//! - `forward`: Forward search engine
//! - `mcts`: History-MCTS and its eligibility policies
//! - `agents`: Decision-maker trait and baseline players
//! - `simulator`: Repeated play and outcome statistics

pub mod agents;
pub mod belief;
pub mod core;
pub mod forward;
pub mod games;
pub mod mcts;
pub mod rules;
pub mod simulator;

// Re-export commonly used types
pub use crate::core::{Action, GameRng, History, PlayerId, PlayerMap};

pub use crate::rules::{PerspectiveView, RulesEngine, RulesError};

pub use crate::belief::{BeliefConfig, BeliefDistribution, BeliefModel, BeliefUpdate};

pub use crate::forward::{ForwardSearch, ForwardSearchConfig, SearchOutcome};

pub use crate::mcts::{
    ActionEligibility, Eligibility, FixedWidth, HistoryMcts, MctsConfig, ProgressiveWidening,
    SearchStats, SearchTables, SimilarityWidening, Unrestricted,
};

pub use crate::agents::{Agent, Policy, RandomAgent, ScriptedAgent};

pub use crate::games::kuhn::{KuhnConfig, KuhnObservation, KuhnPoker, KuhnPokerBuilder};

pub use crate::simulator::{SimulationError, SimulationReport, Simulator, SimulatorConfig};
