//! Monte Carlo Tree Search over per-player histories.
//!
//! ## Overview
//!
//! The search never sees the opponent's hidden value. Its tables are keyed
//! by histories (one seat's observation sequence), and every simulation
//! determinizes the opponent by sampling the belief:
//!
//! - **History tables**: edge visits and per-seat mean returns per
//!   (history, action), shared by every determinization
//! - **Perspective switching**: each recursive step relabels the history
//!   to whoever acts next, so one table serves both seats
//! - **Pluggable eligibility**: unrestricted, fixed-width, progressive
//!   widening, or similarity-guided widening narrow what UCB may pick
//!
//! ## Usage
//!
//! ```rust
//! use history_mcts::agents::Agent;
//! use history_mcts::core::{History, PlayerId};
//! use history_mcts::games::kuhn::KuhnPokerBuilder;
//! use history_mcts::mcts::{Eligibility, HistoryMcts, MctsConfig};
//! use history_mcts::rules::RulesEngine;
//!
//! let game = KuhnPokerBuilder::new().max_bet(8).build();
//! let state = game.deal_with([2, 0], PlayerId::ZERO);
//! let history = History::new(game.observe(&state, PlayerId::ZERO));
//!
//! let config = MctsConfig::default()
//!     .with_simulations(500)
//!     .with_eligibility(Eligibility::ProgressiveWidening { theta1: 1.5, theta2: 0.5 });
//! let mut search = HistoryMcts::new(game, config);
//!
//! let action = search.choose_action(&history, PlayerId::ZERO);
//! assert!(action.is_some());
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;
pub mod widening;

// Re-export main types
pub use config::{Eligibility, MctsConfig};
pub use node::{EdgeStats, HistoryNode};
pub use policy::{random_rollout, ucb_select, ActionEligibility, FixedWidth, Unrestricted};
pub use search::HistoryMcts;
pub use stats::SearchStats;
pub use tree::{SearchTables, TableStats};
pub use widening::{progressive_window, widening_limit, ProgressiveWidening, SimilarityWidening};
