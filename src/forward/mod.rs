//! Depth- and budget-limited expectimax over belief-weighted opponent
//! hypotheses.

pub mod config;
pub mod search;

pub use config::ForwardSearchConfig;
pub use search::{ForwardSearch, SearchOutcome};
