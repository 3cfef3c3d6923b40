//! Core types: players, actions, histories, RNG.
//!
//! These are game-agnostic. Games supply their observations and hidden
//! values through the `rules` traits rather than modifying the core.

pub mod action;
pub mod history;
pub mod player;
pub mod rng;

pub use action::Action;
pub use history::History;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::GameRng;
