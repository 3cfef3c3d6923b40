//! Kuhn poker with variable bet sizes.
//!
//! A small betting game used to exercise the planners:
//! - Two distinct cards are dealt from a small deck; each seat antes
//! - The starting seat checks or opens with a bet of 1..=max_bet
//! - The other seat folds, or matches (check after a check, call after a bet)
//! - Higher card wins at showdown; a fold concedes the opponent's stake
//!
//! Opening bets span a wide integer range, which is what makes the
//! action-restriction policies worthwhile.

mod game;
mod state;

pub use game::{KuhnConfig, KuhnPoker, KuhnPokerBuilder};
pub use state::{Card, KuhnObservation, KuhnState, Turn};
