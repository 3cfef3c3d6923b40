//! Game model traits consumed by the planners.
//!
//! Games implement `RulesEngine` to define:
//! - What actions are legal
//! - How actions modify state (rejecting protocol violations)
//! - Payoffs once the game is over
//! - What each seat observes, and how to rebuild a full state from one
//!   seat's observation plus an assumed opponent hidden value
//!
//! Observations implement `PerspectiveView`, the read-only view the search
//! keys its tables on.

use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

use crate::core::{Action, PlayerId, PlayerMap};

/// Protocol violations rejected by a rules engine.
///
/// The planners never trigger these themselves; seeing one from inside a
/// search is a bug.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("{player} acted out of turn; {to_act} is to act")]
    NotYourTurn { player: PlayerId, to_act: PlayerId },

    #[error("{action} is not legal for {player}")]
    IllegalAction { action: Action, player: PlayerId },

    #[error("the game is already over")]
    GameOver,
}

/// One seat's view of a decision point.
pub trait PerspectiveView: Clone + Eq + Hash + Debug {
    /// Private information dealt to each seat.
    type Hidden: Copy + Eq + Ord + Hash + Debug;

    /// Seat this observation belongs to.
    fn viewer(&self) -> PlayerId;

    /// The viewer's own hidden value.
    fn own_hidden(&self) -> Self::Hidden;

    /// Seat to act, or `None` at terminal and chance points.
    fn to_act(&self) -> Option<PlayerId>;

    fn is_terminal(&self) -> bool;

    /// Legal actions for the seat to act. Empty once terminal.
    fn legal_actions(&self) -> Vec<Action>;

    /// Cumulative public chips committed by `player`.
    fn contribution(&self, player: PlayerId) -> u32;

    /// The same public information as seen by `viewer` holding `hidden`.
    fn relabeled(&self, viewer: PlayerId, hidden: Self::Hidden) -> Self;
}

/// Rules of a two-player game with one hidden value per seat.
///
/// ## Implementation Notes
///
/// - `apply` must reject acting out of turn and illegal actions
/// - `returns` is only meaningful once `is_terminal` holds
/// - `reconstruct` must copy everything it takes from the observation, so a
///   hypothetical branch can never alias the real game's bookkeeping
pub trait RulesEngine {
    /// Domain of the per-seat hidden value.
    type Hidden: Copy + Eq + Ord + Hash + Debug;

    type Observation: PerspectiveView<Hidden = Self::Hidden>;

    /// Full state, including both hidden values.
    type State: Clone + Debug;

    /// Every value a seat's hidden information may take.
    fn hidden_domain(&self) -> &[Self::Hidden];

    /// Legal actions for the seat to act. Empty once terminal.
    fn legal_actions(&self, state: &Self::State) -> Vec<Action>;

    /// Seat to act, or `None` once terminal.
    fn active_player(&self, state: &Self::State) -> Option<PlayerId>;

    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Apply `action` for `player`.
    ///
    /// # Errors
    ///
    /// Fails if it is not `player`'s turn or `action` is not legal.
    fn apply(
        &self,
        state: &mut Self::State,
        action: Action,
        player: PlayerId,
    ) -> Result<(), RulesError>;

    /// Signed payoff per seat. Zero for both seats before the game ends.
    fn returns(&self, state: &Self::State) -> PlayerMap<f64>;

    /// What `player` sees of `state`.
    fn observe(&self, state: &Self::State, player: PlayerId) -> Self::Observation;

    /// Full hypothetical state consistent with `observation` in which the
    /// viewer's opponent holds `opponent_hidden`.
    fn reconstruct(
        &self,
        observation: &Self::Observation,
        opponent_hidden: Self::Hidden,
    ) -> Self::State;

    /// Value of an observation for its viewer: the signed payoff once
    /// terminal, otherwise a heuristic estimate used at depth limits.
    fn leaf_value(&self, observation: &Self::Observation) -> f64;

    // === Convenience Methods ===

    /// Apply a sequence of actions, each by the seat to act.
    ///
    /// # Errors
    ///
    /// Propagates the first protocol violation.
    fn apply_all(
        &self,
        state: &mut Self::State,
        actions: &[Action],
    ) -> Result<(), RulesError> {
        for &action in actions {
            let player = self.active_player(state).ok_or(RulesError::GameOver)?;
            self.apply(state, action, player)?;
        }
        Ok(())
    }
}
