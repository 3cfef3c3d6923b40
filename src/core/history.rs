//! Per-player observation histories.
//!
//! A `History` is the ordered sequence of observations one seat has seen.
//! It is the key the search tables are indexed by: the searching player
//! never sees the opponent's hidden value except through the belief.
//!
//! Backed by `im::Vector`, so cloning a history and appending one
//! observation is cheap during tree search.

use im::Vector;

use super::action::Action;
use super::player::PlayerId;
use crate::rules::PerspectiveView;

/// Append-only, non-empty sequence of observations seen by one player.
///
/// Two histories are equal iff their observation sequences are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct History<O: Clone> {
    observations: Vector<O>,
}

impl<O: PerspectiveView> History<O> {
    /// Start a history from the first observation of an episode.
    #[must_use]
    pub fn new(first: O) -> Self {
        Self {
            observations: Vector::unit(first),
        }
    }

    /// Append an observation in place.
    pub fn push(&mut self, observation: O) {
        self.observations.push_back(observation);
    }

    /// Copy of this history with one more observation.
    #[must_use]
    pub fn pushed(&self, observation: O) -> Self {
        let mut next = self.clone();
        next.push(observation);
        next
    }

    /// Most recent observation.
    #[must_use]
    pub fn last(&self) -> &O {
        self.observations
            .back()
            .expect("history always holds at least one observation")
    }

    /// Observation immediately before the most recent one.
    #[must_use]
    pub fn previous(&self) -> Option<&O> {
        let len = self.observations.len();
        if len < 2 {
            None
        } else {
            self.observations.get(len - 2)
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &O> {
        self.observations.iter()
    }

    /// Legal actions at the current decision point.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        self.last().legal_actions()
    }

    /// Seat to act at the current decision point, if any.
    #[must_use]
    pub fn to_act(&self) -> Option<PlayerId> {
        self.last().to_act()
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.last().is_terminal()
    }

    /// The same public sequence seen from `viewer`, who holds `hidden`.
    ///
    /// Every observation is relabeled, so the result reads as `viewer`'s own
    /// history.
    #[must_use]
    pub fn relabeled(&self, viewer: PlayerId, hidden: O::Hidden) -> Self {
        Self {
            observations: self
                .observations
                .iter()
                .map(|observation| observation.relabeled(viewer, hidden))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::kuhn::{KuhnPokerBuilder, Turn};
    use crate::rules::RulesEngine;

    fn opening() -> (crate::games::kuhn::KuhnPoker, crate::games::kuhn::KuhnState) {
        let game = KuhnPokerBuilder::new().max_bet(2).build();
        let state = game.deal_with([1, 2], PlayerId::ZERO);
        (game, state)
    }

    #[test]
    fn test_new_history() {
        let (game, state) = opening();
        let history = History::new(game.observe(&state, PlayerId::ZERO));

        assert_eq!(history.len(), 1);
        assert!(history.previous().is_none());
        assert_eq!(history.to_act(), Some(PlayerId::ZERO));
        assert_eq!(
            history.legal_actions(),
            vec![Action::CHECK, Action::bet(1), Action::bet(2)]
        );
    }

    #[test]
    fn test_pushed_leaves_original_untouched() {
        let (game, mut state) = opening();
        let history = History::new(game.observe(&state, PlayerId::ZERO));

        game.apply(&mut state, Action::CHECK, PlayerId::ZERO).unwrap();
        let extended = history.pushed(game.observe(&state, PlayerId::ZERO));

        assert_eq!(history.len(), 1);
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.previous(), Some(history.last()));
        assert_ne!(history, extended);
    }

    #[test]
    fn test_relabeled_swaps_viewer_and_hidden() {
        let (game, mut state) = opening();
        let mut history = History::new(game.observe(&state, PlayerId::ZERO));
        game.apply(&mut state, Action::bet(1), PlayerId::ZERO).unwrap();
        history.push(game.observe(&state, PlayerId::ZERO));

        let theirs = history.relabeled(PlayerId::ONE, 2);

        for (mine, relabeled) in history.iter().zip(theirs.iter()) {
            assert_eq!(relabeled.player, PlayerId::ONE);
            assert_eq!(relabeled.card, 2);
            assert_eq!(relabeled.bets, mine.bets);
            assert_eq!(relabeled.turn, mine.turn);
        }
        assert_eq!(theirs.last().turn, Turn::Player(PlayerId::ONE));
    }

    #[test]
    fn test_equal_sequences_hash_equal() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let (game, state) = opening();
        let a = History::new(game.observe(&state, PlayerId::ZERO));
        let b = History::new(game.observe(&state, PlayerId::ZERO));

        let hash = |h: &History<_>| {
            let mut hasher = DefaultHasher::new();
            h.hash(&mut hasher);
            hasher.finish()
        };

        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
    }
}
