//! Action representation.
//!
//! Actions are plain integers. Two reserved sentinels denote the passive
//! moves; every positive value is a bet (or call) of that many chips.
//! Keeping actions numeric lets the similarity-guided widening policy reason
//! about distances between bet sizes.

use serde::{Deserialize, Serialize};

/// A game action.
///
/// ```
/// use history_mcts::core::Action;
///
/// assert_eq!(Action::FOLD.amount(), 0);
/// assert_eq!(Action::bet(5).amount(), 5);
/// assert!(Action::bet(5) > Action::CHECK);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Action(pub i32);

impl Action {
    /// Give up the hand.
    pub const FOLD: Action = Action(-1);

    /// Pass without adding chips.
    pub const CHECK: Action = Action(0);

    /// Bet or call `amount` chips.
    #[must_use]
    pub const fn bet(amount: u32) -> Self {
        Self(amount as i32)
    }

    /// Raw numeric value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Chips this action puts in the pot (zero for the sentinels).
    #[must_use]
    pub const fn amount(self) -> u32 {
        if self.0 > 0 {
            self.0 as u32
        } else {
            0
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Action::FOLD => write!(f, "fold"),
            Action::CHECK => write!(f, "check"),
            Action(amount) => write!(f, "bet {amount}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        assert_eq!(Action::FOLD.value(), -1);
        assert_eq!(Action::CHECK.value(), 0);
        assert_eq!(Action::FOLD.amount(), 0);
        assert_eq!(Action::bet(1).amount(), 1);
    }

    #[test]
    fn test_ordering_is_numeric() {
        let mut actions = vec![Action::bet(3), Action::FOLD, Action::bet(1), Action::CHECK];
        actions.sort();
        assert_eq!(
            actions,
            vec![Action::FOLD, Action::CHECK, Action::bet(1), Action::bet(3)]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::FOLD.to_string(), "fold");
        assert_eq!(Action::CHECK.to_string(), "check");
        assert_eq!(Action::bet(7).to_string(), "bet 7");
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Action::bet(4)).unwrap();
        assert_eq!(json, "4");
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Action::bet(4));
    }
}
