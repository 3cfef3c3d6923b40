//! Kuhn poker state and observations.

use serde::{Deserialize, Serialize};

use crate::core::{Action, PlayerId, PlayerMap};
use crate::rules::PerspectiveView;

/// A card. Higher values beat lower ones at showdown.
pub type Card = u8;

/// Whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Turn {
    Player(PlayerId),
    Terminal,
}

impl Turn {
    #[must_use]
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Turn::Player(player) => Some(player),
            Turn::Terminal => None,
        }
    }
}

/// Legal actions given the betting state.
///
/// With nothing outstanding: check or open with any bet up to `max_bet`.
/// Afterwards: fold, or match the outstanding amount (zero after a check).
pub(crate) fn legal_actions(turn: Turn, outstanding: Option<u32>, max_bet: u32) -> Vec<Action> {
    match (turn, outstanding) {
        (Turn::Terminal, _) => Vec::new(),
        (Turn::Player(_), None) => std::iter::once(Action::CHECK)
            .chain((1..=max_bet).map(Action::bet))
            .collect(),
        (Turn::Player(_), Some(amount)) => vec![Action::FOLD, Action::bet(amount)],
    }
}

/// Full game state, including both hands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KuhnState {
    pub cards: PlayerMap<Card>,
    /// Chips committed per seat, ante included.
    pub bets: PlayerMap<u32>,
    pub folded: PlayerMap<bool>,
    pub turn: Turn,
    /// Outstanding amount to match; `None` until the first action.
    pub bet_amount: Option<u32>,
    pub winner: Option<PlayerId>,
    pub max_bet: u32,
}

impl KuhnState {
    /// Total chips in the pot.
    #[must_use]
    pub fn pot(&self) -> u32 {
        self.bets[PlayerId::ZERO] + self.bets[PlayerId::ONE]
    }
}

/// One seat's view: own card plus everything public.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KuhnObservation {
    pub card: Card,
    pub player: PlayerId,
    pub bets: PlayerMap<u32>,
    pub turn: Turn,
    pub folded: PlayerMap<bool>,
    pub bet_amount: Option<u32>,
    pub winner: Option<PlayerId>,
    pub max_bet: u32,
}

impl KuhnObservation {
    #[must_use]
    pub fn pot(&self) -> u32 {
        self.bets[PlayerId::ZERO] + self.bets[PlayerId::ONE]
    }
}

impl PerspectiveView for KuhnObservation {
    type Hidden = Card;

    fn viewer(&self) -> PlayerId {
        self.player
    }

    fn own_hidden(&self) -> Card {
        self.card
    }

    fn to_act(&self) -> Option<PlayerId> {
        self.turn.player()
    }

    fn is_terminal(&self) -> bool {
        self.turn == Turn::Terminal
    }

    fn legal_actions(&self) -> Vec<Action> {
        legal_actions(self.turn, self.bet_amount, self.max_bet)
    }

    fn contribution(&self, player: PlayerId) -> u32 {
        self.bets[player]
    }

    fn relabeled(&self, viewer: PlayerId, hidden: Card) -> Self {
        Self {
            card: hidden,
            player: viewer,
            ..self.clone()
        }
    }
}
