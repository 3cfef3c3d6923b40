//! Kuhn poker rules engine.

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameRng, PlayerId, PlayerMap};
use crate::rules::{RulesEngine, RulesError};

use super::state::{legal_actions, Card, KuhnObservation, KuhnState, Turn};

/// Rule parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KuhnConfig {
    /// Cards dealt from, one to each seat.
    pub deck: Vec<Card>,

    /// Chips each seat commits before acting.
    pub ante: u32,

    /// Largest opening bet.
    pub max_bet: u32,

    /// Scale of the depth-limit heuristic `weight * strength * pot`.
    pub heuristic_weight: f64,
}

impl Default for KuhnConfig {
    fn default() -> Self {
        Self {
            deck: vec![0, 1, 2],
            ante: 1,
            max_bet: 100,
            heuristic_weight: 0.1,
        }
    }
}

/// Kuhn poker with variable opening bets.
#[derive(Clone, Debug)]
pub struct KuhnPoker {
    config: KuhnConfig,
}

/// Builder for creating a `KuhnPoker` engine.
#[derive(Default)]
pub struct KuhnPokerBuilder {
    config: KuhnConfig,
}

impl KuhnPokerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deck(mut self, deck: Vec<Card>) -> Self {
        self.config.deck = deck;
        self
    }

    pub fn ante(mut self, ante: u32) -> Self {
        self.config.ante = ante;
        self
    }

    pub fn max_bet(mut self, max_bet: u32) -> Self {
        assert!(max_bet >= 1, "Max bet must be at least 1");
        self.config.max_bet = max_bet;
        self
    }

    pub fn heuristic_weight(mut self, weight: f64) -> Self {
        self.config.heuristic_weight = weight;
        self
    }

    pub fn build(self) -> KuhnPoker {
        KuhnPoker::new(self.config)
    }
}

impl KuhnPoker {
    /// Create an engine from a config.
    ///
    /// # Panics
    ///
    /// Panics if the deck holds fewer than two distinct cards.
    pub fn new(mut config: KuhnConfig) -> Self {
        config.deck.sort_unstable();
        config.deck.dedup();
        assert!(config.deck.len() >= 2, "Deck must hold at least two distinct cards");
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &KuhnConfig {
        &self.config
    }

    /// Deal random distinct cards and pick a random starting seat.
    pub fn deal(&self, rng: &mut GameRng) -> KuhnState {
        let cards = rng.sample(&self.config.deck, 2);
        let starter = if rng.gen_range_usize(0..2) == 0 {
            PlayerId::ZERO
        } else {
            PlayerId::ONE
        };
        self.deal_with([cards[0], cards[1]], starter)
    }

    /// Deal fixed cards with a fixed starting seat.
    pub fn deal_with(&self, cards: [Card; 2], starter: PlayerId) -> KuhnState {
        KuhnState {
            cards: PlayerMap::from_pair(cards[0], cards[1]),
            bets: PlayerMap::with_value(self.config.ante),
            folded: PlayerMap::with_value(false),
            turn: Turn::Player(starter),
            bet_amount: None,
            winner: None,
            max_bet: self.config.max_bet,
        }
    }

    fn showdown(state: &mut KuhnState) {
        state.turn = Turn::Terminal;
        state.winner = Some(if state.folded[PlayerId::ZERO] {
            PlayerId::ONE
        } else if state.folded[PlayerId::ONE] {
            PlayerId::ZERO
        } else if state.cards[PlayerId::ZERO] > state.cards[PlayerId::ONE] {
            PlayerId::ZERO
        } else {
            PlayerId::ONE
        });
    }

    /// Payoff to `viewer` given who won and what each seat committed.
    fn payoff(winner: PlayerId, bets: &PlayerMap<u32>, viewer: PlayerId) -> f64 {
        let loser = winner.opponent();
        let stake = f64::from(bets[loser]);
        if viewer == winner {
            stake
        } else {
            -stake
        }
    }
}

impl RulesEngine for KuhnPoker {
    type Hidden = Card;
    type Observation = KuhnObservation;
    type State = KuhnState;

    fn hidden_domain(&self) -> &[Card] {
        &self.config.deck
    }

    fn legal_actions(&self, state: &KuhnState) -> Vec<Action> {
        legal_actions(state.turn, state.bet_amount, state.max_bet)
    }

    fn active_player(&self, state: &KuhnState) -> Option<PlayerId> {
        state.turn.player()
    }

    fn is_terminal(&self, state: &KuhnState) -> bool {
        state.turn == Turn::Terminal
    }

    fn apply(
        &self,
        state: &mut KuhnState,
        action: Action,
        player: PlayerId,
    ) -> Result<(), RulesError> {
        let to_act = state.turn.player().ok_or(RulesError::GameOver)?;
        if to_act != player {
            return Err(RulesError::NotYourTurn { player, to_act });
        }
        if !self.legal_actions(state).contains(&action) {
            return Err(RulesError::IllegalAction { action, player });
        }

        match (action, state.bet_amount) {
            (Action::FOLD, _) => {
                state.folded[player] = true;
                state.turn = Turn::Terminal;
                state.winner = Some(player.opponent());
            }
            (Action::CHECK, None) => {
                state.bet_amount = Some(0);
                state.turn = Turn::Player(player.opponent());
            }
            (Action::CHECK, Some(_)) => Self::showdown(state),
            (bet, None) => {
                state.bet_amount = Some(bet.amount());
                state.bets[player] += bet.amount();
                state.turn = Turn::Player(player.opponent());
            }
            (_, Some(outstanding)) => {
                state.bets[player] += outstanding;
                Self::showdown(state);
            }
        }

        Ok(())
    }

    fn returns(&self, state: &KuhnState) -> PlayerMap<f64> {
        match (state.turn, state.winner) {
            (Turn::Terminal, Some(winner)) => {
                PlayerMap::new(|seat| Self::payoff(winner, &state.bets, seat))
            }
            _ => PlayerMap::with_value(0.0),
        }
    }

    fn observe(&self, state: &KuhnState, player: PlayerId) -> KuhnObservation {
        KuhnObservation {
            card: state.cards[player],
            player,
            bets: state.bets,
            turn: state.turn,
            folded: state.folded,
            bet_amount: state.bet_amount,
            winner: state.winner,
            max_bet: state.max_bet,
        }
    }

    fn reconstruct(&self, observation: &KuhnObservation, opponent_card: Card) -> KuhnState {
        let mut cards = PlayerMap::with_value(0);
        cards[observation.player] = observation.card;
        cards[observation.player.opponent()] = opponent_card;

        KuhnState {
            cards,
            bets: observation.bets,
            folded: observation.folded,
            turn: observation.turn,
            bet_amount: observation.bet_amount,
            winner: observation.winner,
            max_bet: observation.max_bet,
        }
    }

    fn leaf_value(&self, observation: &KuhnObservation) -> f64 {
        if let (Turn::Terminal, Some(winner)) = (observation.turn, observation.winner) {
            return Self::payoff(winner, &observation.bets, observation.player);
        }

        let strength = f64::from(observation.card) / self.config.deck.len() as f64;
        self.config.heuristic_weight * strength * f64::from(observation.pot())
    }
}
