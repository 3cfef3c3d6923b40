//! Episode simulator for Kuhn poker.
//!
//! Plays repeated hands between two agents and aggregates outcome
//! statistics: wins, draws, pot sizes, and per-card conditional results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agents::Agent;
use crate::core::{Action, GameRng, History, PlayerId, PlayerMap};
use crate::games::kuhn::{Card, KuhnObservation, KuhnPoker};
use crate::rules::{RulesEngine, RulesError};

/// Configuration for a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Hands to play.
    pub episodes: u32,

    /// Seed for dealing and seat order.
    pub seed: u64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            seed: 0,
        }
    }
}

impl SimulatorConfig {
    pub fn with_episodes(mut self, episodes: u32) -> Self {
        self.episodes = episodes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Ways an agent can break a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("{player} returned no action in episode {episode}")]
    NoAction { player: PlayerId, episode: u32 },

    #[error("{player} chose {action} in episode {episode}, which is not legal")]
    IllegalChoice {
        player: PlayerId,
        action: Action,
        episode: u32,
    },

    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Outcome of one finished hand.
#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeRecord {
    pub cards: PlayerMap<Card>,
    pub returns: PlayerMap<f64>,
    pub pot: u32,
    pub actions: Vec<(PlayerId, Action)>,
}

/// Per-card tallies for one seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardStats {
    /// Hands dealt with this card.
    pub episodes: u32,
    pub wins: u32,
    pub total_profit: f64,
}

impl CardStats {
    /// Wins per hand dealt with this card; zero if never dealt.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.episodes)
        }
    }

    #[must_use]
    pub fn average_profit(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_profit / f64::from(self.episodes)
        }
    }
}

/// Aggregate results of a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub episodes: u32,
    pub wins: PlayerMap<u32>,
    /// Hands where neither seat gained.
    pub draws: u32,
    pub average_pot: f64,
    pub average_profit: PlayerMap<f64>,
    /// Per-seat tallies keyed by the card that seat was dealt.
    pub by_card: PlayerMap<BTreeMap<Card, CardStats>>,
}

impl SimulationReport {
    fn new(deck: &[Card]) -> Self {
        let cards: BTreeMap<Card, CardStats> =
            deck.iter().map(|&card| (card, CardStats::default())).collect();
        Self {
            episodes: 0,
            wins: PlayerMap::with_value(0),
            draws: 0,
            average_pot: 0.0,
            average_profit: PlayerMap::with_value(0.0),
            by_card: PlayerMap::new(|_| cards.clone()),
        }
    }

    /// Fold one hand into the running totals.
    fn record(&mut self, episode: &EpisodeRecord) {
        self.episodes += 1;
        let n = f64::from(self.episodes);
        self.average_pot += (f64::from(episode.pot) - self.average_pot) / n;

        let winner = PlayerId::all().find(|&player| episode.returns[player] > 0.0);
        match winner {
            Some(player) => self.wins[player] += 1,
            None => self.draws += 1,
        }

        for player in PlayerId::all() {
            let profit = episode.returns[player];
            self.average_profit[player] += (profit - self.average_profit[player]) / n;

            let stats = self.by_card[player]
                .entry(episode.cards[player])
                .or_default();
            stats.episodes += 1;
            stats.total_profit += profit;
            if winner == Some(player) {
                stats.wins += 1;
            }
        }
    }

    /// Fraction of hands `player` won.
    #[must_use]
    pub fn win_rate(&self, player: PlayerId) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            f64::from(self.wins[player]) / f64::from(self.episodes)
        }
    }

    /// `player`'s tallies for hands dealt `card`.
    #[must_use]
    pub fn card(&self, player: PlayerId, card: Card) -> CardStats {
        self.by_card[player].get(&card).copied().unwrap_or_default()
    }
}

/// Drives repeated hands between two agents.
pub struct Simulator {
    game: KuhnPoker,
    agents: PlayerMap<Box<dyn Agent<KuhnPoker>>>,
    config: SimulatorConfig,
    rng: GameRng,
}

impl Simulator {
    pub fn new(
        game: KuhnPoker,
        agents: PlayerMap<Box<dyn Agent<KuhnPoker>>>,
        config: SimulatorConfig,
    ) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            game,
            agents,
            config,
            rng,
        }
    }

    /// Play every configured episode.
    ///
    /// # Errors
    ///
    /// Stops at the first episode in which an agent passes or picks an
    /// illegal action.
    pub fn run(&mut self) -> Result<SimulationReport, SimulationError> {
        let mut report = SimulationReport::new(&self.game.config().deck);

        for episode in 0..self.config.episodes {
            let record = self.play_episode(episode)?;
            report.record(&record);
        }

        tracing::info!(
            target: "history_mcts::simulator",
            episodes = report.episodes,
            seat0 = self.agents[PlayerId::ZERO].name(),
            seat1 = self.agents[PlayerId::ONE].name(),
            wins0 = report.wins[PlayerId::ZERO],
            wins1 = report.wins[PlayerId::ONE],
            draws = report.draws,
            average_pot = report.average_pot,
            "simulation finished"
        );

        Ok(report)
    }

    /// Deal a fresh hand and play it to the end.
    ///
    /// Both agents are reset first. Each seat sees its own history, and
    /// every action appends one observation to both.
    ///
    /// # Errors
    ///
    /// Fails if the agent to act passes or picks an illegal action.
    pub fn play_episode(&mut self, episode: u32) -> Result<EpisodeRecord, SimulationError> {
        let mut state = self.game.deal(&mut self.rng);
        let mut histories: PlayerMap<History<KuhnObservation>> =
            PlayerMap::new(|player| History::new(self.game.observe(&state, player)));
        let mut actions = Vec::new();

        for (_, agent) in self.agents.iter_mut() {
            agent.reset();
        }

        while let Some(player) = self.game.active_player(&state) {
            let action = self.agents[player]
                .choose_action(&histories[player], player)
                .ok_or(SimulationError::NoAction { player, episode })?;

            if !self.game.legal_actions(&state).contains(&action) {
                return Err(SimulationError::IllegalChoice {
                    player,
                    action,
                    episode,
                });
            }
            self.game.apply(&mut state, action, player)?;
            actions.push((player, action));

            for (seat, history) in histories.iter_mut() {
                history.push(self.game.observe(&state, seat));
            }
        }

        let record = EpisodeRecord {
            cards: state.cards,
            returns: self.game.returns(&state),
            pot: state.pot(),
            actions,
        };

        tracing::debug!(
            target: "history_mcts::simulator",
            episode,
            cards = ?record.cards,
            returns = ?record.returns,
            pot = record.pot,
            "episode finished"
        );

        Ok(record)
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}
