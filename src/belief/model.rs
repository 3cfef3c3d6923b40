//! Bayesian filtering of the opponent's hidden value.

use serde::{Deserialize, Serialize};

use crate::core::{History, PlayerId};
use crate::rules::PerspectiveView;

use super::distribution::BeliefDistribution;

/// Likelihood heuristic for observed opponent actions.
///
/// An action is *consistent* with a candidate when it is aggressive (adds
/// chips) and the candidate beats the observer's own value, or passive and
/// the candidate does not. Hand-tuned constants rather than an explicit
/// opponent model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeliefConfig {
    /// Likelihood of an action consistent with the candidate's strength.
    pub consistent: f64,

    /// Likelihood of an action inconsistent with the candidate's strength.
    pub inconsistent: f64,
}

impl Default for BeliefConfig {
    fn default() -> Self {
        Self {
            consistent: 0.7,
            inconsistent: 0.3,
        }
    }
}

impl BeliefConfig {
    /// Set both likelihoods.
    pub fn with_likelihoods(mut self, consistent: f64, inconsistent: f64) -> Self {
        self.consistent = consistent;
        self.inconsistent = inconsistent;
        self
    }

    /// Likelihood of the observed action under "opponent holds a stronger
    /// value than mine" (`stronger`) or not.
    #[must_use]
    pub fn likelihood(&self, aggressive: bool, stronger: bool) -> f64 {
        if aggressive == stronger {
            self.consistent
        } else {
            self.inconsistent
        }
    }
}

/// What an update call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeliefUpdate {
    /// Fewer than two observations; nothing has happened yet.
    NoEvidence,
    /// The latest transition was not produced by the opponent.
    NotOpponentAction,
    /// Posterior replaced the prior.
    Updated,
    /// Every candidate collapsed to zero weight; prior kept.
    Degenerate,
}

/// Belief over the opponent's hidden value, owned by one decision-maker.
#[derive(Clone, Debug)]
pub struct BeliefModel<H: Ord> {
    config: BeliefConfig,
    domain: Vec<H>,
    distribution: BeliefDistribution<H>,
}

impl<H: Copy + Ord + std::fmt::Debug> BeliefModel<H> {
    /// Uniform prior over `domain`.
    pub fn new(domain: &[H], config: BeliefConfig) -> Self {
        Self {
            config,
            domain: domain.to_vec(),
            distribution: BeliefDistribution::uniform(domain),
        }
    }

    /// Restore the uniform prior over the full domain.
    pub fn reset(&mut self) {
        self.distribution = BeliefDistribution::uniform(&self.domain);
    }

    #[must_use]
    pub fn distribution(&self) -> &BeliefDistribution<H> {
        &self.distribution
    }

    #[must_use]
    pub fn config(&self) -> &BeliefConfig {
        &self.config
    }

    /// Fold the opponent's latest action in `history` into the belief.
    ///
    /// `player` is the observer. Only the transition between the two most
    /// recent observations is inspected, so this should be called once per
    /// new observation.
    pub fn update<O>(&mut self, history: &History<O>, player: PlayerId) -> BeliefUpdate
    where
        O: PerspectiveView<Hidden = H>,
    {
        let Some(previous) = history.previous() else {
            return BeliefUpdate::NoEvidence;
        };
        let latest = history.last();
        let opponent = player.opponent();

        if previous.to_act() != Some(opponent) {
            return BeliefUpdate::NotOpponentAction;
        }

        let increment = latest
            .contribution(opponent)
            .saturating_sub(previous.contribution(opponent));
        let aggressive = increment > 0;
        let own = latest.own_hidden();

        let weighted = self
            .distribution
            .iter()
            .filter(|(candidate, _)| *candidate != own)
            .map(|(candidate, prior)| {
                (candidate, prior * self.config.likelihood(aggressive, candidate > own))
            });

        match BeliefDistribution::from_weights(weighted) {
            Some(posterior) => {
                tracing::trace!(
                    target: "history_mcts::belief",
                    %player,
                    increment,
                    posterior = ?posterior,
                    "belief updated"
                );
                self.distribution = posterior;
                BeliefUpdate::Updated
            }
            None => {
                tracing::warn!(
                    target: "history_mcts::belief",
                    %player,
                    increment,
                    "degenerate evidence; keeping prior"
                );
                BeliefUpdate::Degenerate
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;
    use crate::games::kuhn::{KuhnObservation, KuhnPoker, KuhnPokerBuilder, KuhnState};
    use crate::rules::RulesEngine;

    /// Play `actions` from a fixed deal, recording `observer`'s history.
    fn history_after(
        game: &KuhnPoker,
        cards: [u8; 2],
        starter: PlayerId,
        actions: &[Action],
        observer: PlayerId,
    ) -> (History<KuhnObservation>, KuhnState) {
        let mut state = game.deal_with(cards, starter);
        let mut history = History::new(game.observe(&state, observer));
        for &action in actions {
            let actor = game.active_player(&state).unwrap();
            game.apply(&mut state, action, actor).unwrap();
            history.push(game.observe(&state, observer));
        }
        (history, state)
    }

    fn kuhn() -> KuhnPoker {
        KuhnPokerBuilder::new().max_bet(1).build()
    }

    #[test]
    fn test_likelihood_table() {
        let config = BeliefConfig::default();
        assert_eq!(config.likelihood(true, true), 0.7);
        assert_eq!(config.likelihood(true, false), 0.3);
        assert_eq!(config.likelihood(false, true), 0.3);
        assert_eq!(config.likelihood(false, false), 0.7);
    }

    #[test]
    fn test_no_evidence_is_noop() {
        let game = kuhn();
        let (history, _) = history_after(&game, [1, 2], PlayerId::ZERO, &[], PlayerId::ZERO);
        let mut belief = BeliefModel::new(game.hidden_domain(), BeliefConfig::default());

        assert_eq!(belief.update(&history, PlayerId::ZERO), BeliefUpdate::NoEvidence);
        assert_eq!(belief.distribution(), &BeliefDistribution::uniform(&[0, 1, 2]));
    }

    #[test]
    fn test_own_action_is_ignored() {
        let game = kuhn();
        let (history, _) =
            history_after(&game, [1, 2], PlayerId::ZERO, &[Action::CHECK], PlayerId::ZERO);
        let mut belief = BeliefModel::new(game.hidden_domain(), BeliefConfig::default());

        assert_eq!(
            belief.update(&history, PlayerId::ZERO),
            BeliefUpdate::NotOpponentAction
        );
        assert_eq!(belief.distribution().len(), 3);
    }

    #[test]
    fn test_opponent_check_favors_weaker_cards() {
        let game = kuhn();
        // Seat 1 holds card 1 and watches seat 0 check.
        let (history, _) =
            history_after(&game, [2, 1], PlayerId::ZERO, &[Action::CHECK], PlayerId::ONE);
        let mut belief = BeliefModel::new(game.hidden_domain(), BeliefConfig::default());

        assert_eq!(belief.update(&history, PlayerId::ONE), BeliefUpdate::Updated);

        let posterior = belief.distribution();
        assert_eq!(posterior.probability(1), 0.0);
        assert!((posterior.probability(0) - 0.7).abs() < 1e-12);
        assert!((posterior.probability(2) - 0.3).abs() < 1e-12);
        assert!((posterior.total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_opponent_bet_favors_stronger_cards() {
        let game = kuhn();
        let (history, _) =
            history_after(&game, [2, 1], PlayerId::ZERO, &[Action::bet(1)], PlayerId::ONE);
        let mut belief = BeliefModel::new(game.hidden_domain(), BeliefConfig::default());

        belief.update(&history, PlayerId::ONE);

        assert!(belief.distribution().probability(2) > belief.distribution().probability(0));
    }

    #[test]
    fn test_degenerate_evidence_keeps_prior() {
        let game = kuhn();
        let (history, _) =
            history_after(&game, [2, 1], PlayerId::ZERO, &[Action::CHECK], PlayerId::ONE);
        let config = BeliefConfig::default().with_likelihoods(0.0, 0.0);
        let mut belief = BeliefModel::new(game.hidden_domain(), config);
        let prior = belief.distribution().clone();

        assert_eq!(belief.update(&history, PlayerId::ONE), BeliefUpdate::Degenerate);
        assert_eq!(belief.distribution(), &prior);
    }

    #[test]
    fn test_reset_restores_uniform() {
        let game = kuhn();
        let (history, _) =
            history_after(&game, [2, 1], PlayerId::ZERO, &[Action::CHECK], PlayerId::ONE);
        let mut belief = BeliefModel::new(game.hidden_domain(), BeliefConfig::default());

        belief.update(&history, PlayerId::ONE);
        belief.reset();

        assert_eq!(belief.distribution(), &BeliefDistribution::uniform(&[0, 1, 2]));
    }

    #[test]
    fn test_config_serialization() {
        let config = BeliefConfig::default().with_likelihoods(0.8, 0.2);
        let json = serde_json::to_string(&config).unwrap();
        let back: BeliefConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
