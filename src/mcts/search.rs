//! Core history-MCTS search algorithm.
//!
//! Each simulation determinizes the opponent's hidden value by sampling the
//! belief, rebuilds a full state from the searcher's latest observation,
//! and walks the history-keyed tables:
//!
//! - terminal state: return its payoffs
//! - unregistered history: register it, then return a random rollout
//! - otherwise: pick an eligible action by UCB, recurse into the history
//!   seen by whoever acts next, and back the returns up on the way out

use std::time::Instant;

use crate::agents::Agent;
use crate::belief::BeliefModel;
use crate::core::{Action, GameRng, History, PlayerId, PlayerMap};
use crate::rules::{PerspectiveView, RulesEngine};

use super::config::MctsConfig;
use super::policy::{random_rollout, ucb_select, ActionEligibility};
use super::stats::SearchStats;
use super::tree::SearchTables;

/// History-MCTS decision-maker.
///
/// Generic over the rules engine. Owns its belief, tables, eligibility
/// policy, and RNG; nothing is shared between instances.
pub struct HistoryMcts<E: RulesEngine> {
    engine: E,

    config: MctsConfig,

    /// Edge, visit, and Q tables. Kept across decisions of one episode.
    tables: SearchTables<E::Observation>,

    /// Which actions selection may consider.
    eligibility: Box<dyn ActionEligibility<E::Observation>>,

    belief: BeliefModel<E::Hidden>,

    rng: GameRng,

    stats: SearchStats,
}

impl<E> HistoryMcts<E>
where
    E: RulesEngine,
    E::Observation: 'static,
{
    /// Create a search with the eligibility policy named in `config`.
    pub fn new(engine: E, config: MctsConfig) -> Self {
        let belief = BeliefModel::new(engine.hidden_domain(), config.belief);
        let eligibility = config.eligibility.build();
        let rng = GameRng::new(config.seed);

        Self {
            engine,
            config,
            tables: SearchTables::new(),
            eligibility,
            belief,
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Replace the eligibility policy.
    pub fn with_eligibility<P>(mut self, eligibility: P) -> Self
    where
        P: ActionEligibility<E::Observation> + 'static,
    {
        self.eligibility = Box::new(eligibility);
        self
    }

    /// Run the configured number of simulations from `history`.
    ///
    /// Returns the visited legal action with the highest mean return for
    /// `player`, ties going to the first in legal order. Actions the search
    /// never backed up are not candidates; if none was, the first legal
    /// action is returned. The belief is read, never updated. `None` if
    /// `history` is terminal.
    ///
    /// # Panics
    ///
    /// Panics if a non-terminal history has no legal action.
    pub fn search(
        &mut self,
        history: &History<E::Observation>,
        player: PlayerId,
    ) -> Option<Action> {
        if history.is_terminal() {
            return None;
        }
        let legal = history.legal_actions();
        assert!(!legal.is_empty(), "non-terminal history has no legal action");

        let start = Instant::now();
        self.stats.reset();
        let own = history.last().own_hidden();

        for _ in 0..self.config.simulations {
            let Some(opponent) = self.belief.distribution().sample_excluding(own, &mut self.rng)
            else {
                tracing::warn!(
                    target: "history_mcts::mcts",
                    %player,
                    "no opponent value to determinize"
                );
                break;
            };

            let state = self.engine.reconstruct(history.last(), opponent);
            self.simulate(history, state, 0);
            self.stats.simulations += 1;
        }

        self.stats.time_us = start.elapsed().as_micros() as u64;

        let mut best: Option<(Action, f64)> = None;
        for &action in &legal {
            if self.tables.edge_visits(history, action) == 0 {
                continue;
            }
            let value = self.tables.q(history, action, player);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((action, value));
            }
        }
        best.map(|(action, _)| action).or_else(|| legal.first().copied())
    }

    /// One tree walk from `history` through the determinized `state`.
    ///
    /// Returns the per-seat payoffs reached and backs them up on the way
    /// out.
    fn simulate(
        &mut self,
        history: &History<E::Observation>,
        state: E::State,
        depth: u16,
    ) -> PlayerMap<f64> {
        if self.engine.is_terminal(&state) {
            return self.engine.returns(&state);
        }

        if !self.tables.contains(history) {
            self.tables.register(history, &self.engine.legal_actions(&state));
            self.stats.histories_expanded += 1;
            self.stats.rollouts += 1;
            return random_rollout(&self.engine, state, &mut self.rng);
        }

        let Some(actor) = self.engine.active_player(&state) else {
            panic!("non-terminal state has no seat to act");
        };
        let eligible = self
            .eligibility
            .eligible_actions(history, &self.tables, &mut self.rng);
        let Some(action) = ucb_select(
            &eligible,
            history,
            &self.tables,
            actor,
            self.config.exploration_constant,
        ) else {
            panic!(
                "no eligible action at a non-terminal history ({} policy)",
                self.eligibility.name()
            );
        };

        let mut next = state;
        if let Err(err) = self.engine.apply(&mut next, action, actor) {
            panic!("search applied an illegal action: {err}");
        }

        let viewer = self.engine.active_player(&next).unwrap_or(actor);
        let observation = self.engine.observe(&next, viewer);
        let child = history
            .relabeled(viewer, observation.own_hidden())
            .pushed(observation);

        self.stats.observe_depth(depth + 1);
        let returns = self.simulate(&child, next, depth + 1);
        self.tables.backup(history, action, &returns);
        returns
    }

    /// Mean return of (history, action) for `player`.
    #[must_use]
    pub fn q_value(
        &self,
        history: &History<E::Observation>,
        action: Action,
        player: PlayerId,
    ) -> f64 {
        self.tables.q(history, action, player)
    }

    /// (action, mean return for `player`) over the legal actions.
    pub fn action_values(
        &self,
        history: &History<E::Observation>,
        player: PlayerId,
    ) -> Vec<(Action, f64)> {
        history
            .legal_actions()
            .into_iter()
            .map(|action| (action, self.tables.q(history, action, player)))
            .collect()
    }

    /// (action, visit count) over the legal actions.
    pub fn action_visits(&self, history: &History<E::Observation>) -> Vec<(Action, u32)> {
        history
            .legal_actions()
            .into_iter()
            .map(|action| (action, self.tables.edge_visits(history, action)))
            .collect()
    }

    /// Statistics of the most recent search.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn tables(&self) -> &SearchTables<E::Observation> {
        &self.tables
    }

    #[must_use]
    pub fn belief(&self) -> &BeliefModel<E::Hidden> {
        &self.belief
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }
}

impl<E> Agent<E> for HistoryMcts<E>
where
    E: RulesEngine,
    E::Observation: 'static,
{
    fn choose_action(
        &mut self,
        history: &History<E::Observation>,
        player: PlayerId,
    ) -> Option<Action> {
        self.belief.update(history, player);
        let action = self.search(history, player);

        tracing::debug!(
            target: "history_mcts::mcts",
            %player,
            policy = self.eligibility.name(),
            simulations = self.stats.simulations,
            sims_per_sec = self.stats.simulations_per_second(),
            rollout_rate = self.stats.rollout_rate(),
            histories = self.tables.len(),
            branching = self.tables.stats().branching_factor(),
            max_depth = self.stats.max_depth,
            action = ?action,
            value = ?action.map(|a| self.tables.q(history, a, player)),
            "mcts decision"
        );

        action
    }

    fn reset(&mut self) {
        self.tables.clear();
        self.eligibility.reset();
        self.belief.reset();
        self.stats.reset();
    }

    fn name(&self) -> &str {
        self.eligibility.name()
    }
}
