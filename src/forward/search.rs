//! Forward search engine.
//!
//! Expectimax from the searcher's history. Every node reconstructs one
//! hypothetical state per opponent value the belief still allows, applies
//! the candidate action, and weights the outcome by that value's
//! probability. Searcher nodes take the best action; opponent nodes
//! average uniformly over theirs.

use crate::agents::Agent;
use crate::belief::BeliefModel;
use crate::core::{Action, History, PlayerId};
use crate::rules::{PerspectiveView, RulesEngine};

use super::config::ForwardSearchConfig;

/// Result of evaluating one node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOutcome {
    /// Best action for the searcher; `None` at leaves and opponent nodes.
    pub action: Option<Action>,

    /// Expected return for the searcher.
    pub value: f64,
}

impl SearchOutcome {
    fn leaf(value: f64) -> Self {
        Self {
            action: None,
            value,
        }
    }
}

/// Belief-driven forward search decision-maker.
pub struct ForwardSearch<E: RulesEngine> {
    engine: E,
    config: ForwardSearchConfig,
    belief: BeliefModel<E::Hidden>,
    nodes_visited: u32,
}

impl<E: RulesEngine> ForwardSearch<E> {
    pub fn new(engine: E, config: ForwardSearchConfig) -> Self {
        let belief = BeliefModel::new(engine.hidden_domain(), config.belief);
        Self {
            engine,
            config,
            belief,
            nodes_visited: 0,
        }
    }

    /// Expectimax value of `history` for `searcher` under the current
    /// belief.
    ///
    /// Resets the node counter; never touches the belief.
    pub fn evaluate(
        &mut self,
        history: &History<E::Observation>,
        searcher: PlayerId,
    ) -> SearchOutcome {
        self.nodes_visited = 0;
        let candidates = self
            .belief
            .distribution()
            .conditioned_on(history.last().own_hidden());
        self.expectimax(history, searcher, self.config.max_depth, &candidates)
    }

    fn expectimax(
        &mut self,
        history: &History<E::Observation>,
        searcher: PlayerId,
        depth: u32,
        candidates: &[(E::Hidden, f64)],
    ) -> SearchOutcome {
        self.nodes_visited += 1;
        let observation = history.last();

        let exhausted = self.nodes_visited >= self.config.node_budget;
        let legal = observation.legal_actions();
        let actor = match observation.to_act() {
            Some(actor) if !exhausted && depth > 0 && !legal.is_empty() => actor,
            _ => return SearchOutcome::leaf(self.engine.leaf_value(observation)),
        };

        let mut values = Vec::with_capacity(legal.len());
        for action in legal {
            let mut expected = 0.0;
            for &(hidden, probability) in candidates {
                let mut state = self.engine.reconstruct(observation, hidden);
                if let Err(err) = self.engine.apply(&mut state, action, actor) {
                    panic!("forward search applied an illegal action: {err}");
                }

                expected += probability
                    * if self.engine.is_terminal(&state) {
                        self.engine.returns(&state)[searcher]
                    } else {
                        let next = history.pushed(self.engine.observe(&state, searcher));
                        self.expectimax(&next, searcher, depth - 1, candidates).value
                    };
            }
            values.push((action, expected));
        }

        if actor == searcher {
            let mut best: Option<(Action, f64)> = None;
            for (action, value) in values {
                if best.map_or(true, |(_, best_value)| value > best_value) {
                    best = Some((action, value));
                }
            }
            best.map_or(SearchOutcome::leaf(0.0), |(action, value)| SearchOutcome {
                action: Some(action),
                value,
            })
        } else {
            let mean = values.iter().map(|(_, value)| value).sum::<f64>() / values.len() as f64;
            SearchOutcome::leaf(mean)
        }
    }

    /// Recursive calls made by the most recent evaluation.
    #[must_use]
    pub fn nodes_visited(&self) -> u32 {
        self.nodes_visited
    }

    #[must_use]
    pub fn belief(&self) -> &BeliefModel<E::Hidden> {
        &self.belief
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &ForwardSearchConfig {
        &self.config
    }
}

impl<E: RulesEngine> Agent<E> for ForwardSearch<E> {
    fn choose_action(
        &mut self,
        history: &History<E::Observation>,
        player: PlayerId,
    ) -> Option<Action> {
        self.belief.update(history, player);
        let outcome = self.evaluate(history, player);
        // A root cut off by depth or budget has no searched action.
        let action = outcome
            .action
            .or_else(|| history.legal_actions().first().copied());

        tracing::debug!(
            target: "history_mcts::forward",
            %player,
            nodes = self.nodes_visited,
            action = ?action,
            value = outcome.value,
            "forward search decision"
        );

        action
    }

    fn reset(&mut self) {
        self.belief.reset();
        self.nodes_visited = 0;
    }

    fn name(&self) -> &str {
        "forward_search"
    }
}
