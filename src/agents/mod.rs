//! Decision-makers and baseline players.
//!
//! Every planner implements `Agent`, the seam the simulator drives. The
//! baselines here are uniform-random play and a fixed preference script.

use rustc_hash::FxHashMap;

use crate::core::{Action, GameRng, History, PlayerId};
use crate::rules::RulesEngine;

/// Static history-to-action table.
///
/// Online planners never materialize one and report it empty.
pub type Policy<O> = FxHashMap<History<O>, Action>;

/// A player that picks actions from its own history.
pub trait Agent<E: RulesEngine> {
    /// Pick an action at the end of `history`, acting as `player`.
    ///
    /// Returns `None` only if nothing is playable.
    fn choose_action(
        &mut self,
        history: &History<E::Observation>,
        player: PlayerId,
    ) -> Option<Action>;

    /// Materialized policy, if the agent keeps one.
    fn policy(&self) -> Policy<E::Observation> {
        FxHashMap::default()
    }

    /// Forget per-episode state before a new deal.
    fn reset(&mut self) {}

    /// Short name for reports and logs.
    fn name(&self) -> &str;
}

/// Uniformly random legal actions.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }
}

impl<E: RulesEngine> Agent<E> for RandomAgent {
    fn choose_action(
        &mut self,
        history: &History<E::Observation>,
        _player: PlayerId,
    ) -> Option<Action> {
        let legal = history.legal_actions();
        self.rng.choose(&legal).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Plays the first legal action from a preference list.
///
/// Falls back to the first legal action when no preference applies, so
/// `ScriptedAgent::new(vec![Action::CHECK])` checks whenever it can and
/// folds otherwise.
#[derive(Clone, Debug)]
pub struct ScriptedAgent {
    preferences: Vec<Action>,
}

impl ScriptedAgent {
    pub fn new(preferences: Vec<Action>) -> Self {
        Self { preferences }
    }

    /// Checks whenever possible.
    pub fn always_check() -> Self {
        Self::new(vec![Action::CHECK])
    }
}

impl<E: RulesEngine> Agent<E> for ScriptedAgent {
    fn choose_action(
        &mut self,
        history: &History<E::Observation>,
        _player: PlayerId,
    ) -> Option<Action> {
        let legal = history.legal_actions();
        self.preferences
            .iter()
            .find(|action| legal.contains(action))
            .or_else(|| legal.first())
            .copied()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
