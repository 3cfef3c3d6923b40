//! MCTS policies for action eligibility, selection, and rollouts.
//!
//! - `ActionEligibility`: which legal actions a history may expand into
//!   (unrestricted, fixed-width, progressive widening, similarity-guided)
//! - `ucb_select`: UCB over the eligible actions
//! - `random_rollout`: uniform random play to termination

use rustc_hash::FxHashMap;

use crate::core::{Action, GameRng, History, PlayerId, PlayerMap};
use crate::rules::{PerspectiveView, RulesEngine};

use super::tree::SearchTables;

// =============================================================================
// Eligibility Policy
// =============================================================================

/// Restricts the actions MCTS selection may consider at a history.
///
/// Implementations may cache per-history state; `reset` drops it together
/// with the search tables.
pub trait ActionEligibility<O: PerspectiveView> {
    /// Ordered eligible subset of `history`'s legal actions.
    ///
    /// Only called for registered, non-terminal histories.
    fn eligible_actions(
        &mut self,
        history: &History<O>,
        tables: &SearchTables<O>,
        rng: &mut GameRng,
    ) -> Vec<Action>;

    /// Forget all cached per-history state.
    fn reset(&mut self);

    /// Short name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Every legal action is eligible.
#[derive(Clone, Debug, Default)]
pub struct Unrestricted;

impl<O: PerspectiveView> ActionEligibility<O> for Unrestricted {
    fn eligible_actions(
        &mut self,
        history: &History<O>,
        _tables: &SearchTables<O>,
        _rng: &mut GameRng,
    ) -> Vec<Action> {
        history.legal_actions()
    }

    fn reset(&mut self) {}

    fn name(&self) -> &'static str {
        "unrestricted"
    }
}

/// A fixed random subset of at most `width` actions per history.
///
/// The subset is drawn on first encounter and reused for the life of the
/// tables.
#[derive(Clone, Debug)]
pub struct FixedWidth<O: Clone> {
    width: usize,
    sampled: FxHashMap<History<O>, Vec<Action>>,
}

impl<O: PerspectiveView> FixedWidth<O> {
    /// # Panics
    ///
    /// Panics if `width` is zero.
    pub fn new(width: usize) -> Self {
        assert!(width > 0, "Fixed width must be at least 1");
        Self {
            width,
            sampled: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }
}

impl<O: PerspectiveView> ActionEligibility<O> for FixedWidth<O> {
    fn eligible_actions(
        &mut self,
        history: &History<O>,
        _tables: &SearchTables<O>,
        rng: &mut GameRng,
    ) -> Vec<Action> {
        let width = self.width;
        self.sampled
            .entry(history.clone())
            .or_insert_with(|| {
                let legal = history.legal_actions();
                if legal.len() > width {
                    rng.sample(&legal, width)
                } else {
                    legal
                }
            })
            .clone()
    }

    fn reset(&mut self) {
        self.sampled.clear();
    }

    fn name(&self) -> &'static str {
        "fixed_width"
    }
}

// =============================================================================
// Selection
// =============================================================================

/// UCB over `eligible`: `Q + c * sqrt(ln(N) / n)`.
///
/// `N` is the history's visit total and `Q` belongs to the seat to act. The
/// first eligible action with zero visits is returned before any visited
/// one is scored. Ties go to the earlier action. `None` only if `eligible`
/// is empty.
pub fn ucb_select<O: PerspectiveView>(
    eligible: &[Action],
    history: &History<O>,
    tables: &SearchTables<O>,
    player: PlayerId,
    exploration_constant: f64,
) -> Option<Action> {
    if let Some(&unvisited) = eligible
        .iter()
        .find(|&&action| tables.edge_visits(history, action) == 0)
    {
        return Some(unvisited);
    }

    let ln_total = f64::from(tables.visits(history).max(1)).ln();
    let mut best: Option<(Action, f64)> = None;

    for &action in eligible {
        let visits = f64::from(tables.edge_visits(history, action));
        let score = tables.q(history, action, player)
            + exploration_constant * (ln_total / visits).sqrt();
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((action, score));
        }
    }

    best.map(|(action, _)| action)
}

// =============================================================================
// Rollout
// =============================================================================

/// Play uniformly random legal actions until the game ends.
///
/// # Panics
///
/// Panics if a non-terminal state reports no seat to act or no legal
/// action; both break the rules-engine contract.
pub fn random_rollout<E: RulesEngine>(
    engine: &E,
    mut state: E::State,
    rng: &mut GameRng,
) -> PlayerMap<f64> {
    while !engine.is_terminal(&state) {
        let player = engine
            .active_player(&state)
            .expect("non-terminal state has a seat to act");
        let actions = engine.legal_actions(&state);
        let &action = rng
            .choose(&actions)
            .expect("non-terminal state has a legal action");
        if let Err(err) = engine.apply(&mut state, action, player) {
            panic!("rollout applied an illegal action: {err}");
        }
    }

    engine.returns(&state)
}
