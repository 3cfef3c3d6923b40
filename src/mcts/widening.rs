//! Progressive widening eligibility policies.
//!
//! Both policies grow a history's eligible set as it accumulates visits,
//! following the schedule `floor(theta1 * visits^theta2)`. They differ in
//! which action is admitted next: a cached random permutation, or the
//! unadmitted action numerically closest to the neighbourhood of the
//! current best.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{Action, GameRng, History};
use crate::rules::PerspectiveView;

use super::policy::ActionEligibility;
use super::tree::SearchTables;

type ActionSet = SmallVec<[Action; 8]>;

/// Widening schedule `floor(theta1 * visits^theta2)`, saturating at zero.
#[must_use]
pub fn widening_limit(theta1: f64, theta2: f64, visits: u32) -> usize {
    let limit = (theta1 * f64::from(visits).powf(theta2)).floor();
    if limit.is_finite() && limit > 0.0 {
        limit as usize
    } else {
        0
    }
}

/// Eligible prefix length after `visits` visits out of `legal` actions.
///
/// The widening limit clamped to `[1, legal]`.
#[must_use]
pub fn progressive_window(theta1: f64, theta2: f64, visits: u32, legal: usize) -> usize {
    widening_limit(theta1, theta2, visits).clamp(1, legal.max(1))
}

// =============================================================================
// Progressive Widening
// =============================================================================

/// A growing prefix of a per-history random permutation.
///
/// The prefix length is recomputed from the history's current visit count
/// on every call and clamped to `[1, legal]`.
#[derive(Clone, Debug)]
pub struct ProgressiveWidening<O: Clone> {
    theta1: f64,
    theta2: f64,
    orderings: FxHashMap<History<O>, ActionSet>,
}

impl<O: PerspectiveView> ProgressiveWidening<O> {
    pub fn new(theta1: f64, theta2: f64) -> Self {
        Self {
            theta1,
            theta2,
            orderings: FxHashMap::default(),
        }
    }
}

impl<O: PerspectiveView> ActionEligibility<O> for ProgressiveWidening<O> {
    fn eligible_actions(
        &mut self,
        history: &History<O>,
        tables: &SearchTables<O>,
        rng: &mut GameRng,
    ) -> Vec<Action> {
        let ordering = self.orderings.entry(history.clone()).or_insert_with(|| {
            let mut actions: ActionSet = history.legal_actions().into_iter().collect();
            rng.shuffle(&mut actions);
            actions
        });

        let visits = tables.visits(history);
        let window = progressive_window(self.theta1, self.theta2, visits, ordering.len());
        ordering.iter().take(window).copied().collect()
    }

    fn reset(&mut self) {
        self.orderings.clear();
    }

    fn name(&self) -> &'static str {
        "progressive_widening"
    }
}

// =============================================================================
// Similarity-Guided Widening
// =============================================================================

/// Widening that admits actions near the best-looking admitted action.
///
/// A history starts with its smallest and largest legal action. While the
/// admitted set is below the widening ceiling, each call admits one more:
/// the unadmitted legal action closest to the midpoint around the admitted
/// action with the highest Q for the seat to act. The admitted set is kept
/// sorted by value and never shrinks.
#[derive(Clone, Debug)]
pub struct SimilarityWidening<O: Clone> {
    theta1: f64,
    theta2: f64,
    admitted: FxHashMap<History<O>, ActionSet>,
}

impl<O: PerspectiveView> SimilarityWidening<O> {
    pub fn new(theta1: f64, theta2: f64) -> Self {
        Self {
            theta1,
            theta2,
            admitted: FxHashMap::default(),
        }
    }
}

/// Target value next to the admitted action at `best`.
///
/// Interior actions use the midpoint of their two neighbours. An action at
/// either end uses the midpoint between itself and its one neighbour.
fn similarity_target(admitted: &[Action], best: usize) -> f64 {
    let value = |idx: usize| f64::from(admitted[idx].value());
    let last = admitted.len() - 1;

    match (best.checked_sub(1), (best < last).then_some(best + 1)) {
        (Some(lower), Some(upper)) => (value(lower) + value(upper)) / 2.0,
        (Some(neighbour), None) | (None, Some(neighbour)) => {
            (value(best) + value(neighbour)) / 2.0
        }
        (None, None) => value(best),
    }
}

/// The unadmitted action closest to `target`; ties go to the smaller one.
fn closest_unadmitted(legal: &[Action], admitted: &[Action], target: f64) -> Option<Action> {
    let mut best: Option<(Action, f64)> = None;
    for &action in legal {
        if admitted.binary_search(&action).is_ok() {
            continue;
        }
        let distance = (f64::from(action.value()) - target).abs();
        let closer = match best {
            None => true,
            Some((current, current_distance)) => {
                distance < current_distance
                    || (distance == current_distance && action < current)
            }
        };
        if closer {
            best = Some((action, distance));
        }
    }
    best.map(|(action, _)| action)
}

impl<O: PerspectiveView> ActionEligibility<O> for SimilarityWidening<O> {
    fn eligible_actions(
        &mut self,
        history: &History<O>,
        tables: &SearchTables<O>,
        _rng: &mut GameRng,
    ) -> Vec<Action> {
        let mut legal = history.legal_actions();
        legal.sort_unstable();
        legal.dedup();

        let admitted = self.admitted.entry(history.clone()).or_insert_with(|| {
            let mut seed = ActionSet::new();
            if let (Some(&low), Some(&high)) = (legal.first(), legal.last()) {
                seed.push(low);
                if high != low {
                    seed.push(high);
                }
            }
            seed
        });

        let ceiling = widening_limit(self.theta1, self.theta2, tables.visits(history));
        if admitted.len() < ceiling && admitted.len() < legal.len() {
            if let Some(player) = history.to_act() {
                let mut best = 0;
                let mut best_q = f64::NEG_INFINITY;
                for (idx, &action) in admitted.iter().enumerate() {
                    let q = tables.q(history, action, player);
                    if q > best_q {
                        best = idx;
                        best_q = q;
                    }
                }

                let target = similarity_target(admitted, best);
                if let Some(action) = closest_unadmitted(&legal, admitted, target) {
                    let slot = admitted.binary_search(&action).unwrap_or_else(|slot| slot);
                    admitted.insert(slot, action);
                }
            }
        }

        admitted.to_vec()
    }

    fn reset(&mut self) {
        self.admitted.clear();
    }

    fn name(&self) -> &'static str {
        "similarity_widening"
    }
}
