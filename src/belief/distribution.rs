//! Probability distribution over the opponent's hidden value.

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Probability mass per candidate hidden value.
///
/// Ordered by value so that iteration, and therefore sampling with a seeded
/// RNG, is reproducible.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeliefDistribution<H: Ord> {
    mass: BTreeMap<H, f64>,
}

impl<H: Copy + Ord + Debug> BeliefDistribution<H> {
    /// Uniform over `domain`.
    #[must_use]
    pub fn uniform(domain: &[H]) -> Self {
        let share = 1.0 / domain.len().max(1) as f64;
        Self {
            mass: domain.iter().map(|&value| (value, share)).collect(),
        }
    }

    /// Normalize arbitrary non-negative weights.
    ///
    /// Returns `None` if the weights carry no usable mass.
    pub fn from_weights(weights: impl IntoIterator<Item = (H, f64)>) -> Option<Self> {
        let mass: BTreeMap<H, f64> = weights.into_iter().collect();
        let total: f64 = mass.values().sum();
        if !total.is_finite() || total <= 0.0 || mass.values().any(|w| *w < 0.0) {
            return None;
        }
        Some(Self {
            mass: mass.into_iter().map(|(value, w)| (value, w / total)).collect(),
        })
    }

    /// Probability of `value` (zero if it is not a candidate).
    #[must_use]
    pub fn probability(&self, value: H) -> f64 {
        self.mass.get(&value).copied().unwrap_or(0.0)
    }

    /// Total mass; one up to rounding.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.mass.values().sum()
    }

    /// Number of candidate values carried.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (H, f64)> + '_ {
        self.mass.iter().map(|(&value, &p)| (value, p))
    }

    /// Candidates other than `own`, renormalized, dropping zero mass.
    ///
    /// The searching player's own value can never be the opponent's. If
    /// nothing else carries mass, the remaining candidates are taken as
    /// uniform.
    #[must_use]
    pub fn conditioned_on(&self, own: H) -> Vec<(H, f64)> {
        let others: Vec<(H, f64)> = self.iter().filter(|(value, _)| *value != own).collect();
        let total: f64 = others.iter().map(|(_, p)| p).sum();

        if total > 0.0 {
            others
                .into_iter()
                .filter(|(_, p)| *p > 0.0)
                .map(|(value, p)| (value, p / total))
                .collect()
        } else {
            let share = 1.0 / others.len().max(1) as f64;
            others.into_iter().map(|(value, _)| (value, share)).collect()
        }
    }

    /// Draw an opponent value, excluding `own`.
    pub fn sample_excluding(&self, own: H, rng: &mut GameRng) -> Option<H> {
        let candidates = self.conditioned_on(own);
        let weights: Vec<f64> = candidates.iter().map(|(_, p)| *p).collect();
        rng.choose_weighted(&weights).map(|idx| candidates[idx].0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform() {
        let belief = BeliefDistribution::uniform(&[0u8, 1, 2]);

        assert_eq!(belief.len(), 3);
        assert!((belief.total() - 1.0).abs() < 1e-12);
        assert!((belief.probability(1) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(belief.probability(7), 0.0);
    }

    #[test]
    fn test_from_weights_normalizes() {
        let belief = BeliefDistribution::from_weights([(0u8, 1.0), (2, 3.0)]).unwrap();

        assert_eq!(belief.probability(0), 0.25);
        assert_eq!(belief.probability(2), 0.75);
        assert!(BeliefDistribution::from_weights([(0u8, 0.0)]).is_none());
        assert!(BeliefDistribution::<u8>::from_weights([]).is_none());
    }

    #[test]
    fn test_conditioned_on_excludes_own() {
        let belief = BeliefDistribution::uniform(&[0u8, 1, 2]);

        let candidates = belief.conditioned_on(1);

        assert_eq!(candidates, vec![(0, 0.5), (2, 0.5)]);
    }

    #[test]
    fn test_conditioned_on_falls_back_to_uniform() {
        let belief = BeliefDistribution::from_weights([(0u8, 0.0), (1, 1.0), (2, 0.0)]).unwrap();

        let candidates = belief.conditioned_on(1);

        assert_eq!(candidates, vec![(0, 0.5), (2, 0.5)]);
    }

    #[test]
    fn test_sample_excluding_never_returns_own() {
        let belief = BeliefDistribution::uniform(&[0u8, 1, 2]);
        let mut rng = GameRng::new(11);

        for _ in 0..200 {
            let drawn = belief.sample_excluding(2, &mut rng).unwrap();
            assert_ne!(drawn, 2);
        }
    }

    #[test]
    fn test_sample_follows_mass() {
        let belief = BeliefDistribution::from_weights([(0u8, 0.9), (1, 0.0), (2, 0.1)]).unwrap();
        let mut rng = GameRng::new(5);

        let zeros = (0..2000)
            .filter(|_| belief.sample_excluding(1, &mut rng) == Some(0))
            .count();

        let share = zeros as f64 / 2000.0;
        assert!((share - 0.9).abs() < 0.04, "share was {share}");
    }
}
