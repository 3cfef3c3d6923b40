//! Per-history and per-edge search statistics.
//!
//! A search edge is identified by (history, action). It carries a visit
//! count and one running-mean return estimate per seat.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Action, PlayerId, PlayerMap};

/// Statistics for one (history, action) edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeStats {
    /// Backups through this edge.
    pub visits: u32,

    /// Mean backed-up return per seat.
    pub q: PlayerMap<f64>,
}

impl EdgeStats {
    /// Fold one backed-up return into the running means.
    ///
    /// `Q += (observed - Q) / visits` keeps `q` equal to the arithmetic
    /// mean of everything recorded so far.
    pub fn record(&mut self, returns: &PlayerMap<f64>) {
        self.visits += 1;
        let n = f64::from(self.visits);
        for (player, q) in self.q.iter_mut() {
            *q += (returns[player] - *q) / n;
        }
    }

    /// Mean return for `player`; zero before the first visit.
    #[must_use]
    pub fn mean(&self, player: PlayerId) -> f64 {
        self.q[player]
    }
}

/// A registered history: its visit total and one edge per legal action.
#[derive(Clone, Debug, Default)]
pub struct HistoryNode {
    /// Simulations that passed through this history.
    pub visits: u32,

    pub edges: FxHashMap<Action, EdgeStats>,
}

impl HistoryNode {
    /// A node with zeroed statistics for every action in `legal`.
    pub fn new(legal: &[Action]) -> Self {
        Self {
            visits: 0,
            edges: legal.iter().map(|&action| (action, EdgeStats::default())).collect(),
        }
    }

    #[must_use]
    pub fn edge(&self, action: Action) -> Option<&EdgeStats> {
        self.edges.get(&action)
    }

    /// Edge visits for `action`; zero if it has none.
    #[must_use]
    pub fn edge_visits(&self, action: Action) -> u32 {
        self.edge(action).map_or(0, |edge| edge.visits)
    }

    /// Record a backup through `action`.
    pub fn backup(&mut self, action: Action, returns: &PlayerMap<f64>) {
        self.visits += 1;
        self.edges.entry(action).or_default().record(returns);
    }
}
