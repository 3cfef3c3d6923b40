//! History-indexed search tables.
//!
//! The "tree" is a map from histories to their statistics rather than an
//! arena of nodes: the same history reached through different
//! determinizations must share one node.

use rustc_hash::FxHashMap;

use super::node::{EdgeStats, HistoryNode};
use crate::core::{Action, History, PlayerId, PlayerMap};
use crate::rules::PerspectiveView;

/// Edge, visit, and Q tables for one search instance.
#[derive(Clone, Debug)]
pub struct SearchTables<O: Clone> {
    nodes: FxHashMap<History<O>, HistoryNode>,
}

impl<O: PerspectiveView> Default for SearchTables<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: PerspectiveView> SearchTables<O> {
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
        }
    }

    /// Has `history` been registered?
    #[must_use]
    pub fn contains(&self, history: &History<O>) -> bool {
        self.nodes.contains_key(history)
    }

    /// Register `history` with zeroed edges for each action in `legal`.
    ///
    /// Returns false if it was already registered (statistics untouched).
    pub fn register(&mut self, history: &History<O>, legal: &[Action]) -> bool {
        if self.contains(history) {
            return false;
        }
        self.nodes.insert(history.clone(), HistoryNode::new(legal));
        true
    }

    #[must_use]
    pub fn node(&self, history: &History<O>) -> Option<&HistoryNode> {
        self.nodes.get(history)
    }

    /// Total simulations through `history`.
    #[must_use]
    pub fn visits(&self, history: &History<O>) -> u32 {
        self.node(history).map_or(0, |node| node.visits)
    }

    #[must_use]
    pub fn edge(&self, history: &History<O>, action: Action) -> Option<&EdgeStats> {
        self.node(history).and_then(|node| node.edge(action))
    }

    /// Visits through (history, action).
    #[must_use]
    pub fn edge_visits(&self, history: &History<O>, action: Action) -> u32 {
        self.edge(history, action).map_or(0, |edge| edge.visits)
    }

    /// Q estimate of (history, action) for `player`; zero if never visited.
    #[must_use]
    pub fn q(&self, history: &History<O>, action: Action, player: PlayerId) -> f64 {
        self.edge(history, action).map_or(0.0, |edge| edge.mean(player))
    }

    /// Record a backup through (history, action).
    ///
    /// # Panics
    ///
    /// Panics if `history` was never registered: backups only follow a
    /// selection from a registered node.
    pub fn backup(&mut self, history: &History<O>, action: Action, returns: &PlayerMap<f64>) {
        self.nodes
            .get_mut(history)
            .expect("backup through an unregistered history")
            .backup(action, returns);
    }

    /// Number of registered histories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every statistic.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Summary of the tables.
    #[must_use]
    pub fn stats(&self) -> TableStats {
        TableStats {
            histories: self.nodes.len(),
            edges: self.nodes.values().map(|node| node.edges.len()).sum(),
            visited_edges: self
                .nodes
                .values()
                .flat_map(|node| node.edges.values())
                .filter(|edge| edge.visits > 0)
                .count(),
            longest_history: self.nodes.keys().map(History::len).max().unwrap_or(0),
        }
    }
}

/// Size summary of the search tables.
#[derive(Clone, Debug, Default)]
pub struct TableStats {
    pub histories: usize,
    /// Registered edges (every legal action of every history).
    pub edges: usize,
    /// Edges with at least one backup.
    pub visited_edges: usize,
    /// Observations in the deepest registered history.
    pub longest_history: usize,
}

impl TableStats {
    /// Average registered edges per history.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.histories == 0 {
            0.0
        } else {
            self.edges as f64 / self.histories as f64
        }
    }

    /// Fraction of registered edges that were ever backed up.
    #[must_use]
    pub fn coverage(&self) -> f64 {
        if self.edges == 0 {
            0.0
        } else {
            self.visited_edges as f64 / self.edges as f64
        }
    }
}
