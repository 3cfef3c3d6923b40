//! Player identification and per-player value storage.
//!
//! ## PlayerId
//!
//! Seat identifier for two-player games. `opponent()` flips the seat.
//!
//! ## PlayerMap
//!
//! Per-player storage indexed by `PlayerId`. Search returns and Q-value
//! estimates are carried as `PlayerMap<f64>`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats in every supported game.
pub const PLAYER_COUNT: usize = 2;

/// Seat identifier. The first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const ZERO: PlayerId = PlayerId(0);
    pub const ONE: PlayerId = PlayerId(1);

    /// Create a new player ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not name one of the two seats.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!((id as usize) < PLAYER_COUNT, "seat index out of range");
        Self(id)
    }

    /// Raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Iterate over both seats in order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data with O(1) access.
///
/// ```
/// use history_mcts::core::{PlayerId, PlayerMap};
///
/// let mut returns = PlayerMap::with_value(0.0);
/// returns[PlayerId::ONE] = 2.0;
/// assert_eq!(returns[PlayerId::ZERO], 0.0);
/// assert_eq!(returns.sum(), 2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create from a factory that receives each seat.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ZERO), factory(PlayerId::ONE)],
        }
    }

    /// Create from explicit per-seat values.
    pub const fn from_pair(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Set every entry to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl PlayerMap<f64> {
    /// Sum across seats. Zero for zero-sum payoffs.
    #[must_use]
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}

impl<T: Default> Default for PlayerMap<T> {
    fn default() -> Self {
        Self::new(|_| T::default())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::ZERO.index(), 0);
        assert_eq!(PlayerId::ONE.index(), 1);
        assert_eq!(format!("{}", PlayerId::ONE), "Player 1");
    }

    #[test]
    fn test_opponent_flips() {
        assert_eq!(PlayerId::ZERO.opponent(), PlayerId::ONE);
        assert_eq!(PlayerId::ONE.opponent(), PlayerId::ZERO);
        assert_eq!(PlayerId::new(1).opponent().opponent(), PlayerId::ONE);
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all().collect();
        assert_eq!(players, vec![PlayerId::ZERO, PlayerId::ONE]);
    }

    #[test]
    #[should_panic(expected = "seat index out of range")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 * 10);

        assert_eq!(map[PlayerId::ZERO], 0);
        assert_eq!(map[PlayerId::ONE], 10);
    }

    #[test]
    fn test_player_map_mutation_and_sum() {
        let mut map = PlayerMap::with_value(0.0);

        map[PlayerId::ZERO] = 3.0;
        map[PlayerId::ONE] = -3.0;

        assert_eq!(map.sum(), 0.0);
        assert_eq!(map, PlayerMap::from_pair(3.0, -3.0));
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::ZERO, &0), (PlayerId::ONE, &1)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map = PlayerMap::from_pair(1, 2);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
