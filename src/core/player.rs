//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! The duel always has exactly two seats, `Player::A` and `Player::B`.
//!
//! ## PlayerMap
//!
//! Fixed-size per-player storage backed by an array for O(1) access.
//! Supports iteration and indexing by `Player`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two duel seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Player {
    A,
    B,
}

impl Player {
    /// Both players, A first.
    pub const ALL: [Player; 2] = [Player::A, Player::B];

    /// The other seat.
    ///
    /// ```
    /// use duel_sat::core::Player;
    ///
    /// assert_eq!(Player::A.opponent(), Player::B);
    /// assert_eq!(Player::B.opponent(), Player::A);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Get the 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::A => 0,
            Player::B => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::A => write!(f, "Player A"),
            Player::B => write!(f, "Player B"),
        }
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" | "player a" => Ok(Player::A),
            "b" | "player b" => Ok(Player::B),
            other => Err(format!("unknown player '{other}', expected 'a' or 'b'")),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use duel_sat::core::{Player, PlayerMap};
///
/// let mut wins: PlayerMap<u32> = PlayerMap::new(|_| 0);
/// wins[Player::B] += 3;
///
/// assert_eq!(wins[Player::A], 0);
/// assert_eq!(wins[Player::B], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::A), factory(Player::B)],
        }
    }

    /// Like `new`, stopping at the first failing entry.
    pub fn try_new<E>(factory: impl Fn(Player) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            data: [factory(Player::A)?, factory(Player::B)?],
        })
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs, A first.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_basics() {
        assert_eq!(Player::A.index(), 0);
        assert_eq!(Player::B.index(), 1);
        assert_eq!(Player::A.opponent().opponent(), Player::A);
        assert_eq!(format!("{}", Player::A), "Player A");
    }

    #[test]
    fn test_player_parse() {
        assert_eq!("a".parse::<Player>(), Ok(Player::A));
        assert_eq!("Player B".parse::<Player>(), Ok(Player::B));
        assert!("c".parse::<Player>().is_err());
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<usize> = PlayerMap::new(|p| p.index() * 10);
        assert_eq!(map[Player::A], 0);
        assert_eq!(map[Player::B], 10);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<i32> = PlayerMap::with_value(0);
        map[Player::A] = 10;
        *map.get_mut(Player::B) += 20;

        assert_eq!(map[Player::A], 10);
        assert_eq!(map[Player::B], 20);
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Player::A, &1), (Player::B, &2)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
