//! Playing card value types.
//!
//! A `Card` is a plain `(rank, suit)` pair. Identity is structural: two cards
//! built from the same rank and suit are equal and hash identically, which is
//! what lets the formula deduplicate propositions mentioning them.

use serde::{Deserialize, Serialize};

/// Card rank, 1 (ace) through 13 (king).
///
/// Ordering is numeric; the ace is low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rank(u8);

impl Rank {
    /// Lowest rank.
    pub const MIN: Rank = Rank(1);
    /// Highest rank.
    pub const MAX: Rank = Rank(13);

    /// Ranks counted as "high cards" by the biased ownership policy.
    pub const DEFAULT_HIGH: [Rank; 5] = [Rank(1), Rank(10), Rank(11), Rank(12), Rank(13)];

    /// Create a rank, panicking outside `1..=13`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        assert!(value >= Self::MIN.0 && value <= Self::MAX.0, "Rank must be in 1..=13");
        Self(value)
    }

    /// Create a rank, returning `None` outside `1..=13`.
    #[must_use]
    pub const fn try_new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Get the raw rank value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Iterate over all thirteen ranks in ascending order.
    pub fn all() -> impl Iterator<Item = Rank> {
        (Self::MIN.0..=Self::MAX.0).map(Rank)
    }
}

impl TryFrom<u8> for Rank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::try_new(value).ok_or_else(|| format!("rank {value} outside 1..=13"))
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Card suit. Suits never affect ordering between cards in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'h' | '♥' => Some(Suit::Hearts),
            'd' | '♦' => Some(Suit::Diamonds),
            'c' | '♣' => Some(Suit::Clubs),
            's' | '♠' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single playing card.
///
/// ```
/// use duel_sat::cards::{Card, Rank, Suit};
///
/// let a = Card::new(Rank::new(12), Suit::Spades);
/// let b: Card = "12s".parse().unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "12♠");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Create a new card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl std::str::FromStr for Card {
    type Err = String;

    /// Parse `"<rank><suit>"`, e.g. `"1h"`, `"10d"`, `"13♠"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let suit_char = s.chars().last().ok_or_else(|| "empty card".to_string())?;
        let suit = Suit::from_char(suit_char).ok_or_else(|| format!("bad suit in '{s}'"))?;
        let rank_part = &s[..s.len() - suit_char.len_utf8()];
        let value: u8 = rank_part
            .parse()
            .map_err(|_| format!("bad rank in '{s}'"))?;
        let rank = Rank::try_from(value)?;
        Ok(Card::new(rank, suit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_bounds() {
        assert!(Rank::try_new(0).is_none());
        assert!(Rank::try_new(14).is_none());
        assert_eq!(Rank::try_new(13), Some(Rank::MAX));
        assert_eq!(Rank::all().count(), 13);
    }

    #[test]
    #[should_panic(expected = "Rank must be in 1..=13")]
    fn test_rank_new_panics() {
        let _ = Rank::new(14);
    }

    #[test]
    fn test_structural_identity() {
        use rustc_hash::FxHashSet;

        let mut set = FxHashSet::default();
        set.insert(Card::new(Rank::new(5), Suit::Clubs));
        set.insert(Card::new(Rank::new(5), Suit::Clubs));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_parse_and_display() {
        let card: Card = "10d".parse().unwrap();
        assert_eq!(card, Card::new(Rank::new(10), Suit::Diamonds));
        assert_eq!(card.to_string(), "10♦");
        assert_eq!("1♥".parse::<Card>().unwrap().to_string(), "1♥");

        assert!("14h".parse::<Card>().is_err());
        assert!("5x".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn test_rank_serde_rejects_out_of_range() {
        let card = Card::new(Rank::new(3), Suit::Hearts);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(serde_json::from_str::<Card>(&json).unwrap(), card);

        assert!(serde_json::from_str::<Rank>("0").is_err());
    }
}
