//! Card model: ranks, suits, decks, and rank comparison.
//!
//! ## Key Types
//!
//! - `Card`: Structural `(rank, suit)` value
//! - `Deck`: Sorted, duplicate-free card set
//! - `RankComparator`: Rank-only comparison returning a `RankRelation`

pub mod card;
pub mod deck;
pub mod rank;

pub use card::{Card, Rank, Suit};
pub use deck::Deck;
pub use rank::{RankComparator, RankRelation};
