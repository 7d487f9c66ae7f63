//! Rank comparison between cards.
//!
//! Only the rank takes part in the comparison; suit never breaks a tie.

use serde::{Deserialize, Serialize};

use super::card::Card;

/// Outcome of comparing the rank of one card against another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankRelation {
    /// Left card outranks the right one.
    Higher,
    /// Equal rank, suit ignored.
    Same,
    /// Right card outranks the left one.
    Lower,
}

impl RankRelation {
    /// The relation seen from the other side.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            RankRelation::Higher => RankRelation::Lower,
            RankRelation::Same => RankRelation::Same,
            RankRelation::Lower => RankRelation::Higher,
        }
    }
}

/// Pure rank comparator.
///
/// ```
/// use duel_sat::cards::{Card, RankComparator, RankRelation};
///
/// let x: Card = "10h".parse().unwrap();
/// let y: Card = "10s".parse().unwrap();
/// assert_eq!(RankComparator::compare(x, y), RankRelation::Same);
/// ```
pub struct RankComparator;

impl RankComparator {
    /// Compare two cards by rank.
    #[must_use]
    pub fn compare(x: Card, y: Card) -> RankRelation {
        match x.rank.cmp(&y.rank) {
            std::cmp::Ordering::Greater => RankRelation::Higher,
            std::cmp::Ordering::Equal => RankRelation::Same,
            std::cmp::Ordering::Less => RankRelation::Lower,
        }
    }

    /// True iff `x` strictly outranks `y`.
    #[must_use]
    pub fn higher(x: Card, y: Card) -> bool {
        Self::compare(x, y) == RankRelation::Higher
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_compare_ignores_suit() {
        let x = Card::new(Rank::new(7), Suit::Hearts);
        let y = Card::new(Rank::new(7), Suit::Spades);
        let z = Card::new(Rank::new(8), Suit::Hearts);

        assert_eq!(RankComparator::compare(x, y), RankRelation::Same);
        assert_eq!(RankComparator::compare(z, x), RankRelation::Higher);
        assert_eq!(RankComparator::compare(x, z), RankRelation::Lower);
    }

    #[test]
    fn test_ace_is_low() {
        let ace = Card::new(Rank::new(1), Suit::Clubs);
        let two = Card::new(Rank::new(2), Suit::Clubs);
        assert!(RankComparator::higher(two, ace));
    }

    #[test]
    fn test_reverse() {
        assert_eq!(RankRelation::Higher.reverse(), RankRelation::Lower);
        assert_eq!(RankRelation::Same.reverse(), RankRelation::Same);
    }
}
