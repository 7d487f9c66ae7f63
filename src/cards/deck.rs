//! The canonical deck a duel is played with.
//!
//! The standard deck is 13 ranks × 4 suits. Reduced decks (fewer ranks or
//! suits) keep exact model counting tractable and are what most tests use.

use rustc_hash::FxHashSet;

use super::card::{Card, Rank, Suit};

/// An ordered, duplicate-free set of cards.
///
/// Cards are kept sorted by `(rank, suit)` so every consumer iterates them in
/// the same order regardless of how the deck was built.
///
/// ```
/// use duel_sat::cards::{Deck, Rank, Suit};
///
/// let deck = Deck::standard();
/// assert_eq!(deck.len(), 52);
///
/// let small = Deck::new([Rank::new(1), Rank::new(2)], [Suit::Hearts, Suit::Diamonds]);
/// assert_eq!(small.len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vec<Card>,
    members: FxHashSet<Card>,
}

impl Deck {
    /// Build a deck from the cross product of `ranks` and `suits`.
    pub fn new(ranks: impl IntoIterator<Item = Rank>, suits: impl IntoIterator<Item = Suit>) -> Self {
        let suits: Vec<Suit> = suits.into_iter().collect();
        let cards = ranks
            .into_iter()
            .flat_map(|rank| suits.iter().map(move |&suit| Card::new(rank, suit)));
        Self::from_cards(cards)
    }

    /// The full 52-card deck.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(Rank::all(), Suit::ALL)
    }

    /// The lowest `rank_count` ranks in the first `suit_count` suits.
    ///
    /// Panics if either count is out of range.
    #[must_use]
    pub fn reduced(rank_count: u8, suit_count: usize) -> Self {
        assert!((1..=13).contains(&rank_count), "rank count must be 1-13");
        assert!((1..=4).contains(&suit_count), "suit count must be 1-4");
        Self::new((1..=rank_count).map(Rank::new), Suit::ALL[..suit_count].iter().copied())
    }

    /// Build a deck from explicit cards. Duplicates collapse.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut cards: Vec<Card> = cards.into_iter().collect();
        cards.sort();
        cards.dedup();
        let members = cards.iter().copied().collect();
        Self { cards, members }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck has no cards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards, sorted.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over the cards in deck order.
    pub fn iter(&self) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied()
    }

    /// Check whether the deck contains a card.
    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.members.contains(&card)
    }

    /// Cards of the same rank as `card`, including `card` itself.
    pub fn same_rank(&self, card: Card) -> impl Iterator<Item = Card> + '_ {
        self.iter().filter(move |c| c.rank == card.rank)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_deck() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), 52);
        assert!(deck.contains(Card::new(Rank::new(13), Suit::Spades)));
        assert_eq!(deck.cards()[0], Card::new(Rank::new(1), Suit::Hearts));
    }

    #[test]
    fn test_duplicates_collapse() {
        let c = Card::new(Rank::new(2), Suit::Hearts);
        let deck = Deck::from_cards([c, c, c]);
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_reduced_deck() {
        let deck = Deck::reduced(4, 2);
        assert_eq!(deck.len(), 8);
        assert!(!deck.contains(Card::new(Rank::new(5), Suit::Hearts)));
        assert!(!deck.contains(Card::new(Rank::new(1), Suit::Clubs)));
    }

    #[test]
    fn test_same_rank() {
        let deck = Deck::reduced(2, 2);
        let two_hearts = Card::new(Rank::new(2), Suit::Hearts);

        let same: Vec<_> = deck.same_rank(two_hearts).collect();
        assert_eq!(same.len(), 2);
        assert!(same.iter().all(|c| c.rank == two_hearts.rank));
    }

    #[test]
    #[should_panic(expected = "rank count must be 1-13")]
    fn test_reduced_rejects_zero_ranks() {
        let _ = Deck::reduced(0, 4);
    }
}
