//! Ownership assignment.
//!
//! Splits the deck between the two players according to an
//! `OwnershipPolicy`, then binds every card to exactly one owner in the
//! formula.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{Card, Deck};
use crate::core::{ConfigError, DuelRng, OwnershipPolicy, Player, PlayerMap};
use crate::logic::{ConstraintSink, Prop};

/// Result of dealing the deck.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Partition {
    /// Each player holds a known hand.
    Dealt(PlayerMap<Vec<Card>>),
    /// Ownership is left to the solver.
    Open,
}

impl Partition {
    /// Owner of `card`, if the deal fixed one.
    #[must_use]
    pub fn owner(&self, card: Card) -> Option<Player> {
        match self {
            Partition::Dealt(hands) => Player::ALL
                .into_iter()
                .find(|&p| hands[p].binary_search(&card).is_ok()),
            Partition::Open => None,
        }
    }

    /// A player's hand, if the deal fixed one.
    #[must_use]
    pub fn hand(&self, player: Player) -> Option<&[Card]> {
        match self {
            Partition::Dealt(hands) => Some(&hands[player]),
            Partition::Open => None,
        }
    }
}

/// Deals the deck and emits ownership constraints.
pub struct OwnershipAssigner;

impl OwnershipAssigner {
    /// Partition `deck` according to `policy`.
    ///
    /// The policy is validated first; nothing is drawn from `rng` on failure.
    pub fn assign(
        policy: &OwnershipPolicy,
        deck: &Deck,
        rng: &mut DuelRng,
    ) -> Result<Partition, ConfigError> {
        policy.validate(deck)?;
        let half = deck.len() / 2;

        let partition = match policy {
            OwnershipPolicy::Random => {
                let mut cards = deck.cards().to_vec();
                rng.shuffle(&mut cards);
                let b = cards.split_off(half);
                Self::dealt(cards, b)
            }
            OwnershipPolicy::Stacked { favored } => {
                // deck is sorted ascending, so the top half by rank is the tail
                let mut bottom = deck.cards().to_vec();
                let top = bottom.split_off(half);
                Self::dealt_to(*favored, top, bottom)
            }
            OwnershipPolicy::Biased {
                favored,
                high_cards,
                high_ranks,
            } => {
                let (high, low): (Vec<Card>, Vec<Card>) =
                    deck.iter().partition(|c| high_ranks.contains(&c.rank));
                let high_pick = rng.sample_indices(high.len(), *high_cards);
                let low_pick = rng.sample_indices(low.len(), half - high_cards);

                let mut favored_hand: Vec<Card> = high_pick.iter().map(|&i| high[i]).collect();
                favored_hand.extend(low_pick.iter().map(|&i| low[i]));
                let other_hand: Vec<Card> = deck
                    .iter()
                    .filter(|c| !favored_hand.contains(c))
                    .collect();
                Self::dealt_to(*favored, favored_hand, other_hand)
            }
            OwnershipPolicy::Fixed { a } => {
                let b: Vec<Card> = deck.iter().filter(|c| !a.contains(c)).collect();
                Self::dealt(a.clone(), b)
            }
            OwnershipPolicy::Open => Partition::Open,
        };

        if let Partition::Dealt(hands) = &partition {
            debug!(
                policy = ?policy,
                a = hands[Player::A].len(),
                b = hands[Player::B].len(),
                "dealt deck"
            );
        }
        Ok(partition)
    }

    fn dealt(mut a: Vec<Card>, mut b: Vec<Card>) -> Partition {
        a.sort();
        b.sort();
        let mut hands = PlayerMap::with_value(Vec::new());
        hands[Player::A] = a;
        hands[Player::B] = b;
        Partition::Dealt(hands)
    }

    fn dealt_to(favored: Player, favored_hand: Vec<Card>, other_hand: Vec<Card>) -> Partition {
        match favored {
            Player::A => Self::dealt(favored_hand, other_hand),
            Player::B => Self::dealt(other_hand, favored_hand),
        }
    }

    /// Bind every card to exactly one owner, and to the dealt owner if any.
    pub fn encode<S: ConstraintSink + ?Sized>(partition: &Partition, deck: &Deck, sink: &mut S) {
        for card in deck.iter() {
            sink.exactly_one(&[Prop::owns(Player::A, card), Prop::owns(Player::B, card)]);
            if let Some(owner) = partition.owner(card) {
                sink.unit(Prop::owns(owner, card).lit());
            }
        }
    }
}
