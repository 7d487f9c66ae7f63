//! Property tests for rank order, dealing and formula construction.

use std::collections::HashSet;

use duel_sat::cards::{Card, Deck, Rank, RankComparator, RankRelation, Suit};
use duel_sat::core::{DuelConfig, DuelRng, OwnershipPolicy, Player, TieBreakConfig};
use duel_sat::encoding::{encode_rank_order, DuelEncoder, OwnershipAssigner};
use duel_sat::logic::{FormulaBuilder, Prop};
use proptest::prelude::*;

fn any_card() -> impl Strategy<Value = Card> {
    (1u8..=13, 0usize..4).prop_map(|(r, s)| Card::new(Rank::new(r), Suit::ALL[s]))
}

fn any_player() -> impl Strategy<Value = Player> {
    prop_oneof![Just(Player::A), Just(Player::B)]
}

proptest! {
    /// Exactly one of Higher(x, y), Higher(y, x), Same(x, y).
    #[test]
    fn prop_rank_relation_is_total(x in any_card(), y in any_card()) {
        let forward = RankComparator::compare(x, y);
        prop_assert_eq!(RankComparator::compare(y, x), forward.reverse());

        let holds = [
            RankComparator::higher(x, y),
            RankComparator::higher(y, x),
            forward == RankRelation::Same,
        ];
        prop_assert_eq!(holds.iter().filter(|&&h| h).count(), 1);
        prop_assert_eq!(forward == RankRelation::Same, x.rank == y.rank);
    }

    #[test]
    fn prop_higher_is_irreflexive_and_transitive(x in any_card(), y in any_card(), z in any_card()) {
        prop_assert!(!RankComparator::higher(x, x));
        if RankComparator::higher(x, y) && RankComparator::higher(y, z) {
            prop_assert!(RankComparator::higher(x, z));
        }
        if RankComparator::higher(x, y) {
            prop_assert!(!RankComparator::higher(y, x));
        }
    }

    /// The formula asserts HigherRank exactly for outranking pairs.
    #[test]
    fn prop_rank_facts_match_comparator(ranks in 1u8..=6, suits in 1usize..=4) {
        let deck = Deck::reduced(ranks, suits);
        let mut builder = FormulaBuilder::new();
        encode_rank_order(&deck, &mut builder);
        let formula = builder.finish();

        for x in deck.iter() {
            for y in deck.iter() {
                prop_assert_eq!(
                    formula.contains(Prop::HigherRank { x, y }),
                    RankComparator::higher(x, y)
                );
                prop_assert_eq!(formula.contains(Prop::SameRank { x, y }), x.rank == y.rank);
            }
        }
    }

    /// Random dealing splits the deck into two disjoint halves.
    #[test]
    fn prop_random_deal_partitions_deck(seed in any::<u64>()) {
        let deck = Deck::standard();
        let partition = OwnershipAssigner::assign(&OwnershipPolicy::Random, &deck, &mut DuelRng::new(seed)).unwrap();
        let a = partition.hand(Player::A).unwrap();
        let b = partition.hand(Player::B).unwrap();

        prop_assert_eq!(a.len(), 26);
        prop_assert_eq!(b.len(), 26);
        let all: HashSet<Card> = a.iter().chain(b).copied().collect();
        prop_assert_eq!(all.len(), 52);
    }

    /// The favored player gets exactly the requested number of high cards.
    #[test]
    fn prop_biased_deal_counts_high_cards(
        seed in any::<u64>(),
        favored in any_player(),
        high_cards in 0usize..=20,
    ) {
        let deck = Deck::standard();
        let policy = OwnershipPolicy::biased(favored, high_cards);
        let partition = OwnershipAssigner::assign(&policy, &deck, &mut DuelRng::new(seed)).unwrap();

        let hand = partition.hand(favored).unwrap();
        let high = hand.iter().filter(|c| Rank::DEFAULT_HIGH.contains(&c.rank)).count();
        prop_assert_eq!(hand.len(), 26);
        prop_assert_eq!(high, high_cards);
    }

    /// Same configuration and seed, same formula.
    #[test]
    fn prop_encoding_is_reproducible(seed in any::<u64>(), horizon in 1u16..=3) {
        let config = DuelConfig::default()
            .with_horizon(horizon)
            .with_tie_break(TieBreakConfig { max_depth: 1, face_down: 1 })
            .with_seed(seed);
        let first = DuelEncoder::new(Deck::reduced(3, 2), config.clone()).encode().unwrap();
        let second = DuelEncoder::new(Deck::reduced(3, 2), config).encode().unwrap();
        prop_assert_eq!(first.formula, second.formula);
    }
}
