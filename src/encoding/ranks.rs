//! Rank order as asserted facts.
//!
//! The oracle only sees the formula, so the comparator's answers are written
//! into it: `HigherRank(x, y)` for every ordered pair where `x` outranks `y`,
//! `SameRank(x, y)` for every pair of equal rank. Lower pairs need nothing;
//! they are covered by the reversed pair's `HigherRank`.

use tracing::debug;

use crate::cards::{Card, Deck, RankComparator, RankRelation};
use crate::logic::{ConstraintSink, Prop};

/// Proposition stating how `x` relates to `y`, or `None` when `x` is lower.
#[must_use]
pub fn relation_prop(x: Card, y: Card) -> Option<Prop> {
    match RankComparator::compare(x, y) {
        RankRelation::Higher => Some(Prop::HigherRank { x, y }),
        RankRelation::Same => Some(Prop::SameRank { x, y }),
        RankRelation::Lower => None,
    }
}

/// Assert the rank relation for every ordered pair of deck cards.
pub fn encode_rank_order<S: ConstraintSink + ?Sized>(deck: &Deck, sink: &mut S) {
    let mut asserted = 0usize;
    for x in deck.iter() {
        for y in deck.iter() {
            if let Some(prop) = relation_prop(x, y) {
                sink.unit(prop.lit());
                asserted += 1;
            }
        }
    }
    debug!(cards = deck.len(), asserted, "encoded rank order");
}
