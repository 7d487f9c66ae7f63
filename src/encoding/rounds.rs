//! Per-round play and outcome constraints.
//!
//! Each primary round gets:
//! 1. exactly one play per player,
//! 2. play implies ownership,
//! 3. rank comparison of the two plays implying the round outcome,
//! 4. exactly one of `Wins(A)`, `Wins(B)`, `Tie`.
//!
//! A same-rank comparison does not assert `Tie` directly: it enters the
//! tie-break state machine at `Tied { depth: 0 }`, which settles the round
//! either as a win or as a final tie.

use rayon::prelude::*;
use tracing::debug;

use crate::cards::{Deck, RankComparator, RankRelation};
use crate::core::Player;
use crate::logic::{ConstraintBuffer, ConstraintSink, Lit, Prop, Round};

/// Encodes primary rounds; also provides the play and comparison blocks
/// reused by the tie-break resolver.
pub struct RoundEncoder<'a> {
    deck: &'a Deck,
}

impl<'a> RoundEncoder<'a> {
    #[must_use]
    pub fn new(deck: &'a Deck) -> Self {
        Self { deck }
    }

    #[must_use]
    pub fn deck(&self) -> &'a Deck {
        self.deck
    }

    /// Play propositions of `player` in `round`, in deck order.
    #[must_use]
    pub fn plays(&self, player: Player, round: Round) -> Vec<Prop> {
        self.deck
            .iter()
            .map(|card| Prop::plays(player, card, round))
            .collect()
    }

    /// Exactly-one-play and ownership for both players.
    ///
    /// With a guard, the round only happens when the guard holds; otherwise
    /// nobody plays in it.
    pub fn encode_plays<S: ConstraintSink + ?Sized>(&self, sink: &mut S, round: Round, guard: Option<Lit>) {
        for player in Player::ALL {
            let plays = self.plays(player, round);
            match guard {
                Some(guard) => sink.exactly_one_when(guard, &plays),
                None => sink.exactly_one(&plays),
            }
            for card in self.deck.iter() {
                sink.implies(&[Prop::plays(player, card, round).lit()], Prop::owns(player, card).lit());
            }
        }
    }

    /// Rank comparison of the two plays in `round`.
    ///
    /// A strict win is credited to primary round `target`; equal ranks imply
    /// `on_same`, which is also defined backwards so it holds only when the
    /// two plays really share a rank.
    pub fn encode_comparisons<S: ConstraintSink + ?Sized>(
        &self,
        sink: &mut S,
        round: Round,
        target: u16,
        on_same: Prop,
    ) {
        for x in self.deck.iter() {
            let play_a = Prop::plays(Player::A, x, round).lit();
            for y in self.deck.iter() {
                let play_b = Prop::plays(Player::B, y, round).lit();
                match RankComparator::compare(x, y) {
                    RankRelation::Higher => sink.implies(
                        &[play_a, play_b, Prop::HigherRank { x, y }.lit()],
                        Prop::wins(Player::A, target).lit(),
                    ),
                    RankRelation::Lower => sink.implies(
                        &[play_a, play_b, Prop::HigherRank { x: y, y: x }.lit()],
                        Prop::wins(Player::B, target).lit(),
                    ),
                    RankRelation::Same => sink.implies(
                        &[play_a, play_b, Prop::SameRank { x, y }.lit()],
                        on_same.lit(),
                    ),
                }
            }

            // on_same ∧ A plays x ⇒ B plays a card of x's rank
            let partners: Vec<Lit> = self
                .deck
                .same_rank(x)
                .map(|y| Prop::plays(Player::B, y, round).lit())
                .collect();
            sink.implies_any(&[on_same.lit(), play_a], &partners);
        }

        // on_same ⇒ the round was played at all
        let any_a: Vec<Lit> = self.plays(Player::A, round).iter().map(|p| p.lit()).collect();
        sink.implies_any(&[on_same.lit()], &any_a);
    }

    /// Every constraint of primary round `round`.
    #[must_use]
    pub fn encode_round(&self, round: u16) -> ConstraintBuffer {
        let mut buf = ConstraintBuffer::new();
        let r = Round::Primary(round);

        self.encode_plays(&mut buf, r, None);
        self.encode_comparisons(&mut buf, r, round, Prop::Tied { round, depth: 0 });
        buf.exactly_one(&[
            Prop::wins(Player::A, round),
            Prop::wins(Player::B, round),
            Prop::Tie { round },
        ]);
        buf
    }

    /// Primary rounds `1..=horizon`, one buffer per round, built in parallel.
    #[must_use]
    pub fn encode_all(&self, horizon: u16) -> Vec<ConstraintBuffer> {
        let buffers: Vec<ConstraintBuffer> = (1..=horizon)
            .into_par_iter()
            .map(|round| self.encode_round(round))
            .collect();
        debug!(
            horizon,
            clauses = buffers.iter().map(ConstraintBuffer::len).sum::<usize>(),
            "encoded primary rounds"
        );
        buffers
    }

    /// No player plays the same card in two primary rounds.
    pub fn encode_no_replay<S: ConstraintSink + ?Sized>(&self, sink: &mut S, horizon: u16) {
        for player in Player::ALL {
            for card in self.deck.iter() {
                let plays: Vec<Prop> = (1..=horizon)
                    .map(|r| Prop::plays(player, card, Round::Primary(r)))
                    .collect();
                sink.at_most_one(&plays);
            }
        }
    }
}
