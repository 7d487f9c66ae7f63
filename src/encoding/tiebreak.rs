//! Tie-break resolution.
//!
//! A tied primary round `r` enters `Tied { r, depth: 0 }`. Each tied state
//! allocates one block of auxiliary rounds: `face_down` flips that do not
//! count, then one decisive flip compared with the same rank relation as a
//! primary round. A strict decisive comparison credits `Wins(·, r)` of the
//! primary round; an equal one moves to `Tied { r, depth + 1 }`. Once the
//! depth reaches `max_depth` no further block is allocated and the tie is
//! final: `FinalTie(r)`, with neither player winning `r`.
//!
//! Auxiliary rounds only happen when their tied state holds, so an untied
//! round contributes no auxiliary plays at all.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::rounds::RoundEncoder;
use crate::core::{Player, TieBreakConfig};
use crate::logic::{ConstraintBuffer, ConstraintSink, Model, Prop, Round};

/// Encoding-time state of one round's tie-break.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TieState {
    Tied { depth: u8 },
    Exhausted,
}

/// How a tied round was settled in a concrete model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// `winner` took the round after `blocks` tie-break blocks.
    Decided { winner: Player, blocks: u8 },
    /// Every allowed block tied again; the round is a final tie.
    Exhausted,
}

/// Appends the bounded tie-break state machine to primary rounds.
pub struct TieBreakResolver<'r, 'd> {
    rounds: &'r RoundEncoder<'d>,
    config: TieBreakConfig,
}

impl<'r, 'd> TieBreakResolver<'r, 'd> {
    #[must_use]
    pub fn new(rounds: &'r RoundEncoder<'d>, config: TieBreakConfig) -> Self {
        Self { rounds, config }
    }

    /// Auxiliary round of `round`'s tie-break.
    #[must_use]
    pub const fn aux_round(round: u16, depth: u8, flip: u8) -> Round {
        Round::TieBreak { round, depth, flip }
    }

    /// Tie-break constraints for primary round `round`.
    #[must_use]
    pub fn encode_round(&self, round: u16) -> ConstraintBuffer {
        let mut buf = ConstraintBuffer::new();
        let mut state = TieState::Tied { depth: 0 };
        loop {
            state = match state {
                TieState::Tied { depth } if depth < self.config.max_depth => {
                    self.encode_block(&mut buf, round, depth);
                    TieState::Tied { depth: depth + 1 }
                }
                TieState::Tied { depth } => {
                    self.encode_terminal(&mut buf, round, depth);
                    TieState::Exhausted
                }
                TieState::Exhausted => break,
            };
        }
        trace!(round, clauses = buf.len(), "encoded tie-break");
        buf
    }

    fn encode_block(&self, buf: &mut ConstraintBuffer, round: u16, depth: u8) {
        let guard = Prop::Tied { round, depth }.lit();
        for flip in 0..=self.config.face_down {
            self.rounds
                .encode_plays(buf, Self::aux_round(round, depth, flip), Some(guard));
        }

        // decisive flip reports onto the primary round
        let decisive = Self::aux_round(round, depth, self.config.face_down);
        self.rounds.encode_comparisons(
            buf,
            decisive,
            round,
            Prop::Tied {
                round,
                depth: depth + 1,
            },
        );
    }

    fn encode_terminal(&self, buf: &mut ConstraintBuffer, round: u16, depth: u8) {
        let tied = Prop::Tied { round, depth }.lit();
        let final_tie = Prop::FinalTie { round }.lit();

        buf.implies(&[tied], final_tie);
        buf.implies(&[final_tie], tied);
        buf.implies(&[tied], Prop::Tie { round }.lit());
        for player in Player::ALL {
            buf.implies(&[tied], Prop::wins(player, round).neg());
        }
    }

    /// Read the tie-break of primary round `round` out of a model.
    ///
    /// Returns `None` when the round was not tied in the first place.
    #[must_use]
    pub fn resolve(model: &Model, round: u16, config: TieBreakConfig) -> Option<Resolution> {
        if !model.holds(Prop::Tied { round, depth: 0 }) {
            return None;
        }
        let mut depth = 0;
        while depth < config.max_depth && model.holds(Prop::Tied { round, depth: depth + 1 }) {
            depth += 1;
        }
        if depth == config.max_depth {
            return Some(Resolution::Exhausted);
        }
        let winner = Player::ALL
            .into_iter()
            .find(|&p| model.holds(Prop::wins(p, round)))
            .unwrap_or_else(|| panic!("round {round} left tie-break without a winner"));
        Some(Resolution::Decided {
            winner,
            blocks: depth + 1,
        })
    }
}
