//! Propositions and literals.
//!
//! A `Prop` is a named boolean unknown. Propositions are plain values: two
//! separately built `Prop::Plays { .. }` with equal fields are the same
//! variable once they reach a `FormulaBuilder`.
//!
//! Round outcomes (`Wins`, `Tie`, `FinalTie`) are keyed by the primary round
//! number only. Auxiliary tie-break rounds exist for `Plays`, but nothing can
//! record an outcome against them.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::Player;

/// A round in which cards are played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Round {
    /// Primary round, numbered from 1.
    Primary(u16),
    /// Auxiliary flip inside the tie-break of primary round `round`.
    TieBreak { round: u16, depth: u8, flip: u8 },
}

impl Round {
    /// The primary round this round belongs to.
    #[must_use]
    pub const fn primary(self) -> u16 {
        match self {
            Round::Primary(r) | Round::TieBreak { round: r, .. } => r,
        }
    }

    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Round::Primary(_))
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Round::Primary(r) => write!(f, "round {r}"),
            Round::TieBreak { round, depth, flip } => {
                write!(f, "round {round} tie-break {depth} flip {flip}")
            }
        }
    }
}

/// A boolean proposition about the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Prop {
    /// `player` owns `card`.
    Owns { player: Player, card: Card },
    /// `player` plays `card` in `round`.
    Plays { player: Player, card: Card, round: Round },
    /// `x` outranks `y`.
    HigherRank { x: Card, y: Card },
    /// `x` and `y` have equal rank.
    SameRank { x: Card, y: Card },
    /// `player` wins primary round `round`.
    Wins { player: Player, round: u16 },
    /// Primary round `round` ends without a winner.
    Tie { round: u16 },
    /// The tie of primary round `round` survived every tie-break block.
    FinalTie { round: u16 },
    /// Primary round `round` is still tied after `depth` tie-break blocks.
    Tied { round: u16, depth: u8 },
    /// `player` wins at least `at_least` of the first `prefix` primary rounds.
    WinCount { player: Player, prefix: u16, at_least: u16 },
    /// `player` has at least `at_least` wins and the opponent has fewer.
    Lead { player: Player, at_least: u16 },
    /// `player` wins strictly more primary rounds than the opponent.
    OverallWinner { player: Player },
    /// Both players win the same number of primary rounds.
    Draw,
}

impl Prop {
    /// Positive literal of this proposition.
    #[must_use]
    pub const fn lit(self) -> Lit {
        Lit {
            prop: self,
            positive: true,
        }
    }

    /// Negative literal of this proposition.
    #[must_use]
    pub const fn neg(self) -> Lit {
        Lit {
            prop: self,
            positive: false,
        }
    }

    pub const fn owns(player: Player, card: Card) -> Self {
        Prop::Owns { player, card }
    }

    pub const fn plays(player: Player, card: Card, round: Round) -> Self {
        Prop::Plays {
            player,
            card,
            round,
        }
    }

    pub const fn wins(player: Player, round: u16) -> Self {
        Prop::Wins { player, round }
    }
}

impl std::fmt::Display for Prop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prop::Owns { player, card } => write!(f, "{player} owns {card}"),
            Prop::Plays {
                player,
                card,
                round,
            } => write!(f, "{player} plays {card} in {round}"),
            Prop::HigherRank { x, y } => write!(f, "rank {x} > rank {y}"),
            Prop::SameRank { x, y } => write!(f, "rank {x} = rank {y}"),
            Prop::Wins { player, round } => write!(f, "{player} wins round {round}"),
            Prop::Tie { round } => write!(f, "tie in round {round}"),
            Prop::FinalTie { round } => write!(f, "final tie in round {round}"),
            Prop::Tied { round, depth } => write!(f, "round {round} tied after {depth} tie-breaks"),
            Prop::WinCount {
                player,
                prefix,
                at_least,
            } => write!(f, "{player} wins >= {at_least} of rounds 1..={prefix}"),
            Prop::Lead { player, at_least } => {
                write!(f, "{player} reaches {at_least} wins, opponent does not")
            }
            Prop::OverallWinner { player } => write!(f, "{player} is the overall winner"),
            Prop::Draw => write!(f, "overall draw"),
        }
    }
}

/// A proposition with a polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Lit {
    pub prop: Prop,
    pub positive: bool,
}

impl std::ops::Not for Lit {
    type Output = Lit;

    fn not(self) -> Lit {
        Lit {
            prop: self.prop,
            positive: !self.positive,
        }
    }
}

impl From<Prop> for Lit {
    fn from(prop: Prop) -> Self {
        prop.lit()
    }
}

impl std::fmt::Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.positive {
            write!(f, "{}", self.prop)
        } else {
            write!(f, "¬({})", self.prop)
        }
    }
}
