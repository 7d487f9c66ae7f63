//! Configuration errors.
//!
//! Every variant is detected before the first constraint is emitted, so a
//! failing configuration never produces a partial formula.

use thiserror::Error;

use crate::cards::Card;

/// Invalid duel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("round horizon must be at least 1")]
    ZeroHorizon,

    #[error("deck is empty")]
    EmptyDeck,

    #[error("deck of {len} cards cannot be split in half")]
    OddDeck { len: usize },

    #[error("requested {requested} high cards but the deck only has {available}")]
    HighCardsExceeded { requested: usize, available: usize },

    #[error("requested {requested} high cards but a hand only holds {hand}")]
    HighCardsExceedHand { requested: usize, hand: usize },

    #[error("biased split needs {needed} low cards but the deck only has {available}")]
    LowCardsShort { needed: usize, available: usize },

    #[error("win percentage {percent} is outside 0..=100")]
    WinPercentOutOfRange { percent: u32 },

    #[error("{percent}% of {horizon} rounds is not a whole number of rounds")]
    NonIntegerWinQuota { percent: u32, horizon: u16 },

    #[error("card {0} is not in the deck")]
    UnknownCard(Card),

    #[error("card {0} listed more than once")]
    DuplicateCard(Card),
}
