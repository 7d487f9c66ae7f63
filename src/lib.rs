//! # duel-sat
//!
//! A War-style two-player card duel encoded as a boolean formula, with exact
//! outcome likelihoods computed by a model-counting oracle.
//!
//! ## Design Principles
//!
//! 1. **Propositions Are Values**: Every unknown is a structural `Prop`; equal
//!    propositions are the same variable, no matter which encoder built them.
//!
//! 2. **Explicit Accumulation**: Encoders write into a `ConstraintSink` passed
//!    by `&mut`. The `FormulaBuilder` is finalized into an immutable `Formula`.
//!
//! 3. **Exact Counting**: Helper variables (tie-break states, win counters,
//!    leads) are fully defined, so model counts measure games, not encodings.
//!
//! ## Architecture
//!
//! - **Bounded Tie-Break**: A per-round state machine allocates auxiliary
//!   flip rounds up to a configured depth, then records a final tie.
//!
//! - **Order-Independent Formula**: Per-round clause buffers are built in
//!   parallel and merged into a deduplicated clause set.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `cards`: Cards, decks, rank comparison
//! - `logic`: Propositions, constraint sinks, counters, formulas
//! - `encoding`: Ownership, rounds, tie-break, outcome aggregation
//! - `oracle`: Satisfiability and model-counting backends
//! - `report`: Likelihood report and witness games

pub mod cards;
pub mod core;
pub mod encoding;
pub mod logic;
pub mod oracle;
pub mod report;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, DuelConfig, DuelRng, OwnershipPolicy, Player, PlayerMap, TieBreakConfig,
    WinTarget,
};

pub use crate::cards::{Card, Deck, Rank, RankComparator, RankRelation, Suit};

pub use crate::logic::{
    ConstraintBuffer, ConstraintSink, Formula, FormulaBuilder, Lit, Model, Prop, Round,
};

pub use crate::encoding::{DuelEncoder, EncodedDuel, Partition, Resolution};

pub use crate::oracle::{CancelToken, Oracle, OracleError, VarisatOracle};

pub use crate::report::{analyze, DuelReport, RoundReport, WitnessGame};
