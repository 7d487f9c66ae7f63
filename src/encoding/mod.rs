//! Game semantics as constraints.
//!
//! Each stage writes into a `ConstraintSink`; `DuelEncoder` drives them in
//! order and produces one `Formula`:
//!
//! 1. `ranks`: Rank order facts over the deck
//! 2. `ownership`: Deal and ownership constraints
//! 3. `rounds`: Plays, comparisons and outcome per primary round
//! 4. `tiebreak`: Bounded tie-break blocks for tied rounds
//! 5. `outcome`: Win counters, overall winner and draw, win quota

pub mod duel;
pub mod outcome;
pub mod ownership;
pub mod ranks;
pub mod rounds;
pub mod tiebreak;

pub use duel::{DuelEncoder, EncodedDuel};
pub use outcome::OutcomeAggregator;
pub use ownership::{OwnershipAssigner, Partition};
pub use ranks::encode_rank_order;
pub use rounds::RoundEncoder;
pub use tiebreak::{Resolution, TieBreakResolver};
