//! Propositional layer: propositions, constraint sinks, counters, formulas.
//!
//! ## Key Types
//!
//! - `Prop` / `Lit`: Structural propositions and literals
//! - `ConstraintSink`: Anything that accepts clauses, with cardinality helpers
//! - `ConstraintBuffer`: Per-step clause list, merged into the builder
//! - `FormulaBuilder`: Interning, deduplicating accumulator
//! - `Formula`: Immutable CNF handed to an oracle
//! - `WinCounter`: Fully defined unary counter over round wins

pub mod counter;
pub mod formula;
pub mod prop;
pub mod sink;

pub use counter::WinCounter;
pub use formula::{Clause, ConstraintBuffer, Formula, FormulaBuilder, Model, VarId, VarLit};
pub use prop::{Lit, Prop, Round};
pub use sink::ConstraintSink;
