//! Satisfiability and model-counting oracle.
//!
//! The encoder never reasons about its own formula. Every question about a
//! duel (is it possible, how many games, how likely is a proposition) is
//! delegated to an `Oracle`. Backends are interchangeable; the crate ships
//! `VarisatOracle`, an exact counter built on blocking-clause enumeration.
//!
//! ## Usage
//!
//! ```rust
//! use duel_sat::logic::{ConstraintSink, FormulaBuilder, Prop};
//! use duel_sat::oracle::{Oracle, VarisatOracle};
//!
//! let mut builder = FormulaBuilder::new();
//! builder.exactly_one(&[Prop::Tie { round: 1 }, Prop::Tie { round: 2 }, Prop::Draw]);
//! let formula = builder.finish();
//!
//! let oracle = VarisatOracle::new();
//! assert_eq!(oracle.count(&formula, &[]).unwrap(), 3);
//! assert!((oracle.likelihood(&formula, Prop::Draw.lit()).unwrap() - 1.0 / 3.0).abs() < 1e-9);
//! ```

#[cfg(test)]
pub(crate) mod brute_force;
pub mod varisat;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::logic::{Formula, Lit, Model};

pub use self::varisat::VarisatOracle;

/// Failure of an oracle query. An unsatisfiable formula is not a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("solver backend failed: {0}")]
    Backend(String),

    #[error("oracle query was cancelled")]
    Cancelled,

    #[error("formula has more than {limit} models")]
    ModelLimit { limit: u64 },
}

/// Shared flag for aborting a running query.
///
/// Clones observe the same flag, so a token handed to an oracle can be
/// cancelled from another thread.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Exact satisfiability and model-counting service.
///
/// Conditions and queries are proposition literals; translating them to
/// variables goes through `Formula::literal`, so asking about a proposition
/// the formula never mentions panics.
pub trait Oracle: Send + Sync {
    /// Whether the formula has at least one model.
    fn solve(&self, formula: &Formula) -> Result<bool, OracleError>;

    /// Number of models that also satisfy every literal of `conditions`.
    fn count(&self, formula: &Formula, conditions: &[Lit]) -> Result<u64, OracleError>;

    /// One model, or `None` if the formula is unsatisfiable.
    fn sample(&self, formula: &Formula) -> Result<Option<Model>, OracleError>;

    /// Fraction of models in which `lit` holds.
    ///
    /// Zero when the formula has no models at all.
    fn likelihood(&self, formula: &Formula, lit: Lit) -> Result<f64, OracleError> {
        let total = self.count(formula, &[])?;
        if total == 0 {
            return Ok(0.0);
        }
        let hits = self.count(formula, &[lit])?;
        Ok(hits as f64 / total as f64)
    }
}
