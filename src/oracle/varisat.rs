//! Exact counting on top of the varisat CDCL solver.
//!
//! Counting enumerates models: after each model a blocking clause excluding
//! exactly that assignment is added and the solver is asked again. Every
//! helper variable of a duel formula is functionally defined, so one model per
//! assignment of the game propositions is what gets counted.

use ::varisat::{CnfFormula, ExtendFormula, Lit as SatLit, Solver, Var};
use tracing::{debug, trace};

use super::{CancelToken, Oracle, OracleError};
use crate::logic::{Formula, Lit, Model, VarLit};

/// Blocking-clause model enumerator.
#[derive(Clone, Debug)]
pub struct VarisatOracle {
    max_models: u64,
    cancel: CancelToken,
}

impl Default for VarisatOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl VarisatOracle {
    pub const DEFAULT_MAX_MODELS: u64 = 1_000_000;

    #[must_use]
    pub fn new() -> Self {
        Self {
            max_models: Self::DEFAULT_MAX_MODELS,
            cancel: CancelToken::new(),
        }
    }

    /// Fail with `ModelLimit` instead of enumerating more than `max_models`.
    #[must_use]
    pub fn with_max_models(mut self, max_models: u64) -> Self {
        self.max_models = max_models;
        self
    }

    /// Observe `token` between models.
    #[must_use]
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    #[must_use]
    pub fn max_models(&self) -> u64 {
        self.max_models
    }

    /// Token that aborts this oracle's running and future queries.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn check_cancelled(&self) -> Result<(), OracleError> {
        if self.cancel.is_cancelled() {
            Err(OracleError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn load(formula: &Formula) -> Solver<'static> {
        let mut cnf = CnfFormula::new();
        for clause in formula.clauses() {
            let lits: Vec<SatLit> = clause.iter().map(|&l| to_sat(l)).collect();
            cnf.add_clause(&lits);
        }
        let mut solver = Solver::new();
        solver.add_formula(&cnf);
        solver
    }

    /// Next model as one value per formula variable, or `None` when exhausted.
    fn next_model(solver: &mut Solver<'_>, var_count: usize) -> Result<Option<Vec<bool>>, OracleError> {
        let sat = solver
            .solve()
            .map_err(|e| OracleError::Backend(e.to_string()))?;
        if !sat {
            return Ok(None);
        }
        let model = solver
            .model()
            .ok_or_else(|| OracleError::Backend("satisfiable without a model".into()))?;
        let mut values = vec![false; var_count];
        for lit in model {
            if let Some(value) = values.get_mut(lit.index()) {
                *value = lit.is_positive();
            }
        }
        Ok(Some(values))
    }
}

fn to_sat(lit: VarLit) -> SatLit {
    SatLit::from_var(Var::from_index(lit.var.index()), lit.positive)
}

impl Oracle for VarisatOracle {
    fn solve(&self, formula: &Formula) -> Result<bool, OracleError> {
        Ok(self.sample(formula)?.is_some())
    }

    fn count(&self, formula: &Formula, conditions: &[Lit]) -> Result<u64, OracleError> {
        let assumptions: Vec<SatLit> = conditions
            .iter()
            .map(|&l| to_sat(formula.literal(l)))
            .collect();
        let n = formula.var_count();
        let mut solver = Self::load(formula);
        solver.assume(&assumptions);

        let mut count = 0u64;
        loop {
            self.check_cancelled()?;
            let Some(values) = Self::next_model(&mut solver, n)? else {
                break;
            };
            count += 1;
            if count > self.max_models {
                return Err(OracleError::ModelLimit {
                    limit: self.max_models,
                });
            }
            if n == 0 {
                break;
            }
            let blocking: Vec<SatLit> = values
                .iter()
                .enumerate()
                .map(|(i, &v)| SatLit::from_var(Var::from_index(i), !v))
                .collect();
            solver.add_clause(&blocking);
            if count % 10_000 == 0 {
                trace!(count, "enumerating models");
            }
        }
        debug!(
            vars = n,
            clauses = formula.clause_count(),
            conditions = conditions.len(),
            count,
            "counted models"
        );
        Ok(count)
    }

    fn sample(&self, formula: &Formula) -> Result<Option<Model>, OracleError> {
        self.check_cancelled()?;
        let mut solver = Self::load(formula);
        let values = Self::next_model(&mut solver, formula.var_count())?;
        Ok(values.map(|values| formula.decode(&values)))
    }
}
