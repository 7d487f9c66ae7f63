//! Reference oracle that tries every assignment. Test use only.

use super::{Oracle, OracleError};
use crate::logic::{Formula, Lit, Model};

const MAX_VARS: usize = 24;

pub(crate) struct BruteForceOracle;

impl BruteForceOracle {
    fn models(formula: &Formula) -> impl Iterator<Item = Vec<bool>> + '_ {
        let n = formula.var_count();
        assert!(n <= MAX_VARS, "too many variables for brute force: {n}");
        (0u64..1 << n)
            .map(move |bits| (0..n).map(|i| bits & (1 << i) != 0).collect::<Vec<bool>>())
            .filter(|values| formula.evaluate(values))
    }
}

impl Oracle for BruteForceOracle {
    fn solve(&self, formula: &Formula) -> Result<bool, OracleError> {
        Ok(Self::models(formula).next().is_some())
    }

    fn count(&self, formula: &Formula, conditions: &[Lit]) -> Result<u64, OracleError> {
        let conditions: Vec<_> = conditions.iter().map(|&l| formula.literal(l)).collect();
        Ok(Self::models(formula)
            .filter(|values| conditions.iter().all(|l| l.eval(values)))
            .count() as u64)
    }

    fn sample(&self, formula: &Formula) -> Result<Option<Model>, OracleError> {
        Ok(Self::models(formula).next().map(|values| formula.decode(&values)))
    }
}
