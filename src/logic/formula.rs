//! Formula accumulation.
//!
//! Encoders write clauses into a `ConstraintBuffer` (cheap, no interning,
//! safe to fill on any thread) or straight into the `FormulaBuilder`. The
//! builder hash-conses propositions into variables and keeps clauses in a set,
//! so equivalent constraints collapse no matter who produced them. Once the
//! encoding is complete the builder is finalized into an immutable `Formula`.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use super::prop::{Lit, Prop};
use super::sink::ConstraintSink;

/// Clause over propositions.
pub type Clause = SmallVec<[Lit; 4]>;

/// Mergeable list of clauses produced by one encoding step.
#[derive(Clone, Debug, Default)]
pub struct ConstraintBuffer {
    clauses: Vec<Clause>,
}

impl ConstraintBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Append another buffer's clauses.
    pub fn append(&mut self, other: ConstraintBuffer) {
        self.clauses.extend(other.clauses);
    }
}

impl ConstraintSink for ConstraintBuffer {
    fn add_clause(&mut self, lits: &[Lit]) {
        self.clauses.push(lits.iter().copied().collect());
    }
}

/// Dense variable index, 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub u32);

impl VarId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Variable with a polarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarLit {
    pub var: VarId,
    pub positive: bool,
}

impl VarLit {
    /// Value of this literal under a full assignment.
    #[must_use]
    pub fn eval(self, values: &[bool]) -> bool {
        values[self.var.index()] == self.positive
    }
}

type VarClause = SmallVec<[VarLit; 4]>;

/// Accumulates an interned, deduplicated clause set.
///
/// ```
/// use duel_sat::logic::{ConstraintSink, FormulaBuilder, Prop};
///
/// let mut builder = FormulaBuilder::new();
/// builder.unit(Prop::Draw.lit());
/// builder.unit(Prop::Draw.lit());
/// builder.add_clause(&[Prop::Draw.lit(), Prop::Draw.neg()]);
///
/// let formula = builder.finish();
/// assert_eq!(formula.var_count(), 1);
/// assert_eq!(formula.clause_count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FormulaBuilder {
    props: Vec<Prop>,
    index: FxHashMap<Prop, VarId>,
    clauses: FxHashSet<VarClause>,
}

impl FormulaBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Variable for `prop`, allocating it on first use.
    pub fn intern(&mut self, prop: Prop) -> VarId {
        if let Some(&var) = self.index.get(&prop) {
            return var;
        }
        let var = VarId(self.props.len() as u32);
        self.props.push(prop);
        self.index.insert(prop, var);
        var
    }

    /// Move every clause of `buffer` into the formula.
    pub fn merge(&mut self, buffer: ConstraintBuffer) {
        for clause in buffer.clauses {
            self.add_clause(&clause);
        }
    }

    /// Number of distinct variables so far.
    #[must_use]
    pub fn var_count(&self) -> usize {
        self.props.len()
    }

    /// Number of distinct non-tautological clauses so far.
    #[must_use]
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Freeze the formula.
    ///
    /// Variables are renumbered in `Prop` order and clauses sorted, so the
    /// result does not depend on the order constraints were added in.
    #[must_use]
    pub fn finish(self) -> Formula {
        let mut order: Vec<VarId> = (0..self.props.len() as u32).map(VarId).collect();
        order.sort_by_key(|v| self.props[v.index()]);

        let mut remap = vec![VarId(0); self.props.len()];
        for (new, old) in order.iter().enumerate() {
            remap[old.index()] = VarId(new as u32);
        }

        let props: Vec<Prop> = order.iter().map(|v| self.props[v.index()]).collect();
        let index = props
            .iter()
            .enumerate()
            .map(|(i, &p)| (p, VarId(i as u32)))
            .collect();

        let mut clauses: Vec<VarClause> = self
            .clauses
            .into_iter()
            .map(|clause| {
                let mut c: VarClause = clause
                    .into_iter()
                    .map(|l| VarLit {
                        var: remap[l.var.index()],
                        positive: l.positive,
                    })
                    .collect();
                c.sort_unstable();
                c
            })
            .collect();
        clauses.sort_unstable();

        Formula {
            props,
            index,
            clauses,
        }
    }
}

impl ConstraintSink for FormulaBuilder {
    fn add_clause(&mut self, lits: &[Lit]) {
        let mut lits: Clause = lits.iter().copied().collect();
        lits.sort_unstable();
        lits.dedup();
        if lits.windows(2).any(|w| w[0].prop == w[1].prop) {
            // x ∨ ¬x; checked before interning so no variable is left without a clause
            return;
        }
        let mut clause: VarClause = lits
            .iter()
            .map(|l| VarLit {
                var: self.intern(l.prop),
                positive: l.positive,
            })
            .collect();
        clause.sort_unstable();
        self.clauses.insert(clause);
    }
}

/// Immutable CNF formula over interned propositions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
    props: Vec<Prop>,
    index: FxHashMap<Prop, VarId>,
    clauses: Vec<VarClause>,
}

impl Formula {
    #[must_use]
    pub fn var_count(&self) -> usize {
        self.props.len()
    }

    #[must_use]
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Clauses in canonical order.
    pub fn clauses(&self) -> impl Iterator<Item = &[VarLit]> {
        self.clauses.iter().map(|c| c.as_slice())
    }

    /// Propositions indexed by variable.
    #[must_use]
    pub fn props(&self) -> &[Prop] {
        &self.props
    }

    /// Variable of `prop`, if the formula mentions it.
    #[must_use]
    pub fn var(&self, prop: Prop) -> Option<VarId> {
        self.index.get(&prop).copied()
    }

    #[must_use]
    pub fn contains(&self, prop: Prop) -> bool {
        self.index.contains_key(&prop)
    }

    /// Translate a literal to its variable form.
    ///
    /// Panics if the formula never mentions the proposition: querying an
    /// unknown proposition is a programming error.
    #[must_use]
    pub fn literal(&self, lit: Lit) -> VarLit {
        let var = self
            .var(lit.prop)
            .unwrap_or_else(|| panic!("proposition not in formula: {}", lit.prop));
        VarLit {
            var,
            positive: lit.positive,
        }
    }

    /// Check a full assignment (one value per variable) against every clause.
    #[must_use]
    pub fn evaluate(&self, values: &[bool]) -> bool {
        assert_eq!(values.len(), self.var_count(), "assignment size mismatch");
        self.clauses
            .iter()
            .all(|clause| clause.iter().any(|l| l.eval(values)))
    }

    /// Attach proposition names to a full assignment.
    #[must_use]
    pub fn decode(&self, values: &[bool]) -> Model {
        assert_eq!(values.len(), self.var_count(), "assignment size mismatch");
        Model {
            values: self.props.iter().copied().zip(values.iter().copied()).collect(),
        }
    }
}

/// A satisfying assignment keyed by proposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Model {
    values: FxHashMap<Prop, bool>,
}

impl Model {
    /// Value of `prop`.
    ///
    /// Panics if the model's formula never mentions `prop`.
    #[must_use]
    pub fn holds(&self, prop: Prop) -> bool {
        *self
            .values
            .get(&prop)
            .unwrap_or_else(|| panic!("proposition not in model: {prop}"))
    }

    /// Value of `prop`, or `None` if the formula never mentions it.
    #[must_use]
    pub fn get(&self, prop: Prop) -> Option<bool> {
        self.values.get(&prop).copied()
    }

    /// Propositions that are true in this model.
    pub fn true_props(&self) -> impl Iterator<Item = Prop> + '_ {
        self.values.iter().filter(|(_, &v)| v).map(|(&p, _)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Player;

    fn tie(round: u16) -> Prop {
        Prop::Tie { round }
    }

    #[test]
    fn test_interning_is_structural() {
        let mut builder = FormulaBuilder::new();
        let a = builder.intern(Prop::wins(Player::A, 1));
        let b = builder.intern(Prop::wins(Player::A, 1));
        let c = builder.intern(Prop::wins(Player::B, 1));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(builder.var_count(), 2);
    }

    #[test]
    fn test_duplicate_clauses_collapse() {
        let mut builder = FormulaBuilder::new();
        builder.add_clause(&[tie(1).lit(), tie(2).neg()]);
        builder.add_clause(&[tie(2).neg(), tie(1).lit()]);
        builder.add_clause(&[tie(2).neg(), tie(1).lit(), tie(1).lit()]);
        assert_eq!(builder.clause_count(), 1);
    }

    #[test]
    fn test_tautology_dropped() {
        let mut builder = FormulaBuilder::new();
        builder.add_clause(&[tie(1).lit(), tie(1).neg()]);
        assert_eq!(builder.clause_count(), 0);
    }

    #[test]
    fn test_finish_is_order_independent() {
        let mut first = FormulaBuilder::new();
        first.unit(tie(3).lit());
        first.implies(&[tie(1).lit()], tie(2).lit());

        let mut second = FormulaBuilder::new();
        second.implies(&[tie(1).lit()], tie(2).lit());
        second.unit(tie(3).lit());

        assert_eq!(first.finish(), second.finish());
    }

    #[test]
    fn test_merge_buffer() {
        let mut buf = ConstraintBuffer::new();
        buf.exactly_one(&[tie(1), tie(2)]);

        let mut builder = FormulaBuilder::new();
        builder.merge(buf);
        assert_eq!(builder.clause_count(), 2);
    }

    #[test]
    fn test_evaluate_and_decode() {
        let mut builder = FormulaBuilder::new();
        builder.exactly_one(&[tie(1), tie(2)]);
        let formula = builder.finish();

        // Prop order puts Tie{1} before Tie{2}
        assert!(formula.evaluate(&[true, false]));
        assert!(!formula.evaluate(&[true, true]));
        assert!(!formula.evaluate(&[false, false]));

        let model = formula.decode(&[false, true]);
        assert!(model.holds(tie(2)));
        assert!(!model.holds(tie(1)));
        assert_eq!(model.get(Prop::Draw), None);
        assert_eq!(model.true_props().collect::<Vec<_>>(), vec![tie(2)]);
    }

    #[test]
    #[should_panic(expected = "proposition not in formula")]
    fn test_unknown_literal_panics() {
        let formula = FormulaBuilder::new().finish();
        let _ = formula.literal(Prop::Draw.lit());
    }
}
