//! Constraint sinks and the clause-level building blocks shared by every encoder.
//!
//! Anything that can accept a clause implements `ConstraintSink`; the
//! cardinality helpers come for free as default methods. Both the per-round
//! `ConstraintBuffer` and the `FormulaBuilder` itself are sinks.

use super::prop::{Lit, Prop};

/// Receiver of CNF clauses over propositions.
pub trait ConstraintSink {
    /// Add the disjunction of `lits`. An empty clause is unsatisfiable.
    fn add_clause(&mut self, lits: &[Lit]);

    // === Convenience Methods ===

    /// Assert a single literal.
    fn unit(&mut self, lit: Lit) {
        self.add_clause(&[lit]);
    }

    /// `premises[0] ∧ premises[1] ∧ ... ⇒ conclusion`.
    fn implies(&mut self, premises: &[Lit], conclusion: Lit) {
        let mut clause: Vec<Lit> = premises.iter().map(|&p| !p).collect();
        clause.push(conclusion);
        self.add_clause(&clause);
    }

    /// `premises ⇒ disjuncts[0] ∨ disjuncts[1] ∨ ...`.
    fn implies_any(&mut self, premises: &[Lit], disjuncts: &[Lit]) {
        let mut clause: Vec<Lit> = premises.iter().map(|&p| !p).collect();
        clause.extend_from_slice(disjuncts);
        self.add_clause(&clause);
    }

    /// At least one of `props` holds.
    fn at_least_one(&mut self, props: &[Prop]) {
        let clause: Vec<Lit> = props.iter().map(|p| p.lit()).collect();
        self.add_clause(&clause);
    }

    /// No two of `props` hold simultaneously (pairwise encoding).
    fn at_most_one(&mut self, props: &[Prop]) {
        for (i, a) in props.iter().enumerate() {
            for b in &props[i + 1..] {
                self.add_clause(&[a.neg(), b.neg()]);
            }
        }
    }

    /// Exactly one of `props` holds.
    ///
    /// Built as at-least-one plus at-most-one. An N-ary XOR is not the same
    /// constraint for N > 2 and is never used.
    fn exactly_one(&mut self, props: &[Prop]) {
        self.at_least_one(props);
        self.at_most_one(props);
    }

    /// Exactly one of `props` when `guard` holds, none of them otherwise.
    fn exactly_one_when(&mut self, guard: Lit, props: &[Prop]) {
        self.implies_any(&[guard], &props.iter().map(|p| p.lit()).collect::<Vec<_>>());
        for p in props {
            self.implies(&[p.lit()], guard);
        }
        self.at_most_one(props);
    }

    /// `z ⇔ inputs[0] ∧ inputs[1] ∧ ...`.
    fn define_and(&mut self, z: Lit, inputs: &[Lit]) {
        for &input in inputs {
            self.implies(&[z], input);
        }
        self.implies(inputs, z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::ConstraintBuffer;

    fn props(n: u16) -> Vec<Prop> {
        (1..=n).map(|round| Prop::Tie { round }).collect()
    }

    #[test]
    fn test_implies_clause_shape() {
        let mut buf = ConstraintBuffer::new();
        let a = Prop::Tie { round: 1 }.lit();
        let b = Prop::Tie { round: 2 }.lit();
        let c = Prop::Draw.lit();
        buf.implies(&[a, b], c);

        assert_eq!(buf.len(), 1);
        assert_eq!(buf.clauses()[0].as_slice(), &[!a, !b, c]);
    }

    #[test]
    fn test_exactly_one_clause_count() {
        let mut buf = ConstraintBuffer::new();
        buf.exactly_one(&props(5));

        // 1 at-least-one clause + C(5, 2) pairwise exclusions
        assert_eq!(buf.len(), 1 + 10);
    }

    #[test]
    fn test_exactly_one_when_links_guard() {
        let mut buf = ConstraintBuffer::new();
        buf.exactly_one_when(Prop::Draw.lit(), &props(3));

        // guard clause + 3 back-links + 3 exclusions
        assert_eq!(buf.len(), 1 + 3 + 3);
    }

    #[test]
    fn test_define_and() {
        let mut buf = ConstraintBuffer::new();
        buf.define_and(Prop::Draw.lit(), &[Prop::Tie { round: 1 }.lit(), Prop::Tie { round: 2 }.lit()]);
        assert_eq!(buf.len(), 3);
    }
}
