//! Unary win counters.
//!
//! `WinCounter` encodes a sequential counter over a player's per-round win
//! propositions: `WinCount { prefix: i, at_least: j }` holds iff at least `j`
//! of the first `i` inputs hold. Every counter variable is defined by a
//! biconditional, so the counter is functionally determined by its inputs and
//! never changes the number of models.

use super::prop::{Lit, Prop};
use super::sink::ConstraintSink;
use crate::core::Player;

/// Literal or constant, used while emitting counter clauses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Term {
    True,
    False,
    Lit(Lit),
}

impl std::ops::Not for Term {
    type Output = Term;

    fn not(self) -> Term {
        match self {
            Term::True => Term::False,
            Term::False => Term::True,
            Term::Lit(l) => Term::Lit(!l),
        }
    }
}

/// Emit a clause after constant folding.
fn emit<S: ConstraintSink + ?Sized>(sink: &mut S, terms: &[Term]) {
    if terms.contains(&Term::True) {
        return;
    }
    let lits: Vec<Lit> = terms
        .iter()
        .filter_map(|t| match t {
            Term::Lit(l) => Some(*l),
            _ => None,
        })
        .collect();
    sink.add_clause(&lits);
}

/// Sequential counter over `Wins(player, 1..=horizon)`.
#[derive(Clone, Copy, Debug)]
pub struct WinCounter {
    player: Player,
    horizon: u16,
}

impl WinCounter {
    #[must_use]
    pub const fn new(player: Player, horizon: u16) -> Self {
        Self { player, horizon }
    }

    fn count(&self, prefix: u16, at_least: u16) -> Term {
        if at_least == 0 {
            Term::True
        } else if at_least > prefix {
            Term::False
        } else {
            Term::Lit(
                Prop::WinCount {
                    player: self.player,
                    prefix,
                    at_least,
                }
                .lit(),
            )
        }
    }

    /// Proposition "at least `k` wins over the whole horizon", `1 <= k <= horizon`.
    #[must_use]
    pub fn at_least(&self, k: u16) -> Prop {
        assert!(
            (1..=self.horizon).contains(&k),
            "win count {k} outside 1..={}",
            self.horizon
        );
        Prop::WinCount {
            player: self.player,
            prefix: self.horizon,
            at_least: k,
        }
    }

    /// Emit the counter definitions.
    pub fn encode<S: ConstraintSink + ?Sized>(&self, sink: &mut S) {
        for i in 1..=self.horizon {
            let x = Term::Lit(Prop::wins(self.player, i).lit());
            for j in 1..=i {
                let z = self.count(i, j);
                let carry = self.count(i - 1, j);
                let below = self.count(i - 1, j - 1);

                // z <=> carry ∨ (x ∧ below)
                emit(sink, &[!z, carry, x]);
                emit(sink, &[!z, carry, below]);
                emit(sink, &[!carry, z]);
                emit(sink, &[!x, !below, z]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::FormulaBuilder;

    /// Enumerate every assignment of the win inputs, propagate the counter
    /// definitions by evaluation, and check each output.
    #[test]
    fn test_counter_matches_popcount() {
        let horizon = 4u16;
        let counter = WinCounter::new(Player::A, horizon);
        let mut builder = FormulaBuilder::new();
        counter.encode(&mut builder);
        let formula = builder.finish();

        let n = formula.var_count();
        let mut satisfying = 0;
        for bits in 0u32..(1 << n) {
            let values: Vec<bool> = (0..n).map(|i| bits & (1 << i) != 0).collect();
            if !formula.evaluate(&values) {
                continue;
            }
            satisfying += 1;
            let model = formula.decode(&values);
            let wins = (1..=horizon)
                .filter(|&r| model.holds(Prop::wins(Player::A, r)))
                .count() as u16;
            for k in 1..=horizon {
                assert_eq!(model.holds(counter.at_least(k)), wins >= k);
            }
        }
        // Counter variables are fully determined by the inputs
        assert_eq!(satisfying, 1 << horizon);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_at_least_zero_panics() {
        let _ = WinCounter::new(Player::B, 3).at_least(0);
    }
}
