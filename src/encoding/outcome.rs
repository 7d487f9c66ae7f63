//! Outcome aggregation.
//!
//! Win totals are unary counters over `Wins(p, 1..=horizon)`. Only primary
//! rounds exist at this level: tie-break flips never record outcomes of their
//! own, they only settle the primary round they belong to.
//!
//! `totalWins(A) > totalWins(B)` holds iff for some `k`, A has at least `k`
//! wins and B has fewer than `k`. That witness is `Lead { A, k }`.

use tracing::debug;

use crate::core::{Player, PlayerMap};
use crate::logic::{ConstraintSink, Lit, Prop, WinCounter};

/// Emits win counters, overall-winner and draw implications.
#[derive(Clone, Copy, Debug)]
pub struct OutcomeAggregator {
    horizon: u16,
    closed_world: bool,
}

impl OutcomeAggregator {
    /// Aggregator over primary rounds `1..=horizon`.
    ///
    /// With `closed_world` the implications become definitions: the winner
    /// and draw propositions hold exactly when the tallies say so.
    #[must_use]
    pub const fn new(horizon: u16, closed_world: bool) -> Self {
        Self {
            horizon,
            closed_world,
        }
    }

    fn counters(&self) -> PlayerMap<WinCounter> {
        PlayerMap::new(|p| WinCounter::new(p, self.horizon))
    }

    /// `Lead { player, k }` for `k` in `1..=horizon`.
    fn leads(&self, player: Player) -> Vec<Prop> {
        (1..=self.horizon)
            .map(|at_least| Prop::Lead { player, at_least })
            .collect()
    }

    pub fn encode<S: ConstraintSink + ?Sized>(&self, sink: &mut S) {
        let counters = self.counters();
        for (_, counter) in counters.iter() {
            counter.encode(sink);
        }

        for player in Player::ALL {
            let mine = &counters[player];
            let theirs = &counters[player.opponent()];
            for k in 1..=self.horizon {
                let lead = Prop::Lead { player, at_least: k }.lit();
                sink.define_and(lead, &[mine.at_least(k).lit(), theirs.at_least(k).neg()]);
                sink.implies(&[lead], Prop::OverallWinner { player }.lit());
            }
        }

        // no lead either way ⇒ draw
        let mut clause: Vec<Lit> = Player::ALL
            .into_iter()
            .flat_map(|p| self.leads(p))
            .map(|p| p.lit())
            .collect();
        clause.push(Prop::Draw.lit());
        sink.add_clause(&clause);

        if self.closed_world {
            self.encode_converse(sink);
        }

        debug!(horizon = self.horizon, closed_world = self.closed_world, "encoded outcome aggregation");
    }

    /// Converse of the winner and draw implications: `OverallWinner(p)` needs
    /// a lead for `p`, `Draw` needs no lead at all.
    pub fn encode_converse<S: ConstraintSink + ?Sized>(&self, sink: &mut S) {
        for player in Player::ALL {
            let leads: Vec<Lit> = self.leads(player).iter().map(|p| p.lit()).collect();
            sink.implies_any(&[Prop::OverallWinner { player }.lit()], &leads);
        }
        for lead in Player::ALL.into_iter().flat_map(|p| self.leads(p)) {
            sink.implies(&[Prop::Draw.lit()], lead.neg());
        }
    }

    /// Require `player` to win at least `quota` primary rounds.
    pub fn encode_quota<S: ConstraintSink + ?Sized>(&self, sink: &mut S, player: Player, quota: u16) {
        if quota == 0 {
            return;
        }
        let counter = WinCounter::new(player, self.horizon);
        counter.encode(sink);
        sink.unit(counter.at_least(quota).lit());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::FormulaBuilder;

    /// Brute-force the aggregator on its own: every assignment of the
    /// per-round win inputs must force the expected winner/draw values.
    fn check(horizon: u16, closed_world: bool) {
        let mut builder = FormulaBuilder::new();
        OutcomeAggregator::new(horizon, closed_world).encode(&mut builder);
        // rounds are won by at most one player
        for r in 1..=horizon {
            builder.at_most_one(&[Prop::wins(Player::A, r), Prop::wins(Player::B, r)]);
        }
        let formula = builder.finish();

        let n = formula.var_count();
        assert!(n <= 22, "too many variables for brute force: {n}");
        let mut models = 0u64;
        for bits in 0u64..(1 << n) {
            let values: Vec<bool> = (0..n).map(|i| bits & (1 << i) != 0).collect();
            if !formula.evaluate(&values) {
                continue;
            }
            models += 1;
            let model = formula.decode(&values);
            let tally = |p| (1..=horizon).filter(|&r| model.holds(Prop::wins(p, r))).count();
            let (a, b) = (tally(Player::A), tally(Player::B));

            if a > b {
                assert!(model.holds(Prop::OverallWinner { player: Player::A }));
            }
            if b > a {
                assert!(model.holds(Prop::OverallWinner { player: Player::B }));
            }
            if a == b {
                assert!(model.holds(Prop::Draw));
            }
            if closed_world {
                assert_eq!(model.holds(Prop::OverallWinner { player: Player::A }), a > b);
                assert_eq!(model.holds(Prop::OverallWinner { player: Player::B }), b > a);
                assert_eq!(model.holds(Prop::Draw), a == b);
            }
        }

        // 3 outcomes per round (A, B, neither) are the only free choices
        if closed_world {
            assert_eq!(models, 3u64.pow(u32::from(horizon)));
        }
    }

    #[test]
    fn test_open_world_implications() {
        check(2, false);
    }

    #[test]
    fn test_closed_world_definitions() {
        check(2, true);
    }

    #[test]
    fn test_converse_closes_open_world() {
        let mut open = FormulaBuilder::new();
        let aggregator = OutcomeAggregator::new(3, false);
        aggregator.encode(&mut open);
        aggregator.encode_converse(&mut open);

        let mut closed = FormulaBuilder::new();
        OutcomeAggregator::new(3, true).encode(&mut closed);
        assert_eq!(open.finish(), closed.finish());
    }

    #[test]
    fn test_zero_quota_emits_nothing() {
        let mut builder = FormulaBuilder::new();
        OutcomeAggregator::new(4, false).encode_quota(&mut builder, Player::A, 0);
        assert_eq!(builder.clause_count(), 0);
    }
}
