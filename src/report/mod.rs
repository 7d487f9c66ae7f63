//! Probabilistic analysis of an encoded duel.
//!
//! `analyze` asks the oracle for the total number of games and then for the
//! number of games in which each outcome proposition holds. Queries run on
//! the closed-world formula of the duel, so every model is one game and the
//! winner and draw propositions hold exactly when the tallies say so.
//! Per-round queries are independent and run in parallel.

use std::fmt;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cards::Card;
use crate::core::{Player, PlayerMap};
use crate::encoding::{EncodedDuel, Resolution, TieBreakResolver};
use crate::logic::{Formula, Lit, Model, Prop, Round};
use crate::oracle::{Oracle, OracleError};

/// Outcome likelihoods of one primary round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u16,
    pub wins: PlayerMap<f64>,
    pub final_tie: f64,
}

/// How a round ended in a concrete game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won(Player),
    Tie,
}

/// One primary round of a witness game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessRound {
    pub round: u16,
    pub plays: PlayerMap<Card>,
    pub outcome: RoundOutcome,
    /// Present when the round went into tie-break.
    pub tie_break: Option<Resolution>,
}

/// A single satisfying game, decoded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessGame {
    pub rounds: Vec<WitnessRound>,
    pub wins: PlayerMap<u16>,
    /// Player with strictly more wins, `None` on equal tallies.
    pub winner: Option<Player>,
}

impl WitnessGame {
    /// Decode the primary rounds of `model`.
    ///
    /// Panics if the model is missing a primary play, which the encoding rules out.
    #[must_use]
    pub fn from_model(model: &Model, duel: &EncodedDuel) -> Self {
        let mut played: FxHashMap<(u16, Player), Card> = FxHashMap::default();
        for prop in model.true_props() {
            if let Prop::Plays {
                player,
                card,
                round: Round::Primary(r),
            } = prop
            {
                played.insert((r, player), card);
            }
        }

        let rounds: Vec<WitnessRound> = duel
            .rounds()
            .map(|r| {
                let plays = PlayerMap::new(|p| {
                    played
                        .get(&(r, p))
                        .copied()
                        .unwrap_or_else(|| panic!("{p} played nothing in round {r}"))
                });
                let outcome = Player::ALL
                    .into_iter()
                    .find(|&p| model.holds(Prop::wins(p, r)))
                    .map_or(RoundOutcome::Tie, RoundOutcome::Won);
                WitnessRound {
                    round: r,
                    plays,
                    outcome,
                    tie_break: TieBreakResolver::resolve(model, r, duel.config.tie_break),
                }
            })
            .collect();

        let wins = PlayerMap::new(|p| {
            rounds
                .iter()
                .filter(|r| r.outcome == RoundOutcome::Won(p))
                .count() as u16
        });
        let winner = Player::ALL
            .into_iter()
            .find(|&p| wins[p] > wins[p.opponent()]);

        Self {
            rounds,
            wins,
            winner,
        }
    }
}

/// Everything the oracle says about a duel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuelReport {
    pub total_models: u64,
    pub rounds: Vec<RoundReport>,
    /// Sum of per-round win likelihoods.
    pub expected_wins: PlayerMap<f64>,
    pub overall_winner: PlayerMap<f64>,
    pub draw: f64,
    pub witness: Option<WitnessGame>,
}

impl DuelReport {
    /// Report of a duel with no possible games.
    #[must_use]
    pub fn unsatisfiable(horizon: u16) -> Self {
        Self {
            total_models: 0,
            rounds: (1..=horizon)
                .map(|round| RoundReport {
                    round,
                    wins: PlayerMap::with_value(0.0),
                    final_tie: 0.0,
                })
                .collect(),
            expected_wins: PlayerMap::with_value(0.0),
            overall_winner: PlayerMap::with_value(0.0),
            draw: 0.0,
            witness: None,
        }
    }

    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        self.total_models > 0
    }
}

/// Count-based likelihoods against a fixed total.
struct Fractions<'a, O: ?Sized> {
    oracle: &'a O,
    formula: &'a Formula,
    total: u64,
}

impl<O: Oracle + ?Sized> Fractions<'_, O> {
    fn of(&self, lit: Lit) -> Result<f64, OracleError> {
        let hits = self.oracle.count(self.formula, &[lit])?;
        Ok(hits as f64 / self.total as f64)
    }

    fn round(&self, round: u16) -> Result<RoundReport, OracleError> {
        Ok(RoundReport {
            round,
            wins: PlayerMap::try_new(|p| self.of(Prop::wins(p, round).lit()))?,
            final_tie: self.of(Prop::FinalTie { round }.lit())?,
        })
    }
}

/// Run every report query for `duel` against `oracle`.
pub fn analyze<O: Oracle + ?Sized>(oracle: &O, duel: &EncodedDuel) -> Result<DuelReport, OracleError> {
    let formula = &duel.analysis;
    let total = oracle.count(formula, &[])?;
    if total == 0 {
        warn!(horizon = duel.horizon(), "duel is unsatisfiable, reporting zero likelihoods");
        return Ok(DuelReport::unsatisfiable(duel.horizon()));
    }

    let fractions = Fractions {
        oracle,
        formula,
        total,
    };
    let rounds: Vec<RoundReport> = duel
        .rounds()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|r| fractions.round(r))
        .collect::<Result<_, _>>()?;

    let expected_wins = PlayerMap::new(|p| rounds.iter().map(|r| r.wins[p]).sum::<f64>());
    let overall_winner = PlayerMap::try_new(|player| fractions.of(Prop::OverallWinner { player }.lit()))?;
    let draw = fractions.of(Prop::Draw.lit())?;
    let witness = oracle
        .sample(formula)?
        .map(|model| WitnessGame::from_model(&model, duel));

    info!(
        models = total,
        overall_a = overall_winner[Player::A],
        overall_b = overall_winner[Player::B],
        draw,
        "analysis complete"
    );

    Ok(DuelReport {
        total_models: total,
        rounds,
        expected_wins,
        overall_winner,
        draw,
        witness,
    })
}

impl fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundOutcome::Won(p) => write!(f, "{p} wins"),
            RoundOutcome::Tie => write!(f, "final tie"),
        }
    }
}

impl fmt::Display for WitnessGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in &self.rounds {
            write!(
                f,
                "  round {:>2}: {:>3} vs {:<3} {}",
                r.round,
                r.plays[Player::A],
                r.plays[Player::B],
                r.outcome
            )?;
            match r.tie_break {
                Some(Resolution::Decided { blocks, .. }) => write!(f, " after {blocks} tie-break block(s)")?,
                Some(Resolution::Exhausted) => write!(f, " (tie-break exhausted)")?,
                None => {}
            }
            writeln!(f)?;
        }
        match self.winner {
            Some(p) => writeln!(f, "  {p} wins {} to {}", self.wins[p], self.wins[p.opponent()]),
            None => writeln!(f, "  drawn at {} each", self.wins[Player::A]),
        }
    }
}

impl fmt::Display for DuelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "models: {}", self.total_models)?;
        writeln!(f, "round   A wins   B wins  final tie")?;
        for r in &self.rounds {
            writeln!(
                f,
                "{:>5}  {:>7.4}  {:>7.4}  {:>9.4}",
                r.round,
                r.wins[Player::A],
                r.wins[Player::B],
                r.final_tie
            )?;
        }
        writeln!(
            f,
            "expected wins: A {:.3}, B {:.3}",
            self.expected_wins[Player::A],
            self.expected_wins[Player::B]
        )?;
        writeln!(
            f,
            "overall winner: A {:.4}, B {:.4}, draw {:.4}",
            self.overall_winner[Player::A],
            self.overall_winner[Player::B],
            self.draw
        )?;
        if let Some(witness) = &self.witness {
            writeln!(f, "witness game:")?;
            write!(f, "{witness}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::core::{DuelConfig, OwnershipPolicy, TieBreakConfig};
    use crate::encoding::DuelEncoder;
    use crate::oracle::VarisatOracle;

    fn fixed(a: &[&str]) -> OwnershipPolicy {
        OwnershipPolicy::Fixed {
            a: a.iter().map(|c| c.parse().unwrap()).collect(),
        }
    }

    fn dominated_duel() -> EncodedDuel {
        let config = DuelConfig::default()
            .with_horizon(2)
            .with_tie_break(TieBreakConfig::disabled())
            .with_ownership(fixed(&["2h", "2d"]))
            .with_forbid_replay(true)
            .with_closed_world(true);
        DuelEncoder::new(Deck::reduced(2, 2), config).encode().unwrap()
    }

    #[test]
    fn test_dominated_hand_wins_everything() {
        let report = analyze(&VarisatOracle::new(), &dominated_duel()).unwrap();

        // 2 orderings of A's hand x 2 of B's
        assert_eq!(report.total_models, 4);
        for r in &report.rounds {
            assert_eq!(r.wins[Player::A], 1.0);
            assert_eq!(r.wins[Player::B], 0.0);
            assert_eq!(r.final_tie, 0.0);
        }
        assert_eq!(report.expected_wins[Player::A], 2.0);
        assert_eq!(report.overall_winner[Player::A], 1.0);
        assert_eq!(report.draw, 0.0);

        let witness = report.witness.unwrap();
        assert_eq!(witness.winner, Some(Player::A));
        assert_eq!(witness.wins[Player::A], 2);
        assert!(witness.rounds.iter().all(|r| r.tie_break.is_none()));
    }

    #[test]
    fn test_open_world_report_counts_games() {
        // default configuration leaves the aggregation open
        let config = DuelConfig::default()
            .with_horizon(1)
            .with_tie_break(TieBreakConfig::disabled())
            .with_ownership(fixed(&["2h", "1d"]));
        assert!(!config.closed_world);
        let duel = DuelEncoder::new(Deck::reduced(2, 2), config).encode().unwrap();
        let report = analyze(&VarisatOracle::new(), &duel).unwrap();

        // A plays one of two cards, B one of two
        assert_eq!(report.total_models, 4);
        // 2♥ beats 1♥, 1♦ loses to 2♦, the other two pairings tie
        assert_eq!(report.overall_winner[Player::A], 0.25);
        assert_eq!(report.overall_winner[Player::B], 0.25);
        assert_eq!(report.draw, 0.5);
        for player in Player::ALL {
            assert_eq!(report.overall_winner[player], report.rounds[0].wins[player]);
        }
        assert_eq!(report.draw, report.rounds[0].final_tie);
    }

    #[test]
    fn test_unsatisfiable_report() {
        let config = DuelConfig::default()
            .with_horizon(2)
            .with_tie_break(TieBreakConfig::disabled())
            .with_ownership(fixed(&["2h", "2d"]))
            .with_forbid_replay(true)
            .with_win_target(Player::B, 50);
        let duel = DuelEncoder::new(Deck::reduced(2, 2), config).encode().unwrap();
        let report = analyze(&VarisatOracle::new(), &duel).unwrap();

        assert!(!report.is_satisfiable());
        assert_eq!(report, DuelReport::unsatisfiable(2));
        assert!(report.to_string().starts_with("models: 0"));
    }

    #[test]
    fn test_oracle_failures_propagate() {
        let duel = dominated_duel();
        let limited = VarisatOracle::new().with_max_models(3);
        assert_eq!(analyze(&limited, &duel), Err(OracleError::ModelLimit { limit: 3 }));

        let cancelled = VarisatOracle::new();
        cancelled.cancel_token().cancel();
        assert_eq!(analyze(&cancelled, &duel), Err(OracleError::Cancelled));
    }

    #[test]
    fn test_report_renders() {
        let report = analyze(&VarisatOracle::new(), &dominated_duel()).unwrap();
        let text = report.to_string();
        assert!(text.contains("models: 4"));
        assert!(text.contains("overall winner: A 1.0000"));
        assert!(text.contains("Player A wins 2 to 0"));

        let json = serde_json::to_string(&report).unwrap();
        let back: DuelReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
