//! Whole-duel encoding.
//!
//! `DuelEncoder` runs the stages in order (rank order, ownership, primary
//! rounds with their tie-breaks, replay restriction, aggregation, win quota)
//! into one `FormulaBuilder` and freezes the result. Configuration is
//! validated before the first clause is written.
//!
//! An open-world duel is frozen twice: once as configured and once with the
//! aggregation closed, which is the formula likelihoods are computed on.

use rayon::prelude::*;
use tracing::{debug, info};

use super::outcome::OutcomeAggregator;
use super::ownership::{OwnershipAssigner, Partition};
use super::ranks::encode_rank_order;
use super::rounds::RoundEncoder;
use super::tiebreak::TieBreakResolver;
use crate::cards::Deck;
use crate::core::{ConfigError, DuelConfig, DuelRng};
use crate::logic::{ConstraintBuffer, Formula, FormulaBuilder};

/// Builds the formula of a configured duel.
#[derive(Clone, Debug)]
pub struct DuelEncoder {
    deck: Deck,
    config: DuelConfig,
}

impl DuelEncoder {
    #[must_use]
    pub fn new(deck: Deck, config: DuelConfig) -> Self {
        Self { deck, config }
    }

    #[must_use]
    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Validate, deal and encode.
    pub fn encode(&self) -> Result<EncodedDuel, ConfigError> {
        let config = &self.config;
        config.validate(&self.deck)?;
        let quota = config
            .win_target
            .map(|t| t.quota(config.horizon).map(|q| (t.player, q)))
            .transpose()?;

        let mut rng = DuelRng::new(config.seed).for_context("ownership");
        let partition = OwnershipAssigner::assign(&config.ownership, &self.deck, &mut rng)?;

        let mut builder = FormulaBuilder::new();
        encode_rank_order(&self.deck, &mut builder);
        OwnershipAssigner::encode(&partition, &self.deck, &mut builder);

        let rounds = RoundEncoder::new(&self.deck);
        let tie_break = TieBreakResolver::new(&rounds, config.tie_break);
        let buffers: Vec<ConstraintBuffer> = (1..=config.horizon)
            .into_par_iter()
            .map(|round| {
                let mut buf = rounds.encode_round(round);
                buf.append(tie_break.encode_round(round));
                buf
            })
            .collect();
        for buf in buffers {
            builder.merge(buf);
        }
        debug!(
            horizon = config.horizon,
            vars = builder.var_count(),
            clauses = builder.clause_count(),
            "encoded rounds"
        );

        if config.forbid_replay {
            rounds.encode_no_replay(&mut builder, config.horizon);
        }

        let aggregator = OutcomeAggregator::new(config.horizon, config.closed_world);
        aggregator.encode(&mut builder);
        if let Some((player, quota)) = quota {
            aggregator.encode_quota(&mut builder, player, quota);
        }

        let (formula, analysis) = if config.closed_world {
            let formula = builder.finish();
            (formula.clone(), formula)
        } else {
            let mut closed = builder.clone();
            aggregator.encode_converse(&mut closed);
            (builder.finish(), closed.finish())
        };
        info!(
            cards = self.deck.len(),
            horizon = config.horizon,
            vars = formula.var_count(),
            clauses = formula.clause_count(),
            "formula ready"
        );

        Ok(EncodedDuel {
            formula,
            analysis,
            partition,
            config: config.clone(),
            deck: self.deck.clone(),
        })
    }
}

/// A finished encoding and what it was built from.
#[derive(Clone, Debug)]
pub struct EncodedDuel {
    /// The duel as configured, open or closed world.
    pub formula: Formula,
    /// `formula` with the overall-winner and draw definitions closed, so that
    /// every model is one game. Same as `formula` in closed-world mode.
    pub analysis: Formula,
    pub partition: Partition,
    pub config: DuelConfig,
    pub deck: Deck,
}

impl EncodedDuel {
    /// Number of primary rounds.
    #[must_use]
    pub fn horizon(&self) -> u16 {
        self.config.horizon
    }

    /// Primary round numbers.
    pub fn rounds(&self) -> impl Iterator<Item = u16> {
        1..=self.config.horizon
    }
}
