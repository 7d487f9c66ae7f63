//! Duel configuration types.
//!
//! A duel is configured once, validated against the deck, and then handed to
//! the encoder:
//! - `TieBreakConfig`: How far ties are chased before being declared final
//! - `OwnershipPolicy`: How the deck is split between the players
//! - `WinTarget`: Optional quota of rounds a player must win
//! - `DuelConfig`: Combines all configuration

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::Player;
use crate::cards::{Card, Deck, Rank};

/// Tie-break protocol parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieBreakConfig {
    /// Number of tie-break blocks tried before the tie becomes final.
    /// Zero makes every tie final immediately.
    pub max_depth: u8,

    /// Face-down flips per block before the decisive flip.
    pub face_down: u8,
}

impl Default for TieBreakConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            face_down: 3,
        }
    }
}

impl TieBreakConfig {
    /// Ties are final as soon as they happen.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            max_depth: 0,
            face_down: 0,
        }
    }
}

/// How the deck is partitioned between the two players.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OwnershipPolicy {
    /// Uniform random half/half split.
    Random,

    /// The favored player gets the top half of the deck by rank.
    Stacked { favored: Player },

    /// The favored player gets exactly `high_cards` cards whose rank is in
    /// `high_ranks`, the rest of their half is low cards.
    Biased {
        favored: Player,
        high_cards: usize,
        #[serde(default = "default_high_ranks")]
        high_ranks: Vec<Rank>,
    },

    /// Player A holds exactly these cards, Player B holds the rest.
    Fixed { a: Vec<Card> },

    /// Every card is owned by exactly one player, the split itself is left open.
    Open,
}

fn default_high_ranks() -> Vec<Rank> {
    Rank::DEFAULT_HIGH.to_vec()
}

impl OwnershipPolicy {
    /// Biased split using the default high ranks (ace, ten and the court cards).
    #[must_use]
    pub fn biased(favored: Player, high_cards: usize) -> Self {
        Self::Biased {
            favored,
            high_cards,
            high_ranks: default_high_ranks(),
        }
    }

    /// Check the policy against the deck it will partition.
    pub fn validate(&self, deck: &Deck) -> Result<(), ConfigError> {
        match self {
            Self::Random | Self::Stacked { .. } => require_even(deck),
            Self::Biased {
                high_cards,
                high_ranks,
                ..
            } => {
                require_even(deck)?;
                let hand = deck.len() / 2;
                let available = deck.iter().filter(|c| high_ranks.contains(&c.rank)).count();
                if *high_cards > available {
                    return Err(ConfigError::HighCardsExceeded {
                        requested: *high_cards,
                        available,
                    });
                }
                if *high_cards > hand {
                    return Err(ConfigError::HighCardsExceedHand {
                        requested: *high_cards,
                        hand,
                    });
                }
                let low = deck.len() - available;
                let needed = hand - high_cards;
                if needed > low {
                    return Err(ConfigError::LowCardsShort {
                        needed,
                        available: low,
                    });
                }
                Ok(())
            }
            Self::Fixed { a } => {
                let mut seen = FxHashSet::default();
                for &card in a {
                    if !deck.contains(card) {
                        return Err(ConfigError::UnknownCard(card));
                    }
                    if !seen.insert(card) {
                        return Err(ConfigError::DuplicateCard(card));
                    }
                }
                Ok(())
            }
            Self::Open => Ok(()),
        }
    }
}

fn require_even(deck: &Deck) -> Result<(), ConfigError> {
    if deck.len() % 2 == 0 {
        Ok(())
    } else {
        Err(ConfigError::OddDeck { len: deck.len() })
    }
}

/// Minimum share of primary rounds a player must win.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinTarget {
    pub player: Player,
    pub percent: u32,
}

impl WinTarget {
    /// Number of rounds the target requires over `horizon` rounds.
    ///
    /// ```
    /// use duel_sat::core::{Player, WinTarget};
    ///
    /// let target = WinTarget { player: Player::A, percent: 50 };
    /// assert_eq!(target.quota(26), Ok(13));
    /// assert!(target.quota(5).is_err());
    /// ```
    pub fn quota(&self, horizon: u16) -> Result<u16, ConfigError> {
        if self.percent > 100 {
            return Err(ConfigError::WinPercentOutOfRange {
                percent: self.percent,
            });
        }
        let scaled = self.percent * u32::from(horizon);
        if scaled % 100 != 0 {
            return Err(ConfigError::NonIntegerWinQuota {
                percent: self.percent,
                horizon,
            });
        }
        // percent <= 100, so the quota never exceeds the horizon
        Ok((scaled / 100) as u16)
    }
}

/// Complete duel configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelConfig {
    /// Number of primary rounds.
    pub horizon: u16,

    /// Tie-break protocol.
    #[serde(default)]
    pub tie_break: TieBreakConfig,

    /// Deck partition policy.
    pub ownership: OwnershipPolicy,

    /// Optional minimum win share for one player.
    #[serde(default)]
    pub win_target: Option<WinTarget>,

    /// Forbid a player from playing the same card in two primary rounds.
    #[serde(default)]
    pub forbid_replay: bool,

    /// Also emit the converse of the overall-winner implications.
    #[serde(default)]
    pub closed_world: bool,

    /// Seed for random ownership policies.
    #[serde(default)]
    pub seed: u64,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self::half_deck()
    }
}

impl DuelConfig {
    /// 26 rounds, cards may be replayed.
    #[must_use]
    pub fn half_deck() -> Self {
        Self {
            horizon: 26,
            tie_break: TieBreakConfig::default(),
            ownership: OwnershipPolicy::Random,
            win_target: None,
            forbid_replay: false,
            closed_world: false,
            seed: 0,
        }
    }

    /// 52 rounds, no card played twice by the same player.
    #[must_use]
    pub fn full_deck() -> Self {
        Self {
            horizon: 52,
            forbid_replay: true,
            ..Self::half_deck()
        }
    }

    /// Set the number of primary rounds.
    #[must_use]
    pub fn with_horizon(mut self, horizon: u16) -> Self {
        self.horizon = horizon;
        self
    }

    /// Set the tie-break protocol.
    #[must_use]
    pub fn with_tie_break(mut self, tie_break: TieBreakConfig) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set the ownership policy.
    #[must_use]
    pub fn with_ownership(mut self, ownership: OwnershipPolicy) -> Self {
        self.ownership = ownership;
        self
    }

    /// Require `player` to win at least `percent`% of primary rounds.
    #[must_use]
    pub fn with_win_target(mut self, player: Player, percent: u32) -> Self {
        self.win_target = Some(WinTarget { player, percent });
        self
    }

    /// Forbid or allow replaying a card.
    #[must_use]
    pub fn with_forbid_replay(mut self, forbid: bool) -> Self {
        self.forbid_replay = forbid;
        self
    }

    /// Turn the overall-winner implications into definitions.
    #[must_use]
    pub fn with_closed_world(mut self, closed: bool) -> Self {
        self.closed_world = closed;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration against the deck.
    pub fn validate(&self, deck: &Deck) -> Result<(), ConfigError> {
        if self.horizon == 0 {
            return Err(ConfigError::ZeroHorizon);
        }
        if deck.is_empty() {
            return Err(ConfigError::EmptyDeck);
        }
        self.ownership.validate(deck)?;
        if let Some(target) = &self.win_target {
            target.quota(self.horizon)?;
        }
        Ok(())
    }
}
