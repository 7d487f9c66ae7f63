//! Core duel types: players, RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{DuelConfig, OwnershipPolicy, TieBreakConfig, WinTarget};
pub use error::ConfigError;
pub use player::{Player, PlayerMap};
pub use rng::DuelRng;
