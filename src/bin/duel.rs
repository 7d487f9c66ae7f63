//! Encode a duel and report outcome likelihoods.
//!
//! ```text
//! duel --ranks 4 --suits 2 --horizon 4 --policy stacked --favored a --forbid-replay
//! ```
//!
//! Flags override the values of `--config` (a JSON `DuelConfig`), which in
//! turn override the 26-round defaults. Logs go to stderr, filtered by
//! `RUST_LOG` (default `info`).

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use duel_sat::cards::Deck;
use duel_sat::core::{DuelConfig, OwnershipPolicy, Player, TieBreakConfig};
use duel_sat::encoding::DuelEncoder;
use duel_sat::oracle::VarisatOracle;
use duel_sat::report::analyze;

#[derive(Parser)]
#[command(name = "duel")]
#[command(about = "Exact outcome likelihoods of a War-style card duel")]
struct Args {
    /// Number of primary rounds
    #[arg(long)]
    horizon: Option<u16>,

    /// Tie-break blocks tried before a tie is final
    #[arg(long)]
    tie_break_depth: Option<u8>,

    /// Face-down flips per tie-break block
    #[arg(long)]
    face_down: Option<u8>,

    /// How the deck is split
    #[arg(long)]
    policy: Option<PolicyArg>,

    /// Player favored by the stacked and biased policies
    #[arg(long, default_value = "a")]
    favored: PlayerArg,

    /// High cards dealt to the favored player (biased policy)
    #[arg(long)]
    high_cards: Option<usize>,

    /// Minimum percentage of rounds the favored player must win
    #[arg(long)]
    win_percent: Option<u32>,

    /// Ranks in the deck, counted from the ace
    #[arg(long, default_value_t = 13, value_parser = clap::value_parser!(u8).range(1..=13))]
    ranks: u8,

    /// Suits in the deck
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(1..=4))]
    suits: u8,

    /// Seed for the random and biased policies
    #[arg(long)]
    seed: Option<u64>,

    /// Give up counting beyond this many models
    #[arg(long, default_value_t = VarisatOracle::DEFAULT_MAX_MODELS)]
    max_models: u64,

    /// Encode overall winner and draw as definitions; the report is exact either way
    #[arg(long)]
    closed_world: bool,

    /// Forbid replaying a card in a later primary round
    #[arg(long)]
    forbid_replay: bool,

    /// JSON file holding a base configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Random,
    Stacked,
    Biased,
    Open,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlayerArg {
    A,
    B,
}

impl From<PlayerArg> for Player {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::A => Player::A,
            PlayerArg::B => Player::B,
        }
    }
}

fn build_config(args: &Args) -> Result<DuelConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => DuelConfig::default(),
    };

    if let Some(horizon) = args.horizon {
        config.horizon = horizon;
    }
    config.tie_break = TieBreakConfig {
        max_depth: args.tie_break_depth.unwrap_or(config.tie_break.max_depth),
        face_down: args.face_down.unwrap_or(config.tie_break.face_down),
    };

    let favored = Player::from(args.favored);
    if let Some(policy) = args.policy {
        config.ownership = match policy {
            PolicyArg::Random => OwnershipPolicy::Random,
            PolicyArg::Stacked => OwnershipPolicy::Stacked { favored },
            PolicyArg::Biased => match args.high_cards {
                Some(high_cards) => OwnershipPolicy::biased(favored, high_cards),
                None => bail!("--policy biased needs --high-cards"),
            },
            PolicyArg::Open => OwnershipPolicy::Open,
        };
    }
    if let Some(percent) = args.win_percent {
        config = config.with_win_target(favored, percent);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.closed_world |= args.closed_world;
    config.forbid_replay |= args.forbid_replay;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = build_config(&args)?;
    let deck = Deck::reduced(args.ranks, usize::from(args.suits));
    info!(cards = deck.len(), horizon = config.horizon, policy = ?config.ownership, "encoding duel");

    let duel = DuelEncoder::new(deck, config)
        .encode()
        .context("invalid duel configuration")?;
    let oracle = VarisatOracle::new().with_max_models(args.max_models);
    let report = analyze(&oracle, &duel).context("model counting failed; try a smaller deck or horizon")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
