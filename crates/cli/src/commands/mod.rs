//! Command implementations for combat-sim
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod catalog;
mod replay;
mod simulate;

pub use catalog::ListCatalog;
pub use replay::Replay;
pub use simulate::Simulate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use combat_content::{BoardLoader, Catalog};
use combat_core::Side;
use rollout::{Rollout, RolloutConfig};

/// Arguments shared by every command that plays matches.
#[derive(Debug, Args)]
pub struct MatchupArgs {
    /// Matchup RON file with `left` and `right` boards
    matchup: PathBuf,

    /// Rollout TOML config (defaults to environment variables)
    #[arg(short, long, env = "COMBAT_SIM_CONFIG")]
    config: Option<PathBuf>,

    /// Side that attacks first (random per match when omitted)
    #[arg(long, value_parser = parse_side)]
    starting_side: Option<Side>,
}

impl MatchupArgs {
    pub fn rollout_config(&self) -> Result<RolloutConfig> {
        let mut config = match &self.config {
            Some(path) => RolloutConfig::load(path)?,
            None => RolloutConfig::from_env(),
        };
        if let Some(side) = self.starting_side {
            config.starting_side = Some(side);
        }
        Ok(config)
    }

    pub fn rollout(&self, config: RolloutConfig) -> Result<Rollout> {
        let catalog = Catalog::standard();
        let matchup = BoardLoader::load_matchup(&self.matchup)?;
        let (left, right) = matchup
            .build(&catalog)
            .with_context(|| format!("Failed to build matchup {}", self.matchup.display()))?;

        Ok(Rollout::new(left, right, Arc::new(catalog.registry()), config)?)
    }
}

fn parse_side(value: &str) -> Result<Side, String> {
    value
        .parse()
        .map_err(|_| format!("expected 'left' or 'right', got '{value}'"))
}
