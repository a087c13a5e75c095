//! Batch configuration.
use std::env;
use std::num::NonZeroUsize;
use std::path::Path;

use combat_content::{ConfigLoader, LoadResult};
use combat_core::{CombatConfig, Side};
use serde::{Deserialize, Serialize};

/// How a rollout batch is run.
///
/// Loaded from the top level of a TOML file; missing keys keep
/// their defaults. Engine limits live under a nested `combat` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloutConfig {
    /// Number of matches in the batch.
    pub matches: u32,
    /// Number of blocking worker tasks the batch is sharded over.
    pub workers: usize,
    /// Batch seed. Drawn from OS entropy when unset.
    pub seed: Option<u64>,
    /// Forces the first attacker instead of drawing it per match.
    pub starting_side: Option<Side>,
    pub combat: CombatConfig,
}

impl RolloutConfig {
    pub const DEFAULT_MATCHES: u32 = 1_000;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ROLLOUT_MATCHES` - Matches per batch (default: 1000)
    /// - `ROLLOUT_WORKERS` - Worker tasks (default: available parallelism)
    /// - `ROLLOUT_SEED` - Batch seed (default: random)
    /// - `ROLLOUT_STARTING_SIDE` - `left` or `right` (default: random per match)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: &Path) -> LoadResult<Self> {
        Ok(ConfigLoader::load::<Self>(path)?.with_env_overrides())
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(matches) = read_env::<u32>("ROLLOUT_MATCHES") {
            self.matches = matches;
        }
        if let Some(workers) = read_env::<usize>("ROLLOUT_WORKERS") {
            self.workers = workers.max(1);
        }
        if let Some(seed) = read_env::<u64>("ROLLOUT_SEED") {
            self.seed = Some(seed);
        }
        if let Some(side) = read_env::<Side>("ROLLOUT_STARTING_SIDE") {
            self.starting_side = Some(side);
        }
        self
    }

    pub fn with_matches(mut self, matches: u32) -> Self {
        self.matches = matches;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_starting_side(mut self, side: Side) -> Self {
        self.starting_side = Some(side);
        self
    }

    pub fn with_combat(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    /// Worker count actually used for a batch of `matches`.
    pub fn effective_workers(&self) -> usize {
        let matches = usize::try_from(self.matches).unwrap_or(usize::MAX);
        self.workers.clamp(1, matches.max(1))
    }
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            matches: Self::DEFAULT_MATCHES,
            workers: std::thread::available_parallelism().map_or(4, NonZeroUsize::get),
            seed: None,
            starting_side: None,
            combat: CombatConfig::default(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
