//! Data-driven combat content and loaders.
//!
//! This crate houses the built-in minion catalog and loaders for data files:
//! - Minion templates and tokens (tier-3 pool plus the two-cost summon pool)
//! - Custom effects referenced by the catalog (registered in an `EffectRegistry`)
//! - Board and matchup compositions (data-driven via RON)
//! - Engine and rollout configuration (data-driven via TOML)
//!
//! Content is consumed when boards are composed and never changes during a
//! match.

pub mod catalog;
pub mod effects;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{Catalog, KHADGAR, PILOTED_SHREDDER};
pub use effects::RandomSummon;

#[cfg(feature = "loaders")]
pub use loaders::{BoardLoader, BoardSpec, ConfigLoader, LoadResult, MatchupSpec, MinionSpec};
