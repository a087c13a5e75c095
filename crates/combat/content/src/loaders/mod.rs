//! Content loaders for reading combat data from files.
//!
//! Boards are described in RON and resolved against a [`Catalog`](crate::Catalog);
//! configuration comes from TOML.

pub mod board;
pub mod config;

pub use board::{BoardLoader, BoardSpec, MatchupSpec, MinionSpec};
pub use config::ConfigLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
