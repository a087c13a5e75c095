use combat_core::CombatError;

/// Errors that abort a whole batch.
///
/// Individual match failures never surface here; they are counted in the
/// [`RolloutReport`](crate::RolloutReport).
#[derive(Debug, thiserror::Error)]
pub enum RolloutError {
    #[error("rollout worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("invalid matchup: {0}")]
    Matchup(#[source] CombatError),
}
