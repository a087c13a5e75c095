//! Common error infrastructure for combat-core.
//!
//! Every failure is local to one match. The taxonomy mirrors how a batch
//! driver treats it:
//!
//! - [`ConfigurationError`]: a board was composed from invalid data; the match
//!   never starts.
//! - [`CombatError::UnsupportedEffect`]: a triggered effect has no concrete
//!   behaviour. The match is skipped and reported, never silently scored.
//! - [`InvariantViolation`]: the engine detected a state it must not continue
//!   from (runaway cascade, bogus selection). The match is aborted.

use crate::effect::EffectId;
use crate::state::{EntityId, Side};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: invalid input that should be rejected without retry
/// - **Recoverable**: the match cannot be scored but the batch carries on
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: the match state is corrupted and must be discarded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Validation,
    Recoverable,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Recoverable => "recoverable",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// Gives batch drivers a uniform way to bucket failures without matching on
/// every variant.
pub trait SimulationError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Used as the aggregation key for failure statistics.
    fn error_code(&self) -> &'static str;
}

/// A board was composed from invalid initial state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("board for side {side} holds {count} entities, capacity is {capacity}")]
    BoardOverflow {
        side: Side,
        count: usize,
        capacity: usize,
    },

    #[error("entity '{name}' has negative {stat} ({value})")]
    NegativeStat {
        name: String,
        stat: &'static str,
        value: i32,
    },

    #[error("hero tier {tier} exceeds the maximum of {max}")]
    InvalidTier { tier: u8, max: u8 },

    #[error("board passed as side {expected} belongs to side {actual}")]
    SideMismatch { expected: Side, actual: Side },
}

impl SimulationError for ConfigurationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BoardOverflow { .. } => "configuration.board_overflow",
            Self::NegativeStat { .. } => "configuration.negative_stat",
            Self::InvalidTier { .. } => "configuration.invalid_tier",
            Self::SideMismatch { .. } => "configuration.side_mismatch",
        }
    }
}

/// The engine reached a state it refuses to continue from.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("death cascade exceeded {limit} kills during turn {turn}")]
    CascadeLimitExceeded { limit: u32, turn: u32 },

    #[error("match did not finish within {limit} turns")]
    TurnLimitExceeded { limit: u32 },

    #[error("effect chain too deep: '{source_name}' reached depth {depth}")]
    EffectChainTooDeep { source_name: String, depth: u32 },

    #[error("entity {entity} is not on the board of side {side}")]
    EntityNotOnBoard { entity: EntityId, side: Side },

    #[error("selection policy returned nothing for side {side}")]
    EmptySelection { side: Side },
}

impl SimulationError for InvariantViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CascadeLimitExceeded { .. } => "invariant.cascade_limit",
            Self::TurnLimitExceeded { .. } => "invariant.turn_limit",
            Self::EffectChainTooDeep { .. } => "invariant.effect_chain_too_deep",
            Self::EntityNotOnBoard { .. } => "invariant.entity_not_on_board",
            Self::EmptySelection { .. } => "invariant.empty_selection",
        }
    }
}

/// Errors surfaced while running a match.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("effect '{effect}' on '{entity}' has no registered behaviour")]
    UnsupportedEffect { effect: EffectId, entity: String },

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl CombatError {
    pub(crate) fn unsupported(effect: &EffectId, entity: &str) -> Self {
        Self::UnsupportedEffect {
            effect: effect.clone(),
            entity: entity.to_owned(),
        }
    }
}

impl SimulationError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Configuration(err) => err.severity(),
            Self::UnsupportedEffect { .. } => ErrorSeverity::Recoverable,
            Self::Invariant(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(err) => err.error_code(),
            Self::UnsupportedEffect { .. } => "effect.unsupported",
            Self::Invariant(err) => err.error_code(),
        }
    }
}
