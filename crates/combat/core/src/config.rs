/// Combat limits and tunable parameters.
///
/// The limits exist so that a misconfigured content pack (an endless summon
/// loop, two boards that cannot damage each other) surfaces as an
/// [`InvariantViolation`](crate::InvariantViolation) instead of hanging a
/// rollout worker.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Maximum number of attack steps before the match is aborted.
    pub max_turns: u32,
    /// Maximum number of deaths resolved by a single cascade.
    pub max_cascade: u32,
    /// Maximum nesting depth of triggered effects (a trigger firing a
    /// summon that fires another trigger, ...).
    pub max_effect_depth: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of slots on a board.
    pub const MAX_BOARD_SIZE: usize = 7;
    /// Highest hero tier accepted when composing a board.
    pub const MAX_TIER: u8 = 6;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u32 = 500;
    pub const DEFAULT_MAX_CASCADE: u32 = 256;
    pub const DEFAULT_MAX_EFFECT_DEPTH: u32 = 32;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            max_cascade: Self::DEFAULT_MAX_CASCADE,
            max_effect_depth: Self::DEFAULT_MAX_EFFECT_DEPTH,
        }
    }

    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    #[must_use]
    pub fn with_max_cascade(mut self, max_cascade: u32) -> Self {
        self.max_cascade = max_cascade;
        self
    }

    #[must_use]
    pub fn with_max_effect_depth(mut self, max_effect_depth: u32) -> Self {
        self.max_effect_depth = max_effect_depth;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
