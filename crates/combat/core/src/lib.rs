//! Deterministic autobattler combat rules.
//!
//! `combat-core` resolves one match between two boards of minions: turn
//! alternation, simultaneous attack damage, one-death-at-a-time cascades with
//! deathrattles and triggers, and the signed terminal score. It is pure and
//! synchronous; randomness is injected through [`rng::RngOracle`] and every
//! observable step is reported to an [`engine::CombatObserver`].
pub mod combat;
pub mod config;
pub mod effect;
pub mod engine;
pub mod error;
pub mod rng;
pub mod state;

pub use combat::{DamageOutcome, SelectionPolicy, StandardPolicy, deal_damage};
pub use config::CombatConfig;
pub use effect::{
    Effect, EffectContext, EffectId, EffectRegistry, EffectSpec, Scope, SummonTarget, Trigger,
    TriggerEvent, TriggeredEffect,
};
#[cfg(feature = "serde")]
pub use engine::compute_events_root;
pub use engine::{CombatEngine, CombatEvent, CombatObserver, EventLog, NullObserver, Phase};
pub use error::{
    CombatError, ConfigurationError, ErrorSeverity, InvariantViolation, SimulationError,
};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use state::{
    Aura, Board, BoardSnapshot, EffectiveStats, Entity, EntityId, EntitySnapshot, EntityTemplate,
    Keywords, Side, Tribe, TribeSet, effective_stats,
};
