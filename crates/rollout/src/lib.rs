//! Batch rollouts over `combat-core`.
//!
//! Runs many independent matches between two boards on blocking worker tasks,
//! logs each match through `tracing`, and aggregates the signed scores into a
//! [`RolloutReport`]. Any match can be replayed from its seed.
pub mod config;
pub mod driver;
pub mod error;
pub mod observer;
pub mod report;
pub mod rng;

pub use config::RolloutConfig;
pub use driver::{Replay, Rollout};
pub use error::RolloutError;
pub use observer::TracingObserver;
pub use report::{MatchOutcome, RolloutReport};
pub use rng::RandAdapter;
