//! Batch driver.
//!
//! A batch is `matches` independent matches between the same two boards. Each
//! match gets its own seed derived from the batch seed and its index, so any
//! single match can be replayed on its own. Matches are sharded over blocking
//! tasks; the engine is synchronous and CPU-bound.
use std::sync::Arc;

use combat_core::{
    Board, CombatEngine, CombatError, CombatEvent, CombatObserver, ConfigurationError,
    EffectRegistry, EventLog, PcgRng, RngOracle, Side, SimulationError, compute_events_root,
    compute_seed,
};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::{MatchOutcome, RolloutConfig, RolloutError, RolloutReport, TracingObserver};

/// Seed stream used for the match RNG.
const MATCH_STREAM: u32 = 0;

/// Runs batches of matches between two fixed boards.
#[derive(Clone, Debug)]
pub struct Rollout {
    left: Board,
    right: Board,
    registry: Arc<EffectRegistry>,
    config: RolloutConfig,
}

impl Rollout {
    /// Fails when either board sits on the wrong side.
    pub fn new(
        left: Board,
        right: Board,
        registry: Arc<EffectRegistry>,
        config: RolloutConfig,
    ) -> Result<Self, RolloutError> {
        for (board, expected) in [(&left, Side::Left), (&right, Side::Right)] {
            if board.side() != expected {
                let mismatch = ConfigurationError::SideMismatch {
                    expected,
                    actual: board.side(),
                };
                return Err(RolloutError::Matchup(mismatch.into()));
            }
        }
        Ok(Self {
            left,
            right,
            registry,
            config,
        })
    }

    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Seed of match `index` within a batch seeded with `master_seed`.
    pub fn match_seed(master_seed: u64, index: u64) -> u64 {
        compute_seed(master_seed, index, MATCH_STREAM)
    }

    /// Runs the whole batch and aggregates it.
    ///
    /// Failed matches are counted per error code; only a worker task failing
    /// aborts the batch.
    pub async fn run(&self) -> Result<RolloutReport, RolloutError> {
        let master_seed = self.config.seed.unwrap_or_else(rand::random);
        let matches = u64::from(self.config.matches);
        let workers = self.config.effective_workers();

        info!(
            target: "rollout",
            matches,
            workers,
            master_seed,
            "Starting rollout batch"
        );

        let mut tasks = JoinSet::new();
        for worker in 0..workers {
            let job = self.clone();
            tasks.spawn_blocking(move || {
                (worker as u64..matches)
                    .step_by(workers)
                    .map(|index| job.run_match(index, Self::match_seed(master_seed, index)))
                    .collect::<Vec<_>>()
            });
        }

        let mut outcomes = Vec::with_capacity(self.config.matches as usize);
        while let Some(shard) = tasks.join_next().await {
            outcomes.extend(shard?);
        }
        outcomes.sort_by_key(MatchOutcome::index);

        let mut report = RolloutReport::new(master_seed);
        for outcome in &outcomes {
            report.record(outcome);
        }

        info!(
            target: "rollout",
            wins = report.wins,
            losses = report.losses,
            ties = report.ties,
            failed = report.failed(),
            mean_score = report.mean_score(),
            "Rollout batch finished"
        );
        Ok(report)
    }

    /// Plays match `index` with `seed`, logging its events through `tracing`.
    pub fn run_match(&self, index: u64, seed: u64) -> MatchOutcome {
        let result = self.play(PcgRng::new(seed), TracingObserver::new(index, seed));
        match result {
            Ok((score, turns)) => MatchOutcome::Finished {
                index,
                seed,
                score,
                turns,
            },
            Err(err) => {
                warn!(
                    target: "rollout",
                    index,
                    seed,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    error = %err,
                    "Match aborted"
                );
                MatchOutcome::Failed {
                    index,
                    seed,
                    code: err.error_code(),
                    severity: err.severity(),
                    message: err.to_string(),
                }
            }
        }
    }

    /// Plays one match with any RNG and observer; returns score and turns.
    pub fn play<R: RngOracle>(
        &self,
        rng: R,
        observer: impl CombatObserver,
    ) -> Result<(i32, u32), CombatError> {
        let mut engine = CombatEngine::new(
            self.left.clone(),
            self.right.clone(),
            Arc::clone(&self.registry),
            rng,
        )?
        .with_config(self.config.combat.clone())
        .with_observer(observer);
        if let Some(side) = self.config.starting_side {
            engine = engine.with_starting_side(side);
        }

        let score = engine.run()?;
        Ok((score, engine.turn()))
    }

    /// Replays the match played with `seed`, recording its full transcript.
    pub fn replay(&self, seed: u64) -> Replay {
        let mut log = EventLog::new();
        let result = self.play(PcgRng::new(seed), &mut log);
        let root = compute_events_root(log.events());
        debug!(
            target: "rollout",
            seed,
            events = log.len(),
            root = ?root,
            "Replayed match"
        );
        Replay {
            seed,
            result,
            events: log.into_events(),
            root,
        }
    }
}

/// Transcript of a replayed match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replay {
    pub seed: u64,
    /// Score and turn count, or the error that aborted the match.
    pub result: Result<(i32, u32), CombatError>,
    pub events: Vec<CombatEvent>,
    /// SHA-256 commitment over the event stream.
    pub root: [u8; 32],
}
