//! Per-match outcomes and their aggregation.
use std::collections::BTreeMap;

use combat_core::ErrorSeverity;
use serde::Serialize;

/// Result of one match of a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Finished {
        index: u64,
        seed: u64,
        score: i32,
        turns: u32,
    },
    /// The match was aborted and does not count towards the score.
    Failed {
        index: u64,
        seed: u64,
        code: &'static str,
        severity: ErrorSeverity,
        message: String,
    },
}

impl MatchOutcome {
    pub fn index(&self) -> u64 {
        match self {
            Self::Finished { index, .. } | Self::Failed { index, .. } => *index,
        }
    }

    pub fn seed(&self) -> u64 {
        match self {
            Self::Finished { seed, .. } | Self::Failed { seed, .. } => *seed,
        }
    }

    pub fn score(&self) -> Option<i32> {
        match self {
            Self::Finished { score, .. } => Some(*score),
            Self::Failed { .. } => None,
        }
    }
}

/// Aggregate of a batch, from the left board's perspective.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RolloutReport {
    pub master_seed: u64,
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub total_score: i64,
    pub best_score: Option<i32>,
    pub worst_score: Option<i32>,
    /// Failed match count per error code.
    pub failures: BTreeMap<String, u32>,
    /// Seeds of failed matches, for replay.
    pub failed_seeds: Vec<u64>,
}

impl RolloutReport {
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &MatchOutcome) {
        self.matches += 1;
        match outcome {
            MatchOutcome::Finished { score, .. } => {
                let score = *score;
                match score.signum() {
                    1 => self.wins += 1,
                    -1 => self.losses += 1,
                    _ => self.ties += 1,
                }
                self.total_score += i64::from(score);
                self.best_score = Some(self.best_score.map_or(score, |best| best.max(score)));
                self.worst_score = Some(self.worst_score.map_or(score, |worst| worst.min(score)));
            }
            MatchOutcome::Failed { code, seed, .. } => {
                *self.failures.entry((*code).to_owned()).or_default() += 1;
                self.failed_seeds.push(*seed);
            }
        }
    }

    /// Matches that produced a score.
    pub fn completed(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    pub fn failed(&self) -> u32 {
        self.failures.values().sum()
    }

    pub fn win_rate(&self) -> f64 {
        match self.completed() {
            0 => 0.0,
            completed => f64::from(self.wins) / f64::from(completed),
        }
    }

    pub fn mean_score(&self) -> f64 {
        match self.completed() {
            0 => 0.0,
            completed => self.total_score as f64 / f64::from(completed),
        }
    }
}
