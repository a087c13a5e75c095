//! Run a rollout batch and print its report.

use anyhow::Result;
use clap::Parser;
use rollout::RolloutReport;

use super::MatchupArgs;

#[derive(Debug, Parser)]
pub struct Simulate {
    #[command(flatten)]
    matchup: MatchupArgs,

    /// Number of matches (overrides config)
    #[arg(short = 'n', long)]
    matches: Option<u32>,

    /// Worker tasks (overrides config)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Batch seed (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Simulate {
    pub async fn execute(&self) -> Result<()> {
        let mut config = self.matchup.rollout_config()?;
        if let Some(matches) = self.matches {
            config.matches = matches;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        let report = self.matchup.rollout(config)?.run().await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_report(&report);
        }
        Ok(())
    }
}

fn print_report(report: &RolloutReport) {
    println!("Matches:     {} (batch seed {})", report.matches, report.master_seed);
    println!(
        "Left record: {} wins / {} losses / {} ties",
        report.wins, report.losses, report.ties
    );
    println!("Win rate:    {:.1}%", report.win_rate() * 100.0);
    println!("Mean score:  {:+.3}", report.mean_score());
    if let (Some(best), Some(worst)) = (report.best_score, report.worst_score) {
        println!("Score range: {worst:+} .. {best:+}");
    }

    if report.failures.is_empty() {
        return;
    }
    println!();
    println!("Aborted matches: {}", report.failed());
    for (code, count) in &report.failures {
        println!("  {code}: {count}");
    }
    if let Some(seed) = report.failed_seeds.first() {
        println!("  first failing seed: {seed} (combat-sim replay <MATCHUP> --seed {seed})");
    }
}
