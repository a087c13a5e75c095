//! Replay a single match and print its transcript.

use anyhow::Result;
use clap::Parser;
use combat_core::{CombatEvent, SimulationError};
use rollout::Rollout;
use serde::Serialize;

use super::MatchupArgs;

#[derive(Debug, Parser)]
pub struct Replay {
    #[command(flatten)]
    matchup: MatchupArgs,

    /// Match seed, or the batch seed when --index is given
    #[arg(short, long)]
    seed: u64,

    /// Match index within the batch seeded by --seed
    #[arg(short, long)]
    index: Option<u64>,

    /// Print the transcript as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Transcript<'a> {
    seed: u64,
    score: Option<i32>,
    turns: Option<u32>,
    error: Option<String>,
    root: String,
    events: &'a [CombatEvent],
}

impl Replay {
    pub fn execute(&self) -> Result<()> {
        let config = self.matchup.rollout_config()?;
        let seed = match self.index {
            Some(index) => Rollout::match_seed(self.seed, index),
            None => self.seed,
        };

        let replay = self.matchup.rollout(config)?.replay(seed);
        let root = hex::encode(replay.root);

        if self.json {
            let (score, turns) = replay.result.as_ref().ok().copied().unzip();
            let transcript = Transcript {
                seed,
                score,
                turns,
                error: replay.result.as_ref().err().map(ToString::to_string),
                root,
                events: &replay.events,
            };
            println!("{}", serde_json::to_string_pretty(&transcript)?);
            return Ok(());
        }

        println!("Seed: {seed}");
        for event in &replay.events {
            println!("  {}", describe(event));
        }
        match &replay.result {
            Ok((score, turns)) => println!("Score: {score:+} after {turns} turns"),
            Err(err) => println!("Aborted [{}]: {}", err.error_code(), err),
        }
        println!("Root: {root}");
        Ok(())
    }
}

fn describe(event: &CombatEvent) -> String {
    match event {
        CombatEvent::CombatStarted { first } => format!("{first} attacks first"),
        CombatEvent::TurnStarted { turn, side } => format!("turn {turn}: {side}"),
        CombatEvent::Attack {
            attacker,
            defender,
            attack,
            counter,
        } => format!("{attacker} ({attack}) attacks {defender} ({counter})"),
        CombatEvent::ShieldPopped { entity } => format!("{entity} loses its shield"),
        CombatEvent::Damaged {
            entity,
            amount,
            poisoned,
        } => {
            if *poisoned {
                format!("{entity} takes {amount} poisonous damage")
            } else {
                format!("{entity} takes {amount} damage")
            }
        }
        CombatEvent::Died { entity, name, slot } => format!("{name} {entity} dies at slot {slot}"),
        CombatEvent::Summoned { entity, name, slot } => {
            format!("{name} {entity} summoned at slot {slot}")
        }
        CombatEvent::Reborn { entity, name, slot } => {
            format!("{name} {entity} reborn at slot {slot}")
        }
        CombatEvent::CombatFinished { turns, score } => {
            format!("combat finished after {turns} turns, score {score:+}")
        }
    }
}
