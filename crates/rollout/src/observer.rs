//! Forwards combat events to `tracing`.
use combat_core::{CombatEvent, CombatObserver};
use tracing::{debug, trace};

const TARGET: &str = "rollout::combat";

/// Logs every event of one match, tagged with its index and seed.
///
/// Turn-level events go to `trace`, board changes to `debug`.
#[derive(Clone, Copy, Debug)]
pub struct TracingObserver {
    index: u64,
    seed: u64,
}

impl TracingObserver {
    pub fn new(index: u64, seed: u64) -> Self {
        Self { index, seed }
    }
}

impl CombatObserver for TracingObserver {
    fn on_event(&mut self, event: &CombatEvent) {
        let (index, seed) = (self.index, self.seed);
        match event {
            CombatEvent::CombatStarted { first } => {
                debug!(target: TARGET, index, seed, first = %first, "combat started");
            }
            CombatEvent::TurnStarted { turn, side } => {
                trace!(target: TARGET, index, turn, side = %side, "turn started");
            }
            CombatEvent::Attack {
                attacker,
                defender,
                attack,
                counter,
            } => {
                trace!(
                    target: TARGET,
                    index,
                    attacker = %attacker,
                    defender = %defender,
                    attack,
                    counter,
                    "attack"
                );
            }
            CombatEvent::ShieldPopped { entity } => {
                trace!(target: TARGET, index, entity = %entity, "shield popped");
            }
            CombatEvent::Damaged {
                entity,
                amount,
                poisoned,
            } => {
                trace!(target: TARGET, index, entity = %entity, amount, poisoned, "damaged");
            }
            CombatEvent::Died { entity, name, slot }
            | CombatEvent::Summoned { entity, name, slot }
            | CombatEvent::Reborn { entity, name, slot } => {
                debug!(
                    target: TARGET,
                    index,
                    entity = %entity,
                    name = name.as_str(),
                    slot,
                    event = event.as_str(),
                    "board changed"
                );
            }
            CombatEvent::CombatFinished { turns, score } => {
                debug!(target: TARGET, index, seed, turns, score, "combat finished");
            }
        }
    }
}
