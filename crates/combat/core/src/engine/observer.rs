//! Combat event stream.
//!
//! The engine has no logging dependency of its own; everything that happens
//! during a match is reported to a [`CombatObserver`].

use crate::state::{EntityId, Side};

/// Something observable that happened during a match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    CombatStarted {
        first: Side,
    },
    TurnStarted {
        turn: u32,
        side: Side,
    },
    /// Effective attack values were fixed before either damage was applied.
    Attack {
        attacker: EntityId,
        defender: EntityId,
        attack: i32,
        counter: i32,
    },
    ShieldPopped {
        entity: EntityId,
    },
    Damaged {
        entity: EntityId,
        amount: i32,
        poisoned: bool,
    },
    Died {
        entity: EntityId,
        name: String,
        slot: usize,
    },
    Summoned {
        entity: EntityId,
        name: String,
        slot: usize,
    },
    Reborn {
        entity: EntityId,
        name: String,
        slot: usize,
    },
    CombatFinished {
        turns: u32,
        score: i32,
    },
}

impl CombatEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombatEvent::CombatStarted { .. } => "combat_started",
            CombatEvent::TurnStarted { .. } => "turn_started",
            CombatEvent::Attack { .. } => "attack",
            CombatEvent::ShieldPopped { .. } => "shield_popped",
            CombatEvent::Damaged { .. } => "damaged",
            CombatEvent::Died { .. } => "died",
            CombatEvent::Summoned { .. } => "summoned",
            CombatEvent::Reborn { .. } => "reborn",
            CombatEvent::CombatFinished { .. } => "combat_finished",
        }
    }
}

/// Receives every [`CombatEvent`] of a match, in order.
pub trait CombatObserver {
    fn on_event(&mut self, event: &CombatEvent);
}

impl<T: CombatObserver + ?Sized> CombatObserver for &mut T {
    fn on_event(&mut self, event: &CombatEvent) {
        (**self).on_event(event);
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl CombatObserver for NullObserver {
    fn on_event(&mut self, _event: &CombatEvent) {}
}

/// Records events for later inspection or replay comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<CombatEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<CombatEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sides of the `TurnStarted` events, in order.
    pub fn turn_sides(&self) -> Vec<Side> {
        self.events
            .iter()
            .filter_map(|event| match event {
                CombatEvent::TurnStarted { side, .. } => Some(*side),
                _ => None,
            })
            .collect()
    }
}

impl CombatObserver for EventLog {
    fn on_event(&mut self, event: &CombatEvent) {
        self.events.push(event.clone());
    }
}

/// SHA-256 commitment over the bincode-encoded event sequence.
///
/// Two runs with the same seed and boards produce the same root.
#[cfg(feature = "serde")]
pub fn compute_events_root(events: &[CombatEvent]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for event in events {
        let bytes = bincode::serialize(event).expect("CombatEvent serialization should not fail");
        hasher.update(&bytes);
    }
    hasher.finalize().into()
}
