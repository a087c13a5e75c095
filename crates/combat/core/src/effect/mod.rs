//! Triggered effects: deathrattles and hooks.
//!
//! Effects are a closed tagged variant ([`EffectSpec`]) interpreted by the
//! engine. Behaviour that does not fit a built-in variant is registered in an
//! [`EffectRegistry`] and referenced by [`EffectId`] through
//! [`EffectSpec::Custom`]. [`EffectSpec::Pending`] declares behaviour that is
//! known but not implemented yet; triggering it is an error, never a no-op.

mod apply;
mod context;
mod registry;

use std::fmt;
use std::sync::Arc;

use crate::state::{EntityTemplate, Keywords, Tribe, TribeSet};

pub(crate) use apply::apply;
pub use context::{EffectContext, Scope};
pub use registry::{Effect, EffectRegistry};

/// Identifier of a registered (or declared-pending) effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EffectId(String);

impl EffectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EffectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EffectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Which board receives summoned entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SummonTarget {
    /// The source's own board, at the source's slot.
    Own,
    /// The right end of the opposing board.
    Opposing,
}

/// Built-in effect payloads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectSpec {
    Summon {
        token: Arc<EntityTemplate>,
        count: u8,
        target: SummonTarget,
    },
    /// `count` separate hits on random living enemies.
    DamageRandomEnemy { amount: i32, count: u8 },
    /// One hit on every entity of both boards, own board first.
    DamageAll { amount: i32 },
    BuffSelf { attack: i32, defense: i32 },
    /// Buff the entity that caused the trigger (summoned ally, ...).
    BuffSubject { attack: i32, defense: i32 },
    /// Buff every other friendly entity, optionally of one tribe.
    BuffAllies {
        tribe: Option<Tribe>,
        attack: i32,
        defense: i32,
    },
    GrantSelf { keywords: Keywords },
    Custom(EffectId),
    Pending(EffectId),
}

impl EffectSpec {
    /// Golden version of the effect.
    #[must_use]
    pub fn golden(&self) -> Self {
        match self {
            EffectSpec::Summon {
                token,
                count,
                target,
            } => EffectSpec::Summon {
                token: Arc::new(token.golden()),
                count: *count,
                target: *target,
            },
            EffectSpec::DamageRandomEnemy { amount, count } => EffectSpec::DamageRandomEnemy {
                amount: *amount,
                count: count.saturating_mul(2),
            },
            EffectSpec::DamageAll { amount } => EffectSpec::DamageAll {
                amount: amount * 2,
            },
            EffectSpec::BuffSelf { attack, defense } => EffectSpec::BuffSelf {
                attack: attack * 2,
                defense: defense * 2,
            },
            EffectSpec::BuffSubject { attack, defense } => EffectSpec::BuffSubject {
                attack: attack * 2,
                defense: defense * 2,
            },
            EffectSpec::BuffAllies {
                tribe,
                attack,
                defense,
            } => EffectSpec::BuffAllies {
                tribe: *tribe,
                attack: attack * 2,
                defense: defense * 2,
            },
            EffectSpec::GrantSelf { .. } | EffectSpec::Custom(_) | EffectSpec::Pending(_) => {
                self.clone()
            }
        }
    }
}

/// When a triggered effect fires. Absent triggers are no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    /// Once, before the first attack.
    PreCombat,
    /// When the owner is chosen to attack, before damage is computed.
    OnAttack,
    /// When another entity enters the owner's board.
    OnAllySummoned { tribe: Option<Tribe> },
    /// After a friendly entity's deathrattles resolved.
    OnAllyDeath { tribe: Option<Tribe> },
    /// When the owner actually loses defense.
    OnDamageReceived,
}

/// Occurrence the engine dispatches to triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerEvent {
    PreCombat,
    Attack,
    AllySummoned { tribes: TribeSet },
    AllyDeath { tribes: TribeSet },
    DamageReceived,
}

impl Trigger {
    pub fn fires_on(&self, event: &TriggerEvent) -> bool {
        match (self, event) {
            (Trigger::PreCombat, TriggerEvent::PreCombat)
            | (Trigger::OnAttack, TriggerEvent::Attack)
            | (Trigger::OnDamageReceived, TriggerEvent::DamageReceived) => true,
            (Trigger::OnAllySummoned { tribe }, TriggerEvent::AllySummoned { tribes })
            | (Trigger::OnAllyDeath { tribe }, TriggerEvent::AllyDeath { tribes }) => {
                tribe.is_none_or(|tribe| tribes.has(tribe))
            }
            _ => false,
        }
    }
}

/// A trigger paired with the effect it fires.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggeredEffect {
    pub trigger: Trigger,
    pub effect: EffectSpec,
}
