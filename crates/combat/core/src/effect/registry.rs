//! Registry of custom effects, resolved by table lookup at trigger time.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::CombatError;

use super::{EffectContext, EffectId};

/// Behaviour behind an [`EffectSpec::Custom`](super::EffectSpec::Custom) id.
///
/// Effects are stateless with respect to the match: everything they touch
/// arrives through the context.
pub trait Effect: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Mutates the boards reachable from `ctx`.
    fn apply(&self, ctx: &mut EffectContext<'_>) -> Result<(), CombatError>;
}

/// Lookup table from [`EffectId`] to its behaviour.
///
/// Shared read-only between all matches of a rollout batch.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    table: BTreeMap<EffectId, Arc<dyn Effect>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `effect` under `id`, returning the behaviour it replaced.
    pub fn register(
        &mut self,
        id: impl Into<EffectId>,
        effect: Arc<dyn Effect>,
    ) -> Option<Arc<dyn Effect>> {
        self.table.insert(id.into(), effect)
    }

    #[must_use]
    pub fn with(mut self, id: impl Into<EffectId>, effect: Arc<dyn Effect>) -> Self {
        self.register(id, effect);
        self
    }

    pub fn get(&self, id: &EffectId) -> Option<&Arc<dyn Effect>> {
        self.table.get(id)
    }

    pub fn contains(&self, id: &EffectId) -> bool {
        self.table.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Registered ids in sorted order (for debugging).
    pub fn ids(&self) -> impl Iterator<Item = &EffectId> + '_ {
        self.table.keys()
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.table.iter().map(|(id, effect)| (id, effect.name())))
            .finish()
    }
}

impl From<String> for EffectId {
    fn from(id: String) -> Self {
        EffectId::new(id)
    }
}
