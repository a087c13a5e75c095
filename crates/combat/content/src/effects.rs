//! Custom effects backing `EffectSpec::Custom` ids in the catalog.

use std::sync::Arc;

use combat_core::{CombatError, Effect, EffectContext, EntityTemplate, SummonTarget};

/// Summons minions drawn uniformly from a fixed pool at the source's slot.
///
/// Golden sources summon twice.
pub struct RandomSummon {
    name: &'static str,
    pool: Vec<Arc<EntityTemplate>>,
}

impl RandomSummon {
    pub fn new(name: &'static str, pool: Vec<Arc<EntityTemplate>>) -> Self {
        Self { name, pool }
    }

    pub fn pool(&self) -> &[Arc<EntityTemplate>] {
        &self.pool
    }
}

impl Effect for RandomSummon {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> Result<(), CombatError> {
        let times = if ctx.source.template().golden { 2 } else { 1 };
        for _ in 0..times {
            let Some(index) = ctx.scope.rng.pick_index(self.pool.len()) else {
                return Ok(());
            };
            ctx.summon(&self.pool[index], SummonTarget::Own, 1)?;
        }
        Ok(())
    }
}
