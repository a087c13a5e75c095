//! Execution context handed to effects.
//!
//! A [`Scope`] is the mutable view of a match from one side's perspective:
//! `own` is the side whose entity produced the effect, `opposing` the other.
//! Nested triggers run through reborrowed scopes so that every chain shares
//! one depth counter and one observer.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::combat::DamageOutcome;
use crate::config::CombatConfig;
use crate::engine::{CombatEvent, CombatObserver};
use crate::error::{CombatError, InvariantViolation};
use crate::rng::RngOracle;
use crate::state::{Board, Entity, EntityId, EntityTemplate, Side};

use super::{EffectRegistry, SummonTarget, TriggerEvent, apply};

type SlotList = ArrayVec<usize, { CombatConfig::MAX_BOARD_SIZE }>;
type IdList = ArrayVec<EntityId, { CombatConfig::MAX_BOARD_SIZE }>;

/// Mutable view of both boards from one side.
pub struct Scope<'a> {
    pub own: &'a mut Board,
    pub opposing: &'a mut Board,
    pub rng: &'a mut dyn RngOracle,
    registry: &'a EffectRegistry,
    observer: &'a mut dyn CombatObserver,
    config: &'a CombatConfig,
    first: Side,
    depth: u32,
}

impl<'a> Scope<'a> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        own: &'a mut Board,
        opposing: &'a mut Board,
        rng: &'a mut dyn RngOracle,
        registry: &'a EffectRegistry,
        observer: &'a mut dyn CombatObserver,
        config: &'a CombatConfig,
        first: Side,
    ) -> Self {
        Self {
            own,
            opposing,
            rng,
            registry,
            observer,
            config,
            first,
            depth: 0,
        }
    }

    /// Shorter-lived copy of this scope, same perspective.
    pub fn reborrow(&mut self) -> Scope<'_> {
        Scope {
            own: &mut *self.own,
            opposing: &mut *self.opposing,
            rng: &mut *self.rng,
            registry: self.registry,
            observer: &mut *self.observer,
            config: self.config,
            first: self.first,
            depth: self.depth,
        }
    }

    /// Shorter-lived copy of this scope seen from the other side.
    pub fn flipped(&mut self) -> Scope<'_> {
        Scope {
            own: &mut *self.opposing,
            opposing: &mut *self.own,
            rng: &mut *self.rng,
            registry: self.registry,
            observer: &mut *self.observer,
            config: self.config,
            first: self.first,
            depth: self.depth,
        }
    }

    pub fn registry(&self) -> &'a EffectRegistry {
        self.registry
    }

    /// Side that attacked first in this match.
    pub fn first(&self) -> Side {
        self.first
    }

    /// Nesting level of the effect currently running (0 outside effects).
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn emit(&mut self, event: CombatEvent) {
        self.observer.on_event(&event);
    }

    /// Runs every trigger of the own-board entity `id` matching `event`.
    ///
    /// Entities that left the board are skipped silently.
    pub fn fire(
        &mut self,
        id: EntityId,
        event: TriggerEvent,
        subject: Option<EntityId>,
    ) -> Result<(), CombatError> {
        let Some(source) = self.own.entity(id).cloned() else {
            return Ok(());
        };
        let mut matching = source
            .template()
            .triggers
            .iter()
            .filter(|triggered| triggered.trigger.fires_on(&event))
            .peekable();
        if matching.peek().is_none() {
            return Ok(());
        }

        let depth = self.depth + 1;
        if depth > self.config.max_effect_depth {
            return Err(InvariantViolation::EffectChainTooDeep {
                source_name: source.name().to_owned(),
                depth,
            }
            .into());
        }

        for triggered in matching {
            let Some(slot) = self.own.position(id) else {
                break;
            };
            let mut scope = self.reborrow();
            scope.depth = depth;
            let mut ctx = EffectContext {
                source: &source,
                slot,
                summon_slot: slot + 1,
                subject,
                scope,
            };
            apply(&triggered.effect, &mut ctx)?;
        }
        Ok(())
    }

    /// Fires `event` on every own-board entity except `subject`, in board order.
    pub fn fire_allies(&mut self, event: TriggerEvent, subject: EntityId) -> Result<(), CombatError> {
        let ids: IdList = self
            .own
            .entities()
            .iter()
            .map(Entity::id)
            .filter(|&id| id != subject)
            .collect();
        for id in ids {
            self.fire(id, event, Some(subject))?;
        }
        Ok(())
    }

    /// Runs a deathrattle (or any untriggered effect) of `source`.
    pub(crate) fn run_effect(
        &mut self,
        source: &Entity,
        slot: usize,
        effect: &super::EffectSpec,
    ) -> Result<(), CombatError> {
        let depth = self.depth + 1;
        if depth > self.config.max_effect_depth {
            return Err(InvariantViolation::EffectChainTooDeep {
                source_name: source.name().to_owned(),
                depth,
            }
            .into());
        }
        let mut scope = self.reborrow();
        scope.depth = depth;
        let mut ctx = EffectContext {
            source,
            slot,
            summon_slot: slot,
            subject: None,
            scope,
        };
        apply(effect, &mut ctx)
    }

    /// Summons up to `count` copies of `template` on the own board starting at
    /// `slot`; copies beyond capacity are dropped. Returns how many landed.
    pub fn summon(
        &mut self,
        template: &Arc<EntityTemplate>,
        slot: usize,
        count: u8,
    ) -> Result<u8, CombatError> {
        let mut slot = slot;
        let mut summoned = 0;
        for _ in 0..count {
            let Some(id) = self.own.summon(slot, Arc::clone(template)) else {
                break;
            };
            let placed = self.own.position(id).unwrap_or(slot);
            self.emit(CombatEvent::Summoned {
                entity: id,
                name: template.name.clone(),
                slot: placed,
            });
            self.fire_allies(
                TriggerEvent::AllySummoned {
                    tribes: template.tribes,
                },
                id,
            )?;
            slot = self.own.position(id).map_or(slot, |position| position + 1);
            summoned += 1;
        }
        Ok(summoned)
    }

    /// Returns the reborn copy of `dead` to `slot` on the own board.
    pub(crate) fn reborn(&mut self, dead: &Entity, slot: usize) -> Result<(), CombatError> {
        let Some(id) = self.own.reborn(dead, slot) else {
            return Ok(());
        };
        let placed = self.own.position(id).unwrap_or(slot);
        self.emit(CombatEvent::Reborn {
            entity: id,
            name: dead.name().to_owned(),
            slot: placed,
        });
        self.fire_allies(
            TriggerEvent::AllySummoned {
                tribes: dead.tribes(),
            },
            id,
        )
    }

    /// One damage instance on the own-board entity at `slot`.
    pub fn damage(
        &mut self,
        slot: usize,
        amount: i32,
        poisonous: bool,
    ) -> Result<DamageOutcome, CombatError> {
        let Some(id) = self.own.get(slot).map(Entity::id) else {
            return Ok(DamageOutcome::Ignored);
        };
        let outcome = self.own.deal_damage(slot, amount, poisonous);
        self.report_damage(id, outcome);
        if outcome.took_damage() {
            self.fire(id, TriggerEvent::DamageReceived, None)?;
        }
        Ok(outcome)
    }

    pub(crate) fn report_damage(&mut self, entity: EntityId, outcome: DamageOutcome) {
        match outcome {
            DamageOutcome::ShieldPopped => self.emit(CombatEvent::ShieldPopped { entity }),
            DamageOutcome::Damaged { amount, poisoned } => self.emit(CombatEvent::Damaged {
                entity,
                amount,
                poisoned,
            }),
            DamageOutcome::Ignored => {}
        }
    }

    /// Hits one random enemy that has not met its death condition yet.
    pub fn damage_random_enemy(&mut self, amount: i32) -> Result<Option<EntityId>, CombatError> {
        let mut enemy = self.flipped();
        let alive: SlotList = (0..enemy.own.len())
            .filter(|&slot| !enemy.own.is_dead(slot, enemy.opposing))
            .collect();
        let Some(index) = enemy.rng.pick_index(alive.len()) else {
            return Ok(None);
        };
        let slot = alive[index];
        let id = enemy.own.entities()[slot].id();
        enemy.damage(slot, amount, false)?;
        Ok(Some(id))
    }

    /// One damage instance on every own-board entity, in board order.
    pub fn damage_every(&mut self, amount: i32) -> Result<(), CombatError> {
        let ids: IdList = self.own.entities().iter().map(Entity::id).collect();
        for id in ids {
            if let Some(slot) = self.own.position(id) {
                self.damage(slot, amount, false)?;
            }
        }
        Ok(())
    }
}

/// Everything an effect may touch while it runs.
pub struct EffectContext<'a> {
    /// The entity the effect belongs to, as it was when the effect started.
    /// For deathrattles it is no longer on the board.
    pub source: &'a Entity,
    /// Slot of the source, or the slot it vacated.
    pub slot: usize,
    /// Where own-board summons land.
    pub summon_slot: usize,
    /// The entity that caused the trigger, if any.
    pub subject: Option<EntityId>,
    pub scope: Scope<'a>,
}

impl EffectContext<'_> {
    /// Whether the source's side attacked first in this match.
    pub fn attacks_first(&self) -> bool {
        self.scope.first() == self.source.id().side
    }

    /// Summons `count` copies of `template`, own board at `summon_slot` or the
    /// right end of the opposing board.
    pub fn summon(
        &mut self,
        template: &Arc<EntityTemplate>,
        target: SummonTarget,
        count: u8,
    ) -> Result<u8, CombatError> {
        match target {
            SummonTarget::Own => {
                let summoned = self.scope.summon(template, self.summon_slot, count)?;
                self.summon_slot += usize::from(summoned);
                Ok(summoned)
            }
            SummonTarget::Opposing => {
                let mut enemy = self.scope.flipped();
                let end = enemy.own.len();
                enemy.summon(template, end, count)
            }
        }
    }

    /// Live state of the source, if it is still on its board.
    pub fn source_live(&self) -> Option<&Entity> {
        self.scope.own.entity(self.source.id())
    }
}
