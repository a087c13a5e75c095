//! Death resolution.
//!
//! One death at a time: the attacking board is scanned first, in board
//! order, then the defending board. After each resolved death the scan
//! restarts from the attacking board, so deaths caused by deathrattles are
//! picked up in the same pass.

use crate::effect::TriggerEvent;
use crate::error::{CombatError, InvariantViolation};
use crate::rng::RngOracle;
use crate::state::{Keywords, Side};

use super::{CombatEngine, CombatEvent};

impl<R: RngOracle> CombatEngine<'_, R> {
    /// Resolves deaths until no entity meets its death condition.
    pub(super) fn resolve_deaths(&mut self) -> Result<(), CombatError> {
        let mut kills = 0;
        while let Some((side, slot)) = self.first_death() {
            kills += 1;
            if kills > self.config.max_cascade {
                return Err(InvariantViolation::CascadeLimitExceeded {
                    limit: self.config.max_cascade,
                    turn: self.turn,
                }
                .into());
            }
            self.kill(side, slot)?;
        }
        Ok(())
    }

    fn first_death(&self) -> Option<(Side, usize)> {
        let attacking = self.active;
        [attacking, attacking.opponent()]
            .into_iter()
            .find_map(|side| {
                let own = &self.boards[side.index()];
                let opposing = &self.boards[side.opponent().index()];
                own.first_dead(opposing).map(|slot| (side, slot))
            })
    }

    /// Removes the entity at `slot` and resolves everything its death causes.
    fn kill(&mut self, side: Side, slot: usize) -> Result<(), CombatError> {
        let mut scope = self.scope(side);
        let dead = scope.own.remove_at(slot);
        scope.emit(CombatEvent::Died {
            entity: dead.id(),
            name: dead.name().to_owned(),
            slot,
        });

        for effect in dead.deathrattles() {
            scope.run_effect(&dead, slot, effect)?;
        }
        scope.fire_allies(
            TriggerEvent::AllyDeath {
                tribes: dead.tribes(),
            },
            dead.id(),
        )?;
        if dead.has_keyword(Keywords::REBORN) {
            scope.reborn(&dead, slot)?;
        }
        Ok(())
    }
}
