//! Attacker and defender selection policies.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;
use crate::rng::RngOracle;
use crate::state::{Board, Entity, EntityId};

/// Picks which entity attacks and which one defends each turn.
///
/// The two picks are independent: the defender choice never sees the
/// attacker. The engine checks that every returned id is on its board.
pub trait SelectionPolicy: Send + Sync {
    /// Choose the attacker from the active side's board.
    fn select_attacker(&self, board: &mut Board, rng: &mut dyn RngOracle) -> Option<EntityId>;

    /// Choose the defender from the other side's board.
    fn select_defender(&self, board: &Board, rng: &mut dyn RngOracle) -> Option<EntityId>;
}

/// Left-to-right attack rotation; uniformly random defender, taunts first.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardPolicy;

impl SelectionPolicy for StandardPolicy {
    fn select_attacker(&self, board: &mut Board, _rng: &mut dyn RngOracle) -> Option<EntityId> {
        board.next_attacker()
    }

    fn select_defender(&self, board: &Board, rng: &mut dyn RngOracle) -> Option<EntityId> {
        let taunts: ArrayVec<EntityId, { CombatConfig::MAX_BOARD_SIZE }> =
            board.taunts().map(Entity::id).collect();
        if !taunts.is_empty() {
            return rng.pick_index(taunts.len()).map(|index| taunts[index]);
        }
        rng.pick_index(board.len())
            .map(|index| board.entities()[index].id())
    }
}
