//! One side's ordered collection of live entities.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::combat::{DamageOutcome, deal_damage};
use crate::config::CombatConfig;
use crate::error::ConfigurationError;

use super::aura::effective_stats;
use super::entity::{Entity, EntityId, EntityTemplate};
use super::keywords::Keywords;
use super::side::Side;
use super::snapshot::{BoardSnapshot, EntitySnapshot};

pub type BoardSlots = ArrayVec<Entity, { CombatConfig::MAX_BOARD_SIZE }>;

/// Ordered, exclusively-owned collection of one side's entities.
///
/// Board order is meaningful: it is the death-scan tie-break, the adjacency
/// used by auras and the attack rotation order.
#[derive(Clone, Debug)]
pub struct Board {
    side: Side,
    tier: u8,
    entities: BoardSlots,
    next_serial: u32,
    /// Slot of the entity that attacks next.
    attack_cursor: usize,
    shields_popped: u32,
}

impl Board {
    pub fn new(side: Side, tier: u8) -> Self {
        Self {
            side,
            tier,
            entities: ArrayVec::new(),
            next_serial: 0,
            attack_cursor: 0,
            shields_popped: 0,
        }
    }

    /// Composes a board, validating every template before any turn runs.
    pub fn from_templates<I>(side: Side, tier: u8, templates: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = Arc<EntityTemplate>>,
    {
        if tier > CombatConfig::MAX_TIER {
            return Err(ConfigurationError::InvalidTier {
                tier,
                max: CombatConfig::MAX_TIER,
            });
        }

        let templates: Vec<_> = templates.into_iter().collect();
        if templates.len() > CombatConfig::MAX_BOARD_SIZE {
            return Err(ConfigurationError::BoardOverflow {
                side,
                count: templates.len(),
                capacity: CombatConfig::MAX_BOARD_SIZE,
            });
        }

        let mut board = Self::new(side, tier);
        for template in templates {
            template.validate()?;
            let id = board.allocate_id();
            board.entities.push(Entity::spawn(id, template));
        }
        Ok(board)
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId::new(self.side, self.next_serial);
        self.next_serial += 1;
        id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn tier(&self) -> u8 {
        self.tier
    }

    /// Live entities in board order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> + '_ {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entities.is_full()
    }

    pub fn get(&self, slot: usize) -> Option<&Entity> {
        self.entities.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Entity> {
        self.entities.get_mut(slot)
    }

    pub fn position(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id() == id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id() == id)
    }

    /// Inserts a new entity at `slot` (clamped to the board length).
    ///
    /// Returns `None` when the board is full; a summon into a full board is
    /// dropped.
    pub fn summon(&mut self, slot: usize, template: Arc<EntityTemplate>) -> Option<EntityId> {
        if self.is_full() {
            return None;
        }
        let id = self.allocate_id();
        self.insert(slot, Entity::spawn(id, template));
        Some(id)
    }

    /// Puts the reborn copy of `dead` back at `slot`.
    pub fn reborn(&mut self, dead: &Entity, slot: usize) -> Option<EntityId> {
        if self.is_full() {
            return None;
        }
        let id = self.allocate_id();
        self.insert(slot, dead.reborn_copy(id));
        Some(id)
    }

    fn insert(&mut self, slot: usize, entity: Entity) {
        let slot = slot.min(self.entities.len());
        if slot < self.attack_cursor {
            self.attack_cursor += 1;
        }
        self.entities.insert(slot, entity);
    }

    /// Removes the entity at `slot` permanently.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of bounds.
    pub fn remove_at(&mut self, slot: usize) -> Entity {
        if slot < self.attack_cursor {
            self.attack_cursor -= 1;
        }
        self.entities.remove(slot)
    }

    /// Removes the entity with `id`, returning its former slot.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<(usize, Entity)> {
        let slot = self.position(id)?;
        Some((slot, self.remove_at(slot)))
    }

    /// Applies one damage instance to the entity at `slot`.
    pub fn deal_damage(&mut self, slot: usize, amount: i32, poisonous: bool) -> DamageOutcome {
        let Some(entity) = self.entities.get_mut(slot) else {
            return DamageOutcome::Ignored;
        };
        let outcome = deal_damage(entity, amount, poisonous);
        if outcome == DamageOutcome::ShieldPopped {
            self.on_shield_popped();
        }
        outcome
    }

    /// Records a shield pop on this side.
    pub fn on_shield_popped(&mut self) {
        self.shields_popped += 1;
    }

    pub fn shields_popped(&self) -> u32 {
        self.shields_popped
    }

    /// Whether the entity at `slot` meets its death condition.
    pub fn is_dead(&self, slot: usize, opposing: &Board) -> bool {
        self.entities.get(slot).is_some_and(|entity| {
            entity.is_poisoned() || effective_stats(self, slot, opposing).defense <= 0
        })
    }

    /// First slot, in board order, whose death condition holds.
    pub fn first_dead(&self, opposing: &Board) -> Option<usize> {
        (0..self.entities.len()).find(|&slot| self.is_dead(slot, opposing))
    }

    /// Entity whose turn it is to attack, wrapping around the board.
    pub fn next_attacker(&mut self) -> Option<EntityId> {
        if self.entities.is_empty() {
            return None;
        }
        if self.attack_cursor >= self.entities.len() {
            self.attack_cursor = 0;
        }
        Some(self.entities[self.attack_cursor].id())
    }

    /// Moves the rotation past `attacker` once its attack is resolved.
    ///
    /// If the attacker died, the cursor already points at whatever took its
    /// slot.
    pub fn finish_attack(&mut self, attacker: EntityId) {
        if let Some(slot) = self.position(attacker) {
            self.attack_cursor = slot + 1;
        }
    }

    pub fn taunts(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities
            .iter()
            .filter(|entity| entity.has_keyword(Keywords::TAUNT))
    }

    /// Terminal magnitude of this board: hero tier plus remaining ranks.
    ///
    /// An empty board scores zero.
    pub fn score(&self) -> i32 {
        if self.entities.is_empty() {
            return 0;
        }
        let ranks: i32 = self.entities.iter().map(|e| i32::from(e.rank())).sum();
        i32::from(self.tier) + ranks
    }

    /// Read-only view with effective stats, for diagnostics.
    pub fn snapshot(&self, opposing: &Board) -> BoardSnapshot {
        BoardSnapshot {
            side: self.side,
            tier: self.tier,
            shields_popped: self.shields_popped,
            entities: self
                .entities
                .iter()
                .enumerate()
                .map(|(slot, entity)| {
                    let stats = effective_stats(self, slot, opposing);
                    EntitySnapshot {
                        id: entity.id(),
                        name: entity.name().to_owned(),
                        attack: stats.attack,
                        defense: stats.defense,
                        keywords: entity.keywords(),
                        poisoned: entity.is_poisoned(),
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minion(name: &str, attack: i32, defense: i32) -> Arc<EntityTemplate> {
        Arc::new(EntityTemplate::new(name, 1, attack, defense))
    }

    fn board_of(count: usize) -> Board {
        Board::from_templates(
            Side::Left,
            2,
            (0..count).map(|i| minion(&format!("m{i}"), 1, 1)),
        )
        .unwrap()
    }

    #[test]
    fn rejects_oversize_board() {
        let err = Board::from_templates(Side::Right, 1, (0..8).map(|_| minion("m", 1, 1)))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::BoardOverflow {
                side: Side::Right,
                count: 8,
                capacity: 7
            }
        );
    }

    #[test]
    fn rejects_invalid_tier() {
        let err = Board::from_templates(Side::Left, 7, Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidTier { tier: 7, .. }));
    }

    #[test]
    fn summon_into_full_board_is_dropped() {
        let mut board = board_of(7);
        assert!(board.summon(0, minion("token", 1, 1)).is_none());
        assert_eq!(board.len(), 7);

        let mut board = board_of(2);
        let id = board.summon(1, minion("token", 1, 1)).unwrap();
        assert_eq!(board.position(id), Some(1));
    }

    #[test]
    fn ids_are_unique_per_side() {
        let mut board = board_of(3);
        let (_, removed) = board.remove_entity(board.entities()[0].id()).unwrap();
        let summoned = board.summon(0, minion("token", 1, 1)).unwrap();
        assert_ne!(removed.id(), summoned);
        assert_eq!(summoned.side, Side::Left);
    }

    #[test]
    fn attack_rotation_wraps_and_survives_deaths() {
        let mut board = board_of(3);
        let ids: Vec<_> = board.entities().iter().map(Entity::id).collect();

        assert_eq!(board.next_attacker(), Some(ids[0]));
        board.finish_attack(ids[0]);
        assert_eq!(board.next_attacker(), Some(ids[1]));

        // Attacker dies: the next entity slides into its slot and goes next.
        board.remove_entity(ids[1]);
        board.finish_attack(ids[1]);
        assert_eq!(board.next_attacker(), Some(ids[2]));
        board.finish_attack(ids[2]);
        assert_eq!(board.next_attacker(), Some(ids[0]));
    }

    #[test]
    fn removal_left_of_cursor_keeps_rotation() {
        let mut board = board_of(3);
        let ids: Vec<_> = board.entities().iter().map(Entity::id).collect();
        board.next_attacker();
        board.finish_attack(ids[0]);
        board.next_attacker();
        board.finish_attack(ids[1]);
        board.remove_entity(ids[0]);
        assert_eq!(board.next_attacker(), Some(ids[2]));
    }

    #[test]
    fn shield_pop_is_recorded() {
        let template = Arc::new(
            EntityTemplate::new("Warden", 3, 2, 1).with_keywords(Keywords::SHIELD),
        );
        let mut board = Board::from_templates(Side::Left, 1, [template]).unwrap();
        assert_eq!(board.deal_damage(0, 3, false), DamageOutcome::ShieldPopped);
        assert_eq!(board.shields_popped(), 1);
        assert_eq!(
            board.deal_damage(0, 3, false),
            DamageOutcome::Damaged {
                amount: 3,
                poisoned: false
            }
        );
        assert_eq!(board.shields_popped(), 1);
    }

    #[test]
    fn score_is_tier_plus_ranks_and_zero_when_empty() {
        let board = board_of(3);
        assert_eq!(board.score(), 2 + 3);
        assert_eq!(Board::new(Side::Left, 5).score(), 0);
    }

    #[test]
    fn first_dead_scans_in_board_order() {
        let mut board = board_of(3);
        let other = Board::new(Side::Right, 1);
        board.deal_damage(2, 1, false);
        board.deal_damage(1, 1, false);
        assert_eq!(board.first_dead(&other), Some(1));
    }
}
