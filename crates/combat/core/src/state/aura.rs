//! Aura contributions and effective stat recomputation.
//!
//! Effective stats are a pure function of (entity, own board, opposing
//! board). They are recomputed at every attack step and every death check
//! and never cached, because aura sources come and go between steps.

use super::board::Board;
use super::keywords::Tribe;

/// Static stat bonus an entity projects onto its allies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Aura {
    /// Bonus attack for the entities directly left and right of the source.
    Adjacent { attack: i32 },
    /// Bonus stats for every other friendly entity of the tribe.
    Tribe {
        tribe: Tribe,
        attack: i32,
        defense: i32,
    },
}

impl Aura {
    #[must_use]
    pub fn scaled(&self, factor: i32) -> Self {
        match *self {
            Aura::Adjacent { attack } => Aura::Adjacent {
                attack: attack * factor,
            },
            Aura::Tribe {
                tribe,
                attack,
                defense,
            } => Aura::Tribe {
                tribe,
                attack: attack * factor,
                defense: defense * factor,
            },
        }
    }
}

/// Attack and defense after aura contributions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveStats {
    pub attack: i32,
    pub defense: i32,
}

/// Effective stats of the entity at `slot` given the current board context.
///
/// The opposing board is part of the context even though no current aura
/// reads it; enemy-dependent auras plug in here.
pub fn effective_stats(board: &Board, slot: usize, _opposing: &Board) -> EffectiveStats {
    let entities = board.entities();
    let Some(entity) = entities.get(slot) else {
        return EffectiveStats::default();
    };

    let mut stats = EffectiveStats {
        attack: entity.attack(),
        defense: entity.defense(),
    };

    for (index, source) in entities.iter().enumerate() {
        if index == slot {
            continue;
        }
        for aura in &source.template().auras {
            match *aura {
                Aura::Adjacent { attack } => {
                    if index + 1 == slot || slot + 1 == index {
                        stats.attack += attack;
                    }
                }
                Aura::Tribe {
                    tribe,
                    attack,
                    defense,
                } => {
                    if entity.tribes().has(tribe) {
                        stats.attack += attack;
                        stats.defense += defense;
                    }
                }
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::state::{EntityTemplate, Side};

    fn board(templates: Vec<EntityTemplate>) -> Board {
        Board::from_templates(Side::Left, 1, templates.into_iter().map(Arc::new)).unwrap()
    }

    #[test]
    fn adjacent_aura_only_touches_neighbours() {
        let alpha = EntityTemplate::new("Alpha", 1, 2, 2).with_aura(Aura::Adjacent { attack: 1 });
        let filler = || EntityTemplate::new("Filler", 1, 1, 1);
        let board = board(vec![filler(), alpha, filler(), filler()]);
        let empty = Board::new(Side::Right, 1);

        assert_eq!(effective_stats(&board, 0, &empty).attack, 2);
        assert_eq!(effective_stats(&board, 1, &empty).attack, 2);
        assert_eq!(effective_stats(&board, 2, &empty).attack, 2);
        assert_eq!(effective_stats(&board, 3, &empty).attack, 1);
    }

    #[test]
    fn tribe_aura_skips_source_and_other_tribes() {
        let leader = EntityTemplate::new("Leader", 3, 3, 3)
            .with_tribe(Tribe::Murloc)
            .with_aura(Aura::Tribe {
                tribe: Tribe::Murloc,
                attack: 2,
                defense: 0,
            });
        let murloc = EntityTemplate::new("Murloc", 1, 1, 1).with_tribe(Tribe::Murloc);
        let beast = EntityTemplate::new("Beast", 1, 1, 1).with_tribe(Tribe::Beast);
        let board = board(vec![leader, murloc, beast]);
        let empty = Board::new(Side::Right, 1);

        assert_eq!(effective_stats(&board, 0, &empty).attack, 3);
        assert_eq!(effective_stats(&board, 1, &empty).attack, 3);
        assert_eq!(effective_stats(&board, 2, &empty).attack, 1);
    }

    #[test]
    fn out_of_range_slot_is_zero() {
        let board = Board::new(Side::Left, 1);
        assert_eq!(
            effective_stats(&board, 4, &board.clone()),
            EffectiveStats::default()
        );
    }
}
