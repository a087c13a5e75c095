//! Built-in minion catalog.
//!
//! Templates are created once and shared behind `Arc`; boards clone the
//! handles, never the definitions. Names resolve case-insensitively.

use std::collections::BTreeMap;
use std::sync::Arc;

use combat_core::{
    Aura, EffectId, EffectRegistry, EffectSpec, EntityTemplate, Keywords, SummonTarget, Tribe,
    Trigger,
};

use crate::effects::RandomSummon;

/// Effect id of Piloted Shredder's random two-cost summon.
pub const PILOTED_SHREDDER: &str = "piloted_shredder";
/// Effect id of Khadgar's summon doubling, not implemented yet.
pub const KHADGAR: &str = "khadgar";

/// Rank of the minions Piloted Shredder can summon.
const SHREDDER_POOL_RANK: u8 = 2;

/// Lookup table of minion templates.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    minions: BTreeMap<String, Arc<EntityTemplate>>,
    tokens: BTreeMap<String, Arc<EntityTemplate>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tier-3 pool, the two-cost minions Piloted Shredder draws from, and
    /// the tokens summoned by deathrattles and triggers.
    pub fn standard() -> Self {
        let spider = Arc::new(token("Spider", 1, 1).with_tribe(Tribe::Beast));
        let microbot = Arc::new(token("Microbot", 1, 1).with_tribe(Tribe::Mech));
        let imp = Arc::new(token("Imp", 1, 1).with_tribe(Tribe::Demon));
        let finkle = Arc::new(token("Finkle Einhorn", 3, 3));

        let mut catalog = Self::new();
        for token in [&spider, &microbot, &imp, &finkle] {
            catalog.add_token(Arc::clone(token));
        }

        // Two-cost pool.
        catalog.add(
            EntityTemplate::new("Dire Wolf Alpha", 2, 2, 2)
                .with_tribe(Tribe::Beast)
                .with_aura(Aura::Adjacent { attack: 1 }),
        );
        catalog.add(
            EntityTemplate::new("Murloc Warleader", 2, 3, 3)
                .with_tribe(Tribe::Murloc)
                .with_aura(Aura::Tribe {
                    tribe: Tribe::Murloc,
                    attack: 2,
                    defense: 0,
                }),
        );
        catalog.add(
            EntityTemplate::new("Kaboom Bot", 2, 2, 2)
                .with_tribe(Tribe::Mech)
                .with_deathrattle(EffectSpec::DamageRandomEnemy {
                    amount: 4,
                    count: 1,
                }),
        );
        catalog.add(
            EntityTemplate::new("Unstable Ghoul", 2, 1, 3)
                .with_keywords(Keywords::TAUNT)
                .with_deathrattle(EffectSpec::DamageAll { amount: 1 }),
        );

        // Tier 3.
        catalog.add(
            EntityTemplate::new("Bronze Warden", 3, 2, 1)
                .with_tribe(Tribe::Dragon)
                .with_keywords(Keywords::SHIELD | Keywords::REBORN),
        );
        catalog.add(EntityTemplate::new("Coldlight Seer", 3, 2, 3).with_tribe(Tribe::Murloc));
        catalog.add(EntityTemplate::new("Crowd Favorite", 3, 4, 4));
        catalog.add(EntityTemplate::new("Crystalweaver", 3, 5, 4));
        catalog.add(
            EntityTemplate::new("Deflect-o-Bot", 3, 3, 2)
                .with_tribe(Tribe::Mech)
                .with_keywords(Keywords::SHIELD)
                .with_trigger(
                    Trigger::OnAllySummoned {
                        tribe: Some(Tribe::Mech),
                    },
                    EffectSpec::BuffSelf {
                        attack: 1,
                        defense: 0,
                    },
                )
                .with_trigger(
                    Trigger::OnAllySummoned {
                        tribe: Some(Tribe::Mech),
                    },
                    EffectSpec::GrantSelf {
                        keywords: Keywords::SHIELD,
                    },
                ),
        );
        catalog.add(EntityTemplate::new("Felvin Navigator", 3, 4, 4).with_tribe(Tribe::Murloc));
        catalog.add(EntityTemplate::new("Hangry Dragon", 3, 4, 4).with_tribe(Tribe::Dragon));
        catalog.add(EntityTemplate::new("Houndmaster", 3, 4, 3));
        catalog.add(
            EntityTemplate::new("Imp Gang Boss", 3, 2, 4)
                .with_tribe(Tribe::Demon)
                .with_trigger(
                    Trigger::OnDamageReceived,
                    EffectSpec::Summon {
                        token: imp,
                        count: 1,
                        target: SummonTarget::Own,
                    },
                ),
        );
        catalog.add(
            EntityTemplate::new("Infested Wolf", 3, 3, 3)
                .with_tribe(Tribe::Beast)
                .with_deathrattle(EffectSpec::Summon {
                    token: spider,
                    count: 2,
                    target: SummonTarget::Own,
                }),
        );
        catalog.add(EntityTemplate::new("Khadgar", 3, 2, 2).with_trigger(
            Trigger::OnAllySummoned { tribe: None },
            EffectSpec::Pending(EffectId::new(KHADGAR)),
        ));
        catalog.add(EntityTemplate::new("Pack Leader", 3, 3, 3).with_trigger(
            Trigger::OnAllySummoned {
                tribe: Some(Tribe::Beast),
            },
            EffectSpec::BuffSubject {
                attack: 3,
                defense: 0,
            },
        ));
        catalog.add(
            EntityTemplate::new("Piloted Shredder", 3, 4, 3)
                .with_tribe(Tribe::Mech)
                .with_deathrattle(EffectSpec::Custom(EffectId::new(PILOTED_SHREDDER))),
        );
        catalog.add(
            EntityTemplate::new("Replicating Menace", 3, 3, 1)
                .with_tribe(Tribe::Mech)
                .with_deathrattle(EffectSpec::Summon {
                    token: microbot,
                    count: 3,
                    target: SummonTarget::Own,
                }),
        );
        catalog.add(EntityTemplate::new("Screwjank Clunker", 3, 2, 5).with_tribe(Tribe::Mech));
        catalog.add(EntityTemplate::new("Shifter Zerus", 3, 1, 1));
        catalog.add(EntityTemplate::new("Soul Juggler", 3, 3, 3).with_trigger(
            Trigger::OnAllyDeath {
                tribe: Some(Tribe::Demon),
            },
            EffectSpec::DamageRandomEnemy {
                amount: 3,
                count: 1,
            },
        ));
        catalog.add(
            EntityTemplate::new("The Beast", 3, 9, 7)
                .with_tribe(Tribe::Beast)
                .with_deathrattle(EffectSpec::Summon {
                    token: finkle,
                    count: 1,
                    target: SummonTarget::Opposing,
                }),
        );
        catalog.add(
            EntityTemplate::new("Twilight Emissary", 3, 4, 4)
                .with_tribe(Tribe::Dragon)
                .with_keywords(Keywords::TAUNT),
        );

        catalog
    }

    fn key(name: &str) -> String {
        name.to_ascii_lowercase()
    }

    /// Adds (or replaces) a collectible minion.
    pub fn add(&mut self, template: EntityTemplate) -> Arc<EntityTemplate> {
        let template = Arc::new(template);
        self.minions
            .insert(Self::key(&template.name), Arc::clone(&template));
        template
    }

    /// Adds (or replaces) a token; tokens never show up in rank pools.
    pub fn add_token(&mut self, template: Arc<EntityTemplate>) {
        self.tokens.insert(Self::key(&template.name), template);
    }

    /// Looks up a minion or token by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&Arc<EntityTemplate>> {
        let key = Self::key(name);
        self.minions.get(&key).or_else(|| self.tokens.get(&key))
    }

    /// Resolves `name`, upgraded to its golden version when asked.
    pub fn resolve(&self, name: &str, golden: bool) -> Option<Arc<EntityTemplate>> {
        let template = self.get(name)?;
        if golden {
            Some(Arc::new(template.golden()))
        } else {
            Some(Arc::clone(template))
        }
    }

    /// Collectible minions of exactly `rank`, in name order.
    pub fn pool(&self, rank: u8) -> Vec<Arc<EntityTemplate>> {
        self.minions
            .values()
            .filter(|template| template.rank == rank)
            .cloned()
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.minions.values().map(|template| template.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.minions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minions.is_empty()
    }

    /// Registry with the custom effects the catalog's templates reference.
    pub fn registry(&self) -> EffectRegistry {
        EffectRegistry::new().with(
            PILOTED_SHREDDER,
            Arc::new(RandomSummon::new("piloted_shredder", self.pool(SHREDDER_POOL_RANK))),
        )
    }
}

fn token(name: &str, attack: i32, defense: i32) -> EntityTemplate {
    EntityTemplate::new(name, 1, attack, defense)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_finds_tokens() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.get("soul juggler").unwrap().name, "Soul Juggler");
        assert_eq!(catalog.get("DEFLECT-O-BOT").unwrap().rank, 3);
        assert_eq!(catalog.get("spider").unwrap().attack, 1);
        assert!(catalog.get("Leeroy").is_none());
    }

    #[test]
    fn tier_three_pool_is_complete() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.pool(3).len(), 19);
        assert_eq!(catalog.pool(SHREDDER_POOL_RANK).len(), 4);
        assert!(catalog.pool(1).is_empty());
    }

    #[test]
    fn golden_resolution_doubles_stats() {
        let catalog = Catalog::standard();
        let beast = catalog.resolve("The Beast", true).unwrap();
        assert!(beast.golden);
        assert_eq!((beast.attack, beast.defense), (18, 14));
        let plain = catalog.resolve("The Beast", false).unwrap();
        assert_eq!((plain.attack, plain.defense), (9, 7));
    }

    #[test]
    fn every_custom_effect_is_registered() {
        let catalog = Catalog::standard();
        let registry = catalog.registry();
        let custom = catalog
            .pool(3)
            .into_iter()
            .flat_map(|template| template.deathrattles.clone())
            .filter_map(|effect| match effect {
                EffectSpec::Custom(id) => Some(id),
                _ => None,
            });
        for id in custom {
            assert!(registry.contains(&id), "{id} not registered");
        }
    }
}
