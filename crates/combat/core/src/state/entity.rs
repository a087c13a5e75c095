//! Combat entities: immutable templates and their live instances.

use std::fmt;
use std::sync::Arc;

use crate::config::CombatConfig;
use crate::effect::{EffectSpec, Trigger, TriggeredEffect};
use crate::error::ConfigurationError;

use super::aura::Aura;
use super::keywords::{Keywords, Tribe, TribeSet};
use super::side::Side;

/// Unique identifier of an entity within one match.
///
/// Each side allocates serials from its own counter, so ids never collide
/// across the two boards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId {
    pub side: Side,
    pub serial: u32,
}

impl EntityId {
    pub const fn new(side: Side, serial: u32) -> Self {
        Self { side, serial }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.side {
            Side::Left => 'L',
            Side::Right => 'R',
        };
        write!(f, "{}{}", prefix, self.serial)
    }
}

/// Data-driven definition of a minion.
///
/// Templates are shared behind `Arc` between every board built from them;
/// combat never mutates a template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityTemplate {
    pub name: String,
    /// Tavern tier of the minion; summed into the board score.
    pub rank: u8,
    pub attack: i32,
    pub defense: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tribes: TribeSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub keywords: Keywords,
    /// Effects invoked in order when the entity dies.
    #[cfg_attr(feature = "serde", serde(default))]
    pub deathrattles: Vec<EffectSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub triggers: Vec<TriggeredEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub auras: Vec<Aura>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub golden: bool,
}

impl EntityTemplate {
    pub fn new(name: impl Into<String>, rank: u8, attack: i32, defense: i32) -> Self {
        Self {
            name: name.into(),
            rank,
            attack,
            defense,
            tribes: TribeSet::empty(),
            keywords: Keywords::empty(),
            deathrattles: Vec::new(),
            triggers: Vec::new(),
            auras: Vec::new(),
            golden: false,
        }
    }

    #[must_use]
    pub fn with_tribe(mut self, tribe: Tribe) -> Self {
        self.tribes |= tribe.flags();
        self
    }

    #[must_use]
    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords |= keywords;
        self
    }

    #[must_use]
    pub fn with_deathrattle(mut self, effect: EffectSpec) -> Self {
        self.deathrattles.push(effect);
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: Trigger, effect: EffectSpec) -> Self {
        self.triggers.push(TriggeredEffect { trigger, effect });
        self
    }

    #[must_use]
    pub fn with_aura(mut self, aura: Aura) -> Self {
        self.auras.push(aura);
        self
    }

    pub fn has_tribe(&self, tribe: Tribe) -> bool {
        self.tribes.has(tribe)
    }

    /// Golden copy: doubled stats and doubled effect magnitudes.
    pub fn golden(&self) -> Self {
        if self.golden {
            return self.clone();
        }
        Self {
            name: self.name.clone(),
            rank: self.rank,
            attack: self.attack * 2,
            defense: self.defense * 2,
            tribes: self.tribes,
            keywords: self.keywords,
            deathrattles: self.deathrattles.iter().map(EffectSpec::golden).collect(),
            triggers: self
                .triggers
                .iter()
                .map(|t| TriggeredEffect {
                    trigger: t.trigger,
                    effect: t.effect.golden(),
                })
                .collect(),
            auras: self.auras.iter().map(|aura| aura.scaled(2)).collect(),
            golden: true,
        }
    }

    /// Rejects definitions that cannot be placed on a board.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.attack < 0 {
            return Err(ConfigurationError::NegativeStat {
                name: self.name.clone(),
                stat: "attack",
                value: self.attack,
            });
        }
        if self.defense < 0 {
            return Err(ConfigurationError::NegativeStat {
                name: self.name.clone(),
                stat: "defense",
                value: self.defense,
            });
        }
        if self.rank > CombatConfig::MAX_TIER {
            return Err(ConfigurationError::InvalidTier {
                tier: self.rank,
                max: CombatConfig::MAX_TIER,
            });
        }
        Ok(())
    }
}

/// A live combatant on a board.
///
/// `attack`/`defense` hold the current values after damage and permanent
/// buffs. Aura contributions are not stored here; see
/// [`effective_stats`](super::effective_stats).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    template: Arc<EntityTemplate>,
    attack: i32,
    defense: i32,
    keywords: Keywords,
    poisoned: bool,
}

impl Entity {
    pub(crate) fn spawn(id: EntityId, template: Arc<EntityTemplate>) -> Self {
        Self {
            id,
            attack: template.attack,
            defense: template.defense,
            keywords: template.keywords,
            poisoned: false,
            template,
        }
    }

    /// Weaker copy returned by the reborn keyword.
    pub(crate) fn reborn_copy(&self, id: EntityId) -> Self {
        let mut copy = Self::spawn(id, Arc::clone(&self.template));
        copy.defense = 1;
        copy.keywords.remove(Keywords::REBORN);
        copy
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn template(&self) -> &Arc<EntityTemplate> {
        &self.template
    }

    pub fn rank(&self) -> u8 {
        self.template.rank
    }

    pub fn tribes(&self) -> TribeSet {
        self.template.tribes
    }

    pub fn attack(&self) -> i32 {
        self.attack
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn keywords(&self) -> Keywords {
        self.keywords
    }

    pub fn has_keyword(&self, keyword: Keywords) -> bool {
        self.keywords.contains(keyword)
    }

    /// Marked for death by poisonous damage.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    pub fn deathrattles(&self) -> &[EffectSpec] {
        &self.template.deathrattles
    }

    /// Applies one damage instance and reports whether a shield absorbed it.
    ///
    /// A shield absorbs the whole instance, even a zero-damage one: no
    /// defense loss and no poison mark. Unshielded, zero damage changes
    /// nothing and never poisons.
    pub fn receive_damage(&mut self, amount: i32, poisonous: bool) -> bool {
        if self.keywords.contains(Keywords::SHIELD) {
            self.keywords.remove(Keywords::SHIELD);
            return true;
        }
        if amount <= 0 {
            return false;
        }
        self.defense -= amount;
        if poisonous {
            self.poisoned = true;
        }
        false
    }

    /// Permanent stat change (buffs from effects and triggers).
    pub fn buff(&mut self, attack: i32, defense: i32) {
        self.attack += attack;
        self.defense += defense;
    }

    pub fn grant(&mut self, keywords: Keywords) {
        self.keywords |= keywords;
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}/{}",
            self.id, self.template.name, self.attack, self.defense
        )
    }
}
