//! Board composition loader.
//!
//! A matchup file holds two boards; each minion is named and resolved
//! against the catalog, with optional stat and keyword overrides:
//!
//! ```ron
//! (
//!     left: (tier: 3, minions: [(name: "Infested Wolf"), (name: "Soul Juggler", golden: true)]),
//!     right: (tier: 2, minions: [(name: "The Beast", taunt: true)]),
//! )
//! ```

use std::path::Path;
use std::sync::Arc;

use combat_core::{Board, EntityTemplate, Keywords, Side};
use serde::{Deserialize, Serialize};

use crate::Catalog;
use crate::loaders::{LoadResult, read_file};

/// One minion slot in a board file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinionSpec {
    pub name: String,
    pub golden: bool,
    /// Replaces the catalog attack (after golden doubling).
    pub attack: Option<i32>,
    /// Replaces the catalog defense (after golden doubling).
    pub defense: Option<i32>,
    pub shield: bool,
    pub taunt: bool,
    pub poisonous: bool,
    pub reborn: bool,
}

impl MinionSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn extra_keywords(&self) -> Keywords {
        let mut keywords = Keywords::empty();
        keywords.set(Keywords::SHIELD, self.shield);
        keywords.set(Keywords::TAUNT, self.taunt);
        keywords.set(Keywords::POISONOUS, self.poisonous);
        keywords.set(Keywords::REBORN, self.reborn);
        keywords
    }

    fn has_overrides(&self) -> bool {
        self.attack.is_some() || self.defense.is_some() || !self.extra_keywords().is_empty()
    }

    /// Resolves the slot to a template handle.
    pub fn resolve(&self, catalog: &Catalog) -> LoadResult<Arc<EntityTemplate>> {
        let template = catalog
            .resolve(&self.name, self.golden)
            .ok_or_else(|| anyhow::anyhow!("Unknown minion '{}'", self.name))?;
        if !self.has_overrides() {
            return Ok(template);
        }

        let mut custom = EntityTemplate::clone(&template);
        if let Some(attack) = self.attack {
            custom.attack = attack;
        }
        if let Some(defense) = self.defense {
            custom.defense = defense;
        }
        custom.keywords |= self.extra_keywords();
        Ok(Arc::new(custom))
    }
}

/// One side's board in a board file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSpec {
    #[serde(default)]
    pub tier: u8,
    pub minions: Vec<MinionSpec>,
}

impl BoardSpec {
    /// Builds a validated board for `side`.
    pub fn build(&self, side: Side, catalog: &Catalog) -> LoadResult<Board> {
        let templates = self
            .minions
            .iter()
            .map(|minion| minion.resolve(catalog))
            .collect::<LoadResult<Vec<_>>>()?;
        Board::from_templates(side, self.tier, templates)
            .map_err(|e| anyhow::anyhow!("Invalid {} board: {}", side, e))
    }
}

/// Both boards of a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchupSpec {
    pub left: BoardSpec,
    pub right: BoardSpec,
}

impl MatchupSpec {
    /// Builds the left and right boards.
    pub fn build(&self, catalog: &Catalog) -> LoadResult<(Board, Board)> {
        Ok((
            self.left.build(Side::Left, catalog)?,
            self.right.build(Side::Right, catalog)?,
        ))
    }
}

/// Loader for board compositions from RON files.
pub struct BoardLoader;

impl BoardLoader {
    /// Stat overrides are written bare (`attack: 3`), not as `Some(3)`.
    fn options() -> ron::Options {
        ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
    }

    /// Load a single board description.
    pub fn load(path: &Path) -> LoadResult<BoardSpec> {
        let content = read_file(path)?;
        Self::options()
            .from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse board RON {}: {}", path.display(), e))
    }

    /// Load a two-board matchup description.
    pub fn load_matchup(path: &Path) -> LoadResult<MatchupSpec> {
        let content = read_file(path)?;
        Self::options()
            .from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse matchup RON {}: {}", path.display(), e))
    }
}
