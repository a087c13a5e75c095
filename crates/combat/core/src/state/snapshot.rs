use super::entity::EntityId;
use super::keywords::Keywords;
use super::side::Side;

/// Read-only view of one entity with effective stats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub name: String,
    pub attack: i32,
    pub defense: i32,
    pub keywords: Keywords,
    pub poisoned: bool,
}

/// Read-only view of one board, for diagnostics and logging.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    pub side: Side,
    pub tier: u8,
    pub shields_popped: u32,
    pub entities: Vec<EntitySnapshot>,
}

impl BoardSnapshot {
    /// Compact `name a/d` listing used in log lines.
    pub fn summary(&self) -> String {
        self.entities
            .iter()
            .map(|e| format!("{} {}/{}", e.name, e.attack, e.defense))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
