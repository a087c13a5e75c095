//! Board and entity state.
//!
//! The engine never holds entities outside the two [`Board`]s; everything a
//! match needs to know lives here.
mod aura;
mod board;
mod entity;
mod keywords;
mod side;
mod snapshot;

pub use aura::{Aura, EffectiveStats, effective_stats};
pub use board::{Board, BoardSlots};
pub use entity::{Entity, EntityId, EntityTemplate};
pub use keywords::{Keywords, Tribe, TribeSet};
pub use side::Side;
pub use snapshot::{BoardSnapshot, EntitySnapshot};
