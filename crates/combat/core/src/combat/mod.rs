//! Combat resolution primitives.
//!
//! - `deal_damage`: one damage instance with shield and poison rules
//! - `SelectionPolicy`: who attacks and who defends each turn

pub mod damage;
pub mod selection;

pub use damage::{DamageOutcome, deal_damage};
pub use selection::{SelectionPolicy, StandardPolicy};
