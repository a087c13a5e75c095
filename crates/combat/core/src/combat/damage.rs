//! Damage application.

use crate::state::Entity;

/// What a single damage instance did to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOutcome {
    /// A shield absorbed the instance and was consumed.
    ShieldPopped,
    /// Defense was reduced; `poisoned` when the source marked the target.
    Damaged { amount: i32, poisoned: bool },
    /// Zero damage on an unshielded target, or the target no longer exists.
    Ignored,
}

impl DamageOutcome {
    /// True when the target actually lost defense.
    pub fn took_damage(&self) -> bool {
        matches!(self, DamageOutcome::Damaged { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DamageOutcome::ShieldPopped => "shield_popped",
            DamageOutcome::Damaged { .. } => "damaged",
            DamageOutcome::Ignored => "ignored",
        }
    }
}

/// Apply one damage instance to `target`.
///
/// # Rules
///
/// ```text
/// target shielded        -> ShieldPopped (any amount, defense unchanged, no poison)
/// amount <= 0            -> Ignored (no defense loss, no poison)
/// otherwise              -> defense -= amount; poisonous source marks target
/// ```
pub fn deal_damage(target: &mut Entity, amount: i32, poisonous: bool) -> DamageOutcome {
    if target.receive_damage(amount, poisonous) {
        return DamageOutcome::ShieldPopped;
    }
    if amount <= 0 {
        return DamageOutcome::Ignored;
    }
    DamageOutcome::Damaged {
        amount,
        poisoned: poisonous,
    }
}
