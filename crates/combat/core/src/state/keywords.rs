use bitflags::bitflags;

bitflags! {
    /// Boolean combat keywords carried by an entity.
    ///
    /// `SHIELD` and `REBORN` are consumed during combat; `POISONOUS` and
    /// `TAUNT` are static.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Keywords: u8 {
        /// Absorbs exactly one damage instance, whatever its amount.
        const SHIELD    = 1 << 0;
        /// Nonzero damage dealt by this entity destroys the receiver.
        const POISONOUS = 1 << 1;
        /// Must be picked as defender while any taunt is on the board.
        const TAUNT     = 1 << 2;
        /// Returns once with 1 defense after dying.
        const REBORN    = 1 << 3;
    }
}

bitflags! {
    /// Set of tribes an entity belongs to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TribeSet: u8 {
        const BEAST  = 1 << 0;
        const DEMON  = 1 << 1;
        const DRAGON = 1 << 2;
        const MECH   = 1 << 3;
        const MURLOC = 1 << 4;
        const PIRATE = 1 << 5;
    }
}

/// Minion tribe tag.
///
/// `All` (amalgam-style minions) counts as every tribe.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Tribe {
    Beast,
    Demon,
    Dragon,
    Mech,
    Murloc,
    Pirate,
    All,
}

impl Tribe {
    pub const fn flags(self) -> TribeSet {
        match self {
            Tribe::Beast => TribeSet::BEAST,
            Tribe::Demon => TribeSet::DEMON,
            Tribe::Dragon => TribeSet::DRAGON,
            Tribe::Mech => TribeSet::MECH,
            Tribe::Murloc => TribeSet::MURLOC,
            Tribe::Pirate => TribeSet::PIRATE,
            Tribe::All => TribeSet::all(),
        }
    }
}

impl TribeSet {
    /// True when `tribe` (or, for `Tribe::All`, any tribe) is in the set.
    pub fn has(self, tribe: Tribe) -> bool {
        self.intersects(tribe.flags())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn amalgam_matches_every_tribe() {
        let amalgam = Tribe::All.flags();
        for tribe in Tribe::iter() {
            assert!(amalgam.has(tribe), "{tribe} missing");
        }
    }

    #[test]
    fn tribe_names_parse() {
        assert_eq!("Beast".parse::<Tribe>().unwrap(), Tribe::Beast);
        assert_eq!("mech".parse::<Tribe>().unwrap(), Tribe::Mech);
        assert!("elemental".parse::<Tribe>().is_err());
    }

    #[test]
    fn plain_set_only_matches_members() {
        let set = TribeSet::BEAST | TribeSet::MECH;
        assert!(set.has(Tribe::Beast));
        assert!(!set.has(Tribe::Demon));
        assert!(!TribeSet::empty().has(Tribe::All));
    }
}
