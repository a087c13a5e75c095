//! Interpreter for built-in effect payloads.

use std::sync::Arc;

use crate::error::CombatError;

use super::{EffectContext, EffectSpec};

/// Applies `effect` within `ctx`.
///
/// `Custom` ids are resolved through the registry; an unknown id and any
/// `Pending` effect fail with [`CombatError::UnsupportedEffect`].
pub(crate) fn apply(effect: &EffectSpec, ctx: &mut EffectContext<'_>) -> Result<(), CombatError> {
    match effect {
        EffectSpec::Summon {
            token,
            count,
            target,
        } => {
            ctx.summon(token, *target, *count)?;
        }
        EffectSpec::DamageRandomEnemy { amount, count } => {
            for _ in 0..*count {
                ctx.scope.damage_random_enemy(*amount)?;
            }
        }
        EffectSpec::DamageAll { amount } => {
            ctx.scope.damage_every(*amount)?;
            ctx.scope.flipped().damage_every(*amount)?;
        }
        EffectSpec::BuffSelf { attack, defense } => {
            if let Some(entity) = ctx.scope.own.entity_mut(ctx.source.id()) {
                entity.buff(*attack, *defense);
            }
        }
        EffectSpec::BuffSubject { attack, defense } => {
            if let Some(subject) = ctx.subject {
                if let Some(entity) = ctx.scope.own.entity_mut(subject) {
                    entity.buff(*attack, *defense);
                }
            }
        }
        EffectSpec::BuffAllies {
            tribe,
            attack,
            defense,
        } => {
            let source = ctx.source.id();
            ctx.scope
                .own
                .entities_mut()
                .filter(|entity| entity.id() != source)
                .filter(|entity| tribe.is_none_or(|tribe| entity.tribes().has(tribe)))
                .for_each(|entity| entity.buff(*attack, *defense));
        }
        EffectSpec::GrantSelf { keywords } => {
            if let Some(entity) = ctx.scope.own.entity_mut(ctx.source.id()) {
                entity.grant(*keywords);
            }
        }
        EffectSpec::Custom(id) => {
            let handler = ctx
                .scope
                .registry()
                .get(id)
                .map(Arc::clone)
                .ok_or_else(|| CombatError::unsupported(id, ctx.source.name()))?;
            handler.apply(ctx)?;
        }
        EffectSpec::Pending(id) => {
            return Err(CombatError::unsupported(id, ctx.source.name()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::CombatConfig;
    use crate::effect::{EffectId, EffectRegistry, Scope, SummonTarget};
    use crate::engine::EventLog;
    use crate::rng::PcgRng;
    use crate::state::{Board, EntityTemplate, Keywords, Side, Tribe};

    struct Fixture {
        own: Board,
        opposing: Board,
        rng: PcgRng,
        registry: EffectRegistry,
        log: EventLog,
        config: CombatConfig,
    }

    impl Fixture {
        fn new(own: Vec<EntityTemplate>, opposing: Vec<EntityTemplate>) -> Self {
            Self {
                own: Board::from_templates(Side::Left, 1, own.into_iter().map(Arc::new)).unwrap(),
                opposing: Board::from_templates(Side::Right, 1, opposing.into_iter().map(Arc::new))
                    .unwrap(),
                rng: PcgRng::new(5),
                registry: EffectRegistry::new(),
                log: EventLog::default(),
                config: CombatConfig::default(),
            }
        }

        fn run(&mut self, slot: usize, effect: &EffectSpec) -> Result<(), CombatError> {
            let source = self.own.entities()[slot].clone();
            let mut scope = Scope::new(
                &mut self.own,
                &mut self.opposing,
                &mut self.rng,
                &self.registry,
                &mut self.log,
                &self.config,
                Side::Left,
            );
            let mut ctx = EffectContext {
                source: &source,
                slot,
                summon_slot: slot + 1,
                subject: None,
                scope: scope.reborrow(),
            };
            apply(effect, &mut ctx)
        }
    }

    #[test]
    fn summon_lands_right_of_source() {
        let mut fx = Fixture::new(
            vec![EntityTemplate::new("a", 1, 1, 1), EntityTemplate::new("b", 1, 1, 1)],
            vec![],
        );
        let token = Arc::new(EntityTemplate::new("token", 1, 1, 1));
        fx.run(
            0,
            &EffectSpec::Summon {
                token,
                count: 2,
                target: SummonTarget::Own,
            },
        )
        .unwrap();
        let names: Vec<_> = fx.own.entities().iter().map(|e| e.name().to_owned()).collect();
        assert_eq!(names, ["a", "token", "token", "b"]);
    }

    #[test]
    fn buff_allies_filters_by_tribe_and_skips_source() {
        let mut fx = Fixture::new(
            vec![
                EntityTemplate::new("leader", 3, 3, 3).with_tribe(Tribe::Beast),
                EntityTemplate::new("wolf", 1, 1, 1).with_tribe(Tribe::Beast),
                EntityTemplate::new("bot", 1, 1, 1).with_tribe(Tribe::Mech),
            ],
            vec![],
        );
        fx.run(
            0,
            &EffectSpec::BuffAllies {
                tribe: Some(Tribe::Beast),
                attack: 2,
                defense: 0,
            },
        )
        .unwrap();
        let attacks: Vec<_> = fx.own.entities().iter().map(|e| e.attack()).collect();
        assert_eq!(attacks, [3, 3, 1]);
    }

    #[test]
    fn damage_random_enemy_skips_dying_targets() {
        let mut fx = Fixture::new(
            vec![EntityTemplate::new("juggler", 3, 3, 3)],
            vec![EntityTemplate::new("dying", 1, 1, 1), EntityTemplate::new("alive", 1, 1, 9)],
        );
        fx.opposing.deal_damage(0, 1, false);
        for _ in 0..5 {
            fx.run(
                0,
                &EffectSpec::DamageRandomEnemy {
                    amount: 1,
                    count: 1,
                },
            )
            .unwrap();
        }
        assert_eq!(fx.opposing.entities()[0].defense(), 0);
        assert_eq!(fx.opposing.entities()[1].defense(), 4);
    }

    #[test]
    fn pending_and_unknown_custom_effects_fail() {
        let mut fx = Fixture::new(vec![EntityTemplate::new("Khadgar", 3, 2, 2)], vec![]);
        let err = fx
            .run(0, &EffectSpec::Pending(EffectId::new("khadgar")))
            .unwrap_err();
        assert!(matches!(err, CombatError::UnsupportedEffect { .. }));

        let err = fx
            .run(0, &EffectSpec::Custom(EffectId::new("missing")))
            .unwrap_err();
        assert!(matches!(err, CombatError::UnsupportedEffect { .. }));
    }

    #[test]
    fn grant_self_adds_keywords() {
        let mut fx = Fixture::new(vec![EntityTemplate::new("a", 1, 1, 1)], vec![]);
        fx.run(
            0,
            &EffectSpec::GrantSelf {
                keywords: Keywords::SHIELD | Keywords::TAUNT,
            },
        )
        .unwrap();
        assert!(fx.own.entities()[0].has_keyword(Keywords::SHIELD));
        assert!(fx.own.entities()[0].has_keyword(Keywords::TAUNT));
    }
}
