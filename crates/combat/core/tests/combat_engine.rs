use std::sync::Arc;

use combat_core::{
    Aura, Board, CombatConfig, CombatEngine, CombatError, CombatEvent, ConfigurationError,
    Effect, EffectContext, EffectId, EffectRegistry, EffectSpec, Entity, EntityId,
    EntityTemplate, ErrorSeverity, EventLog, InvariantViolation, Keywords, PcgRng, RngOracle,
    SelectionPolicy, Side, SimulationError, SummonTarget, Trigger,
};

fn minion(name: &str, attack: i32, defense: i32) -> EntityTemplate {
    EntityTemplate::new(name, 1, attack, defense)
}

fn board(side: Side, tier: u8, templates: Vec<EntityTemplate>) -> Board {
    Board::from_templates(side, tier, templates.into_iter().map(Arc::new)).unwrap()
}

fn engine<'a>(left: Board, right: Board, registry: EffectRegistry) -> CombatEngine<'a, PcgRng> {
    CombatEngine::new(left, right, Arc::new(registry), PcgRng::new(7))
        .unwrap()
        .with_starting_side(Side::Left)
}

fn died(log: &EventLog) -> Vec<EntityId> {
    log.events()
        .iter()
        .filter_map(|event| match event {
            CombatEvent::Died { entity, .. } => Some(*entity),
            _ => None,
        })
        .collect()
}

#[test]
fn even_trade_leaves_both_boards_empty() {
    let mut engine = engine(
        board(Side::Left, 1, vec![minion("a", 3, 2)]),
        board(Side::Right, 1, vec![minion("d", 2, 2)]),
        EffectRegistry::new(),
    );
    assert_eq!(engine.run(), Ok(0));
    assert_eq!(engine.turn(), 1);
    assert!(engine.board(Side::Left).is_empty());
    assert!(engine.board(Side::Right).is_empty());
}

#[test]
fn both_sides_take_the_others_pre_exchange_attack() {
    let mut engine = engine(
        board(Side::Left, 1, vec![minion("a", 2, 5)]),
        board(Side::Right, 1, vec![minion("d", 3, 5)]),
        EffectRegistry::new(),
    );
    engine.start().unwrap();
    engine.step().unwrap();
    assert_eq!(engine.board(Side::Left).entities()[0].defense(), 2);
    assert_eq!(engine.board(Side::Right).entities()[0].defense(), 3);
    assert_eq!(engine.active_side(), Side::Right);
}

#[test]
fn lethal_first_hit_does_not_cancel_the_counter() {
    let mut engine = engine(
        board(Side::Left, 1, vec![minion("a", 9, 3)]),
        board(Side::Right, 1, vec![minion("d", 3, 1)]),
        EffectRegistry::new(),
    );
    assert_eq!(engine.run(), Ok(0));
}

#[test]
fn poisonous_attacker_kills_through_remaining_defense() {
    let viper = EntityTemplate::new("viper", 2, 4, 4).with_keywords(Keywords::POISONOUS);
    let mut engine = engine(
        board(Side::Left, 3, vec![viper]),
        board(Side::Right, 1, vec![minion("wall", 3, 6)]),
        EffectRegistry::new(),
    );
    assert_eq!(engine.run(), Ok(3 + 2));
    assert_eq!(engine.board(Side::Left).entities()[0].defense(), 1);
}

#[test]
fn poisonous_trade_with_larger_defender() {
    let mut log = EventLog::new();
    let viper = EntityTemplate::new("viper", 2, 4, 4).with_keywords(Keywords::POISONOUS);
    let score = {
        let mut engine = engine(
            board(Side::Left, 3, vec![viper]),
            board(Side::Right, 1, vec![minion("giant", 6, 6)]),
            EffectRegistry::new(),
        )
        .with_observer(&mut log);
        engine.run()
    };

    // The 6/6 still has 2 defense but dies to poison; 6 damage kills the viper.
    assert!(log.events().contains(&CombatEvent::Damaged {
        entity: EntityId::new(Side::Right, 0),
        amount: 4,
        poisoned: true,
    }));
    assert_eq!(score, Ok(0));
}

#[test]
fn shield_absorbs_whole_instance() {
    let warden = minion("warden", 2, 4).with_keywords(Keywords::SHIELD | Keywords::TAUNT);
    let mut engine = engine(
        board(Side::Left, 1, vec![minion("a", 3, 3)]),
        board(Side::Right, 1, vec![warden]),
        EffectRegistry::new(),
    );
    engine.start().unwrap();
    engine.step().unwrap();

    let right = engine.board(Side::Right);
    assert_eq!(right.entities()[0].defense(), 4);
    assert!(!right.entities()[0].has_keyword(Keywords::SHIELD));
    assert_eq!(right.shields_popped(), 1);
    assert_eq!(engine.board(Side::Left).entities()[0].defense(), 1);
}

#[test]
fn zero_attack_still_pops_the_shield() {
    let warden = minion("warden", 2, 2).with_keywords(Keywords::SHIELD);
    let mut log = EventLog::new();
    {
        let mut engine = engine(
            board(Side::Left, 1, vec![minion("pacifist", 0, 3)]),
            board(Side::Right, 1, vec![warden]),
            EffectRegistry::new(),
        )
        .with_observer(&mut log);
        engine.start().unwrap();
        engine.step().unwrap();

        let right = engine.board(Side::Right);
        assert!(!right.entities()[0].has_keyword(Keywords::SHIELD));
        assert_eq!(right.entities()[0].defense(), 2);
        assert_eq!(right.shields_popped(), 1);
        assert_eq!(engine.board(Side::Left).entities()[0].defense(), 1);
    }
    assert!(
        log.events()
            .iter()
            .any(|event| matches!(event, CombatEvent::ShieldPopped { .. }))
    );
}

#[test]
fn cascade_restarts_from_the_attacking_board() {
    let bomb = minion("bomb", 1, 3).with_deathrattle(EffectSpec::DamageAll { amount: 1 });
    let mut log = EventLog::new();
    let score = {
        let mut engine = engine(
            board(Side::Left, 1, vec![minion("a", 3, 1), minion("b", 1, 1)]),
            board(Side::Right, 1, vec![bomb]),
            EffectRegistry::new(),
        )
        .with_observer(&mut log);
        engine.run()
    };

    // a dies first (attacking board), then the bomb, whose deathrattle
    // exposes b on the attacking board again.
    assert_eq!(
        died(&log),
        [
            EntityId::new(Side::Left, 0),
            EntityId::new(Side::Right, 0),
            EntityId::new(Side::Left, 1),
        ]
    );
    assert_eq!(score, Ok(0));
}

#[test]
fn deathrattle_summons_land_on_the_dying_side() {
    let spider = Arc::new(minion("spider", 1, 1));
    let wolf = minion("wolf", 1, 1).with_deathrattle(EffectSpec::Summon {
        token: spider,
        count: 2,
        target: SummonTarget::Own,
    });
    let mut engine = engine(
        board(Side::Left, 1, vec![minion("giant", 5, 20)]),
        board(Side::Right, 1, vec![minion("x", 1, 9), wolf.with_keywords(Keywords::TAUNT)]),
        EffectRegistry::new(),
    );
    engine.start().unwrap();
    engine.step().unwrap();

    let names: Vec<_> = engine
        .board(Side::Right)
        .entities()
        .iter()
        .map(|e| e.name().to_owned())
        .collect();
    assert_eq!(names, ["x", "spider", "spider"]);
    assert_eq!(engine.board(Side::Left).len(), 1);
}

#[test]
fn summons_beyond_capacity_are_dropped() {
    let spider = Arc::new(minion("spider", 1, 1));
    let wolf = minion("wolf", 1, 1)
        .with_keywords(Keywords::TAUNT)
        .with_deathrattle(EffectSpec::Summon {
            token: spider,
            count: 2,
            target: SummonTarget::Own,
        });
    let mut right = vec![wolf];
    right.extend((0..6).map(|i| minion(&format!("filler{i}"), 0, 10)));

    let mut engine = engine(
        board(Side::Left, 1, vec![minion("giant", 5, 20)]),
        board(Side::Right, 1, right),
        EffectRegistry::new(),
    );
    engine.start().unwrap();
    engine.step().unwrap();

    let right = engine.board(Side::Right);
    assert_eq!(right.len(), CombatConfig::MAX_BOARD_SIZE);
    assert_eq!(right.entities().iter().filter(|e| e.name() == "spider").count(), 1);
}

#[test]
fn turns_alternate_between_sides() {
    let mut log = EventLog::new();
    let result = {
        let mut engine = CombatEngine::new(
            board(Side::Left, 1, vec![minion("a", 1, 3), minion("b", 1, 3)]),
            board(Side::Right, 1, vec![minion("c", 1, 3), minion("d", 1, 3)]),
            Arc::new(EffectRegistry::new()),
            PcgRng::new(99),
        )
        .unwrap()
        .with_starting_side(Side::Right)
        .with_observer(&mut log);
        engine.run()
    };

    assert!(result.is_ok());
    let sides = log.turn_sides();
    assert!(!sides.is_empty());
    assert_eq!(sides[0], Side::Right);
    assert!(sides.windows(2).all(|pair| pair[0] != pair[1]));
    assert!(matches!(
        log.events().last(),
        Some(CombatEvent::CombatFinished { .. })
    ));
}

#[test]
fn score_sign_follows_the_surviving_side() {
    let champion = EntityTemplate::new("champion", 3, 10, 10);

    let mut left_wins = engine(
        board(Side::Left, 4, vec![champion.clone()]),
        board(Side::Right, 2, vec![minion("small", 1, 1)]),
        EffectRegistry::new(),
    );
    assert_eq!(left_wins.run(), Ok(7));

    let mut right_wins = engine(
        board(Side::Left, 2, vec![minion("small", 1, 1)]),
        board(Side::Right, 4, vec![champion]),
        EffectRegistry::new(),
    );
    assert_eq!(right_wins.run(), Ok(-7));
}

#[test]
fn empty_board_finishes_before_any_attack() {
    let mut engine = engine(
        Board::new(Side::Left, 1),
        board(Side::Right, 3, vec![EntityTemplate::new("m", 2, 1, 1)]),
        EffectRegistry::new(),
    );
    assert_eq!(engine.run(), Ok(-5));
    assert_eq!(engine.turn(), 0);
    assert!(engine.finished());
}

#[test]
fn reborn_returns_with_one_defense() {
    let ghoul = minion("ghoul", 2, 3).with_keywords(Keywords::REBORN);
    let mut log = EventLog::new();
    {
        let mut engine = engine(
            board(Side::Left, 1, vec![ghoul]),
            board(Side::Right, 1, vec![minion("wall", 3, 10)]),
            EffectRegistry::new(),
        )
        .with_observer(&mut log);
        engine.start().unwrap();
        engine.step().unwrap();

        let left = engine.board(Side::Left);
        assert_eq!(left.len(), 1);
        let copy = &left.entities()[0];
        assert_eq!((copy.attack(), copy.defense()), (2, 1));
        assert!(!copy.has_keyword(Keywords::REBORN));
    }
    assert!(
        log.events()
            .iter()
            .any(|event| matches!(event, CombatEvent::Reborn { slot: 0, .. }))
    );
}

#[test]
fn pending_effect_surfaces_as_recoverable_error() {
    let khadgar = minion("Khadgar", 2, 2).with_deathrattle(EffectSpec::Pending(EffectId::new(
        "khadgar_double_summons",
    )));
    let mut engine = engine(
        board(Side::Left, 1, vec![minion("a", 5, 5)]),
        board(Side::Right, 1, vec![khadgar]),
        EffectRegistry::new(),
    );
    let err = engine.run().unwrap_err();
    assert!(matches!(err, CombatError::UnsupportedEffect { .. }));
    assert_eq!(err.severity(), ErrorSeverity::Recoverable);
    assert_eq!(err.error_code(), "effect.unsupported");
}

#[test]
fn stalemate_hits_the_turn_limit() {
    let mut engine = engine(
        board(Side::Left, 1, vec![minion("a", 0, 5)]),
        board(Side::Right, 1, vec![minion("b", 0, 5)]),
        EffectRegistry::new(),
    )
    .with_config(CombatConfig::default().with_max_turns(20));
    assert_eq!(
        engine.run(),
        Err(InvariantViolation::TurnLimitExceeded { limit: 20 }.into())
    );
    assert_eq!(engine.turn(), 20);
}

struct Resummon(Arc<EntityTemplate>);

impl Effect for Resummon {
    fn name(&self) -> &'static str {
        "resummon"
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> Result<(), CombatError> {
        ctx.summon(&self.0, SummonTarget::Own, 1).map(|_| ())
    }
}

#[test]
fn endless_cascade_hits_the_guard() {
    let looping = EntityTemplate::new("loop", 1, 0, 0)
        .with_deathrattle(EffectSpec::Custom(EffectId::new("resummon")));
    let registry =
        EffectRegistry::new().with("resummon", Arc::new(Resummon(Arc::new(looping.clone()))));

    let err = engine(
        board(Side::Left, 1, vec![minion("a", 1, 1)]),
        board(Side::Right, 1, vec![looping]),
        registry,
    )
    .with_config(CombatConfig::default().with_max_cascade(16))
    .run()
    .unwrap_err();

    assert_eq!(
        err,
        CombatError::Invariant(InvariantViolation::CascadeLimitExceeded { limit: 16, turn: 0 })
    );
    assert_eq!(err.severity(), ErrorSeverity::Fatal);
}

struct Rogue;

impl SelectionPolicy for Rogue {
    fn select_attacker(&self, _board: &mut Board, _rng: &mut dyn RngOracle) -> Option<EntityId> {
        Some(EntityId::new(Side::Left, 99))
    }

    fn select_defender(&self, board: &Board, _rng: &mut dyn RngOracle) -> Option<EntityId> {
        board.entities().first().map(Entity::id)
    }
}

#[test]
fn foreign_selection_is_an_invariant_violation() {
    let err = engine(
        board(Side::Left, 1, vec![minion("a", 1, 1)]),
        board(Side::Right, 1, vec![minion("b", 1, 1)]),
        EffectRegistry::new(),
    )
    .with_policy(Rogue)
    .run()
    .unwrap_err();
    assert_eq!(
        err,
        CombatError::Invariant(InvariantViolation::EntityNotOnBoard {
            entity: EntityId::new(Side::Left, 99),
            side: Side::Left,
        })
    );
}

#[test]
fn boards_must_sit_on_their_own_side() {
    let result = CombatEngine::new(
        Board::new(Side::Right, 1),
        Board::new(Side::Right, 1),
        Arc::new(EffectRegistry::new()),
        PcgRng::new(0),
    );
    assert!(matches!(
        result.err(),
        Some(CombatError::Configuration(ConfigurationError::SideMismatch {
            expected: Side::Left,
            actual: Side::Right,
        }))
    ));
}

struct Eager;

impl Effect for Eager {
    fn name(&self) -> &'static str {
        "eager"
    }

    fn apply(&self, ctx: &mut EffectContext<'_>) -> Result<(), CombatError> {
        if ctx.attacks_first() {
            if let Some(entity) = ctx.scope.own.entity_mut(ctx.source.id()) {
                entity.buff(5, 0);
            }
        }
        Ok(())
    }
}

#[test]
fn pre_combat_triggers_know_who_attacks_first() {
    let eager = minion("eager", 1, 1)
        .with_trigger(Trigger::PreCombat, EffectSpec::Custom(EffectId::new("eager")));
    let registry = EffectRegistry::new().with("eager", Arc::new(Eager));

    let mut engine = engine(
        board(Side::Left, 1, vec![eager.clone()]),
        board(Side::Right, 1, vec![eager]),
        registry,
    );
    engine.start().unwrap();
    assert_eq!(engine.board(Side::Left).entities()[0].attack(), 6);
    assert_eq!(engine.board(Side::Right).entities()[0].attack(), 1);
}

#[test]
fn on_attack_buff_lands_before_damage() {
    let charger = minion("charger", 1, 5)
        .with_trigger(Trigger::OnAttack, EffectSpec::BuffSelf { attack: 2, defense: 0 });
    let mut engine = engine(
        board(Side::Left, 1, vec![charger]),
        board(Side::Right, 1, vec![minion("target", 0, 3)]),
        EffectRegistry::new(),
    );
    assert_eq!(engine.run(), Ok(2));
    assert_eq!(engine.turn(), 1);
}

#[test]
fn adjacent_aura_counts_toward_attack() {
    let alpha = minion("alpha", 0, 9).with_aura(Aura::Adjacent { attack: 1 });
    let mut engine = engine(
        board(Side::Left, 1, vec![minion("pup", 1, 5), alpha]),
        board(Side::Right, 1, vec![minion("target", 0, 2)]),
        EffectRegistry::new(),
    );
    engine.start().unwrap();
    engine.step().unwrap();
    assert!(engine.finished());
    assert_eq!(engine.score(), 1 + 2);
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed: u64| {
        let mut log = EventLog::new();
        let score = {
            let mut engine = CombatEngine::new(
                board(
                    Side::Left,
                    2,
                    vec![minion("a", 2, 3), minion("b", 1, 4), minion("c", 3, 2)],
                ),
                board(
                    Side::Right,
                    2,
                    vec![minion("d", 2, 2), minion("e", 3, 3), minion("f", 1, 5)],
                ),
                Arc::new(EffectRegistry::new()),
                PcgRng::new(seed),
            )
            .unwrap()
            .with_observer(&mut log);
            engine.run()
        };
        (score, log)
    };

    let (first_score, first_log) = run(42);
    let (second_score, second_log) = run(42);
    assert!(first_score.is_ok());
    assert_eq!(first_score, second_score);
    assert_eq!(first_log, second_log);
}
