//! Match driver.
//!
//! [`CombatEngine`] owns both boards and runs the turn loop to completion:
//!
//! ```text
//! start:  PreCombat triggers (first side, then second) -> death resolution
//! turn:   select attacker -> select defender -> attack step
//!         -> death resolution -> advance rotation -> flip active side
//! end:    either board empty -> signed score from the left side
//! ```

mod cascade;
mod observer;

use std::sync::Arc;

use crate::combat::{SelectionPolicy, StandardPolicy};
use crate::config::CombatConfig;
use crate::effect::{EffectRegistry, Scope, TriggerEvent};
use crate::error::{CombatError, ConfigurationError, InvariantViolation};
use crate::rng::RngOracle;
use crate::state::{Board, BoardSnapshot, Entity, EntityId, Keywords, Side, effective_stats};

#[cfg(feature = "serde")]
pub use observer::compute_events_root;
pub use observer::{CombatEvent, CombatObserver, EventLog, NullObserver};

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    InProgress,
    Finished,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::NotStarted => "not_started",
            Phase::InProgress => "in_progress",
            Phase::Finished => "finished",
        }
    }
}

/// One autobattler match between two boards.
///
/// The engine is synchronous and deterministic for a given RNG state: every
/// random choice (starting side, defender, random effect targets) draws from
/// the injected [`RngOracle`].
pub struct CombatEngine<'a, R: RngOracle> {
    boards: [Board; 2],
    active: Side,
    first: Option<Side>,
    turn: u32,
    phase: Phase,
    config: CombatConfig,
    rng: R,
    registry: Arc<EffectRegistry>,
    policy: Box<dyn SelectionPolicy + 'a>,
    observer: Box<dyn CombatObserver + 'a>,
}

impl<'a, R: RngOracle> CombatEngine<'a, R> {
    /// Creates an engine for `left` (side 0) and `right` (side 1).
    pub fn new(
        left: Board,
        right: Board,
        registry: Arc<EffectRegistry>,
        rng: R,
    ) -> Result<Self, CombatError> {
        for (expected, board) in Side::BOTH.into_iter().zip([&left, &right]) {
            if board.side() != expected {
                return Err(ConfigurationError::SideMismatch {
                    expected,
                    actual: board.side(),
                }
                .into());
            }
        }

        Ok(Self {
            boards: [left, right],
            active: Side::Left,
            first: None,
            turn: 0,
            phase: Phase::NotStarted,
            config: CombatConfig::default(),
            rng,
            registry,
            policy: Box::new(StandardPolicy),
            observer: Box::new(NullObserver),
        })
    }

    /// Fixes the side that attacks first instead of drawing it from the RNG.
    #[must_use]
    pub fn with_starting_side(mut self, side: Side) -> Self {
        self.first = Some(side);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: impl SelectionPolicy + 'a) -> Self {
        self.policy = Box::new(policy);
        self
    }

    #[must_use]
    pub fn with_observer(mut self, observer: impl CombatObserver + 'a) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Runs the match to completion and returns the score from the left
    /// side's perspective.
    pub fn run(&mut self) -> Result<i32, CombatError> {
        if self.phase == Phase::NotStarted {
            self.start()?;
        }
        while self.phase != Phase::Finished {
            self.step()?;
        }
        Ok(self.score())
    }

    /// Fixes the first side and resolves pre-combat triggers.
    pub fn start(&mut self) -> Result<(), CombatError> {
        if self.phase != Phase::NotStarted {
            return Ok(());
        }
        let first = match self.first {
            Some(side) => side,
            None => Side::BOTH[(self.rng.next_u32() & 1) as usize],
        };
        self.first = Some(first);
        self.active = first;
        self.phase = Phase::InProgress;
        self.observer.on_event(&CombatEvent::CombatStarted { first });

        for side in [first, first.opponent()] {
            let mut scope = self.scope(side);
            let ids: Vec<EntityId> = scope.own.entities().iter().map(Entity::id).collect();
            for id in ids {
                scope.fire(id, TriggerEvent::PreCombat, None)?;
            }
        }
        self.resolve_deaths()?;
        self.check_finished();
        Ok(())
    }

    /// Plays one attack step. No-op once the match is finished.
    pub fn step(&mut self) -> Result<(), CombatError> {
        match self.phase {
            Phase::NotStarted => return self.start(),
            Phase::Finished => return Ok(()),
            Phase::InProgress => {}
        }
        if self.turn >= self.config.max_turns {
            return Err(InvariantViolation::TurnLimitExceeded {
                limit: self.config.max_turns,
            }
            .into());
        }

        self.turn += 1;
        let side = self.active;
        let other = side.opponent();
        self.observer.on_event(&CombatEvent::TurnStarted {
            turn: self.turn,
            side,
        });

        let attacker = self
            .policy
            .select_attacker(&mut self.boards[side.index()], &mut self.rng)
            .ok_or(InvariantViolation::EmptySelection { side })?;
        self.ensure_on_board(attacker, side)?;
        let defender = self
            .policy
            .select_defender(&self.boards[other.index()], &mut self.rng)
            .ok_or(InvariantViolation::EmptySelection { side: other })?;
        self.ensure_on_board(defender, other)?;

        self.attack(side, attacker, defender)?;
        self.resolve_deaths()?;
        self.boards[side.index()].finish_attack(attacker);
        self.active = other;
        self.check_finished();
        Ok(())
    }

    fn ensure_on_board(&self, entity: EntityId, side: Side) -> Result<(), InvariantViolation> {
        if self.boards[side.index()].position(entity).is_none() {
            return Err(InvariantViolation::EntityNotOnBoard { entity, side });
        }
        Ok(())
    }

    /// Simultaneous exchange between `attacker` (on `side`) and `defender`.
    fn attack(
        &mut self,
        side: Side,
        attacker: EntityId,
        defender: EntityId,
    ) -> Result<(), CombatError> {
        let mut scope = self.scope(side);
        scope.fire(attacker, TriggerEvent::Attack, Some(defender))?;

        let (Some(attacker_slot), Some(defender_slot)) =
            (scope.own.position(attacker), scope.opposing.position(defender))
        else {
            return Ok(());
        };

        let attack = effective_stats(scope.own, attacker_slot, scope.opposing)
            .attack
            .max(0);
        let counter = effective_stats(scope.opposing, defender_slot, scope.own)
            .attack
            .max(0);
        let attacker_poisonous =
            scope.own.entities()[attacker_slot].has_keyword(Keywords::POISONOUS);
        let defender_poisonous =
            scope.opposing.entities()[defender_slot].has_keyword(Keywords::POISONOUS);

        scope.emit(CombatEvent::Attack {
            attacker,
            defender,
            attack,
            counter,
        });
        let to_defender = scope
            .opposing
            .deal_damage(defender_slot, attack, attacker_poisonous);
        let to_attacker = scope
            .own
            .deal_damage(attacker_slot, counter, defender_poisonous);
        scope.report_damage(defender, to_defender);
        scope.report_damage(attacker, to_attacker);

        if to_attacker.took_damage() {
            scope.fire(attacker, TriggerEvent::DamageReceived, Some(defender))?;
        }
        if to_defender.took_damage() {
            scope
                .flipped()
                .fire(defender, TriggerEvent::DamageReceived, Some(attacker))?;
        }
        Ok(())
    }

    fn check_finished(&mut self) {
        if self.phase == Phase::InProgress && self.boards.iter().any(Board::is_empty) {
            self.phase = Phase::Finished;
            let score = self.score();
            self.observer.on_event(&CombatEvent::CombatFinished {
                turns: self.turn,
                score,
            });
        }
    }

    /// View of the match from `side`, borrowing every engine resource.
    fn scope(&mut self, side: Side) -> Scope<'_> {
        let first = self.first.unwrap_or(self.active);
        let (own, opposing) = split_boards(&mut self.boards, side);
        Scope::new(
            own,
            opposing,
            &mut self.rng,
            &self.registry,
            self.observer.as_mut(),
            &self.config,
            first,
        )
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Side whose turn it is to attack.
    pub fn active_side(&self) -> Side {
        self.active
    }

    /// Side that attacked first, once the match has started.
    pub fn first_side(&self) -> Option<Side> {
        self.first
    }

    /// Either board has no entities left.
    pub fn finished(&self) -> bool {
        self.boards.iter().any(Board::is_empty)
    }

    /// Signed result from the left side's perspective.
    ///
    /// Negative when the left board is empty, zero when both are.
    pub fn score(&self) -> i32 {
        let [left, right] = &self.boards;
        if left.is_empty() {
            -right.score()
        } else {
            left.score()
        }
    }

    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    pub fn snapshot(&self, side: Side) -> BoardSnapshot {
        self.boards[side.index()].snapshot(&self.boards[side.opponent().index()])
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }
}

/// Splits the pair into (`side`'s board, the other board).
fn split_boards(boards: &mut [Board; 2], side: Side) -> (&mut Board, &mut Board) {
    let [left, right] = boards;
    match side {
        Side::Left => (left, right),
        Side::Right => (right, left),
    }
}
