//! Turn scheduler.
//!
//! The [`GameEngine`] is the only writer of a [`GameState`] while a turn runs.
//! One call to [`GameEngine::advance_turn`] performs the whole turn sequence:
//!
//! 1. clear per-turn flags and increment the turn counter
//! 2. turn-start status ticks
//! 3. characters act, in placement order
//! 4. enemy positions are captured for projectile tie-breaks
//! 5. active enemies act, in puzzle order
//! 6. parallel and event-triggered actions
//! 7. projectiles, persistent hazards, particles
//! 8. turn-end status ticks and cooldowns
//! 9. victory, then defeat
//!
//! Each entity's action and all of its side effects complete before the next
//! entity acts; later actors see earlier actors' positions.

pub mod program;
pub mod triggers;
pub mod victory;

pub use program::{ProgramStep, next_is_move, next_step};
pub use triggers::{run_triggers, trigger_holds, trigger_order};
pub use victory::{condition_met, defeat_reason, is_victory};

use tracing::{debug, trace};

use crate::action::{self, ActionKind, settle_overlaps};
use crate::env::GameEnv;
use crate::projectile;
use crate::state::{BehaviorKind, EntityId, GameState, GameStatus, Team, TurnFlags};
use crate::status;

/// Drives a [`GameState`] one turn at a time.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Runs one full turn and returns the resulting status.
    ///
    /// A state that is not running is left untouched.
    pub fn advance_turn(&mut self, env: &GameEnv<'_>) -> GameStatus {
        if !self.state.is_running() {
            return self.state.status;
        }

        for entity in self.state.entities.iter_mut() {
            entity.flags = TurnFlags::empty();
        }
        self.state.turn += 1;
        let turn = self.state.turn;
        trace!(turn, "turn started");

        status::tick_turn_start(self.state);

        self.run_phase(env, Team::Character);
        self.capture_pre_move_positions();
        self.run_phase(env, Team::Enemy);

        triggers::run_triggers(self.state, env);

        projectile::advance_projectiles(self.state, env);
        projectile::tick_area_effects(self.state);
        projectile::expire_particles(self.state);

        status::tick_turn_end(self.state);

        victory::settle(self.state, env);
        debug!(
            turn,
            status = %self.state.status,
            score = self.state.score,
            projectiles = self.state.projectiles.len(),
            "turn finished"
        );
        self.state.status
    }

    /// Advances until the run ends. Always terminates: the turn limit forces
    /// a defeat.
    pub fn run_to_end(&mut self, env: &GameEnv<'_>) -> GameStatus {
        while self.state.is_running() {
            self.advance_turn(env);
        }
        self.state.status
    }

    fn run_phase(&mut self, env: &GameEnv<'_>, team: Team) {
        let ids = self.state.entities.team_ids(team);

        let vacating = ids
            .iter()
            .copied()
            .filter(|id| self.will_act(*id))
            .filter(|id| {
                self.state
                    .entity(*id)
                    .is_some_and(|e| next_is_move(&e.program, e.cursor))
            })
            .collect();
        self.state.movement.vacating = vacating;

        for id in ids {
            self.take_step(env, id);
        }
        settle_overlaps(self.state);
    }

    /// Living, active, program-running, and not stunned or asleep.
    fn will_act(&self, id: EntityId) -> bool {
        self.state.entity(id).is_some_and(|e| {
            e.is_alive()
                && e.active
                && (e.team == Team::Character || e.behavior == BehaviorKind::Active)
                && !e.is_action_prevented()
        })
    }

    fn take_step(&mut self, env: &GameEnv<'_>, id: EntityId) {
        let Some(entity) = self.state.entity_mut(id) else {
            return;
        };
        if !entity.is_alive() || !entity.active {
            return;
        }
        if entity.team == Team::Enemy && entity.behavior != BehaviorKind::Active {
            return;
        }
        if entity.is_action_prevented() {
            entity.flags |= TurnFlags::SKIPPED;
            trace!(entity = %id, "action prevented");
            return;
        }

        let Some(step) = next_step(&entity.program, entity.cursor) else {
            entity.active = false;
            debug!(entity = %id, "program exhausted, deactivated");
            return;
        };
        let kinds: Vec<ActionKind> = entity.program[step.start..step.end]
            .iter()
            .map(|a| a.kind.clone())
            .collect();
        entity.cursor = step.end;

        for kind in &kinds {
            if !self.state.entity(id).is_some_and(|e| e.is_alive()) {
                break;
            }
            action::execute(self.state, env, id, kind);
        }
    }

    fn capture_pre_move_positions(&mut self) {
        self.state.pre_move_positions = self
            .state
            .entities
            .enemies()
            .filter(|e| e.is_alive())
            .map(|e| (e.id, e.position))
            .collect();
    }
}
