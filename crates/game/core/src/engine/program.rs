//! Program cursor: picking the next sequential step of an action program.

use crate::action::{Action, ActionKind, ExecutionMode};
use crate::config::SimulationConfig;

/// The slice of a program run as one scheduler step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgramStep {
    /// Index of the leading sequential action.
    pub start: usize,
    /// One past the last action of the step (its trailing parallel-with-previous run).
    pub end: usize,
}

/// Index of the first cursor-driven action at or after `from`.
fn next_cursor_driven(program: &[Action], from: usize) -> Option<usize> {
    program
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, action)| action.is_cursor_driven())
        .map(|(index, _)| index)
}

/// Resolves the step the cursor points at.
///
/// Triggered and parallel actions are skipped. A `Repeat` wraps the cursor to
/// the start and keeps looking, so a loop never wastes a turn; the hop guard
/// ends programs that are nothing but repeats. `None` means the program is
/// exhausted.
pub fn next_step(program: &[Action], cursor: usize) -> Option<ProgramStep> {
    let mut from = cursor;
    for _ in 0..=SimulationConfig::MAX_REPEAT_HOPS {
        let start = next_cursor_driven(program, from)?;
        if program[start].kind == ActionKind::Repeat {
            from = 0;
            continue;
        }

        let end = program[start + 1..]
            .iter()
            .take_while(|a| a.mode == ExecutionMode::ParallelWithPrevious && a.trigger.is_none())
            .count()
            + start
            + 1;
        return Some(ProgramStep { start, end });
    }
    None
}

/// Whether the step the cursor points at begins with a move.
pub fn next_is_move(program: &[Action], cursor: usize) -> bool {
    next_step(program, cursor).is_some_and(|step| program[step.start].kind.is_move())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::EventTrigger;

    fn program() -> Vec<Action> {
        vec![
            Action::parallel(ActionKind::Wait),
            Action::new(ActionKind::forward(1)),
            Action::with_previous(ActionKind::AttackForward { damage: 1 }),
            Action::new(ActionKind::Wait).with_trigger(EventTrigger::WallAhead),
            Action::new(ActionKind::Wait),
            Action::new(ActionKind::Repeat),
        ]
    }

    #[test]
    fn steps_skip_parallel_and_triggered_actions() {
        let program = program();
        assert_eq!(next_step(&program, 0), Some(ProgramStep { start: 1, end: 3 }));
        assert_eq!(next_step(&program, 3), Some(ProgramStep { start: 4, end: 5 }));
    }

    #[test]
    fn repeat_wraps_to_the_first_sequential_action() {
        let program = program();
        assert_eq!(next_step(&program, 5), Some(ProgramStep { start: 1, end: 3 }));
        assert!(next_is_move(&program, 5));
    }

    #[test]
    fn exhausted_and_repeat_only_programs_end() {
        let program = vec![Action::new(ActionKind::Wait)];
        assert_eq!(next_step(&program, 1), None);

        let looping = vec![Action::new(ActionKind::Repeat)];
        assert_eq!(next_step(&looping, 0), None);
        assert_eq!(next_step(&[], 0), None);
    }
}
