use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use pacer_model::{Iteration, TaskState};

/// Live view of a running task, written only by the task itself.
#[derive(Debug, Default)]
pub(crate) struct Progress {
    state: AtomicU8,
    iterations: AtomicU32,
}

impl Progress {
    pub(crate) fn state(&self) -> TaskState {
        decode(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn iterations(&self) -> Iteration {
        self.iterations.load(Ordering::Acquire)
    }

    pub(crate) fn record_step(&self, iterations: Iteration) {
        self.iterations.store(iterations, Ordering::Release);
    }

    /// Move from `Running` into `terminal`.
    ///
    /// Returns `false` if a terminal state was already recorded.
    pub(crate) fn finish(&self, terminal: TaskState) -> bool {
        debug_assert!(terminal.is_terminal());
        self.state
            .compare_exchange(
                encode(TaskState::Running),
                encode(terminal),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

const fn encode(state: TaskState) -> u8 {
    match state {
        TaskState::Running => 0,
        TaskState::Halted => 1,
        TaskState::Completed => 2,
    }
}

const fn decode(raw: u8) -> TaskState {
    match raw {
        1 => TaskState::Halted,
        2 => TaskState::Completed,
        _ => TaskState::Running,
    }
}
