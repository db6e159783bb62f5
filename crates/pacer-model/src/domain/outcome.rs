use serde::{Deserialize, Serialize};

use crate::{Iteration, TaskId, TaskState};

/// Terminal report of a bounded task run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub id: TaskId,
    /// Always a terminal state.
    pub state: TaskState,
    /// Units of work actually performed.
    pub iterations: Iteration,
}

impl Outcome {
    pub fn is_halted(&self) -> bool {
        self.state == TaskState::Halted
    }

    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }
}

/// How a deadline timer finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimerOutcome {
    /// The timer elapsed and performed the signal assignment.
    Fired,
    /// The timer was disarmed, or the signal had already been set by someone else.
    Disarmed,
}

/// Result of running a task under a deadline once both paths have settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settled {
    pub outcome: Outcome,
    pub timer: TimerOutcome,
}
