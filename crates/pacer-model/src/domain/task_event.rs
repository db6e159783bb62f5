use serde::{Deserialize, Serialize};

use crate::{Iteration, TaskId};

/// Observable side effect emitted by a bounded task.
///
/// A run emits `Started`, zero or more `Step`, exactly one of `Halted` or
/// `Completed`, then `Exited`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum TaskEvent {
    Started { id: TaskId, limit: Iteration },
    Step { id: TaskId, iteration: Iteration },
    Halted { id: TaskId, iterations: Iteration },
    Completed { id: TaskId, iterations: Iteration },
    Exited { id: TaskId },
}

impl TaskEvent {
    pub fn id(&self) -> &TaskId {
        match self {
            TaskEvent::Started { id, .. }
            | TaskEvent::Step { id, .. }
            | TaskEvent::Halted { id, .. }
            | TaskEvent::Completed { id, .. }
            | TaskEvent::Exited { id } => id,
        }
    }

    /// Returns `true` for `Halted` and `Completed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskEvent::Halted { .. } | TaskEvent::Completed { .. })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TaskEvent::Started { .. } => "started",
            TaskEvent::Step { .. } => "step",
            TaskEvent::Halted { .. } => "halted",
            TaskEvent::Completed { .. } => "completed",
            TaskEvent::Exited { .. } => "exited",
        }
    }
}
