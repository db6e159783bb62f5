use std::sync::Arc;

use pacer_model::{Iteration, Outcome, TaskId, TaskState};
use tokio::task::JoinHandle;

use crate::{error::CoreError, task::progress::Progress};

/// Handle to a spawned bounded task.
pub struct TaskHandle {
    pub(crate) id: TaskId,
    pub(crate) progress: Arc<Progress>,
    pub(crate) join: JoinHandle<Outcome>,
}

impl TaskHandle {
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TaskState {
        self.progress.state()
    }

    /// Units of work completed so far.
    pub fn iterations(&self) -> Iteration {
        self.progress.iterations()
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the terminal report.
    pub async fn join(self) -> Result<Outcome, CoreError> {
        self.join.await.map_err(CoreError::from)
    }
}
