//! Bounded, cooperatively cancellable task.
//!
//! A [`BoundedTask`] runs a [`Work`] unit up to `limit` times. Before every unit it polls its
//! [`Cancel`] source; once cancellation is observed, or the limit is reached, it enters a terminal
//! state, emits exactly one terminal event and returns.
mod handle;
mod progress;
mod work;

pub use handle::TaskHandle;
pub use work::{Sleep, Work};

use std::sync::Arc;

use pacer_model::{Iteration, Outcome, TaskEvent, TaskId, TaskState};
use tracing::{debug, instrument, trace};

use crate::{config::TaskConfig, signal::Cancel, sink::EventSink};
use progress::Progress;

pub struct BoundedTask<W> {
    id: TaskId,
    limit: Iteration,
    work: W,
    progress: Arc<Progress>,
}

impl BoundedTask<Sleep> {
    /// Task over a fixed-latency [`Sleep`] unit, sized by `cfg`.
    pub fn from_config(cfg: &TaskConfig) -> Self {
        Self::new(cfg.limit, Sleep::new(cfg.unit()))
    }
}

impl<W: Work> BoundedTask<W> {
    pub fn new(limit: Iteration, work: W) -> Self {
        Self {
            id: TaskId::new(),
            limit,
            work,
            progress: Arc::new(Progress::default()),
        }
    }

    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn limit(&self) -> Iteration {
        self.limit
    }

    /// Run to a terminal state.
    ///
    /// Consumes the task: a task runs at most once.
    #[instrument(level = "debug", skip_all, fields(task = %self.id, limit = self.limit))]
    pub async fn run<C>(self, cancel: &C, sink: &dyn EventSink) -> Outcome
    where
        C: Cancel + ?Sized,
    {
        let id = self.id.clone();
        sink.on_event(&TaskEvent::Started {
            id: id.clone(),
            limit: self.limit,
        })
        .await;

        let mut iterations: Iteration = 0;
        let state = loop {
            if cancel.is_cancelled() {
                break TaskState::Halted;
            }
            if iterations >= self.limit {
                break TaskState::Completed;
            }

            self.work.step(iterations + 1).await;
            iterations += 1;
            self.progress.record_step(iterations);
            trace!(iteration = iterations, "unit done");

            sink.on_event(&TaskEvent::Step {
                id: id.clone(),
                iteration: iterations,
            })
            .await;
        };

        // The run loop is the only writer, so this is the first transition.
        let first = self.progress.finish(state);
        debug_assert!(first, "terminal state recorded twice");

        let terminal = match state {
            TaskState::Halted => TaskEvent::Halted {
                id: id.clone(),
                iterations,
            },
            _ => TaskEvent::Completed {
                id: id.clone(),
                iterations,
            },
        };
        sink.on_event(&terminal).await;
        debug!(state = state.as_str(), iterations, "task stopped");

        sink.on_event(&TaskEvent::Exited { id: id.clone() }).await;
        Outcome {
            id,
            state,
            iterations,
        }
    }
}

impl<W: Work + 'static> BoundedTask<W> {
    /// Run on the tokio runtime.
    pub fn spawn<C>(self, cancel: C, sink: Arc<dyn EventSink>) -> TaskHandle
    where
        C: Cancel + 'static,
    {
        let id = self.id.clone();
        let progress = Arc::clone(&self.progress);
        let join = tokio::spawn(async move { self.run(&cancel, sink.as_ref()).await });

        TaskHandle { id, progress, join }
    }
}
