use pacer_model::TaskEvent;
use tracing::{debug, info, trace, warn};

#[inline]
pub fn message_for(event: &TaskEvent) -> &'static str {
    match event {
        TaskEvent::Started { .. } => "starting bounded task",
        TaskEvent::Step { .. } => "unit of work done",
        TaskEvent::Halted { .. } => "operation halted (cancellation observed)",
        TaskEvent::Completed { .. } => "operation complete (iteration limit reached)",
        TaskEvent::Exited { .. } => "exiting bounded task",
    }
}

#[inline]
pub fn log_event(event: &TaskEvent) {
    let msg = message_for(event);
    let task = event.id().as_str();

    match event {
        TaskEvent::Started { limit, .. } => info!(task, limit, "{msg}"),
        TaskEvent::Step { iteration, .. } => debug!(task, iteration, "{msg}"),
        TaskEvent::Halted { iterations, .. } => warn!(task, iterations, "{msg}"),
        TaskEvent::Completed { iterations, .. } => info!(task, iterations, "{msg}"),
        TaskEvent::Exited { .. } => trace!(task, "{msg}"),
    }
}
