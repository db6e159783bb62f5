use async_trait::async_trait;
use pacer_model::TaskEvent;

/// Receiver of the observable side effects of a bounded task.
///
/// Called inline from the task's run loop, so implementations should return promptly.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn on_event(&self, event: &TaskEvent);

    fn name(&self) -> &'static str {
        "sink"
    }
}
