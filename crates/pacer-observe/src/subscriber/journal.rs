use async_trait::async_trait;
use pacer_core::EventSink;
use pacer_model::TaskEvent;

use crate::subscriber::view::log_event;

/// Event sink that writes every task event to the `tracing` pipeline.
#[derive(Debug, Default)]
pub struct Journal;

impl Journal {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for Journal {
    async fn on_event(&self, event: &TaskEvent) {
        log_event(event);
    }

    fn name(&self) -> &'static str {
        "journal"
    }
}
