use std::sync::Mutex;

use async_trait::async_trait;
use pacer_model::TaskEvent;

use crate::sink::EventSink;

/// Sink that keeps every event it receives.
#[derive(Default)]
pub struct Recorder {
    events: Mutex<Vec<TaskEvent>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn terminal_count(&self) -> usize {
        self.events().iter().filter(|e| e.is_terminal()).count()
    }

    pub fn step_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, TaskEvent::Step { .. }))
            .count()
    }
}

#[async_trait]
impl EventSink for Recorder {
    async fn on_event(&self, event: &TaskEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "recorder"
    }
}
