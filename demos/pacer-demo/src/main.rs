use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use pacer_core::{BoundedTask, Counter, EventSink, TaskConfig, run_with_deadline};
use pacer_observe::{Journal, LoggerConfig, init_logger};

const COUNTER_KEY: &str = "somekey";
const INCREMENTS: usize = 1_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Logger
    let cfg = LoggerConfig::from_env().context("reading logger settings")?;
    init_logger(&cfg)?;
    info!(format = %cfg.format, level = %cfg.level, "logger initialized");

    // 2) Counter race
    let counter = Counter::new();
    let handles: Vec<_> = (0..INCREMENTS)
        .map(|_| {
            let counter = counter.clone();
            tokio::spawn(async move { counter.increment(COUNTER_KEY) })
        })
        .collect();
    for h in handles {
        h.await.context("increment task panicked")?;
    }
    info!(
        key = COUNTER_KEY,
        value = counter.value(COUNTER_KEY),
        expected = INCREMENTS,
        "counter settled"
    );

    // 3) Bounded task under a deadline
    let task_cfg = TaskConfig::default();
    let sink: Arc<dyn EventSink> = Arc::new(Journal::new());
    let settled = run_with_deadline(BoundedTask::from_config(&task_cfg), &task_cfg, sink).await?;
    info!(report = %serde_json::to_string(&settled)?, "deadline run finished");

    info!("leaving main");
    Ok(())
}
