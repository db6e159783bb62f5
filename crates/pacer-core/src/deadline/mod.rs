//! Timer that sets a cancellation [`Signal`] after a fixed delay.
//!
//! The bounded task never sees the deadline itself; it only observes the signal this timer sets.
use std::{sync::Arc, time::Duration};

use pacer_model::{Settled, TimerOutcome};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::{
    config::TaskConfig,
    error::CoreError,
    signal::Signal,
    sink::EventSink,
    task::{BoundedTask, Work},
};

/// Armed deadline timer.
pub struct Deadline {
    disarm: CancellationToken,
    join: JoinHandle<TimerOutcome>,
}

impl Deadline {
    /// Spawn a timer that sets `signal` once `after` has elapsed.
    pub fn arm(signal: Signal, after: Duration) -> Self {
        let disarm = CancellationToken::new();
        let guard = disarm.clone();

        let join = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = guard.cancelled() => TimerOutcome::Disarmed,
                _ = signal.wait() => TimerOutcome::Disarmed,
                _ = tokio::time::sleep(after) => {
                    if signal.set() {
                        debug!(after_ms = after.as_millis() as u64, "deadline fired");
                        TimerOutcome::Fired
                    } else {
                        TimerOutcome::Disarmed
                    }
                }
            }
        });

        Self { disarm, join }
    }

    /// Stop the timer if it has not fired yet. Idempotent.
    pub fn disarm(&self) {
        self.disarm.cancel();
    }

    /// Wait for the timer path to finish.
    pub async fn settle(self) -> Result<TimerOutcome, CoreError> {
        self.join.await.map_err(CoreError::from)
    }
}

/// Sets the signal when dropped.
///
/// Dropping the run future early stops the spawned task at its next unit boundary and lets the
/// timer exit, instead of leaving both detached.
struct SetOnDrop(Signal);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.set();
    }
}

/// Run `task` with a deadline timer and wait until both have settled.
///
/// After the task reports, the signal is set (releasing anyone waiting on it), the timer is
/// disarmed and joined, and a final `cfg.grace` elapses before returning. If the returned future
/// is dropped first, the signal is set so the task halts cooperatively; it is never aborted.
#[instrument(level = "debug", skip_all, fields(task = %task.id(), deadline_ms = cfg.deadline_ms))]
pub async fn run_with_deadline<W>(
    task: BoundedTask<W>,
    cfg: &TaskConfig,
    sink: Arc<dyn EventSink>,
) -> Result<Settled, CoreError>
where
    W: Work + 'static,
{
    cfg.validate()?;

    let signal = Signal::new();
    let _cancel_on_drop = SetOnDrop(signal.clone());
    let deadline = Deadline::arm(signal.clone(), cfg.deadline());
    let handle = task.spawn(signal.clone(), sink);

    let outcome = handle.join().await;
    signal.set();
    deadline.disarm();
    let timer = deadline.settle().await?;
    let outcome = outcome?;

    info!(
        state = outcome.state.as_str(),
        iterations = outcome.iterations,
        timer = ?timer,
        "task settled"
    );

    tokio::time::sleep(cfg.grace()).await;
    Ok(Settled { outcome, timer })
}

#[cfg(test)]
mod tests {
    use super::*;

    use pacer_model::TaskState;
    use tokio::time::Instant;

    use crate::testing::Recorder;

    fn cfg(limit: u32, deadline_ms: u64) -> TaskConfig {
        TaskConfig {
            limit,
            deadline_ms,
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn timer_fires_and_sets_signal() {
        let signal = Signal::new();
        let deadline = Deadline::arm(signal.clone(), Duration::from_millis(300));

        signal.wait().await;
        assert_eq!(deadline.settle().await.unwrap(), TimerOutcome::Fired);
        assert!(signal.is_set());
    }

    #[tokio::test(start_paused = true)]
    async fn disarmed_timer_never_sets_signal() {
        let signal = Signal::new();
        let deadline = Deadline::arm(signal.clone(), Duration::from_secs(10));

        deadline.disarm();
        assert_eq!(deadline.settle().await.unwrap(), TimerOutcome::Disarmed);

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(!signal.is_set());
    }

    #[tokio::test(start_paused = true)]
    async fn timer_yields_when_signal_already_set() {
        let signal = Signal::new();
        let deadline = Deadline::arm(signal.clone(), Duration::from_secs(10));

        assert!(signal.set());
        assert_eq!(deadline.settle().await.unwrap(), TimerOutcome::Disarmed);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_halts_slow_task() {
        let rec = Arc::new(Recorder::default());
        let cfg = cfg(3, 1_500);

        let settled = run_with_deadline(
            BoundedTask::from_config(&cfg),
            &cfg,
            Arc::clone(&rec) as Arc<dyn EventSink>,
        )
        .await
        .unwrap();

        assert_eq!(settled.outcome.state, TaskState::Halted);
        assert_eq!(settled.outcome.iterations, 2);
        assert_eq!(settled.timer, TimerOutcome::Fired);
        assert_eq!(rec.terminal_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fast_task_completes_and_disarms_timer() {
        let rec = Arc::new(Recorder::default());
        let cfg = cfg(3, 5_000);

        let settled = run_with_deadline(
            BoundedTask::from_config(&cfg),
            &cfg,
            Arc::clone(&rec) as Arc<dyn EventSink>,
        )
        .await
        .unwrap();

        assert_eq!(settled.outcome.state, TaskState::Completed);
        assert_eq!(settled.outcome.iterations, 3);
        assert_eq!(settled.timer, TimerOutcome::Disarmed);
        assert_eq!(rec.terminal_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reference_scenario_settles_within_budget() {
        let rec = Arc::new(Recorder::default());
        let cfg = TaskConfig::default();
        let started = Instant::now();

        let settled = tokio::time::timeout(
            cfg.budget() + Duration::from_millis(100),
            run_with_deadline(
                BoundedTask::from_config(&cfg),
                &cfg,
                Arc::clone(&rec) as Arc<dyn EventSink>,
            ),
        )
        .await
        .expect("run must not hang")
        .unwrap();

        // Deadline and last unit boundary coincide; either terminal is acceptable.
        assert!(settled.outcome.state.is_terminal());
        assert!(settled.outcome.iterations <= cfg.limit);
        assert_eq!(rec.terminal_count(), 1);
        assert!(started.elapsed() >= cfg.grace());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_run_halts_task_at_next_boundary() {
        let rec = Arc::new(Recorder::default());
        let cfg = cfg(3, 10_000);

        let res = tokio::time::timeout(
            Duration::from_millis(500),
            run_with_deadline(
                BoundedTask::from_config(&cfg),
                &cfg,
                Arc::clone(&rec) as Arc<dyn EventSink>,
            ),
        )
        .await;
        assert!(res.is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(rec.terminal_count(), 1);
        assert!(matches!(
            rec.events().iter().find(|e| e.is_terminal()),
            Some(pacer_model::TaskEvent::Halted { iterations: 1, .. })
        ));
    }

    #[tokio::test]
    async fn invalid_config_is_rejected() {
        let cfg = TaskConfig {
            unit_ms: 0,
            ..Default::default()
        };
        let res = run_with_deadline(
            BoundedTask::new(1, crate::task::Sleep::new(Duration::from_millis(1))),
            &cfg,
            Arc::new(Recorder::default()) as Arc<dyn EventSink>,
        )
        .await;
        assert!(matches!(res, Err(CoreError::InvalidConfig(_))));
    }
}
