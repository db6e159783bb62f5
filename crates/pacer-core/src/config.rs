use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

const DEFAULT_LIMIT: u32 = 3;
const DEFAULT_UNIT_MS: u64 = 1_000;
const DEFAULT_DEADLINE_MS: u64 = 3_000;
const DEFAULT_GRACE_MS: u64 = 1_000;

/// Parameters of a bounded task run under a deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskConfig {
    /// Maximum number of units of work.
    pub limit: u32,
    /// Fixed latency of one unit.
    pub unit_ms: u64,
    /// Delay after which the deadline timer sets the cancellation signal.
    pub deadline_ms: u64,
    /// Extra wait after both the task and the timer have settled.
    pub grace_ms: u64,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            unit_ms: DEFAULT_UNIT_MS,
            deadline_ms: DEFAULT_DEADLINE_MS,
            grace_ms: DEFAULT_GRACE_MS,
        }
    }
}

impl TaskConfig {
    #[inline]
    pub fn unit(&self) -> Duration {
        Duration::from_millis(self.unit_ms)
    }

    #[inline]
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    #[inline]
    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    /// Upper bound on how long a deadline-driven run may take.
    pub fn budget(&self) -> Duration {
        self.deadline() + self.unit() + self.grace()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.unit_ms == 0 {
            return Err(CoreError::InvalidConfig("unitMs must be > 0".into()));
        }
        if self.deadline_ms == 0 {
            return Err(CoreError::InvalidConfig("deadlineMs must be > 0".into()));
        }
        Ok(())
    }
}
