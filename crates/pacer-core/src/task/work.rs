use std::time::Duration;

use async_trait::async_trait;
use pacer_model::Iteration;

/// One uninterruptible unit of work.
///
/// Cancellation is never checked while a step is in flight.
#[async_trait]
pub trait Work: Send + Sync {
    /// Perform unit number `iteration` (1-based).
    async fn step(&self, iteration: Iteration);
}

/// Unit of work with a fixed latency and no other effect.
#[derive(Debug, Clone, Copy)]
pub struct Sleep {
    unit: Duration,
}

impl Sleep {
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> Duration {
        self.unit
    }
}

#[async_trait]
impl Work for Sleep {
    async fn step(&self, _iteration: Iteration) {
        tokio::time::sleep(self.unit).await;
    }
}
