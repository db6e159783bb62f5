pub mod config;
pub use config::TaskConfig;
pub mod counter;
pub use counter::Counter;
pub mod deadline;
pub use deadline::{Deadline, run_with_deadline};
pub mod error;
pub use error::CoreError;
pub mod signal;
pub use signal::{Cancel, Signal};
pub mod sink;
pub use sink::EventSink;
pub mod task;
pub use task::{BoundedTask, Sleep, TaskHandle, Work};

#[cfg(test)]
pub(crate) mod testing;
