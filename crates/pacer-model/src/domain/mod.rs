mod task_id;
pub use task_id::TaskId;

mod task_state;
pub use task_state::TaskState;

mod outcome;
pub use outcome::{Outcome, Settled, TimerOutcome};

mod task_event;
pub use task_event::TaskEvent;

/// Number of completed units of work.
pub type Iteration = u32;
