use serde::{Deserialize, Serialize};

/// Lifecycle state of a bounded task.
///
/// `Running` is the only initial state; `Halted` and `Completed` are terminal
/// and nothing leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskState {
    /// Task is performing units of work.
    #[default]
    Running,
    /// Cancellation was observed before the iteration limit was reached.
    Halted,
    /// Iteration limit was reached before cancellation was observed.
    Completed,
}

impl TaskState {
    /// Returns `true` if the task will not transition further.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Halted | TaskState::Completed)
    }

    /// Short label used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Running => "running",
            TaskState::Halted => "halted",
            TaskState::Completed => "completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(TaskState::Halted.is_terminal());
        assert!(TaskState::Completed.is_terminal());
        assert!(!TaskState::Running.is_terminal());
    }

    #[test]
    fn default_is_running() {
        assert_eq!(TaskState::default(), TaskState::Running);
    }

    #[test]
    fn serde_uses_camel_case() {
        let json = serde_json::to_string(&TaskState::Completed).unwrap();
        assert_eq!(json, r#""completed""#);

        let back: TaskState = serde_json::from_str(r#""halted""#).unwrap();
        assert_eq!(back, TaskState::Halted);
    }
}
