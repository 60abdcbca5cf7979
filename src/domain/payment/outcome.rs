//! Outcome of compensating or non-critical actions.

use std::fmt;

/// Result of an action whose failure must not fail the surrounding operation.
///
/// Failures are logged by the caller and reported here, never propagated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffort {
    /// The action ran and succeeded.
    Completed,
    /// The action was not applicable and did not run.
    Skipped,
    /// The action ran and failed; carries the reason.
    Failed(String),
}

impl BestEffort {
    /// Converts a fallible action's result into an outcome.
    pub fn from_result<T, E: fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(_) => BestEffort::Completed,
            Err(e) => BestEffort::Failed(e.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, BestEffort::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, BestEffort::Failed(_))
    }
}

impl fmt::Display for BestEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestEffort::Completed => f.write_str("completed"),
            BestEffort::Skipped => f.write_str("skipped"),
            BestEffort::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}
