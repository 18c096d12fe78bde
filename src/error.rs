//! Error types.
//!
//! Only [`ConfigError`] aborts a scheduling run. Solver failures and
//! constraint violations are recovered by the pipeline and surface as
//! diagnostics on the outcome.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationError;

/// Caller-fixable input problems. Aborts the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The horizon must contain at least one day.
    #[error("horizon must span at least one day")]
    EmptyHorizon,
    /// An hour-of-day value outside `0..=23`.
    #[error("hour {0} is outside the range 0..=23")]
    HourOutOfRange(i32),
    /// Task records failed validation.
    #[error("{} invalid task record(s): {}", .0.len(), summarize(.0))]
    InvalidTasks(Vec<ValidationError>),
    /// Objective weighting is unusable.
    #[error("invalid objective weights: {0}")]
    InvalidWeights(String),
}

/// Failure of an optimization backend.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum SolverError {
    /// The backend did not answer within the configured limit.
    #[error("solver timed out after {0:?}")]
    Timeout(Duration),
    /// The backend could not be reached.
    #[error("solver backend unavailable: {0}")]
    Unavailable(String),
    /// The backend answered but could not produce an assignment.
    #[error("solver failed: {0}")]
    Failed(String),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_tasks_message_lists_each_error() {
        let err = ConfigError::InvalidTasks(vec![
            ValidationError::new(ValidationErrorKind::ZeroDuration, "Task 'a' has zero duration"),
            ValidationError::new(ValidationErrorKind::DuplicateName, "Duplicate task name: b"),
        ]);
        let text = err.to_string();
        assert!(text.starts_with("2 invalid task record(s)"));
        assert!(text.contains("zero duration"));
        assert!(text.contains("Duplicate task name: b"));
    }

    #[test]
    fn test_solver_error_display() {
        let err = SolverError::Timeout(Duration::from_millis(250));
        assert_eq!(err.to_string(), "solver timed out after 250ms");
        assert!(SolverError::Unavailable("connection refused".into())
            .to_string()
            .contains("connection refused"));
    }
}
