//! Input validation for task lists.
//!
//! Checks structural integrity of task records before encoding. Detects:
//! - Empty or duplicate names
//! - Zero durations
//! - Zero deadlines
//! - Non-finite or non-positive priorities
//!
//! Tasks that are well-formed but cannot fit the grid are not validation
//! errors; the encoder reports them as unschedulable.

use crate::models::Task;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A task has an empty name.
    EmptyName,
    /// Two tasks share the same name.
    DuplicateName,
    /// A task occupies no slots.
    ZeroDuration,
    /// A task's deadline is at the horizon start.
    NonPositiveDeadline,
    /// A task's priority is not a positive finite number.
    InvalidPriority,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a task list.
///
/// Checks:
/// 1. Every task has a non-empty name
/// 2. No duplicate task names
/// 3. Duration > 0
/// 4. Deadline > 0
/// 5. Priority is finite and > 0
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut names = HashSet::new();

    for task in tasks {
        if task.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Task with empty name",
            ));
        } else if !names.insert(task.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate task name: {}", task.name),
            ));
        }

        if task.duration == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDuration,
                format!("Task '{}' has zero duration", task.name),
            ));
        }

        if task.deadline == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDeadline,
                format!("Task '{}' has deadline 0", task.name),
            ));
        }

        if !(task.priority.is_finite() && task.priority > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPriority,
                format!("Task '{}' has invalid priority {}", task.name, task.priority),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
