//! Schedule (solution) model.
//!
//! A schedule is the validated result of one scheduling run: a list of
//! task placements sorted by start slot. Violations found while decoding a
//! solver's answer are recorded alongside, never silently dropped.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::{SlotRange, TimeGrid};

/// A validated schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Placements, sorted by start asc, priority desc, name asc.
    pub entries: Vec<ScheduleEntry>,
}

/// A task placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Task name.
    pub task: String,
    /// First occupied slot.
    pub start: u32,
    /// First slot after the task (exclusive).
    pub end: u32,
    /// Task priority (denormalized for ordering and reporting).
    pub priority: f64,
}

/// A hard constraint the solver's answer failed to satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Tasks dropped because of this violation.
    pub task_names: Vec<String>,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of constraint violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A task was given more than one start slot.
    MultipleStarts,
    /// Two tasks occupy a common slot.
    Overlap,
    /// The assignment does not match the problem's variable set.
    MalformedAssignment,
}

impl ScheduleEntry {
    /// Creates a new entry.
    pub fn new(task: impl Into<String>, start: u32, end: u32, priority: f64) -> Self {
        Self {
            task: task.into(),
            start,
            end,
            priority,
        }
    }

    /// Occupied slots.
    #[inline]
    pub fn range(&self) -> SlotRange {
        SlotRange::new(self.start, self.end)
    }

    /// Duration in hours.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.end - self.start
    }

    /// Canonical ordering: start asc, priority desc, name asc.
    pub fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| other.priority.total_cmp(&self.priority))
            .then_with(|| self.task.cmp(&other.task))
    }
}

impl Violation {
    /// A task received several start slots.
    pub fn multiple_starts(task: impl Into<String>, starts: &[u32]) -> Self {
        let task = task.into();
        Self {
            violation_type: ViolationType::MultipleStarts,
            message: format!("Task '{task}' selected at {} starts {starts:?}", starts.len()),
            task_names: vec![task],
            severity: 90,
        }
    }

    /// Two tasks overlap.
    pub fn overlap(a: &ScheduleEntry, b: &ScheduleEntry) -> Self {
        Self {
            violation_type: ViolationType::Overlap,
            task_names: vec![a.task.clone(), b.task.clone()],
            message: format!(
                "Task '{}' [{}, {}) overlaps task '{}' [{}, {})",
                a.task, a.start, a.end, b.task, b.start, b.end
            ),
            severity: 95,
        }
    }

    /// The assignment could not be matched against the problem.
    pub fn malformed(task_names: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::MalformedAssignment,
            task_names,
            message: message.into(),
            severity: 100,
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from entries, applying the canonical ordering.
    pub fn from_entries(mut entries: Vec<ScheduleEntry>) -> Self {
        entries.sort_by(ScheduleEntry::canonical_cmp);
        Self { entries }
    }

    /// Whether no task is scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Latest end slot across all entries.
    pub fn makespan(&self) -> u32 {
        self.entries.iter().map(|e| e.end).max().unwrap_or(0)
    }

    /// Finds the entry for a task.
    pub fn entry_for_task(&self, task: &str) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.task == task)
    }

    /// Whether a task is scheduled.
    pub fn contains_task(&self, task: &str) -> bool {
        self.entry_for_task(task).is_some()
    }

    /// Entries starting on the given zero-based day.
    pub fn entries_on_day(&self, day: u32) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| TimeGrid::day_of(e.start) == day)
            .collect()
    }

    /// Total occupied hours.
    pub fn busy_hours(&self) -> u32 {
        self.entries.iter().map(|e| e.duration()).sum()
    }

    /// Whether any two entries overlap (exhaustive pairwise check).
    pub fn has_overlap(&self) -> bool {
        self.entries.iter().enumerate().any(|(i, a)| {
            self.entries[i + 1..]
                .iter()
                .any(|b| a.range().overlaps(&b.range()))
        })
    }
}
