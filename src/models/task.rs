//! Task model.
//!
//! A task is a single block of work occupying `duration` consecutive
//! hourly slots. Tasks are the unit the encoder places on the grid.
//!
//! # Time Representation
//! All times are whole hours relative to the horizon start (slot 0).

use serde::{Deserialize, Serialize};

/// A task to be placed on the time grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task name.
    pub name: String,
    /// Number of consecutive hourly slots the task occupies.
    pub duration: u32,
    /// Latest completion time (hour offset from horizon start, exclusive end).
    pub deadline: u32,
    /// Scheduling priority (higher = more important).
    pub priority: f64,
}

impl Task {
    /// Creates a new task.
    pub fn new(name: impl Into<String>, duration: u32, deadline: u32, priority: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            deadline,
            priority,
        }
    }

    /// Sets the duration in hours.
    pub fn with_duration(mut self, duration: u32) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the deadline (hour offset).
    pub fn with_deadline(mut self, deadline: u32) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the task can never meet its deadline, regardless of grid.
    #[inline]
    pub fn exceeds_deadline(&self) -> bool {
        self.duration > self.deadline
    }

    /// Latest slot the task may start at within a horizon of `horizon` slots.
    ///
    /// Returns `None` if the task cannot finish by its deadline inside the
    /// horizon even when started at slot 0.
    pub fn latest_start(&self, horizon: u32) -> Option<u32> {
        self.deadline.min(horizon).checked_sub(self.duration)
    }

    /// Splits the task into chunks of at most `max_chunk` hours.
    ///
    /// Chunks are named `{name}_{i}` and inherit deadline and priority.
    /// The remainder, if any, becomes the last chunk. A `max_chunk` of zero
    /// leaves the task whole.
    pub fn split(&self, max_chunk: u32) -> Vec<Task> {
        if max_chunk == 0 {
            return vec![self.clone()];
        }
        let full = self.duration / max_chunk;
        let remainder = self.duration % max_chunk;

        let mut chunks: Vec<Task> = (0..full)
            .map(|i| Task::new(format!("{}_{i}", self.name), max_chunk, self.deadline, self.priority))
            .collect();
        if remainder > 0 {
            chunks.push(Task::new(
                format!("{}_{full}", self.name),
                remainder,
                self.deadline,
                self.priority,
            ));
        }
        chunks
    }
}

/// Splits every task into chunks of at most `max_chunk` hours.
///
/// See [`Task::split`].
pub fn split_tasks(tasks: &[Task], max_chunk: u32) -> Vec<Task> {
    tasks.iter().flat_map(|t| t.split(max_chunk)).collect()
}
