//! Scheduling domain models.
//!
//! Provides the data types shared by every stage of the pipeline: the
//! tasks to place, the hourly grid they are placed on, and the validated
//! schedule that comes out.
//!
//! # Slot Model
//!
//! | Concept | Representation |
//! |---------|----------------|
//! | Horizon | `num_days * 24` hourly slots |
//! | Slot | `u32` index, hour `s % 24` of day `s / 24` |
//! | Placement | half-open [`SlotRange`] `[start, start + duration)` |

mod grid;
mod schedule;
mod task;

pub use grid::{SlotRange, SlotStatus, TimeGrid};
pub use schedule::{Schedule, ScheduleEntry, Violation, ViolationType};
pub use task::{split_tasks, Task};
