//! Schedule quality metrics (KPIs).
//!
//! Computes performance indicators from a validated schedule, its input
//! tasks, and the grid it was placed on.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest end slot |
//! | Scheduled Priority | Sum of priorities of scheduled tasks |
//! | Priority Coverage | Scheduled priority / total priority |
//! | Utilization | Busy hours / available slots |
//! | Favorite Rate | Busy hours on favorite slots / busy hours |
//! | Avg Slack | Mean (deadline - end) over scheduled tasks |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use std::collections::HashMap;

use crate::models::{Schedule, Task, TimeGrid};

/// Schedule performance indicators.
///
/// All time values are in hours.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Latest end slot.
    pub makespan: u32,
    /// Number of scheduled tasks.
    pub scheduled_count: usize,
    /// Number of input tasks left out.
    pub unscheduled_count: usize,
    /// Sum of scheduled task priorities.
    pub scheduled_priority: f64,
    /// Fraction of total priority that got scheduled (0.0..1.0).
    pub priority_coverage: f64,
    /// Occupied hours.
    pub busy_hours: u32,
    /// Busy hours over usable slots (0.0..1.0).
    pub utilization: f64,
    /// Busy hours falling on favorite slots.
    pub favorite_hours_used: u32,
    /// Favorite hours used over busy hours (0.0..1.0).
    pub favorite_rate: f64,
    /// Mean hours between end and deadline.
    pub avg_slack_hours: f64,
}

impl ScheduleKpi {
    /// Computes KPIs.
    ///
    /// # Arguments
    /// * `schedule` - The validated schedule.
    /// * `tasks` - The input tasks (for priorities and deadlines).
    /// * `grid` - The grid the schedule was placed on.
    pub fn calculate(schedule: &Schedule, tasks: &[Task], grid: &TimeGrid) -> Self {
        let by_name: HashMap<&str, &Task> = tasks.iter().map(|t| (t.name.as_str(), t)).collect();

        let mut scheduled_priority = 0.0;
        let mut total_slack = 0.0;
        let mut favorite_hours_used = 0;
        for entry in &schedule.entries {
            scheduled_priority += entry.priority;
            favorite_hours_used += grid.favorite_hours_in(entry.range());
            if let Some(task) = by_name.get(entry.task.as_str()) {
                total_slack += task.deadline as f64 - entry.end as f64;
            }
        }

        let total_priority: f64 = tasks.iter().map(|t| t.priority).sum();
        let priority_coverage = if total_priority > 0.0 {
            scheduled_priority / total_priority
        } else {
            0.0
        };

        let busy_hours = schedule.busy_hours();
        let available = grid.available_slot_count();
        let utilization = if available == 0 {
            0.0
        } else {
            busy_hours as f64 / available as f64
        };
        let favorite_rate = if busy_hours == 0 {
            0.0
        } else {
            favorite_hours_used as f64 / busy_hours as f64
        };

        let scheduled_count = schedule.len();
        let avg_slack_hours = if scheduled_count == 0 {
            0.0
        } else {
            total_slack / scheduled_count as f64
        };

        Self {
            makespan: schedule.makespan(),
            scheduled_count,
            unscheduled_count: tasks.len().saturating_sub(scheduled_count),
            scheduled_priority,
            priority_coverage,
            busy_hours,
            utilization,
            favorite_hours_used,
            favorite_rate,
            avg_slack_hours,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_priority_coverage: f64, min_favorite_rate: f64) -> bool {
        self.priority_coverage >= min_priority_coverage && self.favorite_rate >= min_favorite_rate
    }
}
