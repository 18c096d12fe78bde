//! Scheduling pipeline and KPI evaluation.
//!
//! Drives a full run (validate, encode, solve, extract) and measures the
//! resulting schedule.
//!
//! # Pipeline
//!
//! `TimeslotScheduler` is a pure function of (tasks, grid, solver, config).
//! Independent runs may execute in parallel; a single run is sequential,
//! since the encoder needs the complete task set before building no-overlap
//! terms.
//!
//! # KPI
//!
//! `ScheduleKpi` computes priority coverage, utilization, favorite-hour use
//! and deadline slack.

mod kpi;
mod pipeline;

pub use kpi::ScheduleKpi;
pub use pipeline::{ScheduleOutcome, ScheduleRequest, SchedulerConfig, TimeslotScheduler};
