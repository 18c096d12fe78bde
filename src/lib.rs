//! Hourly task-slot scheduling for the U-Engine ecosystem.
//!
//! Places tasks (duration, deadline, priority) onto hourly slots across a
//! multi-day horizon, honoring unavailable hours as hard constraints and
//! favorite hours as soft preferences.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `TimeGrid`, `SlotRange`,
//!   `Schedule`, `Violation`
//! - **`validation`**: Input integrity checks (names, durations, priorities)
//! - **`encoding`**: Binary quadratic problem encoding (`ProblemEncoder`)
//! - **`solver`**: Backend trait and built-in greedy / annealing / exact solvers
//! - **`extraction`**: Assignment decoding with hard-constraint re-validation
//! - **`scheduler`**: End-to-end pipeline with solver timeout, and KPIs
//! - **`error`**: `ConfigError` and `SolverError`
//!
//! # Architecture
//!
//! ```text
//! TimeGrid ─┐
//!           ├─► ProblemEncoder ─► Solver ─► ScheduleExtractor ─► Schedule
//! Tasks ────┘
//! ```
//!
//! The encoder's output is solver-agnostic: any backend able to minimize a
//! binary quadratic energy can implement `Solver`, local or remote.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Lucas (2014), "Ising formulations of many NP problems"

pub mod encoding;
pub mod error;
pub mod extraction;
pub mod models;
pub mod scheduler;
pub mod solver;
pub mod validation;

pub use error::{ConfigError, SolverError};
