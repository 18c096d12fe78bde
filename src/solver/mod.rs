//! Solver interface and built-in backends.
//!
//! The pipeline only depends on the [`Solver`] trait. A backend receives a
//! [`Problem`] and returns a [`RawAssignment`]: one 0/1 value per decision
//! variable plus an opaque energy. Results are treated as best effort and
//! re-validated by the extractor.
//!
//! # Backends
//!
//! | Backend | Strategy | Guarantees |
//! |---------|----------|------------|
//! | [`GreedySolver`] | cheapest-first, skip conflicts | feasible, deterministic |
//! | [`AnnealingSolver`] | `u_metaheur` simulated annealing over conflict-free placements | feasible, seeded |
//! | [`ExactSolver`] | branch-and-bound over task placements | optimal within its limits |
//!
//! # References
//! - Kirkpatrick et al. (1983), "Optimization by Simulated Annealing"
//! - Land & Doig (1960), "An Automatic Method of Solving Discrete
//!   Programming Problems"

mod annealing;
mod exact;
mod greedy;

pub use annealing::AnnealingSolver;
pub use exact::ExactSolver;
pub use greedy::GreedySolver;

use std::fmt::Debug;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::encoding::Problem;
use crate::error::SolverError;

/// An optimization backend.
///
/// Implementations may be local heuristics, exact solvers, or clients of a
/// remote optimization service. They must not retain state between calls.
pub trait Solver: Send + Sync + Debug {
    /// Backend name (e.g., "greedy", "annealing").
    fn name(&self) -> &'static str;

    /// Minimizes the problem energy.
    ///
    /// # Errors
    /// [`SolverError`] when the backend is unreachable, times out, or
    /// cannot produce an assignment.
    fn solve(&self, problem: &Problem, config: &SolverConfig) -> Result<RawAssignment, SolverError>;
}

/// Solver run limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock limit in milliseconds. `None` = unbounded.
    pub timeout_ms: Option<u64>,
    /// Seed for randomized backends.
    pub seed: u64,
    /// Iteration budget for iterative backends.
    pub max_iterations: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: Some(30_000),
            seed: 42,
            max_iterations: 200_000,
        }
    }
}

impl SolverConfig {
    /// Sets the wall-clock limit.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Removes the wall-clock limit.
    pub fn without_timeout(mut self) -> Self {
        self.timeout_ms = None;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Wall-clock limit as a duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Instant at which a run started now must stop.
    pub fn deadline_from_now(&self) -> Option<Instant> {
        self.timeout().map(|t| Instant::now() + t)
    }
}

/// Raw solver output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawAssignment {
    /// Value per decision variable, indexed like [`Problem::variables`].
    pub values: Vec<bool>,
    /// Backend-reported quality metric (lower = better).
    pub energy: f64,
}

impl RawAssignment {
    /// Wraps values, computing the energy against `problem`.
    pub fn from_values(problem: &Problem, values: Vec<bool>) -> Self {
        let energy = problem.energy(&values);
        Self { values, energy }
    }

    /// Assignment selecting exactly the given variable indices.
    ///
    /// Out-of-range indices are ignored.
    pub fn from_selected(problem: &Problem, selected: impl IntoIterator<Item = usize>) -> Self {
        let mut values = vec![false; problem.variable_count()];
        for i in selected {
            if let Some(v) = values.get_mut(i) {
                *v = true;
            }
        }
        Self::from_values(problem, values)
    }

    /// Assignment selecting nothing.
    pub fn empty(problem: &Problem) -> Self {
        Self::from_values(problem, vec![false; problem.variable_count()])
    }

    /// Indices of selected variables.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| i)
    }

    /// Number of selected variables.
    pub fn selected_count(&self) -> usize {
        self.values.iter().filter(|on| **on).count()
    }
}
