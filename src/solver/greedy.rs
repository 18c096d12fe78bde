//! Cheapest-first greedy backend.
//!
//! # Algorithm
//! 1. Sort variables by cost ascending (index breaks ties).
//! 2. Select each variable not blocked by an earlier selection.
//! 3. Block the task's other starts and every overlapping placement.
//!
//! Each task gets at most one start and the result never violates a
//! penalty term.
//!
//! # Complexity
//! O(n log n + m) where n = variables, m = overlap terms.

use super::{RawAssignment, Solver, SolverConfig};
use crate::encoding::Problem;
use crate::error::SolverError;

/// Deterministic greedy backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver;

impl GreedySolver {
    /// Creates a new greedy solver.
    pub fn new() -> Self {
        Self
    }

    /// Greedy selection without the trait wrapper.
    pub fn select(problem: &Problem) -> Vec<bool> {
        let mut order: Vec<usize> = (0..problem.variable_count()).collect();
        order.sort_by(|&a, &b| {
            problem.variables[a]
                .cost
                .total_cmp(&problem.variables[b].cost)
                .then(a.cmp(&b))
        });

        let mut values = vec![false; problem.variable_count()];
        let mut blocked = vec![false; problem.variable_count()];
        for i in order {
            if blocked[i] || problem.variables[i].cost >= 0.0 {
                continue;
            }
            values[i] = true;
            let group = &problem.groups[problem.variables[i].group];
            blocked[group.variables.clone()].fill(true);
            for &j in problem.conflicts(i) {
                blocked[j] = true;
            }
        }
        values
    }
}

impl Solver for GreedySolver {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn solve(&self, problem: &Problem, _config: &SolverConfig) -> Result<RawAssignment, SolverError> {
        Ok(RawAssignment::from_values(problem, Self::select(problem)))
    }
}
