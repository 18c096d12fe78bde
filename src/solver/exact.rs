//! Exact branch-and-bound backend.
//!
//! # Algorithm
//! Depth-first search over task groups. Each group either takes one of
//! its starts whose slots are still free, or stays unscheduled. Groups are
//! visited by best achievable cost; starts within a group by cost.
//!
//! The bound is `cost_so_far + Σ best_cost(remaining groups)`, which never
//! overestimates the reachable improvement since all costs are negative.
//!
//! # Complexity
//! Exponential in the worst case; intended for small instances, tests,
//! and as a reference for heuristic backends.
//!
//! # Reference
//! Land & Doig (1960), "An Automatic Method of Solving Discrete
//! Programming Problems"

use std::time::Instant;

use tracing::debug;

use super::{RawAssignment, Solver, SolverConfig};
use crate::encoding::Problem;
use crate::error::SolverError;

const CLOCK_CHECK_INTERVAL: u64 = 4096;

/// Exact solver with optional node budget.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSolver {
    /// Maximum search nodes before giving up. `None` = unbounded.
    pub node_limit: Option<u64>,
}

impl ExactSolver {
    /// Creates an unbounded exact solver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the node budget.
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }
}

struct Search<'p> {
    problem: &'p Problem,
    /// Group indices in visiting order.
    order: Vec<usize>,
    /// Per group: variable indices sorted by cost.
    candidates: Vec<Vec<usize>>,
    /// `suffix_bound[k]` = Σ best cost of groups `order[k..]`.
    suffix_bound: Vec<f64>,
    occupied: Vec<bool>,
    chosen: Vec<usize>,
    best: Vec<usize>,
    best_cost: f64,
    nodes: u64,
    node_limit: Option<u64>,
    deadline: Option<Instant>,
}

enum Abort {
    Timeout,
    NodeLimit,
}

impl<'p> Search<'p> {
    fn new(problem: &'p Problem, node_limit: Option<u64>, deadline: Option<Instant>) -> Self {
        let candidates: Vec<Vec<usize>> = problem
            .groups
            .iter()
            .map(|g| {
                let mut vars: Vec<usize> = g.variables.clone().collect();
                vars.sort_by(|&a, &b| {
                    problem.variables[a]
                        .cost
                        .total_cmp(&problem.variables[b].cost)
                        .then(a.cmp(&b))
                });
                vars
            })
            .collect();

        let best_of = |g: usize| {
            candidates[g]
                .first()
                .map(|&v| problem.variables[v].cost.min(0.0))
                .unwrap_or(0.0)
        };

        let mut order: Vec<usize> = (0..problem.groups.len()).collect();
        order.sort_by(|&a, &b| best_of(a).total_cmp(&best_of(b)).then(a.cmp(&b)));

        let mut suffix_bound = vec![0.0; order.len() + 1];
        for k in (0..order.len()).rev() {
            suffix_bound[k] = suffix_bound[k + 1] + best_of(order[k]);
        }

        Self {
            problem,
            order,
            candidates,
            suffix_bound,
            occupied: vec![false; problem.horizon as usize],
            chosen: Vec::new(),
            best: Vec::new(),
            best_cost: 0.0,
            nodes: 0,
            node_limit,
            deadline,
        }
    }

    fn descend(&mut self, depth: usize, cost: f64) -> Result<(), Abort> {
        self.nodes += 1;
        if self.node_limit.is_some_and(|limit| self.nodes > limit) {
            return Err(Abort::NodeLimit);
        }
        if self.nodes % CLOCK_CHECK_INTERVAL == 0
            && self.deadline.is_some_and(|d| Instant::now() >= d)
        {
            return Err(Abort::Timeout);
        }

        if cost + self.suffix_bound[depth] >= self.best_cost - 1e-12 {
            return Ok(());
        }
        if depth == self.order.len() {
            self.best_cost = cost;
            self.best.clone_from(&self.chosen);
            return Ok(());
        }

        let group = self.order[depth];
        for k in 0..self.candidates[group].len() {
            let v = self.candidates[group][k];
            let range = self.problem.variables[v].range();
            let slots = range.start as usize..range.end as usize;
            if self.occupied[slots.clone()].iter().any(|o| *o) {
                continue;
            }
            self.occupied[slots.clone()].fill(true);
            self.chosen.push(v);
            let result = self.descend(depth + 1, cost + self.problem.variables[v].cost);
            self.chosen.pop();
            self.occupied[slots].fill(false);
            result?;
        }

        // Leave this task unscheduled
        self.descend(depth + 1, cost)
    }
}

impl Solver for ExactSolver {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn solve(&self, problem: &Problem, config: &SolverConfig) -> Result<RawAssignment, SolverError> {
        let mut search = Search::new(problem, self.node_limit, config.deadline_from_now());
        match search.descend(0, 0.0) {
            Ok(()) => {
                debug!(nodes = search.nodes, best_cost = search.best_cost, "exact search complete");
                Ok(RawAssignment::from_selected(problem, search.best))
            }
            Err(Abort::Timeout) => Err(SolverError::Timeout(config.timeout().unwrap_or_default())),
            Err(Abort::NodeLimit) => Err(SolverError::Failed(format!(
                "node limit of {} exhausted",
                search.nodes - 1
            ))),
        }
    }
}
