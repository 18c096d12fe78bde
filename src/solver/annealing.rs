//! Simulated annealing backend.
//!
//! Implements `u_metaheur::sa::SaProblem` over a [`Problem`] and lets
//! `SaRunner` drive temperature, acceptance and cooling.
//!
//! # Representation
//! One optional start per task group. Every move keeps the placement
//! conflict-free, so the annealing cost (sum of variable costs) equals the
//! penalty energy of the decoded assignment.
//!
//! # Moves
//! - **Insert**: place an unselected variable, evicting its task's current
//!   start and every overlapping placement.
//! - **Relocate**: move a scheduled task to another of its starts.
//! - **Drop**: unschedule a task.
//!
//! # Schedule
//! Geometric cooling from `P` (the penalty weight) down to `P * 1e-4` over
//! `max_iterations` steps, starting from the greedy selection. The runner
//! keeps the best state visited, so the result is never worse than
//! [`GreedySolver`](super::GreedySolver). The time limit is delivered as the
//! runner's cancel token.
//!
//! # Reference
//! Kirkpatrick et al. (1983), "Optimization by Simulated Annealing"

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use rand::{Rng, RngExt};
use tracing::debug;
use u_metaheur::sa::{CoolingSchedule, SaConfig, SaProblem, SaRunner};

use super::{GreedySolver, RawAssignment, Solver, SolverConfig};
use crate::encoding::Problem;
use crate::error::SolverError;

/// Moves evaluated at each temperature level.
const ITERATIONS_PER_TEMPERATURE: u64 = 100;
/// Final temperature as a fraction of the initial one.
const COOLING_FLOOR: f64 = 1e-4;

/// Seeded simulated annealing backend.
#[derive(Debug, Clone, Copy)]
pub struct AnnealingSolver {
    /// Probability that a move on a scheduled start relocates it (vs. drops it).
    pub relocate_probability: f64,
}

impl Default for AnnealingSolver {
    fn default() -> Self {
        Self {
            relocate_probability: 0.5,
        }
    }
}

impl AnnealingSolver {
    /// Creates a solver with default move mix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the relocate move probability.
    pub fn with_relocate_probability(mut self, p: f64) -> Self {
        self.relocate_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Runner configuration for the given limits.
    fn sa_config(problem: &Problem, config: &SolverConfig) -> SaConfig {
        let t_start = problem.penalty_weight.max(f64::EPSILON);
        let iterations = config.max_iterations.max(1);
        let levels = (iterations / ITERATIONS_PER_TEMPERATURE).max(1);

        SaConfig::default()
            .with_initial_temperature(t_start)
            .with_min_temperature(t_start * COOLING_FLOOR)
            .with_cooling(CoolingSchedule::Geometric {
                alpha: COOLING_FLOOR.powf(1.0 / levels as f64),
            })
            .with_iterations_per_temperature(ITERATIONS_PER_TEMPERATURE as usize)
            .with_max_iterations(iterations as usize)
            .with_seed(config.seed)
    }
}

/// Per-group start selection: `placement[g]` is the chosen variable of group `g`.
type Placement = Vec<Option<usize>>;

/// Annealing view of a [`Problem`].
struct PlacementLandscape<'p> {
    problem: &'p Problem,
    relocate_probability: f64,
}

impl<'p> PlacementLandscape<'p> {
    fn new(problem: &'p Problem, relocate_probability: f64) -> Self {
        Self {
            problem,
            relocate_probability,
        }
    }

    /// First selected variable of each group.
    fn placement_of(&self, values: &[bool]) -> Placement {
        self.problem
            .groups
            .iter()
            .map(|g| g.variables.clone().find(|&i| values[i]))
            .collect()
    }

    fn values_of(&self, placement: &[Option<usize>]) -> Vec<bool> {
        let mut values = vec![false; self.problem.variable_count()];
        for &v in placement.iter().flatten() {
            values[v] = true;
        }
        values
    }

    /// Places `v`, evicting its task's current start and every overlapping placement.
    fn insert(&self, placement: &mut [Option<usize>], v: usize) {
        let range = self.problem.variables[v].range();
        for slot in placement.iter_mut() {
            if slot.is_some_and(|u| self.problem.variables[u].range().overlaps(&range)) {
                *slot = None;
            }
        }
        placement[self.problem.variables[v].group] = Some(v);
    }
}

impl SaProblem for PlacementLandscape<'_> {
    type Solution = Placement;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Placement {
        self.placement_of(&GreedySolver::select(self.problem))
    }

    fn cost(&self, placement: &Placement) -> f64 {
        placement
            .iter()
            .flatten()
            .map(|&v| self.problem.variables[v].cost)
            .sum()
    }

    fn neighbor<R: Rng>(&self, placement: &Placement, rng: &mut R) -> Placement {
        let mut next = placement.clone();
        let v = rng.random_range(0..self.problem.variable_count());
        let group = self.problem.variables[v].group;

        if placement[group] == Some(v) {
            if rng.random_bool(self.relocate_probability) {
                let target = rng.random_range(self.problem.groups[group].variables.clone());
                self.insert(&mut next, target);
            } else {
                next[group] = None;
            }
        } else {
            self.insert(&mut next, v);
        }
        next
    }
}

impl Solver for AnnealingSolver {
    fn name(&self) -> &'static str {
        "annealing"
    }

    fn solve(&self, problem: &Problem, config: &SolverConfig) -> Result<RawAssignment, SolverError> {
        if problem.is_empty() {
            return Ok(RawAssignment::empty(problem));
        }

        let landscape = PlacementLandscape::new(problem, self.relocate_probability);
        let sa_config = Self::sa_config(problem, config);
        let cancel = Arc::new(AtomicBool::new(false));
        let deadline = config.deadline_from_now();

        let result = thread::scope(|scope| {
            let (finished, watch) = mpsc::channel::<()>();
            if let Some(deadline) = deadline {
                let flag = Arc::clone(&cancel);
                scope.spawn(move || {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if let Err(RecvTimeoutError::Timeout) = watch.recv_timeout(remaining) {
                        flag.store(true, Ordering::Relaxed);
                    }
                });
            }
            let result = SaRunner::run_with_cancel(&landscape, &sa_config, Some(Arc::clone(&cancel)));
            drop(finished);
            result
        })
        .map_err(|e| SolverError::Failed(format!("invalid annealing schedule: {e}")))?;

        if result.cancelled {
            debug!(iterations = result.iterations, "annealing stopped at time limit");
        }
        debug!(
            iterations = result.iterations,
            accepted = result.accepted_moves,
            improving = result.improving_moves,
            best_cost = result.best_cost,
            "annealing finished"
        );
        Ok(RawAssignment::from_values(problem, landscape.values_of(&result.best)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, TimeGrid};
    use crate::solver::{testing, ExactSolver};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_annealing_is_feasible_and_not_worse_than_greedy() {
        let grid = TimeGrid::build(1, [6, 7], [3]).unwrap();
        let problem = testing::problem(&testing::contested_tasks(), &grid);
        let config = SolverConfig::default().with_max_iterations(20_000);

        let raw = AnnealingSolver::new().solve(&problem, &config).unwrap();
        assert!(problem.is_feasible(&raw.values));

        let greedy = problem.energy(&GreedySolver::select(&problem));
        assert!(raw.energy <= greedy + 1e-9);
    }

    #[test]
    fn test_annealing_is_reproducible_for_a_seed() {
        let grid = TimeGrid::always_available(1).unwrap();
        let problem = testing::problem(&testing::contested_tasks(), &grid);
        let config = SolverConfig::default()
            .without_timeout()
            .with_seed(11)
            .with_max_iterations(5_000);

        let a = AnnealingSolver::new().solve(&problem, &config).unwrap();
        let b = AnnealingSolver::new().solve(&problem, &config).unwrap();
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn test_annealing_finds_optimum_on_small_problem() {
        // Greedy puts B first at 0 and then cannot fit C before its deadline 3;
        // the optimum shifts B to start 3.
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = vec![Task::new("B", 2, 5, 5.0), Task::new("C", 3, 3, 4.0)];
        let problem = testing::problem(&tasks, &grid);
        let config = SolverConfig::default().without_timeout().with_max_iterations(50_000);

        let annealed = AnnealingSolver::new().solve(&problem, &config).unwrap();
        let exact = ExactSolver::new().solve(&problem, &config).unwrap();
        assert!((annealed.energy - exact.energy).abs() < 1e-9);
        assert_eq!(annealed.selected_count(), 2);
    }

    #[test]
    fn test_neighbors_stay_conflict_free() {
        let grid = TimeGrid::build(1, [6, 7], [3]).unwrap();
        let problem = testing::problem(&testing::contested_tasks(), &grid);
        let landscape = PlacementLandscape::new(&problem, 0.5);
        let mut rng = SmallRng::seed_from_u64(3);

        let mut placement = landscape.initial_solution(&mut rng);
        for _ in 0..500 {
            placement = landscape.neighbor(&placement, &mut rng);
            let values = landscape.values_of(&placement);
            assert!(problem.is_feasible(&values));
            assert!((landscape.cost(&placement) - problem.energy(&values)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_annealing_stops_at_time_limit_with_feasible_result() {
        let grid = TimeGrid::always_available(7).unwrap();
        let tasks: Vec<Task> = (0..30)
            .map(|i| Task::new(format!("t{i}"), 1 + i % 5, 7 * 24, 1.0 + (i % 7) as f64))
            .collect();
        let problem = testing::problem(&tasks, &grid);
        // Far more iterations than could finish before the deadline
        let config = SolverConfig::default()
            .with_timeout_ms(0)
            .with_max_iterations(1_000_000_000);

        let started = Instant::now();
        let raw = AnnealingSolver::new().solve(&problem, &config).unwrap();
        assert!(started.elapsed().as_secs() < 10);
        assert_eq!(raw.values.len(), problem.variable_count());
        assert!(problem.is_feasible(&raw.values));
        let greedy = problem.energy(&GreedySolver::select(&problem));
        assert!(raw.energy <= greedy + 1e-9);
    }
}
