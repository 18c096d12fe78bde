//! End-to-end scheduling run.
//!
//! # Algorithm
//!
//! 1. Validate task records (abort on failure).
//! 2. Optionally split tasks into chunks.
//! 3. Encode tasks and grid into a binary problem.
//! 4. Solve, bounded by the configured timeout.
//! 5. Extract and validate the schedule.
//!
//! Only configuration errors abort. A failed or timed-out solver yields an
//! outcome with every task unscheduled and `solver_error` set.

use std::collections::BTreeSet;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::encoding::{ObjectiveWeights, Problem, ProblemEncoder};
use crate::error::{ConfigError, SolverError};
use crate::extraction::{Extraction, ScheduleExtractor};
use crate::models::{split_tasks, Schedule, Task, TimeGrid, Violation};
use crate::solver::{RawAssignment, Solver, SolverConfig};
use crate::validation::validate_tasks;

/// Extra wait beyond the timeout for backends that stop cooperatively.
const RESULT_GRACE: Duration = Duration::from_millis(200);

/// Scheduler configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Objective weighting.
    pub weights: ObjectiveWeights,
    /// Solver limits.
    pub solver: SolverConfig,
    /// Split tasks into chunks of at most this many hours. `None` = keep whole.
    pub max_chunk_hours: Option<u32>,
}

impl SchedulerConfig {
    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the solver limits.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Enables task splitting.
    pub fn with_max_chunk_hours(mut self, hours: u32) -> Self {
        self.max_chunk_hours = Some(hours);
        self
    }
}

/// Input container for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Tasks to schedule.
    pub tasks: Vec<Task>,
    /// Horizon length in days.
    pub num_days: u32,
    /// Hours of day no task may occupy.
    pub unavailable_hours: Vec<i32>,
    /// Preferred hours of day.
    pub favorite_hours: Vec<i32>,
}

impl ScheduleRequest {
    /// Creates a request with no hour constraints.
    pub fn new(tasks: Vec<Task>, num_days: u32) -> Self {
        Self {
            tasks,
            num_days,
            unavailable_hours: Vec::new(),
            favorite_hours: Vec::new(),
        }
    }

    /// Sets the unavailable hours.
    pub fn with_unavailable_hours(mut self, hours: impl IntoIterator<Item = i32>) -> Self {
        self.unavailable_hours = hours.into_iter().collect();
        self
    }

    /// Sets the favorite hours.
    pub fn with_favorite_hours(mut self, hours: impl IntoIterator<Item = i32>) -> Self {
        self.favorite_hours = hours.into_iter().collect();
        self
    }

    /// Builds the grid described by this request.
    pub fn grid(&self) -> Result<TimeGrid, ConfigError> {
        TimeGrid::build(
            self.num_days,
            self.unavailable_hours.iter().copied(),
            self.favorite_hours.iter().copied(),
        )
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    /// Validated schedule.
    pub schedule: Schedule,
    /// Every task not in the schedule.
    pub unscheduled: BTreeSet<String>,
    /// Tasks with no eligible start on the grid (subset of `unscheduled`).
    pub unschedulable: Vec<String>,
    /// Constraint violations found in the solver's answer.
    pub violations: Vec<Violation>,
    /// Backend that produced the assignment.
    pub solver: String,
    /// Energy reported by the backend, if it answered.
    pub energy: Option<f64>,
    /// Backend failure, if any. Set means the run is degraded.
    pub solver_error: Option<SolverError>,
    /// Tasks as scheduled (after splitting).
    pub tasks: Vec<Task>,
}

impl ScheduleOutcome {
    /// Whether the solver failed and the schedule is a fallback.
    pub fn is_degraded(&self) -> bool {
        self.solver_error.is_some()
    }

    /// Whether the solver answered and its answer needed no repair.
    pub fn is_clean(&self) -> bool {
        !self.is_degraded() && self.violations.is_empty()
    }
}

/// Scheduler driving encode → solve → extract.
///
/// # Example
///
/// ```
/// use u_timeslot::models::Task;
/// use u_timeslot::scheduler::{ScheduleRequest, TimeslotScheduler};
/// use u_timeslot::solver::GreedySolver;
///
/// let request = ScheduleRequest::new(
///     vec![Task::new("A", 2, 10, 1.0), Task::new("B", 2, 4, 5.0)],
///     1,
/// );
/// let outcome = TimeslotScheduler::new(GreedySolver::new())
///     .schedule_request(&request)
///     .unwrap();
/// assert_eq!(outcome.schedule.len(), 2);
/// assert!(outcome.is_clean());
/// ```
#[derive(Debug, Clone)]
pub struct TimeslotScheduler {
    solver: Arc<dyn Solver>,
    config: SchedulerConfig,
}

impl TimeslotScheduler {
    /// Creates a scheduler with default configuration.
    pub fn new(solver: impl Solver + 'static) -> Self {
        Self::with_shared_solver(Arc::new(solver))
    }

    /// Creates a scheduler around an already shared backend.
    pub fn with_shared_solver(solver: Arc<dyn Solver>) -> Self {
        Self {
            solver,
            config: SchedulerConfig::default(),
        }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Schedules a request, building its grid first.
    pub fn schedule_request(&self, request: &ScheduleRequest) -> Result<ScheduleOutcome, ConfigError> {
        let grid = request.grid()?;
        self.schedule(&request.tasks, &grid)
    }

    /// Schedules tasks on a grid.
    ///
    /// # Errors
    /// [`ConfigError`] for invalid tasks or weights. Solver problems are
    /// reported on the outcome instead.
    pub fn schedule(&self, tasks: &[Task], grid: &TimeGrid) -> Result<ScheduleOutcome, ConfigError> {
        validate_tasks(tasks).map_err(ConfigError::InvalidTasks)?;
        let tasks = match self.config.max_chunk_hours {
            Some(chunk) if chunk > 0 => {
                let chunks = split_tasks(tasks, chunk);
                // Chunk names may collide with existing task names
                validate_tasks(&chunks).map_err(ConfigError::InvalidTasks)?;
                chunks
            }
            _ => tasks.to_vec(),
        };

        let problem = Arc::new(
            ProblemEncoder::new(&tasks, grid)
                .with_weights(self.config.weights.clone())
                .encode()?,
        );

        let (extraction, energy, solver_error) = match self.solve(Arc::clone(&problem)) {
            Ok(raw) => {
                let extraction = ScheduleExtractor::new(&problem, &tasks).extract(&raw);
                (extraction, Some(raw.energy), None)
            }
            Err(err) => {
                warn!(solver = self.solver.name(), error = %err, "solver failed; no task scheduled");
                let extraction = ScheduleExtractor::new(&problem, &tasks).nothing_scheduled();
                (extraction, None, Some(err))
            }
        };
        let Extraction {
            schedule,
            unscheduled,
            violations,
        } = extraction;

        info!(
            solver = self.solver.name(),
            tasks = tasks.len(),
            scheduled = schedule.len(),
            unscheduled = unscheduled.len(),
            violations = violations.len(),
            degraded = solver_error.is_some(),
            "scheduling run complete"
        );

        Ok(ScheduleOutcome {
            schedule,
            unscheduled,
            unschedulable: problem.unschedulable.clone(),
            violations,
            solver: self.solver.name().to_string(),
            energy,
            solver_error,
            tasks,
        })
    }

    /// Runs the backend, bounded by the configured timeout.
    fn solve(&self, problem: Arc<Problem>) -> Result<RawAssignment, SolverError> {
        if problem.is_empty() {
            return Ok(RawAssignment::empty(&problem));
        }
        let config = self.config.solver.clone();
        let Some(limit) = config.timeout() else {
            return self.solver.solve(&problem, &config);
        };

        let (tx, rx) = mpsc::channel();
        let solver = Arc::clone(&self.solver);
        thread::Builder::new()
            .name(format!("{}-solver", solver.name()))
            .spawn(move || {
                // Receiver may be gone after a timeout
                let _ = tx.send(solver.solve(&problem, &config));
            })
            .map_err(|e| SolverError::Unavailable(format!("cannot start solver thread: {e}")))?;

        match rx.recv_timeout(limit + RESULT_GRACE) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(SolverError::Timeout(limit)),
            Err(RecvTimeoutError::Disconnected) => {
                Err(SolverError::Failed("solver thread terminated without a result".into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SlotRange, ViolationType};
    use crate::solver::{AnnealingSolver, ExactSolver, GreedySolver};
    use crate::validation::ValidationErrorKind;
    use rand::rngs::SmallRng;
    use rand::{RngExt, SeedableRng};

    /// Returns a fixed list of placements regardless of the problem.
    #[derive(Debug)]
    struct ScriptedSolver(Vec<(&'static str, u32)>);

    impl Solver for ScriptedSolver {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn solve(&self, problem: &Problem, _config: &SolverConfig) -> Result<RawAssignment, SolverError> {
            let picks = self
                .0
                .iter()
                .filter_map(|(task, start)| problem.variable_index(task, *start));
            Ok(RawAssignment::from_selected(problem, picks))
        }
    }

    #[derive(Debug)]
    struct SlowSolver(Duration);

    impl Solver for SlowSolver {
        fn name(&self) -> &'static str {
            "slow"
        }

        fn solve(&self, problem: &Problem, _config: &SolverConfig) -> Result<RawAssignment, SolverError> {
            thread::sleep(self.0);
            Ok(RawAssignment::empty(problem))
        }
    }

    #[derive(Debug)]
    struct OfflineSolver;

    impl Solver for OfflineSolver {
        fn name(&self) -> &'static str {
            "offline"
        }

        fn solve(&self, _problem: &Problem, _config: &SolverConfig) -> Result<RawAssignment, SolverError> {
            Err(SolverError::Unavailable("connection refused".into()))
        }
    }

    fn scenario_tasks() -> Vec<Task> {
        vec![Task::new("A", 2, 10, 1.0), Task::new("B", 2, 4, 5.0)]
    }

    fn backends() -> Vec<Arc<dyn Solver>> {
        vec![
            Arc::new(GreedySolver::new()) as Arc<dyn Solver>,
            Arc::new(AnnealingSolver::new()) as Arc<dyn Solver>,
            Arc::new(ExactSolver::new()) as Arc<dyn Solver>,
        ]
    }

    fn fast_config() -> SchedulerConfig {
        SchedulerConfig::default().with_solver(SolverConfig::default().with_max_iterations(5_000))
    }

    /// Checks every structural guarantee of an outcome.
    fn assert_well_formed(outcome: &ScheduleOutcome, tasks: &[Task], grid: &TimeGrid) {
        let entries = &outcome.schedule.entries;
        for e in entries {
            let task = tasks.iter().find(|t| t.name == e.task).unwrap();
            assert_eq!(e.duration(), task.duration);
            assert!(e.end <= grid.horizon(), "{} leaves the horizon", e.task);
            assert!(e.end <= task.deadline, "{} misses its deadline", e.task);
            assert!(grid.range_is_available(SlotRange::new(e.start, e.end)));
        }
        assert!(!outcome.schedule.has_overlap());

        let mut names: Vec<&str> = entries.iter().map(|e| e.task.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), entries.len(), "task scheduled twice");

        for task in tasks {
            let scheduled = outcome.schedule.contains_task(&task.name);
            assert_ne!(scheduled, outcome.unscheduled.contains(&task.name));
        }
        assert!(entries.windows(2).all(|w| w[0].start <= w[1].start));
    }

    fn random_instance(rng: &mut SmallRng, max_tasks: usize, num_days: u32) -> (Vec<Task>, TimeGrid) {
        let horizon = num_days * 24;
        let count = rng.random_range(2..=max_tasks);
        let tasks = (0..count)
            .map(|i| {
                Task::new(
                    format!("T{i}"),
                    rng.random_range(1..=5),
                    rng.random_range(1..=horizon + 4),
                    rng.random_range(1..=5) as f64,
                )
            })
            .collect();
        let unavailable: Vec<i32> = (0..24).filter(|_| rng.random_bool(0.3)).collect();
        let favorite: Vec<i32> = (0..24).filter(|_| rng.random_bool(0.2)).collect();
        (tasks, TimeGrid::build(num_days, unavailable, favorite).unwrap())
    }

    #[test]
    fn test_both_fit_without_overlap() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = scenario_tasks();
        for solver in backends() {
            let outcome = TimeslotScheduler::with_shared_solver(solver)
                .with_config(fast_config())
                .schedule(&tasks, &grid)
                .unwrap();
            assert_eq!(outcome.schedule.len(), 2, "{} dropped a task", outcome.solver);
            assert!(outcome.is_clean());
            assert_well_formed(&outcome, &tasks, &grid);
        }
    }

    #[test]
    fn test_task_longer_than_horizon_is_unscheduled() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = vec![Task::new("marathon", 30, 48, 3.0)];
        let outcome = TimeslotScheduler::new(GreedySolver::new())
            .schedule(&tasks, &grid)
            .unwrap();
        assert!(outcome.schedule.is_empty());
        assert!(outcome.unscheduled.contains("marathon"));
        assert_eq!(outcome.unschedulable, vec!["marathon".to_string()]);
        assert!(!outcome.is_degraded());
    }

    #[test]
    fn test_all_hours_unavailable() {
        let request = ScheduleRequest::new(scenario_tasks(), 3).with_unavailable_hours(0..24);
        // Never consulted: nothing to decide
        let outcome = TimeslotScheduler::new(OfflineSolver)
            .schedule_request(&request)
            .unwrap();
        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.unscheduled.len(), 2);
        assert_eq!(outcome.unschedulable.len(), 2);
        assert!(!outcome.is_degraded());
    }

    #[test]
    fn test_overlapping_solver_answer_is_rejected() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = scenario_tasks();
        let outcome = TimeslotScheduler::new(ScriptedSolver(vec![("A", 1), ("B", 0)]))
            .schedule(&tasks, &grid)
            .unwrap();

        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.violations.len(), 1);
        let v = &outcome.violations[0];
        assert_eq!(v.violation_type, ViolationType::Overlap);
        assert!(v.task_names.contains(&"A".to_string()));
        assert!(v.task_names.contains(&"B".to_string()));
        assert!(!outcome.is_clean());
        assert!(!outcome.is_degraded());
    }

    #[test]
    fn test_solver_timeout_degrades_run() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = scenario_tasks();
        let config = SchedulerConfig::default()
            .with_solver(SolverConfig::default().with_timeout_ms(20));
        let outcome = TimeslotScheduler::new(SlowSolver(Duration::from_secs(3)))
            .with_config(config)
            .schedule(&tasks, &grid)
            .unwrap();

        assert!(outcome.is_degraded());
        assert_eq!(
            outcome.solver_error,
            Some(SolverError::Timeout(Duration::from_millis(20)))
        );
        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.unscheduled.len(), 2);
        assert_eq!(outcome.energy, None);
    }

    #[test]
    fn test_solver_unavailable_degrades_run() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = scenario_tasks();
        let outcome = TimeslotScheduler::new(OfflineSolver)
            .schedule(&tasks, &grid)
            .unwrap();
        assert!(matches!(outcome.solver_error, Some(SolverError::Unavailable(_))));
        assert_eq!(outcome.unscheduled.len(), 2);
        assert_eq!(outcome.solver, "offline");
    }

    #[test]
    fn test_solver_without_timeout_runs_inline() {
        let grid = TimeGrid::always_available(1).unwrap();
        let config = SchedulerConfig::default().with_solver(SolverConfig::default().without_timeout());
        let outcome = TimeslotScheduler::new(GreedySolver::new())
            .with_config(config)
            .schedule(&scenario_tasks(), &grid)
            .unwrap();
        assert_eq!(outcome.schedule.len(), 2);
        assert!(outcome.energy.is_some());
    }

    #[test]
    fn test_config_errors_abort() {
        let scheduler = TimeslotScheduler::new(GreedySolver::new());

        let empty = ScheduleRequest::new(scenario_tasks(), 0);
        assert_eq!(scheduler.schedule_request(&empty), Err(ConfigError::EmptyHorizon));

        let bad_hour = ScheduleRequest::new(scenario_tasks(), 1).with_favorite_hours([25]);
        assert_eq!(
            scheduler.schedule_request(&bad_hour),
            Err(ConfigError::HourOutOfRange(25))
        );

        let duplicate = ScheduleRequest::new(
            vec![Task::new("A", 1, 5, 1.0), Task::new("A", 1, 5, 1.0)],
            1,
        );
        assert!(matches!(
            scheduler.schedule_request(&duplicate),
            Err(ConfigError::InvalidTasks(_))
        ));

        let weights = SchedulerConfig::default()
            .with_weights(ObjectiveWeights::default().with_preference_share(2.0));
        let grid = TimeGrid::always_available(1).unwrap();
        assert!(matches!(
            scheduler.clone().with_config(weights).schedule(&scenario_tasks(), &grid),
            Err(ConfigError::InvalidWeights(_))
        ));
    }

    #[test]
    fn test_unavailable_hour_listed_as_favorite_stays_blocked() {
        let request = ScheduleRequest::new(vec![Task::new("focus", 1, 24, 1.0)], 1)
            .with_unavailable_hours([9])
            .with_favorite_hours([9, 15]);
        let outcome = TimeslotScheduler::new(ExactSolver::new())
            .schedule_request(&request)
            .unwrap();
        let entry = outcome.schedule.entry_for_task("focus").unwrap();
        assert_eq!(entry.start, 15);
    }

    #[test]
    fn test_small_priority_gap_beats_favorite_hour() {
        // H fills [0, 10); L could take the favorite hour instead
        let request = ScheduleRequest::new(
            vec![Task::new("H", 10, 10, 1.1), Task::new("L", 1, 6, 1.0)],
            1,
        )
        .with_favorite_hours([5]);
        for solver in backends() {
            let outcome = TimeslotScheduler::with_shared_solver(Arc::clone(&solver))
                .with_config(fast_config())
                .schedule_request(&request)
                .unwrap();
            assert!(outcome.schedule.contains_task("H"), "{} dropped H", solver.name());
            assert!(outcome.unscheduled.contains("L"));
        }
    }

    #[test]
    fn test_favorite_hours_preferred() {
        let request = ScheduleRequest::new(vec![Task::new("deep_work", 2, 24, 1.0)], 1)
            .with_favorite_hours([14, 15]);
        let outcome = TimeslotScheduler::new(GreedySolver::new())
            .schedule_request(&request)
            .unwrap();
        assert_eq!(outcome.schedule.entries[0].start, 14);
        assert_eq!(outcome.schedule.entries[0].end, 16);
    }

    #[test]
    fn test_chunked_tasks() {
        let grid = TimeGrid::always_available(1).unwrap();
        let config = SchedulerConfig::default().with_max_chunk_hours(2);
        let outcome = TimeslotScheduler::new(GreedySolver::new())
            .with_config(config)
            .schedule(&[Task::new("essay", 5, 24, 2.0)], &grid)
            .unwrap();

        let names: Vec<&str> = outcome.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["essay_0", "essay_1", "essay_2"]);
        assert_eq!(outcome.schedule.len(), 3);
        assert_eq!(outcome.schedule.busy_hours(), 5);
        assert_well_formed(&outcome, &outcome.tasks, &grid);
    }

    #[test]
    fn test_chunk_name_collision_rejected() {
        let grid = TimeGrid::always_available(1).unwrap();
        let config = SchedulerConfig::default().with_max_chunk_hours(1);
        // "a" -> a_0, a_1 ; "a_1" -> a_1_0
        let tasks = vec![Task::new("a", 2, 24, 1.0), Task::new("a_1", 1, 24, 1.0)];
        let result = TimeslotScheduler::new(GreedySolver::new())
            .with_config(config)
            .schedule(&tasks, &grid);
        match result {
            Err(ConfigError::InvalidTasks(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateName);
                assert!(errors[0].message.contains("a_1"));
            }
            other => panic!("expected a chunk name collision, got {other:?}"),
        }
    }

    #[test]
    fn test_random_instances_are_well_formed() {
        let mut rng = SmallRng::seed_from_u64(2024);
        for _ in 0..20 {
            let (tasks, grid) = random_instance(&mut rng, 8, 2);
            for solver in [
                Arc::new(GreedySolver::new()) as Arc<dyn Solver>,
                Arc::new(AnnealingSolver::new()) as Arc<dyn Solver>,
            ] {
                let outcome = TimeslotScheduler::with_shared_solver(solver)
                    .with_config(fast_config())
                    .schedule(&tasks, &grid)
                    .unwrap();
                assert!(outcome.is_clean());
                assert_well_formed(&outcome, &tasks, &grid);
            }
        }
    }

    #[test]
    fn test_exact_matches_structure_on_small_instances() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..15 {
            let (tasks, grid) = random_instance(&mut rng, 4, 1);
            let outcome = TimeslotScheduler::new(ExactSolver::new())
                .schedule(&tasks, &grid)
                .unwrap();
            assert!(outcome.is_clean());
            assert_well_formed(&outcome, &tasks, &grid);
        }
    }

    #[test]
    fn test_raising_priority_keeps_task_scheduled() {
        let mut rng = SmallRng::seed_from_u64(99);
        let scheduler = TimeslotScheduler::new(ExactSolver::new());
        for _ in 0..10 {
            let (tasks, grid) = random_instance(&mut rng, 4, 1);
            let before = scheduler.schedule(&tasks, &grid).unwrap();

            for entry in &before.schedule.entries {
                let boosted: Vec<Task> = tasks
                    .iter()
                    .map(|t| {
                        if t.name == entry.task {
                            t.clone().with_priority(t.priority + 2.0)
                        } else {
                            t.clone()
                        }
                    })
                    .collect();
                let after = scheduler.schedule(&boosted, &grid).unwrap();
                assert!(
                    after.schedule.contains_task(&entry.task),
                    "{} dropped after raising its priority",
                    entry.task
                );
            }
        }
    }

    #[test]
    fn test_higher_priority_wins_contested_window() {
        // Three free hours, two 2-hour tasks: only one fits
        let request = ScheduleRequest::new(
            vec![Task::new("minor", 2, 24, 1.0), Task::new("major", 2, 24, 3.0)],
            1,
        )
        .with_unavailable_hours(3..24)
        .with_favorite_hours([0, 1]);
        for solver in backends() {
            let outcome = TimeslotScheduler::with_shared_solver(solver)
                .with_config(fast_config())
                .schedule_request(&request)
                .unwrap();
            assert!(outcome.schedule.contains_task("major"));
            assert!(outcome.unscheduled.contains("minor"));
        }
    }

    #[test]
    fn test_config_from_json() {
        let config: SchedulerConfig = serde_json::from_str(
            r#"{
                "weights": { "favorite_weight": 2.0 },
                "solver": { "timeout_ms": 1000, "seed": 5 },
                "max_chunk_hours": 1
            }"#,
        )
        .unwrap();
        assert_eq!(config.weights.favorite_weight, 2.0);
        assert_eq!(config.weights.penalty_margin, 2.0);
        assert_eq!(config.solver.timeout(), Some(Duration::from_secs(1)));
        assert_eq!(config.max_chunk_hours, Some(1));

        let defaults: SchedulerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, SchedulerConfig::default());
    }
}
