//! Task-to-slot problem encoder.
//!
//! Builds a [`Problem`] from tasks and a [`TimeGrid`]:
//!
//! 1. Enumerate eligible starts per task (fits horizon, meets deadline,
//!    avoids unavailable slots). Tasks without any are pre-filtered as
//!    unschedulable.
//! 2. Emit one binary variable per eligible start with its objective cost.
//! 3. Emit a `NoOverlap` term for every pair of intersecting placements of
//!    two different tasks. Pairs of starts of one task stay implicit in
//!    their [`TaskGroup`].
//!
//! Preference never outweighs a priority difference present in the input:
//! the priority resolution is lowered to the smallest gap between distinct
//! priorities of the schedulable tasks when that gap is finer.

use tracing::debug;

use super::{DecisionVariable, ObjectiveWeights, PenaltyKind, PenaltyTerm, Problem, TaskGroup};
use crate::error::ConfigError;
use crate::models::{SlotRange, Task, TimeGrid};

/// Builds a binary scheduling problem from tasks and a grid.
///
/// # Example
/// ```
/// use u_timeslot::encoding::ProblemEncoder;
/// use u_timeslot::models::{Task, TimeGrid};
///
/// let tasks = vec![Task::new("A", 2, 10, 1.0), Task::new("B", 2, 4, 5.0)];
/// let grid = TimeGrid::always_available(1).unwrap();
/// let problem = ProblemEncoder::new(&tasks, &grid).encode().unwrap();
///
/// // A: starts 0..=8, B: starts 0..=2
/// assert_eq!(problem.variable_count(), 12);
/// assert!(problem.unschedulable.is_empty());
/// ```
pub struct ProblemEncoder<'a> {
    tasks: &'a [Task],
    grid: &'a TimeGrid,
    weights: ObjectiveWeights,
}

impl<'a> ProblemEncoder<'a> {
    /// Creates a new encoder with default weights.
    pub fn new(tasks: &'a [Task], grid: &'a TimeGrid) -> Self {
        Self {
            tasks,
            grid,
            weights: ObjectiveWeights::default(),
        }
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Eligible start slots of a task on this grid.
    pub fn eligible_starts(&self, task: &Task) -> Vec<u32> {
        let Some(latest) = task.latest_start(self.grid.horizon()) else {
            return Vec::new();
        };
        (0..=latest)
            .filter(|&s| {
                self.grid
                    .range_is_available(SlotRange::starting_at(s, task.duration))
            })
            .collect()
    }

    /// Encodes the problem.
    ///
    /// # Errors
    /// [`ConfigError::InvalidWeights`] if the weights fail validation.
    pub fn encode(&self) -> Result<Problem, ConfigError> {
        self.weights.validate()?;

        let mut schedulable: Vec<(&Task, Vec<u32>)> = Vec::new();
        let mut unschedulable = Vec::new();
        for task in self.tasks {
            let starts = self.eligible_starts(task);
            if starts.is_empty() {
                debug!(task = %task.name, "no eligible start; excluded from model");
                unschedulable.push(task.name.clone());
            } else {
                schedulable.push((task, starts));
            }
        }

        let priorities: Vec<f64> = schedulable.iter().map(|(t, _)| t.priority).collect();
        let weights = self.weights.resolved_for(&priorities);
        if weights.priority_resolution < self.weights.priority_resolution {
            debug!(
                configured = self.weights.priority_resolution,
                effective = weights.priority_resolution,
                "priority resolution lowered to the smallest priority gap"
            );
        }

        let horizon = self.grid.horizon();
        let share = if schedulable.is_empty() {
            0.0
        } else {
            weights.preference_budget() / schedulable.len() as f64
        };
        let max_priority = schedulable
            .iter()
            .map(|(t, _)| t.priority)
            .fold(0.0_f64, f64::max);

        let mut variables = Vec::new();
        let mut groups = Vec::with_capacity(schedulable.len());
        for (group, (task, starts)) in schedulable.iter().enumerate() {
            let first = variables.len();
            for &start in starts {
                let range = SlotRange::starting_at(start, task.duration);
                let favorite_hours = self.grid.favorite_hours_in(range);
                let favorite_fraction = favorite_hours as f64 / task.duration as f64;
                let earliness = 1.0 - start as f64 / horizon as f64;
                let cost = -weights.priority_reward(task.priority)
                    - share * weights.preference(favorite_fraction, earliness);

                variables.push(DecisionVariable {
                    task: task.name.clone(),
                    group,
                    start,
                    duration: task.duration,
                    favorite_hours,
                    cost,
                });
            }
            groups.push(TaskGroup {
                task: task.name.clone(),
                priority: task.priority,
                variables: first..variables.len(),
            });
        }

        let penalties = overlap_terms(&variables);
        let penalty_weight = weights.penalty_weight(max_priority);

        debug!(
            tasks = self.tasks.len(),
            variables = variables.len(),
            overlap_terms = penalties.len(),
            unschedulable = unschedulable.len(),
            penalty_weight,
            "encoded scheduling problem"
        );

        Ok(Problem::new(
            horizon,
            variables,
            groups,
            penalties,
            penalty_weight,
            unschedulable,
        ))
    }
}

/// Overlapping placements of different tasks, found by a sweep over starts.
fn overlap_terms(variables: &[DecisionVariable]) -> Vec<PenaltyTerm> {
    let mut by_start: Vec<usize> = (0..variables.len()).collect();
    by_start.sort_by_key(|&i| (variables[i].start, i));

    let mut terms = Vec::new();
    for (k, &a) in by_start.iter().enumerate() {
        let end = variables[a].range().end;
        // Sorted by start: later placements overlap `a` until one starts at its end
        for &b in by_start[k + 1..]
            .iter()
            .take_while(|&&b| variables[b].start < end)
        {
            if variables[a].group != variables[b].group {
                terms.push(PenaltyTerm {
                    a: a.min(b),
                    b: a.max(b),
                    kind: PenaltyKind::NoOverlap,
                });
            }
        }
    }
    terms.sort_by_key(|t| (t.a, t.b));
    terms
}
