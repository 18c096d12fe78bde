//! Solver-agnostic binary problem.
//!
//! A [`Problem`] is a quadratic unconstrained binary model: one binary
//! variable per eligible `(task, start)` placement, a linear cost per
//! variable, and pairwise penalty terms that fire when both variables of a
//! pair are selected.
//!
//! Only `NoOverlap` terms are stored. The `AtMostOneStart` terms between
//! starts of one task follow from [`TaskGroup`] ranges and are counted
//! implicitly; [`Problem::penalty_terms`] expands the full term list for
//! backends that need an explicit QUBO.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::models::SlotRange;

/// A candidate `(task, start)` placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionVariable {
    /// Task name.
    pub task: String,
    /// Index of the owning group in [`Problem::groups`].
    pub group: usize,
    /// Start slot.
    pub start: u32,
    /// Duration in hours.
    pub duration: u32,
    /// Favorite slots covered by this placement.
    pub favorite_hours: u32,
    /// Linear objective coefficient (lower = better).
    pub cost: f64,
}

impl DecisionVariable {
    /// Slots occupied by this placement.
    #[inline]
    pub fn range(&self) -> SlotRange {
        SlotRange::starting_at(self.start, self.duration)
    }
}

/// Which hard constraint a penalty term encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PenaltyKind {
    /// Two starts of the same task.
    AtMostOneStart,
    /// Two tasks whose slot ranges intersect.
    NoOverlap,
}

/// Quadratic term `weight * x_a * x_b` with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyTerm {
    /// First variable index.
    pub a: usize,
    /// Second variable index.
    pub b: usize,
    /// Encoded constraint.
    pub kind: PenaltyKind,
}

/// The variables belonging to one schedulable task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskGroup {
    /// Task name.
    pub task: String,
    /// Task priority.
    pub priority: f64,
    /// Contiguous variable indices.
    pub variables: Range<usize>,
}

/// Encoded scheduling problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Horizon length in slots.
    pub horizon: u32,
    /// Binary decision variables, grouped by task in input order.
    pub variables: Vec<DecisionVariable>,
    /// One group per schedulable task.
    pub groups: Vec<TaskGroup>,
    /// Overlap terms between placements of different tasks.
    pub penalties: Vec<PenaltyTerm>,
    /// Cost added per violated term.
    pub penalty_weight: f64,
    /// Tasks with no eligible start, excluded from the model.
    pub unschedulable: Vec<String>,
    /// variable → overlapping variables of other tasks.
    conflicts: Vec<Vec<usize>>,
}

impl Problem {
    /// Assembles a problem and indexes its conflict graph.
    pub fn new(
        horizon: u32,
        variables: Vec<DecisionVariable>,
        groups: Vec<TaskGroup>,
        penalties: Vec<PenaltyTerm>,
        penalty_weight: f64,
        unschedulable: Vec<String>,
    ) -> Self {
        let mut conflicts = vec![Vec::new(); variables.len()];
        for term in &penalties {
            conflicts[term.a].push(term.b);
            conflicts[term.b].push(term.a);
        }
        Self {
            horizon,
            variables,
            groups,
            penalties,
            penalty_weight,
            unschedulable,
            conflicts,
        }
    }

    /// Number of binary variables.
    #[inline]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Whether the model has nothing to decide.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Variables of other tasks whose slots overlap `index`.
    #[inline]
    pub fn conflicts(&self, index: usize) -> &[usize] {
        self.conflicts.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Group of a schedulable task.
    pub fn group(&self, task: &str) -> Option<&TaskGroup> {
        self.groups.iter().find(|g| g.task == task)
    }

    /// Candidate placements of a task (empty if unschedulable or unknown).
    pub fn variables_for_task(&self, task: &str) -> &[DecisionVariable] {
        self.group(task)
            .map(|g| &self.variables[g.variables.clone()])
            .unwrap_or(&[])
    }

    /// Index of the `(task, start)` variable, if eligible.
    pub fn variable_index(&self, task: &str, start: u32) -> Option<usize> {
        let group = self.group(task)?;
        group
            .variables
            .clone()
            .find(|&i| self.variables[i].start == start)
    }

    /// Linear objective of a selection.
    pub fn objective(&self, values: &[bool]) -> f64 {
        self.variables
            .iter()
            .zip(values)
            .filter(|(_, on)| **on)
            .map(|(v, _)| v.cost)
            .sum()
    }

    /// Every penalty term, including the implicit same-task pairs.
    pub fn penalty_terms(&self) -> impl Iterator<Item = PenaltyTerm> + '_ {
        let same_task = self.groups.iter().flat_map(|g| {
            let end = g.variables.end;
            g.variables.clone().flat_map(move |a| {
                (a + 1..end).map(move |b| PenaltyTerm {
                    a,
                    b,
                    kind: PenaltyKind::AtMostOneStart,
                })
            })
        });
        same_task.chain(self.penalties.iter().copied())
    }

    /// Total number of penalty terms, implicit ones included.
    pub fn penalty_term_count(&self) -> usize {
        let same_task: usize = self
            .groups
            .iter()
            .map(|g| g.variables.len() * g.variables.len().saturating_sub(1) / 2)
            .sum();
        same_task + self.penalties.len()
    }

    /// Number of penalty terms whose both variables are selected.
    pub fn violated_terms(&self, values: &[bool]) -> usize {
        let on = |i: usize| values.get(i).copied().unwrap_or(false);
        let overlaps = self
            .penalties
            .iter()
            .filter(|t| on(t.a) && on(t.b))
            .count();
        let same_task: usize = self
            .groups
            .iter()
            .map(|g| {
                let k = g.variables.clone().filter(|&i| on(i)).count();
                k * k.saturating_sub(1) / 2
            })
            .sum();
        overlaps + same_task
    }

    /// Objective plus weighted penalties.
    pub fn energy(&self, values: &[bool]) -> f64 {
        self.objective(values) + self.penalty_weight * self.violated_terms(values) as f64
    }

    /// Whether a selection satisfies every constraint term.
    pub fn is_feasible(&self, values: &[bool]) -> bool {
        self.violated_terms(values) == 0
    }

    /// Energy change from flipping variable `index` in `values`.
    pub fn flip_delta(&self, values: &[bool], index: usize) -> f64 {
        let delta = self.variables[index].cost
            + self.penalty_weight * self.active_conflicts(values, index) as f64;
        if values[index] {
            -delta
        } else {
            delta
        }
    }

    /// Selected variables sharing a penalty term with `index`.
    fn active_conflicts(&self, values: &[bool], index: usize) -> usize {
        let group = &self.groups[self.variables[index].group];
        let same_task = group
            .variables
            .clone()
            .filter(|&j| j != index && values[j])
            .count();
        let overlaps = self
            .conflicts(index)
            .iter()
            .filter(|&&j| values[j])
            .count();
        same_task + overlaps
    }
}
