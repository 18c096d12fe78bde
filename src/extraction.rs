//! Schedule extraction.
//!
//! Decodes a solver's raw 0/1 assignment into a [`Schedule`], re-checking
//! every hard constraint instead of trusting the backend:
//!
//! 1. The assignment must cover exactly the problem's variables.
//! 2. Each task may have at most one selected start. Tasks with several
//!    are dropped, not resolved arbitrarily.
//! 3. No two remaining placements may share a slot. Every task involved in
//!    an overlap is dropped.
//!
//! Every input task ends up either in the schedule or in `unscheduled`.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::encoding::Problem;
use crate::models::{Schedule, ScheduleEntry, Task, Violation};
use crate::solver::RawAssignment;

/// Result of decoding one assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Validated placements.
    pub schedule: Schedule,
    /// Tasks not in the schedule, for any reason.
    pub unscheduled: BTreeSet<String>,
    /// Constraint violations found in the assignment.
    pub violations: Vec<Violation>,
}

/// Decodes raw assignments against one problem.
pub struct ScheduleExtractor<'a> {
    problem: &'a Problem,
    tasks: &'a [Task],
}

impl<'a> ScheduleExtractor<'a> {
    /// Creates an extractor for the tasks `problem` was encoded from.
    pub fn new(problem: &'a Problem, tasks: &'a [Task]) -> Self {
        Self { problem, tasks }
    }

    /// Every task reported unscheduled, with no violations.
    pub fn nothing_scheduled(&self) -> Extraction {
        Extraction {
            schedule: Schedule::new(),
            unscheduled: self.all_task_names(),
            violations: Vec::new(),
        }
    }

    /// Decodes and validates an assignment.
    pub fn extract(&self, raw: &RawAssignment) -> Extraction {
        let expected = self.problem.variable_count();
        if raw.values.len() != expected {
            let message = format!(
                "assignment has {} values for {} decision variables",
                raw.values.len(),
                expected
            );
            warn!(%message, "discarding malformed assignment");
            let mut extraction = self.nothing_scheduled();
            extraction.violations.push(Violation::malformed(
                extraction.unscheduled.iter().cloned().collect(),
                message,
            ));
            return extraction;
        }

        let mut violations = Vec::new();
        let priorities: HashMap<&str, f64> = self
            .tasks
            .iter()
            .map(|t| (t.name.as_str(), t.priority))
            .collect();

        // At most one start per task
        let mut candidates = Vec::new();
        for group in &self.problem.groups {
            let selected: Vec<usize> = group
                .variables
                .clone()
                .filter(|&i| raw.values[i])
                .collect();
            match selected.as_slice() {
                [] => {}
                [i] => {
                    let v = &self.problem.variables[*i];
                    let priority = priorities
                        .get(v.task.as_str())
                        .copied()
                        .unwrap_or(group.priority);
                    candidates.push(ScheduleEntry::new(
                        &v.task,
                        v.start,
                        v.range().end,
                        priority,
                    ));
                }
                many => {
                    let starts: Vec<u32> = many
                        .iter()
                        .map(|&i| self.problem.variables[i].start)
                        .collect();
                    violations.push(Violation::multiple_starts(&group.task, &starts));
                }
            }
        }

        // No overlap between tasks
        candidates.sort_by(ScheduleEntry::canonical_cmp);
        let mut dropped: HashSet<usize> = HashSet::new();
        for a in 0..candidates.len() {
            for b in a + 1..candidates.len() {
                if candidates[a].range().overlaps(&candidates[b].range()) {
                    violations.push(Violation::overlap(&candidates[a], &candidates[b]));
                    dropped.insert(a);
                    dropped.insert(b);
                }
            }
        }

        for v in &violations {
            warn!(kind = ?v.violation_type, tasks = ?v.task_names, "{}", v.message);
        }

        let entries: Vec<ScheduleEntry> = candidates
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !dropped.contains(i))
            .map(|(_, e)| e)
            .collect();
        let schedule = Schedule::from_entries(entries);

        let unscheduled = self
            .all_task_names()
            .into_iter()
            .filter(|name| !schedule.contains_task(name))
            .collect();

        Extraction {
            schedule,
            unscheduled,
            violations,
        }
    }

    fn all_task_names(&self) -> BTreeSet<String> {
        self.tasks.iter().map(|t| t.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::ProblemEncoder;
    use crate::models::{TimeGrid, ViolationType};

    fn setup(tasks: &[Task], grid: &TimeGrid) -> Problem {
        ProblemEncoder::new(tasks, grid).encode().unwrap()
    }

    fn select(problem: &Problem, picks: &[(&str, u32)]) -> RawAssignment {
        RawAssignment::from_selected(
            problem,
            picks
                .iter()
                .map(|(t, s)| problem.variable_index(t, *s).unwrap()),
        )
    }

    #[test]
    fn test_extract_valid_assignment() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = vec![Task::new("A", 2, 10, 1.0), Task::new("B", 2, 4, 5.0)];
        let problem = setup(&tasks, &grid);
        let raw = select(&problem, &[("A", 5), ("B", 1)]);

        let out = ScheduleExtractor::new(&problem, &tasks).extract(&raw);
        assert!(out.violations.is_empty());
        assert!(out.unscheduled.is_empty());
        let names: Vec<&str> = out.schedule.entries.iter().map(|e| e.task.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(out.schedule.entry_for_task("A").unwrap().end, 7);
    }

    #[test]
    fn test_overlapping_tasks_dropped() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = vec![
            Task::new("A", 2, 10, 1.0),
            Task::new("B", 2, 4, 5.0),
            Task::new("C", 1, 24, 1.0),
        ];
        let problem = setup(&tasks, &grid);
        let raw = select(&problem, &[("A", 1), ("B", 0), ("C", 12)]);

        let out = ScheduleExtractor::new(&problem, &tasks).extract(&raw);
        assert_eq!(out.violations.len(), 1);
        let v = &out.violations[0];
        assert_eq!(v.violation_type, ViolationType::Overlap);
        assert!(v.task_names.contains(&"A".to_string()));
        assert!(v.task_names.contains(&"B".to_string()));

        assert_eq!(out.schedule.len(), 1);
        assert!(out.schedule.contains_task("C"));
        assert_eq!(
            out.unscheduled.iter().cloned().collect::<Vec<_>>(),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn test_chain_of_overlaps_drops_all_involved() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = vec![
            Task::new("A", 3, 24, 1.0),
            Task::new("B", 3, 24, 1.0),
            Task::new("C", 3, 24, 1.0),
        ];
        let problem = setup(&tasks, &grid);
        // A [0,3) B [2,5) C [4,7): A-B and B-C overlap, A-C do not
        let raw = select(&problem, &[("A", 0), ("B", 2), ("C", 4)]);

        let out = ScheduleExtractor::new(&problem, &tasks).extract(&raw);
        assert_eq!(out.violations.len(), 2);
        assert!(out.schedule.is_empty());
        assert_eq!(out.unscheduled.len(), 3);
    }

    #[test]
    fn test_multiple_starts_dropped() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = vec![Task::new("A", 1, 24, 1.0), Task::new("B", 1, 24, 1.0)];
        let problem = setup(&tasks, &grid);
        let raw = select(&problem, &[("A", 0), ("A", 5), ("B", 3)]);

        let out = ScheduleExtractor::new(&problem, &tasks).extract(&raw);
        assert_eq!(out.violations.len(), 1);
        assert_eq!(out.violations[0].violation_type, ViolationType::MultipleStarts);
        assert!(out.violations[0].message.contains("[0, 5]"));
        assert!(!out.schedule.contains_task("A"));
        assert!(out.schedule.contains_task("B"));
        assert!(out.unscheduled.contains("A"));
    }

    #[test]
    fn test_unschedulable_and_unselected_reported() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = vec![
            Task::new("too_long", 25, 48, 1.0),
            Task::new("idle", 1, 24, 1.0),
            Task::new("placed", 1, 24, 1.0),
        ];
        let problem = setup(&tasks, &grid);
        let raw = select(&problem, &[("placed", 4)]);

        let out = ScheduleExtractor::new(&problem, &tasks).extract(&raw);
        assert!(out.violations.is_empty());
        assert!(out.unscheduled.contains("too_long"));
        assert!(out.unscheduled.contains("idle"));
        assert_eq!(out.schedule.len(), 1);
    }

    #[test]
    fn test_malformed_assignment() {
        let grid = TimeGrid::always_available(1).unwrap();
        let tasks = vec![Task::new("A", 1, 24, 1.0)];
        let problem = setup(&tasks, &grid);
        let raw = RawAssignment {
            values: vec![true; 3],
            energy: 0.0,
        };

        let out = ScheduleExtractor::new(&problem, &tasks).extract(&raw);
        assert!(out.schedule.is_empty());
        assert_eq!(out.violations[0].violation_type, ViolationType::MalformedAssignment);
        assert!(out.unscheduled.contains("A"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let grid = TimeGrid::build(1, [2], [8]).unwrap();
        let tasks = vec![
            Task::new("A", 2, 10, 1.0),
            Task::new("B", 2, 12, 5.0),
            Task::new("C", 1, 12, 2.0),
        ];
        let problem = setup(&tasks, &grid);
        let raw = select(&problem, &[("A", 0), ("B", 8), ("C", 8)]);

        let extractor = ScheduleExtractor::new(&problem, &tasks);
        let first = extractor.extract(&raw);
        let second = extractor.extract(&raw);
        assert_eq!(first, second);
    }

    #[test]
    fn test_schedule_sorted_by_start() {
        let grid = TimeGrid::always_available(2).unwrap();
        let tasks = vec![
            Task::new("b", 1, 48, 1.0),
            Task::new("a", 1, 48, 1.0),
            Task::new("z", 1, 48, 3.0),
        ];
        let problem = setup(&tasks, &grid);
        let raw = select(&problem, &[("b", 30), ("a", 10), ("z", 2)]);

        let out = ScheduleExtractor::new(&problem, &tasks).extract(&raw);
        let names: Vec<&str> = out.schedule.entries.iter().map(|e| e.task.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "b"]);
    }
}
