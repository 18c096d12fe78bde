//! Binary problem encoding.
//!
//! Translates tasks and a time grid into a solver-agnostic quadratic binary
//! model. Any backend that can minimize
//!
//! ```text
//! E(x) = Σ cost_i x_i + P · Σ_(a,b) x_a x_b
//! ```
//!
//! over `x ∈ {0,1}^n` can consume the result. Hard constraints
//! (at-most-one-start, no-overlap) are quadratic penalties with `P` large
//! enough that any violation is worse than dropping an offending variable.
//! Same-task pairs are implied by [`TaskGroup`]; only overlap pairs are
//! stored.
//!
//! # Reference
//! - Lucas (2014), "Ising formulations of many NP problems"
//! - Glover et al. (2019), "Quantum Bridge Analytics I: a tutorial on
//!   formulating and using QUBO models"

mod encoder;
mod problem;
mod weights;

pub use encoder::ProblemEncoder;
pub use problem::{DecisionVariable, PenaltyKind, PenaltyTerm, Problem, TaskGroup};
pub use weights::ObjectiveWeights;
