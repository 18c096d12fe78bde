//! Objective weighting.
//!
//! Priority and preference share one cost scale. The preference budget is
//! capped below one priority resolution step, so preference only breaks
//! ties between placements of equal priority value.
//!
//! # Formula
//!
//! For a variable placing task `t` at start `s`:
//!
//! ```text
//! budget     = priority_scale * priority_resolution * preference_share
//! preference = (favorite_weight * fav_fraction + earliness_weight * earliness)
//!              / (favorite_weight + earliness_weight)
//! cost       = -priority_scale * priority(t) - budget / n * preference
//! ```
//!
//! where `n` is the number of schedulable tasks, `fav_fraction` the share of
//! the task's hours on favorite slots and `earliness = 1 - s / horizon`.
//! The penalty for a violated constraint term is
//! `penalty_margin * (priority_scale * max_priority + budget)`.
//!
//! `priority_resolution` is a ceiling: the encoder applies
//! [`ObjectiveWeights::resolved_for`] so the effective value never exceeds
//! the smallest gap between distinct task priorities.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Explicit, overridable objective weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveWeights {
    /// Cost per unit of priority.
    pub priority_scale: f64,
    /// Smallest priority difference that preference must never override.
    pub priority_resolution: f64,
    /// Fraction of one resolution step given to preference, in `[0, 1)`.
    pub preference_share: f64,
    /// Relative weight of favorite-hour coverage.
    pub favorite_weight: f64,
    /// Relative weight of starting early.
    pub earliness_weight: f64,
    /// Penalty multiplier over the largest single-variable reward (> 1).
    pub penalty_margin: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self {
            priority_scale: 1.0,
            priority_resolution: 1.0,
            preference_share: 0.5,
            favorite_weight: 1.0,
            earliness_weight: 0.25,
            penalty_margin: 2.0,
        }
    }
}

impl ObjectiveWeights {
    /// Sets the priority scale.
    pub fn with_priority_scale(mut self, scale: f64) -> Self {
        self.priority_scale = scale;
        self
    }

    /// Sets the priority resolution.
    pub fn with_priority_resolution(mut self, resolution: f64) -> Self {
        self.priority_resolution = resolution;
        self
    }

    /// Sets the preference share.
    pub fn with_preference_share(mut self, share: f64) -> Self {
        self.preference_share = share;
        self
    }

    /// Sets favorite and earliness weights.
    pub fn with_preference_weights(mut self, favorite: f64, earliness: f64) -> Self {
        self.favorite_weight = favorite;
        self.earliness_weight = earliness;
        self
    }

    /// Sets the penalty margin.
    pub fn with_penalty_margin(mut self, margin: f64) -> Self {
        self.penalty_margin = margin;
        self
    }

    /// Checks that the weights keep priority dominant and penalties binding.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;

        if !positive(self.priority_scale) {
            return Err(invalid(format!("priority_scale must be > 0, got {}", self.priority_scale)));
        }
        if !positive(self.priority_resolution) {
            return Err(invalid(format!(
                "priority_resolution must be > 0, got {}",
                self.priority_resolution
            )));
        }
        if !(non_negative(self.preference_share) && self.preference_share < 1.0) {
            return Err(invalid(format!(
                "preference_share must be in [0, 1), got {}",
                self.preference_share
            )));
        }
        if !non_negative(self.favorite_weight) || !non_negative(self.earliness_weight) {
            return Err(invalid("preference weights must be finite and >= 0".to_string()));
        }
        if !(self.penalty_margin.is_finite() && self.penalty_margin > 1.0) {
            return Err(invalid(format!(
                "penalty_margin must be > 1, got {}",
                self.penalty_margin
            )));
        }
        Ok(())
    }

    /// Copy with `priority_resolution` lowered to the smallest positive gap
    /// between the given priorities, if that gap is finer.
    pub fn resolved_for(&self, priorities: &[f64]) -> Self {
        let mut sorted = priorities.to_vec();
        sorted.sort_by(f64::total_cmp);
        let smallest_gap = sorted
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|gap| *gap > 0.0)
            .fold(f64::INFINITY, f64::min);

        let mut resolved = self.clone();
        resolved.priority_resolution = self.priority_resolution.min(smallest_gap);
        resolved
    }

    /// Total preference bonus available to a whole schedule.
    #[inline]
    pub fn preference_budget(&self) -> f64 {
        self.priority_scale * self.priority_resolution * self.preference_share
    }

    /// Normalized preference of a placement, in `[0, 1]`.
    pub fn preference(&self, favorite_fraction: f64, earliness: f64) -> f64 {
        let total = self.favorite_weight + self.earliness_weight;
        if total <= 0.0 {
            return 0.0;
        }
        (self.favorite_weight * favorite_fraction + self.earliness_weight * earliness) / total
    }

    /// Reward for scheduling a task of the given priority (before preference).
    #[inline]
    pub fn priority_reward(&self, priority: f64) -> f64 {
        self.priority_scale * priority
    }

    /// Penalty per violated constraint term.
    pub fn penalty_weight(&self, max_priority: f64) -> f64 {
        self.penalty_margin * (self.priority_reward(max_priority) + self.preference_budget())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::InvalidWeights(message)
}
