//! Time grid and slot ranges.
//!
//! Discretizes the horizon into hourly slots across `num_days` days and
//! classifies every slot as available, unavailable, or favorite.
//!
//! # Time Model
//! Slot `s` covers hour `s % 24` of day `s / 24`. Hour-of-day sets are
//! applied uniformly to every day of the horizon.
//!
//! # Precedence
//! Unavailable overrides favorite. An hour listed in both sets is a hard
//! constraint first; the conflict is logged, not rejected.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

/// A slot interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRange {
    /// First occupied slot (inclusive).
    pub start: u32,
    /// First slot after the range (exclusive).
    pub end: u32,
}

impl SlotRange {
    /// Creates a new slot range.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Range of `len` slots starting at `start`.
    pub fn starting_at(start: u32, len: u32) -> Self {
        Self::new(start, start + len)
    }

    /// Number of slots covered.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers no slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a slot falls within this range.
    #[inline]
    pub fn contains(&self, slot: u32) -> bool {
        slot >= self.start && slot < self.end
    }

    /// Whether two ranges share at least one slot.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Classification of a single hourly slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotStatus {
    /// Usable, no preference.
    Available,
    /// Hard constraint: no task may occupy this slot.
    Unavailable,
    /// Usable and preferred.
    Favorite,
}

/// Immutable hourly grid over the scheduling horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    num_days: u32,
    slots: Vec<SlotStatus>,
}

impl TimeGrid {
    /// Slots per day.
    pub const HOURS_PER_DAY: u32 = 24;

    /// Builds a grid of `num_days` days.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyHorizon`] if `num_days` is zero.
    /// - [`ConfigError::HourOutOfRange`] if any hour is outside `0..=23`.
    pub fn build(
        num_days: u32,
        unavailable_hours: impl IntoIterator<Item = i32>,
        favorite_hours: impl IntoIterator<Item = i32>,
    ) -> Result<Self, ConfigError> {
        if num_days == 0 {
            return Err(ConfigError::EmptyHorizon);
        }
        let unavailable = hour_set(unavailable_hours)?;
        let favorite = hour_set(favorite_hours)?;

        let conflicts: Vec<u32> = unavailable.intersection(&favorite).copied().collect();
        if !conflicts.is_empty() {
            warn!(
                hours = ?conflicts,
                "hours listed as both unavailable and favorite; treating them as unavailable"
            );
        }

        let mut day = [SlotStatus::Available; Self::HOURS_PER_DAY as usize];
        for &h in &favorite {
            day[h as usize] = SlotStatus::Favorite;
        }
        // Applied last: unavailable wins
        for &h in &unavailable {
            day[h as usize] = SlotStatus::Unavailable;
        }

        let slots = (0..num_days).flat_map(|_| day.iter().copied()).collect();
        Ok(Self { num_days, slots })
    }

    /// Grid with every slot available.
    pub fn always_available(num_days: u32) -> Result<Self, ConfigError> {
        Self::build(num_days, [], [])
    }

    /// Number of days in the horizon.
    pub fn num_days(&self) -> u32 {
        self.num_days
    }

    /// Total number of slots (`num_days * 24`).
    #[inline]
    pub fn horizon(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Status of a slot, `None` if outside the horizon.
    #[inline]
    pub fn status(&self, slot: u32) -> Option<SlotStatus> {
        self.slots.get(slot as usize).copied()
    }

    /// Whether a slot is unavailable. Slots beyond the horizon count as unavailable.
    #[inline]
    pub fn is_unavailable(&self, slot: u32) -> bool {
        !matches!(
            self.status(slot),
            Some(SlotStatus::Available | SlotStatus::Favorite)
        )
    }

    /// Whether a slot is a favorite hour.
    #[inline]
    pub fn is_favorite(&self, slot: u32) -> bool {
        self.status(slot) == Some(SlotStatus::Favorite)
    }

    /// Whether every slot of `range` lies within the horizon and is usable.
    pub fn range_is_available(&self, range: SlotRange) -> bool {
        range.end <= self.horizon() && (range.start..range.end).all(|s| !self.is_unavailable(s))
    }

    /// Number of favorite slots covered by `range`.
    pub fn favorite_hours_in(&self, range: SlotRange) -> u32 {
        (range.start..range.end.min(self.horizon()))
            .filter(|&s| self.is_favorite(s))
            .count() as u32
    }

    /// Number of slots a task may occupy.
    pub fn available_slot_count(&self) -> u32 {
        self.slots
            .iter()
            .filter(|s| **s != SlotStatus::Unavailable)
            .count() as u32
    }

    /// Number of favorite slots in the horizon.
    pub fn favorite_slot_count(&self) -> u32 {
        self.slots
            .iter()
            .filter(|s| **s == SlotStatus::Favorite)
            .count() as u32
    }

    /// Zero-based day of a slot.
    #[inline]
    pub fn day_of(slot: u32) -> u32 {
        slot / Self::HOURS_PER_DAY
    }

    /// Hour-of-day (0..=23) of a slot.
    #[inline]
    pub fn hour_of_day(slot: u32) -> u32 {
        slot % Self::HOURS_PER_DAY
    }

    /// Human-readable wall-clock label, e.g. `"day 2 09:00"` (days are 1-based).
    pub fn describe_slot(slot: u32) -> String {
        format!("day {} {:02}:00", Self::day_of(slot) + 1, Self::hour_of_day(slot))
    }
}

fn hour_set(hours: impl IntoIterator<Item = i32>) -> Result<BTreeSet<u32>, ConfigError> {
    hours
        .into_iter()
        .map(|h| {
            if (0..TimeGrid::HOURS_PER_DAY as i32).contains(&h) {
                Ok(h as u32)
            } else {
                Err(ConfigError::HourOutOfRange(h))
            }
        })
        .collect()
}
