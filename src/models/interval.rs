//! Occupied time intervals.
//!
//! # Time Model
//! Minutes since midnight of the entry's calendar day. An interval that
//! runs past midnight keeps counting (an entry starting 23:30 for 90
//! minutes ends at minute 1530); it is still compared within its own day.

use serde::{Deserialize, Serialize};

use super::time::format_minutes;

/// A time-of-day interval [start, end).
///
/// Half-open: includes start, excludes end, so an interval ending at M
/// and another starting at M do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Interval start (minutes, inclusive).
    pub start: u32,
    /// Interval end (minutes, exclusive).
    pub end: u32,
}

impl Interval {
    /// Creates an interval from a start minute and a duration.
    pub fn from_start(start: u32, duration_minutes: u32) -> Self {
        Self {
            start,
            end: start.saturating_add(duration_minutes),
        }
    }

    /// Duration in minutes.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.end - self.start
    }

    /// Whether a minute falls within this interval.
    #[inline]
    pub fn contains(&self, minute: u32) -> bool {
        minute >= self.start && minute < self.end
    }

    /// Whether two intervals overlap: `s1 < e2 && e1 > s2`.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Start formatted as `HH:MM`.
    pub fn start_label(&self) -> String {
        format_minutes(self.start)
    }

    /// End formatted as `HH:MM`.
    pub fn end_label(&self) -> String {
        format_minutes(self.end)
    }
}
