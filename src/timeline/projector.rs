//! Time-of-day ↔ timeline position projection.
//!
//! The timeline shows a fixed window of the day (08:00–24:00 by default)
//! as a horizontal lane per venue. Positions are fractions of the lane
//! width in [0, 1].
//!
//! - `time → fraction`: elapsed minutes since window start / window length.
//! - `fraction → time`: rounded to the nearest step, then clamped to
//!   [window start, window end − one step].
//!
//! Both directions agree exactly on step boundaries inside the window.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::time::{format_minutes, minute_of_day, time_from_minutes};
use crate::models::{EntryId, Interval, LocalizedText, Venue, VenueId};
use crate::scheduler::ScheduledItem;

/// The visible part of the day and its snapping granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineWindow {
    start_hour: u32,
    end_hour: u32,
    step_minutes: u32,
}

impl TimelineWindow {
    /// Default first visible hour.
    pub const DEFAULT_START_HOUR: u32 = 8;
    /// Default end hour (exclusive).
    pub const DEFAULT_END_HOUR: u32 = 24;
    /// Default snapping granularity.
    pub const DEFAULT_STEP_MINUTES: u32 = 15;

    /// Creates a window.
    ///
    /// # Errors
    /// `InvalidWindow` unless `start_hour < end_hour <= 24`, `step_minutes > 0`
    /// and the step divides the window length.
    pub fn new(start_hour: u32, end_hour: u32, step_minutes: u32) -> Result<Self, ConfigError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(ConfigError::InvalidWindow(format!(
                "hours must satisfy start < end <= 24 (got {start_hour}..{end_hour})"
            )));
        }
        if step_minutes == 0 || ((end_hour - start_hour) * 60) % step_minutes != 0 {
            return Err(ConfigError::InvalidWindow(format!(
                "step of {step_minutes} minutes does not divide {start_hour}:00-{end_hour}:00"
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
            step_minutes,
        })
    }

    /// Window start in minutes since midnight.
    #[inline]
    pub fn start_minute(&self) -> u32 {
        self.start_hour * 60
    }

    /// Window end (exclusive) in minutes since midnight.
    #[inline]
    pub fn end_minute(&self) -> u32 {
        self.end_hour * 60
    }

    /// Window length in minutes.
    #[inline]
    pub fn total_minutes(&self) -> u32 {
        self.end_minute() - self.start_minute()
    }

    /// Snapping granularity in minutes.
    #[inline]
    pub fn step_minutes(&self) -> u32 {
        self.step_minutes
    }

    /// Last start minute a snapped position can produce.
    #[inline]
    pub fn last_step_minute(&self) -> u32 {
        self.end_minute() - self.step_minutes
    }
}

impl Default for TimelineWindow {
    fn default() -> Self {
        Self {
            start_hour: Self::DEFAULT_START_HOUR,
            end_hour: Self::DEFAULT_END_HOUR,
            step_minutes: Self::DEFAULT_STEP_MINUTES,
        }
    }
}

/// Horizontal extent of an entry on its lane, as fractions of the lane width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBox {
    pub entry_id: EntryId,
    pub title: String,
    /// `HH:MM`.
    pub start: String,
    /// `HH:MM`.
    pub end: String,
    pub left: f64,
    pub width: f64,
}

/// One venue row of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueLane {
    pub venue_id: VenueId,
    pub name: LocalizedText,
    pub position: i32,
    /// Boxes ordered by start time.
    pub boxes: Vec<TimelineBox>,
}

/// Maps between time-of-day and lane position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimelineProjector {
    window: TimelineWindow,
}

impl TimelineProjector {
    /// Creates a projector over a window.
    pub fn new(window: TimelineWindow) -> Self {
        Self { window }
    }

    /// The projected window.
    pub fn window(&self) -> &TimelineWindow {
        &self.window
    }

    /// Fraction of the window elapsed at `minute`, clamped to [0, 1].
    pub fn minutes_to_fraction(&self, minute: u32) -> f64 {
        self.unclamped_fraction(minute).clamp(0.0, 1.0)
    }

    /// Fraction of the window elapsed at `minute`; negative before the
    /// window opens and above 1 after it closes.
    pub fn unclamped_fraction(&self, minute: u32) -> f64 {
        let elapsed = minute as f64 - self.window.start_minute() as f64;
        elapsed / self.window.total_minutes() as f64
    }

    /// Fraction of the window elapsed at `time`, clamped to [0, 1].
    pub fn time_to_fraction(&self, time: NaiveTime) -> f64 {
        self.minutes_to_fraction(minute_of_day(time))
    }

    /// Snapped minute for a lane position.
    ///
    /// Rounds to the nearest step and clamps into the window; positions
    /// outside [0, 1] land on the first or last valid step.
    pub fn fraction_to_minutes(&self, fraction: f64) -> u32 {
        let step = self.window.step_minutes() as f64;
        let max_steps = (self.window.total_minutes() / self.window.step_minutes() - 1) as f64;
        let steps = (fraction * self.window.total_minutes() as f64 / step)
            .round()
            .clamp(0.0, max_steps);
        // NaN survives clamp; the cast maps it to 0.
        self.window.start_minute() + (steps as u32) * self.window.step_minutes()
    }

    /// Snapped time-of-day for a lane position.
    pub fn position_to_time(&self, fraction: f64) -> NaiveTime {
        // The window ends at or before 24:00, so the snapped minute is a valid time.
        time_from_minutes(self.fraction_to_minutes(fraction)).unwrap_or(NaiveTime::MIN)
    }

    /// Left offset and width of an interval, clipped to the window.
    pub fn span(&self, interval: &Interval) -> (f64, f64) {
        let left = self.minutes_to_fraction(interval.start);
        let right = self.minutes_to_fraction(interval.end);
        (left, (right - left).max(0.0))
    }

    /// Box for a scheduled item.
    pub fn entry_box(&self, item: &ScheduledItem) -> TimelineBox {
        let (left, width) = self.span(&item.interval);
        TimelineBox {
            entry_id: item.entry.id,
            title: item.display_title().to_string(),
            start: format_minutes(item.interval.start),
            end: format_minutes(item.interval.end),
            left,
            width,
        }
    }

    /// Lays items out in one lane per venue.
    ///
    /// Every venue in `venues` gets a lane (possibly empty), ordered by sort
    /// position. Items in venues missing from `venues` get trailing lanes.
    pub fn lanes(&self, items: &[ScheduledItem], venues: &[Venue]) -> Vec<VenueLane> {
        let mut lanes: Vec<VenueLane> = venues
            .iter()
            .map(|v| VenueLane {
                venue_id: v.id.clone(),
                name: v.name.clone(),
                position: v.position,
                boxes: Vec::new(),
            })
            .collect();
        lanes.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.venue_id.cmp(&b.venue_id)));

        let mut sorted: Vec<&ScheduledItem> = items.iter().collect();
        sorted.sort_by_key(|i| (i.interval.start, i.entry.id));

        for item in sorted {
            let lane_idx = match lanes.iter().position(|l| l.venue_id == item.entry.venue_id) {
                Some(idx) => idx,
                None => {
                    lanes.push(VenueLane {
                        venue_id: item.entry.venue_id.clone(),
                        name: LocalizedText::same(item.entry.venue_id.as_str()),
                        position: item.venue_position,
                        boxes: Vec::new(),
                    });
                    lanes.len() - 1
                }
            };
            lanes[lane_idx].boxes.push(self.entry_box(item));
        }

        lanes
    }
}
