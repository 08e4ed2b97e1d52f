//! Schedule entry model.
//!
//! A schedule entry places exactly one work or one group into one venue,
//! on one calendar day, at one start time. Its occupied interval is never
//! stored: it is derived from the content's current runtime plus the
//! entry's discussion time every time it is needed.
//!
//! # Input Shapes
//!
//! | Type | Used by | Fields |
//! |------|---------|--------|
//! | [`EntryDraft`] | create, dry-run check | placement required, content exactly one of work/group |
//! | [`EntryPatch`] | update | every field optional, unspecified fields keep stored values |
//! | [`Placement`] | overlap detection | validated venue/day/start/content/discussion |

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::time::{hhmm, minute_of_day};
use super::{EntryId, GroupId, LocalizedText, VenueId, WorkId};
use crate::error::ScheduleError;

/// The content of a schedule entry: a work or a group, never both or neither.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum EntryContent {
    /// A single work.
    Work(WorkId),
    /// An ordered group of works.
    Group(GroupId),
}

impl EntryContent {
    /// Builds content from the two optional references of a request.
    ///
    /// # Errors
    /// `InvalidContent` when both or neither reference is given.
    pub fn from_refs(
        work_id: Option<WorkId>,
        group_id: Option<GroupId>,
    ) -> Result<Self, ScheduleError> {
        match (work_id, group_id) {
            (Some(w), None) => Ok(EntryContent::Work(w)),
            (None, Some(g)) => Ok(EntryContent::Group(g)),
            (Some(_), Some(_)) => Err(ScheduleError::InvalidContent(
                "specify either a work or a group, not both".into(),
            )),
            (None, None) => Err(ScheduleError::InvalidContent(
                "either a work or a group is required".into(),
            )),
        }
    }

    /// Referenced work, if this is work content.
    pub fn work_id(&self) -> Option<&WorkId> {
        match self {
            EntryContent::Work(id) => Some(id),
            EntryContent::Group(_) => None,
        }
    }

    /// Referenced group, if this is group content.
    pub fn group_id(&self) -> Option<&GroupId> {
        match self {
            EntryContent::Work(_) => None,
            EntryContent::Group(id) => Some(id),
        }
    }
}

/// Mutual-exclusion key: one venue on one day.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    pub venue_id: VenueId,
    pub day: NaiveDate,
}

/// A validated placement of content into a venue/day/time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub venue_id: VenueId,
    pub day: NaiveDate,
    pub start_time: NaiveTime,
    pub content: EntryContent,
    /// Minutes added after the content runtime.
    pub discussion_minutes: u32,
}

impl Placement {
    /// Start as minutes since midnight.
    #[inline]
    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start_time)
    }

    /// The venue/day this placement competes in.
    pub fn slot(&self) -> SlotKey {
        SlotKey {
            venue_id: self.venue_id.clone(),
            day: self.day,
        }
    }
}

/// A committed placement of a work or group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Store-issued identifier.
    pub id: EntryId,
    /// Hosting venue.
    pub venue_id: VenueId,
    /// Calendar day (wall-clock, no timezone).
    pub day: NaiveDate,
    /// Start time-of-day.
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    /// Scheduled content.
    pub content: EntryContent,
    /// Discussion time after the content, in minutes.
    pub discussion_minutes: u32,
    /// Optional title replacing the content title in displays.
    pub title_override: Option<LocalizedText>,
    /// Free-text operator note.
    pub notes: Option<String>,
}

impl ScheduleEntry {
    /// Creates an entry from a validated placement.
    pub fn from_placement(id: EntryId, placement: Placement) -> Self {
        Self {
            id,
            venue_id: placement.venue_id,
            day: placement.day,
            start_time: placement.start_time,
            content: placement.content,
            discussion_minutes: placement.discussion_minutes,
            title_override: None,
            notes: None,
        }
    }

    /// Start as minutes since midnight.
    #[inline]
    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start_time)
    }

    /// The venue/day this entry occupies.
    pub fn slot(&self) -> SlotKey {
        SlotKey {
            venue_id: self.venue_id.clone(),
            day: self.day,
        }
    }

    /// Current placement fields.
    pub fn placement(&self) -> Placement {
        Placement {
            venue_id: self.venue_id.clone(),
            day: self.day,
            start_time: self.start_time,
            content: self.content.clone(),
            discussion_minutes: self.discussion_minutes,
        }
    }
}

/// Input for creating an entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub venue_id: Option<VenueId>,
    pub day: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub work_id: Option<WorkId>,
    pub group_id: Option<GroupId>,
    pub discussion_minutes: u32,
    pub title_override: Option<LocalizedText>,
    pub notes: Option<String>,
}

impl EntryDraft {
    /// Creates a draft for the given venue, day and start time.
    pub fn at(venue_id: impl Into<VenueId>, day: NaiveDate, start_time: NaiveTime) -> Self {
        Self {
            venue_id: Some(venue_id.into()),
            day: Some(day),
            start_time: Some(start_time),
            ..Self::default()
        }
    }

    /// Sets work content.
    pub fn with_work(mut self, work_id: impl Into<WorkId>) -> Self {
        self.work_id = Some(work_id.into());
        self
    }

    /// Sets group content.
    pub fn with_group(mut self, group_id: impl Into<GroupId>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Sets the discussion time.
    pub fn with_discussion(mut self, minutes: u32) -> Self {
        self.discussion_minutes = minutes;
        self
    }

    /// Sets a title override.
    pub fn with_title_override(mut self, title: LocalizedText) -> Self {
        self.title_override = Some(title);
        self
    }

    /// Sets the operator note.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Validates the draft into a placement.
    ///
    /// # Errors
    /// - `InvalidPlacement` if venue, day or start time is missing.
    /// - `InvalidContent` if not exactly one of work/group is given.
    pub fn placement(&self) -> Result<Placement, ScheduleError> {
        let venue_id = self
            .venue_id
            .clone()
            .filter(|v| !v.as_str().trim().is_empty())
            .ok_or_else(|| ScheduleError::InvalidPlacement("venue is required".into()))?;
        let day = self
            .day
            .ok_or_else(|| ScheduleError::InvalidPlacement("day is required".into()))?;
        let start_time = self
            .start_time
            .ok_or_else(|| ScheduleError::InvalidPlacement("start time is required".into()))?;
        let content = EntryContent::from_refs(self.work_id.clone(), self.group_id.clone())?;

        Ok(Placement {
            venue_id,
            day,
            start_time,
            content,
            discussion_minutes: self.discussion_minutes,
        })
    }

    /// Builds the entry to commit once the placement has been accepted.
    pub(crate) fn into_entry(self, id: EntryId, placement: Placement) -> ScheduleEntry {
        let mut entry = ScheduleEntry::from_placement(id, placement);
        entry.title_override = self.title_override.filter(|t| !t.is_blank());
        entry.notes = self.notes.filter(|n| !n.trim().is_empty());
        entry
    }
}

/// Partial update of an entry. `None` keeps the stored value.
///
/// A provided blank title override or note clears the stored one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub venue_id: Option<VenueId>,
    pub day: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub work_id: Option<WorkId>,
    pub group_id: Option<GroupId>,
    pub discussion_minutes: Option<u32>,
    pub title_override: Option<LocalizedText>,
    pub notes: Option<String>,
}

impl EntryPatch {
    /// A patch that only moves the start time.
    pub fn start_at(start_time: NaiveTime) -> Self {
        Self {
            start_time: Some(start_time),
            ..Self::default()
        }
    }

    /// Moves the entry to another venue.
    pub fn with_venue(mut self, venue_id: impl Into<VenueId>) -> Self {
        self.venue_id = Some(venue_id.into());
        self
    }

    /// Moves the entry to another day.
    pub fn with_day(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    /// Replaces the content with a work.
    pub fn with_work(mut self, work_id: impl Into<WorkId>) -> Self {
        self.work_id = Some(work_id.into());
        self
    }

    /// Replaces the content with a group.
    pub fn with_group(mut self, group_id: impl Into<GroupId>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Changes the discussion time.
    pub fn with_discussion(mut self, minutes: u32) -> Self {
        self.discussion_minutes = Some(minutes);
        self
    }

    /// Sets the operator note (blank clears).
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the title override (blank clears).
    pub fn with_title_override(mut self, title: LocalizedText) -> Self {
        self.title_override = Some(title);
        self
    }

    /// Whether any field that affects the occupied interval is given.
    ///
    /// When `false` the update is a pure metadata edit and skips the
    /// overlap re-check.
    pub fn touches_placement(&self) -> bool {
        self.venue_id.is_some()
            || self.day.is_some()
            || self.start_time.is_some()
            || self.work_id.is_some()
            || self.group_id.is_some()
            || self.discussion_minutes.is_some()
    }

    /// The placement resulting from merging this patch onto `current`.
    ///
    /// # Errors
    /// - `InvalidContent` if both a work and a group are given.
    /// - `InvalidPlacement` if a blank venue ID is given.
    pub fn merged_placement(&self, current: &ScheduleEntry) -> Result<Placement, ScheduleError> {
        let content = match (&self.work_id, &self.group_id) {
            (None, None) => current.content.clone(),
            (w, g) => EntryContent::from_refs(w.clone(), g.clone())?,
        };
        let venue_id = match &self.venue_id {
            Some(v) if v.as_str().trim().is_empty() => {
                return Err(ScheduleError::InvalidPlacement("venue is required".into()))
            }
            Some(v) => v.clone(),
            None => current.venue_id.clone(),
        };

        Ok(Placement {
            venue_id,
            day: self.day.unwrap_or(current.day),
            start_time: self.start_time.unwrap_or(current.start_time),
            content,
            discussion_minutes: self.discussion_minutes.unwrap_or(current.discussion_minutes),
        })
    }

    /// Applies this patch to `entry`, using an already accepted placement.
    pub(crate) fn apply(self, entry: &mut ScheduleEntry, placement: Placement) {
        entry.venue_id = placement.venue_id;
        entry.day = placement.day;
        entry.start_time = placement.start_time;
        entry.content = placement.content;
        entry.discussion_minutes = placement.discussion_minutes;
        if let Some(title) = self.title_override {
            entry.title_override = Some(title).filter(|t| !t.is_blank());
        }
        if let Some(notes) = self.notes {
            entry.notes = Some(notes).filter(|n| !n.trim().is_empty());
        }
    }
}
