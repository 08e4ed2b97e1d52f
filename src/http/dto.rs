//! Data Transfer Objects for the HTTP API.
//!
//! Wire names are camelCase. Days are `YYYY-MM-DD`, times are `HH:MM`
//! (`HH:MM:SS` accepted on input).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};
use crate::models::time::{format_minutes, parse_time};
use crate::models::{
    EditionId, EntryDraft, EntryId, EntryPatch, GroupId, LocalizedText, VenueId, WorkId,
};
use crate::scheduler::{Conflict, OverlapCheck, ScheduleFilter, ScheduledItem};
use crate::timeline::VenueLane;

/// Body of `POST /schedule`, `PUT /schedule/{id}` and
/// `POST /schedule/check-overlap`.
///
/// Every field is optional at the wire level; which ones are required
/// depends on the operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRequest {
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub work_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<String>,
    /// Signed so that negative values are reported instead of failing
    /// deserialization.
    #[serde(default)]
    pub discussion_minutes: Option<i64>,
    #[serde(default)]
    pub title_override: Option<LocalizedText>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Dry-run only: skip this entry in the conflict scan.
    #[serde(default)]
    pub exclude_entry_id: Option<u64>,
}

impl EntryRequest {
    /// Converts into a creation draft.
    ///
    /// Missing fields are left to [`EntryDraft::placement`] so that error
    /// precedence is the same as for library callers.
    pub fn into_draft(self) -> ScheduleResult<EntryDraft> {
        Ok(EntryDraft {
            venue_id: non_blank(self.venue_id).map(VenueId::from),
            day: self.day.as_deref().map(parse_day).transpose()?,
            start_time: self.start_time.as_deref().map(parse_start).transpose()?,
            work_id: non_blank(self.work_id).map(WorkId::from),
            group_id: non_blank(self.group_id).map(GroupId::from),
            discussion_minutes: parse_discussion(self.discussion_minutes)?.unwrap_or(0),
            title_override: self.title_override,
            notes: self.notes,
        })
    }

    /// Converts into a partial update. Absent fields keep stored values.
    pub fn into_patch(self) -> ScheduleResult<EntryPatch> {
        Ok(EntryPatch {
            venue_id: self.venue_id.map(VenueId::from),
            day: self.day.as_deref().map(parse_day).transpose()?,
            start_time: self.start_time.as_deref().map(parse_start).transpose()?,
            work_id: non_blank(self.work_id).map(WorkId::from),
            group_id: non_blank(self.group_id).map(GroupId::from),
            discussion_minutes: parse_discussion(self.discussion_minutes)?,
            title_override: self.title_override,
            notes: self.notes,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_day(value: &str) -> ScheduleResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ScheduleError::InvalidPlacement(format!("invalid day '{value}', expected YYYY-MM-DD"))
    })
}

fn parse_start(value: &str) -> ScheduleResult<chrono::NaiveTime> {
    parse_time(value).ok_or_else(|| {
        ScheduleError::InvalidPlacement(format!("invalid start time '{value}', expected HH:MM"))
    })
}

fn parse_discussion(value: Option<i64>) -> ScheduleResult<Option<u32>> {
    value
        .map(|m| {
            u32::try_from(m).map_err(|_| {
                ScheduleError::InvalidPlacement(format!(
                    "discussion time must be a non-negative number of minutes (got {m})"
                ))
            })
        })
        .transpose()
}

/// Query of `GET /schedule`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub edition_id: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub venue_id: Option<String>,
}

impl ListQuery {
    /// Converts into a store filter.
    pub fn into_filter(self) -> ScheduleResult<ScheduleFilter> {
        Ok(ScheduleFilter {
            edition_id: non_blank(self.edition_id).map(EditionId::from),
            day: non_blank(self.day).as_deref().map(parse_day).transpose()?,
            venue_id: non_blank(self.venue_id).map(VenueId::from),
        })
    }
}

/// Query of `GET /schedule/timeline`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineQuery {
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub venue_id: Option<String>,
    #[serde(default)]
    pub edition_id: Option<String>,
}

impl TimelineQuery {
    /// Converts into a store filter. The day is mandatory.
    pub fn into_filter(self) -> ScheduleResult<ScheduleFilter> {
        let day = non_blank(self.day)
            .ok_or_else(|| ScheduleError::InvalidPlacement("day is required".into()))?;
        ListQuery {
            edition_id: self.edition_id,
            day: Some(day),
            venue_id: self.venue_id,
        }
        .into_filter()
    }
}

/// A schedule entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub id: EntryId,
    pub venue_id: VenueId,
    pub day: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_id: Option<WorkId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,
    pub discussion_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_override: Option<LocalizedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Title to display (override, else content title).
    pub title: String,
    pub content_title: LocalizedText,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition_id: Option<EditionId>,
    /// Member works in display order (groups only).
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub member_work_ids: Vec<WorkId>,
    pub runtime_minutes: u32,
    pub total_minutes: u32,
    pub venue_position: i32,
}

impl From<ScheduledItem> for EntryResponse {
    fn from(item: ScheduledItem) -> Self {
        let title = item.display_title().to_string();
        let end_time = item.end_label();
        let entry = item.entry;
        Self {
            id: entry.id,
            start_time: format_minutes(entry.start_minute()),
            end_time,
            work_id: entry.content.work_id().cloned(),
            group_id: entry.content.group_id().cloned(),
            venue_id: entry.venue_id,
            day: entry.day,
            discussion_minutes: entry.discussion_minutes,
            title_override: entry.title_override,
            notes: entry.notes,
            title,
            content_title: item.summary.title,
            edition_id: item.summary.edition_id,
            member_work_ids: item.summary.member_ids,
            runtime_minutes: item.summary.runtime_minutes,
            total_minutes: item.total_minutes,
            venue_position: item.venue_position,
        }
    }
}

/// Response of `GET /schedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryListResponse {
    pub entries: Vec<EntryResponse>,
    pub total: usize,
}

/// Response of `DELETE /schedule/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: EntryId,
}

/// The two intervals of an overlap, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetails {
    pub existing_entry_id: EntryId,
    pub existing_start: String,
    pub existing_end: String,
    pub candidate_start: String,
    pub candidate_end: String,
    pub message: String,
}

impl From<&Conflict> for ConflictDetails {
    fn from(conflict: &Conflict) -> Self {
        Self {
            existing_entry_id: conflict.existing_entry_id,
            existing_start: conflict.existing.start_label(),
            existing_end: conflict.existing.end_label(),
            candidate_start: conflict.candidate.start_label(),
            candidate_end: conflict.candidate.end_label(),
            message: conflict.to_string(),
        }
    }
}

/// Response of `POST /schedule/check-overlap`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOverlapResponse {
    pub has_overlap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_details: Option<ConflictDetails>,
}

impl From<OverlapCheck> for CheckOverlapResponse {
    fn from(check: OverlapCheck) -> Self {
        Self {
            has_overlap: check.overlaps(),
            conflict_details: check.conflict.as_ref().map(ConflictDetails::from),
        }
    }
}

/// Response of `GET /schedule/timeline`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineResponse {
    pub day: NaiveDate,
    pub window_start: String,
    pub window_end: String,
    pub step_minutes: u32,
    pub lanes: Vec<VenueLane>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub entries: usize,
}
