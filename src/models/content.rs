//! Schedulable content: works and groups of works.
//!
//! A [`Work`] is a single programme item (a film, a performance) with an
//! intrinsic runtime. A [`Group`] bundles several works into one combined
//! slot, e.g. a shorts programme. Both belong to the catalog subsystem and
//! are read-only from the scheduler's perspective.
//!
//! # Duration Model
//!
//! The runtime of a work is catalog-supplied text. Only the leading decimal
//! digits count (`"90"` and `"90 min"` are both 90 minutes); anything else
//! degrades to 0 so display contexts still render. A group never stores its
//! own runtime: it is always the sum of its members' current runtimes.

use serde::{Deserialize, Serialize};

use super::{EditionId, GroupId, LocalizedText, WorkId};

/// A single schedulable work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    /// Unique work identifier.
    pub id: WorkId,
    /// Display title.
    pub title: LocalizedText,
    /// Runtime in minutes, as supplied by the catalog.
    #[serde(default)]
    pub runtime: Option<String>,
    /// Owning festival edition.
    #[serde(default)]
    pub edition_id: Option<EditionId>,
    /// Director credit (opaque to the scheduler).
    #[serde(default)]
    pub director: Option<String>,
}

impl Work {
    /// Creates a work with the given runtime in minutes.
    pub fn new(id: impl Into<WorkId>, title: impl Into<String>, runtime_minutes: u32) -> Self {
        Self {
            id: id.into(),
            title: LocalizedText::same(title),
            runtime: Some(runtime_minutes.to_string()),
            edition_id: None,
            director: None,
        }
    }

    /// Sets the raw runtime text.
    pub fn with_raw_runtime(mut self, runtime: Option<&str>) -> Self {
        self.runtime = runtime.map(str::to_string);
        self
    }

    /// Sets the title in both locales.
    pub fn with_title(mut self, title: LocalizedText) -> Self {
        self.title = title;
        self
    }

    /// Sets the owning edition.
    pub fn with_edition(mut self, edition_id: impl Into<EditionId>) -> Self {
        self.edition_id = Some(edition_id.into());
        self
    }

    /// Sets the director credit.
    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    /// Intrinsic runtime in minutes. Missing or unparseable runtimes are 0.
    pub fn runtime_minutes(&self) -> u32 {
        self.runtime.as_deref().map(parse_runtime).unwrap_or(0)
    }
}

/// A member slot of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    /// Referenced work.
    pub work_id: WorkId,
    /// Display position within the group (ascending).
    #[serde(default)]
    pub position: i32,
}

/// An ordered bundle of works scheduled as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique group identifier.
    pub id: GroupId,
    /// Display title.
    pub title: LocalizedText,
    /// Owning festival edition.
    #[serde(default)]
    pub edition_id: Option<EditionId>,
    /// Member works. May be empty.
    #[serde(default)]
    pub members: Vec<GroupMember>,
}

impl Group {
    /// Creates an empty group.
    pub fn new(id: impl Into<GroupId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: LocalizedText::same(title),
            edition_id: None,
            members: Vec::new(),
        }
    }

    /// Appends a member at the next position.
    pub fn with_member(mut self, work_id: impl Into<WorkId>) -> Self {
        let position = self.members.len() as i32;
        self.members.push(GroupMember {
            work_id: work_id.into(),
            position,
        });
        self
    }

    /// Adds a member at an explicit position.
    pub fn with_member_at(mut self, work_id: impl Into<WorkId>, position: i32) -> Self {
        self.members.push(GroupMember {
            work_id: work_id.into(),
            position,
        });
        self
    }

    /// Sets the owning edition.
    pub fn with_edition(mut self, edition_id: impl Into<EditionId>) -> Self {
        self.edition_id = Some(edition_id.into());
        self
    }

    /// Member work IDs in display order.
    pub fn ordered_work_ids(&self) -> Vec<&WorkId> {
        let mut members: Vec<&GroupMember> = self.members.iter().collect();
        members.sort_by_key(|m| m.position);
        members.into_iter().map(|m| &m.work_id).collect()
    }
}

/// Leading decimal digits of `raw`, after trimming. Empty or overflowing → 0.
fn parse_runtime(raw: &str) -> u32 {
    let digits: &str = {
        let trimmed = raw.trim_start();
        let end = trimmed
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        &trimmed[..end]
    };
    digits.parse().unwrap_or(0)
}
