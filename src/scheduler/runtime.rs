//! Runtime aggregation.
//!
//! Computes how long a piece of content occupies a venue:
//! - **Work**: its intrinsic runtime.
//! - **Group**: the sum of its members' current runtimes (order-independent,
//!   0 for an empty group).
//!
//! Every call goes back to the catalog. Nothing is cached, so an edit to a
//! work's runtime is seen by the next call.
//!
//! Missing works, groups or runtimes degrade to 0 instead of failing.

use crate::catalog::Catalog;
use crate::models::{EntryContent, Group, ScheduleEntry};

/// Computes content durations from the catalog.
#[derive(Clone, Copy)]
pub struct RuntimeAggregator<'a> {
    catalog: &'a dyn Catalog,
}

impl<'a> RuntimeAggregator<'a> {
    /// Creates an aggregator over a catalog.
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self { catalog }
    }

    /// Runtime of the content in minutes.
    pub fn duration(&self, content: &EntryContent) -> u32 {
        match content {
            EntryContent::Work(id) => self
                .catalog
                .work(id)
                .map(|w| w.runtime_minutes())
                .unwrap_or(0),
            EntryContent::Group(id) => self
                .catalog
                .group(id)
                .map(|g| self.group_duration(&g))
                .unwrap_or(0),
        }
    }

    /// Sum of the current runtimes of the group's members.
    pub fn group_duration(&self, group: &Group) -> u32 {
        group
            .members
            .iter()
            .filter_map(|m| self.catalog.work(&m.work_id))
            .map(|w| w.runtime_minutes())
            .fold(0u32, u32::saturating_add)
    }

    /// Content runtime plus discussion time.
    pub fn total_duration(&self, content: &EntryContent, discussion_minutes: u32) -> u32 {
        self.duration(content).saturating_add(discussion_minutes)
    }

    /// Total duration of a committed entry.
    pub fn entry_duration(&self, entry: &ScheduleEntry) -> u32 {
        self.total_duration(&entry.content, entry.discussion_minutes)
    }
}
