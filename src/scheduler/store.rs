//! Authoritative schedule entry store.
//!
//! Owns every [`ScheduleEntry`] and is the only component that mutates
//! them. Entries are indexed by venue/day so that overlap checks only scan
//! the competing slot.
//!
//! # Atomicity
//!
//! Create and update run the overlap check and the commit under one write
//! lock, so two concurrent requests for the same venue/day can never both
//! pass the check before either commits. Nothing inside the critical
//! section awaits; a caller that aborts a request either sees the whole
//! write applied or none of it.
//!
//! Reads (`list`, `get`, dry-run checks) hand out owned snapshots.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{OverlapCheck, OverlapDetector, RuntimeAggregator};
use crate::catalog::Catalog;
use crate::error::{ScheduleError, ScheduleResult};
use crate::models::time::format_minutes;
use crate::models::{
    EditionId, EntryContent, EntryDraft, EntryId, EntryPatch, Interval, LocalizedText, Placement,
    ScheduleEntry, SlotKey, VenueId, WorkId,
};

/// Resolved view of an entry's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    /// Referenced work or group.
    pub content: EntryContent,
    /// Content title (empty if the content is no longer in the catalog).
    pub title: LocalizedText,
    /// Edition the content belongs to.
    pub edition_id: Option<EditionId>,
    /// Member works in display order (groups only).
    pub member_ids: Vec<WorkId>,
    /// Current content runtime in minutes.
    pub runtime_minutes: u32,
}

/// A schedule entry together with its derived data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledItem {
    pub entry: ScheduleEntry,
    pub summary: ContentSummary,
    /// Content runtime + discussion time.
    pub total_minutes: u32,
    /// Occupied interval, computed at snapshot time.
    pub interval: Interval,
    /// Venue sort position (0 if the venue is unknown).
    pub venue_position: i32,
}

impl ScheduledItem {
    /// Title shown to operators: the override if set, else the content title.
    pub fn display_title(&self) -> &str {
        match &self.entry.title_override {
            Some(t) if !t.is_blank() => t.display(),
            _ => self.summary.title.display(),
        }
    }

    /// End time formatted as `HH:MM`.
    pub fn end_label(&self) -> String {
        format_minutes(self.interval.end)
    }
}

/// Listing filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub edition_id: Option<EditionId>,
    pub day: Option<NaiveDate>,
    pub venue_id: Option<VenueId>,
}

impl ScheduleFilter {
    /// Matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts to one edition.
    pub fn with_edition(mut self, edition_id: impl Into<EditionId>) -> Self {
        self.edition_id = Some(edition_id.into());
        self
    }

    /// Restricts to one day.
    pub fn with_day(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    /// Restricts to one venue.
    pub fn with_venue(mut self, venue_id: impl Into<VenueId>) -> Self {
        self.venue_id = Some(venue_id.into());
        self
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    next_id: u64,
    entries: HashMap<EntryId, ScheduleEntry>,
    /// Venue/day → entry IDs, ascending (the scan order for conflicts).
    slots: HashMap<SlotKey, BTreeSet<EntryId>>,
}

impl StoreInner {
    fn issue_id(&mut self) -> EntryId {
        self.next_id += 1;
        EntryId::new(self.next_id)
    }

    fn slot_entries<'a>(&'a self, key: &SlotKey) -> impl Iterator<Item = &'a ScheduleEntry> + 'a {
        self.slots
            .get(key)
            .into_iter()
            .flat_map(|ids| ids.iter())
            .filter_map(move |id| self.entries.get(id))
    }

    fn insert(&mut self, entry: ScheduleEntry) {
        self.slots.entry(entry.slot()).or_default().insert(entry.id);
        self.entries.insert(entry.id, entry);
    }

    fn remove(&mut self, id: EntryId) -> Option<ScheduleEntry> {
        let entry = self.entries.remove(&id)?;
        let key = entry.slot();
        if let Some(ids) = self.slots.get_mut(&key) {
            ids.remove(&id);
            if ids.is_empty() {
                self.slots.remove(&key);
            }
        }
        Some(entry)
    }
}

/// The schedule entry store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use chrono::{NaiveDate, NaiveTime};
/// use fest_schedule::catalog::InMemoryCatalog;
/// use fest_schedule::models::{EntryDraft, Venue, Work};
/// use fest_schedule::scheduler::ScheduleStore;
///
/// let catalog = InMemoryCatalog::new()
///     .with_venue(Venue::new("V", "Main Hall"))
///     .with_work(Work::new("A", "Opening Film", 90));
/// let store = ScheduleStore::new(Arc::new(catalog));
///
/// let day = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
/// let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
/// let item = store.create(EntryDraft::at("V", day, ten).with_work("A")).unwrap();
/// assert_eq!(item.end_label(), "11:30");
///
/// let clash = NaiveTime::from_hms_opt(11, 0, 0).unwrap();
/// assert!(store.create(EntryDraft::at("V", day, clash).with_work("A")).is_err());
/// ```
pub struct ScheduleStore {
    catalog: Arc<dyn Catalog>,
    inner: RwLock<StoreInner>,
}

impl ScheduleStore {
    /// Creates an empty store reading content from `catalog`.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// The catalog this store resolves content against.
    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates an entry.
    ///
    /// # Errors
    /// - `InvalidPlacement`: venue/day/start missing or venue unknown.
    /// - `InvalidContent`: not exactly one of work/group, or unknown reference.
    /// - `OverlapConflict`: the slot is taken; nothing is written.
    pub fn create(&self, draft: EntryDraft) -> ScheduleResult<ScheduledItem> {
        let placement = draft.placement()?;
        self.ensure_venue_known(&placement)?;
        self.ensure_content_known(&placement.content)?;

        let detector = OverlapDetector::new(self.catalog.as_ref());
        let mut inner = self.inner.write();

        let check = detector.check(&placement, inner.slot_entries(&placement.slot()), None);
        if let Some(conflict) = check.conflict {
            warn!(venue = %placement.venue_id, day = %placement.day, %conflict, "create rejected");
            return Err(ScheduleError::OverlapConflict(conflict));
        }

        let id = inner.issue_id();
        let entry = draft.into_entry(id, placement);
        inner.insert(entry.clone());
        drop(inner);

        info!(
            id = %entry.id,
            venue = %entry.venue_id,
            day = %entry.day,
            start = %check.candidate.start_label(),
            end = %check.candidate.end_label(),
            "schedule entry created"
        );
        Ok(self.resolve(&entry))
    }

    /// Updates an entry; unspecified fields keep their stored values.
    ///
    /// A patch that only touches metadata (title override, notes) skips the
    /// overlap check. Otherwise the merged placement is checked against the
    /// target venue/day, excluding the entry itself.
    ///
    /// # Errors
    /// `NotFound` for unknown IDs, plus the same rejections as [`Self::create`].
    pub fn update(&self, id: EntryId, patch: EntryPatch) -> ScheduleResult<ScheduledItem> {
        let detector = OverlapDetector::new(self.catalog.as_ref());
        let mut inner = self.inner.write();

        let current = inner
            .entries
            .get(&id)
            .cloned()
            .ok_or(ScheduleError::NotFound(id))?;
        let placement = patch.merged_placement(&current)?;

        if patch.touches_placement() {
            if patch.venue_id.is_some() {
                self.ensure_venue_known(&placement)?;
            }
            if patch.work_id.is_some() || patch.group_id.is_some() {
                self.ensure_content_known(&placement.content)?;
            }

            let check = detector.check(&placement, inner.slot_entries(&placement.slot()), Some(id));
            if let Some(conflict) = check.conflict {
                warn!(%id, venue = %placement.venue_id, day = %placement.day, %conflict, "update rejected");
                return Err(ScheduleError::OverlapConflict(conflict));
            }
        }

        let mut updated = current;
        inner.remove(id);
        patch.apply(&mut updated, placement);
        inner.insert(updated.clone());
        drop(inner);

        info!(
            %id,
            venue = %updated.venue_id,
            day = %updated.day,
            start = %updated.start_time.format("%H:%M"),
            "schedule entry updated"
        );
        Ok(self.resolve(&updated))
    }

    /// Deletes an entry.
    ///
    /// # Errors
    /// `NotFound` for unknown IDs.
    pub fn delete(&self, id: EntryId) -> ScheduleResult<ScheduleEntry> {
        let removed = self
            .inner
            .write()
            .remove(id)
            .ok_or(ScheduleError::NotFound(id))?;
        info!(%id, venue = %removed.venue_id, day = %removed.day, "schedule entry deleted");
        Ok(removed)
    }

    /// Snapshot of a single entry.
    ///
    /// # Errors
    /// `NotFound` for unknown IDs.
    pub fn get(&self, id: EntryId) -> ScheduleResult<ScheduledItem> {
        let entry = self
            .inner
            .read()
            .entries
            .get(&id)
            .cloned()
            .ok_or(ScheduleError::NotFound(id))?;
        Ok(self.resolve(&entry))
    }

    /// Lists entries matching `filter`, ordered by day, start time, venue
    /// sort position (then venue ID and entry ID for stability).
    pub fn list(&self, filter: &ScheduleFilter) -> Vec<ScheduledItem> {
        let entries: Vec<ScheduleEntry> = self
            .inner
            .read()
            .entries
            .values()
            .filter(|e| filter.day.map_or(true, |d| e.day == d))
            .filter(|e| filter.venue_id.as_ref().map_or(true, |v| &e.venue_id == v))
            .cloned()
            .collect();

        let mut items: Vec<ScheduledItem> = entries
            .iter()
            .map(|e| self.resolve(e))
            .filter(|item| {
                filter
                    .edition_id
                    .as_ref()
                    .map_or(true, |ed| item.summary.edition_id.as_ref() == Some(ed))
            })
            .collect();

        items.sort_by(|a, b| {
            a.entry
                .day
                .cmp(&b.entry.day)
                .then_with(|| a.entry.start_time.cmp(&b.entry.start_time))
                .then_with(|| a.venue_position.cmp(&b.venue_position))
                .then_with(|| a.entry.venue_id.cmp(&b.entry.venue_id))
                .then_with(|| a.entry.id.cmp(&b.entry.id))
        });
        items
    }

    /// Dry-run overlap check; never writes.
    ///
    /// `exclude` skips an entry being edited.
    ///
    /// # Errors
    /// Validation errors as for [`Self::create`].
    pub fn check_overlap(
        &self,
        draft: &EntryDraft,
        exclude: Option<EntryId>,
    ) -> ScheduleResult<OverlapCheck> {
        let placement = draft.placement()?;
        self.ensure_venue_known(&placement)?;
        self.ensure_content_known(&placement.content)?;

        let detector = OverlapDetector::new(self.catalog.as_ref());
        let inner = self.inner.read();
        Ok(detector.check(&placement, inner.slot_entries(&placement.slot()), exclude))
    }

    /// Resolves content summary and derived durations for an entry.
    pub fn resolve(&self, entry: &ScheduleEntry) -> ScheduledItem {
        let runtime = RuntimeAggregator::new(self.catalog.as_ref());
        let runtime_minutes = runtime.duration(&entry.content);

        let (title, edition_id, member_ids) = match &entry.content {
            EntryContent::Work(id) => match self.catalog.work(id) {
                Some(w) => (w.title, w.edition_id, Vec::new()),
                None => (LocalizedText::default(), None, Vec::new()),
            },
            EntryContent::Group(id) => match self.catalog.group(id) {
                Some(g) => {
                    let members = g.ordered_work_ids().into_iter().cloned().collect();
                    (g.title, g.edition_id, members)
                }
                None => (LocalizedText::default(), None, Vec::new()),
            },
        };

        let total_minutes = runtime_minutes.saturating_add(entry.discussion_minutes);
        let venue_position = self
            .catalog
            .venue(&entry.venue_id)
            .map(|v| v.position)
            .unwrap_or(0);

        ScheduledItem {
            entry: entry.clone(),
            summary: ContentSummary {
                content: entry.content.clone(),
                title,
                edition_id,
                member_ids,
                runtime_minutes,
            },
            total_minutes,
            interval: Interval::from_start(entry.start_minute(), total_minutes),
            venue_position,
        }
    }

    fn ensure_venue_known(&self, placement: &Placement) -> ScheduleResult<()> {
        if self.catalog.venue(&placement.venue_id).is_none() {
            return Err(ScheduleError::InvalidPlacement(format!(
                "unknown venue '{}'",
                placement.venue_id
            )));
        }
        Ok(())
    }

    fn ensure_content_known(&self, content: &EntryContent) -> ScheduleResult<()> {
        match content {
            EntryContent::Work(id) if self.catalog.work(id).is_none() => Err(
                ScheduleError::InvalidContent(format!("unknown work '{id}'")),
            ),
            EntryContent::Group(id) if self.catalog.group(id).is_none() => Err(
                ScheduleError::InvalidContent(format!("unknown group '{id}'")),
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::models::{Group, Venue, Work};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 10).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_catalog() -> Arc<InMemoryCatalog> {
        Arc::new(
            InMemoryCatalog::new()
                .with_venue(Venue::new("V1", "Hall 1").with_position(1))
                .with_venue(Venue::new("V2", "Hall 2").with_position(2))
                .with_work(Work::new("A", "Work A", 90).with_edition("2025"))
                .with_work(Work::new("B", "Work B", 30).with_edition("2025"))
                .with_work(Work::new("OLD", "Retro", 60).with_edition("2024"))
                .with_group(
                    Group::new("G", "Shorts")
                        .with_edition("2025")
                        .with_member_at("B", 2)
                        .with_member_at("A", 1),
                ),
        )
    }

    fn sample_store() -> (Arc<InMemoryCatalog>, ScheduleStore) {
        let catalog = sample_catalog();
        let store = ScheduleStore::new(catalog.clone());
        (catalog, store)
    }

    #[test]
    fn test_create_and_get() {
        let (_, store) = sample_store();
        let item = store
            .create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A").with_discussion(20))
            .unwrap();
        assert_eq!(item.summary.runtime_minutes, 90);
        assert_eq!(item.total_minutes, 110);
        assert_eq!(item.end_label(), "11:50");
        assert_eq!(item.display_title(), "Work A");

        let fetched = store.get(item.entry.id).unwrap();
        assert_eq!(fetched, item);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_rejects_overlap_without_writing() {
        let (_, store) = sample_store();
        store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();

        let err = store
            .create(EntryDraft::at("V1", day(), at(11, 0)).with_work("B"))
            .unwrap_err();
        match err {
            ScheduleError::OverlapConflict(c) => {
                assert_eq!(c.existing.start_label(), "10:00");
                assert_eq!(c.existing.end_label(), "11:30");
            }
            other => panic!("expected overlap, got {other:?}"),
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_validates_references() {
        let (_, store) = sample_store();
        assert!(matches!(
            store.create(EntryDraft::at("NOPE", day(), at(10, 0)).with_work("A")),
            Err(ScheduleError::InvalidPlacement(_))
        ));
        assert!(matches!(
            store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("NOPE")),
            Err(ScheduleError::InvalidContent(_))
        ));
        assert!(matches!(
            store.create(EntryDraft::at("V1", day(), at(10, 0)).with_group("NOPE")),
            Err(ScheduleError::InvalidContent(_))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_same_time_other_venue_is_fine() {
        let (_, store) = sample_store();
        store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();
        store.create(EntryDraft::at("V2", day(), at(10, 0)).with_work("A")).unwrap();
        let next_day = day().succ_opt().unwrap();
        store.create(EntryDraft::at("V1", next_day, at(10, 0)).with_work("A")).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_update_self_excluded() {
        let (_, store) = sample_store();
        let item = store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();

        // Unchanged fields: never conflicts with itself.
        let same = store
            .update(item.entry.id, EntryPatch::start_at(at(10, 0)))
            .unwrap();
        assert_eq!(same.entry.start_time, at(10, 0));

        // Shift within its own old interval.
        let moved = store
            .update(item.entry.id, EntryPatch::start_at(at(10, 30)))
            .unwrap();
        assert_eq!(moved.end_label(), "12:00");
    }

    #[test]
    fn test_update_conflict_keeps_stored_state() {
        let (_, store) = sample_store();
        store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();
        let second = store.create(EntryDraft::at("V1", day(), at(12, 0)).with_work("B")).unwrap();

        let err = store
            .update(second.entry.id, EntryPatch::start_at(at(11, 0)).with_notes("moved"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::OverlapConflict(_)));

        let unchanged = store.get(second.entry.id).unwrap();
        assert_eq!(unchanged.entry.start_time, at(12, 0));
        assert!(unchanged.entry.notes.is_none());
    }

    #[test]
    fn test_update_uses_merged_content() {
        let (_, store) = sample_store();
        store.create(EntryDraft::at("V1", day(), at(11, 45)).with_work("B")).unwrap();
        let first = store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("B")).unwrap();

        // Swapping content to the 120-minute group makes it run past 11:45.
        let err = store
            .update(first.entry.id, EntryPatch::default().with_group("G"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::OverlapConflict(_)));

        // A alone (90 min) ends at 11:30.
        let ok = store
            .update(first.entry.id, EntryPatch::default().with_work("A"))
            .unwrap();
        assert_eq!(ok.end_label(), "11:30");
    }

    #[test]
    fn test_metadata_only_update_skips_check() {
        let (catalog, store) = sample_store();
        let first = store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();
        store.create(EntryDraft::at("V1", day(), at(11, 30)).with_work("B")).unwrap();

        // The catalog edit makes the stored schedule overlap; existing entries
        // are not re-validated and a pure note edit still goes through.
        catalog.set_work_runtime(&WorkId::new("A"), 100);
        let item = store
            .update(first.entry.id, EntryPatch::default().with_notes("Director present"))
            .unwrap();
        assert_eq!(item.entry.notes.as_deref(), Some("Director present"));

        // Any placement-touching edit sees the new runtime.
        assert!(matches!(
            store.update(first.entry.id, EntryPatch::default().with_discussion(0)),
            Err(ScheduleError::OverlapConflict(_))
        ));
    }

    #[test]
    fn test_update_moves_between_slots() {
        let (_, store) = sample_store();
        let item = store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();
        store
            .update(item.entry.id, EntryPatch::default().with_venue("V2"))
            .unwrap();

        // Old slot is free again.
        store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();
        // New slot is occupied.
        assert!(store
            .create(EntryDraft::at("V2", day(), at(10, 0)).with_work("B"))
            .is_err());
    }

    #[test]
    fn test_update_unknown_id() {
        let (_, store) = sample_store();
        assert_eq!(
            store.update(EntryId::new(99), EntryPatch::default()).unwrap_err(),
            ScheduleError::NotFound(EntryId::new(99))
        );
    }

    #[test]
    fn test_delete() {
        let (_, store) = sample_store();
        let item = store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();
        let removed = store.delete(item.entry.id).unwrap();
        assert_eq!(removed.id, item.entry.id);
        assert!(store.is_empty());
        assert!(matches!(store.delete(item.entry.id), Err(ScheduleError::NotFound(_))));

        // Slot reusable after delete.
        store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();
    }

    #[test]
    fn test_list_order_and_filters() {
        let (_, store) = sample_store();
        let next_day = day().succ_opt().unwrap();
        store.create(EntryDraft::at("V2", day(), at(10, 0)).with_work("B")).unwrap();
        store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();
        store.create(EntryDraft::at("V1", day(), at(9, 0)).with_work("B")).unwrap();
        store.create(EntryDraft::at("V1", next_day, at(8, 0)).with_group("G")).unwrap();
        store.create(EntryDraft::at("V2", next_day, at(8, 0)).with_work("OLD")).unwrap();

        let all = store.list(&ScheduleFilter::all());
        let order: Vec<(NaiveDate, NaiveTime, &str)> = all
            .iter()
            .map(|i| (i.entry.day, i.entry.start_time, i.entry.venue_id.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (day(), at(9, 0), "V1"),
                (day(), at(10, 0), "V1"),
                (day(), at(10, 0), "V2"),
                (next_day, at(8, 0), "V1"),
                (next_day, at(8, 0), "V2"),
            ]
        );

        assert_eq!(store.list(&ScheduleFilter::all().with_day(next_day)).len(), 2);
        assert_eq!(store.list(&ScheduleFilter::all().with_venue("V2")).len(), 2);
        assert_eq!(store.list(&ScheduleFilter::all().with_edition("2025")).len(), 4);
        assert_eq!(
            store
                .list(&ScheduleFilter::all().with_edition("2024").with_day(next_day))
                .len(),
            1
        );
    }

    #[test]
    fn test_list_group_summary() {
        let (_, store) = sample_store();
        store.create(EntryDraft::at("V1", day(), at(10, 0)).with_group("G")).unwrap();
        let items = store.list(&ScheduleFilter::all());
        let summary = &items[0].summary;
        assert_eq!(summary.runtime_minutes, 120);
        let members: Vec<&str> = summary.member_ids.iter().map(|m| m.as_str()).collect();
        assert_eq!(members, vec!["A", "B"]);
    }

    #[test]
    fn test_title_override() {
        let (_, store) = sample_store();
        let item = store
            .create(
                EntryDraft::at("V1", day(), at(10, 0))
                    .with_work("A")
                    .with_title_override(LocalizedText::new("Eröffnung", "Opening Night")),
            )
            .unwrap();
        assert_eq!(item.display_title(), "Eröffnung");
    }

    #[test]
    fn test_check_overlap_dry_run() {
        let (_, store) = sample_store();
        let item = store.create(EntryDraft::at("V1", day(), at(10, 0)).with_work("A")).unwrap();

        let draft = EntryDraft::at("V1", day(), at(11, 0)).with_work("B");
        let check = store.check_overlap(&draft, None).unwrap();
        assert!(check.overlaps());
        assert_eq!(store.len(), 1);

        let check = store.check_overlap(&draft, Some(item.entry.id)).unwrap();
        assert!(!check.overlaps());
    }
}
