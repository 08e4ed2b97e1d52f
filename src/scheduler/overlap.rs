//! Venue/day overlap detection.
//!
//! # Algorithm
//!
//! 1. Candidate interval = [start, start + runtime(content) + discussion).
//! 2. Scan existing entries in the same venue and day, skipping the entry
//!    being edited (if any).
//! 3. Recompute each existing entry's interval from its content's current
//!    runtime plus its own discussion time.
//! 4. Intervals [s1,e1) and [s2,e2) conflict iff `s1 < e2 && e1 > s2`.
//!    Back-to-back placements (one ends at M, the next starts at M) are legal.
//! 5. Report the first conflict in scan order (ascending entry ID); one
//!    conflict is enough to block a write.
//!
//! # Complexity
//! O(n) in the number of entries in the venue/day, one catalog lookup each.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RuntimeAggregator;
use crate::catalog::Catalog;
use crate::models::{EntryDraft, EntryId, Interval, Placement, ScheduleEntry};
use crate::error::ScheduleResult;

/// Two intervals that cannot share a venue/day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// The existing entry the candidate collides with.
    pub existing_entry_id: EntryId,
    /// Interval occupied by the existing entry.
    pub existing: Interval,
    /// Interval the candidate would occupy.
    pub candidate: Interval,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Overlaps with an existing entry in this venue from {} to {} (requested {} to {})",
            self.existing.start_label(),
            self.existing.end_label(),
            self.candidate.start_label(),
            self.candidate.end_label(),
        )
    }
}

/// Result of an overlap check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapCheck {
    /// Interval the candidate would occupy.
    pub candidate: Interval,
    /// First conflict found, if any.
    pub conflict: Option<Conflict>,
}

impl OverlapCheck {
    /// Whether the candidate collides with an existing entry.
    pub fn overlaps(&self) -> bool {
        self.conflict.is_some()
    }
}

/// Checks candidate placements against existing entries.
#[derive(Clone, Copy)]
pub struct OverlapDetector<'a> {
    runtime: RuntimeAggregator<'a>,
}

impl<'a> OverlapDetector<'a> {
    /// Creates a detector reading durations from `catalog`.
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self {
            runtime: RuntimeAggregator::new(catalog),
        }
    }

    /// Interval a placement would occupy.
    pub fn interval_of(&self, placement: &Placement) -> Interval {
        Interval::from_start(
            placement.start_minute(),
            self.runtime
                .total_duration(&placement.content, placement.discussion_minutes),
        )
    }

    /// Interval a committed entry currently occupies.
    pub fn entry_interval(&self, entry: &ScheduleEntry) -> Interval {
        Interval::from_start(entry.start_minute(), self.runtime.entry_duration(entry))
    }

    /// Checks a validated placement.
    ///
    /// `existing` may contain entries from other venues or days; they are
    /// ignored. Entries are scanned in the order given.
    pub fn check<'e, I>(
        &self,
        placement: &Placement,
        existing: I,
        exclude: Option<EntryId>,
    ) -> OverlapCheck
    where
        I: IntoIterator<Item = &'e ScheduleEntry>,
    {
        let candidate = self.interval_of(placement);

        let conflict = existing
            .into_iter()
            .filter(|e| Some(e.id) != exclude)
            .filter(|e| e.venue_id == placement.venue_id && e.day == placement.day)
            .find_map(|e| {
                let interval = self.entry_interval(e);
                candidate.overlaps(&interval).then_some(Conflict {
                    existing_entry_id: e.id,
                    existing: interval,
                    candidate,
                })
            });

        debug!(
            venue = %placement.venue_id,
            day = %placement.day,
            start = %candidate.start_label(),
            end = %candidate.end_label(),
            overlaps = conflict.is_some(),
            "overlap check"
        );

        OverlapCheck {
            candidate,
            conflict,
        }
    }

    /// Validates a raw draft and checks it.
    ///
    /// # Errors
    /// `InvalidPlacement` / `InvalidContent` if the draft is incomplete.
    pub fn check_draft<'e, I>(
        &self,
        draft: &EntryDraft,
        existing: I,
        exclude: Option<EntryId>,
    ) -> ScheduleResult<OverlapCheck>
    where
        I: IntoIterator<Item = &'e ScheduleEntry>,
    {
        let placement = draft.placement()?;
        Ok(self.check(&placement, existing, exclude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::error::ScheduleError;
    use crate::models::{EntryContent, Group, Work, WorkId};
    use chrono::{NaiveDate, NaiveTime};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 10).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_work(Work::new("A", "Work A", 90))
            .with_work(Work::new("B", "Work B", 30))
            .with_group(Group::new("G", "Block").with_member("A").with_member("B"))
    }

    fn placement(venue: &str, start: NaiveTime, content: EntryContent, discussion: u32) -> Placement {
        Placement {
            venue_id: venue.into(),
            day: day(),
            start_time: start,
            content,
            discussion_minutes: discussion,
        }
    }

    fn entry(id: u64, venue: &str, start: NaiveTime, content: EntryContent) -> ScheduleEntry {
        ScheduleEntry::from_placement(EntryId::new(id), placement(venue, start, content, 0))
    }

    #[test]
    fn test_back_to_back_is_allowed() {
        let catalog = catalog();
        let detector = OverlapDetector::new(&catalog);
        let existing = vec![entry(1, "V", at(10, 0), EntryContent::Work("A".into()))];

        let check = detector.check(
            &placement("V", at(11, 30), EntryContent::Work("B".into()), 0),
            &existing,
            None,
        );
        assert!(!check.overlaps());
        assert_eq!(check.candidate, Interval { start: 690, end: 720 });

        // Ending exactly when the existing one starts.
        let check = detector.check(
            &placement("V", at(9, 30), EntryContent::Work("B".into()), 0),
            &existing,
            None,
        );
        assert!(!check.overlaps());
    }

    #[test]
    fn test_overlap_reports_both_intervals() {
        let catalog = catalog();
        let detector = OverlapDetector::new(&catalog);
        let existing = vec![entry(1, "V", at(10, 0), EntryContent::Work("A".into()))];

        let check = detector.check(
            &placement("V", at(11, 0), EntryContent::Work("B".into()), 0),
            &existing,
            None,
        );
        let conflict = check.conflict.unwrap();
        assert_eq!(conflict.existing_entry_id, EntryId::new(1));
        assert_eq!(conflict.existing.start_label(), "10:00");
        assert_eq!(conflict.existing.end_label(), "11:30");
        assert_eq!(conflict.candidate.start_label(), "11:00");
        assert_eq!(conflict.candidate.end_label(), "11:30");
    }

    #[test]
    fn test_discussion_time_extends_interval() {
        let catalog = catalog();
        let detector = OverlapDetector::new(&catalog);
        let mut first = entry(1, "V", at(10, 0), EntryContent::Work("A".into()));
        first.discussion_minutes = 15;
        let existing = vec![first];

        // 11:30 would be back-to-back without the 15 minute discussion.
        let check = detector.check(
            &placement("V", at(11, 30), EntryContent::Work("B".into()), 0),
            &existing,
            None,
        );
        assert!(check.overlaps());
        assert_eq!(check.conflict.unwrap().existing.end_label(), "11:45");
    }

    #[test]
    fn test_other_venue_or_day_ignored() {
        let catalog = catalog();
        let detector = OverlapDetector::new(&catalog);
        let mut other_day = entry(2, "V", at(10, 0), EntryContent::Work("A".into()));
        other_day.day = day().succ_opt().unwrap();
        let existing = vec![entry(1, "OTHER", at(10, 0), EntryContent::Work("A".into())), other_day];

        let check = detector.check(
            &placement("V", at(10, 0), EntryContent::Work("A".into()), 0),
            &existing,
            None,
        );
        assert!(!check.overlaps());
    }

    #[test]
    fn test_self_exclusion() {
        let catalog = catalog();
        let detector = OverlapDetector::new(&catalog);
        let e = entry(1, "V", at(10, 0), EntryContent::Work("A".into()));
        let existing = vec![e.clone()];

        let check = detector.check(&e.placement(), &existing, Some(e.id));
        assert!(!check.overlaps());

        let check = detector.check(&e.placement(), &existing, None);
        assert!(check.overlaps());
    }

    #[test]
    fn test_first_conflict_in_scan_order() {
        let catalog = catalog();
        let detector = OverlapDetector::new(&catalog);
        let existing = vec![
            entry(1, "V", at(10, 0), EntryContent::Work("B".into())),
            entry(2, "V", at(10, 30), EntryContent::Work("B".into())),
        ];

        let check = detector.check(
            &placement("V", at(10, 0), EntryContent::Work("A".into()), 0),
            &existing,
            None,
        );
        assert_eq!(check.conflict.unwrap().existing_entry_id, EntryId::new(1));
    }

    #[test]
    fn test_group_runtime_used_for_existing_entries() {
        let catalog = catalog();
        let detector = OverlapDetector::new(&catalog);
        // Group = 90 + 30 = 120 → [10:00, 12:00)
        let existing = vec![entry(1, "V", at(10, 0), EntryContent::Group("G".into()))];

        let check = detector.check(
            &placement("V", at(11, 45), EntryContent::Work("B".into()), 0),
            &existing,
            None,
        );
        assert!(check.overlaps());
        assert_eq!(check.conflict.unwrap().existing.end_label(), "12:00");

        let check = detector.check(
            &placement("V", at(12, 0), EntryContent::Work("B".into()), 0),
            &existing,
            None,
        );
        assert!(!check.overlaps());
    }

    #[test]
    fn test_existing_interval_recomputed_after_runtime_edit() {
        let catalog = catalog();
        let detector = OverlapDetector::new(&catalog);
        let existing = vec![entry(1, "V", at(10, 0), EntryContent::Work("A".into()))];
        let candidate = placement("V", at(11, 30), EntryContent::Work("B".into()), 0);

        assert!(!detector.check(&candidate, &existing, None).overlaps());
        catalog.set_work_runtime(&WorkId::new("A"), 100);
        assert!(detector.check(&candidate, &existing, None).overlaps());
    }

    #[test]
    fn test_check_draft_validation() {
        let catalog = catalog();
        let detector = OverlapDetector::new(&catalog);
        let existing: Vec<ScheduleEntry> = Vec::new();

        let draft = EntryDraft::at("V", day(), at(10, 0));
        assert!(matches!(
            detector.check_draft(&draft, &existing, None),
            Err(ScheduleError::InvalidContent(_))
        ));

        let draft = EntryDraft::at("V", day(), at(10, 0)).with_work("A").with_group("G");
        assert!(matches!(
            detector.check_draft(&draft, &existing, None),
            Err(ScheduleError::InvalidContent(_))
        ));

        let draft = EntryDraft {
            work_id: Some("A".into()),
            ..EntryDraft::default()
        };
        assert!(matches!(
            detector.check_draft(&draft, &existing, None),
            Err(ScheduleError::InvalidPlacement(_))
        ));
    }

    #[test]
    fn test_overlap_symmetry_random() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let catalog = InMemoryCatalog::new();
        let detector = OverlapDetector::new(&catalog);
        let mut rng = StdRng::seed_from_u64(42);

        for i in 0..500u64 {
            let a_runtime = rng.random_range(0..240);
            let b_runtime = rng.random_range(0..240);
            catalog.insert_work(Work::new("WA", "a", a_runtime));
            catalog.insert_work(Work::new("WB", "b", b_runtime));

            let a_start = crate::models::time::time_from_minutes(rng.random_range(0..1440)).unwrap();
            let b_start = crate::models::time::time_from_minutes(rng.random_range(0..1440)).unwrap();
            let a = entry(i * 2, "V", a_start, EntryContent::Work("WA".into()));
            let b = entry(i * 2 + 1, "V", b_start, EntryContent::Work("WB".into()));

            let a_vs_b = detector.check(&a.placement(), std::slice::from_ref(&b), None);
            let b_vs_a = detector.check(&b.placement(), std::slice::from_ref(&a), None);
            assert_eq!(a_vs_b.overlaps(), b_vs_a.overlaps(), "round {i}");
        }
    }
}
