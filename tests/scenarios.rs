//! End-to-end scheduling scenarios through the public API.

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::{NaiveDate, NaiveTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use fest_schedule::catalog::InMemoryCatalog;
use fest_schedule::models::time::time_from_minutes;
use fest_schedule::models::{EntryDraft, EntryPatch, Group, Venue, Work, WorkId};
use fest_schedule::scheduler::{RuntimeAggregator, ScheduleFilter, ScheduleStore};
use fest_schedule::timeline::{DragRescheduler, DragTarget, DropOutcome, TimelineProjector};
use fest_schedule::ScheduleError;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 10).unwrap()
}

fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn festival() -> (Arc<InMemoryCatalog>, ScheduleStore) {
    let catalog = Arc::new(
        InMemoryCatalog::new()
            .with_venue(Venue::new("V", "Main hall").with_position(1))
            .with_venue(Venue::new("W", "Studio").with_position(2))
            .with_work(Work::new("A", "Work A", 90))
            .with_work(Work::new("B", "Work B", 30))
            .with_work(Work::new("X", "Work X", 40))
            .with_work(Work::new("Y", "Work Y", 25))
            .with_group(Group::new("XY", "Shorts").with_member("X").with_member("Y"))
            .with_group(Group::new("YX", "Shorts reversed").with_member("Y").with_member("X")),
    );
    let store = ScheduleStore::new(catalog.clone());
    (catalog, store)
}

#[test]
fn test_boundary_adjacent_then_overlap() {
    let (_, store) = festival();

    let first = store
        .create(EntryDraft::at("V", day(), at(10, 0)).with_work("A"))
        .unwrap();
    assert_eq!(first.interval.start_label(), "10:00");
    assert_eq!(first.interval.end_label(), "11:30");

    let adjacent = store.check_overlap(&EntryDraft::at("V", day(), at(11, 30)).with_work("B"), None);
    assert!(!adjacent.unwrap().overlaps());

    let err = store
        .create(EntryDraft::at("V", day(), at(11, 0)).with_work("B"))
        .unwrap_err();
    match err {
        ScheduleError::OverlapConflict(conflict) => {
            assert_eq!(conflict.existing_entry_id, first.entry.id);
            assert_eq!(conflict.existing.start_label(), "10:00");
            assert_eq!(conflict.existing.end_label(), "11:30");
            assert_eq!(conflict.candidate.start_label(), "11:00");
            assert_eq!(conflict.candidate.end_label(), "11:30");
        }
        other => panic!("expected overlap, got {other:?}"),
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn test_group_duration_scenario() {
    let (catalog, _) = festival();
    let runtime = RuntimeAggregator::new(catalog.as_ref());
    let xy = catalog_group(&catalog, "XY");
    let yx = catalog_group(&catalog, "YX");
    assert_eq!(runtime.group_duration(&xy), 65);
    assert_eq!(runtime.group_duration(&yx), 65);
}

fn catalog_group(catalog: &InMemoryCatalog, id: &str) -> Group {
    use fest_schedule::catalog::Catalog;
    catalog.group(&id.into()).unwrap()
}

#[test]
fn test_other_venue_and_day_do_not_conflict() {
    let (_, store) = festival();
    store
        .create(EntryDraft::at("V", day(), at(10, 0)).with_work("A"))
        .unwrap();
    assert!(store
        .create(EntryDraft::at("W", day(), at(10, 0)).with_work("A"))
        .is_ok());
    assert!(store
        .create(EntryDraft::at("V", day().succ_opt().unwrap(), at(10, 0)).with_work("A"))
        .is_ok());
}

#[test]
fn test_self_exclusion_on_update() {
    let (_, store) = festival();
    let item = store
        .create(EntryDraft::at("V", day(), at(14, 0)).with_group("XY").with_discussion(15))
        .unwrap();
    assert_eq!(item.total_minutes, 80);

    let same = store
        .update(item.entry.id, EntryPatch::start_at(at(14, 0)))
        .unwrap();
    assert_eq!(same.entry.start_time, at(14, 0));

    let check = store
        .check_overlap(
            &EntryDraft::at("V", day(), at(14, 0)).with_group("XY").with_discussion(15),
            Some(item.entry.id),
        )
        .unwrap();
    assert!(!check.overlaps());
}

#[test]
fn test_runtime_edit_is_seen_by_next_check() {
    let (catalog, store) = festival();
    store
        .create(EntryDraft::at("V", day(), at(10, 0)).with_work("B"))
        .unwrap();
    assert!(!store
        .check_overlap(&EntryDraft::at("V", day(), at(10, 30)).with_work("B"), None)
        .unwrap()
        .overlaps());

    catalog.set_work_runtime(&WorkId::new("B"), 45);
    assert!(store
        .check_overlap(&EntryDraft::at("V", day(), at(10, 30)).with_work("B"), None)
        .unwrap()
        .overlaps());
}

#[test]
fn test_concurrent_double_booking_has_one_winner() {
    let (_, store) = festival();
    let store = Arc::new(store);
    let contenders = 16;
    let barrier = Arc::new(Barrier::new(contenders));

    let handles: Vec<_> = (0..contenders)
        .map(|i| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                // Every candidate intersects [10:00, 11:30).
                let start = at(10, (i % 4) as u32 * 15);
                store.create(EntryDraft::at("V", day(), start).with_work("A"))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, ScheduleError::OverlapConflict(_))));
    assert_eq!(store.list(&ScheduleFilter::all()).len(), 1);
}

#[test]
fn test_random_placements_never_overlap() {
    let (_, store) = festival();
    let mut rng = StdRng::seed_from_u64(42);
    let works = ["A", "B", "X", "Y"];

    for _ in 0..300 {
        let start = time_from_minutes(rng.random_range(8 * 60..23 * 60) / 15 * 15).unwrap();
        let work = works[rng.random_range(0..works.len())];
        let _ = store.create(
            EntryDraft::at("V", day(), start)
                .with_work(work)
                .with_discussion(rng.random_range(0..30)),
        );
    }

    let items = store.list(&ScheduleFilter::all().with_venue("V"));
    assert!(!items.is_empty());
    for (i, a) in items.iter().enumerate() {
        for b in &items[i + 1..] {
            assert!(!a.interval.overlaps(&b.interval), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn test_drag_flow_against_store() {
    let (_, store) = festival();
    store
        .create(EntryDraft::at("V", day(), at(10, 0)).with_work("A"))
        .unwrap();
    let short = store
        .create(EntryDraft::at("V", day(), at(15, 0)).with_work("B"))
        .unwrap();

    let projector = TimelineProjector::default();
    let mut drag = DragRescheduler::new(projector);

    // Into a conflict: rejected and snapped back.
    drag.begin(DragTarget::from_item(&short), projector.time_to_fraction(at(15, 0)))
        .unwrap();
    drag.pointer_move(projector.time_to_fraction(at(11, 0))).unwrap();
    match drag.drop_and_commit(&store).unwrap() {
        DropOutcome::Rejected { original_start, .. } => assert_eq!(original_start, at(15, 0)),
        other => panic!("expected rejection, got {other:?}"),
    }

    // Right after the long entry: accepted.
    drag.begin(DragTarget::from_item(&short), projector.time_to_fraction(at(15, 0)))
        .unwrap();
    drag.pointer_move(projector.time_to_fraction(at(11, 30))).unwrap();
    assert!(drag.drop_and_commit(&store).unwrap().is_committed());

    let listed = store.list(&ScheduleFilter::all().with_day(day()));
    let starts: Vec<_> = listed.iter().map(|i| i.entry.start_time).collect();
    assert_eq!(starts, vec![at(10, 0), at(11, 30)]);
}

#[test]
fn test_timeline_lanes_for_day() {
    let (catalog, store) = festival();
    store
        .create(EntryDraft::at("W", day(), at(12, 0)).with_work("B"))
        .unwrap();
    store
        .create(EntryDraft::at("V", day(), at(16, 0)).with_group("XY"))
        .unwrap();
    store
        .create(EntryDraft::at("V", day(), at(8, 0)).with_work("A"))
        .unwrap();

    use fest_schedule::catalog::Catalog;
    let projector = TimelineProjector::default();
    let items = store.list(&ScheduleFilter::all().with_day(day()));
    let lanes = projector.lanes(&items, &catalog.venues());

    assert_eq!(lanes.len(), 2);
    assert_eq!(lanes[0].venue_id.as_str(), "V");
    let starts: Vec<_> = lanes[0].boxes.iter().map(|b| b.start.as_str()).collect();
    assert_eq!(starts, vec!["08:00", "16:00"]);
    assert_eq!(lanes[0].boxes[0].left, 0.0);
    assert_eq!(lanes[0].boxes[1].left, 0.5);
    assert_eq!(lanes[1].boxes.len(), 1);
}
