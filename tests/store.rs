#![forbid(unsafe_code)]
use chrono::NaiveDate;
use labshift::{
    Catalog, ConflictKind, DetectOptions, EntryId, EntryPatch, Schedule, ScheduleEntry,
    ScheduleId, ScheduleStore, Severity, Staff, StaffId, StoreError, TimeSlot, TimeSlotId,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

fn entry(id: &str, staff: &str, slot: &str) -> ScheduleEntry {
    ScheduleEntry::new(StaffId::new(staff), TimeSlotId::new(slot), day(), "bench")
        .with_id(EntryId::new(id))
}

fn store_with_schedule() -> (ScheduleStore, ScheduleId) {
    let mut store = ScheduleStore::new();
    let id = store.create_schedule(day()).unwrap();
    (store, id)
}

#[test]
fn add_entry_requires_a_current_schedule() {
    let mut store = ScheduleStore::new();
    let err = store.add_entry(entry("e1", "A", "s1")).unwrap_err();
    assert_eq!(err, StoreError::NoCurrentSchedule);
}

#[test]
fn one_schedule_per_date() {
    let (mut store, _) = store_with_schedule();
    assert_eq!(
        store.create_schedule(day()).unwrap_err(),
        StoreError::DuplicateDate(day())
    );
}

#[test]
fn add_entry_appends_and_stamps() {
    let (mut store, id) = store_with_schedule();
    let before = store.schedule(&id).unwrap().updated_at;

    let schedule = store.add_entry(entry("e1", "A", "s1")).unwrap();
    assert_eq!(schedule.entries.len(), 1);
    assert!(schedule.updated_at >= before);
    assert_eq!(schedule.entries[0].updated_at, schedule.updated_at);
}

#[test]
fn entry_ids_are_unique_within_a_schedule() {
    let (mut store, _) = store_with_schedule();
    store.add_entry(entry("e1", "A", "s1")).unwrap();
    let err = store.add_entry(entry("e1", "B", "s2")).unwrap_err();
    assert_eq!(err, StoreError::DuplicateEntry(EntryId::new("e1")));
    assert_eq!(store.current().unwrap().entries.len(), 1);
}

#[test]
fn update_entry_merges_only_given_fields() {
    let (mut store, _) = store_with_schedule();
    let mut original = entry("e1", "A", "s1");
    original.notes = Some("bring badge".into());
    store.add_entry(original).unwrap();

    let patch = EntryPatch {
        time_slot_id: Some(TimeSlotId::new("s2")),
        station: Some(Some("chemistry".into())),
        is_break: Some(true),
        ..EntryPatch::default()
    };
    let updated = store.update_entry(&EntryId::new("e1"), patch).unwrap();

    assert_eq!(updated.time_slot_id, TimeSlotId::new("s2"));
    assert_eq!(updated.station.as_deref(), Some("chemistry"));
    assert!(updated.is_break);
    assert_eq!(updated.staff_id, StaffId::new("A"));
    assert_eq!(updated.notes.as_deref(), Some("bring badge"));
}

#[test]
fn update_can_clear_optional_fields() {
    let (mut store, _) = store_with_schedule();
    let mut original = entry("e1", "A", "s1");
    original.notes = Some("temp".into());
    store.add_entry(original).unwrap();

    let patch = EntryPatch {
        notes: Some(None),
        ..EntryPatch::default()
    };
    let updated = store.update_entry(&EntryId::new("e1"), patch).unwrap();
    assert_eq!(updated.notes, None);
}

#[test]
fn update_of_unknown_entry_is_a_silent_noop() {
    let (mut store, _) = store_with_schedule();
    store.add_entry(entry("e1", "A", "s1")).unwrap();
    let snapshot = store.current().unwrap().clone();

    let patch = EntryPatch {
        role: Some("courier".into()),
        ..EntryPatch::default()
    };
    assert!(store.update_entry(&EntryId::new("missing"), patch).is_none());
    assert_eq!(store.current().unwrap(), &snapshot);
}

#[test]
fn remove_entry_filters_it_out() {
    let (mut store, _) = store_with_schedule();
    store.add_entry(entry("e1", "A", "s1")).unwrap();
    store.add_entry(entry("e2", "A", "s2")).unwrap();

    let removed = store.remove_entry(&EntryId::new("e1")).unwrap();
    assert_eq!(removed.id, EntryId::new("e1"));
    let ids: Vec<_> = store
        .current()
        .unwrap()
        .entries
        .iter()
        .map(|e| e.id.as_str().to_string())
        .collect();
    assert_eq!(ids, vec!["e2"]);
    assert!(store.remove_entry(&EntryId::new("e1")).is_none());
}

#[test]
fn duplicated_pair_yields_exactly_one_conflict() {
    let (mut store, id) = store_with_schedule();
    store.add_entry(entry("e1", "A", "s1")).unwrap();
    store.add_entry(entry("e2", "A", "s1")).unwrap();

    let conflicts = store.detect_conflicts_for_schedule(&id).unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].kind, ConflictKind::DoubleBooking);
    assert_eq!(conflicts[0].severity, Severity::Error);
    assert_eq!(conflicts[0].staff_id, StaffId::new("A"));
    assert_eq!(conflicts[0].time_slot_id, TimeSlotId::new("s1"));
}

#[test]
fn sweep_flags_each_repeat_and_ignores_distinct_pairs() {
    let (mut store, id) = store_with_schedule();
    for (e, staff, slot) in [
        ("e1", "A", "s1"),
        ("e2", "B", "s1"),
        ("e3", "A", "s2"),
        ("e4", "A", "s1"),
        ("e5", "A", "s1"),
    ] {
        store.add_entry(entry(e, staff, slot)).unwrap();
    }
    assert_eq!(store.detect_conflicts_for_schedule(&id).unwrap().len(), 2);
}

#[test]
fn sweep_replaces_conflicts_and_mutations_invalidate_them() {
    let (mut store, id) = store_with_schedule();
    store.add_entry(entry("e1", "A", "s1")).unwrap();
    store.add_entry(entry("e2", "A", "s1")).unwrap();
    assert_eq!(store.detect_conflicts_for_schedule(&id).unwrap().len(), 1);

    store.remove_entry(&EntryId::new("e2")).unwrap();
    assert!(store.conflicts().is_empty());
    assert!(store.detect_conflicts_for_schedule(&id).unwrap().is_empty());
}

#[test]
fn sweep_of_unknown_schedule_is_an_error() {
    let mut store = ScheduleStore::new();
    let ghost = ScheduleId::new("ghost");
    assert_eq!(
        store.detect_conflicts_for_schedule(&ghost).unwrap_err(),
        StoreError::UnknownSchedule(ghost)
    );
}

#[test]
fn publish_is_ungated_and_idempotent() {
    let (mut store, id) = store_with_schedule();
    store.add_entry(entry("e1", "A", "s1")).unwrap();
    store.add_entry(entry("e2", "A", "s1")).unwrap();
    assert!(!store.detect_conflicts_for_schedule(&id).unwrap().is_empty());

    assert!(store.publish_schedule(&id).unwrap().published);
    assert!(store.publish_schedule(&id).unwrap().published);
}

#[test]
fn select_date_switches_current_schedule() {
    let (mut store, first) = store_with_schedule();
    let next_day = day().succ_opt().unwrap();
    let second = store.create_schedule(next_day).unwrap();
    assert_eq!(store.current().unwrap().id, first);

    store.select_date(next_day).unwrap();
    store.add_entry(entry("e1", "A", "s1")).unwrap();
    assert_eq!(store.schedule(&second).unwrap().entries.len(), 1);
    assert!(store.schedule(&first).unwrap().entries.is_empty());
    assert_eq!(
        store.select_date(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap()).unwrap_err(),
        StoreError::UnknownDate(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap())
    );
}

#[test]
fn check_entry_runs_all_rules_against_current_schedule() {
    let mut staff = Staff::new("Alice", "technologist");
    staff.id = StaffId::new("A");
    let catalog = Catalog {
        staff: vec![staff],
        time_slots: vec![
            TimeSlot::new("am", "08:00", "12:00").unwrap(),
            TimeSlot::new("early", "09:00", "10:00").unwrap(),
        ],
    };
    let (mut store, _) = store_with_schedule();
    store.add_entry(entry("e1", "A", "am")).unwrap();

    let conflicts = store.check_entry(&entry("e2", "A", "early"), &catalog, DetectOptions::default());
    let kinds: Vec<_> = conflicts.iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![ConflictKind::DoubleBooking, ConflictKind::BreakViolation]
    );
}

#[test]
fn loaded_schedules_keep_entry_ids_unique() {
    let mut schedule = Schedule::new(day());
    schedule.entries = vec![entry("e1", "A", "s1"), entry("e1", "B", "s2")];

    let err = ScheduleStore::from_schedules(vec![schedule]).unwrap_err();
    assert_eq!(err, StoreError::DuplicateEntry(EntryId::new("e1")));
}

#[test]
fn loaded_schedules_keep_one_schedule_per_date() {
    let err = ScheduleStore::from_schedules(vec![Schedule::new(day()), Schedule::new(day())])
        .unwrap_err();
    assert_eq!(err, StoreError::DuplicateDate(day()));
}

#[test]
fn loaded_schedules_make_the_first_one_current() {
    let mut first = Schedule::new(day());
    first.entries = vec![entry("e1", "A", "s1"), entry("e2", "A", "s2")];
    let second = Schedule::new(day().succ_opt().unwrap());
    let first_id = first.id.clone();

    let store = ScheduleStore::from_schedules(vec![first, second]).unwrap();
    assert_eq!(store.current().unwrap().id, first_id);
    assert_eq!(store.into_schedules().len(), 2);
}
