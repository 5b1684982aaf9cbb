#![forbid(unsafe_code)]
use chrono::NaiveDate;
use gardes::storage::{self, ASSIGNMENTS_KEY, STAFF_KEY};
use gardes::{
    Assignment, BlobStore, DirBlobStore, MemoryBlobStore, NewStaff, PersistListener, Planning,
    ShiftType,
};
use std::collections::HashSet;
use tempfile::tempdir;

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

fn sample() -> Planning {
    let mut planning = Planning::new();
    let a = planning
        .add_staff(NewStaff::new("Alice").with_department("Réa"))
        .unwrap();
    let b = planning.add_staff(NewStaff::new("Bob")).unwrap();
    planning.upsert(&a.id, d(1), ShiftType::Day).unwrap();
    planning.upsert(&b.id, d(1), ShiftType::Night).unwrap();
    planning.upsert(&a.id, d(4), ShiftType::Night).unwrap();
    planning
}

fn assignment_set(planning: &Planning) -> HashSet<(String, NaiveDate, ShiftType)> {
    planning
        .schedule()
        .iter()
        .map(|a| (a.staff_id.to_string(), a.date, a.shift))
        .collect()
}

#[test]
fn roundtrip_through_memory_store() {
    let store = MemoryBlobStore::new();
    let original = sample();
    storage::save_roster(&store, original.roster()).unwrap();
    storage::save_schedule(&store, original.schedule()).unwrap();

    let loaded = storage::load_planning(&store).unwrap();
    assert_eq!(loaded.roster(), original.roster());
    assert_eq!(assignment_set(&loaded), assignment_set(&original));
}

#[test]
fn missing_keys_load_as_empty() {
    let dir = tempdir().unwrap();
    let store = DirBlobStore::open(dir.path()).unwrap();
    assert!(store.load(STAFF_KEY).unwrap().is_none());
    let planning = storage::load_planning(&store).unwrap();
    assert!(planning.roster().is_empty());
    assert!(planning.schedule().is_empty());
}

#[test]
fn persist_listener_writes_after_each_mutation() {
    let dir = tempdir().unwrap();
    let store = DirBlobStore::open(dir.path()).unwrap();

    let mut planning = Planning::new();
    planning.subscribe(PersistListener::new(store.clone()));
    let alice = planning.add_staff(NewStaff::new("Alice")).unwrap();
    assert!(store.path_for(STAFF_KEY).exists());
    assert!(!store.path_for(ASSIGNMENTS_KEY).exists());

    planning.upsert(&alice.id, d(2), ShiftType::Day).unwrap();
    let reloaded = storage::load_planning(&store).unwrap();
    assert_eq!(reloaded.schedule().find(&alice.id, d(2)), Some(ShiftType::Day));

    planning.remove_staff(&alice.id).unwrap();
    let reloaded = storage::load_planning(&store).unwrap();
    assert!(reloaded.roster().is_empty());
    assert!(reloaded.schedule().is_empty());
}

#[test]
fn duplicate_keys_in_blob_are_rejected() {
    let store = MemoryBlobStore::new();
    let dup = vec![
        Assignment::new(gardes::StaffId::new("a"), d(1), ShiftType::Day),
        Assignment::new(gardes::StaffId::new("a"), d(1), ShiftType::Night),
    ];
    store
        .save(ASSIGNMENTS_KEY, &serde_json::to_vec(&dup).unwrap())
        .unwrap();
    assert!(storage::load_schedule(&store).is_err());
}

#[test]
fn wire_format_is_plain_json() {
    let store = MemoryBlobStore::new();
    let planning = sample();
    storage::save_schedule(&store, planning.schedule()).unwrap();
    let raw = String::from_utf8(store.load(ASSIGNMENTS_KEY).unwrap().unwrap()).unwrap();
    assert!(raw.contains("\"date\": \"2025-10-04\""));
    assert!(raw.contains("\"shift\": \"night\""));
}
