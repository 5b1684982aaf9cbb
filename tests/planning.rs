#![forbid(unsafe_code)]
use chrono::NaiveDate;
use gardes::{
    AssignOptions, DateRange, Mutation, MutationListener, NewStaff, Planning, PlanningError,
    RosterStore, ScheduleStore, ShiftType, StaffId, ValidationError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct Recorder {
    events: Rc<RefCell<Vec<Mutation>>>,
}

impl MutationListener for Recorder {
    fn on_mutation(
        &mut self,
        event: &Mutation,
        _roster: &RosterStore,
        _schedule: &ScheduleStore,
    ) -> anyhow::Result<()> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}

fn d(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).unwrap()
}

#[test]
fn remove_staff_cascades_assignments() {
    let mut planning = Planning::new();
    let alice = planning.add_staff(NewStaff::new("Alice")).unwrap();
    let bob = planning.add_staff(NewStaff::new("Bob")).unwrap();
    planning.upsert(&alice.id, d(10, 1), ShiftType::Day).unwrap();
    planning.upsert(&alice.id, d(10, 3), ShiftType::Night).unwrap();
    planning.upsert(&bob.id, d(10, 2), ShiftType::Day).unwrap();

    let removed = planning.remove_staff(&alice.id).unwrap();
    assert_eq!(removed.map(|s| s.name), Some("Alice".to_string()));
    assert!(!planning.roster().exists(&alice.id));
    for day in 1..=31 {
        assert_eq!(planning.schedule().find(&alice.id, d(10, day)), None);
    }
    assert_eq!(planning.schedule().find(&bob.id, d(10, 2)), Some(ShiftType::Day));

    assert!(planning.remove_staff(&alice.id).unwrap().is_none());
}

#[test]
fn listener_sees_each_successful_mutation() {
    let recorder = Recorder::default();
    let mut planning = Planning::new();
    planning.subscribe(recorder.clone());

    let alice = planning.add_staff(NewStaff::new("Alice")).unwrap();
    assert!(matches!(
        planning.add_staff(NewStaff::new("")),
        Err(PlanningError::Validation(ValidationError::EmptyName))
    ));
    planning.upsert(&alice.id, d(10, 1), ShiftType::Day).unwrap();
    planning.upsert(&alice.id, d(10, 1), ShiftType::Day).unwrap(); // inchangé
    planning.clear(&alice.id, d(10, 2)).unwrap(); // absent
    planning.toggle(&alice.id, d(10, 1), ShiftType::Day).unwrap();
    planning.remove_staff(&alice.id).unwrap();

    let events = recorder.events.borrow();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0], Mutation::StaffAdded(alice.id.clone()));
    assert!(matches!(events[1], Mutation::AssignmentSet(_, ShiftType::Day)));
    assert!(matches!(events[2], Mutation::AssignmentCleared(_)));
    assert_eq!(
        events[3],
        Mutation::StaffRemoved {
            id: alice.id.clone(),
            cascaded: 0
        }
    );
    assert!(events[3].touches_roster());
    assert!(!events[3].touches_schedule());
}

#[test]
fn regenerate_replaces_only_target_range() {
    let mut planning = Planning::new();
    let ids: Vec<StaffId> = ["A", "B", "C"]
        .iter()
        .map(|n| planning.add_staff(NewStaff::new(*n)).unwrap().id)
        .collect();
    planning.upsert(&ids[0], d(8, 31), ShiftType::Night).unwrap();
    planning.upsert(&ids[1], d(9, 15), ShiftType::Day).unwrap();

    let recorder = Recorder::default();
    planning.subscribe(recorder.clone());

    let range = DateRange::month(d(9, 1));
    let mut rng = StdRng::seed_from_u64(42);
    let outcome = planning
        .regenerate(range, &mut rng, AssignOptions::default())
        .unwrap();

    assert_eq!(planning.schedule().find(&ids[0], d(8, 31)), Some(ShiftType::Night));
    let in_range = planning.schedule().in_range(&range);
    assert_eq!(in_range.len(), outcome.assigned);
    assert_eq!(outcome.assigned + outcome.unassigned.len(), 30);
    for date in &outcome.unassigned {
        assert!(in_range.iter().all(|a| a.date != *date));
    }
    assert_eq!(
        recorder.events.borrow().as_slice(),
        &[Mutation::RangeReplaced {
            range,
            inserted: outcome.assigned
        }]
    );
}

#[test]
fn regenerate_with_empty_roster_is_noop() {
    let mut planning = Planning::new();
    let recorder = Recorder::default();
    planning.subscribe(recorder.clone());

    let range = DateRange::week(d(10, 22));
    let outcome = planning
        .regenerate(range, &mut StdRng::seed_from_u64(0), AssignOptions::default())
        .unwrap();
    assert_eq!(outcome.assigned, 0);
    assert_eq!(outcome.unassigned.len(), 7);
    assert!(planning.schedule().is_empty());
    assert!(recorder.events.borrow().is_empty());
}
