//! Tests for the in-memory schedule repository: id assignment, the tagged
//! create/update split, range filtering, and snapshots.

use agenda_engine::{
    AgendaError, HolidayMarker, ItemChange, ItemDraft, MemoryRepository, Priority, RecurringEvent,
    ScheduleRepository, ScheduleSet, ScheduledItem,
};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn draft(title: &str, day: u32) -> ItemDraft {
    ItemDraft {
        title: title.to_string(),
        due_date: date(day),
        start_time: None,
        end_time: None,
        priority: Priority::Medium,
        completed: false,
        official: false,
    }
}

fn class(id: &str, day_of_week: u8) -> RecurringEvent {
    RecurringEvent {
        id: id.to_string(),
        title: "CS101".to_string(),
        day_of_week,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        room: None,
    }
}

#[test]
fn create_assigns_sequential_ids() {
    let repo = MemoryRepository::new();

    let first = repo.apply_item(ItemChange::Create(draft("Grade quizzes", 2))).unwrap();
    let second = repo.apply_item(ItemChange::Create(draft("Order textbooks", 3))).unwrap();

    assert_eq!(first.id, "task-1");
    assert_eq!(second.id, "task-2");
}

#[test]
fn update_replaces_in_place_and_keeps_the_id() {
    let repo = MemoryRepository::new();
    let created = repo.apply_item(ItemChange::Create(draft("Draft syllabus", 2))).unwrap();

    let mut replacement = draft("Finalize syllabus", 2);
    replacement.completed = true;
    let updated = repo
        .apply_item(ItemChange::Update {
            id: created.id.clone(),
            draft: replacement,
        })
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Finalize syllabus");
    assert!(updated.completed);

    let listed = repo.list_items(date(2), date(2)).unwrap();
    assert_eq!(listed.len(), 1, "update does not add a second record");
    assert_eq!(listed[0].title, "Finalize syllabus");
}

#[test]
fn update_of_unknown_id_is_not_found() {
    let repo = MemoryRepository::new();

    let err = repo
        .apply_item(ItemChange::Update {
            id: "task-99".to_string(),
            draft: draft("Ghost", 2),
        })
        .unwrap_err();

    assert!(matches!(err, AgendaError::NotFound(_)));
}

#[test]
fn list_items_filters_by_inclusive_due_date_range() {
    let repo = MemoryRepository::new();
    repo.apply_item(ItemChange::Create(draft("Before", 1))).unwrap();
    repo.apply_item(ItemChange::Create(draft("On from", 2))).unwrap();
    repo.apply_item(ItemChange::Create(draft("Inside", 3))).unwrap();
    repo.apply_item(ItemChange::Create(draft("On to", 4))).unwrap();
    repo.apply_item(ItemChange::Create(draft("After", 5))).unwrap();

    let listed = repo.list_items(date(2), date(4)).unwrap();

    let titles: Vec<&str> = listed.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["On from", "Inside", "On to"]);
}

#[test]
fn delete_item_removes_it() {
    let repo = MemoryRepository::new();
    let created = repo.apply_item(ItemChange::Create(draft("Temp", 2))).unwrap();

    repo.delete_item(&created.id).unwrap();

    assert!(repo.list_items(date(1), date(31)).unwrap().is_empty());
    assert!(matches!(
        repo.delete_item(&created.id).unwrap_err(),
        AgendaError::NotFound(_)
    ));
}

#[test]
fn seeded_ids_are_never_reissued() {
    let seeded_item = ScheduledItem {
        id: "task-1".to_string(),
        title: "Pre-existing".to_string(),
        due_date: date(2),
        start_time: None,
        end_time: None,
        priority: Priority::Low,
        completed: false,
        official: false,
    };
    let repo = MemoryRepository::seeded(ScheduleSet {
        routine: vec![],
        tasks: vec![seeded_item],
        holidays: vec![],
    });

    let created = repo.apply_item(ItemChange::Create(draft("New", 2))).unwrap();

    assert_ne!(created.id, "task-1", "allocation skips ids already in use");
    assert_eq!(repo.list_items(date(2), date(2)).unwrap().len(), 2);
}

#[test]
fn routine_add_update_delete_roundtrip() {
    let repo = MemoryRepository::new();
    repo.add_routine(class("cs101", 1)).unwrap();
    repo.add_routine(class("cs305", 3)).unwrap();

    let mut moved = class("cs101", 1);
    moved.day_of_week = 2;
    repo.update_routine(moved).unwrap();

    let routine = repo.list_routine().unwrap();
    assert_eq!(routine.len(), 2);
    assert_eq!(routine[0].day_of_week, 2, "update replaced the record");

    repo.delete_routine("cs305").unwrap();
    assert_eq!(repo.list_routine().unwrap().len(), 1);
}

#[test]
fn routine_update_and_delete_require_a_known_id() {
    let repo = MemoryRepository::new();

    assert!(matches!(
        repo.update_routine(class("ghost", 1)).unwrap_err(),
        AgendaError::NotFound(_)
    ));
    assert!(matches!(
        repo.delete_routine("ghost").unwrap_err(),
        AgendaError::NotFound(_)
    ));
}

#[test]
fn holidays_filter_by_inclusive_range() {
    let repo = MemoryRepository::seeded(ScheduleSet {
        routine: vec![],
        tasks: vec![],
        holidays: vec![
            HolidayMarker {
                date: date(1),
                name: "Outside".to_string(),
            },
            HolidayMarker {
                date: date(4),
                name: "Founders Day".to_string(),
            },
        ],
    });

    let listed = repo.list_holidays(date(2), date(8)).unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Founders Day");
}

#[test]
fn snapshot_bundles_routine_items_and_holidays() {
    let repo = MemoryRepository::new();
    repo.add_routine(class("cs101", 1)).unwrap();
    let mut timed = draft("Staff meeting", 2);
    timed.start_time = Some(Utc.with_ymd_and_hms(2026, 3, 2, 11, 0, 0).unwrap());
    timed.end_time = Some(Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap());
    repo.apply_item(ItemChange::Create(timed)).unwrap();

    let set = repo.snapshot(date(2), date(8)).unwrap();

    assert_eq!(set.routine.len(), 1, "routine is range-independent");
    assert_eq!(set.tasks.len(), 1);
    assert!(set.holidays.is_empty());
}
