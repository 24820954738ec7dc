use chrono::{NaiveDate, NaiveTime};
use planner_core::db::migrations::latest_version;
use planner_core::db::open_db_in_memory;
use planner_core::{
    Category, Event, MemoryPlannerRepository, PlannerRepository, RepoError,
    SqlitePlannerRepository, Task,
};
use rusqlite::Connection;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn event(name: &str, day: u32, start: u32, end: u32) -> Event {
    Event::new(name, date(day), time(start, 0), time(end, 0)).unwrap()
}

#[test]
fn events_roundtrip_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePlannerRepository::try_new(&conn).unwrap();

    let late = event("Review", 10, 14, 15);
    let early = event("Standup", 10, 9, 9);
    repo.insert_event(&late).unwrap();
    repo.insert_event(&early).unwrap();

    assert_eq!(repo.load_all_events().unwrap(), vec![late, early]);
}

#[test]
fn events_are_stored_in_documented_text_formats() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePlannerRepository::try_new(&conn).unwrap();
    repo.insert_event(&event("Standup", 10, 9, 10)).unwrap();

    let (event_date, time_start, time_end): (String, String, String) = conn
        .query_row(
            "SELECT event_date, time_start, time_end FROM events;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(event_date, "2024-01-10");
    assert_eq!(time_start, "09:00:00");
    assert_eq!(time_end, "10:00:00");
}

#[test]
fn delete_event_matches_full_tuple() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePlannerRepository::try_new(&conn).unwrap();
    let kept = event("Standup", 10, 9, 10);
    let other_day = event("Standup", 11, 9, 10);
    repo.insert_event(&kept).unwrap();
    repo.insert_event(&other_day).unwrap();

    assert_eq!(repo.delete_event(&other_day).unwrap(), 1);
    assert_eq!(repo.delete_event(&other_day).unwrap(), 0);
    assert_eq!(repo.load_all_events().unwrap(), vec![kept]);
}

#[test]
fn delete_events_for_date_removes_only_that_date() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePlannerRepository::try_new(&conn).unwrap();
    repo.insert_event(&event("A", 10, 9, 10)).unwrap();
    repo.insert_event(&event("B", 10, 11, 12)).unwrap();
    repo.insert_event(&event("C", 12, 9, 10)).unwrap();

    assert_eq!(repo.delete_events_for_date(date(10)).unwrap(), 2);
    let remaining = repo.load_all_events().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].name, "C");
}

#[test]
fn tasks_roundtrip_with_category_labels() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePlannerRepository::try_new(&conn).unwrap();
    let task = Task::new(Category::UrgentImportant, "Fix bug", "urgent patch").unwrap();
    repo.insert_task(&task).unwrap();

    let label: String = conn
        .query_row("SELECT category FROM tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(label, "Срочно и важно");
    assert_eq!(repo.load_all_tasks().unwrap(), vec![task]);
}

#[test]
fn delete_task_and_category() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePlannerRepository::try_new(&conn).unwrap();
    let a = Task::new(Category::UrgentImportant, "A", "one").unwrap();
    let b = Task::new(Category::UrgentImportant, "B", "").unwrap();
    let c = Task::new(Category::NotUrgentNotImportant, "C", "").unwrap();
    for task in [&a, &b, &c] {
        repo.insert_task(task).unwrap();
    }

    let same_name_other_description =
        Task::new(Category::UrgentImportant, "A", "two").unwrap();
    assert_eq!(repo.delete_task(&same_name_other_description).unwrap(), 0);
    assert_eq!(repo.delete_task(&a).unwrap(), 1);
    assert_eq!(
        repo.delete_tasks_for_category(Category::UrgentImportant)
            .unwrap(),
        1
    );
    assert_eq!(repo.load_all_tasks().unwrap(), vec![c]);
}

#[test]
fn invalid_records_never_reach_storage() {
    let conn = open_db_in_memory().unwrap();
    let mut repo = SqlitePlannerRepository::try_new(&conn).unwrap();
    let backwards = Event {
        name: "Backwards".to_string(),
        date: date(10),
        start: time(10, 0),
        end: time(9, 0),
    };

    assert!(matches!(
        repo.insert_event(&backwards),
        Err(RepoError::Validation(_))
    ));
    assert!(repo.load_all_events().unwrap().is_empty());
}

#[test]
fn corrupt_rows_are_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO events (name, event_date, time_start, time_end)
         VALUES ('Broken', '10.01.2024', '09:00:00', '10:00:00');
         INSERT INTO tasks (name, description, category)
         VALUES ('Orphan', '', 'Когда-нибудь');",
    )
    .unwrap();
    let repo = SqlitePlannerRepository::try_new(&conn).unwrap();

    let event_err = repo.load_all_events().unwrap_err();
    assert!(matches!(event_err, RepoError::InvalidData(message) if message.contains("event_date")));
    let task_err = repo.load_all_tasks().unwrap_err();
    assert!(matches!(task_err, RepoError::InvalidData(message) if message.contains("category")));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqlitePlannerRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_tasks_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE events (id INTEGER PRIMARY KEY);
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    assert!(matches!(
        SqlitePlannerRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("tasks"))
    ));
}

#[test]
fn memory_repository_follows_the_same_contract() {
    let mut repo = MemoryPlannerRepository::new();
    let standup = event("Standup", 10, 9, 10);
    repo.insert_event(&standup).unwrap();
    repo.insert_event(&event("Review", 11, 14, 15)).unwrap();

    assert_eq!(repo.delete_event(&standup).unwrap(), 1);
    assert_eq!(repo.delete_events_for_date(date(11)).unwrap(), 1);
    assert!(repo.load_all_events().unwrap().is_empty());
}
