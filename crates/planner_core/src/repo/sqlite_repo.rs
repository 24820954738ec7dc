//! SQLite implementation of the planner repository.
//!
//! # Invariants
//! - Dates are stored as `YYYY-MM-DD`, times as `HH:MM:SS`.
//! - Categories are stored by label.
//! - Rows load in insertion (`id`) order.

use crate::db::migrations::{current_user_version, latest_version};
use crate::model::event::Event;
use crate::model::task::{Category, Task};
use crate::repo::planner_repo::{PlannerRepository, RepoError, RepoResult};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, Row};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const REQUIRED_TABLES: &[&str] = &["events", "tasks"];

/// Planner repository backed by a borrowed, migrated SQLite connection.
pub struct SqlitePlannerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePlannerRepository<'conn> {
    /// Wraps a connection after checking it carries the planner schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` when a planner table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        for &table in REQUIRED_TABLES {
            if !table_exists(conn, table)? {
                return Err(RepoError::MissingRequiredTable(table));
            }
        }

        Ok(Self { conn })
    }
}

impl PlannerRepository for SqlitePlannerRepository<'_> {
    fn load_all_events(&self) -> RepoResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, event_date, time_start, time_end
             FROM events
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }

    fn load_all_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, description, category
             FROM tasks
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn insert_event(&mut self, event: &Event) -> RepoResult<()> {
        event.validate()?;
        self.conn.execute(
            "INSERT INTO events (name, event_date, time_start, time_end)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                event.name.as_str(),
                date_to_db(event.date),
                time_to_db(event.start),
                time_to_db(event.end),
            ],
        )?;
        Ok(())
    }

    fn delete_event(&mut self, event: &Event) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM events
             WHERE name = ?1
               AND event_date = ?2
               AND time_start = ?3
               AND time_end = ?4;",
            params![
                event.name.as_str(),
                date_to_db(event.date),
                time_to_db(event.start),
                time_to_db(event.end),
            ],
        )?;
        Ok(changed)
    }

    fn delete_events_for_date(&mut self, date: NaiveDate) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM events WHERE event_date = ?1;",
            [date_to_db(date)],
        )?;
        Ok(changed)
    }

    fn insert_task(&mut self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        self.conn.execute(
            "INSERT INTO tasks (name, description, category)
             VALUES (?1, ?2, ?3);",
            params![
                task.name.as_str(),
                task.description.as_str(),
                task.category.label(),
            ],
        )?;
        Ok(())
    }

    fn delete_task(&mut self, task: &Task) -> RepoResult<usize> {
        let changed = self.conn.execute(
            "DELETE FROM tasks
             WHERE name = ?1
               AND description = ?2
               AND category = ?3;",
            params![
                task.name.as_str(),
                task.description.as_str(),
                task.category.label(),
            ],
        )?;
        Ok(changed)
    }

    fn delete_tasks_for_category(&mut self, category: Category) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE category = ?1;", [category.label()])?;
        Ok(changed)
    }
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let date_text: String = row.get("event_date")?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{date_text}` in events.event_date"
        ))
    })?;
    let start = parse_time(row, "time_start")?;
    let end = parse_time(row, "time_end")?;

    let event = Event {
        name: row.get("name")?,
        date,
        start,
        end,
    };
    event
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("invalid event row: {err}")))?;
    Ok(event)
}

fn parse_time(row: &Row<'_>, column: &'static str) -> RepoResult<NaiveTime> {
    let text: String = row.get(column)?;
    NaiveTime::parse_from_str(&text, TIME_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid time value `{text}` in events.{column}"))
    })
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let category_text: String = row.get("category")?;
    let category = Category::from_label(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in tasks.category"
        ))
    })?;

    let task = Task {
        name: row.get("name")?,
        description: row.get("description")?,
        category,
    };
    task.validate()
        .map_err(|err| RepoError::InvalidData(format!("invalid task row: {err}")))?;
    Ok(task)
}

fn date_to_db(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn time_to_db(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}
