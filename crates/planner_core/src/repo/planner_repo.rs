//! Planner repository contract and its error type.

use crate::db::DbError;
use crate::model::event::Event;
use crate::model::task::{Category, Task};
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage-level failure for planner persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Record rejected before it reached storage.
    Validation(ValidationError),
    /// Persisted row cannot be converted into a valid record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted planner data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "planner repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "planner repository requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Row store the planner controller synchronizes with.
///
/// Deletes match on the full record value and report how many rows went
/// away; deleting something absent is not an error.
pub trait PlannerRepository {
    fn load_all_events(&self) -> RepoResult<Vec<Event>>;
    fn load_all_tasks(&self) -> RepoResult<Vec<Task>>;
    fn insert_event(&mut self, event: &Event) -> RepoResult<()>;
    fn delete_event(&mut self, event: &Event) -> RepoResult<usize>;
    fn delete_events_for_date(&mut self, date: NaiveDate) -> RepoResult<usize>;
    fn insert_task(&mut self, task: &Task) -> RepoResult<()>;
    fn delete_task(&mut self, task: &Task) -> RepoResult<usize>;
    fn delete_tasks_for_category(&mut self, category: Category) -> RepoResult<usize>;
}
