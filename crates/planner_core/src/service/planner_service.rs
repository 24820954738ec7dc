//! Planner controller.
//!
//! # Responsibility
//! - Own the event index, the task index and the repository for the whole
//!   application lifetime.
//! - Validate, write through to the repository, then rebuild both indices
//!   from a full reload.
//!
//! # Invariants
//! - A failed operation leaves both indices exactly as they were.
//! - Validation failures never reach the repository.
//! - Indices are only ever replaced by a complete, successful reload.

use crate::index::event_index::EventIndex;
use crate::index::task_index::TaskIndex;
use crate::model::event::Event;
use crate::model::task::{Category, Task};
use crate::model::validation::ValidationError;
use crate::projection::{DateGroup, ProjectionTree, TaskGroup, TreeKind};
use crate::repo::planner_repo::{PlannerRepository, RepoError};
use crate::view::form::{EventForm, TaskForm};
use chrono::NaiveDate;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced to the user by planner operations.
#[derive(Debug)]
pub enum PlannerError {
    /// Empty required field or end before start; nothing changed.
    Validation(ValidationError),
    /// Storage read/write failed; in-memory state kept its previous value.
    Persistence(RepoError),
    /// Presentation surface could not start. Fatal for the process.
    InterfaceLoad(String),
}

impl Display for PlannerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "storage error: {err}"),
            Self::InterfaceLoad(message) => write!(f, "failed to load interface: {message}"),
        }
    }
}

impl Error for PlannerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::InterfaceLoad(_) => None,
        }
    }
}

impl From<ValidationError> for PlannerError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for PlannerError {
    fn from(value: RepoError) -> Self {
        Self::Persistence(value)
    }
}

/// Application controller holding planner state and its storage.
pub struct Planner<R: PlannerRepository> {
    repo: R,
    events: EventIndex,
    tasks: TaskIndex,
}

impl<R: PlannerRepository> Planner<R> {
    /// Creates a controller and loads the full data set from `repo`.
    pub fn load(repo: R) -> Result<Self, PlannerError> {
        let mut planner = Self {
            repo,
            events: EventIndex::new(),
            tasks: TaskIndex::new(),
        };
        planner.reload()?;
        Ok(planner)
    }

    /// Rebuilds both indices from the repository.
    ///
    /// On failure the previous indices stay in place.
    pub fn reload(&mut self) -> Result<(), PlannerError> {
        let events = self.repo.load_all_events()?;
        let tasks = self.repo.load_all_tasks()?;

        let events = EventIndex::from_events(events).map_err(corrupt_rows)?;
        let tasks = TaskIndex::from_tasks(tasks).map_err(corrupt_rows)?;

        info!(
            "event=planner_reload module=service status=ok events={} tasks={}",
            events.len(),
            tasks.len()
        );
        self.events = events;
        self.tasks = tasks;
        Ok(())
    }

    pub fn events(&self) -> &EventIndex {
        &self.events
    }

    pub fn tasks(&self) -> &TaskIndex {
        &self.tasks
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Adds an event unless an identical one already exists on its date.
    ///
    /// Returns whether a new event was stored.
    ///
    /// # Errors
    /// - `Validation` before anything is written.
    /// - `Persistence` when the write or the reload after it fails. A failed
    ///   reload leaves the write in storage while the indices keep their old
    ///   state until the next successful `reload`.
    pub fn add_event(&mut self, event: Event) -> Result<bool, PlannerError> {
        event.validate()?;
        if self.events.contains(&event) {
            info!(
                "event=event_add module=service status=ok date={} inserted=false",
                event.date
            );
            return Ok(false);
        }

        let outcome = self
            .repo
            .insert_event(&event)
            .map_err(PlannerError::from)
            .and_then(|()| self.reload());
        log_outcome("event_add", &outcome);
        outcome.map(|()| true)
    }

    /// Removes one event. Returns `false` when it was not stored.
    ///
    /// # Errors
    /// - `Persistence` when the delete or the reload after it fails. A failed
    ///   reload leaves the delete in storage while the indices keep their old
    ///   state until the next successful `reload`.
    pub fn remove_event(&mut self, event: &Event) -> Result<bool, PlannerError> {
        if !self.events.contains(event) {
            return Ok(false);
        }

        let outcome = self
            .repo
            .delete_event(event)
            .map_err(PlannerError::from)
            .and_then(|_| self.reload());
        log_outcome("event_remove", &outcome);
        outcome.map(|()| true)
    }

    /// Removes a whole date group. Returns the number of removed events.
    ///
    /// # Errors
    /// - `Persistence` when the delete or the reload after it fails. A failed
    ///   reload leaves the delete in storage while the indices keep their old
    ///   state until the next successful `reload`.
    pub fn remove_date(&mut self, date: NaiveDate) -> Result<usize, PlannerError> {
        let count = self.events.events_on(date).len();
        if count == 0 {
            return Ok(0);
        }

        let outcome = self
            .repo
            .delete_events_for_date(date)
            .map_err(PlannerError::from)
            .and_then(|_| self.reload());
        log_outcome("event_remove_date", &outcome);
        outcome.map(|()| count)
    }

    /// Removes an event and returns a form seeded with its values.
    ///
    /// The event is not re-added; the caller resubmits the form.
    pub fn edit_event(&mut self, event: &Event) -> Result<EventForm, PlannerError> {
        self.remove_event(event)?;
        Ok(EventForm::from_event(event))
    }

    /// Adds a task unless its category already holds the same
    /// `(name, description)` pair.
    ///
    /// # Errors
    /// - `Validation` before anything is written.
    /// - `Persistence` when the write or the reload after it fails. A failed
    ///   reload leaves the write in storage while the indices keep their old
    ///   state until the next successful `reload`.
    pub fn add_task(&mut self, task: Task) -> Result<bool, PlannerError> {
        task.validate()?;
        if self.tasks.contains(&task) {
            info!(
                "event=task_add module=service status=ok category={} inserted=false",
                task.category.position()
            );
            return Ok(false);
        }

        let outcome = self
            .repo
            .insert_task(&task)
            .map_err(PlannerError::from)
            .and_then(|()| self.reload());
        log_outcome("task_add", &outcome);
        outcome.map(|()| true)
    }

    /// Removes one task. Returns `false` when it was not stored.
    ///
    /// # Errors
    /// - `Persistence` when the delete or the reload after it fails. A failed
    ///   reload leaves the delete in storage while the indices keep their old
    ///   state until the next successful `reload`.
    pub fn remove_task(&mut self, task: &Task) -> Result<bool, PlannerError> {
        if !self.tasks.contains(task) {
            return Ok(false);
        }

        let outcome = self
            .repo
            .delete_task(task)
            .map_err(PlannerError::from)
            .and_then(|_| self.reload());
        log_outcome("task_remove", &outcome);
        outcome.map(|()| true)
    }

    /// Empties a category. The category stays available for new tasks.
    ///
    /// # Errors
    /// - `Persistence` when the delete or the reload after it fails. A failed
    ///   reload leaves the delete in storage while the indices keep their old
    ///   state until the next successful `reload`.
    pub fn clear_category(&mut self, category: Category) -> Result<usize, PlannerError> {
        let count = self.tasks.tasks_in(category).len();
        if count == 0 {
            return Ok(0);
        }

        let outcome = self
            .repo
            .delete_tasks_for_category(category)
            .map_err(PlannerError::from)
            .and_then(|_| self.reload());
        log_outcome("task_clear_category", &outcome);
        outcome.map(|()| count)
    }

    /// Removes a task and returns a form seeded with it, category selected.
    pub fn edit_task(&mut self, task: &Task) -> Result<TaskForm, PlannerError> {
        self.remove_task(task)?;
        Ok(TaskForm::from_task(task))
    }

    pub fn project_events(&self, filter: Option<&str>) -> Vec<DateGroup> {
        self.events.project(filter)
    }

    pub fn project_tasks(&self, filter: Option<&str>) -> Vec<TaskGroup> {
        self.tasks.project(filter)
    }

    /// Builds the presentation tree of one kind.
    pub fn tree(&self, kind: TreeKind, filter: Option<&str>) -> ProjectionTree {
        match kind {
            TreeKind::Events => ProjectionTree::from_date_groups(&self.project_events(filter)),
            TreeKind::Tasks => ProjectionTree::from_task_groups(&self.project_tasks(filter)),
        }
    }

    /// Releases the repository, e.g. to close the connection it borrows.
    pub fn into_repository(self) -> R {
        self.repo
    }
}

fn corrupt_rows(err: ValidationError) -> PlannerError {
    PlannerError::Persistence(RepoError::InvalidData(format!(
        "stored record failed validation: {err}"
    )))
}

fn log_outcome(event: &str, outcome: &Result<(), PlannerError>) {
    match outcome {
        Ok(()) => info!("event={event} module=service status=ok"),
        Err(err) => error!("event={event} module=service status=error error={err}"),
    }
}
