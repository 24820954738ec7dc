//! Purely in-memory planner store.
//!
//! Holds rows in insertion order, like a table without indexes. Used when no
//! database file is wanted and as a storage double in tests.

use crate::model::event::Event;
use crate::model::task::{Category, Task};
use crate::repo::planner_repo::{PlannerRepository, RepoResult};
use chrono::NaiveDate;

/// Vector-backed repository with the same contract as the SQLite one.
#[derive(Debug, Clone, Default)]
pub struct MemoryPlannerRepository {
    events: Vec<Event>,
    tasks: Vec<Task>,
}

impl MemoryPlannerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlannerRepository for MemoryPlannerRepository {
    fn load_all_events(&self) -> RepoResult<Vec<Event>> {
        Ok(self.events.clone())
    }

    fn load_all_tasks(&self) -> RepoResult<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn insert_event(&mut self, event: &Event) -> RepoResult<()> {
        event.validate()?;
        self.events.push(event.clone());
        Ok(())
    }

    fn delete_event(&mut self, event: &Event) -> RepoResult<usize> {
        let before = self.events.len();
        self.events.retain(|existing| existing != event);
        Ok(before - self.events.len())
    }

    fn delete_events_for_date(&mut self, date: NaiveDate) -> RepoResult<usize> {
        let before = self.events.len();
        self.events.retain(|existing| existing.date != date);
        Ok(before - self.events.len())
    }

    fn insert_task(&mut self, task: &Task) -> RepoResult<()> {
        task.validate()?;
        self.tasks.push(task.clone());
        Ok(())
    }

    fn delete_task(&mut self, task: &Task) -> RepoResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|existing| !existing.same_identity(task));
        Ok(before - self.tasks.len())
    }

    fn delete_tasks_for_category(&mut self, category: Category) -> RepoResult<usize> {
        let before = self.tasks.len();
        self.tasks.retain(|existing| existing.category != category);
        Ok(before - self.tasks.len())
    }
}
