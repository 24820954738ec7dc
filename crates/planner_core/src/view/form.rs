//! Input form models.
//!
//! Forms are the input surface: they hold raw user values, bound the task
//! description length and convert into validated records on submission.

use crate::model::event::Event;
use crate::model::task::{bound_description, Category, Task};
use crate::model::validation::ValidationError;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Event form fields: name, date picker, start/end time pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventForm {
    pub name: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl EventForm {
    /// Empty name, both times at midnight, date on `today`.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            date: today,
            start: NaiveTime::default(),
            end: NaiveTime::default(),
        }
    }

    /// Seeds the form from an existing event for re-submission.
    pub fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            date: event.date,
            start: event.start,
            end: event.end,
        }
    }

    pub fn to_event(&self) -> Result<Event, ValidationError> {
        Event::new(self.name.as_str(), self.date, self.start, self.end)
    }
}

/// Task form fields: name, bounded description, category selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskForm {
    pub name: String,
    description: String,
    pub category: Category,
}

impl TaskForm {
    /// Builds a form, cutting the description to the allowed length.
    pub fn new(category: Category, name: impl Into<String>, description: &str) -> Self {
        Self {
            name: name.into(),
            description: bound_description(description),
            category,
        }
    }

    /// Empty fields with `category` selected.
    pub fn blank(category: Category) -> Self {
        Self::new(category, String::new(), "")
    }

    /// Seeds the form and re-selects the category of an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self::new(task.category, task.name.clone(), &task.description)
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, value: &str) {
        self.description = bound_description(value);
    }

    pub fn to_task(&self) -> Result<Task, ValidationError> {
        Task::new(self.category, self.name.as_str(), self.description.as_str())
    }
}
