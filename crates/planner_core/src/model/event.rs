//! Calendar event record.
//!
//! # Invariants
//! - `name` is non-empty after trim.
//! - `end >= start`; zero-duration events are allowed.
//! - Two events are the same event iff all four fields are equal.

use crate::model::validation::ValidationError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One time-boxed entry on a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    pub name: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Event {
    /// Builds a validated event. The name is stored trimmed.
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, ValidationError> {
        let event = Self {
            name: name.into().trim().to_string(),
            date,
            start,
            end,
        };
        event.validate()?;
        Ok(event)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyEventName);
        }
        if self.end < self.start {
            return Err(ValidationError::EndBeforeStart {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Display order inside one date group: start, then end, then name.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.name.cmp(&other.name))
    }
}
