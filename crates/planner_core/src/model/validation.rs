//! Validation errors for planner records.

use chrono::NaiveTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for event/task submissions.
///
/// A mutating operation that yields this error must leave all state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Event name is blank after trim.
    EmptyEventName,
    /// Task name is blank after trim.
    EmptyTaskName,
    /// Event ends before it starts. Equal times are accepted.
    EndBeforeStart { start: NaiveTime, end: NaiveTime },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEventName => write!(f, "event name must not be empty"),
            Self::EmptyTaskName => write!(f, "task name must not be empty"),
            Self::EndBeforeStart { start, end } => write!(
                f,
                "event end {} cannot be earlier than start {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            ),
        }
    }
}

impl Error for ValidationError {}
