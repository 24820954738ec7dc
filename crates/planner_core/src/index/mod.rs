//! In-memory indices for events and tasks.
//!
//! # Responsibility
//! - Group records by date (events) or priority category (tasks).
//! - Produce sorted, filtered projections for presentation.
//!
//! # Invariants
//! - Event dates exist only while they hold at least one event.
//! - All four task categories always exist, possibly empty.
//! - Identical records are stored at most once per group.

pub mod event_index;
pub mod task_index;

/// Normalized, case-folded search needle.
///
/// `None` and blank input both mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    needle: Option<String>,
}

impl SearchFilter {
    /// Builds a filter from raw user input.
    ///
    /// Surrounding whitespace is dropped, so a blank field never hides rows.
    pub fn new(raw: Option<&str>) -> Self {
        let needle = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase);
        Self { needle }
    }

    /// Whether the filter passes everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    /// Case-insensitive substring match against `text`.
    pub fn matches(&self, text: &str) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => text.to_lowercase().contains(needle.as_str()),
        }
    }
}
