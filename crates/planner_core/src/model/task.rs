//! Task record and the fixed priority category set.
//!
//! # Invariants
//! - Exactly four categories exist; display order is definition order.
//! - A task is identified by `(name, description)` inside its category.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Maximum description length accepted by input surfaces.
///
/// Bounding happens at the form layer; indices and storage do not enforce it.
pub const MAX_DESCRIPTION_CHARS: usize = 100;

/// Priority bucket a task lives in (urgent/important matrix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    UrgentImportant,
    UrgentNotImportant,
    NotUrgentImportant,
    NotUrgentNotImportant,
}

/// Label for urgent and important tasks.
pub const CATEGORY_URGENT_IMPORTANT: &str = "Срочно и важно";
/// Label for urgent but not important tasks.
pub const CATEGORY_URGENT_NOT_IMPORTANT: &str = "Срочно, но не важно";
/// Label for important but not urgent tasks.
pub const CATEGORY_NOT_URGENT_IMPORTANT: &str = "Не срочно, но важно";
/// Label for tasks that are neither urgent nor important.
pub const CATEGORY_NOT_URGENT_NOT_IMPORTANT: &str = "Не срочно и не важно";

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 4] = [
        Category::UrgentImportant,
        Category::UrgentNotImportant,
        Category::NotUrgentImportant,
        Category::NotUrgentNotImportant,
    ];

    /// User-facing label, also used as the persisted value.
    pub fn label(self) -> &'static str {
        match self {
            Self::UrgentImportant => CATEGORY_URGENT_IMPORTANT,
            Self::UrgentNotImportant => CATEGORY_URGENT_NOT_IMPORTANT,
            Self::NotUrgentImportant => CATEGORY_NOT_URGENT_IMPORTANT,
            Self::NotUrgentNotImportant => CATEGORY_NOT_URGENT_NOT_IMPORTANT,
        }
    }

    /// Zero-based position in display order.
    pub fn position(self) -> usize {
        match self {
            Self::UrgentImportant => 0,
            Self::UrgentNotImportant => 1,
            Self::NotUrgentImportant => 2,
            Self::NotUrgentNotImportant => 3,
        }
    }

    /// Looks up a category by its exact label (surrounding whitespace ignored).
    pub fn from_label(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == normalized)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for unknown category labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl Display for UnknownCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown task category `{}`", self.0)
    }
}

impl Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

/// One to-do entry inside a priority category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub description: String,
    pub category: Category,
}

impl Task {
    /// Builds a validated task. The name is stored trimmed.
    pub fn new(
        category: Category,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let task = Self {
            name: name.into().trim().to_string(),
            description: description.into(),
            category,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyTaskName);
        }
        Ok(())
    }

    /// Whether `other` denotes the same task for removal purposes.
    pub fn same_identity(&self, other: &Self) -> bool {
        self.category == other.category
            && self.name == other.name
            && self.description == other.description
    }

    /// Display order inside one category: name, then description.
    pub fn display_cmp(&self, other: &Self) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.description.cmp(&other.description))
    }
}

/// Caps a description at [`MAX_DESCRIPTION_CHARS`] characters.
pub fn bound_description(value: &str) -> String {
    value.chars().take(MAX_DESCRIPTION_CHARS).collect()
}
