//! Category-grouped task index.

use crate::index::SearchFilter;
use crate::model::task::{Category, Task};
use crate::model::validation::ValidationError;
use crate::projection::TaskGroup;

/// Tasks grouped by the four fixed priority categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskIndex {
    groups: [Vec<Task>; 4],
}

impl TaskIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds an index from a full record set.
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Result<Self, ValidationError> {
        let mut index = Self::new();
        for task in tasks {
            index.add(task)?;
        }
        Ok(index)
    }

    /// Inserts one task into its category.
    ///
    /// Returns `Ok(false)` when the category already holds the same
    /// `(name, description)` pair.
    pub fn add(&mut self, task: Task) -> Result<bool, ValidationError> {
        task.validate()?;
        let group = &mut self.groups[task.category.position()];
        if group.iter().any(|existing| existing.same_identity(&task)) {
            return Ok(false);
        }
        group.push(task);
        Ok(true)
    }

    pub fn contains(&self, task: &Task) -> bool {
        self.tasks_in(task.category)
            .iter()
            .any(|existing| existing.same_identity(task))
    }

    /// Removes one task from its category. The category itself stays.
    pub fn remove(&mut self, task: &Task) -> bool {
        let group = &mut self.groups[task.category.position()];
        let before = group.len();
        group.retain(|existing| !existing.same_identity(task));
        group.len() != before
    }

    /// Empties a category and returns what it held.
    pub fn clear(&mut self, category: Category) -> Vec<Task> {
        std::mem::take(&mut self.groups[category.position()])
    }

    /// Tasks stored in `category`, in insertion order.
    pub fn tasks_in(&self, category: Category) -> &[Task] {
        &self.groups[category.position()]
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Vec::is_empty)
    }

    /// Projects the index into category groups in definition order.
    ///
    /// Categories without (matching) tasks are left out of the projection
    /// even though they persist in the index. The filter is trimmed and
    /// matched case-insensitively against task names, as for events.
    pub fn project(&self, filter: Option<&str>) -> Vec<TaskGroup> {
        let filter = SearchFilter::new(filter);
        Category::ALL
            .into_iter()
            .filter_map(|category| {
                let mut matching: Vec<Task> = self
                    .tasks_in(category)
                    .iter()
                    .filter(|task| filter.matches(&task.name))
                    .cloned()
                    .collect();
                if matching.is_empty() {
                    return None;
                }
                matching.sort_by(Task::display_cmp);
                Some(TaskGroup {
                    category,
                    tasks: matching,
                })
            })
            .collect()
    }
}
