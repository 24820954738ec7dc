//! Two-level presentation tree built from index projections.
//!
//! # Responsibility
//! - Carry grouped, sorted, filtered records from indices to views.
//! - Tag every node with its kind and originating record so a selection can
//!   be mapped back to an edit/delete target without inspecting labels.
//!
//! # Invariants
//! - Projections are read-only snapshots; they are rebuilt after every
//!   mutation and never persisted.
//! - Group nodes are never emitted without at least one leaf.

mod path;

pub use path::{TreePath, TreePathError};

use crate::model::event::Event;
use crate::model::task::{Category, Task};
use chrono::NaiveDate;
use serde::Serialize;

/// Events of one calendar date in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub events: Vec<Event>,
}

/// Tasks of one priority category in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskGroup {
    pub category: Category,
    pub tasks: Vec<Task>,
}

/// Which of the two planner trees a node or action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeKind {
    Events,
    Tasks,
}

/// One node of a projection tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProjectionNode {
    DateGroup { date: NaiveDate },
    EventLeaf { event: Event },
    CategoryGroup { category: Category },
    TaskLeaf { task: Task },
}

impl ProjectionNode {
    /// Tree this node is rendered in.
    pub fn tree_kind(&self) -> TreeKind {
        match self {
            Self::DateGroup { .. } | Self::EventLeaf { .. } => TreeKind::Events,
            Self::CategoryGroup { .. } | Self::TaskLeaf { .. } => TreeKind::Tasks,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::DateGroup { .. } | Self::CategoryGroup { .. })
    }
}

/// Group header plus its leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeBranch {
    pub node: ProjectionNode,
    pub leaves: Vec<ProjectionNode>,
}

/// Ordered two-level tree handed to a view for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectionTree {
    pub kind: TreeKind,
    pub branches: Vec<TreeBranch>,
}

impl ProjectionTree {
    /// Builds the event tree from date groups.
    pub fn from_date_groups(groups: &[DateGroup]) -> Self {
        let branches = groups
            .iter()
            .map(|group| TreeBranch {
                node: ProjectionNode::DateGroup { date: group.date },
                leaves: group
                    .events
                    .iter()
                    .map(|event| ProjectionNode::EventLeaf {
                        event: event.clone(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            kind: TreeKind::Events,
            branches,
        }
    }

    /// Builds the task tree from category groups.
    pub fn from_task_groups(groups: &[TaskGroup]) -> Self {
        let branches = groups
            .iter()
            .map(|group| TreeBranch {
                node: ProjectionNode::CategoryGroup {
                    category: group.category,
                },
                leaves: group
                    .tasks
                    .iter()
                    .map(|task| ProjectionNode::TaskLeaf { task: task.clone() })
                    .collect(),
            })
            .collect();
        Self {
            kind: TreeKind::Tasks,
            branches,
        }
    }

    /// Resolves a selection path to its node.
    pub fn select(&self, path: TreePath) -> Option<&ProjectionNode> {
        let branch = self.branches.get(path.group)?;
        match path.leaf {
            None => Some(&branch.node),
            Some(leaf) => branch.leaves.get(leaf),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Number of leaves across all branches.
    pub fn leaf_count(&self) -> usize {
        self.branches.iter().map(|branch| branch.leaves.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{DateGroup, ProjectionNode, ProjectionTree, TreeKind, TreePath};
    use crate::model::event::Event;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn select_maps_paths_to_tagged_nodes() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let event = Event::new(
            "Standup",
            date,
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 15, 0).unwrap(),
        )
        .unwrap();
        let tree = ProjectionTree::from_date_groups(&[DateGroup {
            date,
            events: vec![event.clone()],
        }]);

        assert_eq!(tree.kind, TreeKind::Events);
        assert_eq!(
            tree.select(TreePath::group(0)),
            Some(&ProjectionNode::DateGroup { date })
        );
        assert_eq!(
            tree.select(TreePath::leaf(0, 0)),
            Some(&ProjectionNode::EventLeaf { event })
        );
        assert!(tree.select(TreePath::leaf(0, 1)).is_none());
        assert!(tree.select(TreePath::group(1)).is_none());
        assert_eq!(tree.leaf_count(), 1);
    }
}
