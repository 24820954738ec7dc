//! Presentation capability consumed by the planner session.
//!
//! # Responsibility
//! - Describe what the core needs from a UI surface: form values, tree
//!   rendering, filter strings, expansion state and error reporting.
//! - Keep widget toolkits and terminals outside of core.
//!
//! # Invariants
//! - Views never mutate planner state directly; every change goes through
//!   the session and controller.

pub mod form;

use crate::projection::{ProjectionTree, TreeKind};
use crate::service::planner_service::PlannerError;
use chrono::NaiveDate;

pub use form::{EventForm, TaskForm};

/// Per-node context menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextAction {
    /// Delete the selected leaf, or the whole group for a header.
    Delete,
    /// Remove the selected leaf and seed the form with its values.
    Edit,
    ExpandAll,
    CollapseAll,
}

/// Capability interface a UI surface implements to host the planner.
pub trait PlannerView {
    /// Current event form values.
    fn event_form(&self) -> EventForm;
    fn set_event_form(&mut self, form: EventForm);

    /// Current task form values, including the selected category.
    fn task_form(&self) -> TaskForm;
    fn set_task_form(&mut self, form: TaskForm);

    /// Raw filter text of one tree; empty when unset.
    fn filter(&self, tree: TreeKind) -> String;
    fn clear_filter(&mut self, tree: TreeKind);

    /// Replaces the rendered content of `tree.kind` with `tree`.
    fn render_tree(&mut self, tree: &ProjectionTree);

    /// Expands or collapses every group of one tree.
    fn set_expanded(&mut self, tree: TreeKind, expanded: bool);

    /// Shows an error to the user.
    fn report_error(&mut self, error: &PlannerError);

    /// Date the event form resets to after a successful submission.
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
