//! Planner session: the controller wired to one presentation surface.
//!
//! # Responsibility
//! - Turn view interactions (submit, context action, filter change) into
//!   controller calls.
//! - Re-render the affected tree from a full projection after each change.
//!
//! # Invariants
//! - Every error is reported through the view before it is returned.
//! - Forms are reset only after a successful submission.

use crate::projection::{ProjectionNode, TreeKind, TreePath};
use crate::repo::planner_repo::PlannerRepository;
use crate::service::planner_service::{Planner, PlannerError};
use crate::view::form::{EventForm, TaskForm};
use crate::view::{ContextAction, PlannerView};
use log::{error, info};

/// Result of applying a context action to a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing is rendered at the selected path.
    NoSelection,
    /// The action does not apply to the selected node kind.
    NotApplicable,
    /// The action ran.
    Applied,
}

/// Controller plus the view hosting it.
pub struct PlannerSession<R: PlannerRepository, V: PlannerView> {
    planner: Planner<R>,
    view: V,
}

impl<R: PlannerRepository, V: PlannerView> PlannerSession<R, V> {
    /// Starts a session once the view has loaded, then renders both trees.
    ///
    /// # Errors
    /// - `InterfaceLoad` when `load_view` fails. Callers treat it as fatal.
    pub fn launch(
        planner: Planner<R>,
        load_view: impl FnOnce() -> Result<V, String>,
    ) -> Result<Self, PlannerError> {
        let view = load_view().map_err(|message| {
            error!("event=view_load module=session status=error");
            PlannerError::InterfaceLoad(message)
        })?;
        info!("event=view_load module=session status=ok");

        let mut session = Self { planner, view };
        session.refresh(TreeKind::Events);
        session.refresh(TreeKind::Tasks);
        Ok(session)
    }

    pub fn planner(&self) -> &Planner<R> {
        &self.planner
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_parts(self) -> (Planner<R>, V) {
        (self.planner, self.view)
    }

    /// Submits the event form. Returns whether a new event was stored.
    pub fn submit_event(&mut self) -> Result<bool, PlannerError> {
        let outcome = self
            .view
            .event_form()
            .to_event()
            .map_err(PlannerError::from)
            .and_then(|event| self.planner.add_event(event));
        let inserted = self.report(outcome)?;

        let today = self.view.today();
        self.view.set_event_form(EventForm::blank(today));
        self.refresh(TreeKind::Events);
        Ok(inserted)
    }

    /// Submits the task form. The category stays selected afterwards.
    pub fn submit_task(&mut self) -> Result<bool, PlannerError> {
        let form = self.view.task_form();
        let outcome = form
            .to_task()
            .map_err(PlannerError::from)
            .and_then(|task| self.planner.add_task(task));
        let inserted = self.report(outcome)?;

        self.view.set_task_form(TaskForm::blank(form.category));
        self.refresh(TreeKind::Tasks);
        Ok(inserted)
    }

    /// Applies a context-menu action to the node at `path` of tree `kind`.
    ///
    /// The path is resolved against the tree as currently filtered.
    pub fn apply_action(
        &mut self,
        kind: TreeKind,
        path: TreePath,
        action: ContextAction,
    ) -> Result<ActionOutcome, PlannerError> {
        let filter = self.view.filter(kind);
        let tree = self.planner.tree(kind, Some(filter.as_str()));
        let Some(node) = tree.select(path).cloned() else {
            return Ok(ActionOutcome::NoSelection);
        };

        let outcome = match action {
            ContextAction::Delete => self.delete_node(&node),
            ContextAction::Edit => self.edit_node(&node),
            ContextAction::ExpandAll => {
                self.view.set_expanded(kind, true);
                Ok(ActionOutcome::Applied)
            }
            ContextAction::CollapseAll => {
                self.view.set_expanded(kind, false);
                Ok(ActionOutcome::Applied)
            }
        };
        let applied = self.report(outcome)?;

        if matches!(action, ContextAction::Delete | ContextAction::Edit) {
            self.refresh(kind);
        }
        Ok(applied)
    }

    /// Re-renders one tree after its filter text changed.
    pub fn filter_changed(&mut self, kind: TreeKind) {
        self.refresh(kind);
    }

    /// Clears the filter of one tree and re-renders it.
    pub fn clear_filter(&mut self, kind: TreeKind) {
        self.view.clear_filter(kind);
        self.refresh(kind);
    }

    /// Rebuilds and renders one tree from current state.
    pub fn refresh(&mut self, kind: TreeKind) {
        let filter = self.view.filter(kind);
        let tree = self.planner.tree(kind, Some(filter.as_str()));
        self.view.render_tree(&tree);
    }

    fn delete_node(&mut self, node: &ProjectionNode) -> Result<ActionOutcome, PlannerError> {
        match node {
            ProjectionNode::DateGroup { date } => {
                self.planner.remove_date(*date)?;
            }
            ProjectionNode::EventLeaf { event } => {
                self.planner.remove_event(event)?;
            }
            ProjectionNode::CategoryGroup { category } => {
                self.planner.clear_category(*category)?;
            }
            ProjectionNode::TaskLeaf { task } => {
                self.planner.remove_task(task)?;
            }
        }
        Ok(ActionOutcome::Applied)
    }

    fn edit_node(&mut self, node: &ProjectionNode) -> Result<ActionOutcome, PlannerError> {
        match node {
            ProjectionNode::EventLeaf { event } => {
                let form = self.planner.edit_event(event)?;
                self.view.set_event_form(form);
                Ok(ActionOutcome::Applied)
            }
            ProjectionNode::TaskLeaf { task } => {
                let form = self.planner.edit_task(task)?;
                self.view.set_task_form(form);
                Ok(ActionOutcome::Applied)
            }
            ProjectionNode::DateGroup { .. } | ProjectionNode::CategoryGroup { .. } => {
                Ok(ActionOutcome::NotApplicable)
            }
        }
    }

    fn report<T>(&mut self, outcome: Result<T, PlannerError>) -> Result<T, PlannerError> {
        if let Err(err) = &outcome {
            self.view.report_error(err);
        }
        outcome
    }
}
