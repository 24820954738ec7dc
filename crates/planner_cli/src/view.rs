//! Terminal implementation of the planner view.
//!
//! Trees and messages are collected as lines and flushed by the caller, so
//! one invocation prints exactly the tree it acted on.

use crate::config::CliConfig;
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate};
use planner_core::{
    Category, EventForm, PlannerError, PlannerView, ProjectionNode, ProjectionTree, TaskForm,
    TreeBranch, TreeKind, TreePath,
};
use std::collections::HashMap;
use std::fmt::Write;

pub struct TerminalView {
    event_form: EventForm,
    task_form: TaskForm,
    filters: HashMap<TreeKind, String>,
    trees: HashMap<TreeKind, ProjectionTree>,
    collapsed: HashMap<TreeKind, bool>,
    errors: Vec<String>,
    date_format: String,
    json: bool,
    today: NaiveDate,
}

impl TerminalView {
    /// Builds the view, rejecting unusable display settings.
    pub fn load(config: &CliConfig) -> Result<Self, String> {
        validate_date_format(&config.date_format)?;
        let today = Local::now().date_naive();
        Ok(Self {
            event_form: EventForm::blank(today),
            task_form: TaskForm::blank(Category::UrgentImportant),
            filters: HashMap::new(),
            trees: HashMap::new(),
            collapsed: HashMap::new(),
            errors: Vec::new(),
            date_format: config.date_format.clone(),
            json: config.json,
            today,
        })
    }

    /// Sets the filter text the way typing into the filter field would.
    pub fn set_filter(&mut self, tree: TreeKind, value: Option<String>) {
        match value {
            Some(value) => {
                self.filters.insert(tree, value);
            }
            None => {
                self.filters.remove(&tree);
            }
        }
    }

    /// Errors reported since the view was loaded.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Renders the last projection of `kind` as printable lines.
    pub fn tree_lines(&self, kind: TreeKind) -> Vec<String> {
        let Some(tree) = self.trees.get(&kind) else {
            return Vec::new();
        };
        if self.json {
            return vec![to_json(tree)];
        }
        if tree.is_empty() {
            let message = match kind {
                TreeKind::Events => "(no events)",
                TreeKind::Tasks => "(no tasks)",
            };
            return vec![message.to_string()];
        }

        let collapsed = self.collapsed.get(&kind).copied().unwrap_or(false);
        let mut lines = Vec::new();
        for (group_index, branch) in tree.branches.iter().enumerate() {
            lines.push(self.header_line(group_index, branch, collapsed));
            if collapsed {
                continue;
            }
            for (leaf_index, leaf) in branch.leaves.iter().enumerate() {
                let path = TreePath::leaf(group_index, leaf_index);
                lines.push(format!("    {path}  {}", self.node_label(leaf)));
            }
        }
        lines
    }

    /// Renders the event form as a ready-to-run `add` command.
    pub fn event_form_lines(&self) -> Vec<String> {
        let form = &self.event_form;
        if self.json {
            return vec![to_json(form)];
        }
        vec![format!(
            "planner events add --name {} --date {} --start {} --end {}",
            quote(&form.name),
            form.date.format("%Y-%m-%d"),
            form.start.format("%H:%M:%S"),
            form.end.format("%H:%M:%S")
        )]
    }

    /// Renders the task form as a ready-to-run `add` command.
    pub fn task_form_lines(&self) -> Vec<String> {
        let form = &self.task_form;
        if self.json {
            return vec![to_json(form)];
        }
        vec![format!(
            "planner tasks add --category {} --name {} --description {}",
            form.category.position() + 1,
            quote(&form.name),
            quote(form.description())
        )]
    }

    fn header_line(&self, group_index: usize, branch: &TreeBranch, collapsed: bool) -> String {
        let path = TreePath::group(group_index);
        let label = self.node_label(&branch.node);
        if collapsed {
            format!("[{path}] {label} ({})", branch.leaves.len())
        } else {
            format!("[{path}] {label}")
        }
    }

    fn node_label(&self, node: &ProjectionNode) -> String {
        match node {
            ProjectionNode::DateGroup { date } => date.format(&self.date_format).to_string(),
            ProjectionNode::EventLeaf { event } => format!(
                "{} - {} : {}",
                event.start.format("%H:%M"),
                event.end.format("%H:%M"),
                event.name
            ),
            ProjectionNode::CategoryGroup { category } => category.label().to_string(),
            ProjectionNode::TaskLeaf { task } if task.description.is_empty() => task.name.clone(),
            ProjectionNode::TaskLeaf { task } => format!("{} : {}", task.name, task.description),
        }
    }
}

impl PlannerView for TerminalView {
    fn event_form(&self) -> EventForm {
        self.event_form.clone()
    }

    fn set_event_form(&mut self, form: EventForm) {
        self.event_form = form;
    }

    fn task_form(&self) -> TaskForm {
        self.task_form.clone()
    }

    fn set_task_form(&mut self, form: TaskForm) {
        self.task_form = form;
    }

    fn filter(&self, tree: TreeKind) -> String {
        self.filters.get(&tree).cloned().unwrap_or_default()
    }

    fn clear_filter(&mut self, tree: TreeKind) {
        self.filters.remove(&tree);
    }

    fn render_tree(&mut self, tree: &ProjectionTree) {
        self.trees.insert(tree.kind, tree.clone());
    }

    fn set_expanded(&mut self, tree: TreeKind, expanded: bool) {
        self.collapsed.insert(tree, !expanded);
    }

    fn report_error(&mut self, error: &PlannerError) {
        self.errors.push(error.to_string());
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}

fn validate_date_format(format: &str) -> Result<(), String> {
    if format.trim().is_empty() {
        return Err("date format must not be empty".to_string());
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid date format `{format}`"));
    }
    // Time or zone specifiers parse fine but cannot be rendered from a date.
    let mut sample = String::new();
    if write!(sample, "{}", NaiveDate::MIN.format(format)).is_err() {
        return Err(format!("date format `{format}` needs fields a date does not have"));
    }
    Ok(())
}

fn to_json(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|err| format!("{{\"error\":\"failed to encode output: {err}\"}}"))
}

fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
