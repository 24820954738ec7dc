use chrono::{NaiveDate, NaiveTime};
use planner_core::{
    ActionOutcome, Category, ContextAction, Event, EventForm, MemoryPlannerRepository, Planner,
    PlannerError, PlannerSession, PlannerView, ProjectionNode, ProjectionTree, Task, TaskForm,
    TreeKind, TreePath,
};
use std::collections::HashMap;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
}

/// In-memory view that records everything the session asks it to show.
struct RecordingView {
    event_form: EventForm,
    task_form: TaskForm,
    filters: HashMap<TreeKind, String>,
    rendered: HashMap<TreeKind, ProjectionTree>,
    expanded: HashMap<TreeKind, bool>,
    errors: Vec<String>,
}

impl RecordingView {
    fn new() -> Self {
        Self {
            event_form: EventForm::blank(today()),
            task_form: TaskForm::blank(Category::UrgentImportant),
            filters: HashMap::new(),
            rendered: HashMap::new(),
            expanded: HashMap::new(),
            errors: Vec::new(),
        }
    }

    fn rendered(&self, kind: TreeKind) -> &ProjectionTree {
        self.rendered.get(&kind).expect("tree should be rendered")
    }
}

impl PlannerView for RecordingView {
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
        self.rendered.insert(tree.kind, tree.clone());
    }

    fn set_expanded(&mut self, tree: TreeKind, expanded: bool) {
        self.expanded.insert(tree, expanded);
    }

    fn report_error(&mut self, error: &PlannerError) {
        self.errors.push(error.to_string());
    }

    fn today(&self) -> NaiveDate {
        today()
    }
}

fn session() -> PlannerSession<MemoryPlannerRepository, RecordingView> {
    let planner = Planner::load(MemoryPlannerRepository::new()).unwrap();
    PlannerSession::launch(planner, || Ok(RecordingView::new())).unwrap()
}

fn submit(session: &mut PlannerSession<MemoryPlannerRepository, RecordingView>, event: &Event) {
    session.view_mut().set_event_form(EventForm::from_event(event));
    session.submit_event().unwrap();
}

#[test]
fn launch_renders_both_trees() {
    let session = session();
    assert!(session.view().rendered(TreeKind::Events).is_empty());
    assert!(session.view().rendered(TreeKind::Tasks).is_empty());
}

#[test]
fn failing_view_load_is_an_interface_error() {
    let planner = Planner::load(MemoryPlannerRepository::new()).unwrap();
    let result = PlannerSession::<_, RecordingView>::launch(planner, || {
        Err("layout file missing".to_string())
    });
    match result {
        Err(PlannerError::InterfaceLoad(message)) => assert_eq!(message, "layout file missing"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected interface load error"),
    }
}

#[test]
fn submitted_event_is_rendered_and_form_is_reset() {
    let mut session = session();
    let standup = Event::new("Standup", date(10), time(9, 0), time(9, 15)).unwrap();
    submit(&mut session, &standup);

    let tree = session.view().rendered(TreeKind::Events);
    assert_eq!(
        tree.select(TreePath::leaf(0, 0)),
        Some(&ProjectionNode::EventLeaf { event: standup })
    );
    assert_eq!(session.view().event_form, EventForm::blank(today()));
}

#[test]
fn rejected_event_is_reported_and_form_is_kept() {
    let mut session = session();
    let form = EventForm {
        name: "Backwards".to_string(),
        date: date(10),
        start: time(10, 0),
        end: time(9, 0),
    };
    session.view_mut().set_event_form(form.clone());

    assert!(matches!(
        session.submit_event(),
        Err(PlannerError::Validation(_))
    ));
    assert_eq!(session.view().errors.len(), 1);
    assert_eq!(session.view().event_form, form);
    assert!(session.planner().events().is_empty());
}

#[test]
fn submitted_task_keeps_category_selected() {
    let mut session = session();
    session.view_mut().set_task_form(TaskForm::new(
        Category::NotUrgentImportant,
        "Read",
        "chapter 3",
    ));
    assert!(session.submit_task().unwrap());

    assert_eq!(
        session.view().task_form,
        TaskForm::blank(Category::NotUrgentImportant)
    );
    let tree = session.view().rendered(TreeKind::Tasks);
    assert_eq!(tree.branches.len(), 1);
}

#[test]
fn delete_on_group_removes_whole_date() {
    let mut session = session();
    submit(
        &mut session,
        &Event::new("A", date(10), time(9, 0), time(10, 0)).unwrap(),
    );
    submit(
        &mut session,
        &Event::new("B", date(10), time(11, 0), time(12, 0)).unwrap(),
    );
    submit(
        &mut session,
        &Event::new("C", date(11), time(9, 0), time(10, 0)).unwrap(),
    );

    let outcome = session
        .apply_action(TreeKind::Events, TreePath::group(0), ContextAction::Delete)
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Applied);

    let tree = session.view().rendered(TreeKind::Events);
    assert_eq!(tree.branches.len(), 1);
    assert_eq!(
        tree.branches[0].node,
        ProjectionNode::DateGroup { date: date(11) }
    );
}

#[test]
fn edit_resolves_path_against_filtered_tree() {
    let mut session = session();
    let standup = Event::new("Standup", date(10), time(9, 0), time(9, 15)).unwrap();
    let review = Event::new("Review", date(10), time(14, 0), time(15, 0)).unwrap();
    submit(&mut session, &standup);
    submit(&mut session, &review);

    session
        .view_mut()
        .filters
        .insert(TreeKind::Events, "rev".to_string());
    session.filter_changed(TreeKind::Events);
    assert_eq!(session.view().rendered(TreeKind::Events).leaf_count(), 1);

    let outcome = session
        .apply_action(TreeKind::Events, TreePath::leaf(0, 0), ContextAction::Edit)
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Applied);
    assert_eq!(session.view().event_form, EventForm::from_event(&review));
    assert!(session.view().rendered(TreeKind::Events).is_empty());

    session.clear_filter(TreeKind::Events);
    let tree = session.view().rendered(TreeKind::Events);
    assert_eq!(
        tree.select(TreePath::leaf(0, 0)),
        Some(&ProjectionNode::EventLeaf { event: standup })
    );
}

#[test]
fn edit_on_group_is_not_applicable_and_missing_path_is_no_selection() {
    let mut session = session();
    session
        .view_mut()
        .set_task_form(TaskForm::new(Category::UrgentImportant, "Fix bug", ""));
    session.submit_task().unwrap();

    let outcome = session
        .apply_action(TreeKind::Tasks, TreePath::group(0), ContextAction::Edit)
        .unwrap();
    assert_eq!(outcome, ActionOutcome::NotApplicable);
    assert_eq!(session.planner().tasks().len(), 1);

    let outcome = session
        .apply_action(TreeKind::Tasks, TreePath::group(3), ContextAction::Delete)
        .unwrap();
    assert_eq!(outcome, ActionOutcome::NoSelection);
}

#[test]
fn task_context_actions_delete_edit_and_expand() {
    let mut session = session();
    for (category, name) in [
        (Category::UrgentImportant, "Fix bug"),
        (Category::UrgentImportant, "Deploy"),
        (Category::NotUrgentNotImportant, "Tidy desk"),
    ] {
        session
            .view_mut()
            .set_task_form(TaskForm::new(category, name, ""));
        session.submit_task().unwrap();
    }

    session
        .apply_action(TreeKind::Tasks, TreePath::group(0), ContextAction::CollapseAll)
        .unwrap();
    assert_eq!(session.view().expanded.get(&TreeKind::Tasks), Some(&false));

    session
        .apply_action(TreeKind::Tasks, TreePath::leaf(1, 0), ContextAction::Edit)
        .unwrap();
    assert_eq!(
        session.view().task_form,
        TaskForm::new(Category::NotUrgentNotImportant, "Tidy desk", "")
    );

    session
        .apply_action(TreeKind::Tasks, TreePath::group(0), ContextAction::Delete)
        .unwrap();
    assert!(session.view().rendered(TreeKind::Tasks).is_empty());
    assert!(session
        .planner()
        .tasks()
        .tasks_in(Category::UrgentImportant)
        .is_empty());

    let task = Task::new(Category::UrgentImportant, "Again", "").unwrap();
    session
        .view_mut()
        .set_task_form(TaskForm::from_task(&task));
    session.submit_task().unwrap();
    assert_eq!(session.view().rendered(TreeKind::Tasks).branches.len(), 1);

    session
        .apply_action(TreeKind::Tasks, TreePath::leaf(0, 0), ContextAction::ExpandAll)
        .unwrap();
    assert_eq!(session.view().expanded.get(&TreeKind::Tasks), Some(&true));
}
