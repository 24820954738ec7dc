//! `planner` command-line entry point.
//!
//! Each invocation is one user turn: open the store, load the planner,
//! apply one command through a session and print the affected tree.

mod args;
mod config;
mod view;

use args::{Cli, Command, EventCommand, FilterArgs, TaskCommand};
use clap::Parser;
use config::CliConfig;
use log::{error, info, warn};
use planner_core::db::open_db;
use planner_core::{
    init_logging, ActionOutcome, ContextAction, EventForm, Planner, PlannerError, PlannerView,
    SqlitePlannerRepository, TaskForm, TreeKind, TreePath,
};
use std::fmt::{Display, Formatter};
use std::process::ExitCode;
use view::TerminalView;

type Session<'conn> = planner_core::PlannerSession<SqlitePlannerRepository<'conn>, TerminalView>;

#[derive(Debug)]
enum CliError {
    Startup(String),
    Planner(PlannerError),
    /// A planner error that the view has already shown.
    Aborted(&'static str),
    NothingSelected { kind: TreeKind, path: TreePath },
    GroupNotEditable(TreePath),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Startup(message) => write!(f, "{message}"),
            Self::Planner(err) => write!(f, "{err}"),
            Self::Aborted(reason) => write!(f, "command aborted: {reason}"),
            Self::NothingSelected { kind, path } => {
                let tree = match kind {
                    TreeKind::Events => "event",
                    TreeKind::Tasks => "task",
                };
                write!(f, "no {tree} entry at {path}")
            }
            Self::GroupNotEditable(path) => {
                write!(f, "{path} is a group header; select an entry as G.L")
            }
        }
    }
}

impl From<PlannerError> for CliError {
    fn from(value: PlannerError) -> Self {
        Self::Planner(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("error: cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };
    let config = CliConfig::resolve(&cli, &cwd);

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &CliConfig) -> Result<(), CliError> {
    let conn = open_db(&config.db_path).map_err(|err| CliError::Startup(err.to_string()))?;
    let repo = SqlitePlannerRepository::try_new(&conn)
        .map_err(|err| CliError::Startup(err.to_string()))?;
    let planner = Planner::load(repo)?;
    let mut session = Session::launch(planner, || TerminalView::load(config)).map_err(|err| {
        error!("event=cli_start module=cli status=error error_code=view_load_failed");
        err
    })?;

    let (kind, outcome) = match command {
        Command::Events { command } => (TreeKind::Events, run_event_command(&mut session, command)),
        Command::Tasks { command } => (TreeKind::Tasks, run_task_command(&mut session, command)),
    };

    for message in session.view().errors() {
        eprintln!("error: {message}");
    }
    match outcome {
        Ok(lines) => {
            print_lines(&lines);
            print_lines(&session.view().tree_lines(kind));
            info!("event=cli_command module=cli status=ok");
            Ok(())
        }
        Err(CliError::Planner(err)) => {
            warn!("event=cli_command module=cli status=error");
            Err(CliError::Aborted(error_kind(&err)))
        }
        Err(err) => Err(err),
    }
}

fn run_event_command(
    session: &mut Session<'_>,
    command: EventCommand,
) -> Result<Vec<String>, CliError> {
    match command {
        EventCommand::List { filter, collapsed } => {
            list(session, TreeKind::Events, filter, collapsed);
            Ok(Vec::new())
        }
        EventCommand::Add {
            name,
            date,
            start,
            end,
        } => {
            let date = date.unwrap_or_else(|| session.view().today());
            session.view_mut().set_event_form(EventForm {
                name,
                date,
                start,
                end,
            });
            let inserted = session.submit_event()?;
            Ok(vec![added_message(inserted, "event")])
        }
        EventCommand::Delete { path, filter } => {
            apply(session, TreeKind::Events, path, filter, ContextAction::Delete)?;
            Ok(vec![format!("deleted {path}")])
        }
        EventCommand::Edit { path, filter } => {
            apply(session, TreeKind::Events, path, filter, ContextAction::Edit)?;
            Ok(session.view().event_form_lines())
        }
    }
}

fn run_task_command(
    session: &mut Session<'_>,
    command: TaskCommand,
) -> Result<Vec<String>, CliError> {
    match command {
        TaskCommand::List { filter, collapsed } => {
            list(session, TreeKind::Tasks, filter, collapsed);
            Ok(Vec::new())
        }
        TaskCommand::Add {
            category,
            name,
            description,
        } => {
            session
                .view_mut()
                .set_task_form(TaskForm::new(category, name, &description));
            let inserted = session.submit_task()?;
            Ok(vec![added_message(inserted, "task")])
        }
        TaskCommand::Delete { path, filter } => {
            apply(session, TreeKind::Tasks, path, filter, ContextAction::Delete)?;
            Ok(vec![format!("deleted {path}")])
        }
        TaskCommand::Edit { path, filter } => {
            apply(session, TreeKind::Tasks, path, filter, ContextAction::Edit)?;
            Ok(session.view().task_form_lines())
        }
    }
}

fn list(session: &mut Session<'_>, kind: TreeKind, filter: FilterArgs, collapsed: bool) {
    session.view_mut().set_filter(kind, filter.filter);
    session.filter_changed(kind);
    if collapsed {
        session.view_mut().set_expanded(kind, false);
    }
}

fn apply(
    session: &mut Session<'_>,
    kind: TreeKind,
    path: TreePath,
    filter: FilterArgs,
    action: ContextAction,
) -> Result<(), CliError> {
    session.view_mut().set_filter(kind, filter.filter);
    match session.apply_action(kind, path, action)? {
        ActionOutcome::Applied => Ok(()),
        ActionOutcome::NoSelection => Err(CliError::NothingSelected { kind, path }),
        ActionOutcome::NotApplicable => Err(CliError::GroupNotEditable(path)),
    }
}

fn added_message(inserted: bool, what: &str) -> String {
    if inserted {
        format!("added {what}")
    } else {
        format!("{what} already exists, nothing added")
    }
}

fn error_kind(err: &PlannerError) -> &'static str {
    match err {
        PlannerError::Validation(_) => "invalid input",
        PlannerError::Persistence(_) => "storage failure",
        PlannerError::InterfaceLoad(_) => "interface failure",
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
