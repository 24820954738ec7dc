//! Command-line surface.

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use planner_core::{Category, TreePath};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "planner")]
#[command(about = "Personal planner: dated events and prioritized tasks", version)]
pub struct Cli {
    /// SQLite database file (created when missing)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files (defaults to `logs/` next to the database)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// strftime pattern for date group headers
    #[arg(long, global = true, default_value = "%d.%m.%Y")]
    pub date_format: String,

    /// Print trees and forms as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Calendar events grouped by date
    Events {
        #[command(subcommand)]
        command: EventCommand,
    },
    /// Tasks grouped by priority category
    Tasks {
        #[command(subcommand)]
        command: TaskCommand,
    },
}

/// Filter shared by commands that read or address the tree.
#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Show only entries whose name contains this text (case-insensitive)
    #[arg(long, short = 'f')]
    pub filter: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// Show the event tree
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Show date headers only
        #[arg(long)]
        collapsed: bool,
    },
    /// Add an event
    Add {
        #[arg(long, short = 'n')]
        name: String,
        /// YYYY-MM-DD, defaults to today
        #[arg(long, short = 'd', value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// HH:MM or HH:MM:SS
        #[arg(long, value_parser = parse_time)]
        start: NaiveTime,
        /// HH:MM or HH:MM:SS, not earlier than --start
        #[arg(long, value_parser = parse_time)]
        end: NaiveTime,
    },
    /// Delete an event (G.L) or a whole date (G)
    Delete {
        path: TreePath,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Remove an event and print its values for resubmission
    Edit {
        path: TreePath,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// Show the task tree
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Show category headers only
        #[arg(long)]
        collapsed: bool,
    },
    /// Add a task
    Add {
        /// 1-4 or the full category label
        #[arg(long, short = 'c', value_parser = parse_category)]
        category: Category,
        #[arg(long, short = 'n')]
        name: String,
        /// Free text, cut to 100 characters
        #[arg(long, short = 'd', default_value = "")]
        description: String,
    },
    /// Delete a task (G.L) or empty a category (G)
    Delete {
        path: TreePath,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Remove a task and print its values for resubmission
    Edit {
        path: TreePath,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|err| format!("expected HH:MM or HH:MM:SS: {err}"))
}

pub fn parse_category(value: &str) -> Result<Category, String> {
    if let Ok(number) = value.trim().parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|index| Category::ALL.get(index).copied())
            .ok_or_else(|| format!("category number must be 1-{}", Category::ALL.len()));
    }
    value.parse::<Category>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse_category, parse_time, Cli, Command, EventCommand};
    use chrono::NaiveTime;
    use clap::Parser;
    use planner_core::{Category, TreePath};

    #[test]
    fn time_accepts_minutes_and_seconds() {
        assert_eq!(
            parse_time("09:15").unwrap(),
            NaiveTime::from_hms_opt(9, 15, 0).unwrap()
        );
        assert_eq!(
            parse_time("09:15:30").unwrap(),
            NaiveTime::from_hms_opt(9, 15, 30).unwrap()
        );
        assert!(parse_time("9am").is_err());
    }

    #[test]
    fn category_accepts_number_or_label() {
        assert_eq!(parse_category("1").unwrap(), Category::UrgentImportant);
        assert_eq!(parse_category("4").unwrap(), Category::NotUrgentNotImportant);
        assert_eq!(
            parse_category("Не срочно, но важно").unwrap(),
            Category::NotUrgentImportant
        );
        assert!(parse_category("0").is_err());
        assert!(parse_category("5").is_err());
        assert!(parse_category("someday").is_err());
    }

    #[test]
    fn delete_parses_tree_path_and_filter() {
        let cli = Cli::try_parse_from([
            "planner", "--db", "x.sqlite3", "events", "delete", "2.1", "--filter", "rev",
        ])
        .unwrap();
        match cli.command {
            Command::Events {
                command: EventCommand::Delete { path, filter },
            } => {
                assert_eq!(path, TreePath::leaf(1, 0));
                assert_eq!(filter.filter.as_deref(), Some("rev"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_rejects_malformed_date() {
        let result = Cli::try_parse_from([
            "planner", "events", "add", "--name", "x", "--date", "10.01.2024", "--start",
            "09:00", "--end", "10:00",
        ]);
        assert!(result.is_err());
    }
}
