//! Runtime configuration resolved from command-line flags.

use crate::args::Cli;
use planner_core::default_log_level;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE_NAME: &str = "planner.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "logs";

/// Effective settings for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Absolute database path.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Absolute log directory.
    pub log_dir: PathBuf,
    pub date_format: String,
    pub json: bool,
}

impl CliConfig {
    /// Resolves defaults and makes every path absolute against `cwd`.
    pub fn resolve(cli: &Cli, cwd: &Path) -> Self {
        let db_path = absolutize(
            cli.db
                .as_deref()
                .unwrap_or_else(|| Path::new(DEFAULT_DB_FILE_NAME)),
            cwd,
        );
        let log_dir = match cli.log_dir.as_deref() {
            Some(dir) => absolutize(dir, cwd),
            None => db_path
                .parent()
                .unwrap_or(cwd)
                .join(DEFAULT_LOG_DIR_NAME),
        };

        Self {
            db_path,
            log_level: cli
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string()),
            log_dir,
            date_format: cli.date_format.clone(),
            json: cli.json,
        }
    }
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
