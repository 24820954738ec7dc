//! Core logic for the personal planner.
//! Owns the event/task indices, their projections and the storage contract.

pub mod db;
pub mod index;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod service;
pub mod view;

pub use index::event_index::EventIndex;
pub use index::task_index::TaskIndex;
pub use index::SearchFilter;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::Event;
pub use model::task::{bound_description, Category, Task, UnknownCategory, MAX_DESCRIPTION_CHARS};
pub use model::validation::ValidationError;
pub use projection::{
    DateGroup, ProjectionNode, ProjectionTree, TaskGroup, TreeBranch, TreeKind, TreePath,
    TreePathError,
};
pub use repo::memory_repo::MemoryPlannerRepository;
pub use repo::planner_repo::{PlannerRepository, RepoError, RepoResult};
pub use repo::sqlite_repo::SqlitePlannerRepository;
pub use service::planner_service::{Planner, PlannerError};
pub use service::session::{ActionOutcome, PlannerSession};
pub use view::{ContextAction, EventForm, PlannerView, TaskForm};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
