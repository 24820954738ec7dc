//! Persistence adapter contracts and implementations.
//!
//! # Responsibility
//! - Define the row-level read/write contract the planner controller syncs
//!   against.
//! - Keep SQL details away from indices and services.
//!
//! # Invariants
//! - Write paths validate records before touching storage.
//! - Read paths reject corrupt persisted rows instead of masking them.

pub mod memory_repo;
pub mod planner_repo;
pub mod sqlite_repo;
