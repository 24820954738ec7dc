//! Planner domain model.
//!
//! # Responsibility
//! - Define the event and task records shared by indices, storage and views.
//! - Own the validation rules every write path must pass.
//!
//! # Invariants
//! - Records carry no surrogate key; identity is the full value tuple.
//! - The category set is fixed at compile time and never mutated.

pub mod event;
pub mod task;
pub mod validation;
