//! Planner use-case services.
//!
//! # Responsibility
//! - Orchestrate index mutations against the persistence adapter.
//! - Keep UI layers decoupled from storage details.

pub mod planner_service;
pub mod session;
