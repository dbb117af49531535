//! Core types for syllabus-sync.
//!
//! This crate holds everything that does not talk to a specific provider:
//! - `task` for the extracted task records
//! - `identity`, `event` and `ics` for mapping and exporting tasks
//! - `reconcile` and `summary` for writing tasks to a remote calendar

pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod ics;
pub mod identity;
pub mod reconcile;
pub mod summary;
pub mod task;

pub use error::{SyllabusError, SyllabusResult};
pub use identity::Identity;
pub use task::Task;
