//! Task entry form with field validation.
//!
//! [`validation::validate`] checks a raw [`models::TaskInput`] against a
//! caller-supplied moment and returns either a [`models::TaskRecord`] or the
//! errors of every failing field. The `commands` and `tui` modules are the
//! command-line and terminal front ends built on it.

pub mod clock;
pub mod commands;
pub mod config;
pub mod messages;
pub mod models;
pub mod tui;
pub mod validation;
