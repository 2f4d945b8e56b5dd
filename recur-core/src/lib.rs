//! Core types for recurring date patterns.
//!
//! This crate provides everything the `recur` CLI (or any other front end) needs:
//! - `pattern` for the `RecurrenceConfig` value and its caller-side edits
//! - `recurrence` for enumerating the dates a pattern produces
//! - `describe` for the human-readable summary sentence
//! - `calendar` for the month grid with highlighted dates

pub mod calendar;
pub mod constants;
pub mod date_util;
pub mod describe;
pub mod error;
pub mod pattern;
pub mod recurrence;
pub mod settings;

pub use describe::describe_pattern;
pub use error::{RecurError, RecurResult};
pub use pattern::{EndRule, EndType, MonthWeek, MonthlyRule, RecurrenceConfig, RecurrenceType};
pub use recurrence::{enumerate_occurrences, Occurrences};
