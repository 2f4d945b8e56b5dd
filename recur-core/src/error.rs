//! Error types for recur.

use thiserror::Error;

/// Errors that can occur while validating, parsing or storing patterns.
///
/// Enumeration and description never fail; these only come from the
/// caller-side checks and from file handling.
#[derive(Error, Debug)]
pub enum RecurError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Interval must be at least 1, got {0}")]
    InvalidInterval(u32),

    #[error("Weekly patterns need at least one weekday")]
    EmptyWeekDays,

    #[error("Weekday index {0} is out of range (0=Sunday..6=Saturday)")]
    WeekDayOutOfRange(u8),

    #[error("Day of month {0} is out of range (1..31)")]
    MonthDayOutOfRange(u32),

    #[error("Nth-weekday rule needs both a week and a weekday")]
    IncompleteNthWeekday,

    #[error("End type 'on' requires an end date")]
    MissingEndDate,

    #[error("End type 'after' requires at least one occurrence")]
    InvalidOccurrenceCount,

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for recur operations.
pub type RecurResult<T> = Result<T, RecurError>;
