//! The recurrence pattern value and the edits a front end applies to it.
//!
//! A `RecurrenceConfig` is a plain value: the front end rebuilds or edits it on
//! every user change and hands it to the engine and describer, neither of which
//! mutate it.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::date_util::{weekday_from_index, weekday_index};
use crate::error::{RecurError, RecurResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceType {
    pub const ALL: [RecurrenceType; 4] = [
        RecurrenceType::Daily,
        RecurrenceType::Weekly,
        RecurrenceType::Monthly,
        RecurrenceType::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceType::Daily => "daily",
            RecurrenceType::Weekly => "weekly",
            RecurrenceType::Monthly => "monthly",
            RecurrenceType::Yearly => "yearly",
        }
    }
}

impl fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceType {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RecurError::UnknownValue {
                kind: "recurrence type",
                value: s.to_string(),
            })
    }
}

/// Which occurrence of a weekday inside a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthWeek {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

impl MonthWeek {
    pub const ALL: [MonthWeek; 5] = [
        MonthWeek::First,
        MonthWeek::Second,
        MonthWeek::Third,
        MonthWeek::Fourth,
        MonthWeek::Last,
    ];

    /// 1-based ordinal, None for `Last`.
    pub fn ordinal(&self) -> Option<u8> {
        match self {
            MonthWeek::First => Some(1),
            MonthWeek::Second => Some(2),
            MonthWeek::Third => Some(3),
            MonthWeek::Fourth => Some(4),
            MonthWeek::Last => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MonthWeek::First => "first",
            MonthWeek::Second => "second",
            MonthWeek::Third => "third",
            MonthWeek::Fourth => "fourth",
            MonthWeek::Last => "last",
        }
    }
}

impl fmt::Display for MonthWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MonthWeek {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RecurError::UnknownValue {
                kind: "month week",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndType {
    Never,
    On,
    After,
}

impl EndType {
    pub const ALL: [EndType; 3] = [EndType::Never, EndType::On, EndType::After];

    pub fn as_str(&self) -> &'static str {
        match self {
            EndType::Never => "never",
            EndType::On => "on",
            EndType::After => "after",
        }
    }
}

impl fmt::Display for EndType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndType {
    type Err = RecurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| RecurError::UnknownValue {
                kind: "end type",
                value: s.to_string(),
            })
    }
}

/// The monthly rule actually in effect for a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthlyRule {
    DayOfMonth(u32),
    NthWeekday(MonthWeek, Weekday),
}

/// The termination rule actually in effect for a config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndRule {
    Never,
    /// Inclusive upper bound.
    Until(NaiveDate),
    /// Maximum number of occurrences.
    Count(u32),
}

/// A recurring date pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrenceConfig {
    pub recurrence_type: RecurrenceType,
    pub interval: u32,
    /// Sunday-first weekday indices (0=Sunday..6=Saturday), used by weekly patterns.
    pub week_days: BTreeSet<u8>,
    /// Used by monthly patterns when no Nth-weekday rule is set.
    pub month_day: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_week: Option<MonthWeek>,
    #[serde(with = "weekday_name", skip_serializing_if = "Option::is_none")]
    pub month_week_day: Option<Weekday>,
    pub start_date: NaiveDate,
    pub end_type: EndType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub end_occurrences: u32,
}

impl Default for RecurrenceConfig {
    /// Weekly on Mondays from September 4, 2025, never ending.
    fn default() -> Self {
        RecurrenceConfig {
            recurrence_type: RecurrenceType::Weekly,
            interval: 1,
            week_days: BTreeSet::from([1]),
            month_day: 1,
            month_week: None,
            month_week_day: None,
            start_date: NaiveDate::from_ymd_opt(2025, 9, 4).unwrap_or_default(),
            end_type: EndType::Never,
            end_date: None,
            end_occurrences: 10,
        }
    }
}

impl RecurrenceConfig {
    /// A never-ending pattern of the given type with every other field defaulted.
    pub fn new(recurrence_type: RecurrenceType, start_date: NaiveDate) -> Self {
        RecurrenceConfig {
            recurrence_type,
            start_date,
            ..Default::default()
        }
    }

    /// The monthly rule in effect: Nth-weekday when both halves are set, day of month otherwise.
    pub fn monthly_rule(&self) -> MonthlyRule {
        match (self.month_week, self.month_week_day) {
            (Some(week), Some(day)) => MonthlyRule::NthWeekday(week, day),
            _ => MonthlyRule::DayOfMonth(self.month_day),
        }
    }

    /// The termination rule in effect. An `on` rule without a date never ends.
    pub fn end_rule(&self) -> EndRule {
        match (self.end_type, self.end_date) {
            (EndType::Never, _) | (EndType::On, None) => EndRule::Never,
            (EndType::On, Some(date)) => EndRule::Until(date),
            (EndType::After, _) => EndRule::Count(self.end_occurrences),
        }
    }

    /// Configured weekdays in Sunday-first order, skipping out-of-range indices.
    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.week_days.iter().filter_map(|&i| weekday_from_index(i))
    }

    pub fn has_week_day(&self, weekday: Weekday) -> bool {
        self.week_days.contains(&weekday_index(weekday))
    }

    /// Checks a front end runs before handing the config to the engine.
    pub fn validate(&self) -> RecurResult<()> {
        if self.interval < 1 {
            return Err(RecurError::InvalidInterval(self.interval));
        }

        match self.recurrence_type {
            RecurrenceType::Weekly => {
                if self.week_days.is_empty() {
                    return Err(RecurError::EmptyWeekDays);
                }
                if let Some(&bad) = self.week_days.iter().find(|&&i| i > 6) {
                    return Err(RecurError::WeekDayOutOfRange(bad));
                }
            }
            RecurrenceType::Monthly => match (self.month_week, self.month_week_day) {
                (Some(_), Some(_)) => {}
                (None, None) => {
                    if !(1..=31).contains(&self.month_day) {
                        return Err(RecurError::MonthDayOutOfRange(self.month_day));
                    }
                }
                _ => return Err(RecurError::IncompleteNthWeekday),
            },
            RecurrenceType::Daily | RecurrenceType::Yearly => {}
        }

        match self.end_type {
            EndType::On if self.end_date.is_none() => Err(RecurError::MissingEndDate),
            EndType::After if self.end_occurrences < 1 => Err(RecurError::InvalidOccurrenceCount),
            _ => Ok(()),
        }
    }

    /// Toggle a weekday in the weekly set.
    ///
    /// Removing the last remaining weekday is refused. Returns whether the set changed.
    pub fn toggle_week_day(&mut self, index: u8) -> bool {
        if index > 6 {
            return false;
        }
        if self.week_days.contains(&index) {
            if self.week_days.len() == 1 {
                return false;
            }
            self.week_days.remove(&index);
        } else {
            self.week_days.insert(index);
        }
        true
    }

    /// Switch monthly patterns to the day-of-month rule.
    pub fn use_month_day(&mut self) {
        self.month_week = None;
        self.month_week_day = None;
    }

    /// Switch monthly patterns to the Nth-weekday rule, starting from "first monday".
    pub fn use_nth_weekday(&mut self) {
        self.month_week = Some(MonthWeek::First);
        self.month_week_day = Some(Weekday::Mon);
    }

    /// Unit noun for the interval field, e.g. "week" or "weeks".
    pub fn interval_unit(&self) -> &'static str {
        let plural = self.interval != 1;
        match (self.recurrence_type, plural) {
            (RecurrenceType::Daily, false) => "day",
            (RecurrenceType::Daily, true) => "days",
            (RecurrenceType::Weekly, false) => "week",
            (RecurrenceType::Weekly, true) => "weeks",
            (RecurrenceType::Monthly, false) => "month",
            (RecurrenceType::Monthly, true) => "months",
            (RecurrenceType::Yearly, false) => "year",
            (RecurrenceType::Yearly, true) => "years",
        }
    }
}

/// Coerce free-text numeric input to a positive count, falling back to 1.
pub fn parse_count_or_default(s: &str) -> u32 {
    match s.trim().parse::<i64>() {
        Ok(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Serializes an optional weekday as its lowercase full name ("monday").
mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::date_util;

    pub fn serialize<S: Serializer>(value: &Option<Weekday>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(day) => serializer.serialize_str(&date_util::weekday_name(*day).to_lowercase()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Weekday>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| date_util::parse_weekday(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
