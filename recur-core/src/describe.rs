//! Human-readable summaries of recurrence patterns.

use crate::date_util::{format_locale_date, weekday_name};
use crate::pattern::{EndRule, MonthlyRule, RecurrenceConfig, RecurrenceType};

/// Describe a pattern in English, e.g. "Every 2 weeks on Monday, Friday for 10 occurrences".
pub fn describe_pattern(config: &RecurrenceConfig) -> String {
    let interval = config.interval;

    let mut text = match config.recurrence_type {
        RecurrenceType::Daily => {
            if interval == 1 {
                "Every day".to_string()
            } else {
                format!("Every {interval} days")
            }
        }
        RecurrenceType::Weekly => {
            let names: Vec<&str> = config.weekdays().map(weekday_name).collect();
            let names = names.join(", ");
            if interval == 1 {
                format!("Every {names}")
            } else {
                format!("Every {interval} weeks on {names}")
            }
        }
        RecurrenceType::Monthly => {
            let every = if interval == 1 {
                "month".to_string()
            } else {
                format!("{interval} months")
            };
            match config.monthly_rule() {
                MonthlyRule::NthWeekday(week, weekday) => format!(
                    "The {week} {} of every {every}",
                    weekday_name(weekday).to_lowercase()
                ),
                MonthlyRule::DayOfMonth(day) => {
                    format!("The {day}{} day of every {every}", ordinal_suffix(day))
                }
            }
        }
        RecurrenceType::Yearly => {
            if interval == 1 {
                "Every year".to_string()
            } else {
                format!("Every {interval} years")
            }
        }
    };

    match config.end_rule() {
        EndRule::Never => {}
        EndRule::Until(end) => {
            text.push_str(" until ");
            text.push_str(&format_locale_date(end));
        }
        EndRule::Count(count) => {
            text.push_str(&format!(" for {count} occurrences"));
        }
    }

    text
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 12th, 13th, 21st...
pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
