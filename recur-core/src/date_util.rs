//! Calendar helpers shared by the engine, describer and month grid.
//!
//! Weekday indices are Sunday-first (0=Sunday..6=Saturday), matching how
//! patterns store their weekday sets.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::{RecurError, RecurResult};
use crate::pattern::MonthWeek;

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Number of days in the given month (1-based). Returns 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = add_months(year, month, 1);
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next_first)) => (next_first - first).num_days() as u32,
        _ => 0,
    }
}

/// Shift a (year, month) pair by `delta` months, wrapping across years.
pub fn add_months(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = year as i64 * 12 + month as i64 - 1 + delta as i64;
    let year = zero_based.div_euclid(12) as i32;
    let month = zero_based.rem_euclid(12) as u32 + 1;
    (year, month)
}

/// Sunday-first index of a weekday.
pub fn weekday_index(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8
}

/// Weekday for a Sunday-first index, or None when out of range.
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Full English name, e.g. "Tuesday".
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAY_NAMES[weekday_index(weekday) as usize]
}

/// Parse a weekday from its full name or common abbreviation, case-insensitively.
pub fn parse_weekday(s: &str) -> RecurResult<Weekday> {
    let lower = s.trim().to_lowercase();
    let weekday = match lower.as_str() {
        "sunday" | "sun" => Weekday::Sun,
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        _ => {
            return Err(RecurError::UnknownValue {
                kind: "weekday",
                value: s.to_string(),
            });
        }
    };
    Ok(weekday)
}

/// Full English month name for a 1-based month.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// Resolve "the Nth weekday of the month", e.g. the second Tuesday of September 2025.
///
/// Returns None when the month has no such day (a fourth weekday can't overflow,
/// but an invalid year/month can) rather than rolling into the next month.
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    nth: MonthWeek,
) -> Option<NaiveDate> {
    match nth.ordinal() {
        Some(ordinal) => NaiveDate::from_weekday_of_month_opt(year, month, weekday, ordinal),
        None => {
            let last = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))?;
            let back = (weekday_index(last.weekday()) + 7 - weekday_index(weekday)) % 7;
            Some(last - Duration::days(back as i64))
        }
    }
}

/// Parse YYYY-MM-DD.
pub fn parse_date(s: &str) -> RecurResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| RecurError::InvalidDate(s.to_string()))
}

/// en-US short locale date, e.g. "9/30/2025".
pub fn format_locale_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// Date label used in occurrence lists, e.g. "Thu, Sep 4, 2025".
pub fn format_preview_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 13), 0);
    }

    #[test]
    fn add_months_wraps_years() {
        assert_eq!(add_months(2025, 11, 3), (2026, 2));
        assert_eq!(add_months(2025, 1, -1), (2024, 12));
        assert_eq!(add_months(2025, 6, 24), (2027, 6));
        assert_eq!(add_months(2025, 3, 0), (2025, 3));
    }

    #[test]
    fn weekday_indices_are_sunday_first() {
        assert_eq!(weekday_index(Weekday::Sun), 0);
        assert_eq!(weekday_index(Weekday::Sat), 6);
        for i in 0..7 {
            assert_eq!(weekday_index(weekday_from_index(i).unwrap()), i);
        }
        assert_eq!(weekday_from_index(7), None);
    }

    #[test]
    fn parse_weekday_names() {
        assert_eq!(parse_weekday("tuesday").unwrap(), Weekday::Tue);
        assert_eq!(parse_weekday("Fri").unwrap(), Weekday::Fri);
        assert_eq!(parse_weekday(" SUNDAY ").unwrap(), Weekday::Sun);
        assert!(parse_weekday("someday").is_err());
    }

    #[test]
    fn second_tuesday() {
        assert_eq!(
            nth_weekday_of_month(2025, 9, Weekday::Tue, MonthWeek::Second),
            Some(date(2025, 9, 9))
        );
        assert_eq!(
            nth_weekday_of_month(2025, 10, Weekday::Tue, MonthWeek::Second),
            Some(date(2025, 10, 14))
        );
    }

    #[test]
    fn first_weekday_on_the_first() {
        // September 1, 2025 is a Monday
        assert_eq!(
            nth_weekday_of_month(2025, 9, Weekday::Mon, MonthWeek::First),
            Some(date(2025, 9, 1))
        );
    }

    #[test]
    fn last_weekday_walks_back_from_month_end() {
        // August 31, 2025 is a Sunday
        assert_eq!(
            nth_weekday_of_month(2025, 8, Weekday::Sun, MonthWeek::Last),
            Some(date(2025, 8, 31))
        );
        assert_eq!(
            nth_weekday_of_month(2025, 8, Weekday::Fri, MonthWeek::Last),
            Some(date(2025, 8, 29))
        );
        assert_eq!(
            nth_weekday_of_month(2024, 2, Weekday::Thu, MonthWeek::Last),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn invalid_month_has_no_nth_weekday() {
        assert_eq!(
            nth_weekday_of_month(2025, 13, Weekday::Mon, MonthWeek::First),
            None
        );
        assert_eq!(
            nth_weekday_of_month(2025, 0, Weekday::Mon, MonthWeek::Last),
            None
        );
    }

    #[test]
    fn locale_formats() {
        assert_eq!(format_locale_date(date(2025, 9, 30)), "9/30/2025");
        assert_eq!(format_preview_date(date(2025, 9, 4)), "Thu, Sep 4, 2025");
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date("2025-09-04").unwrap(), date(2025, 9, 4));
        assert!(matches!(
            parse_date("09/04/2025"),
            Err(RecurError::InvalidDate(_))
        ));
    }
}
