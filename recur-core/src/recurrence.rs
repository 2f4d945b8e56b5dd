//! Occurrence enumeration for recurring date patterns.
//!
//! A cursor walks forward from the start date. Each step resolves the date the
//! pattern produces for the cursor's day, month or year (if any), filters it
//! through the termination rule, then advances the cursor by the type's step.
//! Every enumeration is bounded by an iteration budget so patterns that match
//! rarely or never still terminate.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use tracing::debug;

use crate::constants::{DEFAULT_CALENDAR_LIMIT, MAX_ITERATIONS};
use crate::date_util::{add_months, days_in_month, nth_weekday_of_month};
use crate::pattern::{EndRule, MonthlyRule, RecurrenceConfig, RecurrenceType};

/// Enumerate up to `max_dates` occurrences with the default iteration budget.
pub fn enumerate_occurrences(config: &RecurrenceConfig, max_dates: usize) -> Vec<NaiveDate> {
    enumerate_with_budget(config, max_dates, MAX_ITERATIONS)
}

/// Enumerate up to `max_dates` occurrences, taking at most `max_iterations` cursor steps.
pub fn enumerate_with_budget(
    config: &RecurrenceConfig,
    max_dates: usize,
    max_iterations: usize,
) -> Vec<NaiveDate> {
    Occurrences::with_budget(config, max_iterations)
        .take(max_dates)
        .collect()
}

/// The next `count` occurrences, as shown under a pattern summary.
pub fn upcoming(config: &RecurrenceConfig, count: usize) -> Vec<NaiveDate> {
    let mut dates = enumerate_occurrences(config, DEFAULT_CALENDAR_LIMIT);
    dates.truncate(count);
    dates
}

impl EndRule {
    /// Whether `date` may be emitted given `accepted` earlier occurrences.
    pub fn should_include(&self, date: NaiveDate, accepted: usize) -> bool {
        match *self {
            EndRule::Never => true,
            EndRule::Until(end) => date <= end,
            EndRule::Count(max) => accepted < max as usize,
        }
    }

    /// Whether nothing at or after `cursor` can be emitted any more.
    fn is_exhausted(&self, cursor: NaiveDate, accepted: usize) -> bool {
        match *self {
            EndRule::Never => false,
            EndRule::Until(end) => cursor > end,
            EndRule::Count(max) => accepted >= max as usize,
        }
    }
}

/// Lazy, ordered occurrences of a pattern.
///
/// Yields strictly increasing dates, none before the start date.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    config: &'a RecurrenceConfig,
    end_rule: EndRule,
    interval: u32,
    cursor: Option<NaiveDate>,
    accepted: usize,
    steps: usize,
    max_iterations: usize,
}

impl<'a> Occurrences<'a> {
    pub fn new(config: &'a RecurrenceConfig) -> Self {
        Self::with_budget(config, MAX_ITERATIONS)
    }

    pub fn with_budget(config: &'a RecurrenceConfig, max_iterations: usize) -> Self {
        Occurrences {
            config,
            end_rule: config.end_rule(),
            // A zero interval would revisit the same day forever
            interval: config.interval.max(1),
            cursor: Some(config.start_date),
            accepted: 0,
            steps: 0,
            max_iterations,
        }
    }

    /// Cursor steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The date the pattern produces for the cursor's period, if any.
    fn candidate(&self, cursor: NaiveDate) -> Option<NaiveDate> {
        match self.config.recurrence_type {
            RecurrenceType::Daily => Some(cursor),
            RecurrenceType::Weekly => self.config.has_week_day(cursor.weekday()).then_some(cursor),
            RecurrenceType::Monthly => match self.config.monthly_rule() {
                MonthlyRule::DayOfMonth(day) => {
                    let last = days_in_month(cursor.year(), cursor.month());
                    NaiveDate::from_ymd_opt(cursor.year(), cursor.month(), day.min(last))
                }
                MonthlyRule::NthWeekday(week, weekday) => {
                    nth_weekday_of_month(cursor.year(), cursor.month(), weekday, week)
                }
            },
            RecurrenceType::Yearly => {
                let start = self.config.start_date;
                // Feb 29 anchors have no match in common years
                NaiveDate::from_ymd_opt(cursor.year(), start.month(), start.day())
            }
        }
    }

    /// Step the cursor. None once the calendar range runs out.
    fn advance(&self, cursor: NaiveDate) -> Option<NaiveDate> {
        match self.config.recurrence_type {
            RecurrenceType::Daily => cursor.checked_add_days(Days::new(self.interval as u64)),
            RecurrenceType::Weekly => {
                let next = cursor.succ_opt()?;
                if next.weekday() == Weekday::Sun && self.interval > 1 {
                    next.checked_add_days(Days::new((self.interval as u64 - 1) * 7))
                } else {
                    Some(next)
                }
            }
            RecurrenceType::Monthly => {
                let delta = i32::try_from(self.interval).ok()?;
                let (year, month) = add_months(cursor.year(), cursor.month(), delta);
                NaiveDate::from_ymd_opt(year, month, 1)
            }
            RecurrenceType::Yearly => {
                let year = cursor.year().checked_add(i32::try_from(self.interval).ok()?)?;
                NaiveDate::from_ymd_opt(year, 1, 1)
            }
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        while self.steps < self.max_iterations {
            let cursor = self.cursor?;
            if self.end_rule.is_exhausted(cursor, self.accepted) {
                self.cursor = None;
                return None;
            }

            let candidate = self.candidate(cursor);
            self.cursor = self.advance(cursor);
            self.steps += 1;

            let start = self.config.start_date;
            if let Some(date) = candidate.filter(|d| *d >= start) {
                if self.end_rule.should_include(date, self.accepted) {
                    self.accepted += 1;
                    return Some(date);
                }
            }
        }

        if self.cursor.take().is_some() {
            debug!(
                steps = self.steps,
                accepted = self.accepted,
                recurrence_type = %self.config.recurrence_type,
                "Iteration budget exhausted"
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{EndType, MonthWeek};
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config(recurrence_type: RecurrenceType, start: NaiveDate) -> RecurrenceConfig {
        RecurrenceConfig::new(recurrence_type, start)
    }

    // --- daily ---

    #[test]
    fn daily_every_day() {
        let cfg = config(RecurrenceType::Daily, date(2025, 2, 27));
        assert_eq!(
            enumerate_occurrences(&cfg, 4),
            vec![
                date(2025, 2, 27),
                date(2025, 2, 28),
                date(2025, 3, 1),
                date(2025, 3, 2)
            ]
        );
    }

    #[test]
    fn daily_interval_steps_days() {
        let mut cfg = config(RecurrenceType::Daily, date(2025, 1, 30));
        cfg.interval = 3;
        assert_eq!(
            enumerate_occurrences(&cfg, 3),
            vec![date(2025, 1, 30), date(2025, 2, 2), date(2025, 2, 5)]
        );
    }

    #[test]
    fn zero_interval_still_advances() {
        let mut cfg = config(RecurrenceType::Daily, date(2025, 1, 1));
        cfg.interval = 0;
        let dates = enumerate_occurrences(&cfg, 3);
        assert_eq!(dates, vec![date(2025, 1, 1), date(2025, 1, 2), date(2025, 1, 3)]);
    }

    // --- weekly ---

    #[test]
    fn weekly_default_mondays_after_thursday_start() {
        let cfg = RecurrenceConfig::default();
        assert_eq!(
            enumerate_occurrences(&cfg, 3),
            vec![date(2025, 9, 8), date(2025, 9, 15), date(2025, 9, 22)]
        );
    }

    #[test]
    fn weekly_every_other_week_skips_alternate_weeks() {
        let mut cfg = config(RecurrenceType::Weekly, date(2025, 9, 1));
        cfg.week_days = BTreeSet::from([1, 5]);
        cfg.interval = 2;
        assert_eq!(
            enumerate_occurrences(&cfg, 6),
            vec![
                date(2025, 9, 1),
                date(2025, 9, 5),
                date(2025, 9, 15),
                date(2025, 9, 19),
                date(2025, 9, 29),
                date(2025, 10, 3)
            ]
        );
    }

    #[test]
    fn weekly_with_empty_set_yields_nothing() {
        let mut cfg = config(RecurrenceType::Weekly, date(2025, 9, 1));
        cfg.week_days.clear();
        assert!(enumerate_occurrences(&cfg, 10).is_empty());
    }

    #[test]
    fn weekly_ignores_out_of_range_indices() {
        let mut cfg = config(RecurrenceType::Weekly, date(2025, 9, 1));
        cfg.week_days = BTreeSet::from([3, 42]);
        assert_eq!(
            enumerate_occurrences(&cfg, 2),
            vec![date(2025, 9, 3), date(2025, 9, 10)]
        );
    }

    // --- monthly ---

    #[test]
    fn monthly_day_clamps_to_month_end() {
        let mut cfg = config(RecurrenceType::Monthly, date(2025, 1, 31));
        cfg.month_day = 31;
        assert_eq!(
            enumerate_occurrences(&cfg, 4),
            vec![
                date(2025, 1, 31),
                date(2025, 2, 28),
                date(2025, 3, 31),
                date(2025, 4, 30)
            ]
        );
    }

    #[test]
    fn monthly_day_later_in_start_month() {
        let mut cfg = config(RecurrenceType::Monthly, date(2025, 1, 5));
        cfg.month_day = 10;
        assert_eq!(
            enumerate_occurrences(&cfg, 2),
            vec![date(2025, 1, 10), date(2025, 2, 10)]
        );
    }

    #[test]
    fn monthly_day_before_start_skips_first_month() {
        let mut cfg = config(RecurrenceType::Monthly, date(2025, 1, 20));
        cfg.month_day = 15;
        cfg.interval = 2;
        assert_eq!(
            enumerate_occurrences(&cfg, 2),
            vec![date(2025, 3, 15), date(2025, 5, 15)]
        );
    }

    #[test]
    fn monthly_day_zero_never_matches() {
        let mut cfg = config(RecurrenceType::Monthly, date(2025, 1, 1));
        cfg.month_day = 0;
        assert!(enumerate_occurrences(&cfg, 5).is_empty());
    }

    #[test]
    fn monthly_second_tuesday() {
        let mut cfg = config(RecurrenceType::Monthly, date(2025, 9, 1));
        cfg.month_week = Some(MonthWeek::Second);
        cfg.month_week_day = Some(Weekday::Tue);
        assert_eq!(
            enumerate_occurrences(&cfg, 3),
            vec![date(2025, 9, 9), date(2025, 10, 14), date(2025, 11, 11)]
        );
    }

    #[test]
    fn monthly_last_friday_across_year_end() {
        let mut cfg = config(RecurrenceType::Monthly, date(2025, 11, 1));
        cfg.month_week = Some(MonthWeek::Last);
        cfg.month_week_day = Some(Weekday::Fri);
        assert_eq!(
            enumerate_occurrences(&cfg, 4),
            vec![
                date(2025, 11, 28),
                date(2025, 12, 26),
                date(2026, 1, 30),
                date(2026, 2, 27)
            ]
        );
    }

    #[test]
    fn monthly_nth_weekday_before_start_is_skipped() {
        let mut cfg = config(RecurrenceType::Monthly, date(2025, 9, 10));
        cfg.month_week = Some(MonthWeek::First);
        cfg.month_week_day = Some(Weekday::Mon);
        cfg.interval = 3;
        // September 1 is before the start; then every third month
        assert_eq!(
            enumerate_occurrences(&cfg, 2),
            vec![date(2025, 12, 1), date(2026, 3, 2)]
        );
    }

    // --- yearly ---

    #[test]
    fn yearly_every_two_years() {
        let mut cfg = config(RecurrenceType::Yearly, date(2025, 3, 15));
        cfg.interval = 2;
        assert_eq!(
            enumerate_occurrences(&cfg, 3),
            vec![date(2025, 3, 15), date(2027, 3, 15), date(2029, 3, 15)]
        );
    }

    #[test]
    fn yearly_leap_day_only_in_leap_years() {
        let cfg = config(RecurrenceType::Yearly, date(2024, 2, 29));
        assert_eq!(
            enumerate_occurrences(&cfg, 3),
            vec![date(2024, 2, 29), date(2028, 2, 29), date(2032, 2, 29)]
        );
    }

    // --- termination ---

    #[test]
    fn end_on_date_is_inclusive() {
        let mut cfg = config(RecurrenceType::Daily, date(2025, 1, 1));
        cfg.end_type = EndType::On;
        cfg.end_date = Some(date(2025, 1, 5));
        let dates = enumerate_occurrences(&cfg, 50);
        assert_eq!(dates.len(), 5);
        assert_eq!(dates.last(), Some(&date(2025, 1, 5)));
    }

    #[test]
    fn end_on_stops_scanning_past_end_date() {
        let mut cfg = config(RecurrenceType::Daily, date(2025, 1, 1));
        cfg.end_type = EndType::On;
        cfg.end_date = Some(date(2025, 1, 3));
        let mut occurrences = Occurrences::new(&cfg);
        assert_eq!(occurrences.by_ref().count(), 3);
        assert_eq!(occurrences.steps(), 3);
    }

    #[test]
    fn end_after_count() {
        let mut cfg = config(RecurrenceType::Weekly, date(2025, 9, 1));
        cfg.week_days = BTreeSet::from([1, 3, 5]);
        cfg.end_type = EndType::After;
        cfg.end_occurrences = 4;
        assert_eq!(
            enumerate_occurrences(&cfg, 50),
            vec![
                date(2025, 9, 1),
                date(2025, 9, 3),
                date(2025, 9, 5),
                date(2025, 9, 8)
            ]
        );
    }

    #[test]
    fn end_on_before_start_yields_nothing() {
        let mut cfg = config(RecurrenceType::Daily, date(2025, 6, 1));
        cfg.end_type = EndType::On;
        cfg.end_date = Some(date(2025, 5, 1));
        assert!(enumerate_occurrences(&cfg, 50).is_empty());
    }

    #[test]
    fn should_include_counts_accepted_matches() {
        let rule = EndRule::Count(2);
        let day = date(2025, 1, 1);
        assert!(rule.should_include(day, 0));
        assert!(rule.should_include(day, 1));
        assert!(!rule.should_include(day, 2));
        assert!(EndRule::Never.should_include(day, usize::MAX));
        assert!(!EndRule::Until(day).should_include(date(2025, 1, 2), 0));
    }

    // --- budget ---

    #[test]
    fn max_dates_caps_result() {
        let cfg = config(RecurrenceType::Daily, date(2025, 1, 1));
        assert_eq!(enumerate_occurrences(&cfg, 50).len(), 50);
        assert!(enumerate_occurrences(&cfg, 0).is_empty());
    }

    #[test]
    fn iteration_budget_caps_steps() {
        let cfg = config(RecurrenceType::Daily, date(2025, 1, 1));
        assert_eq!(enumerate_occurrences(&cfg, 5000).len(), MAX_ITERATIONS);
        assert_eq!(enumerate_with_budget(&cfg, 50, 10).len(), 10);
    }

    #[test_log::test]
    fn unmatchable_pattern_terminates() {
        let mut cfg = config(RecurrenceType::Weekly, date(2025, 1, 1));
        cfg.week_days.clear();
        let mut occurrences = Occurrences::new(&cfg);
        assert_eq!(occurrences.next(), None);
        assert_eq!(occurrences.steps(), MAX_ITERATIONS);
        assert_eq!(occurrences.next(), None);
    }

    #[test]
    fn out_of_range_month_day_clamps_to_month_end() {
        let mut cfg = config(RecurrenceType::Monthly, date(2025, 1, 1));
        cfg.month_day = 99;
        assert_eq!(
            enumerate_occurrences(&cfg, 2),
            vec![date(2025, 1, 31), date(2025, 2, 28)]
        );
    }

    #[test]
    fn upcoming_takes_the_first_few() {
        let cfg = config(RecurrenceType::Daily, date(2025, 1, 1));
        assert_eq!(
            upcoming(&cfg, 2),
            vec![date(2025, 1, 1), date(2025, 1, 2)]
        );
    }

    #[test]
    fn enumeration_is_repeatable() {
        let mut cfg = config(RecurrenceType::Weekly, date(2025, 9, 4));
        cfg.week_days = BTreeSet::from([0, 2, 4]);
        cfg.interval = 3;
        assert_eq!(enumerate_occurrences(&cfg, 40), enumerate_occurrences(&cfg, 40));
    }
}
