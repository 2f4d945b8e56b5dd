//! Month grid model for previewing a pattern.
//!
//! The viewed month is an immutable `MonthView`; navigating produces a new one.
//! `MonthGrid` lays the month out as six Sunday-first weeks and marks the start
//! date and the dates the pattern produces.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};

use crate::constants::{DEFAULT_CALENDAR_LIMIT, GRID_CELLS};
use crate::date_util::{add_months, month_name};
use crate::pattern::RecurrenceConfig;
use crate::recurrence::enumerate_occurrences;

/// A (year, month) being viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
}

impl MonthView {
    /// None for a month outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(MonthView { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        MonthView {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn offset(self, months: i32) -> Self {
        let (year, month) = add_months(self.year, self.month, months);
        MonthView { year, month }
    }

    pub fn prev(self) -> Self {
        self.offset(-1)
    }

    pub fn next(self) -> Self {
        self.offset(1)
    }

    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// e.g. "September 2025"
    pub fn title(self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayMark {
    Plain,
    /// The pattern's start date. Wins over `Recurring`.
    Start,
    Recurring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    pub mark: DayMark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub view: MonthView,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Lay out `view`, highlighting dates from the first `DEFAULT_CALENDAR_LIMIT` occurrences.
    pub fn build(view: MonthView, config: &RecurrenceConfig, today: NaiveDate) -> Self {
        Self::build_with_limit(view, config, today, DEFAULT_CALENDAR_LIMIT)
    }

    pub fn build_with_limit(
        view: MonthView,
        config: &RecurrenceConfig,
        today: NaiveDate,
        limit: usize,
    ) -> Self {
        let recurring: HashSet<NaiveDate> =
            enumerate_occurrences(config, limit).into_iter().collect();

        let cells = grid_dates(view)
            .into_iter()
            .map(|date| {
                let mark = if date == config.start_date {
                    DayMark::Start
                } else if recurring.contains(&date) {
                    DayMark::Recurring
                } else {
                    DayMark::Plain
                };
                DayCell {
                    date,
                    in_month: date.year() == view.year && date.month() == view.month,
                    is_today: date == today,
                    mark,
                }
            })
            .collect();

        MonthGrid { view, cells }
    }

    /// Cells grouped into Sunday-first weeks.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }
}

/// The 42 dates shown for a month, starting on the Sunday on or before the 1st.
///
/// Shorter at the edges of chrono's representable range.
fn grid_dates(view: MonthView) -> Vec<NaiveDate> {
    let Some(first) = view.first_day() else {
        return Vec::new();
    };
    let lead = first.weekday().num_days_from_sunday() as u64;
    let Some(grid_start) = first.checked_sub_days(Days::new(lead)) else {
        return Vec::new();
    };

    std::iter::successors(Some(grid_start), |d| d.succ_opt())
        .take(GRID_CELLS)
        .collect()
}
