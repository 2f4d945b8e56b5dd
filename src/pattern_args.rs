//! Command-line flags that build or override a recurrence pattern.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Weekday};
use clap::Args;
use recur_core::date_util::{parse_date, parse_weekday, weekday_index};
use recur_core::pattern::parse_count_or_default;
use recur_core::settings::load_pattern;
use recur_core::{EndType, MonthWeek, RecurrenceConfig, RecurrenceType};
use tracing::{debug, warn};

#[derive(Args, Debug, Default, Clone)]
pub struct PatternArgs {
    /// Load the pattern from a TOML file; other flags override its fields
    #[arg(short, long)]
    pub pattern: Option<PathBuf>,

    /// daily, weekly, monthly or yearly
    #[arg(short = 't', long = "type")]
    pub recurrence_type: Option<String>,

    /// Repeat every N days/weeks/months/years
    #[arg(short, long)]
    pub interval: Option<String>,

    /// Weekdays for weekly patterns, e.g. "mon,wed,fri" or "1,3,5" (0=Sunday)
    #[arg(short, long, value_delimiter = ',')]
    pub weekdays: Option<Vec<String>>,

    /// Day of month for monthly patterns (1-31)
    #[arg(long, conflicts_with_all = ["month_week", "month_weekday"])]
    pub month_day: Option<String>,

    /// first, second, third, fourth or last (monthly "Nth weekday" rule)
    #[arg(long)]
    pub month_week: Option<String>,

    /// Weekday for the monthly "Nth weekday" rule, e.g. "tuesday"
    #[arg(long)]
    pub month_weekday: Option<String>,

    /// First date of the pattern (YYYY-MM-DD or e.g. "next monday")
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last date occurrences may fall on
    #[arg(long, conflicts_with_all = ["count", "never"])]
    pub until: Option<String>,

    /// Stop after this many occurrences
    #[arg(long, conflicts_with = "never")]
    pub count: Option<String>,

    /// Remove any end rule from a loaded pattern
    #[arg(long)]
    pub never: bool,
}

impl PatternArgs {
    /// Build the pattern (file or defaults, then flag overrides) and validate it.
    pub fn resolve(&self) -> Result<RecurrenceConfig> {
        let mut config = match &self.pattern {
            Some(path) => load_pattern(path)
                .with_context(|| format!("Could not load pattern from {}", path.display()))?,
            None => RecurrenceConfig::default(),
        };

        self.apply(&mut config)?;
        config.validate().context("Invalid recurrence pattern")?;

        debug!(?config, "Resolved pattern");
        Ok(config)
    }

    fn apply(&self, config: &mut RecurrenceConfig) -> Result<()> {
        if let Some(t) = &self.recurrence_type {
            config.recurrence_type = t.parse::<RecurrenceType>()?;
        }

        if let Some(interval) = &self.interval {
            config.interval = coerce_count("interval", interval);
        }

        if let Some(days) = &self.weekdays {
            config.week_days = days
                .iter()
                .filter(|d| !d.trim().is_empty())
                .map(|d| parse_weekday_arg(d))
                .collect::<Result<_>>()?;
        }

        if let Some(day) = &self.month_day {
            config.month_day = coerce_count("month day", day);
            config.use_month_day();
        }

        if self.month_week.is_some() || self.month_weekday.is_some() {
            let week = match &self.month_week {
                Some(w) => w.parse::<MonthWeek>()?,
                None => config.month_week.unwrap_or(MonthWeek::First),
            };
            let weekday = match &self.month_weekday {
                Some(d) => parse_weekday(d)?,
                None => config.month_week_day.unwrap_or(Weekday::Mon),
            };
            config.month_week = Some(week);
            config.month_week_day = Some(weekday);
        }

        if let Some(start) = &self.start {
            config.start_date = parse_user_date(start)?;
        }

        if let Some(until) = &self.until {
            config.end_type = EndType::On;
            config.end_date = Some(parse_user_date(until)?);
        }

        if let Some(count) = &self.count {
            config.end_type = EndType::After;
            config.end_occurrences = coerce_count("count", count);
        }

        if self.never {
            config.end_type = EndType::Never;
            config.end_date = None;
        }

        Ok(())
    }
}

/// Coerce numeric text to a positive count, warning when the input was unusable.
fn coerce_count(field: &str, input: &str) -> u32 {
    let value = parse_count_or_default(input);
    if input.trim().parse::<u32>().ok() != Some(value) {
        warn!(field, input, value, "Invalid number, using fallback");
    }
    value
}

/// A weekday given as a Sunday-first index ("1") or a name ("mon").
fn parse_weekday_arg(input: &str) -> Result<u8> {
    let trimmed = input.trim();
    if let Ok(index) = trimmed.parse::<u8>() {
        anyhow::ensure!(index <= 6, "Weekday index {index} is out of range (0=Sunday..6=Saturday)");
        return Ok(index);
    }
    Ok(weekday_index(parse_weekday(trimmed)?))
}

/// Expand abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| *full)
                .unwrap_or(word)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse YYYY-MM-DD, falling back to natural language ("tomorrow", "next fri").
pub fn parse_user_date(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = parse_date(input) {
        return Ok(date);
    }

    let expanded = expand_abbreviations(input);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))?;
    Ok(dt.date())
}
