use std::path::PathBuf;

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use dialoguer::{Input, MultiSelect, Select};
use owo_colors::OwoColorize;
use recur_core::date_util::{WEEKDAY_NAMES, format_locale_date, weekday_from_index};
use recur_core::pattern::parse_count_or_default;
use recur_core::recurrence::upcoming;
use recur_core::settings::save_pattern;
use recur_core::{describe_pattern, EndType, MonthWeek, RecurrenceConfig, RecurrenceType};

use crate::pattern_args::parse_user_date;
use crate::render::render_occurrence;

const DEFAULT_OUTPUT: &str = "pattern.toml";

pub fn run(output: Option<PathBuf>) -> Result<()> {
    let mut config = RecurrenceConfig {
        start_date: Local::now().date_naive(),
        ..Default::default()
    };

    // --- Type ---
    let types: Vec<&str> = RecurrenceType::ALL.iter().map(|t| t.as_str()).collect();
    let selection = Select::new()
        .with_prompt("  Repeat")
        .items(&types)
        .default(1)
        .interact()?;
    config.recurrence_type = RecurrenceType::ALL[selection];

    // --- Interval ---
    let unit = config_unit_plural(&config);
    config.interval = prompt_count(&format!("  Every how many {unit}?"), 1)?;

    // --- Type-specific options ---
    match config.recurrence_type {
        RecurrenceType::Weekly => prompt_week_days(&mut config)?,
        RecurrenceType::Monthly => prompt_monthly_rule(&mut config)?,
        RecurrenceType::Daily | RecurrenceType::Yearly => {}
    }

    // --- Start ---
    let default_start = config.start_date.format("%Y-%m-%d").to_string();
    config.start_date = prompt_date("  Starting", Some(default_start))?;

    // --- End ---
    let ends = ["never", "on a date", "after a number of occurrences"];
    let selection = Select::new()
        .with_prompt("  Ends")
        .items(&ends)
        .default(0)
        .interact()?;
    config.end_type = EndType::ALL[selection];
    match config.end_type {
        EndType::Never => {}
        EndType::On => config.end_date = Some(prompt_date("  Last date", None)?),
        EndType::After => {
            config.end_occurrences = prompt_count("  How many occurrences?", config.end_occurrences)?;
        }
    }

    config.validate()?;

    // --- Output ---
    let output = match output {
        Some(path) => path,
        None => PathBuf::from(
            Input::<String>::new()
                .with_prompt("  Save to")
                .default(DEFAULT_OUTPUT.to_string())
                .interact_text()?,
        ),
    };

    save_pattern(&output, &config)?;

    println!();
    println!("{}", describe_pattern(&config).bold());
    for (i, date) in upcoming(&config, 3).iter().enumerate() {
        println!("{}", render_occurrence(i + 1, *date));
    }
    println!("{}", format!("  Saved: {}", output.display()).green());

    Ok(())
}

/// Plural unit for the interval prompt, e.g. "weeks".
fn config_unit_plural(config: &RecurrenceConfig) -> &'static str {
    RecurrenceConfig {
        interval: 2,
        ..config.clone()
    }
    .interval_unit()
}

/// Prompt for a positive number; unusable input falls back to 1.
fn prompt_count(prompt: &str, default: u32) -> Result<u32> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    Ok(parse_count_or_default(&input))
}

/// Prompt for a date with retry on parse errors.
fn prompt_date(prompt: &str, default: Option<String>) -> Result<NaiveDate> {
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(d) = &default {
            input = input.default(d.clone());
        }
        let text = input.interact_text()?;
        match parse_user_date(&text) {
            Ok(date) => {
                println!("  {}", format_locale_date(date).dimmed());
                return Ok(date);
            }
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

/// Pick weekdays; an empty selection is refused like the weekday toggles.
fn prompt_week_days(config: &mut RecurrenceConfig) -> Result<()> {
    let checked: Vec<bool> = (0..7u8)
        .map(|i| weekday_from_index(i).is_some_and(|d| config.has_week_day(d)))
        .collect();

    loop {
        let picked = MultiSelect::new()
            .with_prompt("  On which days? (space to toggle)")
            .items(&WEEKDAY_NAMES)
            .defaults(&checked)
            .interact()?;

        if picked.is_empty() {
            eprintln!("  {}", "Pick at least one day".red());
            continue;
        }

        config.week_days = picked.into_iter().map(|i| i as u8).collect();
        return Ok(());
    }
}

fn prompt_monthly_rule(config: &mut RecurrenceConfig) -> Result<()> {
    let modes = ["on a day of the month", "on the Nth weekday"];
    let mode = Select::new()
        .with_prompt("  Monthly")
        .items(&modes)
        .default(0)
        .interact()?;

    if mode == 0 {
        config.use_month_day();
        let day = prompt_count("  Day of month (1-31)", config.start_date.day())?;
        config.month_day = day.min(31);
        return Ok(());
    }

    config.use_nth_weekday();
    let weeks: Vec<&str> = MonthWeek::ALL.iter().map(|w| w.as_str()).collect();
    let week = Select::new()
        .with_prompt("  Which")
        .items(&weeks)
        .default(0)
        .interact()?;
    let day = Select::new()
        .with_prompt("  Weekday")
        .items(&WEEKDAY_NAMES)
        .default(1)
        .interact()?;

    config.month_week = Some(MonthWeek::ALL[week]);
    config.month_week_day = weekday_from_index(day as u8);
    Ok(())
}
