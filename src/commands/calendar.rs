use anyhow::{Context, Result};
use chrono::Local;
use recur_core::calendar::{MonthGrid, MonthView};
use recur_core::RecurrenceConfig;

use crate::render::{render_legend, Render};

pub fn run(
    config: &RecurrenceConfig,
    month: Option<&str>,
    offset: i32,
    months: u32,
    highlight_limit: usize,
) -> Result<()> {
    let anchor = match month {
        Some(m) => parse_month(m)?,
        None => MonthView::containing(config.start_date),
    };
    let today = Local::now().date_naive();

    let mut view = anchor.offset(offset);
    for i in 0..months.max(1) {
        if i > 0 {
            println!();
        }
        let grid = MonthGrid::build_with_limit(view, config, today, highlight_limit);
        println!("{}", grid.render());
        view = view.next();
    }

    println!();
    println!("{}", render_legend());

    Ok(())
}

/// Parse "YYYY-MM" into a month view.
fn parse_month(input: &str) -> Result<MonthView> {
    let (year, month) = input
        .trim()
        .split_once('-')
        .with_context(|| format!("Invalid month '{input}'. Expected YYYY-MM"))?;

    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid year in '{input}'"))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month in '{input}'"))?;

    MonthView::new(year, month).with_context(|| format!("Month must be 1-12, got {month}"))
}
