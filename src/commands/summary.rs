use anyhow::Result;
use owo_colors::OwoColorize;
use recur_core::recurrence::upcoming;
use recur_core::{describe_pattern, RecurrenceConfig};

use crate::render::render_occurrence;

pub fn run(config: &RecurrenceConfig, preview_count: usize) -> Result<()> {
    println!("{}", "Pattern Summary".bold());
    println!("  {}", describe_pattern(config));

    let dates = upcoming(config, preview_count);
    if dates.is_empty() {
        return Ok(());
    }

    println!();
    println!("{}", "Next occurrences:".bold());
    for (i, date) in dates.iter().enumerate() {
        println!("{}", render_occurrence(i + 1, *date));
    }

    Ok(())
}
