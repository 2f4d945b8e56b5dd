use anyhow::Result;
use owo_colors::OwoColorize;
use recur_core::{describe_pattern, enumerate_occurrences, RecurrenceConfig};

use crate::render::render_occurrence;

pub fn run(config: &RecurrenceConfig, limit: usize, iso: bool) -> Result<()> {
    let dates = enumerate_occurrences(config, limit);

    if iso {
        for date in &dates {
            println!("{}", date.format("%Y-%m-%d"));
        }
        return Ok(());
    }

    println!("{}", describe_pattern(config).bold());

    if dates.is_empty() {
        println!("{}", "No occurrences".dimmed());
        return Ok(());
    }

    for (i, date) in dates.iter().enumerate() {
        println!("{}", render_occurrence(i + 1, *date));
    }

    if dates.len() == limit {
        println!("{}", format!("  (showing first {limit})").dimmed());
    }

    Ok(())
}
