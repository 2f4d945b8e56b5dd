use anyhow::Result;
use recur_core::{describe_pattern, RecurrenceConfig};

pub fn run(config: &RecurrenceConfig) -> Result<()> {
    println!("{}", describe_pattern(config));
    Ok(())
}
