use anyhow::Result;
use owo_colors::OwoColorize;
use recur_core::settings::RecurSettings;

pub fn run(settings: &RecurSettings) -> Result<()> {
    let config_path = RecurSettings::config_path()?;

    println!("{}", "Paths".bold());
    println!("  Config:          {}", config_path.display());

    println!();
    println!("{}", "Settings".bold());
    println!("  list_limit:      {}", settings.list_limit);
    println!("  calendar_limit:  {}", settings.calendar_limit);
    println!("  preview_count:   {}", settings.preview_count);
    println!("  log_level:       {}", settings.log_level);

    Ok(())
}
