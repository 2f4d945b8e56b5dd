mod commands;
mod pattern_args;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use recur_core::settings::RecurSettings;
use tracing_subscriber::EnvFilter;

use pattern_args::PatternArgs;

#[derive(Parser)]
#[command(name = "recur")]
#[command(about = "Build recurring date patterns and preview the dates they produce")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the dates a pattern produces
    Dates {
        #[command(flatten)]
        pattern: PatternArgs,

        /// Maximum number of dates (defaults to list_limit from config)
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print plain YYYY-MM-DD dates, one per line
        #[arg(long)]
        iso: bool,
    },
    /// Print the pattern as a sentence
    Describe {
        #[command(flatten)]
        pattern: PatternArgs,
    },
    /// Print the pattern sentence and the next few occurrences
    Summary {
        #[command(flatten)]
        pattern: PatternArgs,
    },
    /// Show a month calendar with the start date and occurrences highlighted
    Calendar {
        #[command(flatten)]
        pattern: PatternArgs,

        /// Month to show (YYYY-MM), defaults to the start date's month
        #[arg(short, long)]
        month: Option<String>,

        /// Months to move forward (or back, if negative) from that month
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,

        /// Number of consecutive months to show
        #[arg(long, default_value_t = 1)]
        months: u32,
    },
    /// Build a pattern interactively and save it as TOML
    New {
        /// Where to save the pattern
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show config paths and settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = RecurSettings::load()?;

    init_tracing(cli.verbose, &settings.log_level);

    match cli.command {
        Commands::Dates {
            pattern,
            limit,
            iso,
        } => {
            let config = pattern.resolve()?;
            commands::dates::run(&config, limit.unwrap_or(settings.list_limit), iso)
        }
        Commands::Describe { pattern } => {
            let config = pattern.resolve()?;
            commands::describe::run(&config)
        }
        Commands::Summary { pattern } => {
            let config = pattern.resolve()?;
            commands::summary::run(&config, settings.preview_count)
        }
        Commands::Calendar {
            pattern,
            month,
            offset,
            months,
        } => {
            let config = pattern.resolve()?;
            commands::calendar::run(
                &config,
                month.as_deref(),
                offset,
                months,
                settings.calendar_limit,
            )
        }
        Commands::New { output } => commands::new::run(output),
        Commands::Config => commands::config::run(&settings),
    }
}

/// Log to stderr. `-v` wins over `RUST_LOG`, which wins over the configured level.
fn init_tracing(verbose: u8, configured: &str) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(configured))
            .unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
