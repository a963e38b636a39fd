mod commands;
mod render;

use anyhow::Result;
use calgrid_core::config::CalgridConfig;
use calgrid_core::{DayKey, YearMonth};
use clap::{Parser, Subcommand};
use flexi_logger::{Logger, LoggerHandle};

/// Log spec used when CALGRID_LOG is not set.
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Browse a monthly calendar and schedule events on its days")]
struct Cli {
    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the month grid (the default command)
    Month {
        /// Month to show (YYYY-MM), defaults to the current month
        month: Option<String>,

        /// Move this many months forward (or back, if negative)
        #[arg(short, long, allow_hyphen_values = true, default_value_t = 0)]
        offset: i32,

        /// Only highlight days with events matching this keyword
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// List the events of one day
    Day {
        /// Day (YYYY-MM-DD)
        day: String,

        /// Only show events matching this keyword
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Add an event to a day. Missing values are prompted for.
    Add {
        /// Day (YYYY-MM-DD)
        day: String,

        /// Event name
        name: Option<String>,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: Option<String>,

        /// End time (HH:MM)
        #[arg(short, long)]
        end: Option<String>,
    },
    /// List events grouped by day
    Events {
        /// Only show events matching this keyword
        #[arg(short, long)]
        filter: Option<String>,

        /// Only show events in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show config and data file locations
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _logger = init_logging(cli.verbose)?;

    let config = CalgridConfig::load()?;

    let command = cli.command.unwrap_or(Commands::Month {
        month: None,
        offset: 0,
        filter: None,
    });

    match command {
        Commands::Month {
            month,
            offset,
            filter,
        } => {
            let month = resolve_month(month.as_deref())?.shift(offset)?;
            let store = config.open_store();
            commands::month::run(&store, month, filter.as_deref())
        }
        Commands::Day { day, filter } => {
            let day = DayKey::parse(&day)?;
            let store = config.open_store();
            commands::day::run(&store, day, filter.as_deref())
        }
        Commands::Add {
            day,
            name,
            start,
            end,
        } => {
            let day = DayKey::parse(&day)?;
            let mut store = config.open_store();
            commands::add::run(&mut store, day, name, start, end)
        }
        Commands::Events { filter, month } => {
            let month = month.as_deref().map(YearMonth::parse).transpose()?;
            let store = config.open_store();
            commands::events::run(&store, filter.as_deref(), month)
        }
        Commands::Config => commands::config::run(&config),
    }
}

/// Start stderr logging. `CALGRID_LOG` takes a flexi_logger spec such as
/// `debug` or `calgrid_core=trace`.
fn init_logging(verbose: bool) -> Result<LoggerHandle> {
    let spec = match std::env::var("CALGRID_LOG") {
        Ok(spec) if !spec.is_empty() => spec,
        _ if verbose => "debug".to_string(),
        _ => DEFAULT_LOG_LEVEL.to_string(),
    };

    let handle = Logger::try_with_str(&spec)?
        .format(flexi_logger::default_format)
        .start()?;

    log::debug!("event=cli_start version={} log_spec={}", env!("CARGO_PKG_VERSION"), spec);
    Ok(handle)
}

fn resolve_month(month: Option<&str>) -> Result<YearMonth> {
    match month {
        Some(s) => Ok(YearMonth::parse(s)?),
        None => Ok(YearMonth::current()),
    }
}
