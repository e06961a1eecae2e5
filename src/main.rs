//! CLI entry point for the bike-share explorer.
//!
//! Provides subcommands for printing trip statistics for one city, paging
//! through its raw trips, and the question-driven interactive session.

use anyhow::Result;
use bikeshare_stats::{
    config::SourceConfig,
    filter::{Day, Month, TripFilter},
    output::{append_record, print_pretty, render_report, to_json},
    prompt::Prompter,
    session::{browse, run_interactive},
    source::City,
    stats::summarize,
    store::load,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bike-share trip data", long_about = None)]
struct Cli {
    /// Directory holding the city CSV files [env: BIKESHARE_DATA_DIR, default: .]
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// JSON file mapping city names to CSV paths
    #[arg(long, global = true, value_name = "FILE")]
    sources: Option<PathBuf>,

    /// Defaults to the interactive session
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print trip statistics for a city, optionally filtered by month and day
    Stats {
        #[arg(short, long)]
        city: City,

        /// Only trips starting in this month (all months if omitted)
        #[arg(short, long)]
        month: Option<Month>,

        /// Only trips starting on this weekday (all days if omitted)
        #[arg(short, long)]
        day: Option<Day>,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// CSV file to append a summary row to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Page through a city's raw trips five rows at a time
    Browse {
        #[arg(short, long)]
        city: City,
    },
    /// Answer questions to choose between raw trips and statistics
    Interactive,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _file_guard = init_tracing()?;
    let cli = Cli::parse();

    let mut config = SourceConfig::from_env(cli.data_dir);
    if let Some(sources) = &cli.sources {
        config = config.with_sources_file(sources)?;
    }
    info!(data_dir = %config.data_dir().display(), "Data sources configured");

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Stats {
            city,
            month,
            day,
            json,
            output,
        } => {
            let table = load(city, &config)?;
            match summarize(&table, city, TripFilter::new(month, day)) {
                Ok(stats) => {
                    print_pretty(&stats);
                    if json {
                        println!("{}", to_json(&stats)?);
                    } else {
                        print!("{}", render_report(&stats));
                    }
                    if let Some(path) = output {
                        append_record(&path, &stats)?;
                        info!(path = %path.display(), "Summary appended");
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Statistics skipped");
                    println!("{e}");
                }
            }
        }
        Commands::Browse { city } => {
            let table = load(city, &config)?;
            browse(&mut prompter, &table)?;
        }
        Commands::Interactive => run_interactive(&mut prompter, &config)?,
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// The returned guard flushes the file writer when dropped.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("warn".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}
