//! tcu-convert - CLI tool to convert TCU log files to CSV.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tcu_convert_rs::{convert_file, ConvertOptions};

/// Convert TCU equipment log files to CSV.
#[derive(Parser, Debug)]
#[command(name = "tcu-convert")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input TCU file path
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV file path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Include comment rows (time slice, trigger, delay)
    #[arg(short, long)]
    comments: bool,

    /// Write Date records as comment rows instead of dropping them
    #[arg(long)]
    date_comments: bool,

    /// Print the conversion summary as JSON on stderr
    #[arg(long)]
    summary: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout may carry the CSV
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if args.date_comments && !args.comments {
        warn!("--date-comments has no effect without --comments");
    }

    info!("Processing: {}", args.input.display());

    let options = ConvertOptions::new(args.comments).with_date_comments(args.date_comments);
    let summary = match convert_file(&args.input, args.output.as_deref(), &options) {
        Err(err) if err.is_startup() => {
            error!("{}", err);
            eprintln!("{}", Args::command().render_usage());
            std::process::exit(1);
        }
        result => {
            result.with_context(|| format!("Failed to convert {}", args.input.display()))?
        }
    };

    if let Some(path) = &args.output {
        info!("Generated: {}", path.display());
    }

    if summary.lossy_lines > 0 {
        warn!("{} line(s) had invalid UTF-8 replaced", summary.lossy_lines);
    }

    if summary.read_errors > 0 || summary.malformed_lines > 0 {
        warn!(
            "{} unreadable and {} malformed line(s) were skipped",
            summary.read_errors, summary.malformed_lines
        );
    }

    if args.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        eprintln!("{}", json);
    }

    Ok(())
}
