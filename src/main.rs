//! Trace Analyzer CLI
//!
//! Inspect browser-automation trace archives from the terminal.
//! Prints reports as JSON or Markdown and extracts screencast frames.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_analyzer::commands::{
    execute_report, execute_screenshots, OutputFormat, ReportArgs, ReportKind, ScreenshotArgs,
};
use trace_analyzer::utils::config::{
    DEFAULT_DEDUP_THRESHOLD, DEFAULT_SCREENSHOT_DIR, DEFAULT_SUMMARY_ACTIONS,
};

/// Trace Analyzer - inspect trace archives without the browser viewer
#[derive(Parser, Debug)]
#[command(name = "trace-analyzer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Metadata, errors, console warnings, failed requests and recent actions
    Summary {
        /// Trace archive
        trace_file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Filter by page id
        #[arg(short, long)]
        page: Option<String>,

        /// Number of actions in the timeline (0 for all)
        #[arg(short = 'n', long, default_value_t = DEFAULT_SUMMARY_ACTIONS)]
        last: usize,
    },

    /// Every action with timing, parameters, logs and errors
    Actions {
        /// Trace archive
        trace_file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Filter by page id
        #[arg(short, long)]
        page: Option<String>,

        /// Only show failed actions
        #[arg(long)]
        errors_only: bool,
    },

    /// Console messages with source locations
    Console {
        /// Trace archive
        trace_file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Filter by page id
        #[arg(short, long)]
        page: Option<String>,

        /// Filter by message type (error, warning, log, ...)
        #[arg(long)]
        level: Option<String>,
    },

    /// Network requests with status, timing and content type
    Network {
        /// Trace archive
        trace_file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Only show failed requests
        #[arg(long)]
        failed_only: bool,

        /// Exclude URLs matching this regex
        #[arg(long)]
        ignore_pattern: Option<String>,
    },

    /// Extract screencast frames to a directory
    Screenshots {
        /// Trace archive
        trace_file: PathBuf,

        /// Output directory for screenshots
        #[arg(short, long, default_value = DEFAULT_SCREENSHOT_DIR)]
        output_dir: PathBuf,

        /// Filter by page id
        #[arg(short, long)]
        page: Option<String>,

        /// Only the frame closest to each action's completion
        #[arg(long)]
        action_only: bool,

        /// Drop frames that look like the previous kept frame
        #[arg(long)]
        dedup: bool,

        /// Fraction of differing pixels that makes a frame distinct
        #[arg(long, default_value_t = DEFAULT_DEDUP_THRESHOLD)]
        threshold: f64,

        /// Maximum number of screenshots, keeping the last ones (0 for all)
        #[arg(short = 'n', long, default_value_t = 0)]
        limit: usize,
    },

    /// Browser, platform, viewport and duration of the run
    Metadata {
        /// Trace archive
        trace_file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging; stay quiet by default so JSON on stdout is clean
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Summary {
            trace_file,
            format,
            page,
            last,
        } => report(trace_file, format, page, ReportKind::Summary { last }),

        Commands::Actions {
            trace_file,
            format,
            page,
            errors_only,
        } => report(trace_file, format, page, ReportKind::Actions { errors_only }),

        Commands::Console {
            trace_file,
            format,
            page,
            level,
        } => report(trace_file, format, page, ReportKind::Console { level }),

        Commands::Network {
            trace_file,
            format,
            failed_only,
            ignore_pattern,
        } => report(
            trace_file,
            format,
            None,
            ReportKind::Network {
                failed_only,
                ignore_pattern,
            },
        ),

        Commands::Metadata { trace_file, format } => {
            report(trace_file, format, None, ReportKind::Metadata)
        }

        Commands::Screenshots {
            trace_file,
            output_dir,
            page,
            action_only,
            dedup,
            threshold,
            limit,
        } => {
            let args = ScreenshotArgs {
                trace_file,
                output_dir,
                page,
                action_only,
                dedup,
                threshold,
                limit,
            };

            let written = execute_screenshots(&args)?;
            println!(
                "Extracted {} screenshots to {}",
                written,
                args.output_dir.display()
            );
            Ok(())
        }
    }
}

/// Run a report command and print its output
///
/// **Private** - internal command dispatch
fn report(
    trace_file: PathBuf,
    format: OutputFormat,
    page: Option<String>,
    kind: ReportKind,
) -> Result<()> {
    let args = ReportArgs {
        trace_file,
        format,
        page,
        kind,
    };

    println!("{}", execute_report(&args)?);
    Ok(())
}
