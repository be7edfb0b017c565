//! Report commands: summary, actions, console, network, metadata.
//!
//! Each command:
//! 1. Validates its arguments
//! 2. Parses the trace archive
//! 3. Applies the requested filters
//! 4. Renders JSON or Markdown

use super::models::{OutputFormat, ReportArgs, ReportKind};
use crate::filters::{
    actions_for_page, console_for_page, console_with_level, errors_for_page, exclude_urls,
    failed_actions, failed_requests,
};
use crate::output::{json, markdown};
use crate::parser::schema::{Action, ConsoleMessage, NetworkRequest, TraceResult};
use crate::parser::parse_trace_file;
use anyhow::{Context, Result};
use log::{debug, info};
use regex::Regex;
use std::time::Instant;

/// Execute a report command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The rendered report, ready to print
///
/// # Errors
/// * Invalid arguments
/// * Unreadable or malformed trace archive
pub fn execute_report(args: &ReportArgs) -> Result<String> {
    let start_time = Instant::now();
    validate_report_args(args)?;

    info!("Parsing trace: {}", args.trace_file.display());
    let (_, trace) = parse_trace_file(&args.trace_file)
        .with_context(|| format!("Failed to parse trace {}", args.trace_file.display()))?;

    debug!(
        "Parsed {} actions, {} console messages, {} requests, {} errors, {} frames",
        trace.actions.len(),
        trace.console_messages.len(),
        trace.network_requests.len(),
        trace.errors.len(),
        trace.screenshots.len()
    );

    let output = render_report(&trace, args)?;

    info!("Report rendered in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok(output)
}

/// Filter and render an already-parsed trace
///
/// **Public** - lets callers render without touching the filesystem
pub fn render_report(trace: &TraceResult, args: &ReportArgs) -> Result<String> {
    let page = args.page.as_deref();

    let output = match &args.kind {
        ReportKind::Summary { last } => {
            let scoped = scope_to_page(trace, page);
            match args.format {
                OutputFormat::Json => json::summary_to_json(&scoped, *last)?,
                OutputFormat::Markdown => markdown::summary_to_markdown(&scoped, *last),
            }
        }

        ReportKind::Actions { errors_only } => {
            let mut actions: Vec<&Action> = match page {
                Some(page) => actions_for_page(&trace.actions, page),
                None => trace.actions.iter().collect(),
            };
            if *errors_only {
                actions = failed_actions(&actions);
            }

            match args.format {
                OutputFormat::Json => json::to_json(&actions)?,
                OutputFormat::Markdown => markdown::format_actions(&actions),
            }
        }

        ReportKind::Console { level } => {
            let mut messages: Vec<&ConsoleMessage> = match page {
                Some(page) => console_for_page(&trace.console_messages, page),
                None => trace.console_messages.iter().collect(),
            };
            if let Some(level) = level {
                messages = console_with_level(&messages, level);
            }

            match args.format {
                OutputFormat::Json => json::to_json(&messages)?,
                OutputFormat::Markdown => markdown::format_console(&messages),
            }
        }

        ReportKind::Network {
            failed_only,
            ignore_pattern,
        } => {
            let mut requests: Vec<&NetworkRequest> = trace.network_requests.iter().collect();
            if *failed_only {
                requests = failed_requests(&requests);
            }
            if let Some(pattern) = ignore_pattern {
                let pattern = compile_pattern(pattern)?;
                requests = exclude_urls(&requests, &pattern);
            }

            match args.format {
                OutputFormat::Json => json::to_json(&requests)?,
                OutputFormat::Markdown => markdown::format_network(&requests),
            }
        }

        ReportKind::Metadata => match args.format {
            OutputFormat::Json => json::to_json(&trace.metadata)?,
            OutputFormat::Markdown => markdown::format_metadata(&trace.metadata),
        },
    };

    Ok(output)
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
pub fn validate_report_args(args: &ReportArgs) -> Result<()> {
    if !args.trace_file.is_file() {
        anyhow::bail!("Trace file not found: {}", args.trace_file.display());
    }

    if let Some(page) = &args.page {
        if page.is_empty() {
            anyhow::bail!("Page id cannot be empty");
        }
    }

    if let ReportKind::Network {
        ignore_pattern: Some(pattern),
        ..
    } = &args.kind
    {
        compile_pattern(pattern)?;
    }

    Ok(())
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).with_context(|| format!("Invalid ignore pattern: {}", pattern))
}

/// Restrict actions, console messages and errors to one page
///
/// **Private** - internal helper for the summary view
fn scope_to_page(trace: &TraceResult, page: Option<&str>) -> TraceResult {
    let Some(page) = page else {
        return trace.clone();
    };

    TraceResult {
        metadata: trace.metadata.clone(),
        actions: actions_for_page(&trace.actions, page).into_iter().cloned().collect(),
        console_messages: console_for_page(&trace.console_messages, page)
            .into_iter()
            .cloned()
            .collect(),
        network_requests: trace.network_requests.clone(),
        errors: errors_for_page(&trace.errors, page).into_iter().cloned().collect(),
        screenshots: trace.screenshots.clone(),
    }
}
