//! CLI output formatting utilities.

use crate::store::{ContentRecord, SessionRecord};
use chrono::{Local, TimeZone};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a one-line session entry for the history listing.
    pub fn session_info(session: &SessionRecord, content_count: u32) {
        println!(
            "  {} {} ({}, {}, {} item(s), {})",
            style("*").cyan(),
            style(&session.title).bold(),
            style(format!("#{}", session.id)).dim(),
            session.duration,
            content_count,
            format_timestamp(session.timestamp),
        );
    }

    /// Print a content feed entry.
    pub fn content_item(record: &ContentRecord) {
        println!(
            "\n{} {} {} ({})",
            style(">>").green(),
            style(record.platform.tag()).bold(),
            style(format!("#{}", record.id)).dim(),
            format_timestamp(record.timestamp),
        );
        for line in record.content.lines() {
            println!("   {}", line);
        }
        if let Some(media) = &record.media_url {
            println!("   {}", style(media).dim());
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Format an epoch-milliseconds timestamp as local date and time.
fn format_timestamp(millis: i64) -> String {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown time".to_string())
}
