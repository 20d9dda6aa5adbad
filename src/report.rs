use crate::types::PortResult;
use ::time::{format_description::well_known, OffsetDateTime};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

const RULE: &str = "----------------------------------------------------------------";

/// Printable form of a banner: bytes outside ASCII 32..=126 are dropped,
/// and nothing left renders as `Unknown`.
pub fn sanitize_banner(banner: &[u8]) -> String {
    let clean: String = banner
        .iter()
        .filter(|b| (32..=126).contains(*b))
        .map(|&b| b as char)
        .collect();
    if clean.is_empty() {
        "Unknown".to_string()
    } else {
        clean
    }
}

/// Fixed-width `HOST PORT STATE SERVICE/VERSION` table.
pub fn render_table(results: &[PortResult]) -> String {
    render_table_with(results, true)
}

/// Like [`render_table`], leaving the host column out when `show_host` is false.
pub fn render_table_with(results: &[PortResult], show_host: bool) -> String {
    let mut out = format!("{RULE}\n");
    if show_host {
        out.push_str(&format!(
            "{:<15} {:<10} {:<10} {}\n",
            "HOST", "PORT", "STATE", "SERVICE/VERSION"
        ));
    } else {
        out.push_str(&format!("{:<10} {:<10} {}\n", "PORT", "STATE", "SERVICE/VERSION"));
    }
    out.push_str(&format!("{RULE}\n"));

    for r in results {
        let state = r.state().to_string();
        let banner = sanitize_banner(r.banner());
        let row = if show_host {
            format!("{:<15} {:<10} {:<10} {}\n", r.host(), r.port(), state, banner)
        } else {
            format!("{:<10} {:<10} {}\n", r.port(), state, banner)
        };
        out.push_str(&row);
    }
    out
}

/// Full console summary: start time, duration, open count, and the table if
/// anything was found.
pub fn render_report(
    results: &[PortResult],
    started_at: &str,
    elapsed: Duration,
    show_host: bool,
) -> String {
    let mut out = String::from("\n--- Scan Results ---\n");
    out.push_str(&format!("Started at: {started_at}\n"));
    out.push_str(&format!("Time taken: {elapsed:.2?}\n"));
    out.push_str(&format!("Total Open Ports Found: {}\n", results.len()));
    if results.is_empty() {
        out.push_str("No open ports found.\n");
    } else {
        out.push_str(&render_table_with(results, show_host));
    }
    out
}

/// Write results as an indented JSON array. Banners are written raw.
pub fn write_results_json(path: &Path, results: &[PortResult]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results).context("failed to encode results")?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// RFC 3339 UTC timestamp for the report header.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}
