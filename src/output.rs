//! Output formatting and persistence for warrant results.
//!
//! Supports logging the summary table, JSON serialization, and CSV export.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

use crate::series::TrafficSeries;
use crate::summary::WarrantSummary;
use csv::WriterBuilder;

/// Logs the summary table, one line per warrant, then the headline.
pub fn print_summary(summary: &WarrantSummary) {
    for row in &summary.rows {
        info!(
            warrant = %row.warrant,
            status = %row.status,
            data = %row.data,
            threshold = %row.threshold,
            "{}",
            row.notes
        );
    }
    info!(met_count = summary.met_count, "{}", summary.headline);
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes `value` as pretty-printed JSON to `path`, replacing any existing file.
pub fn write_json(path: impl AsRef<Path>, value: &impl Serialize) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    debug!(path = %path.display(), "Wrote JSON");
    Ok(())
}

/// Writes serializable records as CSV rows with a header line.
pub fn write_records<T: Serialize>(
    path: impl AsRef<Path>,
    records: impl IntoIterator<Item = T>,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);
    let mut count = 0usize;
    for record in records {
        writer.serialize(record)?;
        count += 1;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = count, "Wrote CSV");
    Ok(())
}

/// Writes the summary table as CSV.
pub fn write_summary_csv(path: impl AsRef<Path>, summary: &WarrantSummary) -> Result<()> {
    write_records(path, &summary.rows)
}

/// Writes the hourly counts back out in the canonical column layout.
pub fn write_counts_csv(path: impl AsRef<Path>, series: &TrafficSeries) -> Result<()> {
    write_records(path, series.rows())
}
