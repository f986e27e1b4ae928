//! CSV output generation.
//!
//! This module serializes the aggregated article table to a UTF-8 CSV file
//! named after the run date, e.g. `stocktitan_2025-05-06.csv`. The `csv`
//! crate handles quoting and escaping of embedded commas, quotes, and
//! newlines.
//!
//! The header row is written unconditionally, so a run that fetched nothing
//! still produces a file with the full schema.

use crate::models::ArticleRecord;
use chrono::NaiveDate;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize the table to CSV bytes: header row first, then one row per
/// record in the order given.
pub fn table_to_csv(records: &[ArticleRecord]) -> Result<Vec<u8>, Box<dyn Error>> {
    // Header written explicitly so an empty table still carries the schema
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(ArticleRecord::COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}

/// Write the run's CSV file to `output_dir`, named by `run_date`.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails; the caller
/// treats this as fatal to the run.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir, %run_date))]
pub async fn write_table(
    records: &[ArticleRecord],
    output_dir: &str,
    run_date: NaiveDate,
) -> Result<String, Box<dyn Error>> {
    let path = format!(
        "{}/stocktitan_{}.csv",
        output_dir.trim_end_matches('/'),
        run_date
    );
    let bytes = table_to_csv(records)?;

    info!(path = %path, rows = records.len(), "Writing CSV");
    fs::write(&path, bytes).await?;
    info!(path = %path, "Wrote CSV output file");

    Ok(path)
}
