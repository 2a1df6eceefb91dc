//! Delimited-text export layouts
//!
//! Two incompatible layouts exist and both are preserved as distinct
//! operations, because downstream consumers may depend on either:
//!
//! - **Fresh comma-delimited file** (`write_csv`): header plus one row per
//!   category index, the record's URL repeated on every row.
//! - **Semicolon-delimited append block** (`append_records`): each call
//!   appends a header plus one block of rows per record, the record's URL
//!   only on the first row of its block.

use crate::crawler::{CrawlResult, CATEGORY_NAMES};
use crate::ExportError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Collects category sets into indexable columns
fn columns(result: &CrawlResult) -> Vec<Vec<&str>> {
    result
        .categories()
        .iter()
        .map(|set| set.iter().map(|value| value.as_str()).collect())
        .collect()
}

/// Renders a record in the comma-delimited layout
///
/// Row count is the longest category's length; every row carries the seed
/// URL in the first column and empty fields where a category has run out.
pub fn format_csv(result: &CrawlResult) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["url"];
    header.extend(CATEGORY_NAMES);
    writer.write_record(&header)?;

    let columns = columns(result);
    for i in 0..result.max_category_len() {
        let mut row = vec![result.seed_url.as_str()];
        for column in &columns {
            row.push(column.get(i).copied().unwrap_or(""));
        }
        writer.write_record(&row)?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// Writes a record as a fresh comma-delimited file
///
/// The content is rendered fully in memory and written in one operation, so
/// a failure never leaves a half-written file behind an existing one.
pub fn write_csv(result: &CrawlResult, destination: &Path) -> Result<(), ExportError> {
    let content = format_csv(result)?;
    std::fs::write(destination, content)?;
    Ok(())
}

/// Renders a batch of records as one semicolon-delimited block
///
/// The block starts with its own header line; within each record's rows the
/// URL column is populated only on the first row.
pub fn format_append_block(results: &[CrawlResult]) -> String {
    let mut block = String::from("url;");
    block.push_str(&CATEGORY_NAMES.join(";"));
    block.push('\n');

    for result in results {
        let columns = columns(result);
        for i in 0..result.max_category_len() {
            let mut fields = vec![if i == 0 { result.seed_url.as_str() } else { "" }];
            for column in &columns {
                fields.push(column.get(i).copied().unwrap_or(""));
            }
            block.push_str(&fields.join(";"));
            block.push('\n');
        }
    }

    block
}

/// Appends a batch of records to a semicolon-delimited file
///
/// Creates the destination when absent; never rewrites earlier blocks. The
/// block is rendered fully before the single append write.
pub fn append_records(results: &[CrawlResult], destination: &Path) -> Result<(), ExportError> {
    let block = format_append_block(results);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(destination)?;
    file.write_all(block.as_bytes())?;
    Ok(())
}
