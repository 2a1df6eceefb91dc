//! Upload store for exported files
//!
//! Owns the uploads directory and the opaque identifiers handed back to
//! callers. Identifiers are freshly minted UUIDs and are validated before
//! any path is built from them, so an identifier can never escape the
//! uploads directory.

use crate::crawler::CrawlResult;
use crate::export::format;
use crate::ExportError;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File store for exported delimited files, addressed by opaque ids
#[derive(Debug, Clone)]
pub struct ExportStore {
    uploads_dir: PathBuf,
}

impl ExportStore {
    /// Opens the store, creating the uploads directory if needed
    pub fn new(uploads_dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let uploads_dir = uploads_dir.into();
        std::fs::create_dir_all(&uploads_dir)?;
        Ok(Self { uploads_dir })
    }

    /// Mints a fresh opaque file identifier
    pub fn mint_file_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// The on-disk file name for an id
    pub fn file_name(file_id: &str) -> String {
        format!("data-{}-collected.csv", file_id)
    }

    /// Resolves an id to its path, rejecting anything that is not a UUID
    fn path_for(&self, file_id: &str) -> Result<PathBuf, ExportError> {
        Uuid::parse_str(file_id)
            .map_err(|_| ExportError::InvalidFileId(file_id.to_string()))?;
        Ok(self.uploads_dir.join(Self::file_name(file_id)))
    }

    /// Writes one record as a fresh comma-delimited file; returns its id
    pub fn create_csv(&self, result: &CrawlResult) -> Result<String, ExportError> {
        let file_id = Self::mint_file_id();
        let path = self.path_for(&file_id)?;
        format::write_csv(result, &path)?;
        tracing::info!("Wrote export {} ({} rows)", file_id, result.max_category_len());
        Ok(file_id)
    }

    /// Appends a batch of records as a semicolon-delimited block
    ///
    /// Appends to the file identified by `existing` when given, otherwise
    /// mints a fresh id. Returns the id the block landed in.
    pub fn append_records(
        &self,
        results: &[CrawlResult],
        existing: Option<&str>,
    ) -> Result<String, ExportError> {
        let file_id = match existing {
            Some(id) => id.to_string(),
            None => Self::mint_file_id(),
        };
        let path = self.path_for(&file_id)?;
        format::append_records(results, &path)?;
        tracing::info!("Appended {} record(s) to export {}", results.len(), file_id);
        Ok(file_id)
    }

    /// Reads a stored export file for download
    pub fn read(&self, file_id: &str) -> Result<Vec<u8>, ExportError> {
        let path = self.path_for(file_id)?;
        match std::fs::read(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ExportError::FileNotFound(file_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The directory this store writes into
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }
}
