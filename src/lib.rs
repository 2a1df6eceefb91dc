//! Leadsift: a bounded-depth contact crawler
//!
//! This crate implements a web crawler that walks a site from a seed URL up to
//! a bounded depth and collects contact information (emails, phone numbers,
//! social-profile links) into one deduplicated record per crawl. Records can
//! be exported as delimited text, directly or through an upload store, and the
//! whole surface is exposed over HTTP.

pub mod config;
pub mod crawler;
pub mod export;
pub mod server;
pub mod url;

use thiserror::Error;

/// Main error type for leadsift operations
#[derive(Debug, Error)]
pub enum LeadsiftError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL {url}: {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Failed to fetch seed URL {url}: {reason}")]
    SeedFetch { url: String, reason: String },

    #[error("Requested depth {requested} exceeds the configured limit {limit}")]
    DepthLimit { requested: u32, limit: u32 },

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Export-specific errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to format rows: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid export file id: {0}")]
    InvalidFileId(String),

    #[error("No export file with id {0}")]
    FileNotFound(String),
}

/// Result type alias for leadsift operations
pub type Result<T> = std::result::Result<T, LeadsiftError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for export operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{CrawlResult, Crawler, PageContacts, PageState};
pub use crate::export::ExportStore;
pub use crate::url::resolve_link;
