//! Configuration module for leadsift
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use leadsift::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("leadsift.toml")).unwrap();
//! println!("Depth requests are capped at: {}", config.crawler.max_depth_limit);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, ExportConfig, ServerConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
