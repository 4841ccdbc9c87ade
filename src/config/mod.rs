//! Configuration module for the harvester
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key has a default, so an empty file (or none at all) yields a
//! configuration for the Dapodik news listing.
//!
//! # Example
//!
//! ```no_run
//! use berita_harvester::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvester.toml")).unwrap();
//! println!("Harvesting up to page {}", config.harvest.last_page);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, HarvestConfig, SelectorConfig, SourceConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::{validate, MAX_CONCURRENT_LIMIT};
