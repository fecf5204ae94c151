//! Configuration module for bookstall
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section has built-in defaults, so running without a config
//! file targets the public demo catalog on a local WebDriver server.
//!
//! # Example
//!
//! ```no_run
//! use bookstall::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawl starts at: {}", config.catalog.start_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, OutputConfig, WebdriverConfig, DEFAULT_START_URL};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

// Re-export validation for callers that build a Config in code
pub use validation::validate;
