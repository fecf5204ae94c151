//! Bookstall: a WebDriver-driven catalog scraper
//!
//! This crate crawls a paginated book catalog through a real browser session,
//! visits every item's detail page, extracts a fixed schema of fields per
//! item, and accumulates the results into an ordered dataset for export.

pub mod config;
pub mod crawler;
pub mod dataset;
pub mod output;
pub mod session;
pub mod testing;

use thiserror::Error;

/// Main error type for bookstall operations
#[derive(Debug, Error)]
pub enum BookstallError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Session error: {0}")]
    Session(#[from] session::SessionError),

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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for bookstall operations
pub type Result<T> = std::result::Result<T, BookstallError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::crawl;
pub use dataset::{BookRecord, Dataset, ResultSet};
pub use session::{NavigationSession, SessionError, Target, WebDriverSession};
