//! Petscout: an adoption-site crawler and animal-record extractor
//!
//! Given the root URL of a pet-adoption website, this crate walks the site's
//! internal pages breadth-first, finds embedded third-party listing widgets,
//! classifies which listing provider a page uses, and extracts structured
//! animal records from the widget pages.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod provider;
pub mod session;
pub mod state;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod url;

use thiserror::Error;

/// Main error type for Petscout operations
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rendering session error: {0}")]
    Session(#[from] SessionError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Content unavailable for {url}: {reason}")]
    ContentUnavailable { url: String, reason: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

/// Errors raised by a rendering session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to create session: {0}")]
    Create(String),

    #[error("Navigation to {url} failed: {message}")]
    Navigate { url: String, message: String },

    #[error("Session command failed: {0}")]
    Protocol(String),

    #[error("No page has been loaded into the session")]
    NoDocument,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Petscout operations
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{scrape_site, scrape_site_with, SiteScraper};
pub use extract::{ExtractedRecord, Extraction, Field};
pub use output::ScrapeReport;
pub use provider::ProviderKind;
pub use session::RenderSession;
pub use state::CrawlPhase;
