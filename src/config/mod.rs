//! Configuration module for Petscout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use petscout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("petscout.toml")).unwrap();
//! println!("Element wait: {}ms", config.scraper.element_wait_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, OutputConfig, ScraperConfig, SessionConfig, SessionKind,
    UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
