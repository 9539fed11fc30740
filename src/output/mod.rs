//! Output module for scrape results
//!
//! This module handles:
//! - The `{"data": [...]}` report handed back to callers
//! - Writing the report to a file or stdout
//! - Run statistics

pub mod stats;

pub use stats::{print_statistics, write_statistics, RunStats};

use crate::extract::ExtractedRecord;
use crate::ScraperError;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Result of one scrape run
///
/// Serializes to `{"data": [...]}`; the statistics stay out of the JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// Extracted records in extraction order
    pub data: Vec<ExtractedRecord>,

    #[serde(skip)]
    pub stats: RunStats,
}

impl ScrapeReport {
    pub fn new(data: Vec<ExtractedRecord>, stats: RunStats) -> Self {
        Self { data, stats }
    }

    /// Pretty-printed JSON form of the report
    pub fn to_json(&self) -> Result<String, ScraperError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes the report as JSON to `path`, or to stdout when no path is given
pub fn write_report(report: &ScrapeReport, path: Option<&Path>) -> Result<(), ScraperError> {
    let json = report.to_json()?;

    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, format!("{}\n", json))?;
            tracing::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", json)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Field;
    use tempfile::TempDir;

    fn report() -> ScrapeReport {
        let mut record = ExtractedRecord::default();
        record.insert(Field::Name, "Buddy");
        record.insert(Field::Type, "Dog");
        record.insert(Field::Gender, "Male");
        ScrapeReport::new(vec![record], RunStats::start())
    }

    #[test]
    fn test_report_json_shape() {
        let value: serde_json::Value = serde_json::from_str(&report().to_json().unwrap()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "data": [{"Name": "Buddy", "Type": "Dog", "Gender": "Male"}]
            })
        );
    }

    #[test]
    fn test_empty_report() {
        let value = serde_json::to_value(ScrapeReport::default()).unwrap();
        assert_eq!(value, serde_json::json!({ "data": [] }));
    }

    #[test]
    fn test_write_report_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.json");

        write_report(&report(), Some(&path)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: ScrapeReport = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].get(Field::Name), Some("Buddy"));
    }
}
