//! Run statistics
//!
//! Counters the orchestrator bumps as it goes, plus start and finish times.
//! They ride along with the report but are never part of its JSON.

use chrono::{DateTime, Utc};
use std::io::{self, Write};

/// Counters for one scrape run
#[derive(Debug, Clone)]
pub struct RunStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages whose links were discovered
    pub pages_visited: usize,

    /// Pages that could not be loaded
    pub pages_skipped: usize,

    /// Candidate links handed to the frontier
    pub candidates_offered: usize,

    /// Candidates accepted into the BFS queue
    pub pages_enqueued: usize,

    /// Candidates accepted as embed tasks
    pub embed_tasks: usize,

    pub records_extracted: usize,
    pub empty_extractions: usize,
    pub failed_extractions: usize,
}

impl RunStats {
    /// Starts the clock
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_visited: 0,
            pages_skipped: 0,
            candidates_offered: 0,
            pages_enqueued: 0,
            embed_tasks: 0,
            records_extracted: 0,
            empty_extractions: 0,
            failed_extractions: 0,
        }
    }

    /// Stops the clock; only the first call counts
    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Utc::now());
        }
    }

    /// Whole seconds between start and finish, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Extraction attempts of any outcome
    pub fn extraction_attempts(&self) -> usize {
        self.records_extracted + self.empty_extractions + self.failed_extractions
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::start()
    }
}

/// Writes statistics in a human-readable layout
pub fn write_statistics<W: Write>(stats: &RunStats, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Scrape Statistics ===\n")?;

    writeln!(out, "Run:")?;
    writeln!(out, "  Started: {}", stats.started_at.to_rfc3339())?;
    match stats.finished_at {
        Some(finished) => writeln!(out, "  Finished: {}", finished.to_rfc3339())?,
        None => writeln!(out, "  Finished: (running)")?,
    }
    if let Some(seconds) = stats.duration_seconds() {
        writeln!(out, "  Duration: {}s", seconds)?;
    }
    writeln!(out)?;

    writeln!(out, "Crawl:")?;
    writeln!(out, "  Pages visited: {}", stats.pages_visited)?;
    writeln!(out, "  Pages skipped: {}", stats.pages_skipped)?;
    writeln!(out, "  Candidate links: {}", stats.candidates_offered)?;
    writeln!(out, "  Pages enqueued: {}", stats.pages_enqueued)?;
    writeln!(out, "  Embed pages found: {}", stats.embed_tasks)?;
    writeln!(out)?;

    writeln!(out, "Extraction:")?;
    writeln!(out, "  Records: {}", stats.records_extracted)?;
    writeln!(out, "  Empty: {}", stats.empty_extractions)?;
    writeln!(out, "  Failed: {}", stats.failed_extractions)?;

    let attempts = stats.extraction_attempts();
    let success_rate = if attempts > 0 {
        (stats.records_extracted as f64 / attempts as f64) * 100.0
    } else {
        0.0
    };
    writeln!(
        out,
        "\nSuccess Rate: {:.1}% ({} / {} embed pages yielded a record)",
        success_rate, stats.records_extracted, attempts
    )?;

    Ok(())
}

/// Prints statistics to stderr, keeping stdout free for the report
pub fn print_statistics(stats: &RunStats) {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    if let Err(e) = write_statistics(stats, &mut handle) {
        tracing::warn!("Failed to print statistics: {}", e);
    }
}
