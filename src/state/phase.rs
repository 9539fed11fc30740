/// Run phase definitions for one scrape
///
/// A run discovers pages first, then extracts records from the embed pages it
/// found, then releases its rendering session.
use std::fmt;

/// Represents the current phase of a scrape run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Pumping the frontier: loading pages and offering their links
    Crawling,

    /// Draining the embed queue through the extraction coordinator
    Extracting,

    /// Session released, report handed back
    Done,
}

impl CrawlPhase {
    /// Returns true if a run may move from this phase to `next`
    ///
    /// Phases only move forward. `Crawling -> Done` covers a run that is cut
    /// short before extraction starts.
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Crawling, Self::Extracting)
                | (Self::Extracting, Self::Done)
                | (Self::Crawling, Self::Done)
        )
    }

    /// Returns true if this is the final phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crawling => "crawling",
            Self::Extracting => "extracting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
