use super::{extract_with, ExtractedRecord};
use crate::crawler::MarkupSource;
use crate::provider::Classifier;
use crate::session::RenderSession;
use std::time::Duration;

/// Outcome of one extraction attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A record carrying every required field
    Record(ExtractedRecord),
    /// No provider builder applied, or required fields were missing
    Empty,
    /// The embed page could not be loaded
    Error { reason: String },
}

impl Extraction {
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Consumes the outcome, keeping only a record
    pub fn into_record(self) -> Option<ExtractedRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// Classifies `child`, runs the matching builder and gates on required fields
///
/// Never fails: load failures become `Extraction::Error` and everything else
/// that yields no usable record is `Extraction::Empty`.
pub async fn attempt_extract<M: MarkupSource>(
    parent: &str,
    child: &str,
    session: &mut dyn RenderSession,
    classifier: &Classifier<M>,
    wait: Duration,
) -> Extraction {
    let kind = classifier.classify(child).await;
    if !kind.is_recognized() {
        tracing::debug!("No provider recognized for embed {}", child);
        return Extraction::Empty;
    }

    match extract_with(kind, parent, child, session, wait).await {
        None => {
            tracing::debug!("No record builder for {} ({})", kind, child);
            Extraction::Empty
        }
        Some(Err(e)) => Extraction::Error {
            reason: e.to_string(),
        },
        Some(Ok(record)) if record.has_required_fields() => Extraction::Record(record),
        Some(Ok(record)) => {
            tracing::debug!(
                "Record from {} is missing required fields ({} present)",
                child,
                record.len()
            );
            Extraction::Empty
        }
    }
}
