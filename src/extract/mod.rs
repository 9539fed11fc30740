//! Record extraction
//!
//! This module handles:
//! - The field vocabulary of an animal record
//! - Incremental record assembly through [`RecordBuilder`]
//! - Dispatch from a [`ProviderKind`] to the builder that understands it
//!
//! A builder owns a [`DraftRecord`] that its `add_*` steps fill in. `build`
//! moves the draft out as an [`ExtractedRecord`] and leaves the builder empty,
//! so nothing a caller does with one record can leak into the next.

mod coordinator;
mod shelterluv;

pub use coordinator::{attempt_extract, Extraction};
pub use shelterluv::ShelterLuvBuilder;

use crate::provider::ProviderKind;
use crate::session::RenderSession;
use crate::ScraperError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// A named attribute of an animal record
///
/// Serialized by variant name, so a record's JSON keys are exactly
/// `Name`, `Type`, `Breed`, `Gender`, `Age`, `Price` and `Image`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Type,
    Breed,
    Gender,
    Age,
    Price,
    Image,
}

/// Fields a record must carry to be reported
pub const REQUIRED_FIELDS: [Field; 3] = [Field::Name, Field::Type, Field::Gender];

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Type => "Type",
            Self::Breed => "Breed",
            Self::Gender => "Gender",
            Self::Age => "Age",
            Self::Price => "Price",
            Self::Image => "Image",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mutable field map owned by one builder
#[derive(Debug, Default)]
pub struct DraftRecord {
    fields: BTreeMap<Field, String>,
}

impl DraftRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, replacing any earlier value
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Moves the accumulated fields out, leaving the draft empty
    pub fn finalize(&mut self) -> ExtractedRecord {
        ExtractedRecord {
            fields: std::mem::take(&mut self.fields),
        }
    }
}

/// A finished animal record
///
/// Owns its fields outright; it shares nothing with the builder that
/// produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedRecord {
    fields: BTreeMap<Field, String>,
}

impl ExtractedRecord {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: Field, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field, value.into())
    }

    /// Returns true if every field in [`REQUIRED_FIELDS`] is present
    pub fn has_required_fields(&self) -> bool {
        REQUIRED_FIELDS
            .iter()
            .all(|field| self.fields.contains_key(field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

/// Assembles one record field by field from a loaded provider page
///
/// Every `add_*` step tolerates missing markup: it leaves the field unset and
/// returns the builder so steps chain.
pub trait RecordBuilder {
    /// The draft the `add_*` steps write into
    fn draft_mut(&mut self) -> &mut DraftRecord;

    fn add_name(&mut self) -> &mut Self;
    fn add_type(&mut self) -> &mut Self;
    fn add_breed(&mut self) -> &mut Self;
    fn add_gender(&mut self) -> &mut Self;
    fn add_age(&mut self) -> &mut Self;
    fn add_price(&mut self) -> &mut Self;
    fn add_image(&mut self) -> &mut Self;

    /// Moves the draft out as a finished record and resets the builder
    fn build(&mut self) -> ExtractedRecord {
        self.draft_mut().finalize()
    }
}

/// Runs every `add_*` step in field order, then builds
pub fn populate<B: RecordBuilder>(builder: &mut B) -> ExtractedRecord {
    builder
        .add_name()
        .add_type()
        .add_breed()
        .add_gender()
        .add_age()
        .add_price()
        .add_image()
        .build()
}

/// Loads `child` with the builder for `kind` and extracts one record
///
/// Returns `None` when no builder exists for `kind`. The only error is a page
/// that could not be loaded.
pub async fn extract_with(
    kind: ProviderKind,
    parent: &str,
    child: &str,
    session: &mut dyn RenderSession,
    wait: Duration,
) -> Option<Result<ExtractedRecord, ScraperError>> {
    match kind {
        ProviderKind::ShelterLuv => {
            let loaded = ShelterLuvBuilder::load(parent, child, session, wait).await;
            Some(loaded.map(|mut builder| populate(&mut builder)))
        }
        ProviderKind::Unrecognized => None,
    }
}
