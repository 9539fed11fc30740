use super::{DraftRecord, Field, RecordBuilder};
use crate::session::{wait_or_log, RenderSession};
use crate::url::query_value;
use crate::ScraperError;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

const MAIN_INFO_SELECTOR: &str = r#"div[data-cy="name"]"#;
const IMAGE_HOST: &str = "shelterluv.com";
const IMAGE_PATH_MARKER: &str = "profile-pictures";

/// Record builder for ShelterLuv animal pages
///
/// Holds the parsed page; every `add_*` step queries it afresh. The record
/// type is not on the animal page at all, it comes from the `animalType`
/// query parameter of the listing page that linked here.
pub struct ShelterLuvBuilder {
    parent_url: String,
    document: Html,
    draft: DraftRecord,
}

impl ShelterLuvBuilder {
    /// Loads `child` into the session and parses it
    ///
    /// Fails with `ContentUnavailable` when the page cannot be loaded or read.
    /// A missing profile image is logged only.
    pub async fn load(
        parent: &str,
        child: &str,
        session: &mut dyn RenderSession,
        wait: Duration,
    ) -> Result<Self, ScraperError> {
        session
            .navigate(child)
            .await
            .map_err(|e| content_unavailable(child, e))?;

        if !wait_or_log(&*session, "img", wait).await.is_found() {
            tracing::debug!("No images could be found on {}", child);
        }

        let markup = session
            .current_markup()
            .await
            .map_err(|e| content_unavailable(child, e))?;

        Ok(Self::from_markup(parent, &markup))
    }

    /// Builds over markup that is already loaded
    pub fn from_markup(parent: &str, markup: &str) -> Self {
        let builder = Self {
            parent_url: parent.to_string(),
            document: Html::parse_document(markup),
            draft: DraftRecord::new(),
        };

        if builder.profile_image().is_none() {
            tracing::debug!("No profile picture on animal page (parent {})", parent);
        }
        if builder.main_info().is_none() {
            tracing::debug!("No main info section on animal page (parent {})", parent);
        }

        builder
    }

    fn main_info(&self) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(MAIN_INFO_SELECTOR).ok()?;
        self.document.select(&selector).next()
    }

    fn profile_image(&self) -> Option<&str> {
        let selector = Selector::parse("img[src]").ok()?;
        self.document
            .select(&selector)
            .filter_map(|img| img.value().attr("src"))
            .find(|src| src.contains(IMAGE_HOST) && src.contains(IMAGE_PATH_MARKER))
    }

    /// Value shown next to `label` in the main info section
    ///
    /// Walks container child → label child → sibling element. The sibling is
    /// the nearest one after the label, falling back to the nearest one before
    /// it. Siblings are not taken in document order, so a leading icon in
    /// `<i>icon</i><span>Sex</span><span>Male</span>` is skipped in favor of
    /// `Male`.
    fn labelled_value(&self, label: &str) -> Option<String> {
        let container = self.main_info()?;
        let row = child_elements(container).find(|child| text_of(*child).contains(label))?;
        let label_cell = child_elements(row).find(|child| text_of(*child).contains(label))?;
        let value = label_cell
            .next_siblings()
            .find_map(ElementRef::wrap)
            .or_else(|| label_cell.prev_siblings().find_map(ElementRef::wrap))?;
        Some(text_of(value))
    }

    fn set_labelled(&mut self, field: Field, label: &str) -> &mut Self {
        match self.labelled_value(label) {
            Some(value) => self.draft.set(field, value),
            None => tracing::debug!("No {} on animal page (parent {})", label, self.parent_url),
        }
        self
    }
}

impl RecordBuilder for ShelterLuvBuilder {
    fn draft_mut(&mut self) -> &mut DraftRecord {
        &mut self.draft
    }

    fn add_name(&mut self) -> &mut Self {
        let name = self.main_info().and_then(|container| {
            child_elements(container)
                .find(|child| child.value().name() == "h1")
                .map(text_of)
        });
        if let Some(name) = name {
            self.draft.set(Field::Name, name);
        }
        self
    }

    fn add_type(&mut self) -> &mut Self {
        let kind = match query_value(&self.parent_url, "animalType").as_deref() {
            Some("Dog") => "Dog",
            Some("Cat") => "Cat",
            _ => "Other",
        };
        self.draft.set(Field::Type, kind);
        self
    }

    fn add_breed(&mut self) -> &mut Self {
        self.set_labelled(Field::Breed, "Breed")
    }

    fn add_gender(&mut self) -> &mut Self {
        self.set_labelled(Field::Gender, "Sex")
    }

    fn add_age(&mut self) -> &mut Self {
        self.set_labelled(Field::Age, "Age")
    }

    /// ShelterLuv pages do not publish a price
    fn add_price(&mut self) -> &mut Self {
        self
    }

    fn add_image(&mut self) -> &mut Self {
        let image = self.profile_image().map(str::to_string);
        if let Some(src) = image {
            self.draft.set(Field::Image, src);
        }
        self
    }
}

fn content_unavailable(url: &str, error: crate::SessionError) -> ScraperError {
    ScraperError::ContentUnavailable {
        url: url.to_string(),
        reason: error.to_string(),
    }
}

fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Trimmed text with internal whitespace collapsed
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
