//! Link discovery on rendered pages
//!
//! This module loads a page into the rendering session and collects the
//! candidate references on it:
//! - `href` of `<a>` elements whose class contains the anchor filter
//! - `src` of `<iframe>` elements whose class contains the iframe filter
//!
//! Nothing is resolved, normalized or deduplicated here; the frontier decides
//! what each candidate means.

use crate::provider::LinkFilters;
use crate::session::{wait_or_log, RenderSession};
use crate::SessionError;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

/// Loads `url` and returns its candidate links, anchors first
///
/// Waits up to `wait` for an anchor and, separately, for a frame. Either may
/// be missing; that is logged and simply yields no links of that kind. Only a
/// failed navigation or an unreadable document is an error.
pub async fn find_links(
    session: &mut dyn RenderSession,
    url: &str,
    filters: &LinkFilters,
    wait: Duration,
) -> Result<Vec<String>, SessionError> {
    session.navigate(url).await?;

    if !wait_or_log(&*session, "a", wait).await.is_found() {
        tracing::debug!("No anchors could be found on {}", url);
    }
    if !wait_or_log(&*session, "iframe", wait).await.is_found() {
        tracing::debug!("No iframes could be found on {}", url);
    }

    let markup = session.current_markup().await?;
    Ok(extract_candidates(&markup, filters))
}

/// Collects candidate links from markup
///
/// An empty class filter matches every element of that kind, including
/// elements with no class attribute. Elements missing the target attribute
/// are skipped.
pub fn extract_candidates(markup: &str, filters: &LinkFilters) -> Vec<String> {
    let document = Html::parse_document(markup);
    let mut links = collect_attr(&document, "a", "href", &filters.anchor_class);
    links.extend(collect_attr(
        &document,
        "iframe",
        "src",
        &filters.iframe_class,
    ));
    links
}

fn collect_attr(document: &Html, tag: &str, attr: &str, class_filter: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(tag) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|element| class_matches(element, class_filter))
        .filter_map(|element| element.value().attr(attr))
        .map(str::to_string)
        .collect()
}

fn class_matches(element: &ElementRef<'_>, filter: &str) -> bool {
    element
        .value()
        .attr("class")
        .unwrap_or("")
        .contains(filter)
}
