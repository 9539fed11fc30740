use super::{ProviderKind, KNOWN_PROVIDERS};
use crate::crawler::MarkupSource;
use scraper::{Html, Selector};

/// Decides which provider a page uses
///
/// Classification never fails: anything inconclusive is `Unrecognized`.
pub struct Classifier<M> {
    source: M,
}

impl<M: MarkupSource> Classifier<M> {
    pub fn new(source: M) -> Self {
        Self { source }
    }

    /// Classifies `url`
    ///
    /// A URL that names a provider is answered without a fetch. Otherwise the
    /// page's static markup is fetched and its script tags inspected; a failed
    /// fetch is logged and yields `Unrecognized`.
    pub async fn classify(&self, url: &str) -> ProviderKind {
        if let Some(kind) = ProviderKind::from_url(url) {
            return kind;
        }

        match self.source.fetch_markup(url).await {
            Ok(markup) => detect_from_markup(&markup),
            Err(e) => {
                tracing::debug!("Classification inconclusive for {}: {}", url, e);
                ProviderKind::Unrecognized
            }
        }
    }
}

/// Looks for a known provider's script host among `<script src>` attributes
pub fn detect_from_markup(markup: &str) -> ProviderKind {
    let Ok(script_selector) = Selector::parse("script[src]") else {
        return ProviderKind::Unrecognized;
    };
    let document = Html::parse_document(markup);

    for profile in KNOWN_PROVIDERS {
        let uses_provider = document
            .select(&script_selector)
            .filter_map(|script| script.value().attr("src"))
            .any(|src| src.contains(profile.script_host));
        if uses_provider {
            return profile.kind;
        }
    }

    ProviderKind::Unrecognized
}
