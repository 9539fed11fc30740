//! In-memory fixtures for offline runs
//!
//! [`StaticPages`] serves canned markup by exact URL. Paired with
//! [`StaticSession`](crate::session::StaticSession) it lets a whole scrape run
//! without a network or a browser, which is how the crate's own tests drive it.

use crate::crawler::{FetchError, MarkupSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Canned pages keyed by exact URL
///
/// Clones share the same pages and fetch counter.
#[derive(Debug, Clone, Default)]
pub struct StaticPages {
    pages: Arc<RwLock<HashMap<String, String>>>,
    fetches: Arc<AtomicUsize>,
}

impl StaticPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page, builder style
    pub fn with_page(self, url: &str, markup: &str) -> Self {
        self.insert(url, markup);
        self
    }

    /// Adds or replaces a page
    pub fn insert(&self, url: &str, markup: &str) {
        let mut pages = self.pages.write().unwrap_or_else(|e| e.into_inner());
        pages.insert(url.to_string(), markup.to_string());
    }

    /// Number of `fetch_markup` calls served so far, hits and misses alike
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarkupSource for StaticPages {
    async fn fetch_markup(&self, url: &str) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let pages = self.pages.read().unwrap_or_else(|e| e.into_inner());
        pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
