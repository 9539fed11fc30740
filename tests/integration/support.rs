//! Shared fixtures for the integration tests

use async_trait::async_trait;
use petscout::crawler::{FetchError, MarkupSource};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A whole site held in memory, keyed by exact URL
#[derive(Debug, Clone, Default)]
pub struct SitePages {
    pages: Arc<Mutex<HashMap<String, String>>>,
    fetches: Arc<AtomicUsize>,
}

impl SitePages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, markup: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), markup.to_string());
        self
    }

    /// Classification fetches and page loads alike
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarkupSource for SitePages {
    async fn fetch_markup(&self, url: &str) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let pages = self.pages.lock().unwrap();
        pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
