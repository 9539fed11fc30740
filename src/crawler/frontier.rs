//! Crawl frontier: the BFS queue, the visited set and the embed queue
//!
//! This module handles:
//! - FIFO ordering of pages awaiting link discovery
//! - Exact-string deduplication of every URL the run has accepted
//! - Routing candidates that point at provider embed pages into a separate queue

use crate::provider::LinkFilters;
use crate::url::{extract_domain, is_secure};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A page confirmed to host provider content, with the page that linked to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedTask {
    /// Page the embed was found on; providers read context from it
    pub parent_url: String,

    /// The embed page to extract from
    pub child_url: String,
}

/// What the frontier did with an offered candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Queued as an embed task
    Embed,
    /// Appended to the BFS queue
    Enqueued,
    /// Already accepted earlier in this run
    Seen,
    /// Insecure scheme or a host outside the crawl
    OffSite,
    /// Not an absolute URL with a host
    Malformed,
}

/// Frontier state for one run
#[derive(Debug, Default)]
pub struct Frontier {
    visited: HashSet<String>,
    queue: VecDeque<String>,
    embeds: VecDeque<EmbedTask>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the root URL; a URL already seen is ignored
    pub fn seed(&mut self, url: &str) {
        if self.visited.insert(url.to_string()) {
            self.queue.push_back(url.to_string());
        }
    }

    /// Removes and returns the oldest queued page; `None` ends traversal
    pub fn pop_next(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Removes and returns the oldest embed task
    pub fn pop_embed(&mut self) -> Option<EmbedTask> {
        self.embeds.pop_front()
    }

    /// Decides what to do with a candidate link found on `parent`
    ///
    /// # Rules
    ///
    /// | Candidate | Result |
    /// |-----------|--------|
    /// | contains a non-empty embed marker, unseen | `Embed` |
    /// | `https`, host is `origin_host` or the embed host, unseen | `Enqueued` |
    /// | either of the above, already seen | `Seen` |
    /// | other scheme or host | `OffSite` |
    /// | relative or hostless | `Malformed` |
    pub fn offer(
        &mut self,
        parent: &str,
        candidate: &str,
        origin_host: &str,
        filters: &LinkFilters,
    ) -> Disposition {
        if !filters.embed_marker.is_empty() && candidate.contains(&filters.embed_marker) {
            if !self.visited.insert(candidate.to_string()) {
                return Disposition::Seen;
            }
            self.embeds.push_back(EmbedTask {
                parent_url: parent.to_string(),
                child_url: candidate.to_string(),
            });
            return Disposition::Embed;
        }

        let url = match Url::parse(candidate) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Discarding malformed link {:?}: {}", candidate, e);
                return Disposition::Malformed;
            }
        };

        let Some(host) = extract_domain(&url) else {
            tracing::debug!("Discarding link without host: {}", candidate);
            return Disposition::Malformed;
        };

        let in_scope = host == origin_host
            || (!filters.embed_host.is_empty() && host == filters.embed_host);
        if !is_secure(&url) || !in_scope {
            return Disposition::OffSite;
        }

        if !self.visited.insert(candidate.to_string()) {
            return Disposition::Seen;
        }
        self.queue.push_back(candidate.to_string());
        Disposition::Enqueued
    }

    /// Returns true if the URL has been accepted in this run
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.queue.len()
    }

    pub fn embed_len(&self) -> usize {
        self.embeds.len()
    }
}
