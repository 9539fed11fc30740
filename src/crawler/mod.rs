//! Crawler module for page discovery and run orchestration
//!
//! This module contains the core crawling logic, including:
//! - Static HTTP fetching for classification and static sessions
//! - Link discovery on rendered pages
//! - The BFS frontier and embed queue
//! - Overall scrape coordination

mod coordinator;
mod fetcher;
pub mod frontier;
pub mod links;

pub use coordinator::{scrape_site, scrape_site_with, SiteScraper};
pub use fetcher::{build_http_client, user_agent_string, FetchError, HttpFetcher, MarkupSource};
pub use frontier::{Disposition, EmbedTask, Frontier};
pub use links::{extract_candidates, find_links};
