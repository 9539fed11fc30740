//! State module for tracking scrape progress
//!
//! A run moves through `Crawling`, `Extracting` and `Done`; the transitions are
//! checked so a driver bug surfaces as an error instead of a silent re-crawl.

mod phase;

pub use phase::CrawlPhase;
