//! Integration tests for petscout
//!
//! Every run here is offline: pages come from an in-memory `SitePages`
//! source and are loaded through a static rendering session.

mod scrape_tests;
mod support;
