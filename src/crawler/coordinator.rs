//! Scrape coordinator - main run orchestration logic
//!
//! This module drives one run through its phases:
//! - `Crawling`: pump the frontier through the link discoverer
//! - `Extracting`: drain the embed queue through the extraction coordinator
//! - `Done`: release the rendering session and hand back the report

use crate::config::{Config, ScraperConfig};
use crate::crawler::frontier::{Disposition, Frontier};
use crate::crawler::links::find_links;
use crate::crawler::{HttpFetcher, MarkupSource};
use crate::extract::{attempt_extract, ExtractedRecord, Extraction};
use crate::output::{RunStats, ScrapeReport};
use crate::provider::Classifier;
use crate::session::{open_session, RenderSession};
use crate::state::CrawlPhase;
use crate::url::host_of;
use crate::ScraperError;

/// Drives a single scrape run
///
/// Owns the run's rendering session; every page load goes through it in
/// turn. The session is closed when `run` returns, whatever happened.
pub struct SiteScraper<M> {
    session: Box<dyn RenderSession>,
    classifier: Classifier<M>,
    settings: ScraperConfig,
    phase: CrawlPhase,
    stats: RunStats,
}

impl<M: MarkupSource> SiteScraper<M> {
    pub fn new(
        session: Box<dyn RenderSession>,
        classifier: Classifier<M>,
        settings: ScraperConfig,
    ) -> Self {
        Self {
            session,
            classifier,
            settings,
            phase: CrawlPhase::Crawling,
            stats: RunStats::start(),
        }
    }

    /// Current phase of the run
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    /// Crawls from `root_url` and extracts every embed found
    ///
    /// Never fails. Pages that cannot be loaded are skipped and embed pages
    /// that yield nothing are dropped; a root URL without a usable host gives
    /// an empty report.
    pub async fn run(mut self, root_url: &str) -> ScrapeReport {
        tracing::info!("Starting scrape of {}", root_url);

        let mut records = Vec::new();
        if let Err(e) = self.scrape(root_url, &mut records).await {
            tracing::error!("Scrape of {} stopped: {}", root_url, e);
        }

        self.finish().await;

        tracing::info!(
            "Scrape of {} completed: {} records from {} pages in {}s",
            root_url,
            records.len(),
            self.stats.pages_visited,
            self.stats.duration_seconds().unwrap_or(0)
        );

        ScrapeReport::new(records, self.stats)
    }

    async fn scrape(
        &mut self,
        root_url: &str,
        records: &mut Vec<ExtractedRecord>,
    ) -> Result<(), ScraperError> {
        let origin_host = host_of(root_url)?;

        let mut frontier = Frontier::new();
        frontier.seed(root_url);
        self.crawl(&mut frontier, &origin_host).await;

        self.transition(CrawlPhase::Extracting)?;
        self.extract_all(&mut frontier, records).await;
        Ok(())
    }

    /// Breadth-first link discovery until the frontier empties or the page cap is hit
    async fn crawl(&mut self, frontier: &mut Frontier, origin_host: &str) {
        let wait = self.settings.element_wait();

        while let Some(url) = frontier.pop_next() {
            if let Some(limit) = self.settings.max_pages {
                if self.stats.pages_visited >= limit {
                    tracing::info!(
                        "Page limit of {} reached, leaving {} pages unvisited",
                        limit,
                        frontier.frontier_len() + 1
                    );
                    break;
                }
            }

            // Classification decides which links on this page count
            let kind = self.classifier.classify(&url).await;
            let filters = kind.link_filters();
            tracing::debug!("Visiting {} (provider: {})", url, kind);

            let links = match find_links(&mut *self.session, &url, &filters, wait).await {
                Ok(links) => links,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", url, e);
                    self.stats.pages_skipped += 1;
                    continue;
                }
            };
            self.stats.pages_visited += 1;

            for candidate in &links {
                self.stats.candidates_offered += 1;
                match frontier.offer(&url, candidate, origin_host, &filters) {
                    Disposition::Enqueued => self.stats.pages_enqueued += 1,
                    Disposition::Embed => {
                        self.stats.embed_tasks += 1;
                        tracing::debug!("Found embed {} on {}", candidate, url);
                    }
                    other => tracing::debug!("Discarded {} from {}: {:?}", candidate, url, other),
                }
            }

            if self.stats.pages_visited % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages visited, {} queued, {} embeds found",
                    self.stats.pages_visited,
                    frontier.frontier_len(),
                    frontier.embed_len()
                );
            }
        }

        tracing::info!(
            "Crawl finished: {} pages visited, {} skipped, {} embeds found",
            self.stats.pages_visited,
            self.stats.pages_skipped,
            frontier.embed_len()
        );
    }

    async fn extract_all(&mut self, frontier: &mut Frontier, records: &mut Vec<ExtractedRecord>) {
        let wait = self.settings.element_wait();

        while let Some(task) = frontier.pop_embed() {
            let outcome = attempt_extract(
                &task.parent_url,
                &task.child_url,
                &mut *self.session,
                &self.classifier,
                wait,
            )
            .await;

            match outcome {
                Extraction::Record(record) => {
                    self.stats.records_extracted += 1;
                    records.push(record);
                }
                Extraction::Empty => {
                    self.stats.empty_extractions += 1;
                    tracing::debug!("No record from {}", task.child_url);
                }
                Extraction::Error { reason } => {
                    self.stats.failed_extractions += 1;
                    tracing::warn!("Extraction failed for {}: {}", task.child_url, reason);
                }
            }
        }
    }

    /// Closes the session and enters `Done`
    async fn finish(&mut self) {
        if let Err(e) = self.session.close().await {
            tracing::warn!("Failed to close rendering session: {}", e);
        }
        if !self.phase.is_terminal() {
            if let Err(e) = self.transition(CrawlPhase::Done) {
                tracing::error!("{}", e);
            }
        }
        self.stats.finish();
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), ScraperError> {
        if !self.phase.can_transition_to(next) {
            return Err(ScraperError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::info!("Phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }
}

/// Scrapes one site with the configured session and an HTTP fetcher
///
/// Fails only when the fetcher or the rendering session cannot be created.
///
/// # Example
///
/// ```no_run
/// use petscout::{scrape_site, Config};
///
/// # async fn demo() -> petscout::Result<()> {
/// let report = scrape_site("https://rescue.example/", &Config::default()).await?;
/// println!("{} animals", report.data.len());
/// # Ok(())
/// # }
/// ```
pub async fn scrape_site(root_url: &str, config: &Config) -> Result<ScrapeReport, ScraperError> {
    let fetcher = HttpFetcher::new(&config.user_agent, &config.fetch)?;
    scrape_site_with(root_url, config, fetcher).await
}

/// Like [`scrape_site`], with a caller-supplied markup source
///
/// The source serves classification fetches and, for `kind = "static"`,
/// page loads too.
pub async fn scrape_site_with<M>(
    root_url: &str,
    config: &Config,
    source: M,
) -> Result<ScrapeReport, ScraperError>
where
    M: MarkupSource + Clone + 'static,
{
    let session = open_session(&config.session, source.clone())
        .await
        .map_err(|e| {
            tracing::error!("Could not open rendering session: {}", e);
            e
        })?;

    let scraper = SiteScraper::new(session, Classifier::new(source), config.scraper.clone());
    Ok(scraper.run(root_url).await)
}
