//! Rendering sessions
//!
//! A rendering session holds exactly one current document. Every component
//! that loads pages receives the run's session as `&mut dyn RenderSession`,
//! so page loads are strictly sequential.
//!
//! Two implementations ship with the crate:
//! - [`WebDriverSession`] drives a remote browser over the W3C WebDriver protocol
//! - [`StaticSession`] fetches markup over plain HTTP without running scripts

mod static_page;
mod webdriver;

pub use static_page::StaticSession;
pub use webdriver::WebDriverSession;

use crate::config::{SessionConfig, SessionKind};
use crate::crawler::MarkupSource;
use crate::SessionError;
use async_trait::async_trait;
use std::time::Duration;

/// Result of waiting for an element to appear
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// At least one element matched the selector
    Found,
    /// The timeout elapsed with no match
    TimedOut,
}

impl WaitOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found)
    }
}

/// Contract every page-loading backend satisfies
#[async_trait]
pub trait RenderSession: Send + Sync {
    /// Loads `url`, replacing the current document
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    /// Returns the markup of the current document as rendered
    async fn current_markup(&self) -> Result<String, SessionError>;

    /// Waits up to `timeout` for an element matching the CSS `selector`
    async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<WaitOutcome, SessionError>;

    /// Releases the session; later calls on a closed session are no-ops or errors
    async fn close(&mut self) -> Result<(), SessionError>;
}

/// Opens the session configured in `[session]`
///
/// This is the only step whose failure aborts a run.
pub async fn open_session<M>(
    config: &SessionConfig,
    source: M,
) -> Result<Box<dyn RenderSession>, SessionError>
where
    M: MarkupSource + 'static,
{
    match config.kind {
        SessionKind::WebDriver => {
            let session = WebDriverSession::connect(config).await?;
            Ok(Box::new(session))
        }
        SessionKind::Static => Ok(Box::new(StaticSession::new(source))),
    }
}

/// Waits for `selector`, treating a session error as "not found"
///
/// Element waits never fail a page; a broken wait is logged and the caller
/// carries on with whatever markup the session has.
pub async fn wait_or_log(
    session: &dyn RenderSession,
    selector: &str,
    timeout: Duration,
) -> WaitOutcome {
    match session.wait_for_element(selector, timeout).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::debug!("Wait for '{}' failed: {}", selector, e);
            WaitOutcome::TimedOut
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticPages;

    #[tokio::test]
    async fn test_open_static_session() {
        let pages = StaticPages::new().with_page("https://site.test/", "<a href='x'>x</a>");
        let config = SessionConfig {
            kind: SessionKind::Static,
            ..SessionConfig::default()
        };

        let mut session = open_session(&config, pages).await.unwrap();
        session.navigate("https://site.test/").await.unwrap();
        assert!(session.current_markup().await.unwrap().contains("href"));
        session.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_open_webdriver_session_unreachable_endpoint() {
        let config = SessionConfig {
            kind: SessionKind::WebDriver,
            webdriver_url: "http://127.0.0.1:9/wd/hub".to_string(),
            ..SessionConfig::default()
        };

        let result = open_session(&config, StaticPages::new()).await;
        assert!(matches!(result, Err(SessionError::Create(_))));
    }

    #[tokio::test]
    async fn test_wait_or_log_maps_errors_to_timeout() {
        let session = StaticSession::new(StaticPages::new());
        // Nothing loaded yet, so the wait itself errors
        let outcome = wait_or_log(&session, "a", Duration::from_millis(10)).await;
        assert_eq!(outcome, WaitOutcome::TimedOut);
    }
}
