use super::{RenderSession, WaitOutcome};
use crate::crawler::MarkupSource;
use crate::SessionError;
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;

/// Session that loads pages with plain HTTP fetches
///
/// No scripts run, so a page's markup is final as soon as it arrives and
/// element waits return immediately.
pub struct StaticSession<M> {
    source: M,
    current: Option<LoadedPage>,
    closed: bool,
}

struct LoadedPage {
    url: String,
    markup: String,
}

impl<M: MarkupSource> StaticSession<M> {
    pub fn new(source: M) -> Self {
        Self {
            source,
            current: None,
            closed: false,
        }
    }

    fn loaded(&self) -> Result<&LoadedPage, SessionError> {
        if self.closed {
            return Err(SessionError::Protocol("session is closed".to_string()));
        }
        self.current.as_ref().ok_or(SessionError::NoDocument)
    }
}

#[async_trait]
impl<M: MarkupSource> RenderSession for StaticSession<M> {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::Protocol("session is closed".to_string()));
        }

        match self.source.fetch_markup(url).await {
            Ok(markup) => {
                self.current = Some(LoadedPage {
                    url: url.to_string(),
                    markup,
                });
                Ok(())
            }
            Err(e) => {
                self.current = None;
                Err(SessionError::Navigate {
                    url: url.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    async fn current_markup(&self) -> Result<String, SessionError> {
        Ok(self.loaded()?.markup.clone())
    }

    async fn wait_for_element(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<WaitOutcome, SessionError> {
        let page = self.loaded()?;
        if markup_has_match(&page.markup, selector)? {
            Ok(WaitOutcome::Found)
        } else {
            tracing::trace!("'{}' not present on {}", selector, page.url);
            Ok(WaitOutcome::TimedOut)
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.current = None;
        self.closed = true;
        Ok(())
    }
}

fn markup_has_match(markup: &str, selector: &str) -> Result<bool, SessionError> {
    let selector = Selector::parse(selector)
        .map_err(|e| SessionError::Protocol(format!("invalid selector '{}': {:?}", selector, e)))?;
    let document = Html::parse_document(markup);
    let found = document.select(&selector).next().is_some();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticPages;

    fn session() -> StaticSession<StaticPages> {
        let pages = StaticPages::new()
            .with_page(
                "https://site.test/",
                r#"<html><body><a href="https://site.test/adopt">Adopt</a></body></html>"#,
            )
            .with_page("https://site.test/empty", "<html><body></body></html>");
        StaticSession::new(pages)
    }

    #[tokio::test]
    async fn test_navigate_and_read_markup() {
        let mut session = session();
        session.navigate("https://site.test/").await.unwrap();

        let markup = session.current_markup().await.unwrap();
        assert!(markup.contains("https://site.test/adopt"));
    }

    #[tokio::test]
    async fn test_wait_for_element() {
        let mut session = session();
        session.navigate("https://site.test/").await.unwrap();

        let timeout = Duration::from_millis(100);
        assert_eq!(
            session.wait_for_element("a", timeout).await.unwrap(),
            WaitOutcome::Found
        );
        assert_eq!(
            session.wait_for_element("iframe", timeout).await.unwrap(),
            WaitOutcome::TimedOut
        );
    }

    #[tokio::test]
    async fn test_navigate_failure_clears_document() {
        let mut session = session();
        session.navigate("https://site.test/").await.unwrap();

        let err = session.navigate("https://site.test/missing").await.unwrap_err();
        assert!(matches!(err, SessionError::Navigate { .. }));
        assert!(matches!(
            session.current_markup().await,
            Err(SessionError::NoDocument)
        ));
    }

    #[tokio::test]
    async fn test_invalid_selector() {
        let mut session = session();
        session.navigate("https://site.test/empty").await.unwrap();

        let result = session
            .wait_for_element("a[[", Duration::from_millis(10))
            .await;
        assert!(matches!(result, Err(SessionError::Protocol(_))));
    }

    #[tokio::test]
    async fn test_closed_session_rejects_navigation() {
        let mut session = session();
        session.close().await.unwrap();

        assert!(session.navigate("https://site.test/").await.is_err());
        assert!(session.current_markup().await.is_err());
    }
}
