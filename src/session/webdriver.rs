//! WebDriver session
//!
//! Drives a remote browser (a Selenium grid or a bare chromedriver/geckodriver)
//! through `fantoccini`.

use super::{RenderSession, WaitOutcome};
use crate::config::SessionConfig;
use crate::SessionError;
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};
use std::time::Duration;
use tokio::runtime::Handle;

/// Gap between element lookups while waiting
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// A live remote browser session
///
/// Dropping an open session still ends it: the drop spawns the close onto the
/// runtime captured at connect time.
pub struct WebDriverSession {
    client: Option<Client>,
    endpoint: String,
    runtime: Handle,
}

impl WebDriverSession {
    /// Creates a new browser session at the configured endpoint
    pub async fn connect(config: &SessionConfig) -> Result<Self, SessionError> {
        let endpoint = format!("{}/", config.webdriver_url.trim_end_matches('/'));

        let mut builder = ClientBuilder::rustls();
        builder.capabilities(capabilities(config));
        let client = builder
            .connect(&endpoint)
            .await
            .map_err(|e| SessionError::Create(e.to_string()))?;

        tracing::info!("Opened {} session at {}", config.browser_name, endpoint);

        Ok(Self {
            client: Some(client),
            endpoint,
            runtime: Handle::current(),
        })
    }

    fn client(&self) -> Result<&Client, SessionError> {
        self.client
            .as_ref()
            .ok_or_else(|| SessionError::Protocol("session is closed".to_string()))
    }
}

#[async_trait]
impl RenderSession for WebDriverSession {
    async fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.client()?
            .goto(url)
            .await
            .map_err(|e| SessionError::Navigate {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    async fn current_markup(&self) -> Result<String, SessionError> {
        self.client()?.source().await.map_err(command_error)
    }

    async fn wait_for_element(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<WaitOutcome, SessionError> {
        let found = self
            .client()?
            .wait()
            .at_most(timeout)
            .every(POLL_INTERVAL)
            .for_element(Locator::Css(selector))
            .await;

        match found {
            Ok(_) => Ok(WaitOutcome::Found),
            Err(CmdError::WaitTimeout) => Ok(WaitOutcome::TimedOut),
            Err(e) => Err(command_error(e)),
        }
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        let Some(client) = self.client.take() else {
            return Ok(());
        };

        client.close().await.map_err(command_error)?;
        tracing::info!("Closed session at {}", self.endpoint);
        Ok(())
    }
}

impl Drop for WebDriverSession {
    fn drop(&mut self) {
        if let Some(client) = self.client.take() {
            tracing::warn!(
                "Session at {} dropped without close, closing in background",
                self.endpoint
            );
            let endpoint = std::mem::take(&mut self.endpoint);
            self.runtime.spawn(async move {
                if let Err(e) = client.close().await {
                    tracing::warn!("Background close of session at {} failed: {}", endpoint, e);
                }
            });
        }
    }
}

fn command_error(error: CmdError) -> SessionError {
    SessionError::Protocol(error.to_string())
}

/// Builds the capabilities for the configured browser
fn capabilities(config: &SessionConfig) -> Map<String, Value> {
    let options_key = if config.browser_name == "firefox" {
        "moz:firefoxOptions"
    } else {
        "goog:chromeOptions"
    };

    let mut caps = Map::new();
    caps.insert("browserName".to_string(), json!(config.browser_name));
    caps.insert(
        options_key.to_string(),
        json!({ "args": config.browser_args }),
    );
    caps
}
