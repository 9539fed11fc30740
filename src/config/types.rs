use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Petscout
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl and extraction behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// How long to wait for an element to appear after a navigation (milliseconds)
    #[serde(rename = "element-wait-ms", default = "default_element_wait_ms")]
    pub element_wait_ms: u64,

    /// Stop link discovery after this many pages
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<usize>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            element_wait_ms: default_element_wait_ms(),
            max_pages: None,
        }
    }
}

impl ScraperConfig {
    /// The element wait as a `Duration`
    pub fn element_wait(&self) -> Duration {
        Duration::from_millis(self.element_wait_ms)
    }
}

/// Static (non-rendered) fetch settings
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Which rendering session backs the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Remote browser driven over the W3C WebDriver protocol
    #[default]
    WebDriver,
    /// Plain HTTP fetches, no script execution
    Static,
}

/// Rendering session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub kind: SessionKind,

    /// Base URL of the WebDriver endpoint
    #[serde(rename = "webdriver-url", default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(rename = "browser-name", default = "default_browser_name")]
    pub browser_name: String,

    /// Arguments passed to the browser binary
    #[serde(rename = "browser-args", default = "default_browser_args")]
    pub browser_args: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            kind: SessionKind::default(),
            webdriver_url: default_webdriver_url(),
            browser_name: default_browser_name(),
            browser_args: default_browser_args(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "petscout".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/petscout/petscout".to_string(),
            contact_email: "maintainers@petscout.dev".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Where to write the JSON report; stdout when unset
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,
}

fn default_element_wait_ms() -> u64 {
    100
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_webdriver_url() -> String {
    "http://chrome:4444/wd/hub".to_string()
}

fn default_browser_name() -> String {
    "chrome".to_string()
}

fn default_browser_args() -> Vec<String> {
    vec![
        "--headless".to_string(),
        "--no-sandbox".to_string(),
        "--disable-dev-shm-usage".to_string(),
    ]
}
