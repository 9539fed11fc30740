use crate::config::types::{Config, FetchConfig, ScraperConfig, SessionConfig, SessionKind, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Longest element wait we accept; anything above this stalls a crawl on every page
const MAX_ELEMENT_WAIT_MS: u64 = 60_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_fetch_config(&config.fetch)?;
    validate_session_config(&config.session)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawl and extraction settings
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.element_wait_ms < 1 || config.element_wait_ms > MAX_ELEMENT_WAIT_MS {
        return Err(ConfigError::Validation(format!(
            "element_wait_ms must be between 1 and {}, got {}",
            MAX_ELEMENT_WAIT_MS, config.element_wait_ms
        )));
    }

    if config.max_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max_pages must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates static fetch timeouts
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates the rendering session settings
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    if config.kind != SessionKind::WebDriver {
        return Ok(());
    }

    let url = Url::parse(&config.webdriver_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid webdriver_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "webdriver_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.browser_name.is_empty() {
        return Err(ConfigError::Validation(
            "browser_name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
