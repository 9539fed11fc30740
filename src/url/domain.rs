use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use petscout::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses an absolute URL string and returns its lowercase host
///
/// Relative references fail to parse and are reported as `UrlError::Parse`;
/// URLs such as `mailto:` that parse but carry no host are `UrlError::MissingHost`.
pub fn host_of(url: &str) -> UrlResult<String> {
    let parsed = Url::parse(url).map_err(|e| UrlError::Parse(format!("{}: {}", url, e)))?;
    extract_domain(&parsed).ok_or_else(|| UrlError::MissingHost(url.to_string()))
}

/// Returns true if the URL uses the `https` scheme
pub fn is_secure(url: &Url) -> bool {
    url.scheme() == "https"
}
