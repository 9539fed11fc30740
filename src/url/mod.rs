//! URL helpers for Petscout
//!
//! Page identity is the exact URL string, so nothing here normalizes URLs.
//! These helpers only answer questions about a URL: its host, its scheme and
//! its query parameters.

mod domain;

pub use domain::{extract_domain, host_of, is_secure};

use url::Url;

/// Returns the first value of query parameter `key`, if the URL parses and carries it
///
/// # Examples
///
/// ```
/// use petscout::url::query_value;
///
/// let url = "https://site.test/animals?animalType=Dog&page=2";
/// assert_eq!(query_value(url, "animalType"), Some("Dog".to_string()));
/// assert_eq!(query_value(url, "missing"), None);
/// assert_eq!(query_value("not a url", "animalType"), None);
/// ```
pub fn query_value(url: &str, key: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let value = parsed
        .query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned());
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value_decodes() {
        let url = "https://site.test/list?animalType=Small%20Animal";
        assert_eq!(
            query_value(url, "animalType"),
            Some("Small Animal".to_string())
        );
    }

    #[test]
    fn test_query_value_first_occurrence_wins() {
        let url = "https://site.test/list?animalType=Cat&animalType=Dog";
        assert_eq!(query_value(url, "animalType"), Some("Cat".to_string()));
    }

    #[test]
    fn test_query_value_is_case_sensitive() {
        let url = "https://site.test/list?animaltype=Dog";
        assert_eq!(query_value(url, "animalType"), None);
    }

    #[test]
    fn test_query_value_without_query() {
        assert_eq!(query_value("https://site.test/", "animalType"), None);
    }
}
