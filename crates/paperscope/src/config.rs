//! Endpoint and request settings shared by the HTTP clients.

use url::Url;

use super::*;

/// Base URL of the citation export endpoint; the identifier is appended as a path segment.
pub const DEFAULT_CITATION_URL: &str = "https://export.arxiv.org/bibtex";

/// Base URL of the arXiv Atom search API.
pub const DEFAULT_SEARCH_URL: &str = "http://export.arxiv.org/api/query";

/// Browser-like user agent; the export endpoint rejects some default client identifiers.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/120.0.0.0 Safari/537.36";

/// Upper bound on a single request, connection setup included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for [`CitationClient`](crate::clients::CitationClient) and
/// [`ArxivClient`](crate::clients::ArxivClient).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use paperscope::ClientConfig;
///
/// let config = ClientConfig::default()
///   .with_citation_url("http://localhost:8080/bibtex/")
///   .with_timeout(Duration::from_secs(2));
///
/// assert_eq!(config.citation_url, "http://localhost:8080/bibtex");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
  /// Citation export base URL, without a trailing slash.
  pub citation_url: String,
  /// Search API URL.
  pub search_url:   String,
  /// Value of the `User-Agent` header sent with every request.
  pub user_agent:   String,
  /// Per-request timeout.
  pub timeout:      Duration,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      citation_url: DEFAULT_CITATION_URL.to_string(),
      search_url:   DEFAULT_SEARCH_URL.to_string(),
      user_agent:   DEFAULT_USER_AGENT.to_string(),
      timeout:      DEFAULT_TIMEOUT,
    }
  }
}

impl ClientConfig {
  /// Overrides the citation export base URL.
  pub fn with_citation_url(mut self, url: impl AsRef<str>) -> Self {
    self.citation_url = url.as_ref().trim_end_matches('/').to_string();
    self
  }

  /// Overrides the search API URL.
  pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
    self.search_url = url.into();
    self
  }

  /// Overrides the user agent.
  pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = user_agent.into();
    self
  }

  /// Overrides the per-request timeout.
  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }

  /// Builds the export URL for an already-normalized identifier.
  ///
  /// The identifier is split on `/` (old-style ids such as `hep-th/9901001` span two segments)
  /// and every piece is percent-encoded, so `?` and `#` stay part of the path.
  ///
  /// # Errors
  ///
  /// Returns [`PaperscopeError::InvalidUrl`] if the configured base URL cannot be parsed or
  /// cannot carry a path.
  pub fn citation_endpoint(&self, identifier: &PaperIdentifier) -> Result<Url, PaperscopeError> {
    let mut url = Url::parse(&self.citation_url)?;
    url
      .path_segments_mut()
      .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
      .pop_if_empty()
      .extend(identifier.as_str().split('/'));
    Ok(url)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert!(config.user_agent.starts_with("Mozilla/5.0"));
    assert_eq!(
      config.citation_endpoint(&PaperIdentifier::new("2301.12345")).unwrap().as_str(),
      "https://export.arxiv.org/bibtex/2301.12345"
    );
  }

  #[test]
  fn test_identifier_stays_in_the_path() {
    let config = ClientConfig::default();

    let url = config.citation_endpoint(&PaperIdentifier::new("2301.12345#frag")).unwrap();
    assert_eq!(url.as_str(), "https://export.arxiv.org/bibtex/2301.12345%23frag");
    assert!(url.fragment().is_none());

    let url = config.citation_endpoint(&PaperIdentifier::new("2301.12345?x=1")).unwrap();
    assert_eq!(url.as_str(), "https://export.arxiv.org/bibtex/2301.12345%3Fx=1");
    assert!(url.query().is_none());

    let url = config.citation_endpoint(&PaperIdentifier::new("2301 12345")).unwrap();
    assert_eq!(url.path(), "/bibtex/2301%2012345");
  }

  #[test]
  fn test_unusable_base_url_is_an_error() {
    let config = ClientConfig::default().with_citation_url("not a url");
    assert!(matches!(
      config.citation_endpoint(&PaperIdentifier::new("2301.12345")),
      Err(PaperscopeError::InvalidUrl(_))
    ));
    let config = ClientConfig::default().with_citation_url("mailto:someone@example.com");
    assert!(config.citation_endpoint(&PaperIdentifier::new("2301.12345")).is_err());
  }

  #[test]
  fn test_trailing_slash_is_trimmed() {
    let config = ClientConfig::default().with_citation_url("http://127.0.0.1:1234/bibtex///");
    assert_eq!(
      config.citation_endpoint(&PaperIdentifier::new("hep-th/9901001")).unwrap().as_str(),
      "http://127.0.0.1:1234/bibtex/hep-th/9901001"
    );
  }
}
