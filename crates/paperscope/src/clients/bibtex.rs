//! Client for the arXiv BibTeX export endpoint.
//!
//! A lookup normalizes the identifier, issues exactly one GET with a browser-like user agent and
//! a bounded timeout, and hands a 200 response body to
//! [`extract_citation`](crate::citation::extract::extract_citation). There is no retry and no
//! caching; every failure is folded into the returned [`FetchOutcome`].
//!
//! # Examples
//!
//! ```no_run
//! use paperscope::{clients::CitationClient, FetchOutcome, PaperIdentifier};
//!
//! # async fn example() {
//! let client = CitationClient::new();
//! match client.fetch_citation(&PaperIdentifier::new("2301.07041v1")).await {
//!   FetchOutcome::Success(record) => println!("{}", record.text()),
//!   other => println!("lookup failed: {}", other.status_description()),
//! }
//! # }
//! ```

use url::Url;

use crate::citation::extract::extract_citation;

use super::*;

/// Client for retrieving citation records.
pub struct CitationClient {
  /// Internal web client used to connect to the endpoint.
  client: reqwest::Client,
  /// Endpoint, user agent and timeout.
  config: ClientConfig,
}

impl CitationClient {
  /// Creates a client for the public export endpoint with a 10 second timeout.
  pub fn new() -> Self { Self::with_config(ClientConfig::default()) }

  /// Creates a client with custom settings.
  pub fn with_config(config: ClientConfig) -> Self {
    Self { client: reqwest::Client::new(), config }
  }

  /// The settings this client uses.
  pub fn config(&self) -> &ClientConfig { &self.config }

  /// Looks up the citation record for `identifier`.
  ///
  /// Any version suffix is removed before the request is built. This never returns an error:
  /// transport failures and non-200 responses become [`FetchOutcome::TransportError`], pages
  /// without a record become [`FetchOutcome::NotFound`].
  pub async fn fetch_citation(&self, identifier: &PaperIdentifier) -> FetchOutcome {
    let canonical = identifier.normalized();
    let url = match self.config.citation_endpoint(&canonical) {
      Ok(url) => url,
      Err(e) => {
        warn!("Cannot build citation URL from {}: {e}", self.config.citation_url);
        return FetchOutcome::TransportError(TransportFailure::Request(e.to_string()));
      },
    };

    debug!("Fetching citation for {identifier} via: {url}");

    let body = match self.fetch_page(url).await {
      Ok(body) => body,
      Err(failure) => {
        warn!("Citation request for {canonical} failed: {failure}");
        return FetchOutcome::TransportError(failure);
      },
    };

    let outcome = FetchOutcome::from_extraction(extract_citation(&body));
    match &outcome {
      FetchOutcome::NotFound(reason) => warn!("No citation record for {canonical}: {reason}"),
      _ => debug!("Citation for {canonical}: {}", outcome.status_description()),
    }
    outcome
  }

  /// Performs the GET and returns the body of a 200 response.
  async fn fetch_page(&self, url: Url) -> Result<String, TransportFailure> {
    let response = self
      .client
      .get(url)
      .header(USER_AGENT, &self.config.user_agent)
      .timeout(self.config.timeout)
      .send()
      .await?;

    let status = response.status();
    if status != StatusCode::OK {
      return Err(TransportFailure::Status(status.as_u16()));
    }

    let body = response.text().await?;
    trace!("Citation page: {body}");
    Ok(body)
  }
}

impl Default for CitationClient {
  fn default() -> Self { Self::new() }
}
