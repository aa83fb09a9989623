//! Citation records and the outcome of a citation lookup.
//!
//! A lookup is a single HTTP request followed by extraction (see [`extract`]). Every possible
//! result is represented by [`FetchOutcome`], so callers never have to handle an `Err`:
//!
//! ```
//! use paperscope::citation::{extract::extract_citation, FetchOutcome};
//!
//! let page = r#"<div id="bibtex">@misc{key, title={A {Nested} Title}}</div>"#;
//! let outcome = FetchOutcome::from_extraction(extract_citation(page));
//!
//! assert_eq!(outcome.status_description(), "structured source");
//! assert_eq!(outcome.record().unwrap().text(), "@misc{key, title={A {Nested} Title}}");
//! ```

use super::*;

pub mod extract;

/// Where in the page a citation record was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscoveryMethod {
  /// The dedicated `#bibtex` container element.
  Structured,
  /// The balanced-brace scan over the page's visible text.
  TextScan,
}

impl fmt::Display for DiscoveryMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DiscoveryMethod::Structured => write!(f, "structured source"),
      DiscoveryMethod::TextScan => write!(f, "text-scan source"),
    }
  }
}

/// A brace-balanced BibTeX block together with how it was discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationRecord {
  /// The raw record text, starting at `@`.
  text:   String,
  /// How the record was located.
  method: DiscoveryMethod,
}

impl CitationRecord {
  /// Creates a record from its text and discovery method.
  pub fn new(text: impl Into<String>, method: DiscoveryMethod) -> Self {
    Self { text: text.into(), method }
  }

  /// The raw record text.
  pub fn text(&self) -> &str { &self.text }

  /// How the record was located.
  pub fn method(&self) -> DiscoveryMethod { self.method }
}

/// Why a successfully fetched page yielded no citation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotFoundReason {
  /// The page text contains no `@` marker.
  NoMarker,
  /// A marker exists but the braces after it never balance (or never open).
  NoBalancedBlock,
}

impl fmt::Display for NotFoundReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      NotFoundReason::NoMarker => write!(f, "no citation marker found"),
      NotFoundReason::NoBalancedBlock => write!(f, "citation marker found but braces never balance"),
    }
  }
}

/// Why the citation page could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportFailure {
  /// The server answered with a status other than 200.
  Status(u16),
  /// The request did not complete within the configured timeout.
  Timeout(String),
  /// Any other transport-level failure (DNS, refused connection, TLS, broken body).
  Request(String),
}

impl fmt::Display for TransportFailure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TransportFailure::Status(code) => write!(f, "HTTP error {code}"),
      TransportFailure::Timeout(message) => write!(f, "transport error timeout: {message}"),
      TransportFailure::Request(message) => write!(f, "transport error {message}"),
    }
  }
}

impl From<reqwest::Error> for TransportFailure {
  fn from(error: reqwest::Error) -> Self {
    if error.is_timeout() {
      TransportFailure::Timeout(error.to_string())
    } else {
      TransportFailure::Request(error.to_string())
    }
  }
}

/// The result of a single citation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchOutcome {
  /// A record was found.
  Success(CitationRecord),
  /// The page was retrieved but contained no extractable record.
  NotFound(NotFoundReason),
  /// The page could not be retrieved.
  TransportError(TransportFailure),
}

impl FetchOutcome {
  /// Converts the extractor's result into an outcome.
  pub fn from_extraction(result: Result<CitationRecord, NotFoundReason>) -> Self {
    match result {
      Ok(record) => FetchOutcome::Success(record),
      Err(reason) => FetchOutcome::NotFound(reason),
    }
  }

  /// The record, if the lookup succeeded.
  pub fn record(&self) -> Option<&CitationRecord> {
    match self {
      FetchOutcome::Success(record) => Some(record),
      _ => None,
    }
  }

  /// Whether the lookup produced a record.
  pub fn is_success(&self) -> bool { matches!(self, FetchOutcome::Success(_)) }

  /// A short human-readable description of the outcome.
  ///
  /// One of `structured source`, `text-scan source`, `format not found (<reason>)`,
  /// `HTTP error <code>`, or `transport error <message>`.
  pub fn status_description(&self) -> String {
    match self {
      FetchOutcome::Success(record) => record.method.to_string(),
      FetchOutcome::NotFound(reason) => format!("format not found ({reason})"),
      FetchOutcome::TransportError(failure) => failure.to_string(),
    }
  }

  /// Splits the outcome into the record text (if any) and its status description.
  pub fn into_parts(self) -> (Option<String>, String) {
    let description = self.status_description();
    match self {
      FetchOutcome::Success(record) => (Some(record.text), description),
      _ => (None, description),
    }
  }
}
