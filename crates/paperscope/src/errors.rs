//! Error types for the paperscope library.
//!
//! Citation lookups do not use this type: their failures are part of
//! [`FetchOutcome`](crate::FetchOutcome). Everything else (searching, exporting, parsing
//! identifiers) reports failures as a [`PaperscopeError`].
//!
//! # Examples
//!
//! ```no_run
//! use paperscope::{errors::PaperscopeError, SearchQuery};
//!
//! # async fn example() -> Result<(), PaperscopeError> {
//! match paperscope::search(&SearchQuery::new("graph neural networks")).await {
//!   Ok(papers) => println!("{} papers", papers.len()),
//!   Err(PaperscopeError::Network(e)) => println!("Network error: {}", e),
//!   Err(e) => println!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Errors that can occur when searching, exporting, or parsing input.
#[derive(Error, Debug)]
pub enum PaperscopeError {
  /// The provided paper identifier is empty or could not be extracted from a URL.
  #[error("Invalid identifier format")]
  InvalidIdentifier,

  /// A network request failed.
  ///
  /// This can occur when:
  /// - The network is unavailable
  /// - The server is unreachable
  /// - The request times out
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The search API answered with something other than a usable feed.
  ///
  /// The string parameter describes the status code or parse failure.
  #[error("API error: {0}")]
  ApiError(String),

  /// A configured base URL could not be parsed.
  #[error(transparent)]
  InvalidUrl(#[from] url::ParseError),

  /// A file system operation failed while exporting.
  #[error(transparent)]
  Path(#[from] std::io::Error),

  /// Serializing the dataset failed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}
