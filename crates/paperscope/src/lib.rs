//! A library for exploring recent arXiv papers and retrieving their BibTeX citation records.
//!
//! The crate covers three concerns:
//! - searching the arXiv API and holding the results in a caller-owned [`Session`],
//! - computing simple aggregates over the results ([`analysis`]) and exporting them ([`export`]),
//! - fetching citation records from the arXiv BibTeX export endpoint ([`citation`]).
//!
//! Citation lookups never fail with an `Err`: every outcome, including transport failures, is a
//! value of [`FetchOutcome`].
//!
//! # Example
//! ```rust,no_run
//! use paperscope::{fetch_citation, PaperIdentifier};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!   let identifier: PaperIdentifier = "2301.07041v2".parse()?;
//!   let outcome = fetch_citation(&identifier).await;
//!   println!("{}", outcome.status_description());
//!
//!   Ok(())
//! }
//! ```

#![warn(missing_docs, clippy::missing_docs_in_private_items)]
use std::{fmt, str::FromStr, time::Duration};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod analysis;
pub mod citation;
pub mod clients;
pub mod config;
pub mod errors;
pub mod export;
pub mod identifier;
pub mod paper;
pub mod session;

pub use citation::{
  CitationRecord, DiscoveryMethod, FetchOutcome, NotFoundReason, TransportFailure,
};
use clients::{arxiv::ArxivClient, bibtex::CitationClient};
pub use config::ClientConfig;
pub use errors::PaperscopeError;
pub use identifier::{normalize_identifier, PaperIdentifier};
pub use paper::{Author, Paper, SearchQuery};
pub use session::{LookupTicket, Session};

/// Fetches the citation record for `identifier` using the default [`CitationClient`].
///
/// The identifier is normalized (version suffix removed) before the request is built. This is a
/// convenience wrapper; construct a [`CitationClient`] directly to control the endpoint, user
/// agent, or timeout.
pub async fn fetch_citation(identifier: &PaperIdentifier) -> FetchOutcome {
  CitationClient::new().fetch_citation(identifier).await
}

/// Searches arXiv for the newest papers matching `query` using the default [`ArxivClient`].
pub async fn search(query: &SearchQuery) -> Result<Vec<Paper>, PaperscopeError> {
  ArxivClient::new().search(query).await
}
