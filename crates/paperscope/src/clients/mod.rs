//! HTTP clients for the two arXiv endpoints the library talks to.
//!
//! - [`arxiv`] - keyword search over the Atom API, producing [`Paper`]s
//! - [`bibtex`] - citation record lookup on the BibTeX export endpoint, producing a
//!   [`FetchOutcome`]
//!
//! Both clients are configured through [`ClientConfig`], so tests and alternative deployments can
//! point them at a different host.
//!
//! # Examples
//!
//! ```no_run
//! use paperscope::{
//!   clients::{ArxivClient, CitationClient},
//!   SearchQuery,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let papers = ArxivClient::new().search(&SearchQuery::new("zero knowledge")).await?;
//!
//! if let Some(paper) = papers.first() {
//!   let outcome = CitationClient::new().fetch_citation(&paper.identifier).await;
//!   println!("{}", outcome.status_description());
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::{header::USER_AGENT, StatusCode};

pub mod arxiv;
pub mod bibtex;

pub use arxiv::ArxivClient;
pub use bibtex::CitationClient;

use super::*;
