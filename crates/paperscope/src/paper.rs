//! Paper metadata returned by a search, and the search request itself.
//!
//! # Examples
//!
//! ```no_run
//! use paperscope::{Paper, SearchQuery};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let papers: Vec<Paper> = paperscope::search(&SearchQuery::new("diffusion models")).await?;
//! for paper in &papers {
//!   println!("{} ({})", paper.title, paper.identifier);
//! }
//! # Ok(())
//! # }
//! ```

use super::*;

/// Keyword used when the caller does not provide one.
pub const DEFAULT_QUERY: &str = "Artificial Intelligence";

/// Default number of results per search.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Smallest number of results a search may request.
pub const MIN_RESULTS: usize = 10;

/// Largest number of results a search may request.
pub const MAX_RESULTS: usize = 100;

/// Represents an author of an academic paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
  /// The author's full name
  pub name: String,
}

/// A paper from the search API with the metadata the analyses use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
  /// The arXiv identifier, including its version suffix
  pub identifier:       PaperIdentifier,
  /// The paper's title, whitespace collapsed
  pub title:            String,
  /// List of the paper's authors, in listed order
  pub authors:          Vec<Author>,
  /// The paper's abstract text
  pub abstract_text:    String,
  /// When the first version was submitted
  pub publication_date: DateTime<Utc>,
  /// Primary subject category (e.g. "cs.LG"), if the feed provided one
  pub primary_category: Option<String>,
  /// Canonical abstract page link
  pub link:             String,
  /// Link to the PDF
  pub pdf_url:          String,
}

impl Paper {
  /// Author names joined with ", ".
  pub fn author_names(&self) -> String {
    self.authors.iter().map(|a| a.name.as_str()).collect::<Vec<_>>().join(", ")
  }
}

/// A keyword search for the newest papers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
  /// Free-text keyword(s) matched against all fields
  pub keyword:     String,
  /// Number of papers to request, within [`MIN_RESULTS`]..=[`MAX_RESULTS`]
  pub max_results: usize,
}

impl SearchQuery {
  /// Creates a query for `keyword` with the default result count.
  ///
  /// A blank keyword falls back to [`DEFAULT_QUERY`].
  pub fn new(keyword: impl Into<String>) -> Self {
    let keyword = keyword.into();
    let keyword = if keyword.trim().is_empty() { DEFAULT_QUERY.to_string() } else { keyword };
    Self { keyword, max_results: DEFAULT_MAX_RESULTS }
  }

  /// Sets the result count, clamped to the supported range.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results.clamp(MIN_RESULTS, MAX_RESULTS);
    self
  }
}

impl Default for SearchQuery {
  fn default() -> Self { Self::new(DEFAULT_QUERY) }
}
