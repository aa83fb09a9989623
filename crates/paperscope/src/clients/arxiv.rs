//! Client for the arXiv Atom search API.
//!
//! Searches are keyword queries over all fields, sorted by submission date with the newest
//! first. Each `<entry>` of the response feed becomes a [`Paper`].
//!
//! # Examples
//!
//! ```no_run
//! use paperscope::{clients::ArxivClient, SearchQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new();
//! let papers = client.search(&SearchQuery::new("quantum error correction").with_max_results(50)).await?;
//!
//! println!("Fetched {} papers", papers.len());
//! # Ok(())
//! # }
//! ```

use lazy_static::lazy_static;
use quick_xml::de::from_str;
use regex::Regex;

use super::*;

lazy_static! {
  /// A field qualifier of the arXiv query syntax, such as `ti:` or `au:`.
  static ref FIELD_PREFIX: Regex = Regex::new(r"\b(ti|au|abs|co|jr|cat|rn|id|all):").unwrap();
}

/// Internal representation of the arXiv API's Atom feed response.
#[derive(Debug, Deserialize)]
struct Feed {
  /// Zero or more matching entries
  #[serde(rename = "entry", default)]
  entries: Vec<Entry>,
}

/// Internal representation of a paper entry from arXiv's API response.
#[derive(Debug, Deserialize)]
struct Entry {
  /// Abstract page URL (e.g., "http://arxiv.org/abs/2301.07041v1")
  id:               String,
  /// Paper title (may contain line breaks)
  title:            String,
  /// List of paper authors
  #[serde(rename = "author", default)]
  authors:          Vec<FeedAuthor>,
  /// Paper abstract
  summary:          String,
  /// Submission date of the first version
  published:        DateTime<Utc>,
  /// Primary subject classification
  #[serde(rename = "arxiv:primary_category", alias = "primary_category", default)]
  primary_category: Option<Category>,
}

/// Internal representation of an author from arXiv's API response.
#[derive(Debug, Deserialize)]
struct FeedAuthor {
  /// Author's full name
  name: String,
}

/// A category element; only the `term` attribute carries data.
#[derive(Debug, Deserialize)]
struct Category {
  /// Category code such as "cs.LG"
  #[serde(rename = "@term")]
  term: String,
}

/// Client for searching arXiv.
///
/// The underlying [`reqwest::Client`] is reused for every request made through the same
/// instance.
pub struct ArxivClient {
  /// Internal web client used to connect to the API.
  client: reqwest::Client,
  /// Endpoint, user agent and timeout.
  config: ClientConfig,
}

impl ArxivClient {
  /// Creates a client for the public arXiv API.
  pub fn new() -> Self { Self::with_config(ClientConfig::default()) }

  /// Creates a client with custom settings.
  pub fn with_config(config: ClientConfig) -> Self {
    Self { client: reqwest::Client::new(), config }
  }

  /// Fetches the newest papers matching `query`.
  ///
  /// # Errors
  ///
  /// This function will return an error if:
  /// - The network request fails or times out
  /// - The API answers with a non-success status
  /// - The Atom feed cannot be parsed
  pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Paper>, PaperscopeError> {
    let max_results = query.max_results.to_string();
    let search_query = search_expression(&query.keyword);
    let params = [
      ("search_query", search_query.as_str()),
      ("start", "0"),
      ("max_results", max_results.as_str()),
      ("sortBy", "submittedDate"),
      ("sortOrder", "descending"),
    ];

    debug!("Searching arXiv at {} for {:?}", self.config.search_url, query.keyword);

    let response = self
      .client
      .get(&self.config.search_url)
      .query(&params)
      .header(USER_AGENT, &self.config.user_agent)
      .timeout(self.config.timeout)
      .send()
      .await?;

    let status = response.status();
    if status != StatusCode::OK {
      warn!("arXiv search returned status {status}");
      return Err(PaperscopeError::ApiError(format!("search returned HTTP {}", status.as_u16())));
    }

    let body = response.text().await?;
    trace!("arXiv response: {body}");

    let papers = parse_feed(&body)?;
    debug!("arXiv returned {} papers for {:?}", papers.len(), query.keyword);
    Ok(papers)
  }
}

impl Default for ArxivClient {
  fn default() -> Self { Self::new() }
}

/// Turns a keyword into an arXiv `search_query` value.
///
/// Plain keywords are searched across all fields. Input that already uses field qualifiers
/// (`ti:graph AND au:doe`) is passed through unchanged.
fn search_expression(keyword: &str) -> String {
  let keyword = keyword.trim();
  if FIELD_PREFIX.is_match(keyword) {
    keyword.to_string()
  } else {
    format!("all:{keyword}")
  }
}

/// Parses an Atom feed body into papers, skipping entries without an abstract-page id.
fn parse_feed(body: &str) -> Result<Vec<Paper>, PaperscopeError> {
  let feed: Feed = from_str(body)
    .map_err(|e| PaperscopeError::ApiError(format!("Failed to parse XML: {}", e)))?;

  let papers = feed
    .entries
    .into_iter()
    .filter_map(|entry| {
      let Some(identifier) = crate::identifier::from_entry_id(&entry.id) else {
        warn!("Skipping entry with unexpected id: {}", entry.id);
        return None;
      };
      let link = entry.id.trim().to_string();
      // Convert arXiv URL to PDF URL (just need to change /abs/ to /pdf/)
      let pdf_url = link.replace("/abs/", "/pdf/");

      Some(Paper {
        identifier,
        title: collapse_whitespace(&entry.title),
        authors: entry
          .authors
          .into_iter()
          .map(|author| Author { name: collapse_whitespace(&author.name) })
          .collect(),
        abstract_text: collapse_whitespace(&entry.summary),
        publication_date: entry.published,
        primary_category: entry.primary_category.map(|category| category.term),
        link,
        pdf_url,
      })
    })
    .collect();

  Ok(papers)
}

/// Joins all whitespace-separated words with single spaces.
fn collapse_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}
