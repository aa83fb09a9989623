//! Caller-owned state for an interactive exploration session.
//!
//! A [`Session`] holds the current search results and the most recent citation lookup. A new
//! search replaces the results and clears the citation; reading the results for different views
//! leaves everything untouched.
//!
//! Citation lookups follow last-write-wins: each lookup takes a [`LookupTicket`] before it starts
//! and only the newest ticket may store its outcome.
//!
//! ```
//! use paperscope::{
//!   CitationRecord, DiscoveryMethod, FetchOutcome, NotFoundReason, PaperIdentifier, Session,
//! };
//!
//! let mut session = Session::new();
//! let slow = session.begin_lookup(PaperIdentifier::new("2301.00001"));
//! let fast = session.begin_lookup(PaperIdentifier::new("2301.00002"));
//!
//! let record = CitationRecord::new("@misc{b, title={B}}", DiscoveryMethod::Structured);
//! assert!(session.complete_lookup(fast, FetchOutcome::Success(record)));
//! // The older lookup resolves late and is discarded.
//! assert!(!session.complete_lookup(slow, FetchOutcome::NotFound(NotFoundReason::NoMarker)));
//!
//! let (identifier, outcome) = session.citation().unwrap();
//! assert_eq!(identifier.as_str(), "2301.00002");
//! assert!(outcome.is_success());
//! ```

use super::*;

/// Proof that a lookup was started; consumed when the lookup completes.
#[derive(Debug, PartialEq, Eq)]
pub struct LookupTicket {
  /// Position of this lookup in the session's sequence.
  sequence:   u64,
  /// The identifier being looked up.
  identifier: PaperIdentifier,
}

impl LookupTicket {
  /// The identifier this lookup is for.
  pub fn identifier(&self) -> &PaperIdentifier { &self.identifier }
}

/// Results of the current search plus the latest citation lookup.
#[derive(Debug, Default)]
pub struct Session {
  /// Query that produced `papers`.
  query:           Option<SearchQuery>,
  /// Current dataset.
  papers:          Vec<Paper>,
  /// Sequence number handed to the most recent lookup.
  latest_sequence: u64,
  /// Latest completed lookup that was still current when it finished.
  citation:        Option<(PaperIdentifier, FetchOutcome)>,
}

impl Session {
  /// Creates an empty session.
  pub fn new() -> Self { Self::default() }

  /// Replaces the dataset with the results of a new search and clears the citation.
  ///
  /// Lookups started before the new search can no longer store their outcome.
  pub fn replace_results(&mut self, query: SearchQuery, papers: Vec<Paper>) {
    debug!("Session now holds {} papers for {:?}", papers.len(), query.keyword);
    self.query = Some(query);
    self.papers = papers;
    self.citation = None;
    self.latest_sequence += 1;
  }

  /// The query behind the current dataset, if a search has been made.
  pub fn query(&self) -> Option<&SearchQuery> { self.query.as_ref() }

  /// The current dataset.
  pub fn papers(&self) -> &[Paper] { &self.papers }

  /// Finds a paper in the current dataset by identifier, ignoring version suffixes.
  pub fn find_paper(&self, identifier: &PaperIdentifier) -> Option<&Paper> {
    let wanted = identifier.normalized();
    self.papers.iter().find(|paper| paper.identifier.normalized() == wanted)
  }

  /// Starts a lookup, superseding any lookup still in flight.
  pub fn begin_lookup(&mut self, identifier: PaperIdentifier) -> LookupTicket {
    self.latest_sequence += 1;
    LookupTicket { sequence: self.latest_sequence, identifier }
  }

  /// Stores the outcome of a lookup if it is still the newest one.
  ///
  /// Returns `false` (and drops the outcome) when a newer lookup or search has started since
  /// `ticket` was issued.
  pub fn complete_lookup(&mut self, ticket: LookupTicket, outcome: FetchOutcome) -> bool {
    if ticket.sequence != self.latest_sequence {
      debug!("Discarding stale citation lookup for {}", ticket.identifier);
      return false;
    }
    self.citation = Some((ticket.identifier, outcome));
    true
  }

  /// The latest citation lookup and its outcome.
  pub fn citation(&self) -> Option<(&PaperIdentifier, &FetchOutcome)> {
    self.citation.as_ref().map(|(identifier, outcome)| (identifier, outcome))
  }

  /// Forgets the dataset and the citation.
  pub fn clear(&mut self) {
    self.query = None;
    self.papers.clear();
    self.citation = None;
    self.latest_sequence += 1;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn paper(identifier: &str) -> Paper {
    Paper {
      identifier:       PaperIdentifier::new(identifier),
      title:            format!("Paper {identifier}"),
      authors:          vec![],
      abstract_text:    String::new(),
      publication_date: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
      primary_category: None,
      link:             String::new(),
      pdf_url:          String::new(),
    }
  }

  fn success(text: &str) -> FetchOutcome {
    FetchOutcome::Success(CitationRecord::new(text, DiscoveryMethod::Structured))
  }

  #[test]
  fn test_new_search_replaces_results_and_clears_citation() {
    let mut session = Session::new();
    session.replace_results(SearchQuery::new("first"), vec![paper("2301.00001v1")]);

    let ticket = session.begin_lookup(PaperIdentifier::new("2301.00001"));
    assert!(session.complete_lookup(ticket, success("@a{x}")));
    assert!(session.citation().is_some());

    let papers = vec![paper("2302.00002v1"), paper("2302.00003v2")];
    session.replace_results(SearchQuery::new("second"), papers);
    assert_eq!(session.papers().len(), 2);
    assert_eq!(session.query().map(|q| q.keyword.as_str()), Some("second"));
    assert!(session.citation().is_none());
  }

  #[test]
  fn test_lookup_started_before_search_is_discarded() {
    let mut session = Session::new();
    let ticket = session.begin_lookup(PaperIdentifier::new("2301.00001"));
    session.replace_results(SearchQuery::new("other"), vec![]);
    assert!(!session.complete_lookup(ticket, success("@a{x}")));
    assert!(session.citation().is_none());
  }

  #[test]
  fn test_last_lookup_wins() {
    let mut session = Session::new();
    let first = session.begin_lookup(PaperIdentifier::new("1"));
    let second = session.begin_lookup(PaperIdentifier::new("2"));
    assert!(!session.complete_lookup(first, success("@a{one}")));
    assert!(session.complete_lookup(second, success("@a{two}")));

    let third = session.begin_lookup(PaperIdentifier::new("3"));
    assert_eq!(third.identifier().as_str(), "3");
    // Until the newer lookup completes the previous result stays visible.
    assert_eq!(session.citation().unwrap().0.as_str(), "2");
    assert!(session.complete_lookup(third, FetchOutcome::NotFound(NotFoundReason::NoMarker)));
    assert!(!session.citation().unwrap().1.is_success());
  }

  #[test]
  fn test_find_paper_ignores_versions() {
    let mut session = Session::new();
    session.replace_results(SearchQuery::default(), vec![paper("2301.00001v3")]);
    assert!(session.find_paper(&PaperIdentifier::new("2301.00001")).is_some());
    assert!(session.find_paper(&PaperIdentifier::new("2301.00001v1")).is_some());
    assert!(session.find_paper(&PaperIdentifier::new("2301.00009")).is_none());

    session.clear();
    assert!(session.papers().is_empty());
    assert!(session.query().is_none());
  }
}
