//! Aggregates over a search result set.
//!
//! These are plain counts meant to be printed or handed to a charting tool:
//! - [`publication_trend`] - papers per submission day
//! - [`keyword_frequency`] - most frequent title words
//! - [`abstract_sentiment`] - lexicon-based polarity of each abstract
//! - [`coauthor_network`] - authors and how often each pair wrote together
//!
//! All functions are deterministic: ties are broken alphabetically.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use vader_sentiment::SentimentIntensityAnalyzer;

use super::*;

/// Words that carry no topical signal in paper titles.
const STOP_WORDS: &[&str] = &[
  "a", "about", "across", "after", "all", "an", "and", "are", "as", "at", "based", "be", "beyond",
  "by", "can", "do", "does", "for", "from", "how", "in", "into", "is", "it", "its", "large",
  "learning", "model", "models", "new", "not", "of", "on", "or", "our", "over", "the", "their",
  "this", "to", "towards", "under", "using", "via", "vs", "we", "what", "when", "which", "with",
  "without",
];

/// Shortest token counted as a keyword.
const MIN_KEYWORD_LEN: usize = 3;

/// Number of papers submitted on each day, oldest first.
pub fn publication_trend(papers: &[Paper]) -> Vec<(NaiveDate, usize)> {
  let mut counts = BTreeMap::new();
  for paper in papers {
    *counts.entry(paper.publication_date.date_naive()).or_insert(0) += 1;
  }
  counts.into_iter().collect()
}

/// The `top` most frequent keywords across all titles, most frequent first.
///
/// Titles are lowercased and split on anything that is not alphanumeric or `-`; stop words and
/// tokens shorter than three characters are dropped.
pub fn keyword_frequency(papers: &[Paper], top: usize) -> Vec<(String, usize)> {
  let mut counts: BTreeMap<String, usize> = BTreeMap::new();
  for paper in papers {
    for token in tokenize(&paper.title) {
      *counts.entry(token).or_insert(0) += 1;
    }
  }

  let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
  // BTreeMap order already sorts words; a stable sort keeps it for equal counts
  ranked.sort_by(|a, b| b.1.cmp(&a.1));
  ranked.truncate(top);
  ranked
}

/// Splits a title into lowercase keyword tokens.
fn tokenize(title: &str) -> impl Iterator<Item = String> + '_ {
  title
    .split(|c: char| !(c.is_alphanumeric() || c == '-'))
    .map(|token| token.trim_matches('-').to_lowercase())
    .filter(|token| token.chars().count() >= MIN_KEYWORD_LEN)
    .filter(|token| !token.chars().all(|c| c.is_ascii_digit()))
    .filter(|token| !STOP_WORDS.contains(&token.as_str()))
}

/// Compound scores within this distance of zero count as neutral.
const NEUTRAL_BAND: f64 = 0.05;

/// Coarse sentiment class of an abstract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
  /// Compound score of at least `0.05`.
  Positive,
  /// Compound score strictly between `-0.05` and `0.05`.
  Neutral,
  /// Compound score of at most `-0.05`.
  Negative,
}

impl Polarity {
  /// Classifies a compound score in `-1.0..=1.0`.
  pub fn from_score(score: f64) -> Self {
    if score >= NEUTRAL_BAND {
      Polarity::Positive
    } else if score <= -NEUTRAL_BAND {
      Polarity::Negative
    } else {
      Polarity::Neutral
    }
  }
}

impl fmt::Display for Polarity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Polarity::Positive => write!(f, "positive"),
      Polarity::Neutral => write!(f, "neutral"),
      Polarity::Negative => write!(f, "negative"),
    }
  }
}

/// Sentiment of one paper's abstract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbstractSentiment {
  /// The paper the abstract belongs to.
  pub identifier: PaperIdentifier,
  /// VADER compound score, from `-1.0` (negative) to `1.0` (positive).
  pub score:      f64,
  /// Class derived from `score`.
  pub polarity:   Polarity,
}

/// Counts per polarity class plus the mean compound score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
  /// Abstracts classed as positive.
  pub positive:   usize,
  /// Abstracts classed as neutral.
  pub neutral:    usize,
  /// Abstracts classed as negative.
  pub negative:   usize,
  /// Mean compound score, `0.0` for an empty set.
  pub mean_score: f64,
}

/// Scores every abstract with the VADER lexicon, in input order.
///
/// Empty abstracts score `0.0`.
pub fn abstract_sentiment(papers: &[Paper]) -> Vec<AbstractSentiment> {
  let analyzer = SentimentIntensityAnalyzer::new();
  papers
    .iter()
    .map(|paper| {
      let score = if paper.abstract_text.trim().is_empty() {
        0.0
      } else {
        analyzer.polarity_scores(&paper.abstract_text).get("compound").copied().unwrap_or(0.0)
      };
      AbstractSentiment {
        identifier: paper.identifier.clone(),
        score,
        polarity: Polarity::from_score(score),
      }
    })
    .collect()
}

/// Summarizes the output of [`abstract_sentiment`].
pub fn sentiment_summary(sentiments: &[AbstractSentiment]) -> SentimentSummary {
  let mut summary = SentimentSummary::default();
  for sentiment in sentiments {
    match sentiment.polarity {
      Polarity::Positive => summary.positive += 1,
      Polarity::Neutral => summary.neutral += 1,
      Polarity::Negative => summary.negative += 1,
    }
  }
  if !sentiments.is_empty() {
    summary.mean_score =
      sentiments.iter().map(|s| s.score).sum::<f64>() / sentiments.len() as f64;
  }
  summary
}

/// An undirected co-authorship edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaboration {
  /// The alphabetically smaller author name.
  pub first:  String,
  /// The alphabetically larger author name.
  pub second: String,
  /// Number of papers the two share.
  pub papers: usize,
}

/// Authors and their collaborations within a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoauthorNetwork {
  /// Every author with their paper count, sorted by name.
  pub authors: Vec<(String, usize)>,
  /// Every co-authoring pair, strongest first.
  pub edges:   Vec<Collaboration>,
}

impl CoauthorNetwork {
  /// The `top` strongest collaborations.
  pub fn strongest(&self, top: usize) -> &[Collaboration] {
    &self.edges[..top.min(self.edges.len())]
  }

  /// Authors without any co-author in the result set.
  pub fn solo_authors(&self) -> Vec<&str> {
    let connected: BTreeSet<&str> = self
      .edges
      .iter()
      .flat_map(|edge| [edge.first.as_str(), edge.second.as_str()])
      .collect();
    self
      .authors
      .iter()
      .map(|(name, _)| name.as_str())
      .filter(|name| !connected.contains(name))
      .collect()
  }
}

/// Builds the co-authorship network of `papers`.
///
/// Each unordered author pair is counted once per paper; an author listed twice on the same
/// paper is counted once.
pub fn coauthor_network(papers: &[Paper]) -> CoauthorNetwork {
  let mut authors: BTreeMap<String, usize> = BTreeMap::new();
  let mut pairs: BTreeMap<(String, String), usize> = BTreeMap::new();

  for paper in papers {
    let names: BTreeSet<&str> =
      paper.authors.iter().map(|a| a.name.trim()).filter(|name| !name.is_empty()).collect();
    let names: Vec<&str> = names.into_iter().collect();

    for (i, first) in names.iter().enumerate() {
      *authors.entry(first.to_string()).or_insert(0) += 1;
      for second in &names[i + 1..] {
        *pairs.entry((first.to_string(), second.to_string())).or_insert(0) += 1;
      }
    }
  }

  let mut edges: Vec<Collaboration> = pairs
    .into_iter()
    .map(|((first, second), papers)| Collaboration { first, second, papers })
    .collect();
  edges.sort_by(|a, b| b.papers.cmp(&a.papers));

  trace!("Co-author network: {} authors, {} edges", authors.len(), edges.len());
  CoauthorNetwork { authors: authors.into_iter().collect(), edges }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn paper(title: &str, day: u32, authors: &[&str]) -> Paper {
    Paper {
      identifier:       PaperIdentifier::new(format!("2301.{day:05}v1")),
      title:            title.to_string(),
      authors:          authors.iter().map(|name| Author { name: name.to_string() }).collect(),
      abstract_text:    String::new(),
      publication_date: Utc.with_ymd_and_hms(2023, 1, day, 12, 0, 0).unwrap(),
      primary_category: None,
      link:             String::new(),
      pdf_url:          String::new(),
    }
  }

  #[test]
  fn test_publication_trend_counts_per_day() {
    let papers = vec![
      paper("A", 3, &[]),
      paper("B", 1, &[]),
      paper("C", 3, &[]),
      paper("D", 2, &[]),
    ];
    let trend = publication_trend(&papers);
    let expected: Vec<(NaiveDate, usize)> = vec![
      (NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), 1),
      (NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(), 1),
      (NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(), 2),
    ];
    assert_eq!(trend, expected);
    assert!(publication_trend(&[]).is_empty());
  }

  #[test]
  fn test_keyword_frequency() {
    let papers = vec![
      paper("Graph Neural Networks for Protein Folding", 1, &[]),
      paper("Scaling graph transformers: a study", 2, &[]),
      paper("Protein language models in 2023", 3, &[]),
    ];
    let keywords = keyword_frequency(&papers, 3);
    let expected = [("graph", 2), ("protein", 2), ("folding", 1)];
    assert_eq!(keywords.len(), expected.len());
    for ((word, count), (expected_word, expected_count)) in keywords.iter().zip(expected) {
      assert_eq!((word.as_str(), *count), (expected_word, expected_count));
    }

    let all = keyword_frequency(&papers, usize::MAX);
    let words: Vec<&str> = all.iter().map(|(w, _)| w.as_str()).collect();
    assert!(!words.contains(&"for"));
    assert!(!words.contains(&"models"));
    assert!(!words.contains(&"2023"));
    assert!(!words.contains(&"a"));
  }

  #[test]
  fn test_tokenize_keeps_hyphenated_words() {
    let tokens: Vec<String> = tokenize("Self-Supervised Pre-Training, -- Revisited!").collect();
    assert_eq!(tokens, vec!["self-supervised", "pre-training", "revisited"]);
  }

  #[test]
  fn test_polarity_bands() {
    assert_eq!(Polarity::from_score(0.8), Polarity::Positive);
    assert_eq!(Polarity::from_score(0.05), Polarity::Positive);
    assert_eq!(Polarity::from_score(0.0), Polarity::Neutral);
    assert_eq!(Polarity::from_score(-0.049), Polarity::Neutral);
    assert_eq!(Polarity::from_score(-0.5), Polarity::Negative);
    assert_eq!(Polarity::Negative.to_string(), "negative");
  }

  #[test]
  fn test_abstract_sentiment() {
    let mut papers = vec![paper("A", 1, &[]), paper("B", 2, &[]), paper("C", 3, &[])];
    papers[0].abstract_text = "An excellent, great and wonderful result.".to_string();
    papers[1].abstract_text = "The results are terrible, awful and disappointing.".to_string();

    let sentiments = abstract_sentiment(&papers);
    assert_eq!(sentiments.len(), 3);
    assert_eq!(sentiments[0].identifier, papers[0].identifier);
    assert_eq!(sentiments[0].polarity, Polarity::Positive);
    assert!(sentiments[0].score > 0.5);
    assert_eq!(sentiments[1].polarity, Polarity::Negative);
    assert!(sentiments[1].score < -0.5);
    assert_eq!(sentiments[2].score, 0.0);
    assert_eq!(sentiments[2].polarity, Polarity::Neutral);

    let summary = sentiment_summary(&sentiments);
    assert_eq!((summary.positive, summary.neutral, summary.negative), (1, 1, 1));
    let mean = (sentiments[0].score + sentiments[1].score) / 3.0;
    assert!((summary.mean_score - mean).abs() < 1e-9);

    assert_eq!(sentiment_summary(&[]), SentimentSummary::default());
  }

  #[test]
  fn test_coauthor_network() {
    let papers = vec![
      paper("A", 1, &["Alice", "Bob", "Carol"]),
      paper("B", 2, &["Bob", "Alice"]),
      paper("C", 3, &["Dave"]),
      paper("D", 4, &["Erin", "Erin"]),
    ];
    let network = coauthor_network(&papers);

    assert_eq!(network.authors, vec![
      ("Alice".to_string(), 2),
      ("Bob".to_string(), 2),
      ("Carol".to_string(), 1),
      ("Dave".to_string(), 1),
      ("Erin".to_string(), 1),
    ]);
    assert_eq!(network.edges.len(), 3);
    assert_eq!(network.edges[0], Collaboration {
      first:  "Alice".to_string(),
      second: "Bob".to_string(),
      papers: 2,
    });
    assert_eq!(network.strongest(1).len(), 1);
    assert_eq!(network.strongest(10).len(), 3);
    assert_eq!(network.solo_authors(), vec!["Dave", "Erin"]);
  }
}
