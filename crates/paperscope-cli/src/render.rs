//! Plain-text views printed by the commands and the interactive menu.

use std::fmt::Display;

use console::{style, Emoji};
use paperscope::{
  analysis::{AbstractSentiment, CoauthorNetwork, Polarity, SentimentSummary},
  FetchOutcome, Paper, PaperIdentifier,
};

pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
pub static BOOKS: Emoji<'_, '_> = Emoji("📚 ", "");
pub static CHART: Emoji<'_, '_> = Emoji("📈 ", "");
pub static PAPER: Emoji<'_, '_> = Emoji("📄 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠️  ", "");
pub static SUCCESS: Emoji<'_, '_> = Emoji("✨ ", "");

/// Abstract previews are cut after this many characters.
const PREVIEW_CHARS: usize = 100;

pub fn print_papers(papers: &[Paper]) {
  if papers.is_empty() {
    println!("{} No papers found", style(WARNING).yellow());
    return;
  }

  println!("\n{} Found {} papers:", style(SUCCESS).green(), style(papers.len()).yellow());
  for (i, paper) in papers.iter().enumerate() {
    println!("\n{}. {}", style(i + 1).yellow(), style(&paper.title).white().bold());

    let authors = if paper.authors.is_empty() {
      style("No authors listed".to_string()).red().italic()
    } else {
      style(paper.author_names()).white()
    };
    println!("   {} {}", style("Authors:").green(), authors);
    println!(
      "   {} {}  {} {}",
      style("Published:").green(),
      style(paper.publication_date.format("%Y-%m-%d")).white(),
      style("ID:").green(),
      style(&paper.identifier).yellow()
    );
    if let Some(category) = &paper.primary_category {
      println!("   {} {}", style("Category:").green(), style(category).cyan());
    }
    println!("   {} {}", style("Link:").green(), style(&paper.link).blue().underlined());

    if !paper.abstract_text.is_empty() {
      let preview = paper.abstract_text.chars().take(PREVIEW_CHARS).collect::<String>();
      let preview = if paper.abstract_text.chars().count() > PREVIEW_CHARS {
        format!("{}...", preview)
      } else {
        preview
      };
      println!("   {} {}", style("Abstract:").green(), style(preview).white().italic());
    }
  }
}

pub fn print_trend<D: Display>(trend: &[(D, usize)]) {
  if trend.is_empty() {
    println!("{} No papers to chart", style(WARNING).yellow());
    return;
  }

  println!("\n{} Papers per day:", style(CHART).cyan());
  for (day, count) in trend {
    println!("   {}  {}", style(day).white(), style(count).yellow());
  }
}

pub fn print_keywords(keywords: &[(String, usize)]) {
  if keywords.is_empty() {
    println!("{} No keywords found", style(WARNING).yellow());
    return;
  }

  println!("\n{} Most frequent title keywords:", style(BOOKS).cyan());
  let width = keywords.iter().map(|(word, _)| word.chars().count()).max().unwrap_or(0);
  for (word, count) in keywords {
    println!("   {}  {}", style(format!("{word:<width$}")).white(), style(count).yellow());
  }
}

pub fn print_sentiment(sentiments: &[AbstractSentiment], summary: &SentimentSummary) {
  if sentiments.is_empty() {
    println!("{} No abstracts to score", style(WARNING).yellow());
    return;
  }

  println!(
    "\n{} Sentiment of {} abstracts: {} positive, {} neutral, {} negative (mean {:+.3})",
    style(CHART).cyan(),
    style(sentiments.len()).yellow(),
    style(summary.positive).green(),
    style(summary.neutral).white(),
    style(summary.negative).red(),
    summary.mean_score
  );
  for sentiment in sentiments {
    let polarity = match sentiment.polarity {
      Polarity::Positive => style(sentiment.polarity).green(),
      Polarity::Neutral => style(sentiment.polarity).white(),
      Polarity::Negative => style(sentiment.polarity).red(),
    };
    println!(
      "   {}  {:+.3}  {}",
      style(&sentiment.identifier).yellow(),
      sentiment.score,
      polarity
    );
  }
}

pub fn print_network(network: &CoauthorNetwork, top: usize) {
  println!(
    "\n{} {} authors, {} collaborations",
    style(BOOKS).cyan(),
    style(network.authors.len()).yellow(),
    style(network.edges.len()).yellow()
  );

  for edge in network.strongest(top) {
    println!(
      "   {} & {}  {}",
      style(&edge.first).white(),
      style(&edge.second).white(),
      style(format!("({} shared)", edge.papers)).yellow()
    );
  }

  let solo = network.solo_authors();
  if !solo.is_empty() {
    println!("   {} {}", style("Solo authors:").green(), style(solo.len()).yellow());
  }
}

pub fn print_outcome(identifier: &PaperIdentifier, outcome: &FetchOutcome) {
  match outcome {
    FetchOutcome::Success(record) => {
      println!(
        "\n{} Citation for {} ({}):\n",
        style(PAPER).green(),
        style(identifier).yellow(),
        style(outcome.status_description()).cyan()
      );
      println!("{}", record.text());
    },
    _ => {
      println!(
        "{} No citation for {}: {}",
        style(WARNING).yellow(),
        style(identifier).yellow(),
        style(outcome.status_description()).red()
      );
    },
  }
}
