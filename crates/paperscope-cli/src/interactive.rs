//! Menu-driven exploration backed by a [`Session`].
//!
//! A new search replaces the session's papers; every other view reads them without refetching.
//! A failed search or export is reported and leaves the session as it was.

use std::fmt;

use console::style;
use dialoguer::{Input, Select};
use paperscope::{
  analysis,
  clients::{ArxivClient, CitationClient},
  export,
  paper::{DEFAULT_MAX_RESULTS, DEFAULT_QUERY},
  ClientConfig, PaperIdentifier, SearchQuery, Session,
};
use tracing::{debug, warn};

use crate::{
  errors::PaperscopeCliError,
  render::{self, LOOKING_GLASS, SAVE, WARNING},
};

/// Entries of the main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
  Search,
  List,
  Trend,
  Keywords,
  Sentiment,
  Network,
  Cite,
  Export,
  Quit,
}

impl MenuAction {
  const ALL: [MenuAction; 9] = [
    MenuAction::Search,
    MenuAction::List,
    MenuAction::Trend,
    MenuAction::Keywords,
    MenuAction::Sentiment,
    MenuAction::Network,
    MenuAction::Cite,
    MenuAction::Export,
    MenuAction::Quit,
  ];

  /// Whether the action reads the current results.
  fn needs_results(self) -> bool {
    matches!(
      self,
      MenuAction::List
        | MenuAction::Trend
        | MenuAction::Keywords
        | MenuAction::Sentiment
        | MenuAction::Network
        | MenuAction::Export
    )
  }
}

impl fmt::Display for MenuAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      MenuAction::Search => "New search",
      MenuAction::List => "List papers",
      MenuAction::Trend => "Publication trend",
      MenuAction::Keywords => "Title keywords",
      MenuAction::Sentiment => "Abstract sentiment",
      MenuAction::Network => "Co-author network",
      MenuAction::Cite => "Fetch a citation",
      MenuAction::Export => "Export results",
      MenuAction::Quit => "Quit",
    };
    write!(f, "{label}")
  }
}

/// Runs the menu loop until the user quits.
pub async fn run(config: ClientConfig) -> Result<(), PaperscopeCliError> {
  let search_client = ArxivClient::with_config(config.clone());
  let citation_client = CitationClient::with_config(config);
  let mut session = Session::new();

  loop {
    let prompt = match session.query() {
      Some(query) => format!("{} papers for \"{}\"", session.papers().len(), query.keyword),
      None => "No search yet".to_string(),
    };
    let choice = Select::new()
      .with_prompt(prompt)
      .items(&MenuAction::ALL)
      .default(0)
      .interact()?;
    let action = MenuAction::ALL[choice];
    debug!("Menu action: {action:?}");

    if action.needs_results() && session.papers().is_empty() {
      println!("{} Run a search first", style(WARNING).yellow());
      continue;
    }

    match action {
      MenuAction::Search => search(&search_client, &mut session).await?,
      MenuAction::List => render::print_papers(session.papers()),
      MenuAction::Trend => render::print_trend(&analysis::publication_trend(session.papers())),
      MenuAction::Keywords =>
        render::print_keywords(&analysis::keyword_frequency(session.papers(), 15)),
      MenuAction::Sentiment => {
        let sentiments = analysis::abstract_sentiment(session.papers());
        render::print_sentiment(&sentiments, &analysis::sentiment_summary(&sentiments));
      },
      MenuAction::Network =>
        render::print_network(&analysis::coauthor_network(session.papers()), 10),
      MenuAction::Cite => cite(&citation_client, &mut session).await?,
      MenuAction::Export => export_results(&session)?,
      MenuAction::Quit => return Ok(()),
    }
  }
}

/// Prompts for a query and replaces the session's results on success.
async fn search(client: &ArxivClient, session: &mut Session) -> Result<(), PaperscopeCliError> {
  let current = session.query().map(|q| q.keyword.clone());
  let keyword: String = Input::new()
    .with_prompt("Keyword")
    .default(current.unwrap_or_else(|| DEFAULT_QUERY.to_string()))
    .interact_text()?;
  let max_results: usize = Input::new()
    .with_prompt("Number of papers (10-100)")
    .default(DEFAULT_MAX_RESULTS)
    .interact_text()?;

  let query = SearchQuery::new(keyword).with_max_results(max_results);
  println!(
    "{} Fetching the latest {} papers for: {}",
    style(LOOKING_GLASS).cyan(),
    style(query.max_results).yellow(),
    style(&query.keyword).yellow()
  );

  match client.search(&query).await {
    Ok(papers) => {
      println!("{} Fetched {} papers", style(SAVE).green(), style(papers.len()).yellow());
      session.replace_results(query, papers);
    },
    Err(e) => {
      warn!("Search failed: {e}");
      println!("{} Search failed: {}", style(WARNING).yellow(), style(e).red());
    },
  }
  Ok(())
}

/// Lets the user pick a paper (or type an identifier) and stores the lookup in the session.
async fn cite(client: &CitationClient, session: &mut Session) -> Result<(), PaperscopeCliError> {
  let identifier = match pick_identifier(session)? {
    Some(identifier) => identifier,
    None => return Ok(()),
  };

  let ticket = session.begin_lookup(identifier);
  println!(
    "{} Fetching citation for: {}",
    style(LOOKING_GLASS).cyan(),
    style(ticket.identifier().normalized()).yellow()
  );
  let outcome = client.fetch_citation(ticket.identifier()).await;
  session.complete_lookup(ticket, outcome);

  if let Some((identifier, outcome)) = session.citation() {
    render::print_outcome(identifier, outcome);
  }
  Ok(())
}

/// Returns the identifier to look up, or `None` if the input could not be parsed.
fn pick_identifier(session: &Session) -> Result<Option<PaperIdentifier>, PaperscopeCliError> {
  let manual_entry = "Enter an identifier".to_string();

  if !session.papers().is_empty() {
    let mut items: Vec<String> = session
      .papers()
      .iter()
      .map(|paper| format!("{}  {}", paper.identifier, paper.title))
      .collect();
    items.push(manual_entry);

    let choice = Select::new().with_prompt("Paper").items(&items).default(0).interact()?;
    if let Some(paper) = session.papers().get(choice) {
      return Ok(Some(paper.identifier.clone()));
    }
  }

  let input: String = Input::new().with_prompt("arXiv identifier or URL").interact_text()?;
  match input.parse::<PaperIdentifier>() {
    Ok(identifier) => Ok(Some(identifier)),
    Err(e) => {
      println!("{} {}", style(WARNING).yellow(), style(e).red());
      Ok(None)
    },
  }
}

/// Prompts for a destination and writes the current results.
fn export_results(session: &Session) -> Result<(), PaperscopeCliError> {
  let keyword = session.query().map(|q| q.keyword.as_str()).unwrap_or(DEFAULT_QUERY);
  let default_path = export::default_export_path(keyword);
  let path: String = Input::new()
    .with_prompt("Export to")
    .default(default_path.display().to_string())
    .interact_text()?;

  match export::export_to_path(session.papers(), &path) {
    Ok(()) => println!(
      "{} Saved {} papers to: {}",
      style(SAVE).green(),
      style(session.papers().len()).yellow(),
      style(&path).yellow()
    ),
    Err(e) => println!("{} Export failed: {}", style(WARNING).yellow(), style(e).red()),
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_menu_labels_are_unique() {
    let labels: Vec<String> = MenuAction::ALL.iter().map(ToString::to_string).collect();
    let mut deduped = labels.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(labels.len(), deduped.len());
  }

  #[test]
  fn test_views_need_results() {
    assert!(!MenuAction::Search.needs_results());
    assert!(!MenuAction::Cite.needs_results());
    assert!(!MenuAction::Quit.needs_results());
    assert!(MenuAction::Export.needs_results());
    assert!(MenuAction::Trend.needs_results());
    assert!(MenuAction::Sentiment.needs_results());
  }
}
