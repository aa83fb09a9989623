use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use clap::{builder::ArgAction, Args, Parser, Subcommand};
use console::style;
use errors::PaperscopeCliError;
use paperscope::{
  analysis,
  clients::{ArxivClient, CitationClient},
  config::{DEFAULT_CITATION_URL, DEFAULT_SEARCH_URL},
  export,
  paper::{DEFAULT_MAX_RESULTS, DEFAULT_QUERY},
  ClientConfig, Paper, PaperIdentifier, SearchQuery,
};
use render::{LOOKING_GLASS, SAVE, SUCCESS};
use tracing::{debug, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod errors;
mod interactive;
mod render;

#[derive(Parser)]
#[command(author, version, about = "Explore recent arXiv papers and fetch their BibTeX records")]
struct Cli {
  /// Verbose mode (-v, -vv, -vvv)
  #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase logging verbosity"
    )]
  verbose: u8,

  /// Also write logs to a `paperscope.log` file in this directory
  #[arg(long, global = true, env = "PAPERSCOPE_LOG_DIR")]
  log_dir: Option<PathBuf>,

  #[command(flatten)]
  endpoints: EndpointArgs,

  #[command(subcommand)]
  command: Commands,
}

/// Where requests go and how long they may take
#[derive(Args)]
struct EndpointArgs {
  /// Base URL of the BibTeX export endpoint
  #[arg(long, global = true, env = "PAPERSCOPE_CITATION_URL", default_value = DEFAULT_CITATION_URL)]
  citation_url: String,

  /// URL of the arXiv search API
  #[arg(long, global = true, env = "PAPERSCOPE_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
  search_url: String,

  /// Request timeout in seconds
  #[arg(long, global = true, env = "PAPERSCOPE_TIMEOUT", default_value_t = 10)]
  timeout: u64,
}

impl EndpointArgs {
  fn config(&self) -> ClientConfig {
    ClientConfig::default()
      .with_citation_url(&self.citation_url)
      .with_search_url(&self.search_url)
      .with_timeout(Duration::from_secs(self.timeout))
  }
}

/// Keyword and result count shared by every command that searches
#[derive(Args)]
struct SearchArgs {
  /// Keyword(s) to search for
  #[arg(default_value = DEFAULT_QUERY)]
  query: String,

  /// Number of papers to fetch (10-100)
  #[arg(long, short = 'n', default_value_t = DEFAULT_MAX_RESULTS)]
  max_results: usize,
}

impl SearchArgs {
  fn query(&self) -> SearchQuery {
    SearchQuery::new(&self.query).with_max_results(self.max_results)
  }
}

#[derive(Subcommand)]
enum Commands {
  /// List the newest papers matching a keyword
  Search {
    #[command(flatten)]
    search: SearchArgs,
  },
  /// Fetch the BibTeX record of a paper
  Cite {
    /// arXiv identifier or abstract URL; a version suffix is ignored
    identifier: String,
  },
  /// Count papers per submission day
  Trend {
    #[command(flatten)]
    search: SearchArgs,
  },
  /// Show the most frequent title keywords
  Keywords {
    #[command(flatten)]
    search: SearchArgs,
    /// Number of keywords to show
    #[arg(long, default_value_t = 15)]
    top:    usize,
  },
  /// Score the sentiment polarity of each abstract
  Sentiment {
    #[command(flatten)]
    search: SearchArgs,
  },
  /// Show the strongest co-author pairs
  Network {
    #[command(flatten)]
    search: SearchArgs,
    /// Number of pairs to show
    #[arg(long, default_value_t = 10)]
    top:    usize,
  },
  /// Write the raw search results as JSON
  Export {
    #[command(flatten)]
    search: SearchArgs,
    /// Output file; defaults to the data directory
    #[arg(long, short)]
    output: Option<PathBuf>,
  },
  /// Explore results and fetch citations from a menu
  Interactive,
}

/// Setup logging with the specified verbosity level
fn setup_logging(verbosity: u8, log_dir: Option<&Path>) -> Result<(), PaperscopeCliError> {
  let filter = match verbosity {
    0 => "warn",
    1 => "info",
    2 => "debug",
    _ => "trace",
  };

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  let stderr_layer = tracing_subscriber::fmt::layer()
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .with_target(true);

  let file_layer = match log_dir {
    Some(dir) => {
      std::fs::create_dir_all(dir)?;
      let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::NEVER)
        .filename_prefix("paperscope")
        .filename_suffix("log")
        .build(dir)?;
      Some(
        tracing_subscriber::fmt::layer()
          .with_writer(file_appender)
          .with_ansi(false)
          .with_target(true)
          .with_line_number(true),
      )
    },
    None => None,
  };

  tracing_subscriber::registry().with(filter).with(stderr_layer).with(file_layer).init();
  Ok(())
}

/// Runs a search and reports progress on stdout.
async fn run_search(
  config: &ClientConfig,
  query: &SearchQuery,
) -> Result<Vec<Paper>, PaperscopeCliError> {
  println!(
    "{} Fetching the latest {} papers for: {}",
    style(LOOKING_GLASS).cyan(),
    style(query.max_results).yellow(),
    style(&query.keyword).yellow()
  );
  let papers = ArxivClient::with_config(config.clone()).search(query).await?;
  debug!("Fetched {} papers", papers.len());
  Ok(papers)
}

#[tokio::main]
async fn main() -> Result<(), PaperscopeCliError> {
  let cli = Cli::parse();
  setup_logging(cli.verbose, cli.log_dir.as_deref())?;

  let config = cli.endpoints.config();
  trace!("Using client config: {:?}", config);

  match cli.command {
    Commands::Search { search } => {
      let papers = run_search(&config, &search.query()).await?;
      render::print_papers(&papers);
      Ok(())
    },

    Commands::Cite { identifier } => {
      let identifier: PaperIdentifier = identifier.parse()?;
      println!(
        "{} Fetching citation for: {}",
        style(LOOKING_GLASS).cyan(),
        style(identifier.normalized()).yellow()
      );

      let outcome = CitationClient::with_config(config).fetch_citation(&identifier).await;
      render::print_outcome(&identifier, &outcome);
      Ok(())
    },

    Commands::Trend { search } => {
      let papers = run_search(&config, &search.query()).await?;
      render::print_trend(&analysis::publication_trend(&papers));
      Ok(())
    },

    Commands::Keywords { search, top } => {
      let papers = run_search(&config, &search.query()).await?;
      render::print_keywords(&analysis::keyword_frequency(&papers, top));
      Ok(())
    },

    Commands::Sentiment { search } => {
      let papers = run_search(&config, &search.query()).await?;
      let sentiments = analysis::abstract_sentiment(&papers);
      render::print_sentiment(&sentiments, &analysis::sentiment_summary(&sentiments));
      Ok(())
    },

    Commands::Network { search, top } => {
      let papers = run_search(&config, &search.query()).await?;
      render::print_network(&analysis::coauthor_network(&papers), top);
      Ok(())
    },

    Commands::Export { search, output } => {
      let query = search.query();
      let papers = run_search(&config, &query).await?;
      let path = output.unwrap_or_else(|| export::default_export_path(&query.keyword));

      export::export_to_path(&papers, &path)?;
      println!(
        "{} Saved {} papers to: {}",
        style(SAVE).green(),
        style(papers.len()).yellow(),
        style(path.display()).yellow()
      );
      Ok(())
    },

    Commands::Interactive => {
      interactive::run(config).await?;
      println!("{} Bye!", style(SUCCESS).green());
      Ok(())
    },
  }
}
