//! Raw dataset export.
//!
//! Search results are written as a pretty-printed JSON array of [`Paper`]s. When no output path
//! is given, the file goes to the user's data directory under a name derived from the query.
//!
//! # Examples
//!
//! ```
//! use paperscope::export;
//!
//! assert_eq!(export::file_stem("Artificial Intelligence", None), "artificial_intelligence");
//! assert_eq!(export::file_stem("LLMs: What's next?", None), "llms_whats_next");
//! ```

use std::{
  fs::{self, File},
  io::{BufWriter, Write},
  path::{Path, PathBuf},
};

use super::*;

/// Default upper bound on a generated file stem.
const MAX_STEM_LENGTH: usize = 50;

/// Stem used when a query contains no usable characters.
const FALLBACK_STEM: &str = "papers";

/// Turns a search query into a filesystem-friendly file stem.
///
/// The query is lowercased, characters other than ASCII letters, digits and whitespace are
/// dropped, whitespace runs become single underscores, and the result is truncated at a word
/// boundary to `max_length` (default 50) characters.
pub fn file_stem(query: &str, max_length: Option<usize>) -> String {
  let max_length = max_length.unwrap_or(MAX_STEM_LENGTH);
  let cleaned: String = query
    .to_lowercase()
    .chars()
    .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
    .collect();

  let mut stem = String::new();
  for word in cleaned.split_whitespace() {
    let separator = usize::from(!stem.is_empty());
    if stem.len() + separator + word.len() > max_length {
      break;
    }
    if separator == 1 {
      stem.push('_');
    }
    stem.push_str(word);
  }

  if stem.is_empty() {
    FALLBACK_STEM.to_string()
  } else {
    stem
  }
}

/// Default export location: `<data dir>/paperscope/exports/<stem>.json`.
pub fn default_export_path(query: &str) -> PathBuf {
  dirs::data_dir()
    .unwrap_or_else(|| PathBuf::from("."))
    .join("paperscope")
    .join("exports")
    .join(format!("{}.json", file_stem(query, None)))
}

/// Serializes `papers` as a JSON array into `writer`.
pub fn write_json<W: Write>(papers: &[Paper], writer: W) -> Result<(), PaperscopeError> {
  let mut writer = BufWriter::new(writer);
  serde_json::to_writer_pretty(&mut writer, papers)?;
  writer.write_all(b"\n")?;
  writer.flush()?;
  Ok(())
}

/// Writes `papers` to `path`, creating parent directories as needed.
pub fn export_to_path(papers: &[Paper], path: impl AsRef<Path>) -> Result<(), PaperscopeError> {
  let path = path.as_ref();
  if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }
  debug!("Exporting {} papers to {}", papers.len(), path.display());
  write_json(papers, File::create(path)?)
}

/// Reads a file written by [`export_to_path`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<Paper>, PaperscopeError> {
  let file = File::open(path)?;
  Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_file_stem() {
    assert_eq!(file_stem("Hello World", None), "hello_world");
    assert_eq!(file_stem("No    Extra    Spaces", None), "no_extra_spaces");
    assert_eq!(file_stem("This Is A Very Long Title Indeed", Some(20)), "this_is_a_very_long");
    assert_eq!(file_stem("C++ / Rust?", None), "c_rust");
    assert_eq!(file_stem("???", None), FALLBACK_STEM);
    assert_eq!(file_stem("supercalifragilistic", Some(5)), FALLBACK_STEM);
  }

  #[test]
  fn test_default_path_uses_stem() {
    let path = default_export_path("Graph Neural Networks");
    assert!(path.ends_with("paperscope/exports/graph_neural_networks.json"));
  }

  #[test]
  fn test_export_and_reload() -> anyhow::Result<()> {
    let papers = vec![Paper {
      identifier:       PaperIdentifier::new("2301.12345v1"),
      title:            "A Title".into(),
      authors:          vec![Author { name: "Jane Doe".into() }],
      abstract_text:    "Abstract".into(),
      publication_date: Utc.with_ymd_and_hms(2023, 1, 28, 0, 0, 0).unwrap(),
      primary_category: Some("cs.LG".into()),
      link:             "http://arxiv.org/abs/2301.12345v1".into(),
      pdf_url:          "http://arxiv.org/pdf/2301.12345v1".into(),
    }];

    let dir = tempdir()?;
    let path = dir.path().join("nested").join("out.json");
    export_to_path(&papers, &path)?;

    let contents = fs::read_to_string(&path)?;
    assert!(contents.contains("\"identifier\": \"2301.12345v1\""));
    assert_eq!(load_from_path(&path)?, papers);
    Ok(())
  }
}
