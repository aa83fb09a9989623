//! Locating a BibTeX record inside a fetched page.
//!
//! Two stages are tried in order:
//! 1. the dedicated container element (`id="bibtex"`), whose trimmed text is taken verbatim,
//! 2. a balanced-brace scan over the page's visible text.
//!
//! The scan treats every `{` and `}` as structural, including those inside quoted field values.
//! Records with unbalanced braces inside quotes are therefore reported as
//! [`NotFoundReason::NoBalancedBlock`] or cut short.

use lazy_static::lazy_static;
use scraper::{Html, Selector};

use super::*;

/// Character that opens every BibTeX entry.
pub const RECORD_MARKER: char = '@';

lazy_static! {
  /// The element the export page uses to hold the record.
  static ref CONTAINER: Selector = Selector::parse("#bibtex").unwrap();
}

/// Extracts a citation record from an HTML or plain-text page body.
pub fn extract_citation(body: &str) -> Result<CitationRecord, NotFoundReason> {
  let document = Html::parse_document(body);

  if let Some(text) = structured_record(&document) {
    trace!("Found citation record in structured container");
    return Ok(CitationRecord::new(text, DiscoveryMethod::Structured));
  }

  let text = visible_text(&document);
  let block = find_balanced_block(&text)?;
  trace!("Found citation record by scanning {} characters of page text", text.len());
  Ok(CitationRecord::new(block, DiscoveryMethod::TextScan))
}

/// Returns the trimmed text of the `#bibtex` container, if the page has a non-empty one.
pub fn structured_record(document: &Html) -> Option<String> {
  let container = document.select(&CONTAINER).next()?;
  let text = container.text().collect::<String>();
  let text = text.trim();
  (!text.is_empty()).then(|| text.to_string())
}

/// Concatenates the page's text nodes, skipping the contents of `script` and `style` elements.
pub fn visible_text(document: &Html) -> String {
  let mut text = String::new();
  for node in document.root_element().descendants() {
    let Some(fragment) = node.value().as_text() else {
      continue;
    };
    let hidden = node
      .parent()
      .and_then(|parent| parent.value().as_element().map(|element| element.name()))
      .is_some_and(|name| matches!(name, "script" | "style"));
    if !hidden {
      text.push_str(fragment);
    }
  }
  text
}

/// Finds the first brace-balanced block starting at the first [`RECORD_MARKER`].
///
/// Every `{` raises the depth and every `}` lowers it, including a `}` that appears before the
/// first `{`. The block can only end once a `{` has been seen, at the `}` that brings the depth
/// back to zero. The returned slice runs from the marker through that brace.
///
/// # Examples
///
/// ```
/// use paperscope::citation::{extract::find_balanced_block, NotFoundReason};
///
/// let text = "noise @article{k, title={A {B} C}} trailing }";
/// assert_eq!(find_balanced_block(text), Ok("@article{k, title={A {B} C}}"));
/// assert_eq!(find_balanced_block("no record"), Err(NotFoundReason::NoMarker));
/// assert_eq!(find_balanced_block("@type{open"), Err(NotFoundReason::NoBalancedBlock));
/// ```
pub fn find_balanced_block(text: &str) -> Result<&str, NotFoundReason> {
  let start = text.find(RECORD_MARKER).ok_or(NotFoundReason::NoMarker)?;

  let mut depth: isize = 0;
  let mut started = false;
  for (offset, byte) in text[start..].bytes().enumerate() {
    match byte {
      b'{' => {
        depth += 1;
        started = true;
      },
      b'}' => {
        depth -= 1;
        // reaching zero on a close means the depth was positive just before
        if started && depth == 0 {
          return Ok(&text[start..=start + offset]);
        }
      },
      _ => {},
    }
  }

  Err(NotFoundReason::NoBalancedBlock)
}

#[cfg(test)]
mod tests {
  use super::*;

  const RECORD: &str = "@article{doe2023ai, title={Deep {Learning} for {B}rains}, year={2023}}";

  #[test]
  fn test_scan_returns_exact_record_inside_noise() {
    let text = format!("Export citation\n\n{RECORD}\n\nBack to abstract {{ }}");
    assert_eq!(find_balanced_block(&text), Ok(RECORD));
  }

  #[test]
  fn test_scan_counts_braces_before_first_open() {
    // The stray close leaves the depth at -1, so the inner `{x}` closes the block.
    let text = "@misc} weird {key, note={x}} tail";
    assert_eq!(find_balanced_block(text), Ok("@misc} weird {key, note={x}"));

    assert_eq!(find_balanced_block("@a}} {b}"), Err(NotFoundReason::NoBalancedBlock));
    assert_eq!(find_balanced_block("@a} {{b} c"), Ok("@a} {{b}"));
  }

  #[test]
  fn test_scan_failures() {
    assert_eq!(find_balanced_block(""), Err(NotFoundReason::NoMarker));
    assert_eq!(find_balanced_block("{a} {b}"), Err(NotFoundReason::NoMarker));
    assert_eq!(find_balanced_block("contact me @ home"), Err(NotFoundReason::NoBalancedBlock));
    assert_eq!(
      find_balanced_block("@type{unterminated, title={x}"),
      Err(NotFoundReason::NoBalancedBlock)
    );
  }

  #[test]
  fn test_scan_keeps_quoted_brace_limitation() {
    // The closing brace inside the quoted value ends the record early.
    let text = r#"@misc{k, note="a } b", year={2020}}"#;
    assert_eq!(find_balanced_block(text), Ok(r#"@misc{k, note="a }"#));
  }

  #[test]
  fn test_scan_handles_multibyte_text() {
    let text = "Résumé · @book{k, title={Ünïcødé {ß}}} ✓";
    assert_eq!(find_balanced_block(text), Ok("@book{k, title={Ünïcødé {ß}}}"));
  }

  #[test]
  fn test_structured_container_wins_over_text() {
    let page = format!(
      r#"<html><body><p>@misc{{other, title={{Decoy}}}}</p>
         <div id="bibtex">
           {RECORD}
         </div></body></html>"#
    );
    let record = extract_citation(&page).unwrap();
    assert_eq!(record.method(), DiscoveryMethod::Structured);
    assert_eq!(record.text(), RECORD);
  }

  #[test]
  fn test_falls_back_to_text_scan() {
    let page = format!(
      r#"<html><head><style>.x {{ color: red }}</style>
         <script>var cfg = {{ "@context": 1 }};</script></head>
         <body><h1>BibTeX</h1><pre>{RECORD}</pre></body></html>"#
    );
    let record = extract_citation(&page).unwrap();
    assert_eq!(record.method(), DiscoveryMethod::TextScan);
    assert_eq!(record.text(), RECORD);
  }

  #[test]
  fn test_empty_container_falls_back() {
    let page = format!(r#"<div id="bibtex">   </div><pre>{RECORD}</pre>"#);
    let record = extract_citation(&page).unwrap();
    assert_eq!(record.method(), DiscoveryMethod::TextScan);
  }

  #[test]
  fn test_plain_text_body() {
    let record = extract_citation(RECORD).unwrap();
    assert_eq!(record.text(), RECORD);
    assert_eq!(record.method(), DiscoveryMethod::TextScan);
  }

  #[test]
  fn test_extraction_failures() {
    assert_eq!(
      extract_citation("<html><body><p>Nothing here</p></body></html>"),
      Err(NotFoundReason::NoMarker)
    );
    assert_eq!(
      extract_citation("<p>@article{broken, title={never closed</p>"),
      Err(NotFoundReason::NoBalancedBlock)
    );
  }

  #[test]
  fn test_visible_text_skips_scripts() {
    let document = Html::parse_document(
      "<html><head><script>@x{y}</script></head><body><p>Hello</p> <b>world</b></body></html>",
    );
    let text = visible_text(&document);
    assert!(text.contains("Hello"));
    assert!(text.contains("world"));
    assert!(!text.contains("@x"));
  }
}
