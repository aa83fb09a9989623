//! arXiv paper identifiers and their canonical, version-less form.
//!
//! arXiv addresses a paper by an identifier such as `2301.12345` (new style) or
//! `math.AG/0601001` (old style), optionally followed by a version marker like `v2`. The citation
//! export endpoint only understands the version-less form, so every lookup goes through
//! [`normalize_identifier`] first.
//!
//! # Examples
//!
//! ```
//! use paperscope::identifier::{normalize_identifier, PaperIdentifier};
//!
//! assert_eq!(normalize_identifier("2301.12345v2"), "2301.12345");
//! assert_eq!(normalize_identifier("2301.12345"), "2301.12345");
//!
//! let id: PaperIdentifier = "https://arxiv.org/abs/2301.12345v3".parse().unwrap();
//! assert_eq!(id.normalized().as_str(), "2301.12345");
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use super::*;

lazy_static! {
  /// One or more trailing `vN` markers.
  static ref VERSION_SUFFIX: Regex = Regex::new(r"(v\d+)+$").unwrap();
}

/// Removes a trailing version suffix (`v` followed by digits) from an identifier.
///
/// Identifiers without a suffix are returned unchanged. Stacked suffixes are removed together,
/// so normalizing is idempotent.
pub fn normalize_identifier(identifier: &str) -> String {
  VERSION_SUFFIX.replace(identifier, "").into_owned()
}

/// A paper identifier as used by the source repository, possibly carrying a version suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperIdentifier(String);

impl PaperIdentifier {
  /// Wraps a raw identifier token without validation.
  pub fn new(identifier: impl Into<String>) -> Self { Self(identifier.into()) }

  /// Returns the identifier with any version suffix removed.
  pub fn normalized(&self) -> PaperIdentifier { PaperIdentifier(normalize_identifier(&self.0)) }

  /// Returns the version number carried by the identifier, if any.
  pub fn version(&self) -> Option<u32> {
    let suffix = VERSION_SUFFIX.find(&self.0)?.as_str();
    suffix.rsplit('v').next()?.parse().ok()
  }

  /// The raw identifier text.
  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PaperIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl FromStr for PaperIdentifier {
  type Err = PaperscopeError;

  /// Accepts a bare identifier, an `arxiv:`-prefixed identifier, or an arXiv abstract/PDF URL.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();

    // `arxiv:` parses as a URL scheme, so only http(s) input is treated as a link
    let identifier = match Url::parse(s) {
      Ok(url) if matches!(url.scheme(), "http" | "https") => extract_from_url(&url)?,
      _ => {
        let stripped = s.strip_prefix("arxiv:").or_else(|| s.strip_prefix("arXiv:")).unwrap_or(s);
        stripped.to_string()
      },
    };

    if identifier.is_empty() {
      return Err(PaperscopeError::InvalidIdentifier);
    }
    Ok(Self(identifier))
  }
}

/// Extracts the identifier from URLs like "https://arxiv.org/abs/2301.07041v2" or
/// "https://arxiv.org/pdf/2301.07041v2.pdf".
fn extract_from_url(url: &Url) -> Result<String, PaperscopeError> {
  let path = url.path();
  let identifier = ["/abs/", "/pdf/", "/bibtex/"]
    .iter()
    .find_map(|prefix| path.split_once(prefix).map(|(_, rest)| rest))
    .ok_or(PaperscopeError::InvalidIdentifier)?;

  let identifier = identifier.trim_end_matches('/');
  Ok(identifier.strip_suffix(".pdf").unwrap_or(identifier).to_string())
}

/// Extracts the identifier from an arXiv Atom entry id such as
/// "http://arxiv.org/abs/2301.07041v1".
pub(crate) fn from_entry_id(entry_id: &str) -> Option<PaperIdentifier> {
  entry_id
    .split_once("/abs/")
    .map(|(_, id)| id.trim())
    .filter(|id| !id.is_empty())
    .map(PaperIdentifier::new)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_strips_trailing_version() {
    assert_eq!(normalize_identifier("2301.12345v2"), "2301.12345");
    assert_eq!(normalize_identifier("2301.12345v10"), "2301.12345");
    assert_eq!(normalize_identifier("math.AG/0601001v1"), "math.AG/0601001");
  }

  #[test]
  fn test_leaves_unversioned_input_alone() {
    for id in ["2301.12345", "math.AG/0601001", "2301.12345v", "v2.12345", ""] {
      assert_eq!(normalize_identifier(id), id);
    }
  }

  #[test]
  fn test_normalize_is_idempotent() {
    for id in ["2301.12345v2", "2301.12345", "2301.12345v2v3", "hep-th/9901001v4"] {
      let once = normalize_identifier(id);
      assert_eq!(normalize_identifier(&once), once);
    }
  }

  #[test]
  fn test_version_number() {
    assert_eq!(PaperIdentifier::new("2301.12345v7").version(), Some(7));
    assert_eq!(PaperIdentifier::new("2301.12345").version(), None);
  }

  #[test]
  fn test_parse_variants() {
    let cases = [
      ("2301.12345v2", "2301.12345v2"),
      ("  arxiv:2301.12345 ", "2301.12345"),
      ("https://arxiv.org/abs/2301.12345v3", "2301.12345v3"),
      ("https://arxiv.org/pdf/2301.12345v1.pdf", "2301.12345v1"),
      ("https://arxiv.org/abs/math.AG/0601001", "math.AG/0601001"),
    ];
    for (input, expected) in cases {
      let id: PaperIdentifier = input.parse().unwrap();
      assert_eq!(id.as_str(), expected, "parsing {input}");
    }
  }

  #[test]
  fn test_parse_rejects_empty_and_foreign_urls() {
    assert!(matches!("   ".parse::<PaperIdentifier>(), Err(PaperscopeError::InvalidIdentifier)));
    assert!(matches!(
      "https://example.com/papers/1".parse::<PaperIdentifier>(),
      Err(PaperscopeError::InvalidIdentifier)
    ));
  }

  #[test]
  fn test_from_entry_id() {
    let id = from_entry_id("http://arxiv.org/abs/2301.07041v1").unwrap();
    assert_eq!(id.as_str(), "2301.07041v1");
    assert!(from_entry_id("http://arxiv.org/list/cs").is_none());
  }
}
