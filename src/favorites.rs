//! Favorite station shortcuts
//!
//! Favorites live in a YAML file mapping a label to a list of URLs, the
//! first of which is played:
//!
//! ```yaml
//! Radio Paradise: [http://stream.radioparadise.com/mp3-192]
//! KEXP:
//!   - https://kexp.streamguys1.com/kexp160.aac
//! ```
//!
//! The set is loaded once per process and never written back.

use serde_yaml::Value;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::FavoriteEntry;

/// Errors reading the favorites file
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Cannot read favorites file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Cannot parse favorites file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Favorites file is not a mapping of label to URL list")]
    NotAMapping,
}

/// Read-only, ordered favorites for the session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    entries: Vec<FavoriteEntry>,
}

impl Favorites {
    /// Build from entries, keeping their order
    pub fn new(entries: Vec<FavoriteEntry>) -> Self {
        Self { entries }
    }

    /// Parse favorites from YAML text.
    ///
    /// Entries whose value is not a list starting with a URL string are
    /// skipped.
    pub fn parse(text: &str) -> Result<Self, ConfigLoadError> {
        let Value::Mapping(mapping) = serde_yaml::from_str::<Value>(text)? else {
            return Err(ConfigLoadError::NotAMapping);
        };

        let mut entries = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let label = match key {
                Value::String(label) => label,
                other => {
                    warn!(key = ?other, "skipping favorite with non-text label");
                    continue;
                }
            };
            match first_url(&value) {
                Some(url) => entries.push(FavoriteEntry {
                    label,
                    url: url.to_string(),
                }),
                None => warn!(%label, "skipping favorite without a URL list"),
            }
        }
        Ok(Self { entries })
    }

    /// Load favorites from `path`; a missing file is an empty set
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no favorites file");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&text)
    }

    /// Load favorites, degrading to an empty set on any error
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "check favorites formatting, continuing without favorites");
            Self::default()
        })
    }

    /// Look up a favorite by label (exact, then case-insensitive)
    pub fn get(&self, label: &str) -> Option<&FavoriteEntry> {
        self.entries
            .iter()
            .find(|f| f.label == label)
            .or_else(|| self.entries.iter().find(|f| f.label.eq_ignore_ascii_case(label)))
    }

    /// Favorites in file order
    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn first_url(value: &Value) -> Option<&str> {
    match value {
        Value::Sequence(urls) => urls.first()?.as_str(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_file_order() {
        let favs = Favorites::parse(
            "Zeta: [http://z/stream]\nAlpha:\n  - http://a/one\n  - http://a/two\nMid: ['http://m']\n",
        )
        .unwrap();
        let labels: Vec<_> = favs.entries().iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha", "Mid"]);
        assert_eq!(favs.get("Alpha").unwrap().url, "http://a/one");
    }

    #[test]
    fn test_parse_not_a_mapping() {
        assert!(matches!(
            Favorites::parse("- http://a\n- http://b\n"),
            Err(ConfigLoadError::NotAMapping)
        ));
        assert!(matches!(Favorites::parse(""), Err(ConfigLoadError::NotAMapping)));
        assert!(matches!(
            Favorites::parse("just a string"),
            Err(ConfigLoadError::NotAMapping)
        ));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(matches!(
            Favorites::parse("a: [unclosed"),
            Err(ConfigLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_skips_bad_entries() {
        let favs = Favorites::parse(
            "Good: [http://g]\nEmpty: []\nScalar: http://s\nNested: [[http://n]]\n42: [http://num]\n",
        )
        .unwrap();
        assert_eq!(favs.len(), 1);
        assert_eq!(favs.entries()[0].label, "Good");
    }

    #[test]
    fn test_get_case_insensitive() {
        let favs = Favorites::parse("Radio X: [http://x]\n").unwrap();
        assert_eq!(favs.get("radio x").unwrap().url, "http://x");
        assert!(favs.get("Radio Y").is_none());
    }
}
