//! Data structures shared across radiobrowse
//!
//! - **Stations**: directory search results and their `name,url` line format
//! - **Favorites**: user-labeled shortcuts loaded from the favorites file

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Station Models
// =============================================================================

/// A station returned by a directory search.
///
/// The name never contains a comma: the text export and the clipboard-style
/// `name,url` line use the comma as field separator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationEntry {
    pub name: String,
    pub url: String,
}

/// Ordered result of a single search, directory response order
pub type ResultList = Vec<StationEntry>;

impl StationEntry {
    /// Build an entry, replacing every comma in the name with a space
    pub fn new(name: impl AsRef<str>, url: impl Into<String>) -> Self {
        Self {
            name: sanitize_name(name.as_ref()),
            url: url.into(),
        }
    }

    /// Render as a `name,url` line
    pub fn to_line(&self) -> String {
        format!("{},{}", self.name, self.url)
    }

    /// Parse a `name,url` line, splitting on the first comma.
    ///
    /// A line without any comma is taken as a bare URL.
    pub fn from_line(line: &str) -> Self {
        let line = line.trim();
        match line.split_once(',') {
            Some((name, url)) => Self {
                name: name.to_string(),
                url: url.to_string(),
            },
            None => Self {
                name: line.to_string(),
                url: line.to_string(),
            },
        }
    }
}

impl fmt::Display for StationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.name, self.url)
    }
}

/// Replace field-separator commas in a station name
pub fn sanitize_name(name: &str) -> String {
    name.replace(',', " ")
}

// =============================================================================
// Favorite Models
// =============================================================================

/// A labeled shortcut to a known station URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub label: String,
    pub url: String,
}

impl fmt::Display for FavoriteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.label, self.url)
    }
}

// =============================================================================
// Genres
// =============================================================================

/// Preset genres offered as one-click searches
pub const GENRES: &[&str] = &[
    "Americana",
    "Bluegrass",
    "Country",
    "New Country",
    "Classic Country",
    "Country Rock",
    "Cowboy / Western",
    "Folk",
    "Folk Rock",
    "Grunge",
    "Hard Rock",
    "Classic Rock",
    "Blues",
    "Oldies",
    "Pop",
    "Rock",
    "Classic",
    "Beat",
    "Metal",
];

/// Look up a preset genre, ignoring case
pub fn find_genre(name: &str) -> Option<&'static str> {
    GENRES
        .iter()
        .copied()
        .find(|g| g.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_name_commas_replaced() {
        let entry = StationEntry::new("Rock, Pop, and More", "http://a/b");
        assert_eq!(entry.name, "Rock  Pop  and More");
        assert!(!entry.name.contains(','));
    }

    #[test]
    fn test_station_to_line() {
        let entry = StationEntry::new("Radio X", "http://x.example/stream");
        assert_eq!(entry.to_line(), "Radio X,http://x.example/stream");
        assert_eq!(entry.to_string(), entry.to_line());
    }

    #[test]
    fn test_from_line_splits_on_first_comma() {
        let entry = StationEntry::from_line("Jazz FM,http://a.example/x?a=1,2");
        assert_eq!(entry.name, "Jazz FM");
        assert_eq!(entry.url, "http://a.example/x?a=1,2");
    }

    #[test]
    fn test_from_line_bare_url() {
        let entry = StationEntry::from_line("  http://a.example/live.mp3 ");
        assert_eq!(entry.name, "http://a.example/live.mp3");
        assert_eq!(entry.url, "http://a.example/live.mp3");
    }

    #[test]
    fn test_find_genre() {
        assert_eq!(find_genre("folk rock"), Some("Folk Rock"));
        assert_eq!(find_genre("Metal"), Some("Metal"));
        assert_eq!(find_genre("Polka"), None);
        assert_eq!(GENRES.len(), 19);
    }
}
