//! Result export
//!
//! Serializes a result list as an extended M3U playlist or as plain
//! `name,url` text, and reads exported M3U files back.

use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::models::StationEntry;

/// Errors writing an export file
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    M3u,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to text
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("m3u") => ExportFormat::M3u,
            _ => ExportFormat::Text,
        }
    }

    /// Render entries in this format
    pub fn render(self, entries: &[StationEntry]) -> String {
        match self {
            ExportFormat::Text => to_text(entries),
            ExportFormat::M3u => to_m3u(entries),
        }
    }
}

/// Render entries as an extended M3U playlist.
///
/// Every entry is an `#EXTINF:<index>,<name>` line followed by its url,
/// with `index` the zero-based input position.
pub fn to_m3u(entries: &[StationEntry]) -> String {
    let mut out = String::from("#EXTM3U\n");
    for (index, entry) in entries.iter().enumerate() {
        out.push_str(&format!("#EXTINF:{},{}\n{}\n", index, entry.name, entry.url));
    }
    out
}

/// Render entries as `name,url` lines
pub fn to_text(entries: &[StationEntry]) -> String {
    entries
        .iter()
        .map(StationEntry::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Read `#EXTINF` records back out of an M3U playlist.
///
/// Each `#EXTINF:<n>,<name>` line pairs with the next line as url. Lines
/// outside such pairs are ignored.
pub fn parse_m3u(text: &str) -> Vec<StationEntry> {
    let mut entries = Vec::new();
    let mut lines = text.lines();
    while let Some(line) = lines.next() {
        let Some(info) = line.strip_prefix("#EXTINF:") else {
            continue;
        };
        let name = info.split_once(',').map_or("", |(_, name)| name);
        let url = lines.next().unwrap_or("");
        entries.push(StationEntry {
            name: name.to_string(),
            url: url.to_string(),
        });
    }
    entries
}

/// Write an export to `path`
pub fn save(path: &Path, contents: &str) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|source| ExportError::Write {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), bytes = contents.len(), "export saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, url: &str) -> StationEntry {
        StationEntry::new(name, url)
    }

    #[test]
    fn test_to_m3u_exact() {
        let out = to_m3u(&[entry("A", "u1"), entry("B", "u2")]);
        assert_eq!(out, "#EXTM3U\n#EXTINF:0,A\nu1\n#EXTINF:1,B\nu2\n");
    }

    #[test]
    fn test_to_m3u_empty_list() {
        assert_eq!(to_m3u(&[]), "#EXTM3U\n");
    }

    #[test]
    fn test_to_m3u_empty_url_keeps_two_lines() {
        let out = to_m3u(&[entry("Silent", ""), entry("Loud", "u")]);
        assert_eq!(out, "#EXTM3U\n#EXTINF:0,Silent\n\n#EXTINF:1,Loud\nu\n");
    }

    #[test]
    fn test_to_text() {
        let out = to_text(&[entry("A", "u1"), entry("B", "u2")]);
        assert_eq!(out, "A,u1\nB,u2");
        assert_eq!(to_text(&[]), "");
    }

    #[test]
    fn test_parse_m3u_ignores_unpaired_lines() {
        let text = "#EXTM3U\n# comment\n#EXTINF:0,A\nu1\nstray\n#EXTINF:7,B\nu2\n";
        let entries = parse_m3u(text);
        assert_eq!(entries, vec![entry("A", "u1"), entry("B", "u2")]);
    }

    #[test]
    fn test_export_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("rock.m3u")), ExportFormat::M3u);
        assert_eq!(ExportFormat::from_path(Path::new("rock.M3U")), ExportFormat::M3u);
        assert_eq!(ExportFormat::from_path(Path::new("rock.txt")), ExportFormat::Text);
        assert_eq!(ExportFormat::from_path(Path::new("rock")), ExportFormat::Text);
    }
}
