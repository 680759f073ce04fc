//! radio-browser directory client
//!
//! Non-exact station name search against the community radio directory.
//! API docs: https://api.radio-browser.info

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{ResultList, StationEntry};

/// Default directory mirror
pub const DEFAULT_BASE_URL: &str = "https://de1.api.radio-browser.info";

const USER_AGENT: &str = concat!("radiobrowse/", env!("CARGO_PKG_VERSION"));

/// Directory search error types
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Directory returned HTTP {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Raw station record; the directory sends many more fields
#[derive(Debug, Deserialize)]
struct StationRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl StationRecord {
    fn into_entry(self) -> Option<StationEntry> {
        let url = self.url?;
        Some(StationEntry::new(self.name.unwrap_or_default(), url))
    }
}

/// Shape raw directory records into a result list.
///
/// Records without a url are dropped; order is preserved.
fn shape_results(records: Vec<StationRecord>) -> ResultList {
    records
        .into_iter()
        .filter_map(StationRecord::into_entry)
        .collect()
}

/// radio-browser API client
pub struct RadioBrowserClient {
    base_url: String,
    client: reqwest::Client,
}

impl RadioBrowserClient {
    /// Create a client against the default mirror
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing or another mirror)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client with a custom base URL and request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Search stations whose name contains `term`
    pub async fn search(&self, term: &str) -> Result<ResultList, SearchError> {
        let url = format!(
            "{}/json/stations/search?name={}&nameExact=false",
            self.base_url,
            urlencoding::encode(term)
        );
        debug!(%url, "searching directory");

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => {}
            status => return Err(SearchError::Status(status.as_u16())),
        }

        let body = response.text().await?;
        let records: Vec<StationRecord> = serde_json::from_str(&body)
            .map_err(|e| SearchError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        let results = shape_results(records);
        info!(term, count = results.len(), "directory search finished");
        Ok(results)
    }
}

impl Default for RadioBrowserClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>, url: Option<&str>) -> StationRecord {
        StationRecord {
            name: name.map(String::from),
            url: url.map(String::from),
        }
    }

    #[test]
    fn test_shape_drops_missing_url() {
        let results = shape_results(vec![
            record(Some("A"), Some("http://a")),
            record(Some("B"), None),
            record(Some("D"), Some("http://d")),
        ]);
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["A", "D"]);
    }

    #[test]
    fn test_shape_keeps_empty_url() {
        let records: Vec<StationRecord> = serde_json::from_str(
            r#"[{"name":"A","url":"u1"},{"name":"Silent","url":""},{"name":"B","url":"u2"}]"#,
        )
        .unwrap();
        let results = shape_results(records);
        assert_eq!(results.len(), 3);
        assert_eq!(results[1], StationEntry::new("Silent", ""));
    }

    #[test]
    fn test_shape_strips_commas() {
        let results = shape_results(vec![record(Some("Hits, Hits, Hits"), Some("http://h"))]);
        assert_eq!(results[0].name, "Hits  Hits  Hits");
    }

    #[test]
    fn test_shape_missing_name_is_empty() {
        let results = shape_results(vec![record(None, Some("http://n"))]);
        assert_eq!(results[0].name, "");
        assert_eq!(results[0].url, "http://n");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = RadioBrowserClient::with_base_url("http://localhost:1234/");
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
