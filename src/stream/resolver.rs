//! Stream URL resolution
//!
//! Station entries may point at a direct stream or at a `.pls` / `.m3u`
//! playlist. Playlists are fetched and the embedded stream URL extracted
//! with the same positional line heuristics the known directory sources
//! have always been read with. This is not a general playlist parser.

use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors from stream resolution
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("Failed to fetch playlist: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("Playlist server returned HTTP {0}")]
    Status(u16),
    #[error("Playlist is empty")]
    EmptyPlaylist,
    #[error("No stream line found in playlist")]
    NoStreamLine,
    #[error("Malformed playlist line: {0}")]
    MalformedLine(String),
}

/// Playlist indirection detected from a URL suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistKind {
    Pls,
    M3u,
}

impl PlaylistKind {
    /// Detect a playlist URL; `None` means the URL is already a stream
    pub fn detect(url: &str) -> Option<Self> {
        if url.ends_with(".pls") {
            Some(PlaylistKind::Pls)
        } else if url.ends_with(".m3u") {
            Some(PlaylistKind::M3u)
        } else {
            None
        }
    }

    /// URL actually fetched for this playlist kind
    pub fn fetch_target(self, url: &str) -> &str {
        let url = match self {
            PlaylistKind::Pls => url,
            PlaylistKind::M3u => url.split_once("?u=").map_or(url, |(_, target)| target),
        };
        strip_query_suffix(url)
    }
}

/// Drop everything from the first `&`
fn strip_query_suffix(url: &str) -> &str {
    url.split_once('&').map_or(url, |(head, _)| head)
}

// =============================================================================
// Line Heuristics
// =============================================================================

/// Split on `\r\n`, `\r` or `\n`; a trailing break adds no empty line
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find(|c: char| c == '\r' || c == '\n') {
        lines.push(&rest[..pos]);
        let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[pos + width..];
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

/// Pick the PLS line carrying the stream.
///
/// Four or more lines: first of lines 1, 2, 3 containing `http`.
/// Exactly three: first of lines 1, 2. Fewer: line 0.
fn select_pls_line<'a>(lines: &[&'a str]) -> Result<&'a str, ResolutionError> {
    let candidates: &[usize] = match lines.len() {
        0 => return Err(ResolutionError::EmptyPlaylist),
        n if n >= 4 => &[1, 2, 3],
        3 => &[1, 2],
        _ => return Ok(lines[0]),
    };
    candidates
        .iter()
        .map(|&i| lines[i])
        .find(|line| line.contains("http"))
        .ok_or(ResolutionError::NoStreamLine)
}

/// Extract the stream URL from a PLS body
pub fn pls_stream_url(body: &str) -> Result<String, ResolutionError> {
    let lines = split_lines(body);
    let line = select_pls_line(&lines)?;
    debug!(line, "selected pls line");

    // text after the first '=' up to the next quote
    let value = line
        .split_once('=')
        .map(|(_, rest)| rest.split_once('\'').map_or(rest, |(value, _)| value))
        .ok_or_else(|| ResolutionError::MalformedLine(line.to_string()))?;
    non_empty(value, line)
}

/// Pick the M3U line carrying the stream: line 1 if it has `http`, else line 0
fn select_m3u_line<'a>(lines: &[&'a str]) -> Result<&'a str, ResolutionError> {
    match lines {
        [] => Err(ResolutionError::EmptyPlaylist),
        [_, second, ..] if second.contains("http") => Ok(*second),
        [first, ..] => Ok(*first),
    }
}

/// Extract the stream URL from raw M3U bytes.
///
/// The URL is the text between the first two single quotes; a line
/// without quotes is used whole.
pub fn m3u_stream_url(body: &[u8]) -> Result<String, ResolutionError> {
    let text = String::from_utf8_lossy(body);
    let lines = split_lines(&text);
    let line = select_m3u_line(&lines)?;
    debug!(line, "selected m3u line");

    let value = match line.split_once('\'') {
        Some((_, rest)) => rest.split_once('\'').map_or(rest, |(value, _)| value),
        None => line,
    };
    non_empty(value, line)
}

fn non_empty(value: &str, line: &str) -> Result<String, ResolutionError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ResolutionError::MalformedLine(line.to_string()))
    } else {
        Ok(value.to_string())
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves station URLs to directly playable stream URLs
pub struct StreamResolver {
    client: reqwest::Client,
}

impl StreamResolver {
    /// Create a resolver with the default request timeout
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(15))
    }

    /// Create a resolver with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Resolve `url` to a stream URL.
    ///
    /// Anything not ending in `.pls` or `.m3u` is returned unchanged
    /// without touching the network.
    pub async fn resolve(&self, url: &str) -> Result<String, ResolutionError> {
        let Some(kind) = PlaylistKind::detect(url) else {
            return Ok(url.to_string());
        };

        let target = kind.fetch_target(url);
        debug!(?kind, fetch_url = target, "fetching playlist");

        let response = self.client.get(target).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolutionError::Status(status.as_u16()));
        }

        let stream = match kind {
            PlaylistKind::Pls => pls_stream_url(&response.text().await?)?,
            PlaylistKind::M3u => m3u_stream_url(&response.bytes().await?)?,
        };
        debug!(%stream, "resolved stream url");
        Ok(stream)
    }
}

impl Default for StreamResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_playlist_kind() {
        assert_eq!(PlaylistKind::detect("http://a/listen.pls"), Some(PlaylistKind::Pls));
        assert_eq!(PlaylistKind::detect("http://a/listen.m3u"), Some(PlaylistKind::M3u));
        assert_eq!(PlaylistKind::detect("http://a/listen.m3u8"), None);
        assert_eq!(PlaylistKind::detect("http://a/live.mp3"), None);
    }

    #[test]
    fn test_fetch_target_strips_ampersand() {
        assert_eq!(
            PlaylistKind::Pls.fetch_target("http://a/x?id=1&sid=2&t=.pls"),
            "http://a/x?id=1"
        );
    }

    #[test]
    fn test_fetch_target_unwraps_m3u_redirect() {
        assert_eq!(
            PlaylistKind::M3u.fetch_target("http://dir/go?u=http://b/s.m3u&ref=x.m3u"),
            "http://b/s.m3u"
        );
        // pls does not look for the marker
        assert_eq!(
            PlaylistKind::Pls.fetch_target("http://dir/go?u=http://b/s.pls"),
            "http://dir/go?u=http://b/s.pls"
        );
    }

    #[test]
    fn test_pls_four_lines() {
        let body = "[playlist]\nFile1=http://example.com/stream\nTitle1=Example\nLength1=-1\n";
        assert_eq!(pls_stream_url(body).unwrap(), "http://example.com/stream");
    }

    #[test]
    fn test_pls_four_lines_stream_on_line_three() {
        let body = "[playlist]\nNumberOfEntries=1\nFile1=http://example.com/s3\nTitle1=x\nLength1=-1";
        assert_eq!(pls_stream_url(body).unwrap(), "http://example.com/s3");
    }

    #[test]
    fn test_pls_four_lines_ignores_later_lines() {
        let body = "[playlist]\nA=1\nB=2\nC=3\nFile1=http://example.com/late";
        assert!(matches!(
            pls_stream_url(body),
            Err(ResolutionError::NoStreamLine)
        ));
    }

    #[test]
    fn test_pls_three_lines_checks_one_and_two() {
        let body = "[playlist]\nNumberOfEntries=1\nFile1=http://example.com/three";
        assert_eq!(pls_stream_url(body).unwrap(), "http://example.com/three");

        let body = "File1=http://example.com/first\nA=1\nB=2";
        assert!(matches!(
            pls_stream_url(body),
            Err(ResolutionError::NoStreamLine)
        ));
    }

    #[test]
    fn test_pls_short_uses_first_line() {
        assert_eq!(
            pls_stream_url("File1=http://example.com/one").unwrap(),
            "http://example.com/one"
        );
        assert_eq!(
            pls_stream_url("File1=http://example.com/a\n[playlist]").unwrap(),
            "http://example.com/a"
        );
    }

    #[test]
    fn test_pls_value_stops_at_quote() {
        let body = "[playlist]\nFile1=http://example.com/q'junk\nx\ny";
        assert_eq!(pls_stream_url(body).unwrap(), "http://example.com/q");
    }

    #[test]
    fn test_pls_keeps_equals_in_url() {
        let body = "[playlist]\nFile1=http://example.com/s?a=b\nx\ny";
        assert_eq!(pls_stream_url(body).unwrap(), "http://example.com/s?a=b");
    }

    #[test]
    fn test_pls_crlf() {
        let body = "[playlist]\r\nFile1=http://example.com/crlf\r\nTitle1=x\r\nLength1=-1\r\n";
        assert_eq!(pls_stream_url(body).unwrap(), "http://example.com/crlf");
    }

    #[test]
    fn test_pls_empty_and_malformed() {
        assert!(matches!(pls_stream_url(""), Err(ResolutionError::EmptyPlaylist)));
        assert!(matches!(
            pls_stream_url("http://no-equals-here"),
            Err(ResolutionError::MalformedLine(_))
        ));
    }

    #[test]
    fn test_split_lines_breaks() {
        assert_eq!(split_lines("a\r\nb\rc\nd\n"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_pls_bare_cr() {
        let body = "[playlist]\rNumberOfEntries=1\rFile1=http://example.com/s\rTitle1=x\r";
        assert_eq!(pls_stream_url(body).unwrap(), "http://example.com/s");
    }

    #[test]
    fn test_m3u_bare_cr() {
        let body = b"#EXTM3U\rhttp://example.org/cr\r";
        assert_eq!(m3u_stream_url(body).unwrap(), "http://example.org/cr");
    }

    #[test]
    fn test_m3u_quoted_second_line() {
        let body = b"#EXTM3U\n'http://example.org/s'\n";
        assert_eq!(m3u_stream_url(body).unwrap(), "http://example.org/s");
    }

    #[test]
    fn test_m3u_plain_lines() {
        assert_eq!(
            m3u_stream_url(b"#EXTM3U\nhttp://example.org/plain\n").unwrap(),
            "http://example.org/plain"
        );
        assert_eq!(
            m3u_stream_url(b"http://example.org/only").unwrap(),
            "http://example.org/only"
        );
    }

    #[test]
    fn test_m3u_falls_back_to_first_line() {
        let body = b"'http://example.org/first'\n#EXTINF:-1,Name\n";
        assert_eq!(m3u_stream_url(body).unwrap(), "http://example.org/first");
    }

    #[test]
    fn test_m3u_empty() {
        assert!(matches!(m3u_stream_url(b""), Err(ResolutionError::EmptyPlaylist)));
        assert!(matches!(
            m3u_stream_url(b"''"),
            Err(ResolutionError::MalformedLine(_))
        ));
    }

    #[test]
    fn test_resolve_identity_without_network() {
        let resolver = StreamResolver::new();
        for url in [
            "http://example.com/live.mp3",
            "https://example.com/stream?format=aac",
            "",
            "http://example.com/list.m3u8",
        ] {
            let resolved = tokio_test::block_on(resolver.resolve(url)).unwrap();
            assert_eq!(resolved, url);
        }
    }
}
