//! API clients for external services
//!
//! - radio-browser: community station directory search

pub mod radio_browser;

pub use radio_browser::{RadioBrowserClient, SearchError};
