//! Error types for the paperlens-search crate.
//!
//! Errors carry stable string messages. They never escape the aggregation
//! pipeline: a failing source is logged and contributes an empty list, so
//! callers of [`crate::aggregate`] only ever see [`SearchError::Config`].

/// Errors that can occur while fetching papers from a source.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to a source failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a source response (HTML, Atom feed or JSON).
    #[error("parse error: {0}")]
    Parse(String),

    /// The browser session could not navigate or resolve a link.
    #[error("navigation error: {0}")]
    Navigation(String),

    /// Invalid aggregator configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for paperlens-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("invalid atom xml".into());
        assert_eq!(err.to_string(), "parse error: invalid atom xml");
    }

    #[test]
    fn display_navigation() {
        let err = SearchError::Navigation("no page loaded".into());
        assert_eq!(err.to_string(), "navigation error: no page loaded");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("max_results must be > 0".into());
        assert_eq!(err.to_string(), "config error: max_results must be > 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
