//! Error types for the paperlens service.

/// Top-level error type for the paper search service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Paper search error.
    #[error("search error: {0}")]
    Search(#[from] paperlens_search::SearchError),

    /// Summarization service error.
    #[error("summary error: {0}")]
    Summary(String),

    /// HTTP server error (bind, address lookup).
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
