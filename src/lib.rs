//! # paperlens
//!
//! Research-paper search service. Wraps the `paperlens-search` aggregator
//! (Google Scholar, arXiv, IEEE Xplore, Semantic Scholar) in a small JSON
//! HTTP API, and forwards text to an external summarization service.
//!
//! ```no_run
//! # async fn example() -> paperlens::error::Result<()> {
//! let config = paperlens::config::AppConfig::load_or_default(
//!     &paperlens::config::AppConfig::resolve_path(),
//! )?;
//! let server = paperlens::server::PaperServer::start(&config).await?;
//! println!("listening on {}", server.addr());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod summary;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use server::PaperServer;
pub use summary::SummaryClient;
