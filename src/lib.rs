//! es-scroll: a scroll-cursor client for Elasticsearch-style search APIs
//!
//! Runs a JSON query against a `_search` endpoint and pages through large result
//! sets with scroll cursors, either one page at a time or by draining the whole set.
//!
//! ```no_run
//! # async fn run() -> es_scroll::error::Result<()> {
//! use es_scroll::ScrollClient;
//!
//! let client = ScrollClient::new(
//!     "http://localhost:9200/companydatabase/_search",
//!     Some(r#"{"query":{"match_all":{}}}"#),
//! )?;
//! let first = client.search_with_cursor().await?;
//! let second = client.advance(&first).await?;
//! # let _ = second;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod endpoint;
pub mod error;
pub mod network;
pub mod response;
pub mod scroll;

use std::time::Duration;

pub use config::Settings;
pub use endpoint::Endpoint;
pub use error::{ClientError, Result, SourceError};
pub use network::{HttpClient, Transport};
pub use response::{Hit, Page};
pub use scroll::ScrollClient;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lifetime requested for a scroll cursor, re-armed on every advance
pub const SCROLL_KEEP_ALIVE: &str = "1m";

/// Timeout of a ping request
pub const PING_TIMEOUT: Duration = Duration::from_secs(3);
