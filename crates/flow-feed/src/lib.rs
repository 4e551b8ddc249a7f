//! flow-feed
//!
//! Async plumbing between the dashboard state and the two remote
//! collaborators: the paged query endpoint (HTTP) and the live trade
//! stream (WebSocket).

pub mod config;
pub mod error;
pub mod fetcher;
pub mod query;
pub mod stream;
pub mod types;

pub use config::FeedConfig;
pub use error::FeedError;
pub use fetcher::{spawn_fetcher, FetchHandle};
pub use query::{HttpPageSource, PageSource};
pub use stream::StreamConnector;
pub use types::{feed_channel, FeedEvent, FeedRx, FeedTx};
