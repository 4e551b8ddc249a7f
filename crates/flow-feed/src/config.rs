//! Configuration for the query and stream endpoints.
//!
//! Defaults can be overridden from a TOML `[feed]` table (see the
//! terminal crate) and then from environment variables:
//!
//! - `FLOW_QUERY_URL`          (default: the public query endpoint)
//! - `FLOW_STREAM_URL`         (default: the public stream endpoint)
//! - `FLOW_DEBOUNCE_MS`        (default: "300")
//! - `FLOW_REQUEST_TIMEOUT_MS` (default: "10000")

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::FeedError;

pub const DEFAULT_QUERY_URL: &str = "https://api.quantview.net/options_flow_query_nextjs";
pub const DEFAULT_STREAM_URL: &str = "wss://api.quantview.net/ws/";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Paged query endpoint (HTTP POST, JSON body).
    pub query_url: String,

    /// Live trade stream (WebSocket).
    pub stream_url: String,

    /// Quiet period before a burst of page/sort/filter changes is sent.
    pub debounce_ms: u64,

    pub request_timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            query_url: DEFAULT_QUERY_URL.to_string(),
            stream_url: DEFAULT_STREAM_URL.to_string(),
            debounce_ms: 300,
            request_timeout_ms: 10_000,
        }
    }
}

impl FeedConfig {
    /// Defaults overridden by environment variables.
    pub fn from_env() -> Result<Self, FeedError> {
        Self::default().with_env()
    }

    /// Override fields that are set in the environment.
    ///
    /// Malformed numeric values are an error rather than silently
    /// falling back.
    pub fn with_env(self) -> Result<Self, FeedError> {
        Ok(FeedConfig {
            query_url: env::var("FLOW_QUERY_URL").unwrap_or(self.query_url),
            stream_url: env::var("FLOW_STREAM_URL").unwrap_or(self.stream_url),
            debounce_ms: read_env_or_default("FLOW_DEBOUNCE_MS", self.debounce_ms)?,
            request_timeout_ms: read_env_or_default(
                "FLOW_REQUEST_TIMEOUT_MS",
                self.request_timeout_ms,
            )?,
        })
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T, FeedError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map_err(|e| FeedError::Config(format!("{}={:?}: {}", key, val, e))),
        Err(_) => Ok(default),
    }
}
