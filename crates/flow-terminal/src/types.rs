// crates/flow-terminal/src/types.rs

use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use flow_core::ViewMode;
use flow_feed::FeedConfig;
use serde::Deserialize;
use thiserror::Error;

/// Configuration for the terminal, usually loaded from a TOML file.
///
/// ```toml
/// view = "standard"
/// start_live = true
///
/// [feed]
/// query_url = "https://example.net/options_flow_query"
/// stream_url = "wss://example.net/ws/"
/// debounce_ms = 300
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub feed: FeedConfig,
    pub view: ViewSetting,
    /// Connect to the live stream at startup.
    pub start_live: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            view: ViewSetting::Compact,
            start_live: true,
        }
    }
}

impl ClientConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// View mode as written in config files and on the command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewSetting {
    #[default]
    Compact,
    Standard,
}

impl From<ViewSetting> for ViewMode {
    fn from(setting: ViewSetting) -> Self {
        match setting {
            ViewSetting::Compact => ViewMode::Compact,
            ViewSetting::Standard => ViewMode::Standard,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert!(config.start_live);
    }

    #[test]
    fn partial_feed_table_keeps_other_defaults() {
        let config = ClientConfig::from_toml_str(
            r#"
            view = "standard"
            start_live = false

            [feed]
            query_url = "http://localhost:8080/query"
            debounce_ms = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.view, ViewSetting::Standard);
        assert!(!config.start_live);
        assert_eq!(config.feed.query_url, "http://localhost:8080/query");
        assert_eq!(config.feed.debounce_ms, 50);
        assert_eq!(config.feed.stream_url, FeedConfig::default().stream_url);
    }

    #[test]
    fn unknown_view_is_rejected() {
        assert!(ClientConfig::from_toml_str(r#"view = "dense""#).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ClientConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn view_setting_maps_to_view_mode() {
        assert_eq!(ViewMode::from(ViewSetting::Standard), ViewMode::Standard);
        assert_eq!(ViewMode::from(ViewSetting::Compact), ViewMode::Compact);
    }
}
