//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Where the reference data lives
    #[serde(default)]
    pub source: SourceConfig,

    /// CSV output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::config("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::config("crawler.timeout_secs must be > 0"));
        }
        if Url::parse(&self.source.index_url).is_err() {
            return Err(AppError::config(format!(
                "source.index_url is not an absolute URL: {}",
                self.source.index_url
            )));
        }
        if !self.output.delimiter.is_ascii() {
            return Err(AppError::config("output.delimiter must be an ASCII character"));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Pause between detail page requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Reference data location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// National index page listing every territorial unit
    #[serde(default = "defaults::index_url")]
    pub index_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            index_url: defaults::index_url(),
        }
    }
}

/// CSV output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Field delimiter
    #[serde(default = "defaults::delimiter")]
    pub delimiter: char,

    /// How the header row is derived from the records
    #[serde(default)]
    pub header: HeaderPolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: defaults::delimiter(),
            header: HeaderPolicy::default(),
        }
    }
}

/// Source of the CSV header columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderPolicy {
    /// Keys of the first record only; keys that appear later are dropped
    #[default]
    FirstRecord,
    /// Keys of every record, in order of first appearance
    Union,
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; volby-scraper/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        100
    }
    pub fn index_url() -> String {
        "https://www.volby.cz/pls/ps2017nss/ps3?xjazyk=CZ".into()
    }
    pub fn delimiter() -> char {
        ';'
    }
}
