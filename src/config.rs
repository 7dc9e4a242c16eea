//! Configuration: an optional TOML file, overridden by command-line flags.
//!
//! Every field has a default, so a missing file is equivalent to an empty
//! one.  The file is looked up at `<config dir>/newsdeck/config.toml` unless
//! `--config` points elsewhere.
//!
//! ```toml
//! page_size = 6
//! columns = 2
//! topics = ["Technology", "Programming", "Science"]
//!
//! [source]
//! kind = "rss"
//! url = "https://feeds.bbci.co.uk/news/rss.xml"
//! label = "BBC"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::pager::DEFAULT_PAGE_SIZE;
use crate::source::{DataSource, DummySource, NewsApiSource, RssSource};

/// Cards per grid row when nothing else is configured.
pub const DEFAULT_COLUMNS: usize = 2;

pub const DEFAULT_TOPICS: [&str; 6] = [
    "Technology",
    "Programming",
    "Science",
    "AI",
    "Space",
    "Cybersecurity",
];

/// Problems found by [`Config::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page_size must be at least 1")]
    ZeroPageSize,
    #[error("columns must be at least 1")]
    ZeroColumns,
    #[error("at least one topic is required")]
    NoTopics,
    #[error("source kind `rss` requires a url")]
    MissingUrl,
    #[error("source kind `newsapi` requires an api_key")]
    MissingApiKey,
}

/// Which [`DataSource`] implementation to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Built-in sample articles.
    #[default]
    Dummy,
    /// An RSS 2.0 feed.
    Rss,
    /// newsapi.org search.
    Newsapi,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// Feed URL for `rss`, endpoint override for `newsapi`.
    pub url: Option<String>,
    /// Display label for `rss` articles.
    pub label: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub page_size: usize,
    pub columns: usize,
    pub topics: Vec<String>,
    pub source: SourceConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
            columns: DEFAULT_COLUMNS,
            topics: DEFAULT_TOPICS.iter().map(|t| t.to_string()).collect(),
            source: SourceConfig::default(),
        }
    }
}

/// A terminal news reader with a paginated card grid.
#[derive(Debug, Default, Parser)]
#[command(name = "newsdeck", version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write the log (the terminal is owned by the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Articles per page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Cards per grid row
    #[arg(long)]
    pub columns: Option<usize>,

    /// Content source
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,

    /// Feed URL (rss) or endpoint override (newsapi)
    #[arg(long)]
    pub url: Option<String>,

    /// newsapi.org API key
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

impl Config {
    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "newsdeck").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing config")
    }

    /// Read `path`.  A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_toml(&text).with_context(|| format!("in {}", path.display()))?;
                info!(path = %path.display(), "loaded config");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    /// Load from `--config` or the default location, apply the command-line
    /// overrides and validate the result.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match cli.config.clone().or_else(Self::default_path) {
            Some(path) => Self::load(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(n) = cli.page_size {
            self.page_size = n;
        }
        if let Some(n) = cli.columns {
            self.columns = n;
        }
        if let Some(kind) = cli.source {
            self.source.kind = kind;
        }
        if let Some(url) = &cli.url {
            self.source.url = Some(url.clone());
        }
        if let Some(key) = &cli.api_key {
            self.source.api_key = Some(key.clone());
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.columns == 0 {
            return Err(ConfigError::ZeroColumns);
        }
        if self.topics.is_empty() {
            return Err(ConfigError::NoTopics);
        }
        match self.source.kind {
            SourceKind::Rss if self.source.url.is_none() => Err(ConfigError::MissingUrl),
            SourceKind::Newsapi if self.source.api_key.is_none() => Err(ConfigError::MissingApiKey),
            _ => Ok(()),
        }
    }

    /// Construct the configured source.  Call after [`validate`](Self::validate).
    pub fn build_source(&self) -> Result<Arc<dyn DataSource>, ConfigError> {
        let src = &self.source;
        let source: Arc<dyn DataSource> = match src.kind {
            SourceKind::Dummy => Arc::new(DummySource),
            SourceKind::Rss => {
                let url = src.url.clone().ok_or(ConfigError::MissingUrl)?;
                let label = src.label.clone().unwrap_or_else(|| "RSS".into());
                Arc::new(RssSource::new(url, label))
            }
            SourceKind::Newsapi => {
                let key = src.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
                match &src.url {
                    Some(endpoint) => Arc::new(NewsApiSource::with_endpoint(endpoint.clone(), key)),
                    None => Arc::new(NewsApiSource::new(key)),
                }
            }
        };
        Ok(source)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
