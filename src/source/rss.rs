//! RSS feed source.
//!
//! Fetches an RSS 2.0 channel over HTTP with [`reqwest`] and parses it with
//! the [`rss`] crate.  RSS has no server-side search, so a topic is applied
//! locally by keeping only items that mention it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{Article, DataSource};

/// An RSS feed data source.
pub struct RssSource {
    /// The feed URL.
    pub url: String,
    /// Label used as each article's `source_name`.
    pub label: String,
}

impl RssSource {
    /// Create a new RSS source.
    ///
    /// # Arguments
    ///
    /// * `url` — full URL of the RSS feed (e.g.
    ///   `https://feeds.bbci.co.uk/news/rss.xml`).
    /// * `label` — short name displayed on cards from this feed.
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }

    /// Parse an already-fetched [`rss::Channel`] into [`Article`]s.
    ///
    /// This is a pure function (no I/O) so that tests can exercise the
    /// parsing logic without hitting the network.
    pub fn parse_channel(channel: &rss::Channel, label: &str) -> Vec<Article> {
        channel
            .items()
            .iter()
            .map(|item| {
                // Parse RFC-2822 date; gracefully degrade to None on failure.
                let published = item
                    .pub_date()
                    .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                    .map(|dt| dt.with_timezone(&Utc));

                let description = item.description().unwrap_or_default().to_string();
                // Prefer full <content:encoded>, fall back to the description.
                let body = item
                    .content()
                    .map(String::from)
                    .unwrap_or_else(|| description.clone());

                Article {
                    title: item.title().unwrap_or("(untitled)").to_string(),
                    source_name: label.to_string(),
                    description,
                    body,
                    link: item.link().map(String::from),
                    published,
                }
            })
            .collect()
    }

    /// Keep only articles that mention `topic`, in feed order.  `None`
    /// keeps everything.
    pub fn filter_topic(mut articles: Vec<Article>, topic: Option<&str>) -> Vec<Article> {
        if let Some(topic) = topic {
            articles.retain(|a| a.mentions(topic));
        }
        articles
    }
}

impl DataSource for RssSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch(&self, topic: Option<&str>) -> Result<Vec<Article>> {
        let body = reqwest::blocking::get(&self.url)
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("requesting {}", self.url))?
            .bytes()?;
        let channel = rss::Channel::read_from(body.as_ref())
            .with_context(|| format!("parsing feed from {}", self.url))?;

        let articles = Self::filter_topic(Self::parse_channel(&channel, &self.label), topic);
        debug!(url = %self.url, ?topic, count = articles.len(), "parsed rss feed");
        Ok(articles)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
