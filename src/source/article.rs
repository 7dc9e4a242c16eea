//! The content record shared across all sources.
//!
//! `Article` is what every [`DataSource`](super::DataSource) produces and what
//! the pager windows over.  Sources convert their native format (RSS items,
//! news API JSON, built-in samples) into `Article`s so the rest of the
//! application stays source-agnostic.

use chrono::{DateTime, Utc};

/// Characters of body text shown on a card before it is cut off.
pub const PREVIEW_CHARS: usize = 150;

/// A single fetched article.  Never modified after the fetch that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Headline.
    pub title: String,

    /// Name of the outlet or feed this came from (e.g. "Tech Daily").
    pub source_name: String,

    /// Short standfirst shown under the title.
    pub description: String,

    /// Full article text.  Cards show a [`preview`](Article::preview); the
    /// detail view shows all of it.
    pub body: String,

    /// URL to the full content, when the source provides one.
    pub link: Option<String>,

    /// Publication timestamp, when the source provides one.
    pub published: Option<DateTime<Utc>>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        source_name: impl Into<String>,
        description: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            source_name: source_name.into(),
            description: description.into(),
            body: body.into(),
            link: None,
            published: None,
        }
    }

    /// The first [`PREVIEW_CHARS`] characters of the body followed by `...`.
    ///
    /// Counts characters, not bytes, so multi-byte text is never split.
    pub fn preview(&self) -> String {
        let head: String = self.body.chars().take(PREVIEW_CHARS).collect();
        format!("{head}...")
    }

    /// Case-insensitive match of `topic` against title and description.
    pub fn mentions(&self, topic: &str) -> bool {
        let needle = topic.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_bodies() {
        let article = Article::new("t", "s", "d", "x".repeat(400));
        let preview = article.preview();
        assert_eq!(preview.len(), PREVIEW_CHARS + 3);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_keeps_short_bodies_whole() {
        let article = Article::new("t", "s", "d", "Short body.");
        assert_eq!(article.preview(), "Short body....");
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let article = Article::new("t", "s", "d", "é".repeat(200));
        assert_eq!(article.preview().chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn mentions_is_case_insensitive() {
        let article = Article::new("SpaceX Launches Starship", "s", "A new era in space", "");
        assert!(article.mentions("space"));
        assert!(article.mentions("STARSHIP"));
        assert!(!article.mentions("python"));
    }
}
