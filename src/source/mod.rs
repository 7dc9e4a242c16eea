//! Content sources.
//!
//! This module defines the [`DataSource`] trait and the common [`Article`]
//! type.  Concrete implementations live in sub-modules:
//!
//! * [`dummy`] — the built-in sample collection (default, never fails).
//! * [`rss`] — an RSS 2.0 feed over HTTP.
//! * [`newsapi`] — the newsapi.org `everything` search endpoint.
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `atom.rs`).
//! 2. Define a struct and implement [`DataSource`] for it.
//! 3. Add `mod atom;` below and re-export your struct in the `pub use` block.
//! 4. Add a [`SourceKind`](crate::config::SourceKind) variant and build it in
//!    [`crate::config::Config::build_source`].

mod article;
mod dummy;
mod newsapi;
mod rss;

pub use article::Article;
pub use dummy::DummySource;
pub use newsapi::NewsApiSource;
pub use rss::RssSource;

use anyhow::Result;

/// Trait that every content source must implement.
///
/// [`Fetcher`](crate::fetch::Fetcher) calls [`fetch()`](DataSource::fetch) on
/// a worker thread while sharing the source between requests, so
/// implementations must be [`Send`] and [`Sync`].
pub trait DataSource: Send + Sync {
    /// Human-readable label shown in the status bar.
    fn name(&self) -> &str;

    /// Fetch the articles for `topic` (or the source's default selection when
    /// `None`), in display order.
    ///
    /// An `Ok` with an empty vec means "no results"; an `Err` means the
    /// content could not be obtained at all.  The UI shows the two
    /// differently.
    fn fetch(&self, topic: Option<&str>) -> Result<Vec<Article>>;
}
