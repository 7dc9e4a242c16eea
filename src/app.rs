use ratatui::widgets::ListState;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::fetch::{FetchOutcome, Fetcher};
use crate::pager::{Pager, PagerError};
use crate::source::Article;

/// Layout settings [`App::new`] refuses to start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Pager(#[from] PagerError),
    #[error("columns must be at least 1 (got {0})")]
    InvalidColumns(usize),
}

/// What the grid area is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// A fetch is in flight and nothing has been loaded for it yet.
    Loading,
    /// The pager holds the latest fetch result (possibly empty).
    Ready,
    /// The latest fetch failed; distinct from an empty `Ready`.
    Unavailable(String),
}

/// Which panel receives the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Topics,
    Grid,
}

pub struct App {
    /// Topics offered in the sidebar.
    pub topics: Vec<String>,
    /// Sidebar cursor.
    pub topic_state: ListState,
    /// Topic whose articles are loaded (or loading); `None` before the user
    /// picks one.
    pub active_topic: Option<usize>,
    /// Articles of the latest fetch, windowed into pages.
    pub pager: Pager<Article>,
    /// Cards per grid row.
    pub columns: usize,
    pub feed: FeedStatus,
    pub focus: Focus,
    /// Card cursor, an index into the current window.
    pub selected_card: usize,
    /// Whether the selected article is shown full-size.
    pub detail_open: bool,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last fetch status message.
    pub status: String,
    fetcher: Fetcher,
}

impl App {
    pub fn new(config: &Config, fetcher: Fetcher) -> Result<Self, AppError> {
        if config.columns == 0 {
            return Err(AppError::InvalidColumns(config.columns));
        }
        let mut pager = Pager::default();
        pager.load(Vec::new(), config.page_size)?;

        let mut topic_state = ListState::default();
        if !config.topics.is_empty() {
            topic_state.select(Some(0));
        }

        Ok(Self {
            topics: config.topics.clone(),
            topic_state,
            active_topic: None,
            pager,
            columns: config.columns,
            feed: FeedStatus::Loading,
            focus: Focus::Topics,
            selected_card: 0,
            detail_open: false,
            quit: false,
            status: "Starting…".into(),
            fetcher,
        })
    }

    pub fn source_name(&self) -> &str {
        self.fetcher.source_name()
    }

    pub fn active_topic_name(&self) -> Option<&str> {
        self.active_topic.and_then(|i| self.topics.get(i)).map(String::as_str)
    }

    // -- fetching ------------------------------------------------------------

    /// Re-fetch the active topic (or the unfiltered feed before one is
    /// chosen).
    pub fn refresh(&mut self) {
        let topic = self.active_topic_name().map(String::from);
        self.fetcher.request(topic.as_deref());
        self.feed = FeedStatus::Loading;
        self.status = match &topic {
            Some(t) => format!("Fetching {t}…"),
            None => "Fetching…".into(),
        };
    }

    /// Make the topic under the sidebar cursor active and fetch it.
    pub fn select_topic(&mut self) {
        let Some(i) = self.topic_state.selected() else {
            return;
        };
        info!(topic = %self.topics[i], "topic selected");
        self.active_topic = Some(i);
        self.refresh();
    }

    /// Apply any fetch result that has arrived.  Called once per tick.
    pub fn poll_fetch(&mut self) {
        if let Some(outcome) = self.fetcher.poll() {
            self.apply_fetch(outcome);
        }
    }

    pub fn is_fetching(&self) -> bool {
        self.fetcher.in_flight()
    }

    /// Replace the displayed collection with a fetch outcome.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) {
        match outcome.result {
            Ok(items) => {
                let count = items.len();
                let state = self.pager.replace(items);
                debug!(topic = ?outcome.topic, ?state, "pager loaded");
                self.feed = FeedStatus::Ready;
                self.status = format!("Fetched {count} articles");
            }
            Err(e) => {
                self.pager.replace(Vec::new());
                self.status = format!("Error: {e}");
                self.feed = FeedStatus::Unavailable(e);
            }
        }
        self.selected_card = 0;
        self.detail_open = false;
    }

    // -- pages ---------------------------------------------------------------

    pub fn next_page(&mut self) {
        let before = self.pager.state().current_page;
        if self.pager.next_page().current_page != before {
            self.selected_card = 0;
        }
    }

    pub fn previous_page(&mut self) {
        let before = self.pager.state().current_page;
        if self.pager.previous_page().current_page != before {
            self.selected_card = 0;
        }
    }

    // -- topics sidebar ------------------------------------------------------

    pub fn topic_next(&mut self) {
        if self.topics.is_empty() {
            return;
        }
        let i = match self.topic_state.selected() {
            Some(i) => (i + 1).min(self.topics.len() - 1),
            None => 0,
        };
        self.topic_state.select(Some(i));
    }

    pub fn topic_previous(&mut self) {
        if self.topics.is_empty() {
            return;
        }
        let i = match self.topic_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.topic_state.select(Some(i));
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Topics => Focus::Grid,
            Focus::Grid => Focus::Topics,
        };
    }

    // -- card grid -----------------------------------------------------------

    pub fn selected_article(&self) -> Option<&Article> {
        self.pager.current_window().get(self.selected_card)
    }

    fn move_card(&mut self, target: Option<usize>) {
        if let Some(i) = target.filter(|&i| i < self.pager.current_window().len()) {
            self.selected_card = i;
        }
    }

    pub fn card_left(&mut self) {
        if self.selected_card % self.columns > 0 {
            self.move_card(Some(self.selected_card - 1));
        }
    }

    pub fn card_right(&mut self) {
        if self.selected_card % self.columns + 1 < self.columns {
            self.move_card(Some(self.selected_card + 1));
        }
    }

    pub fn card_up(&mut self) {
        self.move_card(self.selected_card.checked_sub(self.columns));
    }

    pub fn card_down(&mut self) {
        self.move_card(Some(self.selected_card + self.columns));
    }

    pub fn open_detail(&mut self) {
        if self.selected_article().is_some() {
            self.detail_open = true;
        }
    }

    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::source::DummySource;

    pub(crate) fn dummy_app() -> App {
        App::new(&Config::default(), Fetcher::new(Arc::new(DummySource))).unwrap()
    }

    /// An app with the fifteen sample articles loaded.
    pub(crate) fn loaded_app() -> App {
        let mut app = dummy_app();
        app.refresh();
        let outcome = app.fetcher.wait().unwrap();
        app.apply_fetch(outcome);
        app
    }

    fn outcome(result: Result<Vec<Article>, String>) -> FetchOutcome {
        FetchOutcome { seq: 1, topic: None, result }
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_loading_with_cursor_on_first_topic() {
        let app = dummy_app();
        assert_eq!(app.feed, FeedStatus::Loading);
        assert_eq!(app.topic_state.selected(), Some(0));
        assert!(app.active_topic.is_none());
        assert!(app.pager.is_empty());
        assert!(!app.quit);
    }

    #[test]
    fn new_rejects_zero_page_size() {
        let config = Config { page_size: 0, ..Config::default() };
        let err = App::new(&config, Fetcher::new(Arc::new(DummySource))).err();
        assert_eq!(err, Some(AppError::Pager(PagerError::InvalidPageSize(0))));
    }

    #[test]
    fn new_rejects_zero_columns() {
        let config = Config { columns: 0, ..Config::default() };
        let err = App::new(&config, Fetcher::new(Arc::new(DummySource))).err();
        assert_eq!(err, Some(AppError::InvalidColumns(0)));
    }

    // -- fetch results -------------------------------------------------------

    #[test]
    fn fetch_loads_first_page_of_six() {
        let app = loaded_app();
        assert_eq!(app.feed, FeedStatus::Ready);
        assert_eq!(app.pager.page_label(), (1, 3));
        assert_eq!(app.pager.current_window().len(), 6);
        assert_eq!(app.status, "Fetched 15 articles");
    }

    #[test]
    fn empty_result_is_ready_not_unavailable() {
        let mut app = loaded_app();
        app.apply_fetch(outcome(Ok(vec![])));
        assert_eq!(app.feed, FeedStatus::Ready);
        assert!(app.pager.is_empty());
        assert_eq!(app.pager.page_label(), (1, 1));
    }

    #[test]
    fn failed_fetch_clears_content_and_is_unavailable() {
        let mut app = loaded_app();
        app.apply_fetch(outcome(Err("network down".into())));
        assert_eq!(app.feed, FeedStatus::Unavailable("network down".into()));
        assert!(app.pager.is_empty());
        assert!(app.status.contains("network down"));
    }

    #[test]
    fn new_fetch_rewinds_to_first_page() {
        let mut app = loaded_app();
        app.next_page();
        app.next_page();
        assert_eq!(app.pager.page_label(), (3, 3));

        app.apply_fetch(outcome(Ok(DummySource::articles())));
        assert_eq!(app.pager.page_label(), (1, 3));
    }

    #[test]
    fn select_topic_marks_it_active_and_fetches() {
        let mut app = loaded_app();
        app.topic_next();
        app.topic_next();
        app.select_topic();

        assert_eq!(app.active_topic_name(), Some("Science"));
        assert_eq!(app.feed, FeedStatus::Loading);
        assert_eq!(app.status, "Fetching Science…");

        let outcome = app.fetcher.wait().unwrap();
        assert_eq!(outcome.topic.as_deref(), Some("Science"));
        app.apply_fetch(outcome);
        assert_eq!(app.feed, FeedStatus::Ready);
    }

    // -- paging --------------------------------------------------------------

    #[test]
    fn paging_resets_card_cursor() {
        let mut app = loaded_app();
        app.card_down();
        app.card_right();
        assert_eq!(app.selected_card, 3);

        app.next_page();
        assert_eq!(app.selected_card, 0);
        assert_eq!(app.selected_article().unwrap().title, "New JavaScript Framework Released");
    }

    #[test]
    fn paging_past_the_end_keeps_cursor() {
        let mut app = loaded_app();
        app.next_page();
        app.next_page();
        app.card_right();
        app.next_page();
        assert_eq!(app.selected_card, 1, "no-op navigation leaves the card cursor alone");
    }

    // -- topics sidebar ------------------------------------------------------

    #[test]
    fn topic_cursor_clamps_at_both_ends() {
        let mut app = dummy_app();
        app.topic_previous();
        assert_eq!(app.topic_state.selected(), Some(0));

        for _ in 0..20 {
            app.topic_next();
        }
        assert_eq!(app.topic_state.selected(), Some(5));
    }

    #[test]
    fn toggle_focus_alternates() {
        let mut app = dummy_app();
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Grid);
        app.toggle_focus();
        assert_eq!(app.focus, Focus::Topics);
    }

    // -- card grid -----------------------------------------------------------

    #[test]
    fn card_cursor_moves_within_two_columns() {
        let mut app = loaded_app();
        app.card_left();
        assert_eq!(app.selected_card, 0);
        app.card_right();
        assert_eq!(app.selected_card, 1);
        app.card_right();
        assert_eq!(app.selected_card, 1, "right edge of the row");
        app.card_down();
        app.card_down();
        assert_eq!(app.selected_card, 5);
        app.card_down();
        assert_eq!(app.selected_card, 5, "bottom of the page");
        app.card_up();
        assert_eq!(app.selected_card, 3);
    }

    #[test]
    fn card_cursor_stays_inside_a_short_last_page() {
        let mut app = loaded_app();
        app.next_page();
        app.next_page();
        // Items 13..15: row 0 has two cards, row 1 has one.
        app.card_right();
        app.card_down();
        assert_eq!(app.selected_card, 1, "no card below the right column");
        app.card_left();
        app.card_down();
        assert_eq!(app.selected_card, 2);
    }

    #[test]
    fn detail_opens_only_with_an_article() {
        let mut app = dummy_app();
        app.open_detail();
        assert!(!app.detail_open);

        let mut app = loaded_app();
        app.open_detail();
        assert!(app.detail_open);
        app.close_detail();
        assert!(!app.detail_open);
    }
}
