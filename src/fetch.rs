//! Background content fetching.
//!
//! Each [`Fetcher::request`] spawns a worker thread that calls the configured
//! [`DataSource`] once and sends the outcome back to the UI thread over an
//! [`mpsc`] channel.  Requests are fire-and-forget: selecting a new topic
//! does not cancel the previous worker.
//!
//! Every request is tagged with a monotonically increasing number.
//! [`Fetcher::poll`] only hands back the outcome of the most recently issued
//! request, so a slow response for an old topic can never overwrite the
//! collection loaded for a newer one.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{mpsc, Arc};
use std::thread;

use tracing::{debug, info, warn};

use crate::source::{Article, DataSource};

/// One completed fetch, delivered exactly once per request.
#[derive(Debug)]
pub struct FetchOutcome {
    /// Request number this outcome answers.
    pub seq: u64,
    /// Topic the request was made for.
    pub topic: Option<String>,
    /// The articles, or a description of why none could be fetched.
    pub result: Result<Vec<Article>, String>,
}

/// Issues fetches and filters out superseded results.
pub struct Fetcher {
    source: Arc<dyn DataSource>,
    tx: mpsc::Sender<FetchOutcome>,
    rx: mpsc::Receiver<FetchOutcome>,
    /// Number of the most recently issued request (0 = none yet).
    latest: u64,
    /// Whether the latest request's outcome has been handed out.
    delivered: bool,
}

impl Fetcher {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tx,
            rx,
            latest: 0,
            delivered: true,
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Start fetching `topic` in the background and return its request
    /// number.  Any request still in flight is superseded.
    pub fn request(&mut self, topic: Option<&str>) -> u64 {
        self.latest += 1;
        self.delivered = false;
        let seq = self.latest;
        let topic = topic.map(String::from);
        info!(seq, ?topic, source = self.source.name(), "fetch requested");

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let fetched = panic::catch_unwind(AssertUnwindSafe(|| source.fetch(topic.as_deref())));
            let result = match fetched {
                Ok(Ok(items)) => Ok(items),
                Ok(Err(e)) => Err(format!("{}: {e:#}", source.name())),
                Err(_) => Err(format!("{}: fetch panicked", source.name())),
            };
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send(FetchOutcome { seq, topic, result });
        });

        seq
    }

    /// True while the latest request has not been delivered by
    /// [`poll`](Self::poll).
    pub fn in_flight(&self) -> bool {
        !self.delivered
    }

    /// Drain finished workers without blocking.
    ///
    /// Returns the outcome of the latest request if it has arrived; outcomes
    /// of superseded requests are dropped.
    pub fn poll(&mut self) -> Option<FetchOutcome> {
        while let Ok(outcome) = self.rx.try_recv() {
            if let Some(current) = self.accept(outcome) {
                return Some(current);
            }
        }
        None
    }

    /// Block until the latest request is delivered.
    #[cfg(test)]
    pub fn wait(&mut self) -> Option<FetchOutcome> {
        if self.delivered {
            return None;
        }
        // `self.tx` keeps the channel open, so `recv` only fails if a worker
        // never sends, which `catch_unwind` rules out.
        while let Ok(outcome) = self.rx.recv() {
            if let Some(current) = self.accept(outcome) {
                return Some(current);
            }
        }
        None
    }

    fn accept(&mut self, outcome: FetchOutcome) -> Option<FetchOutcome> {
        if outcome.seq != self.latest {
            debug!(seq = outcome.seq, latest = self.latest, "discarding stale fetch result");
            return None;
        }
        self.delivered = true;
        match &outcome.result {
            Ok(items) => info!(seq = outcome.seq, count = items.len(), "fetch complete"),
            Err(e) => warn!(seq = outcome.seq, error = %e, "fetch failed"),
        }
        Some(outcome)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
