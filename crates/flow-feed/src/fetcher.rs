//! Debounced paged fetcher.
//!
//! Requests arriving within the debounce window of the previous one
//! restart the window; only the latest parameters are sent. Every issued
//! request gets the next sequence number so the consumer can ignore a
//! response that was overtaken by a newer one. In-flight requests are
//! never cancelled.

use std::sync::Arc;
use std::time::Duration;

use flow_core::QueryParams;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::query::PageSource;
use crate::types::{FeedEvent, FeedTx};

/// Handle to a running fetcher task. Dropping it stops scheduling.
#[derive(Debug)]
pub struct FetchHandle {
    tx: mpsc::UnboundedSender<QueryParams>,
    task: JoinHandle<()>,
}

impl FetchHandle {
    /// Schedule a fetch for these parameters (debounced).
    pub fn request(&self, params: QueryParams) {
        if self.tx.send(params).is_err() {
            warn!("fetcher task is gone; request dropped");
        }
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub fn spawn_fetcher<S: PageSource>(source: S, debounce: Duration, events: FeedTx) -> FetchHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_fetcher(Arc::new(source), debounce, rx, events));
    FetchHandle { tx, task }
}

async fn run_fetcher<S: PageSource>(
    source: Arc<S>,
    debounce: Duration,
    mut rx: mpsc::UnboundedReceiver<QueryParams>,
    events: FeedTx,
) {
    let mut seq: u64 = 0;

    while let Some(mut params) = rx.recv().await {
        loop {
            match tokio::time::timeout(debounce, rx.recv()).await {
                Ok(Some(newer)) => params = newer,
                Ok(None) => return,
                Err(_elapsed) => break,
            }
        }

        seq += 1;
        debug!(seq, page = params.page, "issuing page request");
        if events.send(FeedEvent::FetchStarted { seq }).is_err() {
            return;
        }

        let source = Arc::clone(&source);
        let events = events.clone();
        tokio::spawn(async move {
            let page = params.page;
            let event = match source.fetch_page(params).await {
                Ok(rows) => {
                    debug!(seq, page, rows = rows.len(), "page loaded");
                    FeedEvent::PageLoaded { seq, page, rows }
                }
                Err(err) => {
                    warn!(seq, page, error = %err, "page request failed");
                    FeedEvent::PageFailed {
                        seq,
                        reason: err.to_string(),
                    }
                }
            };
            let _ = events.send(event);
        });
    }
}
