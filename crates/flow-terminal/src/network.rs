// crates/flow-terminal/src/network.rs

use flow_core::{Action, Effect};
use flow_feed::{
    feed_channel, spawn_fetcher, FeedConfig, FeedError, FeedEvent, FeedRx, FetchHandle,
    HttpPageSource, StreamConnector,
};
use tracing::{debug, info};

/// Glue between the dashboard reducer and the feed tasks.
///
/// Carries out [`Effect`]s and turns [`FeedEvent`]s back into
/// [`Action`]s. Stream events from a connection that has since been
/// replaced or stopped are dropped here.
pub struct FeedBridge {
    fetcher: FetchHandle,
    stream: StreamConnector,
    events: FeedRx,
}

impl FeedBridge {
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let (tx, events) = feed_channel();
        let source = HttpPageSource::new(config)?;
        let fetcher = spawn_fetcher(source, config.debounce(), tx.clone());
        let stream = StreamConnector::new(config.stream_url.clone(), tx);

        info!(query_url = %config.query_url, stream_url = %config.stream_url, "feed ready");
        Ok(Self {
            fetcher,
            stream,
            events,
        })
    }

    pub fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch(params) => self.fetcher.request(params),
                Effect::StartStream => {
                    self.stream.start();
                }
                Effect::StopStream => self.stream.stop(),
            }
        }
    }

    /// Next pending action without waiting.
    pub fn try_next(&mut self) -> Option<Action> {
        while let Ok(event) = self.events.try_recv() {
            if let Some(action) = to_action(event, |g| self.stream.is_current(g)) {
                return Some(action);
            }
        }
        None
    }

    /// Wait for the next action. `None` once every feed task is gone.
    pub async fn next(&mut self) -> Option<Action> {
        loop {
            let event = self.events.recv().await?;
            if let Some(action) = to_action(event, |g| self.stream.is_current(g)) {
                return Some(action);
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.stream.stop();
    }
}

fn to_action(event: FeedEvent, is_current: impl Fn(u64) -> bool) -> Option<Action> {
    match event {
        FeedEvent::FetchStarted { seq } => Some(Action::FetchStarted { seq }),
        FeedEvent::PageLoaded { seq, page, rows } => Some(Action::PageLoaded { seq, page, rows }),
        FeedEvent::PageFailed { seq, reason } => Some(Action::PageFailed { seq, reason }),
        FeedEvent::StreamOpened { generation }
        | FeedEvent::StreamClosed { generation }
        | FeedEvent::StreamRecord { generation, .. }
            if !is_current(generation) =>
        {
            debug!(generation, "dropping event from a stale stream");
            None
        }
        FeedEvent::StreamOpened { .. } => Some(Action::StreamOpened),
        FeedEvent::StreamClosed { .. } => Some(Action::StreamClosed),
        FeedEvent::StreamRecord { record, .. } => Some(Action::StreamRecord(record)),
    }
}
