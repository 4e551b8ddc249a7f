//! Live trade stream connector.
//!
//! Owns at most one connection task. `start` always tears down the
//! previous connection first, and each connection gets a new generation
//! number that tags its events. Nothing is ever sent to the server and
//! there is no automatic reconnect.

use flow_protocol::{decode_stream_message, StreamFrame};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::error::FeedError;
use crate::types::{FeedEvent, FeedTx};

#[derive(Debug)]
pub struct StreamConnector {
    url: String,
    events: FeedTx,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl StreamConnector {
    pub fn new(url: impl Into<String>, events: FeedTx) -> Self {
        Self {
            url: url.into(),
            events,
            generation: 0,
            task: None,
        }
    }

    /// Open a new connection, closing the current one first.
    ///
    /// Returns the generation tagging the new connection's events.
    pub fn start(&mut self) -> u64 {
        self.stop();
        self.generation += 1;
        let generation = self.generation;

        info!(generation, url = %self.url, "starting stream");
        self.task = Some(tokio::spawn(run_stream(
            self.url.clone(),
            generation,
            self.events.clone(),
        )));
        generation
    }

    /// Close the connection, if any. Idempotent.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!(generation = self.generation, "stream stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Whether an event tagged `generation` comes from the live connection.
    pub fn is_current(&self, generation: u64) -> bool {
        self.task.is_some() && generation == self.generation
    }
}

impl Drop for StreamConnector {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_stream(url: String, generation: u64, events: FeedTx) {
    if let Err(err) = stream_session(&url, generation, &events).await {
        warn!(generation, url = %url, error = %err, "stream ended with error");
    }
    let _ = events.send(FeedEvent::StreamClosed { generation });
}

async fn stream_session(url: &str, generation: u64, events: &FeedTx) -> Result<(), FeedError> {
    let (mut ws, _response) = connect_async(url).await?;
    info!(generation, "stream connected");
    let _ = events.send(FeedEvent::StreamOpened { generation });

    while let Some(msg) = ws.next().await {
        match msg? {
            Message::Text(text) => handle_text(&text, generation, events),
            Message::Close(frame) => {
                info!(generation, ?frame, "stream closed by server");
                break;
            }
            Message::Binary(_) => debug!(generation, "ignoring binary frame"),
            _ => {}
        }
    }

    Ok(())
}

fn handle_text(text: &str, generation: u64, events: &FeedTx) {
    match decode_stream_message(text) {
        Ok(StreamFrame::Trade(record)) => {
            let _ = events.send(FeedEvent::StreamRecord { generation, record });
        }
        Ok(StreamFrame::Ignored) => debug!(generation, "ignoring non-trade frame"),
        Err(err) => warn!(generation, error = %err, "dropping malformed frame"),
    }
}
