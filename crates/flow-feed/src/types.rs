//! Events flowing from the network tasks to the dashboard loop.
//!
//! Stream events carry the generation of the connection that produced
//! them so the consumer can drop events from a superseded connection
//! (see [`crate::StreamConnector::is_current`]).

use flow_core::OptionsFlow;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A debounced request with this sequence number was issued.
    FetchStarted { seq: u64 },
    PageLoaded {
        seq: u64,
        page: usize,
        rows: Vec<OptionsFlow>,
    },
    PageFailed { seq: u64, reason: String },

    StreamOpened { generation: u64 },
    StreamRecord { generation: u64, record: OptionsFlow },
    StreamClosed { generation: u64 },
}

pub type FeedTx = mpsc::UnboundedSender<FeedEvent>;
pub type FeedRx = mpsc::UnboundedReceiver<FeedEvent>;

pub fn feed_channel() -> (FeedTx, FeedRx) {
    mpsc::unbounded_channel()
}
