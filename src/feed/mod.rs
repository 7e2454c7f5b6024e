use crate::error::SourceError;
use crate::models::{Bar, Timeframe};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// One update from a live feed subscription
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A completed or updated bar for the subscribed timeframe
    Bar(Bar),
    /// The source reported a problem with this stream
    Error(String),
}

/// A cancellable stream of bar updates for one (instrument, timeframe)
///
/// `stop()` detaches the producer immediately: no event is delivered
/// afterwards, including ones already buffered. Stopping twice is a no-op,
/// and dropping the subscription stops it.
pub struct FeedSubscription {
    events: mpsc::Receiver<FeedEvent>,
    producer: Option<AbortHandle>,
    stopped: bool,
}

impl FeedSubscription {
    /// Subscription whose producer holds the sender and needs no abort
    /// (mainly mock sources in tests)
    pub fn new(events: mpsc::Receiver<FeedEvent>) -> Self {
        Self {
            events,
            producer: None,
            stopped: false,
        }
    }

    /// Subscription fed by a spawned producer task
    pub fn with_producer(events: mpsc::Receiver<FeedEvent>, producer: AbortHandle) -> Self {
        Self {
            events,
            producer: Some(producer),
            stopped: false,
        }
    }

    /// Next event, or `None` once the stream is stopped or the producer
    /// has gone away
    pub async fn next_event(&mut self) -> Option<FeedEvent> {
        if self.stopped {
            return None;
        }
        self.events.recv().await
    }

    /// Cancel the stream: abort the producer and drop anything in flight
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Some(producer) = self.producer.take() {
            producer.abort();
        }
        self.events.close();
    }
}

impl Drop for FeedSubscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Provider of historical bars and live bar streams
///
/// Implementations own all transport, session, and reconnection concerns;
/// the supervisor only sees bars and `SourceError`s.
#[async_trait]
pub trait MarketDataSource: Send + Sync + 'static {
    /// Fetch up to `count` most recent bars, oldest first
    async fn get_history(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, SourceError>;

    /// Open a live stream of bar updates
    async fn subscribe(
        &self,
        instrument: &str,
        timeframe: Timeframe,
    ) -> Result<FeedSubscription, SourceError>;
}
