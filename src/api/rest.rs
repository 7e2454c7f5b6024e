use crate::error::SourceError;
use crate::feed::{FeedEvent, FeedSubscription, MarketDataSource};
use crate::models::{Bar, Timeframe};
use async_trait::async_trait;
use reqwest::Client;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};

const FEED_CHANNEL_CAPACITY: usize = 64;

/// Market data over a plain REST endpoint
///
/// `GET {base}/history?symbol=EURUSD&interval=1m&count=100` returning a
/// JSON array of OHLC bars, oldest first. A live subscription is a polling
/// task that re-fetches the latest bar once per timeframe interval.
#[derive(Clone)]
pub struct RestMarketData {
    client: Client,
    base_url: String,
}

impl RestMarketData {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_bars(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, SourceError> {
        let url = format!("{}/history", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", instrument),
                ("interval", timeframe.as_str()),
                ("count", &count.to_string()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::BadResponse(format!(
                "HTTP {} for {} {}",
                response.status(),
                instrument,
                timeframe
            )));
        }

        response
            .json::<Vec<Bar>>()
            .await
            .map_err(|e| SourceError::BadResponse(e.to_string()))
    }
}

#[async_trait]
impl MarketDataSource for RestMarketData {
    async fn get_history(
        &self,
        instrument: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, SourceError> {
        self.fetch_bars(instrument, timeframe, count).await
    }

    async fn subscribe(
        &self,
        instrument: &str,
        timeframe: Timeframe,
    ) -> Result<FeedSubscription, SourceError> {
        // Probe once up front so a dead endpoint fails the activation
        // instead of silently producing error events forever
        self.fetch_bars(instrument, timeframe, 1).await?;

        let (tx, rx) = mpsc::channel(FEED_CHANNEL_CAPACITY);
        let source = self.clone();
        let instrument = instrument.to_string();

        let producer = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(timeframe.interval_secs()));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick fires immediately; skip it, history already
            // covers the current bar
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let event = match source.fetch_bars(&instrument, timeframe, 1).await {
                    Ok(bars) => match bars.last() {
                        Some(bar) => FeedEvent::Bar(*bar),
                        None => FeedEvent::Error("empty bar response".to_string()),
                    },
                    Err(e) => FeedEvent::Error(e.to_string()),
                };

                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        Ok(FeedSubscription::with_producer(rx, producer.abort_handle()))
    }
}
