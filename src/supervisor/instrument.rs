use crate::feed::{FeedEvent, FeedSubscription};
use crate::indicators::{compute_snapshot, htf_trend};
use crate::models::{Bar, Direction, IndicatorSnapshot, Signal, Trend};
use crate::risk::RiskConfig;
use crate::series::RollingSeries;
use crate::strategy::SignalEvaluator;
use crate::supervisor::SharedCallback;

enum Tick {
    Fast(Option<FeedEvent>),
    Slow(Option<FeedEvent>),
}

/// Per-instrument ingestion and evaluation loop
///
/// The worker exclusively owns both rolling series and both feed
/// subscriptions, so bar ingestion and indicator evaluation for one
/// instrument are serialized by construction. Different instruments run
/// in independent tasks.
pub(crate) struct InstrumentWorker {
    pub instrument: String,
    pub fast: RollingSeries,
    pub slow: RollingSeries,
    pub fast_sub: FeedSubscription,
    pub slow_sub: FeedSubscription,
    pub evaluator: SignalEvaluator,
    pub risk: RiskConfig,
    pub callback: SharedCallback,
}

impl InstrumentWorker {
    pub async fn run(mut self) {
        tracing::info!(instrument = %self.instrument, "instrument worker started");

        loop {
            let tick = tokio::select! {
                event = self.fast_sub.next_event() => Tick::Fast(event),
                event = self.slow_sub.next_event() => Tick::Slow(event),
            };

            match tick {
                Tick::Fast(Some(FeedEvent::Bar(bar))) => self.on_fast_bar(bar),
                Tick::Slow(Some(FeedEvent::Bar(bar))) => self.slow.push(bar),
                Tick::Fast(Some(FeedEvent::Error(e))) => {
                    tracing::warn!(instrument = %self.instrument, timeframe = "1m", error = %e, "feed error");
                }
                Tick::Slow(Some(FeedEvent::Error(e))) => {
                    tracing::warn!(instrument = %self.instrument, timeframe = "5m", error = %e, "feed error");
                }
                Tick::Fast(None) | Tick::Slow(None) => break,
            }
        }

        // One stream ended; detach the other before the series go away
        self.fast_sub.stop();
        self.slow_sub.stop();
        tracing::info!(instrument = %self.instrument, "instrument worker exiting");
    }

    /// Fast bars drive evaluation; slow bars only feed the trend filter
    fn on_fast_bar(&mut self, bar: Bar) {
        self.fast.push(bar);

        let min_len = self.evaluator.config().min_series_len;
        if self.fast.len() < min_len || self.slow.len() < min_len {
            return;
        }

        let fast_bars = self.fast.bars();
        let snapshot = match compute_snapshot(&fast_bars, &self.evaluator.config().snapshot) {
            Some(s) => s,
            None => return,
        };
        let trend = htf_trend(&self.slow.bars());

        if let Some(direction) = self.evaluator.evaluate(&snapshot, trend) {
            self.emit(direction, &snapshot, trend);
        }
    }

    /// Attach risk levels and hand the finished signal to the sink
    fn emit(&self, direction: Direction, snapshot: &IndicatorSnapshot, trend: Trend) {
        // evaluate() only fires when rsi and atr are defined
        let (Some(rsi), Some(atr)) = (snapshot.rsi, snapshot.atr) else {
            return;
        };

        let levels = self.risk.risk_levels(snapshot.price, atr, direction);
        let signal = Signal {
            instrument: self.instrument.clone(),
            direction,
            price: snapshot.price,
            stop_loss: levels.stop_loss,
            take_profit: levels.take_profit,
            rsi,
            atr,
            trend,
            strength: "very high".to_string(),
        };

        tracing::info!(
            instrument = %signal.instrument,
            direction = %signal.direction,
            price = signal.price,
            sl = signal.stop_loss,
            tp = signal.take_profit,
            "signal confirmed"
        );

        let callback = self.callback.read().unwrap().clone();
        if let Some(callback) = callback {
            callback(signal);
        }
    }
}
