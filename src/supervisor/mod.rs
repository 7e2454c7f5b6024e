// Instrument lifecycle supervision
mod instrument;

use crate::config::BotConfig;
use crate::error::{SubscribeError, UnsubscribeError};
use crate::feed::MarketDataSource;
use crate::models::{Signal, Timeframe};
use crate::risk::RiskConfig;
use crate::series::RollingSeries;
use crate::strategy::{EvaluatorConfig, SignalEvaluator};
use instrument::InstrumentWorker;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use tokio::task::JoinHandle;

/// Callback invoked with every confirmed signal
pub type SignalCallback = Arc<dyn Fn(Signal) + Send + Sync>;

pub(crate) type SharedCallback = Arc<RwLock<Option<SignalCallback>>>;

/// Registry slot for one instrument
///
/// `Activating` occupies the slot while history is being fetched so a
/// concurrent subscribe for the same pair reports AlreadyActive instead
/// of racing the activation.
enum Entry {
    Activating,
    Active { worker: JoinHandle<()> },
}

/// Owns the lifecycle of every watched instrument
///
/// One worker task per ACTIVE instrument ingests both feed streams and
/// runs the evaluator; the supervisor itself only touches the registry
/// map, never the series. All boundary failures are explicit variants,
/// and one instrument's failure never touches the others.
pub struct Supervisor<S: MarketDataSource> {
    source: Arc<S>,
    config: BotConfig,
    registry: Arc<Mutex<HashMap<String, Entry>>>,
    callback: SharedCallback,
}

impl<S: MarketDataSource> Supervisor<S> {
    pub fn new(source: S, config: BotConfig) -> Self {
        Self {
            source: Arc::new(source),
            config,
            registry: Arc::new(Mutex::new(HashMap::new())),
            callback: Arc::new(RwLock::new(None)),
        }
    }

    /// Register the signal sink. Replaces any previous callback.
    pub fn on_signal(&self, callback: impl Fn(Signal) + Send + Sync + 'static) {
        *self.callback.write().unwrap() = Some(Arc::new(callback));
    }

    /// Currently watched instruments, sorted
    pub fn list_active(&self) -> Vec<String> {
        let mut active: Vec<String> = self
            .registry
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, entry)| matches!(entry, Entry::Active { .. }))
            .map(|(instrument, _)| instrument.clone())
            .collect();
        active.sort();
        active
    }

    /// Start watching an instrument: fetch history for both timeframes,
    /// open both live streams, and spawn the worker
    pub async fn subscribe(&self, instrument: &str) -> Result<(), SubscribeError> {
        if !self.config.is_allowed(instrument) {
            return Err(SubscribeError::InvalidInstrument(instrument.to_string()));
        }

        // Claim the slot before any awaited source call
        {
            let mut registry = self.registry.lock().unwrap();
            if registry.contains_key(instrument) {
                return Err(SubscribeError::AlreadyActive(instrument.to_string()));
            }
            registry.insert(instrument.to_string(), Entry::Activating);
        }

        match self.activate(instrument).await {
            Ok(worker) => {
                self.registry
                    .lock()
                    .unwrap()
                    .insert(instrument.to_string(), Entry::Active { worker });
                tracing::info!(instrument, "watch started");
                Ok(())
            }
            Err(e) => {
                // No partial state survives a failed activation
                self.registry.lock().unwrap().remove(instrument);
                tracing::warn!(instrument, error = %e, "activation failed");
                Err(e)
            }
        }
    }

    async fn activate(&self, instrument: &str) -> Result<JoinHandle<()>, SubscribeError> {
        let fast_history = self
            .source
            .get_history(instrument, Timeframe::M1, self.config.fast_capacity)
            .await?;
        let slow_history = self
            .source
            .get_history(instrument, Timeframe::M5, self.config.slow_capacity)
            .await?;

        for (timeframe, history) in [
            (Timeframe::M1, &fast_history),
            (Timeframe::M5, &slow_history),
        ] {
            if history.len() < self.config.min_history {
                return Err(SubscribeError::InsufficientHistory {
                    instrument: instrument.to_string(),
                    timeframe,
                    got: history.len(),
                    need: self.config.min_history,
                });
            }
        }

        let fast_sub = self.source.subscribe(instrument, Timeframe::M1).await?;
        let slow_sub = match self.source.subscribe(instrument, Timeframe::M5).await {
            Ok(sub) => sub,
            Err(e) => {
                // fast_sub detaches on drop
                return Err(e.into());
            }
        };

        let evaluator_config = EvaluatorConfig {
            min_volatility: self.config.min_volatility,
            min_series_len: self.config.min_history,
            ..EvaluatorConfig::default()
        };

        let worker = InstrumentWorker {
            instrument: instrument.to_string(),
            fast: RollingSeries::from_history(self.config.fast_capacity, fast_history),
            slow: RollingSeries::from_history(self.config.slow_capacity, slow_history),
            fast_sub,
            slow_sub,
            evaluator: SignalEvaluator::new(evaluator_config),
            risk: RiskConfig::default(),
            callback: self.callback.clone(),
        };

        Ok(tokio::spawn(worker.run()))
    }

    /// Stop watching an instrument: abort its worker, which detaches both
    /// feed subscriptions and discards both series
    ///
    /// Later-arriving bar events for this instrument die with the worker;
    /// nothing can observe the series after removal.
    pub fn unsubscribe(&self, instrument: &str) -> Result<(), UnsubscribeError> {
        let mut registry = self.registry.lock().unwrap();

        match registry.get(instrument) {
            Some(Entry::Active { .. }) => {
                if let Some(Entry::Active { worker }) = registry.remove(instrument) {
                    worker.abort();
                }
                tracing::info!(instrument, "watch stopped");
                Ok(())
            }
            // ACTIVATING is not ACTIVE yet; the pending subscribe keeps
            // its claim on the slot
            _ => Err(UnsubscribeError::NotActive(instrument.to_string())),
        }
    }
}

impl<S: MarketDataSource> Drop for Supervisor<S> {
    fn drop(&mut self) {
        let mut registry = self.registry.lock().unwrap();
        for (_, entry) in registry.drain() {
            if let Entry::Active { worker } = entry {
                worker.abort();
            }
        }
    }
}
