use crate::indicators::snapshot::SnapshotConfig;
use crate::models::{Direction, IndicatorSnapshot, MacdCross, Trend};

/// Thresholds for the four-confirmation entry rule
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    /// Minimum ATR below which the market is too quiet to trade
    pub min_volatility: f64,
    /// Minimum bars required in both series before evaluating at all
    pub min_series_len: usize,
    pub snapshot: SnapshotConfig,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            min_volatility: 0.00005,
            min_series_len: 50,
            snapshot: SnapshotConfig::default(),
        }
    }
}

/// Applies the four-factor confirmation rule over the fast-timeframe
/// snapshot and the slow-timeframe trend
///
/// CALL needs: price at/below the lower band, RSI oversold, a bullish MACD
/// cross, and a bullish higher-timeframe trend. PUT mirrors all four.
/// Anything less is an abstention, not an error.
#[derive(Debug, Clone, Default)]
pub struct SignalEvaluator {
    config: EvaluatorConfig,
}

impl SignalEvaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate one fast-timeframe tick
    ///
    /// Returns at most one direction. CALL is checked first; its thresholds
    /// exclude PUT's under any sane input, and the explicit ordering makes
    /// the tie-break deterministic regardless.
    pub fn evaluate(&self, snapshot: &IndicatorSnapshot, trend: Trend) -> Option<Direction> {
        // All indicators must be defined before a signal can be considered
        let rsi = snapshot.rsi?;
        let atr = snapshot.atr?;
        let bollinger = snapshot.bollinger?;
        let macd_cross = snapshot.macd_cross?;

        // Volatility gate
        if atr < self.config.min_volatility {
            tracing::debug!(atr, min = self.config.min_volatility, "volatility gate: abstaining");
            return None;
        }

        let price = snapshot.price;

        if price <= bollinger.lower
            && rsi < self.config.rsi_oversold
            && macd_cross == MacdCross::Bullish
            && trend == Trend::Bullish
        {
            return Some(Direction::Call);
        }

        if price >= bollinger.upper
            && rsi > self.config.rsi_overbought
            && macd_cross == MacdCross::Bearish
            && trend == Trend::Bearish
        {
            return Some(Direction::Put);
        }

        None
    }
}
