use super::{calculate_atr, calculate_bollinger, calculate_macd_cross, calculate_rsi};
use crate::models::{Bar, IndicatorSnapshot};

/// Periods and parameters for the per-bar snapshot computation
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    pub rsi_period: usize,
    pub bollinger_period: usize,
    pub bollinger_k: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub atr_period: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            bollinger_period: 20,
            bollinger_k: 2.0,
            macd_fast: 12,
            macd_slow: 26,
            atr_period: 14,
        }
    }
}

/// Recompute all fast-timeframe indicators over the current window
///
/// Returns `None` only for an empty window (no price to anchor on).
/// Individual indicators report their own insufficient-data state inside
/// the snapshot.
pub fn compute_snapshot(bars: &[Bar], config: &SnapshotConfig) -> Option<IndicatorSnapshot> {
    let last = bars.last()?;
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    Some(IndicatorSnapshot {
        price: last.close,
        rsi: calculate_rsi(&closes, config.rsi_period),
        atr: calculate_atr(bars, config.atr_period),
        bollinger: calculate_bollinger(&closes, config.bollinger_period, config.bollinger_k),
        macd_cross: calculate_macd_cross(&closes, config.macd_fast, config.macd_slow),
    })
}
