use super::calculate_ema;
use crate::models::{Bar, Trend};

const TREND_EMA_PERIOD: usize = 50;

/// Higher-timeframe trend filter
///
/// Compares the latest slow-timeframe close against the EMA(50) of the
/// slow series. Fewer than 50 bars, or a close exactly on the EMA, reads
/// as Neutral.
pub fn htf_trend(slow_bars: &[Bar]) -> Trend {
    if slow_bars.len() < TREND_EMA_PERIOD {
        return Trend::Neutral;
    }

    let closes: Vec<f64> = slow_bars.iter().map(|b| b.close).collect();
    let ema50 = match calculate_ema(&closes, TREND_EMA_PERIOD) {
        Some(v) => v,
        None => return Trend::Neutral,
    };

    let current = closes[closes.len() - 1];
    if current > ema50 {
        Trend::Bullish
    } else if current < ema50 {
        Trend::Bearish
    } else {
        Trend::Neutral
    }
}
