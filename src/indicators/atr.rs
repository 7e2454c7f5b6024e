use crate::models::Bar;

/// Average True Range (ATR) indicator
///
/// Measures volatility as the arithmetic mean of the trailing `period`
/// true ranges. True Range is the greatest of:
/// - Current High - Current Low
/// - Abs(Current High - Previous Close)
/// - Abs(Current Low - Previous Close)
pub fn calculate_atr(bars: &[Bar], period: usize) -> Option<f64> {
    if bars.len() < period + 1 || period == 0 {
        return None;
    }

    let mut true_ranges = Vec::with_capacity(bars.len() - 1);
    for i in 1..bars.len() {
        let high = bars[i].high;
        let low = bars[i].low;
        let prev_close = bars[i - 1].close;

        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());

        true_ranges.push(tr);
    }

    let sum: f64 = true_ranges.iter().rev().take(period).sum();
    Some(sum / period as f64)
}
