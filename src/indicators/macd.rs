use super::calculate_ema;
use crate::models::MacdCross;

/// Detect a MACD zero-line cross between the previous and current window
///
/// The MACD line is EMA(fast) - EMA(slow). The previous value is computed
/// identically over the window excluding the last close; a cross fires only
/// when the line changes sign between the two.
///
/// Returns the outer `None` when the window is shorter than `slow`;
/// `MacdCross::None` means enough data but no cross this bar.
pub fn calculate_macd_cross(closes: &[f64], fast: usize, slow: usize) -> Option<MacdCross> {
    if closes.len() < slow {
        return None;
    }

    let macd_now = calculate_ema(closes, fast)? - calculate_ema(closes, slow)?;

    let prev_window = &closes[..closes.len() - 1];
    let macd_prev = match (
        calculate_ema(prev_window, fast),
        calculate_ema(prev_window, slow),
    ) {
        (Some(f), Some(s)) => f - s,
        // Window is exactly `slow` long: no previous value to cross from
        _ => return Some(MacdCross::None),
    };

    let cross = if macd_now > 0.0 && macd_prev < 0.0 {
        MacdCross::Bullish
    } else if macd_now < 0.0 && macd_prev > 0.0 {
        MacdCross::Bearish
    } else {
        MacdCross::None
    };

    Some(cross)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Closes that end with a sharp reversal so the MACD line flips sign
    /// on the final bar.
    fn reversal_closes(start_down: bool) -> Vec<f64> {
        let mut closes = Vec::new();
        if start_down {
            // Long decline, then a violent rally on the last bars
            for i in 0..30 {
                closes.push(100.0 - i as f64 * 0.5);
            }
            for i in 0..6 {
                closes.push(85.0 + i as f64 * 4.0);
            }
        } else {
            for i in 0..30 {
                closes.push(100.0 + i as f64 * 0.5);
            }
            for i in 0..6 {
                closes.push(115.0 - i as f64 * 4.0);
            }
        }
        closes
    }

    #[test]
    fn test_macd_insufficient_data() {
        let closes = vec![1.0; 25];
        assert!(calculate_macd_cross(&closes, 12, 26).is_none());
    }

    #[test]
    fn test_macd_exactly_slow_bars_never_crosses() {
        let closes: Vec<f64> = (0..26).map(|i| 100.0 + i as f64).collect();
        assert_eq!(calculate_macd_cross(&closes, 12, 26), Some(MacdCross::None));
    }

    #[test]
    fn test_macd_flat_series_no_cross() {
        let closes = vec![1.2; 40];
        assert_eq!(calculate_macd_cross(&closes, 12, 26), Some(MacdCross::None));
    }

    #[test]
    fn test_macd_steady_trend_no_cross() {
        // Persistent uptrend keeps the MACD line positive on both windows
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        assert_eq!(calculate_macd_cross(&closes, 12, 26), Some(MacdCross::None));
    }

    #[test]
    fn test_macd_returns_exactly_one_variant() {
        for closes in [
            reversal_closes(true),
            reversal_closes(false),
            (0..60).map(|i| 100.0 + (i % 7) as f64).collect::<Vec<_>>(),
        ] {
            let cross = calculate_macd_cross(&closes, 12, 26).unwrap();
            let variants = [MacdCross::Bullish, MacdCross::Bearish, MacdCross::None];
            assert_eq!(variants.iter().filter(|v| **v == cross).count(), 1);
        }
    }

    #[test]
    fn test_macd_sign_flip_matches_cross() {
        // Verify directly against the definition on a reversal series
        let closes = reversal_closes(true);
        let now = calculate_ema(&closes, 12).unwrap() - calculate_ema(&closes, 26).unwrap();
        let prev_window = &closes[..closes.len() - 1];
        let prev =
            calculate_ema(prev_window, 12).unwrap() - calculate_ema(prev_window, 26).unwrap();

        let expected = if now > 0.0 && prev < 0.0 {
            MacdCross::Bullish
        } else if now < 0.0 && prev > 0.0 {
            MacdCross::Bearish
        } else {
            MacdCross::None
        };

        assert_eq!(calculate_macd_cross(&closes, 12, 26), Some(expected));
    }
}
