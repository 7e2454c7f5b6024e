use crate::models::Bollinger;

/// Calculate Bollinger Bands over the trailing `period` closes
///
/// Bands sit `k` population standard deviations either side of the SMA.
pub fn calculate_bollinger(closes: &[f64], period: usize, k: f64) -> Option<Bollinger> {
    if closes.len() < period || period == 0 {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let sma = window.iter().sum::<f64>() / period as f64;

    let variance = window.iter().map(|c| (c - sma).powi(2)).sum::<f64>() / period as f64;
    let std_dev = variance.sqrt();

    Some(Bollinger {
        sma,
        upper: sma + k * std_dev,
        lower: sma - k * std_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_insufficient_data() {
        let closes = vec![1.0; 19];
        assert!(calculate_bollinger(&closes, 20, 2.0).is_none());
    }

    #[test]
    fn test_bollinger_flat_series_collapses() {
        let closes = vec![1.1; 20];
        let bb = calculate_bollinger(&closes, 20, 2.0).unwrap();
        assert_eq!(bb.sma, 1.1);
        assert_eq!(bb.upper, 1.1);
        assert_eq!(bb.lower, 1.1);
    }

    #[test]
    fn test_bollinger_band_symmetry() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + (i % 5) as f64).collect();
        let k = 2.0;
        let bb = calculate_bollinger(&closes, 20, k).unwrap();

        // Bands are symmetric about the SMA, width = 2k * stddev
        assert!((bb.upper - bb.sma - (bb.sma - bb.lower)).abs() < 1e-12);

        let window = &closes[closes.len() - 20..];
        let variance =
            window.iter().map(|c| (c - bb.sma).powi(2)).sum::<f64>() / 20.0;
        let std_dev = variance.sqrt();
        assert!((bb.upper - bb.lower - 2.0 * k * std_dev).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_known_values() {
        // 2, 4, 4, 4, 5, 5, 7, 9 has mean 5 and population stddev 2
        let closes = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bb = calculate_bollinger(&closes, 8, 2.0).unwrap();
        assert!((bb.sma - 5.0).abs() < 1e-12);
        assert!((bb.upper - 9.0).abs() < 1e-12);
        assert!((bb.lower - 1.0).abs() < 1e-12);
    }
}
