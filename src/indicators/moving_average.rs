/// Calculate Simple Moving Average (SMA) over the trailing `period` prices
pub fn calculate_sma(prices: &[f64], period: usize) -> Option<f64> {
    if prices.len() < period || period == 0 {
        return None;
    }

    let sum: f64 = prices.iter().rev().take(period).sum();
    Some(sum / period as f64)
}

/// Calculate Exponential Moving Average (EMA)
///
/// Seeded with the arithmetic mean of the first `period` prices, then
/// iterated over the rest of the window with k = 2 / (period + 1).
/// Returns the final value only.
pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
    if prices.len() < period || period == 0 {
        return None;
    }

    let k = 2.0 / (period as f64 + 1.0);

    let mut ema = calculate_sma(&prices[..period], period)?;
    for price in &prices[period..] {
        ema = price * k + ema * (1.0 - k);
    }

    Some(ema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let prices = vec![100.0, 102.0, 104.0, 106.0, 108.0];
        let sma = calculate_sma(&prices, 5);
        assert_eq!(sma, Some(104.0));
    }

    #[test]
    fn test_sma_uses_trailing_window() {
        let prices = vec![1.0, 1.0, 10.0, 20.0];
        let sma = calculate_sma(&prices, 2);
        assert_eq!(sma, Some(15.0));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let prices = vec![100.0, 102.0];
        assert!(calculate_sma(&prices, 5).is_none());
    }

    #[test]
    fn test_ema_insufficient_data() {
        let prices = vec![100.0, 102.0];
        assert!(calculate_ema(&prices, 5).is_none());
    }

    #[test]
    fn test_ema_of_constant_series_is_constant() {
        let prices = vec![1.2345; 30];
        let ema = calculate_ema(&prices, 10).unwrap();
        assert!((ema - 1.2345).abs() < 1e-12);
    }

    #[test]
    fn test_ema_tracks_rising_prices() {
        let prices = vec![100.0, 102.0, 104.0, 106.0, 108.0, 110.0];
        let ema = calculate_ema(&prices, 5).unwrap();
        // Seed SMA of first 5 is 104, one step toward 110 pulls it up
        assert!(ema > 104.0);
        assert!(ema < 110.0);
    }

    #[test]
    fn test_ema_exact_one_step() {
        // Seed = mean(1,2,3) = 2, k = 0.5, next price 10 -> 10*0.5 + 2*0.5 = 6
        let prices = vec![1.0, 2.0, 3.0, 10.0];
        let ema = calculate_ema(&prices, 3).unwrap();
        assert!((ema - 6.0).abs() < 1e-12);
    }
}
