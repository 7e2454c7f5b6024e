use std::collections::HashSet;

/// The eight pairs the bot will agree to watch
pub const DEFAULT_ALLOWED: [&str; 8] = [
    "EURUSD", "GBPUSD", "USDJPY", "AUDUSD", "EURJPY", "GBPJPY", "USDCAD", "NZDUSD",
];

/// Runtime configuration for the signal engine
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Instruments eligible for subscription
    pub allowed_instruments: HashSet<String>,
    /// ATR floor below which no signal is emitted
    pub min_volatility: f64,
    /// Fast (1m) rolling window capacity
    pub fast_capacity: usize,
    /// Slow (5m) rolling window capacity
    pub slow_capacity: usize,
    /// Minimum historical bars per timeframe required to activate
    pub min_history: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            allowed_instruments: DEFAULT_ALLOWED.iter().map(|s| s.to_string()).collect(),
            min_volatility: 0.00005,
            fast_capacity: 100,
            slow_capacity: 50,
            min_history: 50,
        }
    }
}

impl BotConfig {
    /// Build the config from environment variables, falling back to the
    /// defaults above
    ///
    /// `ALLOWED_INSTRUMENTS` is a comma-separated list of pair symbols;
    /// `MIN_VOLATILITY` overrides the ATR floor.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("ALLOWED_INSTRUMENTS") {
            let parsed: HashSet<String> = raw
                .split(',')
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect();
            if !parsed.is_empty() {
                config.allowed_instruments = parsed;
            }
        }

        if let Some(value) = std::env::var("MIN_VOLATILITY")
            .ok()
            .and_then(|v| v.parse::<f64>().ok())
        {
            config.min_volatility = value;
        }

        config
    }

    pub fn is_allowed(&self, instrument: &str) -> bool {
        self.allowed_instruments.contains(instrument)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let config = BotConfig::default();
        assert_eq!(config.allowed_instruments.len(), 8);
        assert!(config.is_allowed("EURUSD"));
        assert!(config.is_allowed("NZDUSD"));
        assert!(!config.is_allowed("XAUUSD"));
        assert!(!config.is_allowed("eurusd"));
    }

    #[test]
    fn test_default_window_sizes() {
        let config = BotConfig::default();
        assert_eq!(config.fast_capacity, 100);
        assert_eq!(config.slow_capacity, 50);
        assert_eq!(config.min_history, 50);
    }
}
