use serde::{Deserialize, Serialize};

/// One OHLC price sample for a fixed time interval
///
/// Bars carry no timestamp: their position inside a series is the only
/// ordering that matters to the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// Convenience constructor for a bar with a flat body (open == close)
    pub fn flat(price: f64) -> Self {
        Self {
            open: price,
            high: price,
            low: price,
            close: price,
        }
    }
}

/// Sampling interval of a bar sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// Fast timeframe: drives signal evaluation
    M1,
    /// Slow timeframe: drives the higher-timeframe trend filter
    M5,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M1 => "1m",
            Timeframe::M5 => "5m",
        }
    }

    /// Nominal bar interval, used by polling feed implementations
    pub fn interval_secs(&self) -> u64 {
        match self {
            Timeframe::M1 => 60,
            Timeframe::M5 => 300,
        }
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of an emitted trade signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Call,
    Put,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Call => f.write_str("CALL"),
            Direction::Put => f.write_str("PUT"),
        }
    }
}

/// Higher-timeframe directional bias
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => f.write_str("BULLISH"),
            Trend::Bearish => f.write_str("BEARISH"),
            Trend::Neutral => f.write_str("NEUTRAL"),
        }
    }
}

/// MACD line sign change between the previous and the current window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdCross {
    Bullish,
    Bearish,
    None,
}

/// Bollinger band values over one window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bollinger {
    pub sma: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Indicators recomputed over the fast series on every new fast bar
///
/// `None` fields mean the window is still too short for that indicator;
/// the evaluator abstains until all of them are defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorSnapshot {
    pub price: f64,
    pub rsi: Option<f64>,
    pub atr: Option<f64>,
    pub bollinger: Option<Bollinger>,
    pub macd_cross: Option<MacdCross>,
}

/// A fully confirmed directional alert with computed risk levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub instrument: String,
    pub direction: Direction,
    pub price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub rsi: f64,
    pub atr: f64,
    pub trend: Trend,
    pub strength: String,
}
