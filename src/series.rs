use crate::models::Bar;
use std::collections::VecDeque;

/// Fixed-capacity rolling window of bars for one (instrument, timeframe) pair
///
/// Pushing beyond capacity evicts the oldest bar, so after seeding the
/// window length stays constant as live bars stream in.
#[derive(Debug, Clone)]
pub struct RollingSeries {
    bars: VecDeque<Bar>,
    capacity: usize,
}

impl RollingSeries {
    /// Create an empty series with a fixed capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            bars: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a series seeded from historical bars
    ///
    /// If `seed` is longer than the capacity, only the most recent bars
    /// are kept.
    pub fn from_history(capacity: usize, seed: Vec<Bar>) -> Self {
        let mut series = Self::new(capacity);
        for bar in seed {
            series.push(bar);
        }
        series
    }

    /// Append a bar, evicting the oldest if the window is full
    pub fn push(&mut self, bar: Bar) {
        self.bars.push_back(bar);
        while self.bars.len() > self.capacity {
            self.bars.pop_front();
        }
    }

    /// Closing prices, oldest first
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Full OHLC bars, oldest first
    pub fn bars(&self) -> Vec<Bar> {
        self.bars.iter().copied().collect()
    }

    /// Most recent bar, if any
    pub fn last(&self) -> Option<&Bar> {
        self.bars.back()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
