use crate::models::Direction;
use serde::{Deserialize, Serialize};

/// Stop-loss / take-profit levels attached to a confirmed signal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub take_profit: f64,
}

/// ATR multipliers for the risk levels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    pub tp_multiplier: f64,
    pub sl_multiplier: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            tp_multiplier: 1.5,
            sl_multiplier: 1.0,
        }
    }
}

impl RiskConfig {
    /// Derive SL/TP from entry price, current ATR, and signal direction
    ///
    /// For a CALL the take-profit sits above the entry and the stop below;
    /// a PUT mirrors that.
    pub fn risk_levels(&self, price: f64, atr: f64, direction: Direction) -> RiskLevels {
        let tp_delta = atr * self.tp_multiplier;
        let sl_delta = atr * self.sl_multiplier;

        match direction {
            Direction::Call => RiskLevels {
                take_profit: price + tp_delta,
                stop_loss: price - sl_delta,
            },
            Direction::Put => RiskLevels {
                take_profit: price - tp_delta,
                stop_loss: price + sl_delta,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_levels_bracket_price() {
        let config = RiskConfig::default();
        let levels = config.risk_levels(1.1000, 0.0008, Direction::Call);

        assert!(levels.stop_loss < 1.1000);
        assert!(1.1000 < levels.take_profit);
        assert!((levels.take_profit - 1.1012).abs() < 1e-9);
        assert!((levels.stop_loss - 1.0992).abs() < 1e-9);
    }

    #[test]
    fn test_put_levels_bracket_price() {
        let config = RiskConfig::default();
        let levels = config.risk_levels(1.1000, 0.0008, Direction::Put);

        assert!(levels.take_profit < 1.1000);
        assert!(1.1000 < levels.stop_loss);
        assert!((levels.take_profit - 1.0988).abs() < 1e-9);
        assert!((levels.stop_loss - 1.1008).abs() < 1e-9);
    }

    #[test]
    fn test_reward_exceeds_risk() {
        let config = RiskConfig::default();
        for direction in [Direction::Call, Direction::Put] {
            let levels = config.risk_levels(100.0, 2.0, direction);
            let reward = (levels.take_profit - 100.0).abs();
            let risk = (levels.stop_loss - 100.0).abs();
            assert!(reward > risk);
        }
    }
}
