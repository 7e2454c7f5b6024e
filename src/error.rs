use crate::models::Timeframe;
use thiserror::Error;

/// Failures talking to the market-data source
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("market data source unreachable: {0}")]
    Connection(String),

    #[error("market data source returned a bad response: {0}")]
    BadResponse(String),
}

/// Outcome variants for a subscribe request that did not start a watch
///
/// These are ordinary boundary results, not process-level failures; one
/// instrument failing to activate never affects the others.
#[derive(Debug, Clone, Error)]
pub enum SubscribeError {
    #[error("{0} is not in the allowed instrument list")]
    InvalidInstrument(String),

    #[error("{0} is already being watched")]
    AlreadyActive(String),

    #[error("insufficient history for {instrument} {timeframe}: got {got} bars, need {need}")]
    InsufficientHistory {
        instrument: String,
        timeframe: Timeframe,
        got: usize,
        need: usize,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Outcome variants for an unsubscribe request that did not stop a watch
#[derive(Debug, Clone, Error)]
pub enum UnsubscribeError {
    #[error("{0} is not being watched")]
    NotActive(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SubscribeError::InvalidInstrument("XAUUSD".to_string());
        assert!(err.to_string().contains("XAUUSD"));

        let err = SubscribeError::InsufficientHistory {
            instrument: "EURUSD".to_string(),
            timeframe: Timeframe::M5,
            got: 12,
            need: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("EURUSD"));
        assert!(msg.contains("5m"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_source_error_converts() {
        let err: SubscribeError = SourceError::Connection("timeout".to_string()).into();
        assert!(matches!(err, SubscribeError::Source(_)));
    }
}
