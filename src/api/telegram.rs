use crate::models::Signal;
use reqwest::Client;
use serde::Deserialize;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const LONG_POLL_SECS: u64 = 30;

/// Client for the Telegram Bot API
///
/// Outbound messages are fire-and-forget: delivery failures are logged
/// and never surfaced to the signal engine.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    token: String,
    chat_id: String,
}

// ============== Response Types ==============

#[derive(Debug, Deserialize)]
struct UpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<Update>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    text: Option<String>,
}

// ============== Commands ==============

/// User commands understood by the bot
///
/// A bare pair symbol is shorthand for `/start PAIR`, as in the original
/// command surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start(String),
    Stop(String),
    Status,
    Unknown,
}

impl Command {
    pub fn parse(text: &str) -> Self {
        let mut parts = text.split_whitespace();
        let head = match parts.next() {
            Some(h) => h,
            None => return Command::Unknown,
        };
        let arg = parts.next().map(|p| p.to_uppercase());

        match (head, arg) {
            ("/start", Some(pair)) => Command::Start(pair),
            ("/stop", Some(pair)) => Command::Stop(pair),
            ("/status", _) => Command::Status,
            (word, None) if word.chars().all(|c| c.is_ascii_alphabetic()) && word.len() >= 6 => {
                Command::Start(word.to_uppercase())
            }
            _ => Command::Unknown,
        }
    }
}

// ============== Client ==============

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            chat_id: chat_id.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", TELEGRAM_API_BASE, self.token, method)
    }

    /// Send a Markdown message to the configured chat, logging failures
    pub async fn send(&self, text: &str) {
        let payload = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        let result = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if !response.status().is_success() => {
                tracing::warn!(status = %response.status(), "telegram rejected message");
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to reach telegram");
            }
            _ => {}
        }
    }

    /// Format and send a confirmed signal alert
    pub async fn send_signal(&self, signal: &Signal) {
        self.send(&format_signal(signal)).await;
    }

    /// Long-poll for new commands, returning them with the next offset
    pub async fn next_commands(&self, offset: i64) -> (Vec<Command>, i64) {
        let result = self
            .client
            .get(self.method_url("getUpdates"))
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", LONG_POLL_SECS.to_string()),
            ])
            .send()
            .await;

        let response = match result {
            Ok(r) => r.json::<UpdatesResponse>().await,
            Err(e) => {
                tracing::warn!(error = %e, "telegram getUpdates failed");
                return (Vec::new(), offset);
            }
        };

        let updates = match response {
            Ok(u) if u.ok => u.result,
            Ok(_) => {
                tracing::warn!("telegram getUpdates returned ok=false");
                return (Vec::new(), offset);
            }
            Err(e) => {
                tracing::warn!(error = %e, "bad telegram getUpdates payload");
                return (Vec::new(), offset);
            }
        };

        let mut next_offset = offset;
        let mut commands = Vec::new();
        for update in updates {
            next_offset = next_offset.max(update.update_id + 1);
            if let Some(text) = update.message.and_then(|m| m.text) {
                commands.push(Command::parse(text.trim()));
            }
        }

        (commands, next_offset)
    }
}

/// The alert message for a confirmed signal: price, indicator context,
/// risk levels, and the recommended expiry window
pub fn format_signal(signal: &Signal) -> String {
    let direction_line = match signal.direction {
        crate::models::Direction::Call => "🟢 CALL (strong buy)",
        crate::models::Direction::Put => "🔴 PUT (strong sell)",
    };

    format!(
        "📊 *{instrument}* (1m/5m) - quad-confirmation strategy\n\
         Price: {price:.5}\n\n\
         RSI (14): {rsi:.2} | ATR (14): {atr:.5}\n\
         Higher timeframe (5m): {trend}\n\n\
         🛑 SL: {sl:.5} | 🏆 TP: {tp:.5}\n\
         🕰️ Expiry: *3 - 5 minutes*\n\n\
         📌 Signal: {direction} (strength: {strength})",
        instrument = signal.instrument,
        price = signal.price,
        rsi = signal.rsi,
        atr = signal.atr,
        trend = signal.trend,
        sl = signal.stop_loss,
        tp = signal.take_profit,
        direction = direction_line,
        strength = signal.strength,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Direction, Trend};

    #[test]
    fn test_parse_start_and_stop() {
        assert_eq!(
            Command::parse("/start eurusd"),
            Command::Start("EURUSD".to_string())
        );
        assert_eq!(
            Command::parse("/stop GBPJPY"),
            Command::Stop("GBPJPY".to_string())
        );
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(Command::parse("/status"), Command::Status);
    }

    #[test]
    fn test_parse_bare_pair_shorthand() {
        assert_eq!(
            Command::parse("usdjpy"),
            Command::Start("USDJPY".to_string())
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(Command::parse(""), Command::Unknown);
        assert_eq!(Command::parse("/start"), Command::Unknown);
        assert_eq!(Command::parse("hi"), Command::Unknown);
        assert_eq!(Command::parse("/help me"), Command::Unknown);
    }

    #[test]
    fn test_format_signal_mentions_risk_levels() {
        let signal = Signal {
            instrument: "EURUSD".to_string(),
            direction: Direction::Call,
            price: 1.10000,
            stop_loss: 1.09920,
            take_profit: 1.10120,
            rsi: 27.45,
            atr: 0.00080,
            trend: Trend::Bullish,
            strength: "very high".to_string(),
        };

        let text = format_signal(&signal);
        assert!(text.contains("EURUSD"));
        assert!(text.contains("CALL"));
        assert!(text.contains("1.09920"));
        assert!(text.contains("1.10120"));
        assert!(text.contains("BULLISH"));
    }
}
