use anyhow::Context;
use signalbot::api::{Command, RestMarketData, TelegramNotifier};
use signalbot::config::BotConfig;
use signalbot::error::SubscribeError;
use signalbot::supervisor::Supervisor;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    tracing::info!("🤖 SignalBot starting");

    let token =
        std::env::var("TELEGRAM_TOKEN").context("TELEGRAM_TOKEN not found in environment")?;
    let chat_id =
        std::env::var("TELEGRAM_CHAT_ID").context("TELEGRAM_CHAT_ID not found in environment")?;
    let data_api_base =
        std::env::var("DATA_API_BASE").unwrap_or_else(|_| "http://127.0.0.1:8080".to_string());

    let config = BotConfig::from_env();
    tracing::info!("📊 Configuration:");
    tracing::info!("  Instruments: {}", config.allowed_instruments.len());
    tracing::info!("  Min volatility (ATR): {}", config.min_volatility);
    tracing::info!("  Windows: fast {} / slow {}", config.fast_capacity, config.slow_capacity);

    let notifier = TelegramNotifier::new(token, chat_id);
    let supervisor = Arc::new(Supervisor::new(RestMarketData::new(data_api_base), config));

    // Every confirmed signal goes straight to the chat
    {
        let notifier = notifier.clone();
        supervisor.on_signal(move |signal| {
            let notifier = notifier.clone();
            tokio::spawn(async move {
                notifier.send_signal(&signal).await;
            });
        });
    }

    let command_task = {
        let supervisor = supervisor.clone();
        let notifier = notifier.clone();
        tokio::spawn(async move {
            command_loop(supervisor, notifier).await;
        })
    };

    tracing::info!("✅ Listening for commands (/start, /stop, /status)");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("⚠️  Received Ctrl+C, shutting down...");
        }
        result = command_task => {
            tracing::error!("Command loop exited: {:?}", result);
        }
    }

    tracing::info!("👋 SignalBot stopped");
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("signalbot=info,signalbot::strategy=debug")
        .init();
}

/// Long-poll Telegram for commands and drive the supervisor
async fn command_loop(supervisor: Arc<Supervisor<RestMarketData>>, notifier: TelegramNotifier) {
    let mut offset = 0i64;

    loop {
        let (commands, next_offset) = notifier.next_commands(offset).await;
        offset = next_offset;

        for command in commands {
            let reply = handle_command(&supervisor, command).await;
            notifier.send(&reply).await;
        }
    }
}

async fn handle_command(supervisor: &Supervisor<RestMarketData>, command: Command) -> String {
    match command {
        Command::Start(pair) => match supervisor.subscribe(&pair).await {
            Ok(()) => format!("✅ Live watch started (1m and 5m) for *{pair}*!"),
            Err(SubscribeError::AlreadyActive(_)) => {
                format!("⚠️ *{pair}* is already being watched.")
            }
            Err(SubscribeError::InvalidInstrument(_)) => {
                format!("❌ *{pair}* is not in the allowed pair list.")
            }
            Err(SubscribeError::InsufficientHistory { .. }) => {
                format!("❌ Not enough historical data found for *{pair}*.")
            }
            Err(SubscribeError::Source(e)) => {
                tracing::error!(instrument = %pair, error = %e, "activation failed");
                format!("❌ Error connecting to the data source for *{pair}*.")
            }
        },
        Command::Stop(pair) => match supervisor.unsubscribe(&pair) {
            Ok(()) => format!("⏹️ Live watch for *{pair}* stopped."),
            Err(_) => format!("⚠️ *{pair}* is not being watched."),
        },
        Command::Status => {
            let active = supervisor.list_active();
            if active.is_empty() {
                "⚪ No pair is currently being watched.".to_string()
            } else {
                format!("🟢 Pairs under live watch:\n\n* {}", active.join("\n* "))
            }
        }
        Command::Unknown => {
            "❌ Unknown command. Available: /start [pair], /stop [pair], /status".to_string()
        }
    }
}
