// External service clients
pub mod rest;
pub mod telegram;

pub use rest::RestMarketData;
pub use telegram::{Command, TelegramNotifier};
