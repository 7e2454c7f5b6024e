// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod indicators;
pub mod models;
pub mod risk;
pub mod series;
pub mod strategy;
pub mod supervisor;

// Re-export commonly used types
pub use error::{SourceError, SubscribeError, UnsubscribeError};
pub use models::*;
pub use series::RollingSeries;
pub use supervisor::Supervisor;
