pub mod commands;
pub mod config;
pub mod database;
pub mod food;

// Re-export commonly used items
pub use commands::{CommandHandler, LineReader};
pub use config::AppConfig;
pub use database::{DailyLogStore, LogEntry};
pub use food::api::{FoodProvider, UsdaClient};
