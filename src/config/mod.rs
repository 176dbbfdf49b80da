//! Configuration module for the username bot.
//!
//! Handles loading, validation, and saving of the YAML configuration file
//! along with Telegram credentials and runtime limits from the environment.

mod loader;
mod sections;
mod settings;

pub use loader::{ConfigError, Configuration};
pub use sections::{
    AppSection, BotSection, CheckerSection, LogLevel, LoggingSection, UnknownLogLevel,
    UnknownUpdateKind, UpdateKind,
};
pub use settings::{BotSettings, CredentialsError, TelegramConfig};

/// Default path of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
