//! Telegram credentials and runtime limits read from the environment.

use std::fmt;
use std::time::Duration;

/// Telegram API credentials.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Telegram API ID (obtain from <https://my.telegram.org>).
    pub api_id: i32,

    /// Telegram API hash (obtain from <https://my.telegram.org>).
    pub api_hash: String,

    /// Bot token issued by `@BotFather`.
    pub bot_token: String,

    /// Name of the user session used for availability lookups.
    pub session_name: String,
}

fn default_session_name() -> String {
    "dummy_session".to_owned()
}

impl TelegramConfig {
    /// Creates a new Telegram configuration.
    #[must_use]
    pub fn new(api_id: i32, api_hash: String, bot_token: String) -> Self {
        Self {
            api_id,
            api_hash,
            bot_token,
            session_name: default_session_name(),
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// Expects `API_ID`, `API_HASH` and `BOT_TOKEN` to be set.
    /// `DUMMY_SESSION` optionally overrides the session name.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CredentialsError> {
        let require = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(CredentialsError::MissingEnvVar(key))
        };

        let api_id: i32 = require("API_ID")?
            .trim()
            .parse()
            .ok()
            .filter(|id| *id > 0)
            .ok_or(CredentialsError::InvalidApiId)?;

        Ok(Self {
            api_id,
            api_hash: require("API_HASH")?,
            bot_token: require("BOT_TOKEN")?,
            session_name: lookup("DUMMY_SESSION").unwrap_or_else(default_session_name),
        })
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_id", &self.api_id)
            .field("api_hash", &"<redacted>")
            .field("bot_token", &"<redacted>")
            .field("session_name", &self.session_name)
            .finish()
    }
}

/// Runtime limits for user handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotSettings {
    /// Maximum number of concurrently active users.
    pub max_users: usize,

    /// Maximum username generations per user.
    pub max_generations: u32,

    /// How long generated usernames are remembered, in seconds.
    pub username_ttl_secs: u64,

    /// How long availability check results are reused, in seconds.
    pub result_cache_ttl_secs: u64,

    /// Interval between store cleanup passes, in seconds.
    pub cleanup_interval_secs: u64,
}

const fn default_max_users() -> usize {
    40
}

const fn default_max_generations() -> u32 {
    30
}

const fn default_username_ttl() -> u64 {
    3600 // 1 hour
}

const fn default_result_cache_ttl() -> u64 {
    900 // 15 minutes
}

const fn default_cleanup_interval() -> u64 {
    300 // 5 minutes
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            max_users: default_max_users(),
            max_generations: default_max_generations(),
            username_ttl_secs: default_username_ttl(),
            result_cache_ttl_secs: default_result_cache_ttl(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

impl BotSettings {
    /// Creates bot settings from environment variables with defaults.
    #[must_use]
    pub fn from_env_with_defaults() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates bot settings from an arbitrary lookup; missing, zero or
    /// unparsable values fall back to defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        fn positive<T: std::str::FromStr + Default + PartialOrd>(value: Option<String>) -> Option<T> {
            value
                .and_then(|s| s.trim().parse().ok())
                .filter(|v| *v > T::default())
        }

        Self {
            max_users: positive(lookup("MAX_USERS")).unwrap_or_else(default_max_users),
            max_generations: positive(lookup("MAX_GENERATIONS"))
                .unwrap_or_else(default_max_generations),
            username_ttl_secs: positive(lookup("USERNAME_TTL_SECS"))
                .unwrap_or_else(default_username_ttl),
            result_cache_ttl_secs: positive(lookup("RESULT_CACHE_TTL_SECS"))
                .unwrap_or_else(default_result_cache_ttl),
            cleanup_interval_secs: positive(lookup("CLEANUP_INTERVAL_SECS"))
                .unwrap_or_else(default_cleanup_interval),
        }
    }

    #[must_use]
    pub const fn username_ttl(&self) -> Duration {
        Duration::from_secs(self.username_ttl_secs)
    }

    #[must_use]
    pub const fn result_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.result_cache_ttl_secs)
    }

    #[must_use]
    pub const fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

/// Credential loading errors.
#[derive(Debug, thiserror::Error)]
pub enum CredentialsError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid API ID format (must be a positive integer)")]
    InvalidApiId,
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = BotSettings::default();
        assert_eq!(settings.max_users, 40);
        assert_eq!(settings.max_generations, 30);
        assert_eq!(settings.username_ttl(), Duration::from_secs(3600));
        assert_eq!(settings.result_cache_ttl(), Duration::from_secs(900));
        assert_eq!(settings.cleanup_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_settings_from_lookup() {
        let settings = BotSettings::from_lookup(lookup(&[
            ("MAX_USERS", "10"),
            ("MAX_GENERATIONS", "0"),
            ("CLEANUP_INTERVAL_SECS", "soon"),
            ("RESULT_CACHE_TTL_SECS", "60"),
        ]));
        assert_eq!(settings.result_cache_ttl_secs, 60);
        assert_eq!(settings.max_users, 10);
        assert_eq!(settings.max_generations, 30);
        assert_eq!(settings.cleanup_interval_secs, 300);
    }

    #[test]
    fn test_telegram_config_new() {
        let config = TelegramConfig::new(12345, "abc123".to_owned(), "1:token".to_owned());
        assert_eq!(config.api_id, 12345);
        assert_eq!(config.api_hash, "abc123");
        assert_eq!(config.session_name, "dummy_session");
    }

    #[test]
    fn test_telegram_config_from_lookup() {
        let config = TelegramConfig::from_lookup(lookup(&[
            ("API_ID", "777"),
            ("API_HASH", "secret-hash"),
            ("BOT_TOKEN", "1:token"),
            ("DUMMY_SESSION", "checker"),
        ]))
        .unwrap();
        assert_eq!(config.api_id, 777);
        assert_eq!(config.session_name, "checker");

        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-hash"));
        assert!(!debug.contains("1:token"));
    }

    #[test]
    fn test_telegram_config_errors() {
        let missing = TelegramConfig::from_lookup(lookup(&[("API_ID", "1"), ("API_HASH", "h")]));
        assert!(matches!(missing, Err(CredentialsError::MissingEnvVar("BOT_TOKEN"))));

        let invalid = TelegramConfig::from_lookup(lookup(&[
            ("API_ID", "-4"),
            ("API_HASH", "h"),
            ("BOT_TOKEN", "t"),
        ]));
        assert!(matches!(invalid, Err(CredentialsError::InvalidApiId)));
    }
}
