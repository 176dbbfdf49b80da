//! Configuration sections and their defaults.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::logging::{DEFAULT_DATE_FORMAT, LogFormat};

/// Application identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppSection {
    /// Human-readable bot name.
    pub name: String,

    /// Release version string.
    pub version: String,
}

impl AppSection {
    #[must_use]
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Username availability checking parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckerSection {
    /// Usernames checked per batch.
    pub batch_size: u32,

    /// Upper bound on usernames checked for one request.
    pub max_usernames: u32,

    /// Base delay between retries, in seconds.
    pub retry_delay: u64,

    /// Attempts per username before giving up.
    pub max_retries: u32,
}

impl Default for CheckerSection {
    fn default() -> Self {
        Self {
            batch_size: 5,
            max_usernames: 30,
            retry_delay: 2,
            max_retries: 3,
        }
    }
}

impl CheckerSection {
    /// Splits candidate usernames into check batches.
    ///
    /// Duplicates are dropped (first occurrence wins) and the list is
    /// capped at `max_usernames` before chunking into `batch_size` batches.
    #[must_use]
    pub fn plan_batches<S: AsRef<str>>(&self, usernames: &[S]) -> Vec<Vec<String>> {
        let mut seen = std::collections::HashSet::new();
        let unique: Vec<String> = usernames
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|name| seen.insert(*name))
            .take(self.max_usernames as usize)
            .map(str::to_owned)
            .collect();

        unique
            .chunks(self.batch_size.max(1) as usize)
            .map(<[String]>::to_vec)
            .collect()
    }

    /// Pauses between consecutive attempts: `retry_delay * n` before attempt
    /// `n + 1`. There is no pause after the last attempt, so this yields
    /// `max_retries - 1` delays.
    pub fn retry_delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (1..u64::from(self.max_retries)).map(|n| Duration::from_secs(self.retry_delay.saturating_mul(n)))
    }
}

/// Telegram update kinds a bot can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    Message,
    EditedMessage,
    ChannelPost,
    EditedChannelPost,
    BusinessConnection,
    BusinessMessage,
    EditedBusinessMessage,
    DeletedBusinessMessages,
    MessageReaction,
    MessageReactionCount,
    InlineQuery,
    ChosenInlineResult,
    CallbackQuery,
    ShippingQuery,
    PreCheckoutQuery,
    PurchasedPaidMedia,
    Poll,
    PollAnswer,
    MyChatMember,
    ChatMember,
    ChatJoinRequest,
    ChatBoost,
    RemovedChatBoost,
}

impl UpdateKind {
    pub const ALL: [Self; 23] = [
        Self::Message,
        Self::EditedMessage,
        Self::ChannelPost,
        Self::EditedChannelPost,
        Self::BusinessConnection,
        Self::BusinessMessage,
        Self::EditedBusinessMessage,
        Self::DeletedBusinessMessages,
        Self::MessageReaction,
        Self::MessageReactionCount,
        Self::InlineQuery,
        Self::ChosenInlineResult,
        Self::CallbackQuery,
        Self::ShippingQuery,
        Self::PreCheckoutQuery,
        Self::PurchasedPaidMedia,
        Self::Poll,
        Self::PollAnswer,
        Self::MyChatMember,
        Self::ChatMember,
        Self::ChatJoinRequest,
        Self::ChatBoost,
        Self::RemovedChatBoost,
    ];

    /// Returns the Bot API name of the update kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::EditedMessage => "edited_message",
            Self::ChannelPost => "channel_post",
            Self::EditedChannelPost => "edited_channel_post",
            Self::BusinessConnection => "business_connection",
            Self::BusinessMessage => "business_message",
            Self::EditedBusinessMessage => "edited_business_message",
            Self::DeletedBusinessMessages => "deleted_business_messages",
            Self::MessageReaction => "message_reaction",
            Self::MessageReactionCount => "message_reaction_count",
            Self::InlineQuery => "inline_query",
            Self::ChosenInlineResult => "chosen_inline_result",
            Self::CallbackQuery => "callback_query",
            Self::ShippingQuery => "shipping_query",
            Self::PreCheckoutQuery => "pre_checkout_query",
            Self::PurchasedPaidMedia => "purchased_paid_media",
            Self::Poll => "poll",
            Self::PollAnswer => "poll_answer",
            Self::MyChatMember => "my_chat_member",
            Self::ChatMember => "chat_member",
            Self::ChatJoinRequest => "chat_join_request",
            Self::ChatBoost => "chat_boost",
            Self::RemovedChatBoost => "removed_chat_boost",
        }
    }
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized update kind name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown update type '{0}'")]
pub struct UnknownUpdateKind(pub String);

impl FromStr for UpdateKind {
    type Err = UnknownUpdateKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownUpdateKind(s.to_owned()))
    }
}

/// Bot runtime parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotSection {
    /// Long-polling timeout, in seconds.
    pub timeout: u64,

    /// Number of update worker tasks.
    pub workers: u32,

    /// Update kinds requested from Telegram, in order.
    pub allowed_updates: Vec<UpdateKind>,
}

impl Default for BotSection {
    fn default() -> Self {
        Self {
            timeout: 30,
            workers: 4,
            allowed_updates: vec![UpdateKind::Message, UpdateKind::CallbackQuery],
        }
    }
}

impl BotSection {
    #[must_use]
    pub const fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Checks whether the bot subscribes to an update kind.
    #[must_use]
    pub fn accepts(&self, kind: UpdateKind) -> bool {
        self.allowed_updates.contains(&kind)
    }
}

/// Severity threshold for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Returns the `tracing` filter directive for this level.
    ///
    /// `tracing` has no level above `error`, so CRITICAL maps to it.
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warn",
            Self::Error | Self::Critical => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized log level name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level '{0}' (expected one of DEBUG, INFO, WARNING, ERROR, CRITICAL)")]
pub struct UnknownLogLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLogLevel(s.to_owned()))
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingSection {
    pub level: LogLevel,

    /// `%`-style line template.
    pub format: LogFormat,

    /// strftime format for `%(asctime)s`.
    pub date_format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            format: LogFormat::default(),
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
        }
    }
}
