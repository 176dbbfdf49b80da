//! Outcome of a username availability check.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a username lookup found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsernameStatus {
    Available,
    BannedOrReserved,
    PremiumUser,
    User,
    Bot,
    Channel,
    Group,
    InvalidFormat,
    Unknown,
}

impl UsernameStatus {
    pub const ALL: [Self; 9] = [
        Self::Available,
        Self::BannedOrReserved,
        Self::PremiumUser,
        Self::User,
        Self::Bot,
        Self::Channel,
        Self::Group,
        Self::InvalidFormat,
        Self::Unknown,
    ];

    /// Returns the stable machine-readable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::BannedOrReserved => "banned_or_reserved",
            Self::PremiumUser => "premium_user",
            Self::User => "user",
            Self::Bot => "bot",
            Self::Channel => "channel",
            Self::Group => "group",
            Self::InvalidFormat => "invalid_format",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the label shown to users in chat.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "✅ AVAILABLE",
            Self::BannedOrReserved => "🚫 BANNED/RESERVED",
            Self::PremiumUser => "👑 TAKEN (Premium User)",
            Self::User => "👤 TAKEN (User)",
            Self::Bot => "🤖 TAKEN (Bot)",
            Self::Channel => "📢 TAKEN (Channel)",
            Self::Group => "👥 TAKEN (Group)",
            Self::InvalidFormat => "❌ INVALID FORMAT",
            Self::Unknown => "❓ UNKNOWN",
        }
    }

    /// Checks whether the username can be claimed.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }

    /// Checks whether someone already holds the username.
    #[must_use]
    pub const fn is_taken(self) -> bool {
        matches!(
            self,
            Self::PremiumUser | Self::User | Self::Bot | Self::Channel | Self::Group
        )
    }

    /// Formats a one-line result such as `✅ AVAILABLE: @jaemin`.
    #[must_use]
    pub fn describe(self, username: &str) -> String {
        format!("{}: @{username}", self.label())
    }
}

impl fmt::Display for UsernameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized status name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown username status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for UsernameStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}
