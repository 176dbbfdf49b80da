//! Channel membership status used to gate access to the bot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user's status in the gating channel, as reported by Telegram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Creator,
    Administrator,
    Member,
    Restricted,
    Left,
    Kicked,
}

impl MemberStatus {
    pub const ALL: [Self; 6] = [
        Self::Creator,
        Self::Administrator,
        Self::Member,
        Self::Restricted,
        Self::Left,
        Self::Kicked,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Administrator => "administrator",
            Self::Member => "member",
            Self::Restricted => "restricted",
            Self::Left => "left",
            Self::Kicked => "kicked",
        }
    }

    /// Only full members, admins and the owner may use the bot.
    #[must_use]
    pub const fn grants_access(self) -> bool {
        matches!(self, Self::Creator | Self::Administrator | Self::Member)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized membership status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown chat member status '{0}'")]
pub struct UnknownMemberStatus(pub String);

impl FromStr for MemberStatus {
    type Err = UnknownMemberStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == lowered)
            .ok_or_else(|| UnknownMemberStatus(s.to_owned()))
    }
}
