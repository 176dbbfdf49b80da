//! Telegram username format rules.

use thiserror::Error;

/// Minimum username length accepted by Telegram.
pub const MIN_LENGTH: usize = 5;

/// Maximum username length accepted by Telegram.
pub const MAX_LENGTH: usize = 32;

/// Words Telegram refuses to hand out as usernames.
pub const RESERVED_WORDS: &[&str] = &[
    // Official Telegram terms
    "telegram", "admin", "support", "security", "settings", "contacts", "chat", "group",
    "channel", "bot", "test", "null", "undefined", "official", "help", "info", "news", "store",
    "contact",
    // Technical terms
    "system", "api", "app", "dev", "root", "mod", "moderator", "database", "server", "client",
    "web", "mobile", "desktop", "user", "account", "profile", "login", "logout", "register",
    "signup", "signin",
    // Support related
    "helpdesk", "assistance", "service", "customer", "care", "feedback", "report", "issue",
    "problem", "inquiry", "question", "answer", "faq", "team", "staff", "operator", "agent",
    // Sensitive terms
    "verify", "verification", "confirmed", "authentic", "real", "true", "genuine", "original",
    "legitimate", "auth", "authenticated", "secure", "protected", "safe", "privacy", "private",
    // Financial terms
    "payment", "wallet", "money", "cash", "crypto", "bitcoin", "finance", "bank", "premium",
    "pay", "purchase", "buy", "sell", "price", "cost",
    // Social media companies
    "facebook", "meta", "instagram", "whatsapp", "twitter", "tiktok", "youtube", "google",
    "microsoft", "apple", "amazon", "netflix", "spotify", "paypal", "visa", "mastercard",
    "snapchat", "reddit",
    // Common spam terms
    "porn", "adult", "xxx", "sex", "hack", "crack", "cheat", "spam", "free", "offer",
    "discount", "deal", "promo", "promotion", "winner", "prize", "limited", "hurry",
];

/// Reasons a username is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("username is too short ({length} < {min} characters)", min = MIN_LENGTH)]
    TooShort { length: usize },

    #[error("username is too long ({length} > {max} characters)", max = MAX_LENGTH)]
    TooLong { length: usize },

    #[error("username must start with a letter, not '{0}'")]
    InvalidStart(char),

    #[error("invalid character '{ch}' at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("username must not contain consecutive underscores")]
    ConsecutiveUnderscores,

    #[error("username must not end with an underscore")]
    TrailingUnderscore,

    #[error("'{0}' is a reserved word")]
    Reserved(String),
}

/// Normalizes user input: trims, lowercases and strips every `@`.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase().replace('@', "")
}

/// Checks whether a username matches a reserved word (case-insensitive).
#[must_use]
pub fn is_reserved(username: &str) -> bool {
    RESERVED_WORDS
        .iter()
        .any(|word| word.eq_ignore_ascii_case(username))
}

/// Validates a username against Telegram's rules.
///
/// # Errors
///
/// Returns the first rule the username breaks.
pub fn validate(username: &str) -> Result<(), UsernameError> {
    let length = username.chars().count();
    if length < MIN_LENGTH {
        return Err(UsernameError::TooShort { length });
    }
    if length > MAX_LENGTH {
        return Err(UsernameError::TooLong { length });
    }

    if let Some(first) = username.chars().next().filter(|c| !c.is_ascii_alphabetic()) {
        return Err(UsernameError::InvalidStart(first));
    }

    if let Some((position, ch)) = username
        .chars()
        .enumerate()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
    {
        return Err(UsernameError::InvalidCharacter { ch, position });
    }

    if username.contains("__") {
        return Err(UsernameError::ConsecutiveUnderscores);
    }
    if username.ends_with('_') {
        return Err(UsernameError::TrailingUnderscore);
    }
    if is_reserved(username) {
        return Err(UsernameError::Reserved(username.to_lowercase()));
    }

    Ok(())
}

/// Returns true if the username passes [`validate`].
#[must_use]
pub fn is_valid(username: &str) -> bool {
    validate(username).is_ok()
}
