//! Telegram username handling.
//!
//! Normalization and format rules for usernames, plus the status values
//! reported back to users after an availability check.

mod rules;
mod status;

pub use rules::{
    MAX_LENGTH, MIN_LENGTH, RESERVED_WORDS, UsernameError, is_reserved, is_valid, normalize,
    validate,
};
pub use status::{UnknownStatus, UsernameStatus};
