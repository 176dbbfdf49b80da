//! User admission module.
//!
//! Caps the number of concurrently active users, counts generations per
//! user and keeps each user to one running operation at a time.

mod manager;
mod membership;

pub use manager::{UserError, UserId, UserManager, UserStats};
pub use membership::{MemberStatus, UnknownMemberStatus};
