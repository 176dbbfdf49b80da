//! Generated username store module.
//!
//! Tracks usernames generated for each base name and recent availability
//! results for a limited time, with a background task that drops expired
//! entries.

mod cleanup;
mod generated;
mod results;

pub use cleanup::{CleanupMessage, StoreCleanup};
pub use generated::{DEFAULT_TTL, UsernameStore};
pub use results::{DEFAULT_RESULT_TTL, ResultCache};
