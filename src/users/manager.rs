//! Active user tracking and per-user limits.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Telegram user identifier.
pub type UserId = i64;

/// Reasons a user request is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("bot is at full capacity ({max_users} active users)")]
    CapacityReached { max_users: usize },

    #[error("generation limit reached ({max_generations} per user)")]
    QuotaExhausted { max_generations: u32 },

    #[error("an operation is already running for this user")]
    OperationInProgress,
}

/// Snapshot of current usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub active_users: usize,
    pub max_users: usize,
    pub busy_users: usize,
    pub total_generations: u64,
}

/// Tracks active users, their generation counts and running operations.
#[derive(Debug)]
pub struct UserManager {
    active: HashSet<UserId>,
    generations: HashMap<UserId, u32>,
    busy: HashSet<UserId>,
    max_users: usize,
    max_generations: u32,
}

impl UserManager {
    #[must_use]
    pub fn new(max_users: usize, max_generations: u32) -> Self {
        Self {
            active: HashSet::new(),
            generations: HashMap::new(),
            busy: HashSet::new(),
            max_users,
            max_generations,
        }
    }

    #[must_use]
    pub const fn max_users(&self) -> usize {
        self.max_users
    }

    #[must_use]
    pub const fn max_generations(&self) -> u32 {
        self.max_generations
    }

    #[must_use]
    pub fn is_active(&self, user_id: UserId) -> bool {
        self.active.contains(&user_id)
    }

    /// Checks whether a user is, or could become, active.
    #[must_use]
    pub fn can_admit(&self, user_id: UserId) -> bool {
        self.active.contains(&user_id) || self.active.len() < self.max_users
    }

    /// Marks a user as active; returns false when the bot is full.
    pub fn admit(&mut self, user_id: UserId) -> bool {
        if !self.can_admit(user_id) {
            return false;
        }
        if self.active.insert(user_id) {
            info!("Added user {}, active users: {}", user_id, self.active.len());
        }
        true
    }

    /// Forgets a user along with their counters.
    pub fn remove(&mut self, user_id: UserId) {
        if self.active.remove(&user_id) {
            self.generations.remove(&user_id);
            self.busy.remove(&user_id);
            info!("Removed user {}, active users: {}", user_id, self.active.len());
        }
    }

    #[must_use]
    pub fn can_generate(&self, user_id: UserId) -> bool {
        self.generations_used(user_id) < self.max_generations
    }

    #[must_use]
    pub fn generations_used(&self, user_id: UserId) -> u32 {
        self.generations.get(&user_id).copied().unwrap_or(0)
    }

    /// Counts one generation; returns the new total for the user.
    pub fn record_generation(&mut self, user_id: UserId) -> u32 {
        let count = self.generations.entry(user_id).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    #[must_use]
    pub fn remaining_generations(&self, user_id: UserId) -> u32 {
        self.max_generations
            .saturating_sub(self.generations_used(user_id))
    }

    pub fn reset_generations(&mut self, user_id: UserId) {
        if let Some(count) = self.generations.get_mut(&user_id) {
            *count = 0;
        }
    }

    /// Starts an operation for a user.
    ///
    /// Admits the user if needed, then requires remaining quota and no
    /// other running operation.
    ///
    /// # Errors
    ///
    /// Returns why the operation cannot start.
    pub fn begin_operation(&mut self, user_id: UserId) -> Result<(), UserError> {
        if !self.admit(user_id) {
            return Err(UserError::CapacityReached {
                max_users: self.max_users,
            });
        }
        if !self.can_generate(user_id) {
            return Err(UserError::QuotaExhausted {
                max_generations: self.max_generations,
            });
        }
        if !self.busy.insert(user_id) {
            return Err(UserError::OperationInProgress);
        }
        Ok(())
    }

    /// Marks a user's running operation as finished.
    pub fn finish_operation(&mut self, user_id: UserId) {
        self.busy.remove(&user_id);
    }

    #[must_use]
    pub fn is_busy(&self, user_id: UserId) -> bool {
        self.busy.contains(&user_id)
    }

    #[must_use]
    pub fn stats(&self) -> UserStats {
        UserStats {
            active_users: self.active.len(),
            max_users: self.max_users,
            busy_users: self.busy.len(),
            total_generations: self.generations.values().map(|&n| u64::from(n)).sum(),
        }
    }
}
