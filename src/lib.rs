//! Username Bot Library
//!
//! Core of a Telegram bot that helps users find free usernames.
//!
//! This crate provides the core functionality for:
//! - Loading and validating the YAML bot configuration
//! - Setting up logging from that configuration
//! - Checking usernames against Telegram's format rules
//! - Remembering generated usernames for a limited time
//! - Limiting concurrent users and per-user generations

pub mod config;
pub mod logging;
pub mod store;
pub mod username;
pub mod users;
