//! Ephemeral stores (Redis).
//!
//! This module contains traits and implementations for ephemeral data storage.
//! All data stored here has automatic TTL-based expiration.
//!
//! ## Redis Key Patterns
//!
//! ```text
//! usage:{identity} → admitted request count for the current window (auto-expires)
//! ```
//!
//! Expiry of a usage key IS the window reset: no counter entity persists
//! across window boundaries.

mod quota;

pub use quota::{QuotaStore, RedisQuotaStore};

#[cfg(test)]
pub use quota::MockQuotaStore;
