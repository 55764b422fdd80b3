//! # rostercache
//!
//! Cache-or-fetch facade for Roster users.
//!
//! ## Architecture
//! - **HashMap**: AHash keyed by user id, plus an insertion-order list
//! - **Store**: any `rosterdb::UserStore`, consulted on misses and writes
//! - **Ids**: monotonic counter owned by the facade, never reused
//! - **Stats**: hit/miss/insert/removal counters, read as `CacheStats` snapshots

#![warn(missing_docs)]

mod manager;
mod stats;

pub use manager::{UserManager, DEFAULT_LIST_LIMIT};
pub use stats::CacheStats;
