//! Per-version first-launch tracking
//!
//! - [`store`]: Persistent boolean flag storage (SQLite, in-memory)
//! - [`tracker`]: One-shot release-notes flag keyed by version

pub mod store;
pub mod tracker;
