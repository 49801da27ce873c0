//! Check cycle orchestration
//!
//! - [`coordinator`]: Runs the release-notes and required-version flows of one check
//! - [`diagnostics`]: Optional hook observing flow failures

pub mod coordinator;
pub mod diagnostics;
