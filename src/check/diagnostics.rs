use std::fmt;

#[cfg(test)]
use mockall::automock;

use crate::version::error::CheckError;

/// The two independent flows of a check cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flow {
    ReleaseNotes,
    RequiredVersion,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::ReleaseNotes => "release_notes",
            Flow::RequiredVersion => "required_version",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observer for failures that the check cycle otherwise swallows.
///
/// Called in addition to the `tracing` log, including for failures that only
/// cause a fallback (e.g. an unreachable requirement document).
#[cfg_attr(test, automock)]
pub trait DiagnosticHook: Send + Sync {
    fn on_failure(&self, flow: Flow, error: &CheckError);
}
