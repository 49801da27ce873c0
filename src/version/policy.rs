//! Required-version policy evaluation

use tracing::debug;

use crate::version::compare::is_older;
use crate::version::metadata::AppMetadata;
use crate::version::requirement::UpdateRequirement;

/// Result of evaluating the update policy
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckOutcome {
    /// Whether an update prompt should be shown
    pub should_prompt: bool,
    /// Whether the prompt may be dismissed
    pub optional: bool,
    /// Store page to open when the user accepts
    pub store_url: Option<String>,
    /// Notes of the published release
    pub release_notes: Option<String>,
}

impl CheckOutcome {
    /// Outcome that shows nothing
    pub fn no_prompt() -> Self {
        Self::default()
    }
}

/// Decide whether the installed version warrants an update prompt.
///
/// For an explicit requirement a prompt is shown only when the required
/// version is older than the store version (a requirement ahead of what is
/// published is ignored) and the installed version is older than the required
/// version. The default requirement prompts, always optionally, whenever the
/// store has a strictly newer release. Unavailable metadata never prompts.
pub fn evaluate(
    installed_version: &str,
    requirement: &UpdateRequirement,
    metadata: Option<&AppMetadata>,
) -> CheckOutcome {
    let Some(metadata) = metadata else {
        return CheckOutcome::no_prompt();
    };

    let (warranted, optional) = if requirement.is_default() {
        (is_older(installed_version, &metadata.store_version), true)
    } else {
        (
            requirement_applies(installed_version, &requirement.min_version, metadata),
            requirement.optional,
        )
    };

    if !warranted {
        return CheckOutcome::no_prompt();
    }

    CheckOutcome {
        should_prompt: true,
        optional,
        store_url: Some(metadata.download_url.clone()),
        release_notes: Some(metadata.release_notes.clone()),
    }
}

fn requirement_applies(installed_version: &str, required: &str, metadata: &AppMetadata) -> bool {
    if !is_older(required, &metadata.store_version) {
        debug!(
            "Required version {} is not behind store version {}",
            required, metadata.store_version
        );
        return false;
    }

    if !is_older(installed_version, required) {
        debug!(
            "Installed version {} satisfies required version {}",
            installed_version, required
        );
        return false;
    }

    true
}
