//! Minimum-version requirement and the provider trait for fetching it

#[cfg(test)]
use mockall::automock;

use reqwest::Url;
use serde::Deserialize;

use crate::version::error::FetchError;

/// Where a requirement came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequirementSource {
    /// Fetched from a configured requirement document
    #[default]
    Remote,
    /// Synthesized because no requirement source is configured
    Default,
}

/// Minimum version the installed app should be on
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateRequirement {
    /// Versions older than this should be prompted to update
    #[serde(rename = "version")]
    pub min_version: String,
    /// Whether the user may dismiss the prompt
    pub optional: bool,
    #[serde(skip)]
    pub source: RequirementSource,
}

impl UpdateRequirement {
    /// Requirement used when no requirement source is configured.
    ///
    /// Requiring the installed version itself turns the policy into an optional
    /// notice shown whenever the store has a strictly newer release.
    pub fn default_for(installed_version: &str) -> Self {
        Self {
            min_version: installed_version.to_string(),
            optional: true,
            source: RequirementSource::Default,
        }
    }

    /// Requirement supplied explicitly by a requirement document
    pub fn remote(min_version: &str, optional: bool) -> Self {
        Self {
            min_version: min_version.to_string(),
            optional,
            source: RequirementSource::Remote,
        }
    }

    pub fn is_default(&self) -> bool {
        self.source == RequirementSource::Default
    }
}

/// Trait for fetching an update requirement document
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RequirementProvider: Send + Sync {
    /// Fetches `{ "version": string, "optional": bool }` from `url`
    async fn fetch(&self, url: &Url) -> Result<UpdateRequirement, FetchError>;
}
