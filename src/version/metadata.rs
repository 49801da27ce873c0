//! App metadata and the provider trait for fetching it from a store

#[cfg(test)]
use mockall::automock;

use crate::version::error::FetchError;

/// Release information published for an app
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppMetadata {
    /// Version currently published in the store
    pub store_version: String,
    /// Store page where the release can be downloaded
    pub download_url: String,
    /// Release notes of the published version (may be empty)
    pub release_notes: String,
}

/// How to look the app up in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataQuery {
    /// Lookup by numeric store identifier
    ById(String),
    /// Lookup by bundle identifier (e.g. "com.example.app")
    ByBundleId(String),
}

impl MetadataQuery {
    /// Select a lookup strategy. The store identifier wins when both are set;
    /// blank identifiers count as unset.
    pub fn select(id: Option<&str>, bundle_id: Option<&str>) -> Option<Self> {
        fn present(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }

        present(id)
            .map(|id| Self::ById(id.to_string()))
            .or_else(|| present(bundle_id).map(|b| Self::ByBundleId(b.to_string())))
    }

    /// Query parameter name and value
    pub fn as_param(&self) -> (&'static str, &str) {
        match self {
            Self::ById(id) => ("id", id),
            Self::ByBundleId(bundle_id) => ("bundleId", bundle_id),
        }
    }
}

/// Trait for fetching app metadata from a remote store
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetches the published metadata for the app described by `query`
    ///
    /// # Returns
    /// * `Ok(AppMetadata)` - The store's current release
    /// * `Err(FetchError)` - Transport failure, malformed payload, or no matching entry
    async fn fetch(&self, query: &MetadataQuery) -> Result<AppMetadata, FetchError>;
}
