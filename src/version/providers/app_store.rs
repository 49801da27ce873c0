//! App Store lookup API provider

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::DEFAULT_COUNTRY;
use crate::version::error::FetchError;
use crate::version::metadata::{AppMetadata, MetadataProvider, MetadataQuery};
use crate::version::providers::build_client;

/// Response from the lookup endpoint
#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupResult {
    version: Option<String>,
    track_view_url: Option<String>,
    release_notes: Option<String>,
}

/// Metadata provider backed by the App Store lookup API
pub struct AppStoreProvider {
    client: reqwest::Client,
    base_url: String,
    country: String,
}

impl AppStoreProvider {
    /// Creates a provider for the storefront of `country` (e.g. "US", "JP")
    pub fn new(base_url: &str, country: &str, timeout: Duration) -> Result<Self, FetchError> {
        let country = match country.trim() {
            "" => DEFAULT_COUNTRY,
            c => c,
        }
        .to_lowercase();

        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            country,
        })
    }

    fn lookup_url(&self, query: &MetadataQuery) -> Result<Url, FetchError> {
        let base = format!("{}/{}/lookup", self.base_url, self.country);
        Url::parse_with_params(&base, [query.as_param()])
            .map_err(|e| FetchError::Network(format!("Invalid lookup URL {}: {}", base, e)))
    }
}

#[async_trait::async_trait]
impl MetadataProvider for AppStoreProvider {
    async fn fetch(&self, query: &MetadataQuery) -> Result<AppMetadata, FetchError> {
        let url = self.lookup_url(query)?;
        debug!("Looking up app metadata at {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(format!("{:?}", query)));
        }

        if !status.is_success() {
            warn!("App Store returned status {}: {}", status, url);
            return Err(FetchError::Network(format!("Unexpected status: {}", status)));
        }

        let body = response.text().await?;
        let lookup: LookupResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse App Store lookup response: {}", e);
            FetchError::Parse(e.to_string())
        })?;

        let Some(result) = lookup.results.into_iter().next() else {
            return Err(FetchError::NotFound(format!("{:?}", query)));
        };

        let store_version = result
            .version
            .ok_or_else(|| FetchError::Parse("missing `version`".to_string()))?;
        let download_url = result
            .track_view_url
            .ok_or_else(|| FetchError::Parse("missing `trackViewUrl`".to_string()))?;

        Ok(AppMetadata {
            store_version,
            download_url,
            release_notes: result.release_notes.unwrap_or_default(),
        })
    }
}
