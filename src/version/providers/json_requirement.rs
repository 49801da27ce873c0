//! Requirement document fetched over HTTP

use std::time::Duration;

use reqwest::Url;
use tracing::{debug, warn};

use crate::version::error::FetchError;
use crate::version::providers::build_client;
use crate::version::requirement::{RequirementProvider, UpdateRequirement};

/// Fetches `{ "version": "1.2.0", "optional": false }` documents
pub struct HttpRequirementProvider {
    client: reqwest::Client,
}

impl HttpRequirementProvider {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
        })
    }
}

#[async_trait::async_trait]
impl RequirementProvider for HttpRequirementProvider {
    async fn fetch(&self, url: &Url) -> Result<UpdateRequirement, FetchError> {
        debug!("Fetching update requirement from {}", url);

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            warn!("Requirement source returned status {}: {}", status, url);
            return Err(FetchError::Network(format!("Unexpected status: {}", status)));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse requirement document from {}: {}", url, e);
            FetchError::Parse(e.to_string())
        })
    }
}
