//! Provider test utilities

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use app_version_checker::version::error::FetchError;
use app_version_checker::version::metadata::{AppMetadata, MetadataProvider, MetadataQuery};
use app_version_checker::version::requirement::{RequirementProvider, UpdateRequirement};

pub const STORE_URL: &str = "https://apps.example.com/app/id123";

/// Build store metadata with the shared test URL
pub fn metadata(store_version: &str, release_notes: &str) -> AppMetadata {
    AppMetadata {
        store_version: store_version.to_string(),
        download_url: STORE_URL.to_string(),
        release_notes: release_notes.to_string(),
    }
}

/// Metadata provider returning a fixed result after an optional delay
pub struct FakeMetadataProvider {
    result: Result<AppMetadata, FetchError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeMetadataProvider {
    pub fn new(result: Result<AppMetadata, FetchError>) -> Self {
        Self {
            result,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataProvider for FakeMetadataProvider {
    async fn fetch(&self, _query: &MetadataQuery) -> Result<AppMetadata, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}

/// Requirement provider returning a fixed result
pub struct FakeRequirementProvider {
    result: Result<UpdateRequirement, FetchError>,
    calls: AtomicUsize,
}

impl FakeRequirementProvider {
    pub fn new(result: Result<UpdateRequirement, FetchError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn requiring(min_version: &str, optional: bool) -> Self {
        Self::new(Ok(UpdateRequirement::remote(min_version, optional)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RequirementProvider for FakeRequirementProvider {
    async fn fetch(&self, _url: &Url) -> Result<UpdateRequirement, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
