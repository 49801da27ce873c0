//! Per-cycle memoization of store metadata

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::version::error::FetchError;
use crate::version::metadata::{AppMetadata, MetadataProvider, MetadataQuery};

/// Caches the result of a single metadata fetch for one check cycle.
///
/// The first `get_metadata` call starts the fetch; every later or concurrent
/// caller waits on that same fetch and receives a clone of its result,
/// failures included. Drop the cache to end the cycle.
pub struct MetadataCache {
    provider: Arc<dyn MetadataProvider>,
    query: MetadataQuery,
    result: OnceCell<Result<AppMetadata, FetchError>>,
    fetches: AtomicUsize,
}

impl MetadataCache {
    pub fn new(provider: Arc<dyn MetadataProvider>, query: MetadataQuery) -> Self {
        Self {
            provider,
            query,
            result: OnceCell::new(),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Get the store metadata, fetching it if this cycle has not yet done so
    pub async fn get_metadata(&self) -> Result<AppMetadata, FetchError> {
        self.result
            .get_or_init(|| async {
                self.fetches.fetch_add(1, Ordering::SeqCst);
                debug!("Fetching app metadata for {:?}", self.query);

                let result = self.provider.fetch(&self.query).await;
                match &result {
                    Ok(metadata) => debug!("Store version is {}", metadata.store_version),
                    Err(e) => warn!("Failed to fetch app metadata for {:?}: {}", self.query, e),
                }
                result
            })
            .await
            .clone()
    }

    /// The memoized result, if the fetch has completed
    pub fn peek(&self) -> Option<&Result<AppMetadata, FetchError>> {
        self.result.get()
    }

    /// Number of fetches this cache has started (0 or 1)
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}
