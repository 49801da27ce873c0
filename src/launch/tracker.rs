//! First-launch tracking for release notes

use std::sync::Arc;

use tracing::info;

use crate::launch::store::FlagStore;
use crate::version::error::StoreError;

/// Prefix of the flag key set once a version's release notes were acknowledged
pub const FIRST_LAUNCH_KEY_PREFIX: &str = "DidFinishFirstLaunch";

/// Remembers which versions have already shown their release notes.
///
/// Flags are only ever set, never cleared.
pub struct FirstLaunchTracker {
    store: Arc<dyn FlagStore>,
}

impl FirstLaunchTracker {
    pub fn new(store: Arc<dyn FlagStore>) -> Self {
        Self { store }
    }

    /// True until `mark_launched` has been called for this exact version string
    pub fn is_first_launch(&self, version: &str) -> Result<bool, StoreError> {
        Ok(!self.store.get_bool(&Self::key(version))?)
    }

    /// Record that the release notes for `version` were acknowledged
    pub fn mark_launched(&self, version: &str) -> Result<(), StoreError> {
        self.store.set_bool(&Self::key(version), true)?;
        info!("Marked version {} as launched", version);
        Ok(())
    }

    /// `is_first_launch` on the blocking pool, keeping store I/O off async workers
    pub async fn is_first_launch_blocking(
        self: Arc<Self>,
        version: String,
    ) -> Result<bool, StoreError> {
        tokio::task::spawn_blocking(move || self.is_first_launch(&version)).await?
    }

    /// `mark_launched` on the blocking pool
    pub async fn mark_launched_blocking(self: Arc<Self>, version: String) -> Result<(), StoreError> {
        tokio::task::spawn_blocking(move || self.mark_launched(&version)).await?
    }

    fn key(version: &str) -> String {
        format!("{}{}", FIRST_LAUNCH_KEY_PREFIX, version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::store::{MemoryFlagStore, MockFlagStore};

    #[test]
    fn first_launch_until_marked() {
        let tracker = FirstLaunchTracker::new(Arc::new(MemoryFlagStore::new()));

        assert!(tracker.is_first_launch("1.0.0").unwrap());
        tracker.mark_launched("1.0.0").unwrap();
        assert!(!tracker.is_first_launch("1.0.0").unwrap());
    }

    #[test]
    fn flags_are_per_exact_version_string() {
        let tracker = FirstLaunchTracker::new(Arc::new(MemoryFlagStore::new()));

        tracker.mark_launched("1.0.0").unwrap();

        assert!(tracker.is_first_launch("1.0.1").unwrap());
        assert!(tracker.is_first_launch("1.0").unwrap());
    }

    #[test]
    fn marking_twice_keeps_flag_set() {
        let tracker = FirstLaunchTracker::new(Arc::new(MemoryFlagStore::new()));

        tracker.mark_launched("2.0.0").unwrap();
        tracker.mark_launched("2.0.0").unwrap();

        assert!(!tracker.is_first_launch("2.0.0").unwrap());
    }

    #[test]
    fn uses_prefixed_key() {
        let mut store = MockFlagStore::new();
        store
            .expect_set_bool()
            .withf(|key, value| key == "DidFinishFirstLaunch3.1" && *value)
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_get_bool()
            .withf(|key| key == "DidFinishFirstLaunch3.1")
            .returning(|_| Ok(true));

        let tracker = FirstLaunchTracker::new(Arc::new(store));
        tracker.mark_launched("3.1").unwrap();
        assert!(!tracker.is_first_launch("3.1").unwrap());
    }

    #[test]
    fn propagates_store_errors() {
        let mut store = MockFlagStore::new();
        store
            .expect_get_bool()
            .returning(|_| Err(StoreError::LockPoisoned));

        let tracker = FirstLaunchTracker::new(Arc::new(store));
        assert!(matches!(
            tracker.is_first_launch("1.0.0"),
            Err(StoreError::LockPoisoned)
        ));
    }

    #[tokio::test]
    async fn blocking_variants_share_flags_with_sync_calls() {
        let tracker = Arc::new(FirstLaunchTracker::new(Arc::new(MemoryFlagStore::new())));

        assert!(
            tracker
                .clone()
                .is_first_launch_blocking("4.0".to_string())
                .await
                .unwrap()
        );
        tracker
            .clone()
            .mark_launched_blocking("4.0".to_string())
            .await
            .unwrap();

        assert!(!tracker.is_first_launch("4.0").unwrap());
    }

    #[tokio::test]
    async fn blocking_variant_propagates_store_errors() {
        let mut store = MockFlagStore::new();
        store
            .expect_set_bool()
            .returning(|_, _| Err(StoreError::LockPoisoned));

        let tracker = Arc::new(FirstLaunchTracker::new(Arc::new(store)));
        let result = tracker.mark_launched_blocking("1.0.0".to_string()).await;

        assert!(matches!(result, Err(StoreError::LockPoisoned)));
    }
}
