pub mod app_store;
pub mod json_requirement;

pub use app_store::AppStoreProvider;
pub use json_requirement::HttpRequirementProvider;

use std::time::Duration;

use crate::version::error::FetchError;

/// User agent sent with every store request
const USER_AGENT: &str = concat!("app-version-checker/", env!("CARGO_PKG_VERSION"));

fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))
}
