use thiserror::Error;

/// Failure of a remote fetch.
///
/// `Clone` so a single failure can be memoized and handed to every consumer
/// of a check cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Parse(e.to_string())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Neither an app id nor a bundle id is configured")]
    MissingIdentifier,

    #[error("Invalid requirement URL {url:?}: {reason}")]
    InvalidRequirementUrl { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Flag store lock poisoned")]
    LockPoisoned,

    #[error("Flag store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Any failure that ends a single flow of a check cycle
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
