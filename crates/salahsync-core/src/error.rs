use thiserror::Error;

/// Failures raised by a [`KeyValueStore`](crate::store::KeyValueStore) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Internal cache failures. Never returned from the public cache API.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to (de)serialize cache value for {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CacheError {
    pub fn serialization(key: &str, source: serde_json::Error) -> Self {
        CacheError::Serialization {
            key: key.to_string(),
            source,
        }
    }
}

/// Connectivity probe failures. Always treated as "still offline".
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Connectivity probe timed out")]
    Timeout,

    #[error("Connectivity probe failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Connectivity probe returned status {0}")]
    Status(u16),
}

impl ProbeError {
    /// Classify a transport error, separating timeouts from other failures
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProbeError::Timeout
        } else {
            ProbeError::Network(err)
        }
    }
}
