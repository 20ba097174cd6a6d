//! Cache error types

use thiserror::Error;

/// Boxed backend failure carried as the cause of set/get errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by [`Store`](crate::Store) operations.
///
/// Keys carried by the variants are the namespaced keys actually sent to the
/// backend.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("invalid parameter expiry: must be non-zero")]
    InvalidExpiry,

    #[error("an internal error occurred: could not set value under key {key:?}: {source}")]
    Set {
        key: String,
        #[source]
        source: BoxError,
    },

    #[error("cache value was not found with key: {key}")]
    KeyNotFound { key: String },

    #[error("an internal error occurred: could not get value under key {key:?}: {source}")]
    Get {
        key: String,
        #[source]
        source: BoxError,
    },
}

impl CacheError {
    /// Whether the error is a cache miss rather than a failure.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// The namespaced key the failed operation addressed, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::InvalidExpiry => None,
            Self::Set { key, .. } | Self::KeyNotFound { key } | Self::Get { key, .. } => {
                Some(key.as_str())
            }
        }
    }
}

/// Errors raised while building or connecting a Redis backend.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid Redis configuration: {0}")]
    Configuration(#[source] redis::RedisError),

    #[error("could not connect to Redis at {address}: {source}")]
    Connection {
        address: String,
        #[source]
        source: redis::RedisError,
    },
}

pub type Result<T, E = CacheError> = std::result::Result<T, E>;
