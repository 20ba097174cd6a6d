//! # Namespaced Store
//!
//! String key-value store with mandatory expiry on top of a
//! [`KeyValueBackend`]. Keys are optionally prefixed with a namespace and
//! backend failures are normalised into [`CacheError`].

use std::time::Duration;

use async_trait::async_trait;

use crate::backend::{KeyValueBackend, RedisClient, RedisConnection};
use crate::config::RedisConfig;
use crate::error::{CacheError, ConnectError, Result};
use crate::options::RedisOptions;

/// De facto Redis namespace delimiter.
pub const NAMESPACE_SEPARATOR: &str = ":";

/// A string cache whose entries always expire.
///
/// Dropping a returned future cancels the call; no timeout is imposed here.
#[async_trait]
pub trait Store: Send + Sync {
    /// Store `value` under `key` for `expiry`. A zero expiry is rejected with
    /// [`CacheError::InvalidExpiry`].
    async fn set(&self, key: &str, value: &str, expiry: Duration) -> Result<()>;

    /// Fetch the value under `key`, or [`CacheError::KeyNotFound`] on a miss.
    async fn get(&self, key: &str) -> Result<String>;
}

/// [`Store`] backed by Redis, or by any other [`KeyValueBackend`].
#[derive(Clone)]
pub struct RedisStore<B = RedisConnection> {
    backend: B,
    namespace: String,
}

impl RedisStore {
    /// Build and connect a store. See [`RedisClient::new`] for how the options
    /// shape the connection.
    pub async fn connect(
        address: &str,
        password: Option<&str>,
        options: RedisOptions,
    ) -> Result<Self, ConnectError> {
        let client = RedisClient::new(address, password, &options)?;
        let connection = client.connect().await?;

        tracing::debug!(
            %address,
            cluster = connection.is_cluster(),
            namespace = options.namespace(),
            "Redis store connected"
        );

        Ok(Self::new(connection, options.namespace()))
    }

    /// Build and connect a store from configuration.
    pub async fn from_config(config: &RedisConfig) -> Result<Self, ConnectError> {
        Self::connect(&config.address, config.password.as_deref(), config.options()).await
    }
}

impl<B: KeyValueBackend> RedisStore<B> {
    pub fn new(backend: B, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: namespace.into(),
        }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Prefix `key` with the namespace, if one is set.
    pub fn namespace_key(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}{NAMESPACE_SEPARATOR}{key}", self.namespace)
        }
    }
}

#[async_trait]
impl<B: KeyValueBackend> Store for RedisStore<B> {
    async fn set(&self, key: &str, value: &str, expiry: Duration) -> Result<()> {
        if expiry.is_zero() {
            return Err(CacheError::InvalidExpiry);
        }

        let key = self.namespace_key(key);
        tracing::trace!(%key, ?expiry, "Cache set");

        self.backend
            .set(&key, value, expiry)
            .await
            .map_err(|source| CacheError::Set { key, source })
    }

    async fn get(&self, key: &str) -> Result<String> {
        let key = self.namespace_key(key);
        tracing::trace!(%key, "Cache get");

        match self.backend.get(&key).await {
            Ok(Some(value)) => Ok(value),
            Ok(None) => {
                tracing::debug!(%key, "Cache miss");
                Err(CacheError::KeyNotFound { key })
            }
            Err(source) => Err(CacheError::Get { key, source }),
        }
    }
}
