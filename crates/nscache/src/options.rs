//! Construction options for a Redis-backed store.

/// Options controlling how a [`RedisStore`](crate::RedisStore) is built.
///
/// The default is a single-node client without TLS or namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedisOptions {
    namespace: String,
    cluster_mode: bool,
    tls: bool,
}

impl RedisOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every key with `namespace`, separated by `:`.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Connect in cluster mode.
    #[must_use]
    pub const fn with_cluster_mode(mut self) -> Self {
        self.cluster_mode = true;
        self
    }

    /// Use TLS. Ignored unless cluster mode is also enabled.
    #[must_use]
    pub const fn with_tls(mut self) -> Self {
        self.tls = true;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub const fn cluster_mode(&self) -> bool {
        self.cluster_mode
    }

    pub const fn tls(&self) -> bool {
        self.tls
    }
}
