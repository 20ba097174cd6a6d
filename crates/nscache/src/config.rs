//! # Store Configuration
//!
//! Declarative configuration for a Redis-backed store. Cluster mode and TLS
//! are expressed as opt-outs so a zero-value configuration is production
//! shaped; local setups typically disable both.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::RedisOptions;

/// Redis store configuration
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Server address as `host:port`
    pub address: String,

    /// Password used to authenticate, if any. Never serialized.
    #[serde(skip_serializing)]
    pub password: Option<String>,

    /// Namespace prepended to every key; empty for none
    pub namespace: String,

    /// Talk to a single node instead of a cluster
    pub disable_cluster_mode: bool,

    /// Skip TLS. Only meaningful in cluster mode, which is the only mode that
    /// ever uses TLS.
    pub disable_tls: bool,
}

impl RedisConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub const fn disable_cluster_mode(mut self, disable: bool) -> Self {
        self.disable_cluster_mode = disable;
        self
    }

    #[must_use]
    pub const fn disable_tls(mut self, disable: bool) -> Self {
        self.disable_tls = disable;
        self
    }

    /// Convert into the equivalent construction options.
    pub fn options(&self) -> RedisOptions {
        let mut options = RedisOptions::new();

        if !self.namespace.is_empty() {
            options = options.with_namespace(self.namespace.as_str());
        }

        if !self.disable_cluster_mode {
            options = options.with_cluster_mode();
        }

        if !self.disable_tls {
            options = options.with_tls();
        }

        options
    }
}

impl fmt::Debug for RedisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisConfig")
            .field("address", &self.address)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("namespace", &self.namespace)
            .field("disable_cluster_mode", &self.disable_cluster_mode)
            .field("disable_tls", &self.disable_tls)
            .finish()
    }
}
