//! # nscache
//!
//! Thin namespaced string cache over Redis.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Application Layer                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  set(key, value, expiry) / get(key)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        RedisStore                            │
//! │     (namespace prefixing, expiry check, error mapping)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  KeyValueBackend
//!                    ┌─────────┴─────────┐
//!                    ▼                   ▼
//! ┌─────────────────────────┐   ┌──────────────────────────────┐
//! │   Single-node Redis     │   │  Redis Cluster (+ TLS)       │
//! │  (ConnectionManager)    │   │  (ClusterConnection)         │
//! └─────────────────────────┘   └──────────────────────────────┘
//! ```
//!
//! Pooling, reconnection, cluster routing and TLS are handled by the `redis`
//! crate. Every stored value must carry a non-zero expiry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use nscache::{RedisConfig, RedisStore, Store};
//!
//! let config = RedisConfig::new("127.0.0.1:6379")
//!     .namespace("sessions")
//!     .disable_cluster_mode(true)
//!     .disable_tls(true);
//!
//! let store = RedisStore::from_config(&config).await?;
//! store.set("user:42", "token", Duration::from_secs(3600)).await?;
//!
//! match store.get("user:42").await {
//!     Ok(value) => println!("{value}"),
//!     Err(e) if e.is_not_found() => println!("miss"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod backend;
pub mod config;
pub mod error;
pub mod options;
pub mod store;

// Re-export commonly used types
pub use backend::{KeyValueBackend, RedisClient, RedisConnection};
pub use config::RedisConfig;
pub use error::{BoxError, CacheError, ConnectError, Result};
pub use options::RedisOptions;
pub use store::{NAMESPACE_SEPARATOR, RedisStore, Store};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
