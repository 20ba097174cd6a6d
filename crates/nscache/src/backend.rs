//! # Redis Backend
//!
//! The key-value seam a [`RedisStore`](crate::RedisStore) talks to, and its
//! implementation over the `redis` crate in single-node or cluster mode.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionLike, ConnectionManager};
use redis::cluster::{ClusterClient, ClusterClientBuilder};
use redis::cluster_async::ClusterConnection;
use redis::{
    AsyncCommands, ConnectionAddr, ConnectionInfo, ErrorKind, IntoConnectionInfo, RedisError,
    RedisResult,
};

#[cfg(test)]
use mockall::automock;

use crate::error::{BoxError, ConnectError};
use crate::options::RedisOptions;

/// Minimal key-value operations needed by the store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyValueBackend: Send + Sync {
    /// Store `value` under `key`, expiring after `expiry`.
    async fn set(&self, key: &str, value: &str, expiry: Duration) -> Result<(), BoxError>;

    /// Fetch the value under `key`. `None` means the key is absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>, BoxError>;
}

// =============================================================================
// CLIENT
// =============================================================================

/// An unconnected Redis client, either single-node or cluster aware.
#[derive(Clone)]
pub enum RedisClient {
    Single { address: String, client: redis::Client },
    Cluster { address: String, client: ClusterClient },
}

impl RedisClient {
    /// Build a client for `address` (`host:port`). Performs no I/O.
    ///
    /// In cluster mode the address seeds topology discovery and TLS is used
    /// when requested. rustls only negotiates TLS 1.2 or newer. A single-node
    /// client never uses TLS, whatever the options say.
    pub fn new(
        address: &str,
        password: Option<&str>,
        options: &RedisOptions,
    ) -> Result<Self, ConnectError> {
        let password = password.filter(|p| !p.is_empty());
        let info = connection_info(address, password).map_err(ConnectError::Configuration)?;

        if options.cluster_mode() {
            let mut builder = ClusterClientBuilder::new(vec![info]);
            if let Some(password) = password {
                builder = builder.password(password.to_string());
            }
            if options.tls() {
                builder = builder.tls(redis::TlsMode::Secure);
            }
            let client = builder.build().map_err(ConnectError::Configuration)?;

            tracing::debug!(
                %address,
                tls = options.tls(),
                namespace = options.namespace(),
                "Built Redis cluster client"
            );

            return Ok(Self::Cluster {
                address: address.to_string(),
                client,
            });
        }

        if options.tls() {
            tracing::debug!(%address, "TLS requested without cluster mode, ignoring");
        }

        let client = redis::Client::open(info).map_err(ConnectError::Configuration)?;

        tracing::debug!(
            %address,
            namespace = options.namespace(),
            "Built Redis single-node client"
        );

        Ok(Self::Single {
            address: address.to_string(),
            client,
        })
    }

    pub const fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster { .. })
    }

    pub fn address(&self) -> &str {
        match self {
            Self::Single { address, .. } | Self::Cluster { address, .. } => address,
        }
    }

    /// Open the connection. The result is cheap to clone and safe to share.
    pub async fn connect(&self) -> Result<RedisConnection, ConnectError> {
        let connection = match self {
            Self::Single { client, .. } => ConnectionManager::new(client.clone())
                .await
                .map(RedisConnection::Single),
            Self::Cluster { client, .. } => client
                .get_async_connection()
                .await
                .map(RedisConnection::Cluster),
        };

        connection.map_err(|source| ConnectError::Connection {
            address: self.address().to_string(),
            source,
        })
    }
}

/// Accepts either a bare `host:port` or a full `redis://` URL.
///
/// TLS is decided by the options alone, so a `rediss://` scheme is reduced to
/// plain TCP here. Only database 0 is supported.
fn connection_info(address: &str, password: Option<&str>) -> RedisResult<ConnectionInfo> {
    let mut info = if address.contains("://") {
        address.into_connection_info()?
    } else {
        format!("redis://{address}").into_connection_info()?
    };

    if info.redis.db != 0 {
        return Err(RedisError::from((
            ErrorKind::InvalidClientConfig,
            "only database 0 is supported",
        )));
    }

    info.addr = match info.addr {
        ConnectionAddr::TcpTls { host, port, .. } => ConnectionAddr::Tcp(host, port),
        addr => addr,
    };

    if let Some(password) = password {
        info.redis.password = Some(password.to_string());
    }

    Ok(info)
}

// =============================================================================
// CONNECTION
// =============================================================================

/// A live Redis connection.
#[derive(Clone)]
pub enum RedisConnection {
    /// Auto-reconnecting multiplexed connection to one node
    Single(ConnectionManager),
    /// Slot-routing connection to a cluster
    Cluster(ClusterConnection),
}

impl RedisConnection {
    pub const fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster(_))
    }
}

#[async_trait]
impl KeyValueBackend for RedisConnection {
    async fn set(&self, key: &str, value: &str, expiry: Duration) -> Result<(), BoxError> {
        let result = match self {
            Self::Single(conn) => set_with_expiry(conn.clone(), key, value, expiry).await,
            Self::Cluster(conn) => set_with_expiry(conn.clone(), key, value, expiry).await,
        };
        result.map_err(Into::into)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, BoxError> {
        let result = match self {
            Self::Single(conn) => get_value(conn.clone(), key).await,
            Self::Cluster(conn) => get_value(conn.clone(), key).await,
        };
        result.map_err(Into::into)
    }
}

/// SET with EX for whole seconds, PX otherwise.
async fn set_with_expiry<C>(
    mut conn: C,
    key: &str,
    value: &str,
    expiry: Duration,
) -> RedisResult<()>
where
    C: ConnectionLike + Send,
{
    if expiry.subsec_nanos() == 0 {
        conn.set_ex::<_, _, ()>(key, value, expiry.as_secs()).await
    } else {
        conn.pset_ex::<_, _, ()>(key, value, expiry_millis(expiry)).await
    }
}

async fn get_value<C>(mut conn: C, key: &str) -> RedisResult<Option<String>>
where
    C: ConnectionLike + Send,
{
    conn.get(key).await
}

/// Millisecond expiry, never rounded down to zero.
fn expiry_millis(expiry: Duration) -> u64 {
    u64::try_from(expiry.as_millis()).unwrap_or(u64::MAX).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "127.0.0.1:6379";

    #[test]
    fn test_single_node_without_cluster_mode() {
        let client = RedisClient::new(ADDRESS, Some("password"), &RedisOptions::new()).unwrap();
        assert!(!client.is_cluster());
        assert_eq!(client.address(), ADDRESS);
    }

    #[test]
    fn test_tls_ignored_without_cluster_mode() {
        let options = RedisOptions::new().with_tls();
        let client = RedisClient::new(ADDRESS, None, &options).unwrap();
        assert!(matches!(client, RedisClient::Single { .. }));
    }

    #[test]
    fn test_cluster_mode() {
        let options = RedisOptions::new().with_cluster_mode();
        let client = RedisClient::new(ADDRESS, Some("password"), &options).unwrap();
        assert!(client.is_cluster());

        let options = options.with_tls();
        let client = RedisClient::new(ADDRESS, Some("password"), &options).unwrap();
        assert!(client.is_cluster());
    }

    #[test]
    fn test_invalid_address() {
        let result = RedisClient::new("not a host:port:", None, &RedisOptions::new());
        assert!(matches!(result, Err(ConnectError::Configuration(_))));
    }

    #[test]
    fn test_connection_info() {
        let info = connection_info(ADDRESS, Some("secret")).unwrap();
        assert_eq!(info.redis.password.as_deref(), Some("secret"));
        assert_eq!(info.redis.db, 0);

        let info = connection_info("redis://cache.internal:6380", None).unwrap();
        assert_eq!(info.redis.password, None);
        assert!(matches!(
            info.addr,
            redis::ConnectionAddr::Tcp(ref host, 6380) if host == "cache.internal"
        ));
    }

    #[test]
    fn test_tls_scheme_does_not_enable_tls() {
        let info = connection_info("rediss://cache.internal:6380", None).unwrap();
        assert!(matches!(
            info.addr,
            redis::ConnectionAddr::Tcp(ref host, 6380) if host == "cache.internal"
        ));

        let client =
            RedisClient::new("rediss://cache.internal:6380", None, &RedisOptions::new()).unwrap();
        let RedisClient::Single { client, .. } = client else {
            panic!("expected a single-node client");
        };
        assert!(matches!(
            client.get_connection_info().addr,
            redis::ConnectionAddr::Tcp(_, 6380)
        ));

        // Cluster mode without TLS options must not pick TLS up from the scheme
        let options = RedisOptions::new().with_cluster_mode();
        let client = RedisClient::new("rediss://cache.internal:6380", None, &options).unwrap();
        assert!(client.is_cluster());
    }

    #[test]
    fn test_database_must_be_zero() {
        assert_eq!(connection_info("redis://cache.internal:6380/0", None).unwrap().redis.db, 0);

        let result = RedisClient::new("redis://cache.internal:6380/5", None, &RedisOptions::new());
        assert!(matches!(result, Err(ConnectError::Configuration(_))));
    }

    #[test]
    fn test_expiry_millis() {
        assert_eq!(expiry_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(expiry_millis(Duration::from_micros(10)), 1);
        assert_eq!(expiry_millis(Duration::MAX), u64::MAX);
    }
}
