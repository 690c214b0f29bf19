//! Redis backend
//!
//! Layout under the configured key prefix:
//! - `{prefix}:accounts`: hash of account id to password
//! - `{prefix}:flow`: JSON document of the flow record

mod client;
mod error;

use redis::aio::MultiplexedConnection;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::error::DbError;
use crate::traits::BackendKind;
use crate::utils::log_sanitizer::redact_url;

/// Redis-backed [`DbClient`](crate::DbClient).
///
/// Owns a single multiplexed connection. `disconnect` drops it; later
/// operations fail with [`DbError::Disconnected`].
pub struct RedisClient {
    pub(crate) conn: RwLock<Option<MultiplexedConnection>>,
    pub(crate) key_prefix: String,
}

impl RedisClient {
    /// Open the connection described by `config` and verify it with `PING`.
    ///
    /// The error string carries the driver's root cause; the factory wraps it
    /// into a `ConnectionSetup` error.
    pub(crate) async fn connect(config: &Config) -> Result<Self, String> {
        let url = connection_url(config);
        log::debug!("[redis] Connecting to {}", redact_url(&url));

        let client = redis::Client::open(url.as_str()).map_err(|e| e.to_string())?;
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| e.to_string())?;

        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| e.to_string())?;

        Ok(Self::from_connection(conn, config.key_prefix.clone()))
    }

    pub(crate) fn from_connection(conn: MultiplexedConnection, key_prefix: String) -> Self {
        Self {
            conn: RwLock::new(Some(conn)),
            key_prefix,
        }
    }

    /// Clone of the live connection, or `Disconnected`.
    pub(crate) async fn connection(&self) -> Result<MultiplexedConnection, DbError> {
        self.conn
            .read()
            .await
            .clone()
            .ok_or(DbError::Disconnected {
                backend: BackendKind::Redis,
            })
    }

    pub(crate) fn accounts_key(&self) -> String {
        accounts_key(&self.key_prefix)
    }

    pub(crate) fn flow_key(&self) -> String {
        flow_key(&self.key_prefix)
    }
}

fn accounts_key(prefix: &str) -> String {
    format!("{prefix}:accounts")
}

fn flow_key(prefix: &str) -> String {
    format!("{prefix}:flow")
}

/// Build `redis://[:password@]host:port/` from the configuration.
fn connection_url(config: &Config) -> String {
    let host = &config.db_addr;
    let port = config.port();
    match config.db_password.as_deref() {
        Some(pw) if !pw.is_empty() => {
            format!("redis://:{}@{host}:{port}/", urlencoding::encode(pw))
        }
        _ => format!("redis://{host}:{port}/"),
    }
}
