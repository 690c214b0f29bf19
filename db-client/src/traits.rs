use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::{Account, DbClientResult, Flow};

/// Storage engines with a compiled-in [`DbClient`] implementation.
///
/// Unlike [`DbType`](crate::DbType), this enum only names backends the
/// library actually knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Redis key/value store.
    Redis,
    /// MySQL relational database.
    MySql,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::MySql => write!(f, "mysql"),
        }
    }
}

/// Backend-agnostic account store.
///
/// Every operation returns a [`DbClientResult`] envelope. Backend failures
/// (network, auth, malformed data) are reported through the envelope's error
/// status and never as a panic or a driver-specific error type.
///
/// A handle owns exactly one backend connection. Operations on one handle are
/// issued sequentially by its owner; concurrent use is only as safe as the
/// underlying driver makes it.
///
/// Implementations:
/// - `RedisClient` (feature `redis`)
/// - `MySqlClient` (feature `mysql`)
#[async_trait]
pub trait DbClient: Send + Sync {
    /// Backend this handle talks to.
    fn backend(&self) -> BackendKind;

    /// List every stored account, ordered by id.
    async fn list_accounts(&self) -> DbClientResult<Vec<Account>>;

    /// Create or overwrite the account keyed by `acct_id`.
    ///
    /// Duplicate ids overwrite the stored password on every backend. On
    /// success the payload is the account as stored.
    ///
    /// # Arguments
    /// * `acct_id` - Account identifier
    /// * `password` - Secret to associate with the account
    async fn add_account(&self, acct_id: i64, password: &str) -> DbClientResult<Account>;

    /// Delete the account keyed by `acct_id`.
    ///
    /// Removing an id that does not exist is a success.
    async fn remove_account(&self, acct_id: i64) -> DbClientResult<()>;

    /// Fetch the flow record associated with this connection.
    async fn get_flow(&self) -> DbClientResult<Flow>;

    /// Release the underlying connection.
    ///
    /// Subsequent operations report [`DbError::Disconnected`](crate::DbError::Disconnected).
    /// Calling it again is a no-op.
    async fn disconnect(&self);
}
