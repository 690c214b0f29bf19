//! Redis error mapping

use redis::{ErrorKind, RedisError};

use crate::error::DbError;
use crate::traits::BackendKind;

/// Translate a driver error into the backend-neutral [`DbError`].
pub(crate) fn map_redis_error(err: &RedisError) -> DbError {
    match err.kind() {
        ErrorKind::TypeError => DbError::Serialization {
            backend: BackendKind::Redis,
            detail: err.to_string(),
        },
        _ => DbError::Operation {
            backend: BackendKind::Redis,
            detail: err.to_string(),
        },
    }
}
