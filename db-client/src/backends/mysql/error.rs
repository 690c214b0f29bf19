//! MySQL error mapping

use sea_orm::DbErr;

use crate::error::DbError;
use crate::traits::BackendKind;

/// Translate a `SeaORM` error into the backend-neutral [`DbError`].
pub(crate) fn map_db_err(err: &DbErr) -> DbError {
    match err {
        DbErr::Json(_) | DbErr::Type(_) => DbError::Serialization {
            backend: BackendKind::MySql,
            detail: err.to_string(),
        },
        _ => DbError::Operation {
            backend: BackendKind::MySql,
            detail: err.to_string(),
        },
    }
}
