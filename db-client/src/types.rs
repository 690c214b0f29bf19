use serde::{Deserialize, Serialize};

use crate::error::DbError;
use crate::utils::log_sanitizer::mask_secret;

// ============ Account ============

/// An account stored by a backend: an integer id plus an opaque secret.
///
/// The library never caches accounts; every value is a snapshot read from
/// (or just written to) the backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Identifier, unique within a backend.
    pub acct_id: i64,
    /// Associated secret.
    pub password: String,
}

impl Account {
    pub fn new(acct_id: i64, password: impl Into<String>) -> Self {
        Self {
            acct_id,
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("acct_id", &self.acct_id)
            .field("password", &mask_secret(&self.password))
            .finish()
    }
}

// ============ Flow ============

/// Opaque flow record. Its shape is defined by whoever writes it to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Flow(pub serde_json::Value);

impl Flow {
    /// Decode a flow from its stored JSON text.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw).map(Self)
    }

    /// Borrow the raw JSON document.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

// ============ Result envelope ============

/// Uniform envelope returned by every [`DbClient`](crate::DbClient) operation.
///
/// A successful result always carries `data` and never an `error`; a failed
/// result always carries an `error` and never `data`. The constructors are the
/// only way to build one, so the invariant holds for every value.
#[derive(Debug, Clone, Serialize)]
pub struct DbClientResult<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<DbError>,
}

impl<T> DbClientResult<T> {
    /// Successful envelope carrying `data`.
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Failed envelope carrying the diagnostic `error`.
    #[must_use]
    pub fn failure(error: DbError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Payload, present only on success.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Diagnostic, present only on failure.
    pub fn error(&self) -> Option<&DbError> {
        self.error.as_ref()
    }

    /// Convert into a plain `Result` for use with `?`.
    pub fn into_result(self) -> Result<T, DbError> {
        match (self.data, self.error) {
            (Some(data), None) => Ok(data),
            (_, Some(error)) => Err(error),
            // constructors rule this out
            (None, None) => unreachable!("DbClientResult without data or error"),
        }
    }

    /// Map the payload of a successful envelope.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DbClientResult<U> {
        DbClientResult {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
        }
    }

    /// Wrap a backend result, logging the failure under `operation`.
    pub(crate) fn logged(result: Result<T, DbError>, operation: &str) -> Self {
        if let Err(ref e) = result {
            e.log(operation);
        }
        result.into()
    }
}

impl<T> From<Result<T, DbError>> for DbClientResult<T> {
    fn from(result: Result<T, DbError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::BackendKind;

    #[test]
    fn success_carries_data_only() {
        let r = DbClientResult::success(vec![Account::new(1, "a")]);
        assert!(r.is_success());
        assert_eq!(r.data().map(Vec::len), Some(1));
        assert!(r.error().is_none());
    }

    #[test]
    fn failure_carries_error_only() {
        let r: DbClientResult<Vec<Account>> = DbClientResult::failure(DbError::Disconnected {
            backend: BackendKind::Redis,
        });
        assert!(!r.is_success());
        assert!(r.data().is_none());
        assert!(matches!(r.error(), Some(DbError::Disconnected { .. })));
    }

    #[test]
    fn empty_payload_is_unit() {
        let r = DbClientResult::success(());
        assert!(r.is_success());
        assert_eq!(r.into_result(), Ok(()));
    }

    #[test]
    fn from_result_and_back() {
        let err = DbError::FlowNotFound {
            backend: BackendKind::MySql,
        };
        let r: DbClientResult<Flow> = Err(err.clone()).into();
        assert!(!r.is_success());
        assert_eq!(r.into_result().unwrap_err(), err);

        let r: DbClientResult<i64> = Ok(42).into();
        assert_eq!(r.into_result(), Ok(42));
    }

    #[test]
    fn map_keeps_status() {
        let r = DbClientResult::success(Account::new(7, "x")).map(|a| a.acct_id);
        assert_eq!(r.data(), Some(&7));

        let r: DbClientResult<Account> = DbClientResult::failure(DbError::Disconnected {
            backend: BackendKind::MySql,
        });
        let mapped = r.map(|a| a.acct_id);
        assert!(!mapped.is_success());
        assert!(mapped.data().is_none());
    }

    #[test]
    fn serialize_envelope() {
        let r = DbClientResult::success(Account::new(42, "secretA"));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["acctId"], 42);
        assert!(json.get("error").is_none());

        let r: DbClientResult<()> = DbClientResult::failure(DbError::Operation {
            backend: BackendKind::Redis,
            detail: "refused".into(),
        });
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], "Operation");
    }

    #[test]
    fn account_debug_masks_password() {
        let dbg = format!("{:?}", Account::new(1, "hunter2"));
        assert!(!dbg.contains("hunter2"));
        assert!(dbg.contains("acct_id: 1"));
    }

    #[test]
    fn flow_from_json() {
        let flow = Flow::from_json(r#"{"nodes":[1,2]}"#).unwrap();
        assert_eq!(flow.as_value()["nodes"][1], 2);
        assert!(Flow::from_json("not json").is_err());
    }
}
