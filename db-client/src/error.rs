//! Error taxonomy for the database client layer.
//!
//! Two families exist, one per failure surface:
//!
//! - [`BackendError`]: returned by [`initialize`](crate::initialize). These are
//!   terminal for the initialization attempt and are never retried internally.
//! - [`DbError`]: produced by capability operations against a live handle.
//!   They never escape as `Err`; backends wrap them in a
//!   [`DbClientResult`](crate::DbClientResult) so the caller can keep using the handle.

use serde::Serialize;
use thiserror::Error;

use crate::traits::BackendKind;

/// Initialization failure raised by the factory.
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "code")]
pub enum BackendError {
    /// The configured backend kind has no compiled-in implementation.
    #[error("Database {kind} not supported")]
    UnsupportedBackend {
        /// Backend kind as written in the configuration.
        kind: String,
    },

    /// The driver failed while establishing the connection.
    #[error("[{backend}] Failed to connect to {address}:{port}: {detail}")]
    ConnectionSetup {
        /// Backend that was being connected.
        backend: BackendKind,
        /// Configured address.
        address: String,
        /// Configured port.
        port: u16,
        /// Root cause reported by the driver.
        detail: String,
    },

    /// The configuration was rejected before any connection attempt.
    #[error("Invalid configuration '{field}': {detail}")]
    InvalidConfig {
        /// Offending configuration field.
        field: String,
        /// What is wrong with it.
        detail: String,
    },
}

/// Failure of a single capability operation against an established handle.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code")]
pub enum DbError {
    /// The backend reported an I/O or protocol fault.
    #[error("[{backend}] Operation failed: {detail}")]
    Operation {
        /// Backend that produced the error.
        backend: BackendKind,
        /// Driver error details.
        detail: String,
    },

    /// The handle was already disconnected.
    #[error("[{backend}] Client is disconnected")]
    Disconnected {
        /// Backend that produced the error.
        backend: BackendKind,
    },

    /// No flow record is stored.
    #[error("[{backend}] Flow record not found")]
    FlowNotFound {
        /// Backend that produced the error.
        backend: BackendKind,
    },

    /// Stored data could not be decoded.
    #[error("[{backend}] Serialization error: {detail}")]
    Serialization {
        /// Backend that produced the error.
        backend: BackendKind,
        /// Decoder error details.
        detail: String,
    },
}

impl DbError {
    /// Whether the failure is an anticipated condition rather than a fault.
    ///
    /// Expected errors are logged at `warn`, everything else at `error`.
    /// **Keep this in sync when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Disconnected { .. } | Self::FlowNotFound { .. })
    }

    /// Backend that produced the error.
    pub fn backend(&self) -> BackendKind {
        match self {
            Self::Operation { backend, .. }
            | Self::Disconnected { backend }
            | Self::FlowNotFound { backend }
            | Self::Serialization { backend, .. } => *backend,
        }
    }

    /// Emit this error through the `log` facade at the level `is_expected` picks.
    pub(crate) fn log(&self, operation: &str) {
        if self.is_expected() {
            log::warn!("{operation}: {self}");
        } else {
            log::error!("{operation}: {self}");
        }
    }
}

/// Convenience alias for initialization results.
pub type InitResult<T> = std::result::Result<T, BackendError>;
