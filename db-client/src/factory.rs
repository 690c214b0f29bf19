//! Backend selection and connection establishment.

use crate::config::{Config, DbType};
use crate::error::{BackendError, InitResult};
use crate::traits::{BackendKind, DbClient};

#[cfg(feature = "mysql")]
use crate::backends::MySqlClient;
#[cfg(feature = "redis")]
use crate::backends::RedisClient;

/// Connect to the backend named by `config` and return it behind [`DbClient`].
///
/// Dispatch is a single branch on [`Config::db_type`]; no other backend is
/// tried. A kind whose cargo feature is disabled counts as unsupported.
/// Failures are logged (kind plus `addr:port`) before being returned, and are
/// never retried here.
///
/// # Examples
///
/// ```rust,no_run
/// use db_client::{initialize, Config, DbType};
///
/// # async fn example() -> Result<(), db_client::BackendError> {
/// let config = Config {
///     db_type: DbType::Redis,
///     db_addr: "127.0.0.1".to_string(),
///     ..Config::default()
/// };
/// let client = initialize(&config).await?;
/// let accounts = client.list_accounts().await;
/// client.disconnect().await;
/// # Ok(())
/// # }
/// ```
pub async fn initialize(config: &Config) -> InitResult<Box<dyn DbClient>> {
    let Some(kind) = resolve_backend(&config.db_type) else {
        log::error!(
            "Database {} not supported. Requested for {}:{}",
            config.db_type,
            config.db_addr,
            config.port()
        );
        return Err(BackendError::UnsupportedBackend {
            kind: config.db_type.to_string(),
        });
    };

    if let Err(e) = config.validate() {
        log::error!("[{kind}] {e}");
        return Err(e);
    }

    let address = config.db_addr.as_str();
    let port = config.port();

    let connected = connect(kind, config).await;
    match connected {
        Ok(client) => {
            log::info!(
                "Running in {} mode. Connected to {address}:{port}",
                mode_name(kind)
            );
            Ok(client)
        }
        Err(detail) => {
            log::error!("[{kind}] Connection to {address}:{port} failed: {detail}");
            Err(BackendError::ConnectionSetup {
                backend: kind,
                address: address.to_string(),
                port,
                detail,
            })
        }
    }
}

/// Backends compiled into this build.
pub fn supported_backends() -> Vec<BackendKind> {
    vec![
        #[cfg(feature = "redis")]
        BackendKind::Redis,
        #[cfg(feature = "mysql")]
        BackendKind::MySql,
    ]
}

/// Map a configured kind onto a compiled-in backend.
fn resolve_backend(db_type: &DbType) -> Option<BackendKind> {
    let kind = match db_type {
        DbType::Redis => BackendKind::Redis,
        DbType::MySql => BackendKind::MySql,
        DbType::Other(_) => return None,
    };
    supported_backends().contains(&kind).then_some(kind)
}

#[allow(unused_variables)]
async fn connect(kind: BackendKind, config: &Config) -> Result<Box<dyn DbClient>, String> {
    match kind {
        #[cfg(feature = "redis")]
        BackendKind::Redis => {
            let client = RedisClient::connect(config).await?;
            Ok(Box::new(client))
        }
        #[cfg(feature = "mysql")]
        BackendKind::MySql => {
            let client = MySqlClient::connect(config).await?;
            Ok(Box::new(client))
        }
        #[allow(unreachable_patterns)]
        other => Err(format!("backend {other} is not compiled in")),
    }
}

fn mode_name(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::Redis => "Redis",
        BackendKind::MySql => "MySQL",
    }
}
