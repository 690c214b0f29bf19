//! # db-client
//!
//! A uniform account store over interchangeable database backends, selected
//! at startup by configuration.
//!
//! ## Supported Backends
//!
//! | Backend | Feature Flag | Driver |
//! |---------|-------------|--------|
//! | [Redis](https://redis.io/) | `redis` | `redis` (tokio, multiplexed connection) |
//! | [MySQL](https://www.mysql.com/) | `mysql` | `sea-orm` (`sqlx-mysql`) |
//!
//! Only compiled-in backends can be selected; asking for any other kind fails
//! with [`BackendError::UnsupportedBackend`].
//!
//! ## Feature Flags
//!
//! - **`all-backends`** *(default)*: Enable every backend listed above.
//! - **`redis`**: Enable only the Redis backend.
//! - **`mysql`**: Enable only the MySQL backend.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use db_client::{initialize, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Load configuration (TOML file + DB_* environment overrides)
//!     let config = Config::load(Some("db-client.toml"))?;
//!
//!     // 2. Connect to whichever backend it names
//!     let client = initialize(&config).await?;
//!
//!     // 3. Every operation returns an envelope; check it
//!     let added = client.add_account(42, "secretA").await;
//!     if !added.is_success() {
//!         eprintln!("add failed: {:?}", added.error());
//!     }
//!
//!     let accounts = client.list_accounts().await.into_result()?;
//!     for account in &accounts {
//!         println!("{}", account.acct_id);
//!     }
//!
//!     // 4. Release the connection
//!     client.disconnect().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! - Initialization returns [`BackendError`]: unsupported kind, invalid
//!   configuration, or connection setup failure. None of them is retried.
//! - Operations return [`DbClientResult`]; failures carry a [`DbError`] and
//!   leave the handle usable for later calls.

mod backends;
mod config;
mod error;
mod factory;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{BackendError, DbError, InitResult};

// Re-export factory functions
pub use factory::{initialize, supported_backends};

// Re-export configuration
pub use config::{Config, DbType, DEFAULT_KEY_PREFIX, DEFAULT_MYSQL_PORT, DEFAULT_REDIS_PORT};

// Re-export capability trait
pub use traits::{BackendKind, DbClient};

// Re-export types
pub use types::{Account, DbClientResult, Flow};

// Re-export concrete backends (behind feature flags)
#[cfg(feature = "mysql")]
pub use backends::MySqlClient;
#[cfg(feature = "redis")]
pub use backends::RedisClient;
