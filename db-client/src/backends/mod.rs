//! Backend implementations of [`DbClient`](crate::DbClient)

#[cfg(feature = "mysql")]
mod mysql;
#[cfg(feature = "redis")]
mod redis;

#[cfg(feature = "mysql")]
pub use mysql::MySqlClient;
#[cfg(feature = "redis")]
pub use redis::RedisClient;
