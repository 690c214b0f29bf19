//! Redis `DbClient` trait implementation

use std::collections::HashMap;

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::error::DbError;
use crate::traits::{BackendKind, DbClient};
use crate::types::{Account, DbClientResult, Flow};
use crate::utils::log_sanitizer::truncate_for_log;

use super::RedisClient;
use super::error::map_redis_error;

impl RedisClient {
    async fn fetch_accounts(&self) -> Result<Vec<Account>, DbError> {
        let mut conn = self.connection().await?;
        let raw: HashMap<String, String> = conn
            .hgetall(self.accounts_key())
            .await
            .map_err(|e| map_redis_error(&e))?;
        Ok(accounts_from_hash(raw))
    }

    async fn store_account(&self, acct_id: i64, password: &str) -> Result<Account, DbError> {
        let mut conn = self.connection().await?;
        // HSET overwrites an existing field
        let _: i64 = conn
            .hset(self.accounts_key(), acct_id, password)
            .await
            .map_err(|e| map_redis_error(&e))?;
        Ok(Account::new(acct_id, password))
    }

    async fn delete_account(&self, acct_id: i64) -> Result<(), DbError> {
        let mut conn = self.connection().await?;
        let removed: i64 = conn
            .hdel(self.accounts_key(), acct_id)
            .await
            .map_err(|e| map_redis_error(&e))?;
        if removed == 0 {
            log::debug!("[redis] Account {acct_id} was not present");
        }
        Ok(())
    }

    async fn fetch_flow(&self) -> Result<Flow, DbError> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn
            .get(self.flow_key())
            .await
            .map_err(|e| map_redis_error(&e))?;
        let raw = raw.ok_or(DbError::FlowNotFound {
            backend: BackendKind::Redis,
        })?;
        log::debug!("[redis] Flow payload: {}", truncate_for_log(&raw));
        Flow::from_json(&raw).map_err(|e| DbError::Serialization {
            backend: BackendKind::Redis,
            detail: e.to_string(),
        })
    }
}

/// Convert an `HGETALL` reply into accounts sorted by id.
///
/// Fields that are not integers were not written by this client and are skipped.
fn accounts_from_hash(raw: HashMap<String, String>) -> Vec<Account> {
    let mut accounts: Vec<Account> = raw
        .into_iter()
        .filter_map(|(field, password)| match field.parse::<i64>() {
            Ok(acct_id) => Some(Account { acct_id, password }),
            Err(_) => {
                log::warn!("[redis] Skipping non-numeric account field '{field}'");
                None
            }
        })
        .collect();
    accounts.sort_by_key(|a| a.acct_id);
    accounts
}

#[async_trait]
impl DbClient for RedisClient {
    fn backend(&self) -> BackendKind {
        BackendKind::Redis
    }

    async fn list_accounts(&self) -> DbClientResult<Vec<Account>> {
        DbClientResult::logged(self.fetch_accounts().await, "list_accounts")
    }

    async fn add_account(&self, acct_id: i64, password: &str) -> DbClientResult<Account> {
        DbClientResult::logged(self.store_account(acct_id, password).await, "add_account")
    }

    async fn remove_account(&self, acct_id: i64) -> DbClientResult<()> {
        DbClientResult::logged(self.delete_account(acct_id).await, "remove_account")
    }

    async fn get_flow(&self) -> DbClientResult<Flow> {
        DbClientResult::logged(self.fetch_flow().await, "get_flow")
    }

    async fn disconnect(&self) {
        if self.conn.write().await.take().is_some() {
            log::info!("[redis] Disconnected");
        }
    }
}
