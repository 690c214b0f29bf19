//! MySQL `DbClient` trait implementation

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveValue::Set, EntityTrait, QueryOrder};

use crate::error::DbError;
use crate::traits::{BackendKind, DbClient};
use crate::types::{Account, DbClientResult, Flow};
use crate::utils::log_sanitizer::truncate_for_log;

use super::entity::{account, flow};
use super::error::map_db_err;
use super::{FLOW_ROW_ID, MySqlClient};

impl From<account::Model> for Account {
    fn from(model: account::Model) -> Self {
        Self {
            acct_id: model.acct_id,
            password: model.password,
        }
    }
}

impl MySqlClient {
    async fn fetch_accounts(&self) -> Result<Vec<Account>, DbError> {
        let db = self.connection().await?;
        let rows = account::Entity::find()
            .order_by_asc(account::Column::AcctId)
            .all(&db)
            .await
            .map_err(|e| map_db_err(&e))?;
        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn store_account(&self, acct_id: i64, password: &str) -> Result<Account, DbError> {
        let db = self.connection().await?;
        let active_model = account::ActiveModel {
            acct_id: Set(acct_id),
            password: Set(password.to_string()),
        };

        // ON DUPLICATE KEY UPDATE: an existing id gets the new password
        account::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(account::Column::AcctId)
                    .update_column(account::Column::Password)
                    .to_owned(),
            )
            .exec_without_returning(&db)
            .await
            .map_err(|e| map_db_err(&e))?;

        Ok(Account::new(acct_id, password))
    }

    async fn delete_account(&self, acct_id: i64) -> Result<(), DbError> {
        let db = self.connection().await?;
        let result = account::Entity::delete_by_id(acct_id)
            .exec(&db)
            .await
            .map_err(|e| map_db_err(&e))?;
        if result.rows_affected == 0 {
            log::debug!("[mysql] Account {acct_id} was not present");
        }
        Ok(())
    }

    async fn fetch_flow(&self) -> Result<Flow, DbError> {
        let db = self.connection().await?;
        let row = flow::Entity::find_by_id(FLOW_ROW_ID)
            .one(&db)
            .await
            .map_err(|e| map_db_err(&e))?
            .ok_or(DbError::FlowNotFound {
                backend: BackendKind::MySql,
            })?;
        log::debug!("[mysql] Flow payload: {}", truncate_for_log(&row.data));
        Flow::from_json(&row.data).map_err(|e| DbError::Serialization {
            backend: BackendKind::MySql,
            detail: e.to_string(),
        })
    }
}

#[async_trait]
impl DbClient for MySqlClient {
    fn backend(&self) -> BackendKind {
        BackendKind::MySql
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
        let Some(db) = self.db.write().await.take() else {
            return;
        };
        match db.close().await {
            Ok(()) => log::info!("[mysql] Disconnected"),
            Err(e) => log::warn!("[mysql] Error while closing connection: {e}"),
        }
    }
}
