//! In-memory `DbClient` for running the contract suite without a server.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use db_client::{Account, BackendKind, DbClient, DbClientResult, DbError, Flow};
use tokio::sync::RwLock;

// ===== MemoryClient =====

pub struct MemoryClient {
    backend: BackendKind,
    accounts: RwLock<BTreeMap<i64, String>>,
    flow: RwLock<Option<Flow>>,
    disconnected: AtomicBool,
}

impl MemoryClient {
    /// Empty store reporting itself as `backend`.
    pub fn new(backend: BackendKind) -> Self {
        Self {
            backend,
            accounts: RwLock::new(BTreeMap::new()),
            flow: RwLock::new(None),
            disconnected: AtomicBool::new(false),
        }
    }

    pub async fn set_flow(&self, flow: Option<Flow>) {
        *self.flow.write().await = flow;
    }

    fn ensure_connected(&self) -> Result<(), DbError> {
        if self.disconnected.load(Ordering::SeqCst) {
            return Err(DbError::Disconnected {
                backend: self.backend,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DbClient for MemoryClient {
    fn backend(&self) -> BackendKind {
        self.backend
    }

    async fn list_accounts(&self) -> DbClientResult<Vec<Account>> {
        if let Err(e) = self.ensure_connected() {
            return DbClientResult::failure(e);
        }
        let accounts = self
            .accounts
            .read()
            .await
            .iter()
            .map(|(id, pw)| Account::new(*id, pw.clone()))
            .collect();
        DbClientResult::success(accounts)
    }

    async fn add_account(&self, acct_id: i64, password: &str) -> DbClientResult<Account> {
        if let Err(e) = self.ensure_connected() {
            return DbClientResult::failure(e);
        }
        self.accounts
            .write()
            .await
            .insert(acct_id, password.to_string());
        DbClientResult::success(Account::new(acct_id, password))
    }

    async fn remove_account(&self, acct_id: i64) -> DbClientResult<()> {
        if let Err(e) = self.ensure_connected() {
            return DbClientResult::failure(e);
        }
        self.accounts.write().await.remove(&acct_id);
        DbClientResult::success(())
    }

    async fn get_flow(&self) -> DbClientResult<Flow> {
        if let Err(e) = self.ensure_connected() {
            return DbClientResult::failure(e);
        }
        match self.flow.read().await.clone() {
            Some(flow) => DbClientResult::success(flow),
            None => DbClientResult::failure(DbError::FlowNotFound {
                backend: self.backend,
            }),
        }
    }

    async fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }
}
