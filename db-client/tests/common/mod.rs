//! Shared test helpers and the backend contract suite

#![allow(dead_code)]

pub mod test_utils;

use db_client::{Account, Config, DbClient, DbError, DbType, initialize};

/// Skip the test when a required environment variable is missing.
#[macro_export]
macro_rules! skip_if_no_env {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping test: environment variable {} not set", $var);
                return;
            }
        )+
    };
}

/// Assert `Result` is `Ok` and unwrap it (fails the test otherwise).
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {:?}", res.as_ref().err());
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Redis test config from `TEST_REDIS_ADDR` / `TEST_REDIS_PORT` / `TEST_REDIS_PASSWORD`.
///
/// Each test gets its own key prefix so runs do not interfere.
pub fn redis_config(test_name: &str) -> Config {
    Config {
        db_type: DbType::Redis,
        db_addr: env_or("TEST_REDIS_ADDR", "127.0.0.1"),
        db_port: std::env::var("TEST_REDIS_PORT")
            .ok()
            .and_then(|p| p.parse().ok()),
        db_password: std::env::var("TEST_REDIS_PASSWORD").ok(),
        key_prefix: format!("db-client-test:{test_name}:{}", std::process::id()),
        ..Config::default()
    }
}

/// MySQL test config from `TEST_MYSQL_*` variables.
pub fn mysql_config() -> Config {
    Config {
        db_type: DbType::MySql,
        db_addr: env_or("TEST_MYSQL_ADDR", "127.0.0.1"),
        db_port: std::env::var("TEST_MYSQL_PORT")
            .ok()
            .and_then(|p| p.parse().ok()),
        db_user: Some(env_or("TEST_MYSQL_USER", "root")),
        db_password: std::env::var("TEST_MYSQL_PASSWORD").ok(),
        db_name: Some(env_or("TEST_MYSQL_DATABASE", "db_client_test")),
        debug: true,
        ..Config::default()
    }
}

/// Connect or fail the test.
pub async fn connect(config: &Config) -> Box<dyn DbClient> {
    match initialize(config).await {
        Ok(client) => client,
        Err(e) => panic!("failed to initialize {}: {e}", config.db_type),
    }
}

fn find(accounts: &[Account], acct_id: i64) -> Vec<&Account> {
    accounts.iter().filter(|a| a.acct_id == acct_id).collect()
}

// ===== Contract suite =====
//
// Every backend must pass these against a fresh handle. Ids are picked per
// call site so suites sharing a database do not collide.

/// `add_account` then `list_accounts` sees the new account.
pub async fn check_read_your_write(client: &dyn DbClient, acct_id: i64) {
    let added = client.add_account(acct_id, "secretA").await;
    assert!(added.is_success(), "add failed: {:?}", added.error());
    assert_eq!(added.data(), Some(&Account::new(acct_id, "secretA")));

    let listed = client.list_accounts().await;
    assert!(listed.is_success(), "list failed: {:?}", listed.error());
    let accounts = listed.data().cloned().unwrap_or_default();
    assert_eq!(find(&accounts, acct_id).len(), 1);

    assert!(client.remove_account(acct_id).await.is_success());
}

/// A duplicate id overwrites the password instead of adding a second entry.
pub async fn check_duplicate_overwrites(client: &dyn DbClient, acct_id: i64) {
    assert!(client.add_account(acct_id, "secretA").await.is_success());
    assert!(client.add_account(acct_id, "secretB").await.is_success());

    let accounts = client
        .list_accounts()
        .await
        .into_result()
        .unwrap_or_default();
    let matches = find(&accounts, acct_id);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].password, "secretB");

    assert!(client.remove_account(acct_id).await.is_success());
}

/// Removing a missing id succeeds, twice in a row.
pub async fn check_remove_is_idempotent(client: &dyn DbClient, acct_id: i64) {
    let first = client.remove_account(acct_id).await;
    let second = client.remove_account(acct_id).await;
    assert!(first.is_success());
    assert!(second.is_success());
    assert_eq!(first.data(), Some(&()));
    assert_eq!(second.data(), Some(&()));
}

/// After `disconnect` every operation fails with `Disconnected`.
pub async fn check_disconnect(client: &dyn DbClient) {
    client.disconnect().await;

    let listed = client.list_accounts().await;
    assert!(!listed.is_success());
    assert!(listed.data().is_none());
    assert!(matches!(listed.error(), Some(DbError::Disconnected { .. })));

    assert!(!client.add_account(1, "x").await.is_success());
    assert!(!client.remove_account(1).await.is_success());
    assert!(!client.get_flow().await.is_success());

    // idempotent
    client.disconnect().await;
}
