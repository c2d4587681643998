//! Shared helpers for the users integration tests.
//!
//! Repository suites run against the shared embedded PostgreSQL cluster
//! started by `pg-embed-setup-unpriv`. Each test gets its own database cloned
//! from a template that already holds the users table, so tests never share
//! rows or id sequences.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use uuid::Uuid;

/// Schema applied to the template database.
pub const USERS_SCHEMA: &str = include_str!("../../sql/users.sql");

const TEMPLATE_NAME: &str = "users_api_template";
const SHARED_CLUSTER_RETRIES: usize = 5;
const PROVISION_RETRIES: usize = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Render a `postgres` error with the SQLSTATE and server message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Returns true when `SKIP_TEST_CLUSTER` is set to "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Handles embedded cluster setup failures consistently.
///
/// When `SKIP_TEST_CLUSTER` is truthy, prints a skip marker and returns
/// `None`. Otherwise panics so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Return the process-wide embedded cluster, starting it on first use.
pub fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 1;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(error) if attempt < SHARED_CLUSTER_RETRIES => {
                eprintln!("pg-embed: attempt {attempt} failed, retrying: {error:?}");
                std::thread::sleep(RETRY_DELAY);
                attempt += 1;
            }
            Err(error) => return Err(format!("{error:?}")),
        }
    }
}

/// Create the template database with the users table, once per cluster.
fn ensure_template_database(cluster: &ClusterHandle) -> Result<(), String> {
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(TEMPLATE_NAME)
        .map_err(|err| format!("template check: {err:?}"))?;
    if exists {
        return Ok(());
    }

    cluster
        .create_database(TEMPLATE_NAME)
        .map_err(|err| format!("create template: {err:?}"))?;
    let url = cluster.connection().database_url(TEMPLATE_NAME);
    let mut client = Client::connect(&url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(USERS_SCHEMA)
        .map_err(|err| format_postgres_error(&err))
}

/// Provision a fresh database holding an empty users table.
///
/// Must be called outside any Tokio runtime; the blocking client runs its own.
pub fn provision_users_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    ensure_template_database(cluster)?;

    let mut last_error = String::new();
    for attempt in 1..=PROVISION_RETRIES {
        let name = format!("users_test_{}", Uuid::new_v4().simple());
        match cluster.temporary_database_from_template(name.as_str(), TEMPLATE_NAME) {
            Ok(database) => return Ok(database),
            Err(error) => {
                last_error = format!("attempt {attempt}/{PROVISION_RETRIES}: {error:?}");
            }
        }
        std::thread::sleep(RETRY_DELAY);
    }
    Err(format!("create database from template: {last_error}"))
}
