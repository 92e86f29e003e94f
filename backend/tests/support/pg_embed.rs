//! Embedded PostgreSQL for the Diesel repository suites.
//!
//! One cluster is shared per test binary. Each test gets its own database
//! cloned from a template that already carries the migrations, so the schema
//! is built once per migrations hash.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip these suites where the cluster cannot
//! start; otherwise a setup failure fails the test.
#![allow(dead_code, reason = "each repository suite uses a subset")]

use std::fmt::Display;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use bookstore::outbound::persistence::{DbPool, PoolConfig};
use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// A migrated, throwaway database with a pool and a runtime to drive it.
pub struct PgContext {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub url: String,
    _database: TemporaryDatabase,
}

impl PgContext {
    /// Run raw SQL outside the repositories, for seeding and assertions.
    pub fn client(&self) -> Client {
        Client::connect(&self.url, NoTls)
            .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)))
    }

    /// Row count of `table`.
    pub fn count(&self, table: &str) -> i64 {
        self.client()
            .query_one(format!("SELECT count(*) FROM {table}").as_str(), &[])
            .map(|row| row.get::<_, i64>(0))
            .unwrap_or_else(|err| panic!("count {table}: {}", format_postgres_error(&err)))
    }
}

/// Render a `postgres` error with its SQLSTATE and message.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db_error) => format!(
            "postgres error {:?}: {}",
            db_error.code(),
            db_error.message()
        ),
        None => error.to_string(),
    }
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn handle_cluster_setup_failure<T>(reason: impl Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn template_database_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short_hash = hash.get(..8).unwrap_or(&hash);
    Ok(format!("bookstore_template_{short_hash}"))
}

fn migrate_schema(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|err| format!("migration: {err}"))
}

fn ensure_template_database(cluster: &ClusterHandle) -> Result<String, String> {
    let template_name = template_database_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let exists = cluster
        .database_exists(template_name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(template_name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        migrate_schema(&cluster.connection().database_url(&template_name))?;
    }
    Ok(template_name)
}

fn setup_context() -> Result<PgContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}"))?;
    let template_name = ensure_template_database(cluster)?;
    let db_name = format!("test_{}", Uuid::new_v4());
    let database = cluster
        .temporary_database_from_template(db_name.as_str(), template_name.as_str())
        .map_err(|err| format!("create database from template: {err:?}"))?;
    let url = database.url().to_string();

    let config = PoolConfig::new(url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(PgContext {
        runtime,
        pool,
        url,
        _database: database,
    })
}

/// A fresh database, or `None` when the cluster is unavailable and skipping
/// is enabled.
pub fn pg_context() -> Option<PgContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}
