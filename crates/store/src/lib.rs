//! Fraudwatch Persistence - SQLite backend
//!
//! Implements the engine's `RuleStore` and `TransactionStore` traits on
//! top of sqlx/SQLite. Decimals are stored as TEXT to keep exact scale,
//! uuids as TEXT, timestamps via sqlx's chrono support.

pub mod error;
pub mod repos;
pub mod schema;

pub use error::{StorageError, StorageResult};
pub use repos::{SqliteRuleStore, SqliteTransactionStore};
pub use schema::{FraudRuleRow, RuleEvaluationResultRow, TransactionRow};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Open a connection pool for the given SQLite URL
/// (e.g. `sqlite:data/fraudwatch.db?mode=rwc` or `sqlite::memory:`).
pub async fn create_pool(db_url: &str) -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(db_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Open a pool and create the schema if it does not exist yet.
pub async fn init_database(db_url: &str) -> StorageResult<SqlitePool> {
    let pool = create_pool(db_url).await?;
    schema::create_schema(&pool).await?;
    Ok(pool)
}
