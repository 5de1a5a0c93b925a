//! Store traits - interfaces to the persistence backend
//!
//! The engine never talks to a database directly; it goes through these
//! traits so the backend stays swappable (SQLite in production, an
//! in-memory store in tests).

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use fraudwatch_core::{FraudRule, FraudRuleEvaluationResult, Transaction};

/// Errors surfaced by a storage backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence of fraud rules
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<FraudRule>>;

    async fn get_by_name(&self, name: &str) -> StoreResult<Option<FraudRule>>;

    /// All rules, regardless of enabled state
    async fn list(&self) -> StoreResult<Vec<FraudRule>>;

    /// Enabled rules ordered ascending by priority - the evaluation order
    async fn enabled_by_priority(&self) -> StoreResult<Vec<FraudRule>>;

    async fn insert(&self, rule: &FraudRule) -> StoreResult<()>;

    async fn update(&self, rule: &FraudRule) -> StoreResult<()>;
}

/// Persistence of transactions and their audit trails
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn insert(&self, transaction: &Transaction) -> StoreResult<()>;

    /// Batch write of one evaluation's audit records
    async fn insert_results(&self, results: &[FraudRuleEvaluationResult]) -> StoreResult<()>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Transaction>>;
}
