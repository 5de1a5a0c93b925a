//! Store trait implementations for SQLite

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::StorageError;
use crate::schema::{FraudRuleRow, RuleEvaluationResultRow, TransactionRow};
use fraudwatch_core::{FraudRule, FraudRuleEvaluationResult, Transaction};
use fraudwatch_engine::{RuleStore, StoreResult, TransactionStore};

/// `RuleStore` backed by the `fraud_rules` table
pub struct SqliteRuleStore {
    pool: SqlitePool,
}

impl SqliteRuleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RuleStore for SqliteRuleStore {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<FraudRule>> {
        let row = sqlx::query_as::<_, FraudRuleRow>("SELECT * FROM fraud_rules WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(FraudRule::try_from).transpose()?)
    }

    async fn get_by_name(&self, name: &str) -> StoreResult<Option<FraudRule>> {
        let row = sqlx::query_as::<_, FraudRuleRow>("SELECT * FROM fraud_rules WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(FraudRule::try_from).transpose()?)
    }

    async fn list(&self) -> StoreResult<Vec<FraudRule>> {
        let rows =
            sqlx::query_as::<_, FraudRuleRow>("SELECT * FROM fraud_rules ORDER BY priority ASC")
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(FraudRule::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn enabled_by_priority(&self) -> StoreResult<Vec<FraudRule>> {
        let rows = sqlx::query_as::<_, FraudRuleRow>(
            "SELECT * FROM fraud_rules WHERE enabled = 1 ORDER BY priority ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(FraudRule::try_from)
            .collect::<Result<_, _>>()?)
    }

    async fn insert(&self, rule: &FraudRule) -> StoreResult<()> {
        let row = FraudRuleRow::from(rule);
        sqlx::query(
            "INSERT INTO fraud_rules \
             (id, name, description, dsl_expression, priority, enabled, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.description)
        .bind(&row.dsl_expression)
        .bind(row.priority)
        .bind(row.enabled)
        .bind(row.created_at)
        .bind(row.updated_at)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(())
    }

    async fn update(&self, rule: &FraudRule) -> StoreResult<()> {
        let row = FraudRuleRow::from(rule);
        sqlx::query(
            "UPDATE fraud_rules SET name = ?, description = ?, dsl_expression = ?, \
             priority = ?, enabled = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&row.name)
        .bind(&row.description)
        .bind(&row.dsl_expression)
        .bind(row.priority)
        .bind(row.enabled)
        .bind(row.updated_at)
        .bind(&row.id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(())
    }
}

/// `TransactionStore` backed by the `transactions` and
/// `rule_evaluation_results` tables
pub struct SqliteTransactionStore {
    pool: SqlitePool,
}

impl SqliteTransactionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Audit records for one transaction, in insertion (priority) order.
    pub async fn results_for(
        &self,
        transaction_id: Uuid,
    ) -> StoreResult<Vec<FraudRuleEvaluationResult>> {
        let rows = sqlx::query_as::<_, RuleEvaluationResultRow>(
            "SELECT * FROM rule_evaluation_results WHERE transaction_id = ? ORDER BY priority ASC",
        )
        .bind(transaction_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(FraudRuleEvaluationResult::try_from)
            .collect::<Result<_, _>>()?)
    }
}

#[async_trait]
impl TransactionStore for SqliteTransactionStore {
    async fn insert(&self, transaction: &Transaction) -> StoreResult<()> {
        let row = TransactionRow::from(transaction);
        sqlx::query(
            "INSERT INTO transactions \
             (id, user_id, amount, currency, status, merchant_id, ip_address, device_id, \
              timestamp, is_fraud, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.user_id)
        .bind(&row.amount)
        .bind(&row.currency)
        .bind(&row.status)
        .bind(&row.merchant_id)
        .bind(&row.ip_address)
        .bind(&row.device_id)
        .bind(row.timestamp)
        .bind(row.is_fraud)
        .bind(row.created_at)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from)?;
        Ok(())
    }

    async fn insert_results(&self, results: &[FraudRuleEvaluationResult]) -> StoreResult<()> {
        for result in results {
            let row = RuleEvaluationResultRow::from(result);
            sqlx::query(
                "INSERT INTO rule_evaluation_results \
                 (id, transaction_id, rule_id, rule_name, priority, matched, description) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&row.id)
            .bind(&row.transaction_id)
            .bind(&row.rule_id)
            .bind(&row.rule_name)
            .bind(row.priority)
            .bind(row.matched)
            .bind(&row.description)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;
        }
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>("SELECT * FROM transactions WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;
        Ok(row.map(Transaction::try_from).transpose()?)
    }
}
