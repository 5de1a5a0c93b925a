//! Database schema
//!
//! Row types for sqlx mapping plus the bootstrap DDL. Decimals are kept
//! as TEXT so stored amounts round-trip with their exact scale.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};
use fraudwatch_core::{FraudRule, FraudRuleEvaluationResult, Transaction, TransactionStatus};

const CREATE_FRAUD_RULES: &str = r#"
CREATE TABLE IF NOT EXISTS fraud_rules (
    id              TEXT PRIMARY KEY,
    name            TEXT NOT NULL UNIQUE,
    description     TEXT NOT NULL,
    dsl_expression  TEXT NOT NULL,
    priority        INTEGER NOT NULL,
    enabled         INTEGER NOT NULL,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
)
"#;

const CREATE_TRANSACTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id          TEXT PRIMARY KEY,
    user_id     TEXT NOT NULL,
    amount      TEXT NOT NULL,
    currency    TEXT NOT NULL,
    status      TEXT NOT NULL,
    merchant_id TEXT,
    ip_address  TEXT,
    device_id   TEXT,
    timestamp   TEXT NOT NULL,
    is_fraud    INTEGER NOT NULL,
    created_at  TEXT NOT NULL
)
"#;

const CREATE_RULE_EVALUATION_RESULTS: &str = r#"
CREATE TABLE IF NOT EXISTS rule_evaluation_results (
    id             TEXT PRIMARY KEY,
    transaction_id TEXT NOT NULL,
    rule_id        TEXT NOT NULL,
    rule_name      TEXT NOT NULL,
    priority       INTEGER NOT NULL,
    matched        INTEGER NOT NULL,
    description    TEXT NOT NULL
)
"#;

/// Create all tables if they do not exist.
pub async fn create_schema(pool: &SqlitePool) -> StorageResult<()> {
    for ddl in [
        CREATE_FRAUD_RULES,
        CREATE_TRANSACTIONS,
        CREATE_RULE_EVALUATION_RESULTS,
    ] {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Row type for the `fraud_rules` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct FraudRuleRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub dsl_expression: String,
    pub priority: i32,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row type for the `transactions` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: String,
    pub user_id: String,
    pub amount: String, // Decimal stored as TEXT
    pub currency: String,
    pub status: String,
    pub merchant_id: Option<String>,
    pub ip_address: Option<String>,
    pub device_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub is_fraud: bool,
    pub created_at: DateTime<Utc>,
}

/// Row type for the `rule_evaluation_results` table
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct RuleEvaluationResultRow {
    pub id: String,
    pub transaction_id: String,
    pub rule_id: String,
    pub rule_name: String,
    pub priority: i32,
    pub matched: bool,
    pub description: String,
}

// === Conversion implementations ===

fn parse_uuid(column: &str, value: &str) -> StorageResult<Uuid> {
    Uuid::from_str(value).map_err(|_| StorageError::InvalidUuid {
        column: column.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(column: &str, value: &str) -> StorageResult<Decimal> {
    Decimal::from_str(value).map_err(|_| StorageError::InvalidDecimal {
        column: column.to_string(),
        value: value.to_string(),
    })
}

impl From<&FraudRule> for FraudRuleRow {
    fn from(rule: &FraudRule) -> Self {
        Self {
            id: rule.id.to_string(),
            name: rule.name.clone(),
            description: rule.description.clone(),
            dsl_expression: rule.dsl_expression.clone(),
            priority: rule.priority,
            enabled: rule.enabled,
            created_at: rule.created_at,
            updated_at: rule.updated_at,
        }
    }
}

impl TryFrom<FraudRuleRow> for FraudRule {
    type Error = StorageError;

    fn try_from(row: FraudRuleRow) -> StorageResult<Self> {
        Ok(FraudRule {
            id: parse_uuid("fraud_rules.id", &row.id)?,
            name: row.name,
            description: row.description,
            dsl_expression: row.dsl_expression,
            priority: row.priority,
            enabled: row.enabled,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.to_string(),
            user_id: tx.user_id.to_string(),
            amount: tx.amount.to_string(),
            currency: tx.currency.clone(),
            status: tx.status.as_str().to_string(),
            merchant_id: tx.merchant_id.clone(),
            ip_address: tx.ip_address.clone(),
            device_id: tx.device_id.clone(),
            timestamp: tx.timestamp,
            is_fraud: tx.is_fraud,
            created_at: tx.created_at,
        }
    }
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = StorageError;

    fn try_from(row: TransactionRow) -> StorageResult<Self> {
        let status = TransactionStatus::from_str(&row.status)
            .map_err(|_| StorageError::InvalidStatus(row.status.clone()))?;
        Ok(Transaction {
            id: parse_uuid("transactions.id", &row.id)?,
            user_id: parse_uuid("transactions.user_id", &row.user_id)?,
            amount: parse_decimal("transactions.amount", &row.amount)?,
            currency: row.currency,
            status,
            merchant_id: row.merchant_id,
            ip_address: row.ip_address,
            device_id: row.device_id,
            timestamp: row.timestamp,
            is_fraud: row.is_fraud,
            created_at: row.created_at,
        })
    }
}

impl From<&FraudRuleEvaluationResult> for RuleEvaluationResultRow {
    fn from(result: &FraudRuleEvaluationResult) -> Self {
        Self {
            id: result.id.to_string(),
            transaction_id: result.transaction_id.to_string(),
            rule_id: result.rule_id.to_string(),
            rule_name: result.rule_name.clone(),
            priority: result.priority,
            matched: result.matched,
            description: result.description.clone(),
        }
    }
}

impl TryFrom<RuleEvaluationResultRow> for FraudRuleEvaluationResult {
    type Error = StorageError;

    fn try_from(row: RuleEvaluationResultRow) -> StorageResult<Self> {
        Ok(FraudRuleEvaluationResult {
            id: parse_uuid("rule_evaluation_results.id", &row.id)?,
            transaction_id: parse_uuid("rule_evaluation_results.transaction_id", &row.transaction_id)?,
            rule_id: parse_uuid("rule_evaluation_results.rule_id", &row.rule_id)?,
            rule_name: row.rule_name,
            priority: row.priority,
            matched: row.matched,
            description: row.description,
        })
    }
}
