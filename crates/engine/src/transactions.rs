//! Transaction intake
//!
//! Rounds the amount, sanity-checks the timestamp, runs the rule sweep,
//! stamps the decision onto the transaction, then persists transaction
//! and audit trail and returns the decision DTOs.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use fraudwatch_core::Transaction;

use crate::error::{EngineError, EngineResult};
use crate::evaluator::evaluate_rules;
use crate::store::{RuleStore, TransactionStore};

/// Tolerance for client clock skew on the business timestamp
const MAX_FUTURE_SKEW_MINUTES: i64 = 5;

/// Attributes of an incoming transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    pub user_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub merchant_id: Option<String>,
    pub ip_address: Option<String>,
    pub device_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Per-rule slice of the decision, as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResultDto {
    pub rule_id: Uuid,
    pub rule_name: String,
    pub priority: i32,
    pub matched: bool,
    pub description: String,
}

/// Full decision for one transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDecision {
    pub transaction: Transaction,
    pub rule_results: Vec<RuleResultDto>,
}

/// Transaction intake bound to the rule and transaction stores.
pub struct TransactionService<R, T> {
    rules: Arc<R>,
    transactions: Arc<T>,
}

impl<R: RuleStore, T: TransactionStore> TransactionService<R, T> {
    pub fn new(rules: Arc<R>, transactions: Arc<T>) -> Self {
        Self {
            rules,
            transactions,
        }
    }

    pub async fn create(&self, form: TransactionForm) -> EngineResult<TransactionDecision> {
        if form.timestamp > Utc::now() + Duration::minutes(MAX_FUTURE_SKEW_MINUTES) {
            return Err(EngineError::TimestampInFuture);
        }

        let amount = form
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        let mut transaction = Transaction::new(form.user_id, amount, form.currency)
            .with_timestamp(form.timestamp);
        if let Some(merchant_id) = form.merchant_id {
            transaction = transaction.with_merchant_id(merchant_id);
        }
        if let Some(ip_address) = form.ip_address {
            transaction = transaction.with_ip_address(ip_address);
        }
        if let Some(device_id) = form.device_id {
            transaction = transaction.with_device_id(device_id);
        }

        let rules = self.rules.enabled_by_priority().await?;
        let outcome = evaluate_rules(&rules, &transaction);

        transaction.is_fraud = outcome.is_fraud;
        transaction.status = outcome.status;

        self.transactions.insert(&transaction).await?;
        self.transactions
            .insert_results(&outcome.rule_results)
            .await?;

        info!(
            transaction = %transaction.id,
            status = %transaction.status,
            rules = outcome.rule_results.len(),
            "transaction evaluated"
        );

        let rule_results = outcome
            .rule_results
            .iter()
            .map(|r| RuleResultDto {
                rule_id: r.rule_id,
                rule_name: r.rule_name.clone(),
                priority: r.priority,
                matched: r.matched,
                description: r.description.clone(),
            })
            .collect();

        Ok(TransactionDecision {
            transaction,
            rule_results,
        })
    }
}
