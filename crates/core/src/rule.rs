//! Fraud rules and their per-transaction audit records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An administrator-authored fraud rule.
///
/// `dsl_expression` always holds the canonical (normalized) form of the
/// rule text; it is produced by validation on create/update. Rules are
/// never physically deleted - `enabled` is flipped to false instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudRule {
    pub id: Uuid,

    /// Globally unique rule name
    pub name: String,
    pub description: String,
    /// Canonical DSL text
    pub dsl_expression: String,
    /// Lower priority evaluates first
    pub priority: i32,
    pub enabled: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FraudRule {
    /// Create a new rule from already-normalized DSL text.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        dsl_expression: impl Into<String>,
        priority: i32,
        enabled: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            dsl_expression: dsl_expression.into(),
            priority,
            enabled,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Audit record for one (transaction, rule) evaluation.
///
/// `rule_name` and `priority` are snapshotted at evaluation time so that
/// later edits to the rule do not rewrite historical audit trails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudRuleEvaluationResult {
    pub id: Uuid,
    pub transaction_id: Uuid,
    pub rule_id: Uuid,
    pub rule_name: String,
    pub priority: i32,
    pub matched: bool,
    pub description: String,
}
