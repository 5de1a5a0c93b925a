//! Rule management services
//!
//! Create/update run the DSL pipeline and store only the canonical
//! (normalized) expression text. Rule names are globally unique.
//! "Deletion" is logical: the rule is disabled and the row retained,
//! so historical audit records keep a live foreign key.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use fraudwatch_core::FraudRule;

use crate::error::{EngineError, EngineResult};
use crate::store::RuleStore;
use crate::validate::normalize_expression;

/// Input for creating a rule
#[derive(Debug, Clone)]
pub struct NewRule {
    pub name: String,
    pub description: String,
    pub dsl_expression: String,
    pub priority: i32,
    pub enabled: bool,
}

/// Input for updating a rule
#[derive(Debug, Clone)]
pub struct UpdateRule {
    pub name: String,
    pub description: String,
    pub dsl_expression: String,
    pub priority: i32,
    pub enabled: bool,
}

/// Rule CRUD bound to a rule store.
pub struct RuleService<R> {
    store: Arc<R>,
}

impl<R: RuleStore> RuleService<R> {
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    pub async fn create(&self, form: NewRule) -> EngineResult<FraudRule> {
        if self.store.get_by_name(&form.name).await?.is_some() {
            return Err(EngineError::RuleNameTaken { name: form.name });
        }

        let normalized = normalize_expression(&form.dsl_expression)?;

        let rule = FraudRule::new(
            form.name,
            form.description,
            normalized,
            form.priority,
            form.enabled,
        );
        self.store.insert(&rule).await?;
        info!(rule = %rule.name, priority = rule.priority, "fraud rule created");

        Ok(rule)
    }

    pub async fn update(&self, id: Uuid, form: UpdateRule) -> EngineResult<FraudRule> {
        let mut rule = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(EngineError::RuleNotFound)?;

        if let Some(other) = self.store.get_by_name(&form.name).await? {
            if other.id != id {
                return Err(EngineError::RuleNameTaken { name: form.name });
            }
        }

        let normalized = normalize_expression(&form.dsl_expression)?;

        rule.name = form.name;
        rule.description = form.description;
        rule.dsl_expression = normalized;
        rule.priority = form.priority;
        rule.enabled = form.enabled;
        rule.updated_at = chrono::Utc::now();

        self.store.update(&rule).await?;
        info!(rule = %rule.name, "fraud rule updated");

        Ok(rule)
    }

    /// Logical delete: flip `enabled` off, keep the row.
    pub async fn disable(&self, id: Uuid) -> EngineResult<()> {
        let mut rule = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(EngineError::RuleNotFound)?;

        rule.enabled = false;
        self.store.update(&rule).await?;
        info!(rule = %rule.name, "fraud rule disabled");

        Ok(())
    }
}
