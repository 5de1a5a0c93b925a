//! Rule evaluation orchestrator
//!
//! Runs every enabled rule, in ascending priority order, against one
//! transaction. Each rule's stored text goes through the full pipeline
//! again (level guard, tokenize, parse, evaluate) - rules are re-checked
//! at evaluation time, not trusted from storage.
//!
//! Per-rule failures are **fail-open**: a rule whose text fails any
//! pipeline stage contributes `matched = false` instead of aborting the
//! transaction decision. One broken rule must never block fraud
//! decisions for the rest.

use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use fraudwatch_core::{FraudRule, FraudRuleEvaluationResult, Transaction, TransactionStatus};
use fraudwatch_dsl::{check_supported, evaluate, tokenize, DslResult, EvaluationContext, Parser};

use crate::context::build_context;
use crate::error::EngineResult;
use crate::store::RuleStore;

/// Aggregate decision for one transaction plus its ordered audit trail
#[derive(Debug, Clone)]
pub struct RuleEvaluationOutcome {
    pub status: TransactionStatus,
    pub is_fraud: bool,
    /// One record per enabled rule, in evaluation (priority) order
    pub rule_results: Vec<FraudRuleEvaluationResult>,
}

/// Orchestrator bound to a rule store.
pub struct RuleEvaluator<R> {
    rules: Arc<R>,
}

impl<R: RuleStore> RuleEvaluator<R> {
    pub fn new(rules: Arc<R>) -> Self {
        Self { rules }
    }

    /// Fetch the enabled rules and sweep them over one transaction.
    pub async fn evaluate(&self, transaction: &Transaction) -> EngineResult<RuleEvaluationOutcome> {
        let rules = self.rules.enabled_by_priority().await?;
        Ok(evaluate_rules(&rules, transaction))
    }
}

/// Pure sweep over an already-ordered rule list.
///
/// The result list mirrors the input order exactly; rule name and
/// priority are snapshotted into each audit record.
pub fn evaluate_rules(rules: &[FraudRule], transaction: &Transaction) -> RuleEvaluationOutcome {
    let ctx = build_context(transaction);
    let mut rule_results = Vec::with_capacity(rules.len());
    let mut is_fraud = false;

    for rule in rules {
        let matched = match apply_rule(&rule.dsl_expression, &ctx) {
            Ok(matched) => matched,
            Err(err) => {
                warn!(rule = %rule.name, error = %err, "rule failed to evaluate, treated as not matched");
                false
            }
        };

        if matched {
            is_fraud = true;
        }

        let description = format!(
            "Rule \"{}\" {}",
            rule.dsl_expression,
            if matched { "matched" } else { "did not match" }
        );

        rule_results.push(FraudRuleEvaluationResult {
            id: Uuid::new_v4(),
            transaction_id: transaction.id,
            rule_id: rule.id,
            rule_name: rule.name.clone(),
            priority: rule.priority,
            matched,
            description,
        });
    }

    let status = if is_fraud {
        TransactionStatus::Declined
    } else {
        TransactionStatus::Approved
    };

    RuleEvaluationOutcome {
        status,
        is_fraud,
        rule_results,
    }
}

/// One rule through the full pipeline against a prebuilt context.
fn apply_rule(expression: &str, ctx: &EvaluationContext) -> DslResult<bool> {
    check_supported(expression)?;
    let tokens = tokenize(expression)?;
    let ast = Parser::new(&tokens).parse()?;
    evaluate(&ast, ctx)
}
