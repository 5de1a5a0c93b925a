//! Integration tests for the rule evaluation and rule management flow
//!
//! Exercises the engine services end to end against in-memory stores:
//! priority ordering, the fail-open policy, and the authoring pipeline
//! that stores canonical rule text.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal_macros::dec;
use uuid::Uuid;

use fraudwatch_core::{FraudRule, FraudRuleEvaluationResult, Transaction, TransactionStatus};
use fraudwatch_engine::{
    EngineError, NewRule, RuleEvaluator, RuleService, RuleStore, StoreResult, TransactionForm,
    TransactionService, TransactionStore, UpdateRule,
};

#[derive(Default)]
struct InMemoryRuleStore {
    rules: Mutex<Vec<FraudRule>>,
}

#[async_trait]
impl RuleStore for InMemoryRuleStore {
    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<FraudRule>> {
        Ok(self.rules.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> StoreResult<Option<FraudRule>> {
        Ok(self
            .rules
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn list(&self) -> StoreResult<Vec<FraudRule>> {
        Ok(self.rules.lock().unwrap().clone())
    }

    async fn enabled_by_priority(&self) -> StoreResult<Vec<FraudRule>> {
        let mut rules: Vec<FraudRule> = self
            .rules
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.enabled)
            .cloned()
            .collect();
        rules.sort_by_key(|r| r.priority);
        Ok(rules)
    }

    async fn insert(&self, rule: &FraudRule) -> StoreResult<()> {
        self.rules.lock().unwrap().push(rule.clone());
        Ok(())
    }

    async fn update(&self, rule: &FraudRule) -> StoreResult<()> {
        let mut rules = self.rules.lock().unwrap();
        if let Some(existing) = rules.iter_mut().find(|r| r.id == rule.id) {
            *existing = rule.clone();
        }
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryTransactionStore {
    transactions: Mutex<Vec<Transaction>>,
    results: Mutex<Vec<FraudRuleEvaluationResult>>,
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, transaction: &Transaction) -> StoreResult<()> {
        self.transactions.lock().unwrap().push(transaction.clone());
        Ok(())
    }

    async fn insert_results(&self, results: &[FraudRuleEvaluationResult]) -> StoreResult<()> {
        self.results.lock().unwrap().extend_from_slice(results);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Option<Transaction>> {
        Ok(self
            .transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }
}

async fn seed_rule(store: &InMemoryRuleStore, name: &str, expression: &str, priority: i32, enabled: bool) {
    store
        .insert(&FraudRule::new(name, "", expression, priority, enabled))
        .await
        .unwrap();
}

fn form(amount: rust_decimal::Decimal) -> TransactionForm {
    TransactionForm {
        user_id: Uuid::new_v4(),
        amount,
        currency: "RUB".to_string(),
        merchant_id: Some("merchant_001".to_string()),
        ip_address: None,
        device_id: None,
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn test_single_rule_declines_transaction() {
    let rules = Arc::new(InMemoryRuleStore::default());
    seed_rule(&rules, "low-floor", "amount >= -100", 1, true).await;

    let evaluator = RuleEvaluator::new(rules);
    let tx = Transaction::new(Uuid::new_v4(), dec!(101.51), "RUB");
    let outcome = evaluator.evaluate(&tx).await.unwrap();

    assert!(outcome.is_fraud);
    assert_eq!(outcome.status, TransactionStatus::Declined);
    assert_eq!(outcome.rule_results.len(), 1);
    assert!(outcome.rule_results[0].matched);
}

#[tokio::test]
async fn test_disabled_rules_are_excluded_and_order_is_by_priority() {
    let rules = Arc::new(InMemoryRuleStore::default());
    // Seeded out of priority order on purpose.
    seed_rule(&rules, "second", "currency != 'RUB' OR merchantId != 'merchant_001'", 2, true).await;
    seed_rule(&rules, "disabled", "amount > 0", 3, false).await;
    seed_rule(&rules, "first", "amount >= 1000", 1, true).await;

    let evaluator = RuleEvaluator::new(rules);
    let tx = Transaction::new(Uuid::new_v4(), dec!(101.51), "RUB")
        .with_merchant_id("merchant_001");
    let outcome = evaluator.evaluate(&tx).await.unwrap();

    let names: Vec<&str> = outcome
        .rule_results
        .iter()
        .map(|r| r.rule_name.as_str())
        .collect();
    assert_eq!(names, vec!["first", "second"]);
    assert!(!outcome.is_fraud);
    assert_eq!(outcome.status, TransactionStatus::Approved);
}

#[tokio::test]
async fn test_broken_stored_rule_falls_open() {
    let rules = Arc::new(InMemoryRuleStore::default());
    seed_rule(&rules, "broken", "amount > AND user.age < 21", 1, true).await;
    seed_rule(&rules, "grouped", "(amount > 1)", 2, true).await;

    let evaluator = RuleEvaluator::new(rules);
    let tx = Transaction::new(Uuid::new_v4(), dec!(500), "RUB");
    let outcome = evaluator.evaluate(&tx).await.unwrap();

    assert_eq!(outcome.rule_results.len(), 2);
    assert!(outcome.rule_results.iter().all(|r| !r.matched));
    assert_eq!(outcome.status, TransactionStatus::Approved);
}

#[tokio::test]
async fn test_transaction_service_persists_decision_and_audit_trail() {
    let rules = Arc::new(InMemoryRuleStore::default());
    seed_rule(&rules, "low-floor", "amount >= -100", 1, true).await;

    let transactions = Arc::new(InMemoryTransactionStore::default());
    let service = TransactionService::new(rules, Arc::clone(&transactions));

    let decision = service.create(form(dec!(101.51))).await.unwrap();

    assert!(decision.transaction.is_fraud);
    assert_eq!(decision.transaction.status, TransactionStatus::Declined);
    assert_eq!(decision.rule_results.len(), 1);
    assert!(decision.rule_results[0].matched);

    let stored_tx = transactions
        .get_by_id(decision.transaction.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored_tx.status, TransactionStatus::Declined);
    assert_eq!(transactions.results.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_transaction_amount_is_rounded_half_up() {
    let rules = Arc::new(InMemoryRuleStore::default());
    let transactions = Arc::new(InMemoryTransactionStore::default());
    let service = TransactionService::new(rules, transactions);

    let decision = service.create(form(dec!(10.005))).await.unwrap();
    assert_eq!(decision.transaction.amount, dec!(10.01));
}

#[tokio::test]
async fn test_far_future_timestamp_is_rejected() {
    let rules = Arc::new(InMemoryRuleStore::default());
    let transactions = Arc::new(InMemoryTransactionStore::default());
    let service = TransactionService::new(rules, transactions);

    let mut bad = form(dec!(10));
    bad.timestamp = Utc::now() + chrono::Duration::hours(1);

    assert!(matches!(
        service.create(bad).await.unwrap_err(),
        EngineError::TimestampInFuture
    ));
}

#[tokio::test]
async fn test_rule_service_stores_normalized_text() {
    let store = Arc::new(InMemoryRuleStore::default());
    let service = RuleService::new(Arc::clone(&store));

    let rule = service
        .create(NewRule {
            name: "large-rub".to_string(),
            description: "large RUB transactions".to_string(),
            dsl_expression: "amount>=1000 and currency='RUB'".to_string(),
            priority: 1,
            enabled: true,
        })
        .await
        .unwrap();

    assert_eq!(rule.dsl_expression, "amount >= 1000 AND currency = 'RUB'");
    assert_eq!(
        store.get_by_name("large-rub").await.unwrap().unwrap().dsl_expression,
        "amount >= 1000 AND currency = 'RUB'"
    );
}

#[tokio::test]
async fn test_rule_service_rejects_duplicate_names() {
    let store = Arc::new(InMemoryRuleStore::default());
    let service = RuleService::new(Arc::clone(&store));

    let new_rule = NewRule {
        name: "dup".to_string(),
        description: String::new(),
        dsl_expression: "amount > 1".to_string(),
        priority: 1,
        enabled: true,
    };
    service.create(new_rule.clone()).await.unwrap();

    assert!(matches!(
        service.create(new_rule).await.unwrap_err(),
        EngineError::RuleNameTaken { .. }
    ));
}

#[tokio::test]
async fn test_rule_service_rejects_invalid_expression() {
    let store = Arc::new(InMemoryRuleStore::default());
    let service = RuleService::new(store);

    let result = service
        .create(NewRule {
            name: "bad".to_string(),
            description: String::new(),
            dsl_expression: "AAAAAA > 100".to_string(),
            priority: 1,
            enabled: true,
        })
        .await;

    assert!(matches!(result.unwrap_err(), EngineError::Dsl(_)));
}

#[tokio::test]
async fn test_rule_update_renormalizes_and_disable_is_logical() {
    let store = Arc::new(InMemoryRuleStore::default());
    let service = RuleService::new(Arc::clone(&store));

    let rule = service
        .create(NewRule {
            name: "floor".to_string(),
            description: String::new(),
            dsl_expression: "amount > 1".to_string(),
            priority: 1,
            enabled: true,
        })
        .await
        .unwrap();

    let updated = service
        .update(
            rule.id,
            UpdateRule {
                name: "floor".to_string(),
                description: "raised floor".to_string(),
                dsl_expression: "amount>100".to_string(),
                priority: 2,
                enabled: true,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.dsl_expression, "amount > 100");
    assert_eq!(updated.priority, 2);

    service.disable(rule.id).await.unwrap();
    let stored = store.get_by_id(rule.id).await.unwrap().unwrap();
    assert!(!stored.enabled);
    // Row retained, only the flag flipped.
    assert_eq!(store.list().await.unwrap().len(), 1);
}
