//! Command handlers

use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

use fraudwatch_engine::{
    validate_expression, NewRule, RuleService, RuleStore, TransactionForm, TransactionService,
};
use fraudwatch_store::{init_database, SqliteRuleStore, SqliteTransactionStore};

async fn open(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create data directory")?;
    }
    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    let pool = init_database(&db_url)
        .await
        .context("failed to open database")?;
    Ok(pool)
}

pub async fn init(db_path: &Path) -> Result<()> {
    let pool = open(db_path).await?;
    pool.close().await;
    println!("✅ Database initialized at {}", db_path.display());
    Ok(())
}

pub async fn rule_add(
    db_path: &Path,
    name: String,
    expression: String,
    priority: i32,
    description: String,
    enabled: bool,
) -> Result<()> {
    let pool = open(db_path).await?;
    let service = RuleService::new(Arc::new(SqliteRuleStore::new(pool)));

    let rule = service
        .create(NewRule {
            name,
            description,
            dsl_expression: expression,
            priority,
            enabled,
        })
        .await?;

    println!("✅ Rule created");
    println!("   id:         {}", rule.id);
    println!("   name:       {}", rule.name);
    println!("   expression: {}", rule.dsl_expression);
    println!("   priority:   {}", rule.priority);
    Ok(())
}

pub async fn rule_list(db_path: &Path) -> Result<()> {
    let pool = open(db_path).await?;
    let store = SqliteRuleStore::new(pool);

    let rules = store.list().await?;
    if rules.is_empty() {
        println!("No rules defined");
        return Ok(());
    }

    for rule in rules {
        let marker = if rule.enabled { "●" } else { "○" };
        println!(
            "{} [{}] {} (priority {}): {}",
            marker, rule.id, rule.name, rule.priority, rule.dsl_expression
        );
    }
    Ok(())
}

pub async fn rule_disable(db_path: &Path, id: Uuid) -> Result<()> {
    let pool = open(db_path).await?;
    let service = RuleService::new(Arc::new(SqliteRuleStore::new(pool)));

    service.disable(id).await?;
    println!("✅ Rule {} disabled", id);
    Ok(())
}

pub fn rule_validate(expression: &str) -> Result<()> {
    let validation = validate_expression(expression);
    println!("{}", serde_json::to_string_pretty(&validation)?);
    Ok(())
}

pub async fn evaluate(
    db_path: &Path,
    amount: Decimal,
    currency: String,
    merchant_id: Option<String>,
    ip_address: Option<String>,
    device_id: Option<String>,
    user_id: Uuid,
) -> Result<()> {
    let pool = open(db_path).await?;
    let rules = Arc::new(SqliteRuleStore::new(pool.clone()));
    let transactions = Arc::new(SqliteTransactionStore::new(pool));
    let service = TransactionService::new(rules, transactions);

    let decision = service
        .create(TransactionForm {
            user_id,
            amount,
            currency,
            merchant_id,
            ip_address,
            device_id,
            timestamp: Utc::now(),
        })
        .await?;

    let marker = if decision.transaction.is_fraud { "🚫" } else { "✅" };
    println!(
        "{} Transaction {}: {}",
        marker, decision.transaction.id, decision.transaction.status
    );
    println!("{}", serde_json::to_string_pretty(&decision.rule_results)?);
    Ok(())
}
