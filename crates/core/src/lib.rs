//! Fraudwatch Core - Domain types
//!
//! This crate contains the fundamental types used across Fraudwatch:
//! - `Transaction`: an incoming financial transaction with its fraud decision
//! - `FraudRule`: an administrator-authored rule holding canonical DSL text
//! - `FraudRuleEvaluationResult`: one immutable audit record per (transaction, rule)
//! - `TransactionStatus`: the APPROVED/DECLINED decision

pub mod rule;
pub mod status;
pub mod transaction;

pub use rule::{FraudRule, FraudRuleEvaluationResult};
pub use status::TransactionStatus;
pub use transaction::Transaction;
