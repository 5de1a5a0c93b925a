//! Fraudwatch Engine - applies the rule DSL to transactions
//!
//! Sits between the pure DSL pipeline and the storage backends:
//!
//! - [`store`] - async traits the persistence layer implements
//! - [`validate`] - rule-authoring validation with structured error info
//! - [`evaluator`] - the per-transaction rule sweep (fail-open per rule)
//! - [`rules`] - create/update/disable services for fraud rules
//! - [`transactions`] - transaction intake: evaluate, decide, persist
//!
//! The sweep itself is synchronous CPU work; the only suspension points
//! are the rule fetch before it and the batch write after it.

pub mod context;
pub mod error;
pub mod evaluator;
pub mod rules;
pub mod store;
pub mod transactions;
pub mod validate;

pub use context::build_context;
pub use error::{EngineError, EngineResult};
pub use evaluator::{evaluate_rules, RuleEvaluationOutcome, RuleEvaluator};
pub use rules::{NewRule, RuleService, UpdateRule};
pub use store::{RuleStore, StoreError, StoreResult, TransactionStore};
pub use transactions::{RuleResultDto, TransactionDecision, TransactionForm, TransactionService};
pub use validate::{normalize_expression, validate_expression, DslErrorInfo, DslValidation};
