//! Engine errors

use thiserror::Error;

use crate::store::StoreError;
use fraudwatch_dsl::DslError;

/// Errors from engine services
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("fraud rule not found")]
    RuleNotFound,

    #[error("fraud rule name already exists: {name}")]
    RuleNameTaken { name: String },

    #[error("transaction timestamp is too far in the future")]
    TimestampInFuture,

    #[error(transparent)]
    Dsl(#[from] DslError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
