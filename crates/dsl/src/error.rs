//! DSL errors
//!
//! One closed family for every failure the pipeline can produce. The
//! engine's per-rule fail-open boundary is the only place these are
//! swallowed; rule authoring surfaces them verbatim.

use thiserror::Error;

/// Errors from the DSL pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DslError {
    /// Lexical failure or malformed token sequence.
    ///
    /// `position` is the character offset of the offending input;
    /// `near` is a short snippet (the offending token text, or up to
    /// 10 characters of raw input) for diagnostics.
    #[error("failed to parse expression at offset {position} (near {near:?})")]
    Parse { position: usize, near: String },

    /// Reference to a field outside the allow-list, or a field missing
    /// from the evaluation context.
    #[error("unsupported field: {field}")]
    InvalidField { field: String },

    /// Operator not valid for the field's type, or a literal whose type
    /// does not match the field's declared type.
    #[error("operator {operator} is not applicable to {field_type} values")]
    InvalidOperator { operator: String, field_type: String },

    /// Syntax outside the currently supported language level.
    #[error("unsupported DSL level: {level}")]
    UnsupportedLevel { level: u8 },
}

/// Result type for DSL operations
pub type DslResult<T> = Result<T, DslError>;
