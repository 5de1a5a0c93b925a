//! Rule-authoring validation
//!
//! Runs the pipeline up to normalization and reports the outcome as a
//! structured result: either the canonical expression text, or exactly
//! one error with a stable code. Nothing is recovered here - authoring
//! surfaces every failure verbatim, unlike the fail-open evaluation
//! path.

use serde::{Deserialize, Serialize};

use fraudwatch_dsl::{
    check_supported_fields, check_supported_syntax, normalize, tokenize, DslError, DslResult,
    Parser,
};

/// Structured view of one DSL error.
///
/// `position`/`near` are populated only for parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DslErrorInfo {
    pub code: String,
    pub message: String,
    pub position: Option<usize>,
    pub near: Option<String>,
}

/// Outcome of validating one rule expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DslValidation {
    pub is_valid: bool,
    pub normalized_expression: Option<String>,
    pub errors: Vec<DslErrorInfo>,
}

/// Stable error code for each error kind.
///
/// A pure mapping, threaded through whatever boundary needs it, rather
/// than a global registry keyed by error type.
pub fn error_code(err: &DslError) -> &'static str {
    match err {
        DslError::Parse { .. } => "DSL_PARSE_ERROR",
        DslError::InvalidField { .. } => "DSL_INVALID_FIELD",
        DslError::InvalidOperator { .. } => "DSL_INVALID_OPERATOR",
        DslError::UnsupportedLevel { .. } => "DSL_ERROR",
    }
}

/// Expand an error into its structured form.
pub fn error_info(err: &DslError) -> DslErrorInfo {
    let (position, near) = match err {
        DslError::Parse { position, near } => (Some(*position), Some(near.clone())),
        _ => (None, None),
    };
    DslErrorInfo {
        code: error_code(err).to_string(),
        message: err.to_string(),
        position,
        near,
    }
}

/// Level guard, tokenize, parse, normalize - the canonical text a valid
/// expression is stored as.
///
/// The level-5 `user.*` check runs after parsing: a malformed expression
/// that also mentions `user.age` reports its parse error, with position
/// and context, rather than the blanket level error.
pub fn normalize_expression(source: &str) -> DslResult<String> {
    check_supported_syntax(source)?;
    let tokens = tokenize(source)?;
    let ast = Parser::new(&tokens).parse()?;
    check_supported_fields(source)?;
    Ok(normalize(&ast))
}

/// Validate one rule expression for authoring.
pub fn validate_expression(source: &str) -> DslValidation {
    match normalize_expression(source) {
        Ok(normalized) => DslValidation {
            is_valid: true,
            normalized_expression: Some(normalized),
            errors: Vec::new(),
        },
        Err(err) => DslValidation {
            is_valid: false,
            normalized_expression: None,
            errors: vec![error_info(&err)],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_expression_is_normalized() {
        let result = validate_expression("amount>100");
        assert!(result.is_valid);
        assert_eq!(result.normalized_expression.as_deref(), Some("amount > 100"));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_mixed_case_and_spacing() {
        let result = validate_expression("amount> 100 aNd currency ='RUB'");
        assert_eq!(
            result.normalized_expression.as_deref(),
            Some("amount > 100 AND currency = 'RUB'")
        );
    }

    #[test]
    fn test_unknown_field_error_shape() {
        let result = validate_expression("AAAAAA > 100");
        assert!(!result.is_valid);
        assert_eq!(result.normalized_expression, None);
        assert_eq!(result.errors.len(), 1);

        let error = &result.errors[0];
        assert_eq!(error.code, "DSL_INVALID_FIELD");
        assert_eq!(error.position, None);
        assert_eq!(error.near, None);
    }

    #[test]
    fn test_parse_error_carries_position_and_near() {
        let result = validate_expression("amount > AND user.age < 21");
        assert_eq!(result.errors.len(), 1);

        let error = &result.errors[0];
        assert_eq!(error.code, "DSL_PARSE_ERROR");
        assert_eq!(error.position, Some(9));
        assert_eq!(error.near.as_deref(), Some("AND"));
    }

    #[test]
    fn test_operator_mismatch_codes() {
        for source in ["currency > 1", "amount < 'RUB'"] {
            let result = validate_expression(source);
            assert_eq!(result.errors.len(), 1, "source: {source}");
            assert_eq!(result.errors[0].code, "DSL_INVALID_OPERATOR");
        }
    }

    #[test]
    fn test_unsupported_level_is_reported() {
        let result = validate_expression("NOT amount > 100");
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, "DSL_ERROR");
        assert_eq!(result.errors[0].position, None);
    }

    #[test]
    fn test_unsupported_field_level_applies_to_well_formed_input() {
        // Parses cleanly, but the raw text mentions a user.* field.
        let result = validate_expression("merchantId = 'user.age'");
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, "DSL_ERROR");
        assert_eq!(result.normalized_expression, None);
    }

    #[test]
    fn test_validation_serializes_cleanly() {
        let json = serde_json::to_value(validate_expression("amount = 5")).unwrap();
        assert_eq!(json["is_valid"], true);
        assert_eq!(json["normalized_expression"], "amount = 5");
    }
}
