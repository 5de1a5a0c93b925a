//! Evaluator - walks an AST against an evaluation context
//!
//! `AND`/`OR` evaluate **both** children before combining. There is no
//! short-circuiting: an error on the right side of an `AND` whose left
//! side is already false still propagates. Callers depend on this, so
//! it must not be "optimized" into lazy evaluation.

use crate::ast::{CompareOp, Expr, Literal, LogicalOp};
use crate::context::{ContextValue, EvaluationContext};
use crate::error::{DslError, DslResult};

/// Evaluate an expression to a boolean.
pub fn evaluate(expr: &Expr, ctx: &EvaluationContext) -> DslResult<bool> {
    match expr {
        Expr::Logical { left, op, right } => {
            let left = evaluate(left, ctx)?;
            let right = evaluate(right, ctx)?;
            Ok(match op {
                LogicalOp::And => left && right,
                LogicalOp::Or => left || right,
            })
        }
        Expr::Comparison { field, op, value } => {
            // The parser already enforced the allow-list; the context
            // lookup is re-checked because optional attributes may be
            // absent from a particular transaction.
            let current = ctx.get(*field).ok_or_else(|| DslError::InvalidField {
                field: field.as_str().to_string(),
            })?;
            compare(current, *op, value)
        }
    }
}

/// Dispatch on the runtime pairing of context value and literal.
fn compare(current: &ContextValue, op: CompareOp, value: &Literal) -> DslResult<bool> {
    match (current, value) {
        (ContextValue::Text(actual), Literal::Str(expected)) => match op {
            CompareOp::Eq => Ok(actual == expected),
            CompareOp::Ne => Ok(actual != expected),
            _ => Err(invalid_operator(op, "text")),
        },
        (ContextValue::Number(actual), literal) => match literal.as_decimal() {
            Some(expected) => Ok(match op {
                CompareOp::Eq => *actual == expected,
                CompareOp::Ne => *actual != expected,
                CompareOp::Gt => *actual > expected,
                CompareOp::Ge => *actual >= expected,
                CompareOp::Lt => *actual < expected,
                CompareOp::Le => *actual <= expected,
            }),
            None => Err(invalid_operator(op, "numeric")),
        },
        (ContextValue::Text(_), _) => Err(invalid_operator(op, "text")),
    }
}

fn invalid_operator(op: CompareOp, field_type: &str) -> DslError {
    DslError::InvalidOperator {
        operator: op.symbol().to_string(),
        field_type: field_type.to_string(),
    }
}
