//! Abstract syntax tree
//!
//! A parsed rule is a strict, acyclic, left-associative binary tree with
//! comparisons at the leaves and `AND`/`OR` at the internal nodes. Trees
//! are built once by the parser and never mutated; re-parsing produces a
//! fresh tree.

use rust_decimal::Decimal;
use std::fmt;

use crate::field::Field;

/// One of the six comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    /// Resolve from the operator's surface syntax
    pub fn from_symbol(symbol: &str) -> Option<CompareOp> {
        match symbol {
            "=" => Some(CompareOp::Eq),
            "!=" => Some(CompareOp::Ne),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Ge),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Le),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }

    /// Whether this operator is defined for text values
    pub fn is_equality(&self) -> bool {
        matches!(self, CompareOp::Eq | CompareOp::Ne)
    }
}

/// Logical connective of an internal node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

/// Literal on the right-hand side of a comparison.
///
/// Number tokens without a fractional part become `Int`, with one they
/// become `Decimal`; string literals arrive with their quotes already
/// stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Int(i64),
    Decimal(Decimal),
    Str(String),
}

impl Literal {
    /// Numeric view of the literal, if it has one
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Literal::Int(i) => Some(Decimal::from(*i)),
            Literal::Decimal(d) => Some(*d),
            Literal::Str(_) => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(i) => write!(f, "{i}"),
            Literal::Decimal(d) => write!(f, "{d}"),
            Literal::Str(s) => write!(f, "'{s}'"),
        }
    }
}

/// A rule expression.
///
/// Exactly two variants: `Comparison` is always a leaf, `Logical` is
/// always internal. The type is closed, so the evaluator matches
/// exhaustively with no unreachable-node escape hatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Comparison {
        field: Field,
        op: CompareOp,
        value: Literal,
    },
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn comparison(field: Field, op: CompareOp, value: Literal) -> Expr {
        Expr::Comparison { field, op, value }
    }

    pub fn logical(left: Expr, op: LogicalOp, right: Expr) -> Expr {
        Expr::Logical {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}
