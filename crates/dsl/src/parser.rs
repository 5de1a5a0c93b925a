//! Parser - tokens into a validated AST
//!
//! Recursive descent with one token of lookahead and no backtracking.
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr       := and_expr (OR and_expr)*
//! and_expr   := comparison (AND comparison)*
//! comparison := FIELD COMPARE_OP (NUMBER | STRING)
//! ```
//!
//! Same-precedence chains fold left: `a AND b AND c` becomes
//! `Logical(Logical(a, AND, b), AND, c)`.
//!
//! `NOT` and parentheses are lexed but have no productions here; the
//! level guard rejects them before parsing, and one that slips through
//! fails the comparison shape check.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::ast::{CompareOp, Expr, Literal, LogicalOp};
use crate::error::{DslError, DslResult};
use crate::field::{Field, FieldType};
use crate::token::{Token, TokenKind};

/// Token-stream parser. Consumes the stream left to right; trailing
/// tokens after a complete expression are left unconsumed.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    /// The token list must be EOF-terminated, as produced by
    /// [`crate::lexer::tokenize`].
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(mut self) -> DslResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> DslResult<Expr> {
        let mut node = self.parse_and()?;

        while self.current().kind == TokenKind::Or {
            self.bump();
            let right = self.parse_and()?;
            node = Expr::logical(node, LogicalOp::Or, right);
        }

        Ok(node)
    }

    fn parse_and(&mut self) -> DslResult<Expr> {
        let mut node = self.parse_comparison()?;

        while self.current().kind == TokenKind::And {
            self.bump();
            let right = self.parse_comparison()?;
            node = Expr::logical(node, LogicalOp::And, right);
        }

        Ok(node)
    }

    /// `FIELD COMPARE_OP (NUMBER | STRING)`, validated in four steps:
    /// token shape, field allow-list, operator-by-field-type, and
    /// literal-type consistency.
    fn parse_comparison(&mut self) -> DslResult<Expr> {
        let left = self.bump().clone();
        let operator = self.bump().clone();
        let right = self.bump().clone();

        if left.kind != TokenKind::Field {
            return Err(parse_error(&left));
        }
        if operator.kind != TokenKind::CompareOp {
            return Err(parse_error(&operator));
        }
        if !matches!(right.kind, TokenKind::Number | TokenKind::Str) {
            return Err(parse_error(&right));
        }

        let field = Field::lookup(&left.text).ok_or_else(|| DslError::InvalidField {
            field: left.text.clone(),
        })?;

        let op = CompareOp::from_symbol(&operator.text)
            .ok_or_else(|| invalid_operator(&operator.text, field.field_type()))?;
        if field.field_type() == FieldType::Text && !op.is_equality() {
            return Err(invalid_operator(&operator.text, field.field_type()));
        }

        let value = parse_literal(&right)?;
        if field.field_type() == FieldType::Numeric && matches!(value, Literal::Str(_)) {
            return Err(invalid_operator(&operator.text, field.field_type()));
        }

        Ok(Expr::comparison(field, op, value))
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Advance one token; past the end, keeps returning the final EOF.
    fn bump(&mut self) -> &Token {
        let index = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[index]
    }
}

/// Number tokens without `.` become integers, with `.` decimals. The
/// lexer only emits well-formed digit runs, but an integer overflowing
/// i64 still fails here.
fn parse_literal(token: &Token) -> DslResult<Literal> {
    match token.kind {
        TokenKind::Number if token.text.contains('.') => Decimal::from_str(&token.text)
            .map(Literal::Decimal)
            .map_err(|_| parse_error(token)),
        TokenKind::Number => i64::from_str(&token.text)
            .map(Literal::Int)
            .map_err(|_| parse_error(token)),
        TokenKind::Str => Ok(Literal::Str(
            token.text.trim_matches('\'').to_string(),
        )),
        _ => Err(parse_error(token)),
    }
}

fn parse_error(token: &Token) -> DslError {
    DslError::Parse {
        position: token.offset,
        near: token.text.clone(),
    }
}

fn invalid_operator(operator: &str, field_type: FieldType) -> DslError {
    DslError::InvalidOperator {
        operator: operator.to_string(),
        field_type: field_type.as_str().to_string(),
    }
}
