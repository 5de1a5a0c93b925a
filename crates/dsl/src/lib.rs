//! Fraudwatch DSL - the boolean rule-expression language
//!
//! Administrator fraud rules are written in a small DSL of field
//! comparisons chained with `AND`/`OR`:
//!
//! ```text
//! amount >= 1000 AND currency = 'RUB'
//! currency != 'RUB' OR merchantId != 'merchant_001'
//! ```
//!
//! The pipeline, leaf to root:
//!
//! 1. [`level::check_supported`] - textual pre-parse gate rejecting syntax
//!    outside the supported language level (negation, grouping, the
//!    extended `user.*` field set)
//! 2. [`lexer::tokenize`] - source text into an EOF-terminated token list
//! 3. [`parser::Parser`] - tokens into an immutable two-variant AST,
//!    validating fields, operators and literal types as it goes
//! 4. [`normalize::normalize`] - AST back into canonical source text
//! 5. [`eval::evaluate`] - AST against a per-transaction
//!    [`context::EvaluationContext`], producing a boolean
//!
//! Every step returns `Result<_, DslError>`; nothing panics on malformed
//! input. Evaluation walks the AST directly and is pure CPU work - no
//! I/O, no shared state.
//!
//! # Example
//!
//! ```
//! use fraudwatch_dsl::{evaluate, normalize, parse, EvaluationContext, Field};
//! use rust_decimal::Decimal;
//!
//! let ast = parse("amount>100 AND currency='RUB'").unwrap();
//! assert_eq!(normalize(&ast), "amount > 100 AND currency = 'RUB'");
//!
//! let ctx = EvaluationContext::new()
//!     .with_number(Field::Amount, Decimal::new(15000, 2))
//!     .with_text(Field::Currency, "RUB");
//! assert!(evaluate(&ast, &ctx).unwrap());
//! ```

pub mod ast;
pub mod context;
pub mod error;
pub mod eval;
pub mod field;
pub mod level;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod token;

pub use ast::{CompareOp, Expr, Literal, LogicalOp};
pub use context::{ContextValue, EvaluationContext};
pub use error::{DslError, DslResult};
pub use eval::evaluate;
pub use field::{Field, FieldType};
pub use level::{check_supported, check_supported_fields, check_supported_syntax};
pub use lexer::tokenize;
pub use normalize::normalize;
pub use parser::Parser;
pub use token::{Token, TokenKind};

/// Tokenize and parse in one step.
pub fn parse(source: &str) -> DslResult<Expr> {
    let tokens = tokenize(source)?;
    Parser::new(&tokens).parse()
}
