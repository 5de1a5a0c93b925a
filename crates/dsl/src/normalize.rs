//! Normalizer - canonical textual form of an AST
//!
//! A pure pretty-printer: single spaces, upper-case connectives, string
//! literals re-wrapped in single quotes. Rule text is stored in this
//! form, so `normalize(parse(stored)) == stored` for every stored rule.

use crate::ast::Expr;

/// Render an expression in canonical form.
///
/// Idempotent by construction: re-parsing the output and normalizing
/// again yields the same string, and the re-parsed tree evaluates
/// identically to the original.
pub fn normalize(expr: &Expr) -> String {
    match expr {
        Expr::Comparison { field, op, value } => {
            format!("{} {} {}", field.as_str(), op.symbol(), value)
        }
        Expr::Logical { left, op, right } => {
            format!("{} {} {}", normalize(left), op.as_str(), normalize(right))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_canonical_input_is_fixed_point() {
        for source in [
            "amount > 100",
            "amount >= -100",
            "currency = 'RUB'",
            "amount > 100 AND currency = 'RUB'",
            "currency != 'RUB' OR merchantId != 'merchant_001'",
        ] {
            assert_eq!(normalize(&parse(source).unwrap()), source);
        }
    }

    #[test]
    fn test_whitespace_is_normalized() {
        assert_eq!(normalize(&parse("amount>100").unwrap()), "amount > 100");
        assert_eq!(
            normalize(&parse("amount   >\t100").unwrap()),
            "amount > 100"
        );
    }

    #[test]
    fn test_keyword_case_is_normalized() {
        assert_eq!(
            normalize(&parse("amount> 100 aNd currency ='RUB'").unwrap()),
            "amount > 100 AND currency = 'RUB'"
        );
    }

    #[test]
    fn test_decimal_scale_is_preserved() {
        assert_eq!(normalize(&parse("amount > 100.50").unwrap()), "amount > 100.50");
    }

    #[test]
    fn test_idempotence() {
        for source in [
            "amount>100",
            "amount > 1 and currency='USD' or deviceId != 'd1'",
            "amount >= 1000.00 AND amount <= 5000.00",
        ] {
            let once = normalize(&parse(source).unwrap());
            let twice = normalize(&parse(&once).unwrap());
            assert_eq!(once, twice);
        }
    }
}
