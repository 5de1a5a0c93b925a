//! Evaluation context - one transaction's attributes as typed values
//!
//! Built fresh per transaction and never shared or mutated across
//! evaluations. Optional transaction attributes that are absent simply
//! have no entry; a comparison against a missing field is an error the
//! engine's fail-open boundary turns into "not matched".

use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::field::Field;

/// A field's runtime value inside one evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Number(Decimal),
    Text(String),
}

/// Read-only field-to-value mapping for one transaction.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    values: HashMap<Field, ContextValue>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a numeric field
    pub fn with_number(mut self, field: Field, value: Decimal) -> Self {
        self.values.insert(field, ContextValue::Number(value));
        self
    }

    /// Bind a text field
    pub fn with_text(mut self, field: Field, value: impl Into<String>) -> Self {
        self.values.insert(field, ContextValue::Text(value.into()));
        self
    }

    pub fn get(&self, field: Field) -> Option<&ContextValue> {
        self.values.get(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bound_fields_are_visible() {
        let ctx = EvaluationContext::new()
            .with_number(Field::Amount, dec!(101.51))
            .with_text(Field::Currency, "RUB");

        assert_eq!(
            ctx.get(Field::Amount),
            Some(&ContextValue::Number(dec!(101.51)))
        );
        assert_eq!(
            ctx.get(Field::Currency),
            Some(&ContextValue::Text("RUB".into()))
        );
        assert_eq!(ctx.get(Field::DeviceId), None);
    }
}
