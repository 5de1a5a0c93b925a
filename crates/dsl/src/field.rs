//! Field allow-list
//!
//! Rules may only reference this fixed set of transaction attributes.
//! Lookup is case-sensitive on the exact spelling (`merchantId`, not
//! `merchantid`).

/// Declared type of a field, deciding which operators and literal types
/// a comparison against it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Numeric,
    Text,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Numeric => "numeric",
            FieldType::Text => "text",
        }
    }
}

/// A transaction attribute addressable from rule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Amount,
    Currency,
    MerchantId,
    IpAddress,
    DeviceId,
}

impl Field {
    /// Resolve a field name from rule text. Case-sensitive.
    pub fn lookup(name: &str) -> Option<Field> {
        match name {
            "amount" => Some(Field::Amount),
            "currency" => Some(Field::Currency),
            "merchantId" => Some(Field::MerchantId),
            "ipAddress" => Some(Field::IpAddress),
            "deviceId" => Some(Field::DeviceId),
            _ => None,
        }
    }

    /// Canonical spelling as it appears in rule text
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Currency => "currency",
            Field::MerchantId => "merchantId",
            Field::IpAddress => "ipAddress",
            Field::DeviceId => "deviceId",
        }
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Field::Amount => FieldType::Numeric,
            Field::Currency | Field::MerchantId | Field::IpAddress | Field::DeviceId => {
                FieldType::Text
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Field::lookup("amount"), Some(Field::Amount));
        assert_eq!(Field::lookup("Amount"), None);
        assert_eq!(Field::lookup("merchantid"), None);
        assert_eq!(Field::lookup("merchantId"), Some(Field::MerchantId));
    }

    #[test]
    fn test_only_amount_is_numeric() {
        assert_eq!(Field::Amount.field_type(), FieldType::Numeric);
        for field in [
            Field::Currency,
            Field::MerchantId,
            Field::IpAddress,
            Field::DeviceId,
        ] {
            assert_eq!(field.field_type(), FieldType::Text);
        }
    }
}
