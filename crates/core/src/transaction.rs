//! Transaction - an incoming financial transaction
//!
//! The evaluator only ever sees a transaction through a read-only
//! attribute view; the entity itself carries the final fraud decision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::TransactionStatus;

/// One financial transaction.
///
/// `amount` and `currency` are always present; the merchant/ip/device
/// attributes are optional and simply absent from the evaluation context
/// when not supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,

    /// Amount scaled to 2 decimal places at intake
    pub amount: Decimal,
    /// 3-letter currency code
    pub currency: String,
    pub status: TransactionStatus,
    pub merchant_id: Option<String>,
    pub ip_address: Option<String>,
    pub device_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub is_fraud: bool,

    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a transaction with the mandatory attributes.
    ///
    /// Starts out `Approved` and not fraudulent; the rule evaluation
    /// outcome overwrites both before the transaction is persisted.
    pub fn new(user_id: Uuid, amount: Decimal, currency: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            amount,
            currency: currency.into(),
            status: TransactionStatus::Approved,
            merchant_id: None,
            ip_address: None,
            device_id: None,
            timestamp: now,
            is_fraud: false,
            created_at: now,
        }
    }

    /// Set the merchant id
    pub fn with_merchant_id(mut self, merchant_id: impl Into<String>) -> Self {
        self.merchant_id = Some(merchant_id.into());
        self
    }

    /// Set the originating IP address
    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    /// Set the device id
    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Set the business timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_transaction_defaults() {
        let tx = Transaction::new(Uuid::new_v4(), dec!(101.51), "RUB");
        assert_eq!(tx.status, TransactionStatus::Approved);
        assert!(!tx.is_fraud);
        assert!(tx.merchant_id.is_none());
        assert!(tx.device_id.is_none());
    }

    #[test]
    fn test_builder_attributes() {
        let tx = Transaction::new(Uuid::new_v4(), dec!(50), "USD")
            .with_merchant_id("merchant_001")
            .with_ip_address("10.0.0.1")
            .with_device_id("dev-42");
        assert_eq!(tx.merchant_id.as_deref(), Some("merchant_001"));
        assert_eq!(tx.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(tx.device_id.as_deref(), Some("dev-42"));
    }
}
