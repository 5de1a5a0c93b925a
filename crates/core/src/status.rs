//! Transaction status - the fraud decision attached to a transaction

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when parsing an unknown status string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown transaction status: {0}")]
pub struct ParseStatusError(String);

/// Decision attached to a transaction after rule evaluation.
///
/// A transaction starts out `Approved` and is flipped to `Declined`
/// when any enabled fraud rule matches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Approved,
    Declined,
}

impl TransactionStatus {
    /// Canonical wire/storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Approved => "APPROVED",
            TransactionStatus::Declined => "DECLINED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVED" => Ok(TransactionStatus::Approved),
            "DECLINED" => Ok(TransactionStatus::Declined),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [TransactionStatus::Approved, TransactionStatus::Declined] {
            let parsed: TransactionStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_unknown_rejected() {
        assert!("PENDING".parse::<TransactionStatus>().is_err());
    }

    #[test]
    fn test_status_serde_uppercase() {
        let json = serde_json::to_string(&TransactionStatus::Declined).unwrap();
        assert_eq!(json, "\"DECLINED\"");
    }
}
