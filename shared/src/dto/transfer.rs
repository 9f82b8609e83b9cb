use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::serde_helpers;

/// Direction of a transfer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    Income,
    Expense,
}

impl TransferType {
    /// Sign applied to the amount when computing a running balance
    pub fn sign(self) -> f64 {
        match self {
            TransferType::Income => 1.0,
            TransferType::Expense => -1.0,
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferType::Income => f.write_str("income"),
            TransferType::Expense => f.write_str("expense"),
        }
    }
}

impl std::str::FromStr for TransferType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransferType::Income),
            "expense" => Ok(TransferType::Expense),
            other => Err(format!("unknown transfer type: {}", other)),
        }
    }
}

/// A single income or expense entry against a money repo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub id: i64,
    #[serde(alias = "repoId")]
    pub money_repo_id: i64,
    /// Always positive; the direction is carried by `transfer_type`
    #[serde(deserialize_with = "serde_helpers::amount")]
    pub amount: f64,
    #[serde(rename = "type")]
    pub transfer_type: TransferType,
    #[serde(default)]
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

impl Transfer {
    /// Amount with the sign of its direction applied
    pub fn signed_amount(&self) -> f64 {
        self.amount * self.transfer_type.sign()
    }
}

/// Body of `POST /money-repos/{id}/transfers` and `PUT .../transfers/{tid}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub amount: String,
    #[serde(rename = "type")]
    pub transfer_type: TransferType,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}
