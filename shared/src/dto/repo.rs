use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// A money repository (account) owned by the current user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyRepo {
    pub id: i64,
    pub repo_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "serde_helpers::amount")]
    pub start_balance: f64,
    #[serde(deserialize_with = "serde_helpers::date")]
    pub start_balance_date: NaiveDate,
    /// ISO 4217 code, e.g. "EUR"
    pub currency: String,
}

/// Body of `POST /money-repos` and `PUT /money-repos/{id}`
///
/// `start_balance` is already in wire format (see [`crate::utils::format_amount`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoneyRepoRequest {
    pub repo_name: String,
    pub description: String,
    pub start_balance: String,
    pub start_balance_date: NaiveDate,
    pub currency: String,
}
