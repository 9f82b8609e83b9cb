use serde::{Deserialize, Serialize};

use super::serde_helpers;

/// Server-computed balance aggregate for one repo or for all repos
///
/// The default value (all zeros) stands in for a missing snapshot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(default, deserialize_with = "serde_helpers::amount")]
    pub total_income: f64,
    #[serde(default, deserialize_with = "serde_helpers::amount")]
    pub total_expenses: f64,
    #[serde(default, deserialize_with = "serde_helpers::amount")]
    pub balance: f64,
    #[serde(default, deserialize_with = "serde_helpers::amount")]
    pub initial_balance: f64,
}
