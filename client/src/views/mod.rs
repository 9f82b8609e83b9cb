//! # Views
//!
//! Pure computations over store data, ready for display.
//!
//! - **[`balance`]**: balance change and change percent
//! - **[`history`]**: running balance series for a chart or table

pub mod balance;
pub mod history;

pub use balance::{balance_change, balance_change_percent, BalanceSummary};
pub use history::{balance_history, selection_history, BalancePoint};
