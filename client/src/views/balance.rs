//! # Balance Summary
//!
//! Derived figures shown next to the balance snapshot.

use shared::{format_currency, Balance};

/// Balance snapshot plus its change relative to the initial balance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceSummary {
    pub balance: Balance,
    pub change: f64,
    /// Rounded to two decimals
    pub change_percent: f64,
}

impl BalanceSummary {
    pub fn new(balance: Balance) -> Self {
        Self {
            balance,
            change: balance_change(&balance),
            change_percent: balance_change_percent(&balance),
        }
    }

    pub fn is_gain(&self) -> bool {
        self.change >= 0.0
    }

    /// One-line text rendering, e.g. `1.234,56 € (+234,56 €, +23.46%)`
    pub fn display(&self, currency: &str) -> String {
        let sign = if self.is_gain() { "+" } else { "-" };
        format!(
            "{} ({}{}, {}{:.2}%)",
            format_currency(self.balance.balance, currency),
            sign,
            format_currency(self.change.abs(), currency),
            if self.change_percent >= 0.0 { "+" } else { "" },
            self.change_percent
        )
    }
}

/// `balance - initial_balance`
pub fn balance_change(balance: &Balance) -> f64 {
    balance.balance - balance.initial_balance
}

/// Change relative to the initial balance, in percent.
///
/// - initial balance of zero: `100.00`
/// - negative initial balance turned positive: relative to `|initial|`
/// - otherwise: relative to `initial` (sign included)
pub fn balance_change_percent(balance: &Balance) -> f64 {
    let initial = balance.initial_balance;
    if initial == 0.0 {
        return 100.0;
    }

    let change = balance_change(balance);
    let percent = if initial < 0.0 && balance.balance > 0.0 {
        change / initial.abs() * 100.0
    } else {
        change / initial * 100.0
    };
    round2(percent)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(balance: f64, initial_balance: f64) -> Balance {
        Balance {
            balance,
            initial_balance,
            ..Balance::default()
        }
    }

    #[test]
    fn test_change() {
        assert_eq!(balance_change(&snapshot(150.0, 100.0)), 50.0);
        assert_eq!(balance_change(&snapshot(80.0, 100.0)), -20.0);
    }

    #[test]
    fn test_percent_zero_initial_is_hundred() {
        assert_eq!(balance_change_percent(&snapshot(0.0, 0.0)), 100.0);
        assert_eq!(balance_change_percent(&snapshot(-40.0, 0.0)), 100.0);
    }

    #[test]
    fn test_percent_positive_initial() {
        assert_eq!(balance_change_percent(&snapshot(150.0, 100.0)), 50.0);
        assert_eq!(balance_change_percent(&snapshot(2000.0, 3000.0)), -33.33);
    }

    #[test]
    fn test_percent_negative_initial() {
        // Recovered from debt: measured against the size of the debt
        assert_eq!(balance_change_percent(&snapshot(50.0, -100.0)), 150.0);
        // Still negative: plain ratio, sign flips
        assert_eq!(balance_change_percent(&snapshot(-50.0, -100.0)), -50.0);
    }

    #[test]
    fn test_summary_display() {
        let summary = BalanceSummary::new(snapshot(1234.56, 1000.0));

        assert!(summary.is_gain());
        assert_eq!(summary.display("EUR"), "1.234,56 € (+234,56 €, +23.46%)");
    }

    #[test]
    fn test_summary_display_loss() {
        let summary = BalanceSummary::new(snapshot(75.0, 100.0));

        assert!(!summary.is_gain());
        assert_eq!(summary.display("USD"), "75,00 $ (-25,00 $, -25.00%)");
    }
}
