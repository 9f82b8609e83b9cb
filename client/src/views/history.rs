//! # Balance History
//!
//! Day-by-day running balance series built from an opening balance and a
//! transfer list. Income adds to the balance, expense subtracts.
//!
//! One point is emitted per day with activity, carrying the balance at the
//! end of that day. The opening point (start date, opening balance) leads
//! the series when it falls before the first transfer day.

use chrono::NaiveDate;
use shared::Transfer;

use crate::state::repos::RepoStore;

/// End-of-day balance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: f64,
}

impl BalancePoint {
    /// `dd.mm.yyyy`
    pub fn label(&self) -> String {
        self.date.format("%d.%m.%Y").to_string()
    }
}

/// Build the running series.
///
/// Transfers need not be sorted. Days are taken from the UTC timestamp.
pub fn balance_history(opening: f64, start: Option<NaiveDate>, transfers: &[Transfer]) -> Vec<BalancePoint> {
    let mut ordered: Vec<&Transfer> = transfers.iter().collect();
    ordered.sort_by_key(|t| t.timestamp);

    let mut points = Vec::with_capacity(ordered.len() + 1);
    if let Some(start) = start {
        let first_day = ordered.first().map(|t| t.timestamp.date_naive());
        if first_day.map_or(true, |day| start < day) {
            points.push(BalancePoint {
                date: start,
                balance: opening,
            });
        }
    }

    let mut running = opening;
    for transfer in ordered {
        running += transfer.signed_amount();
        let date = transfer.timestamp.date_naive();
        match points.last_mut() {
            Some(last) if last.date == date => last.balance = running,
            _ => points.push(BalancePoint {
                date,
                balance: running,
            }),
        }
    }

    points
}

/// History of the current selection.
///
/// A single account opens at its start balance and start date. All accounts
/// together open at the combined initial balance and the earliest start date.
pub fn selection_history(store: &RepoStore) -> Vec<BalancePoint> {
    let state = store.snapshot();
    let (opening, start) = match store.selected_repo() {
        Some(repo) => (repo.start_balance, Some(repo.start_balance_date)),
        None => (
            state.balance.initial_balance,
            state.repos.iter().map(|r| r.start_balance_date).min(),
        ),
    };
    balance_history(opening, start, &state.transfers)
}
