//! # Transfer Form
//!
//! Create or edit a transfer. The date field is day-precision; a new
//! transfer is timestamped at midnight UTC of that day, and an edited one
//! keeps its original time of day.

use chrono::{DateTime, NaiveDate, Utc};
use shared::{format_amount, Transfer, TransferRequest, TransferType};
use tracing::warn;

use super::validation::{parse_amount, parse_date, validate_min_value, validate_required};
use super::{FieldErrors, FormMode, FormStatus};
use crate::core::error::{AppError, Result};
use crate::state::repos::RepoStore;

const MIN_AMOUNT: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct TransferForm {
    pub mode: FormMode,
    pub repo_id: Option<i64>,
    pub amount: String,
    pub transfer_type: TransferType,
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub is_open: bool,
    pub status: FormStatus,
    original_timestamp: Option<DateTime<Utc>>,
}

impl Default for TransferForm {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            repo_id: None,
            amount: String::new(),
            transfer_type: TransferType::Expense,
            description: String::new(),
            date: String::new(),
            is_open: false,
            status: FormStatus::default(),
            original_timestamp: None,
        }
    }
}

impl TransferForm {
    /// Empty form for a new transfer, optionally preset to an account
    pub fn create(repo_id: Option<i64>) -> Self {
        Self {
            repo_id,
            is_open: true,
            ..Self::default()
        }
    }

    /// Form prefilled from an existing transfer
    pub fn edit(transfer: &Transfer) -> Self {
        Self {
            mode: FormMode::Edit(transfer.id),
            repo_id: Some(transfer.money_repo_id),
            amount: format_amount(transfer.amount),
            transfer_type: transfer.transfer_type,
            description: transfer.description.clone(),
            date: transfer.timestamp.format("%Y-%m-%d").to_string(),
            is_open: true,
            status: FormStatus::default(),
            original_timestamp: Some(transfer.timestamp),
        }
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Validate and build `(repo_id, request)`
    pub fn validate(&self) -> std::result::Result<(i64, TransferRequest), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.repo_id.is_none() {
            errors.push("repo_id", "Account is required");
        }

        let amount = errors.parsed("amount", parse_amount("Amount", &self.amount));
        if let Some(amount) = amount {
            errors.check("amount", validate_min_value("Amount", amount, MIN_AMOUNT));
        }
        errors.check("description", validate_required("Description", &self.description));
        let date = errors.parsed("date", parse_date("Date", &self.date));

        match (self.repo_id, amount, date) {
            (Some(repo_id), Some(amount), Some(date)) if errors.is_empty() => Ok((
                repo_id,
                TransferRequest {
                    amount: format_amount(amount),
                    transfer_type: self.transfer_type,
                    description: self.description.trim().to_string(),
                    timestamp: self.timestamp_for(date),
                },
            )),
            _ => Err(errors),
        }
    }

    fn timestamp_for(&self, date: NaiveDate) -> DateTime<Utc> {
        match self.original_timestamp {
            Some(original) if original.date_naive() == date => original,
            _ => date.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }

    /// Create or update the transfer. The form closes on success.
    pub async fn submit(&mut self, store: &RepoStore) -> Result<Transfer> {
        self.status.ensure_idle()?;
        let (repo_id, request) = self.validate().map_err(|e| self.status.reject(e))?;

        self.status.begin();
        let result = match self.mode {
            FormMode::Create => store.create_transfer(repo_id, &request).await,
            FormMode::Edit(transfer_id) => store.update_transfer(repo_id, transfer_id, &request).await,
        };

        match result {
            Ok(transfer) => {
                self.close();
                Ok(transfer)
            }
            Err(e) => {
                warn!(error = %e, repo_id, mode = ?self.mode, "Transfer form submission failed");
                self.status.fail(e.to_string());
                Err(AppError::Api(e))
            }
        }
    }
}
