//! # Account Form
//!
//! Create or edit a money repo. Submission goes through [`RepoStore`] so the
//! account list and balance are refetched afterwards.

use shared::{format_amount, MoneyRepo, MoneyRepoRequest};
use tracing::warn;

use super::validation::{parse_amount, parse_date, validate_currency_code, validate_required};
use super::{FieldErrors, FormMode, FormStatus};
use crate::core::error::{AppError, Result};
use crate::state::repos::RepoStore;

const DEFAULT_CURRENCY: &str = "EUR";

#[derive(Debug, Clone)]
pub struct AccountForm {
    pub mode: FormMode,
    pub repo_name: String,
    pub description: String,
    pub start_balance: String,
    /// `YYYY-MM-DD`
    pub start_balance_date: String,
    pub currency: String,
    pub is_open: bool,
    pub status: FormStatus,
}

impl Default for AccountForm {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            repo_name: String::new(),
            description: String::new(),
            start_balance: "0".to_string(),
            start_balance_date: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            is_open: false,
            status: FormStatus::default(),
        }
    }
}

impl AccountForm {
    /// Empty form for a new account
    pub fn create() -> Self {
        Self {
            is_open: true,
            ..Self::default()
        }
    }

    /// Form prefilled from an existing account
    pub fn edit(repo: &MoneyRepo) -> Self {
        Self {
            mode: FormMode::Edit(repo.id),
            repo_name: repo.repo_name.clone(),
            description: repo.description.clone(),
            start_balance: format_amount(repo.start_balance),
            start_balance_date: repo.start_balance_date.format("%Y-%m-%d").to_string(),
            currency: repo.currency.clone(),
            is_open: true,
            status: FormStatus::default(),
        }
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> std::result::Result<MoneyRepoRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("repo_name", validate_required("Account name", &self.repo_name));
        let start_balance =
            errors.parsed("start_balance", parse_amount("Start balance", &self.start_balance));
        let start_balance_date = errors.parsed(
            "start_balance_date",
            parse_date("Start date", &self.start_balance_date),
        );
        errors.check("currency", validate_currency_code(&self.currency));

        match (start_balance, start_balance_date) {
            (Some(start_balance), Some(start_balance_date)) if errors.is_empty() => {
                Ok(MoneyRepoRequest {
                    repo_name: self.repo_name.trim().to_string(),
                    description: self.description.trim().to_string(),
                    start_balance: format_amount(start_balance),
                    start_balance_date,
                    currency: self.currency.trim().to_ascii_uppercase(),
                })
            }
            _ => Err(errors),
        }
    }

    /// Create or update the account. The form closes on success.
    pub async fn submit(&mut self, store: &RepoStore) -> Result<MoneyRepo> {
        self.status.ensure_idle()?;
        let request = self.validate().map_err(|e| self.status.reject(e))?;

        self.status.begin();
        let result = match self.mode {
            FormMode::Create => store.create_account(&request).await,
            FormMode::Edit(repo_id) => store.update_account(repo_id, &request).await,
        };

        match result {
            Ok(repo) => {
                self.close();
                Ok(repo)
            }
            Err(e) => {
                warn!(error = %e, mode = ?self.mode, "Account form submission failed");
                self.status.fail(e.to_string());
                Err(AppError::Api(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ApiError;
    use crate::testing::{repo, Call, MockApi};
    use std::sync::Arc;

    fn filled() -> AccountForm {
        AccountForm {
            repo_name: "Savings".to_string(),
            start_balance: "1250,5".to_string(),
            start_balance_date: "2026-01-01".to_string(),
            currency: "usd".to_string(),
            ..AccountForm::create()
        }
    }

    #[test]
    fn test_validate_converts_fields() {
        let request = filled().validate().unwrap();

        assert_eq!(request.start_balance, "1250.50");
        assert_eq!(request.currency, "USD");
        assert_eq!(request.start_balance_date.to_string(), "2026-01-01");
    }

    #[test]
    fn test_validate_reports_each_field() {
        let form = AccountForm {
            repo_name: " ".to_string(),
            start_balance: "abc".to_string(),
            start_balance_date: String::new(),
            currency: "EURO".to_string(),
            ..AccountForm::create()
        };

        let errors = form.validate().unwrap_err();

        assert_eq!(errors.get("repo_name"), Some("Account name is required"));
        assert_eq!(errors.get("start_balance"), Some("Start balance must be a number"));
        assert_eq!(errors.get("start_balance_date"), Some("Start date is required"));
        assert!(errors.get("currency").is_some());
    }

    #[test]
    fn test_edit_prefills_from_repo() {
        let mut existing = repo(3, "Cash");
        existing.start_balance = 42.0;

        let form = AccountForm::edit(&existing);

        assert_eq!(form.mode, FormMode::Edit(3));
        assert_eq!(form.start_balance, "42.00");
        assert_eq!(form.start_balance_date, "2026-01-01");
    }

    #[tokio::test]
    async fn test_create_submits_and_closes() {
        let api = Arc::new(MockApi::new());
        let store = RepoStore::new(api.clone());
        let mut form = filled();

        let created = form.submit(&store).await.unwrap();

        assert_eq!(created.repo_name, "Savings");
        assert!(!form.is_open);
        assert!(form.repo_name.is_empty());
        assert_eq!(api.count(&Call::CreateRepo("Savings".to_string())), 1);
        assert_eq!(store.repos().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_calls_update() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        let store = RepoStore::new(api.clone());
        store.request_repos().await;
        let mut form = AccountForm::edit(&store.repos()[0]);
        form.description = "Wallet money".to_string();

        form.submit(&store).await.unwrap();

        assert_eq!(api.count(&Call::UpdateRepo(1)), 1);
        assert_eq!(store.repos()[0].description, "Wallet money");
    }

    #[tokio::test]
    async fn test_failure_keeps_form_open() {
        let api = Arc::new(MockApi::new());
        api.fail_with(ApiError::Server);
        let store = RepoStore::new(api.clone());
        let mut form = filled();

        let result = form.submit(&store).await;

        assert!(result.is_err());
        assert!(form.is_open);
        assert_eq!(form.repo_name, "Savings");
        assert_eq!(form.status.error.as_deref(), Some(ApiError::Server.to_string().as_str()));
        assert!(!form.status.is_submitting);
    }
}
