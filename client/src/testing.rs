//! Recording mock of [`ApiService`] and fixture builders for unit tests.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use parking_lot::Mutex;
use shared::{
    Balance, LoginRequest, LoginResponse, MoneyRepo, MoneyRepoRequest, RegisteredUser,
    RegistrationRequest, RegistrationResponse, Transfer, TransferRequest, TransferType, UserInfo,
};
use std::collections::HashMap;
use std::time::Duration;

use crate::core::error::ApiError;
use crate::core::service::ApiService;

/// One recorded API call
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Call {
    Login(String),
    Register(String),
    Profile,
    Repos,
    CreateRepo(String),
    UpdateRepo(i64),
    DeleteRepo(i64),
    RepoTransfers(i64),
    AllTransfers,
    CreateTransfer(i64),
    UpdateTransfer(i64, i64),
    DeleteTransfer(i64, i64),
    RepoBalance(i64),
    UserBalance,
}

#[derive(Default)]
struct MockData {
    profile: UserInfo,
    repos: Vec<MoneyRepo>,
    transfers: Vec<Transfer>,
    repo_balances: HashMap<i64, Balance>,
    user_balance: Balance,
}

/// In-memory API that records every call.
#[derive(Default)]
pub struct MockApi {
    data: Mutex<MockData>,
    calls: Mutex<Vec<Call>>,
    failure: Mutex<Option<ApiError>>,
    login_fails: Mutex<bool>,
    delays: Mutex<HashMap<Call, Duration>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repos(repos: Vec<MoneyRepo>) -> Self {
        let api = Self::new();
        api.data.lock().repos = repos;
        api
    }

    pub fn set_profile(&self, profile: UserInfo) {
        self.data.lock().profile = profile;
    }

    pub fn set_repos(&self, repos: Vec<MoneyRepo>) {
        self.data.lock().repos = repos;
    }

    pub fn set_transfers(&self, transfers: Vec<Transfer>) {
        self.data.lock().transfers = transfers;
    }

    pub fn set_repo_balance(&self, repo_id: i64, balance: Balance) {
        self.data.lock().repo_balances.insert(repo_id, balance);
    }

    pub fn set_user_balance(&self, balance: Balance) {
        self.data.lock().user_balance = balance;
    }

    /// Every following call (except login) fails with `err`
    pub fn fail_with(&self, err: ApiError) {
        *self.failure.lock() = Some(err);
    }

    pub fn clear_failure(&self) {
        *self.failure.lock() = None;
    }

    pub fn fail_login(&self) {
        *self.login_fails.lock() = true;
    }

    /// Delay the response to `call` by `delay`
    pub fn delay(&self, call: Call, delay: Duration) {
        self.delays.lock().insert(call, delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.lock().iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    async fn record(&self, call: Call) -> Result<(), ApiError> {
        self.calls.lock().push(call.clone());
        let delay = self.delays.lock().get(&call).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ApiService for MockApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.calls.lock().push(Call::Login(credentials.username.clone()));
        if *self.login_fails.lock() {
            return Err(ApiError::Rejected {
                status: 401,
                message: "Invalid credentials.".to_string(),
            });
        }
        Ok(LoginResponse {
            token: format!("token-{}", credentials.username),
        })
    }

    async fn register(&self, data: &RegistrationRequest) -> Result<RegistrationResponse, ApiError> {
        self.record(Call::Register(data.username.clone())).await?;
        Ok(RegistrationResponse {
            token: format!("token-{}", data.username),
            user: RegisteredUser {
                id: 1,
                username: data.username.clone(),
                email: data.email.clone(),
                first_name: data.first_name.clone(),
                last_name: data.last_name.clone(),
            },
        })
    }

    async fn get_user_profile(&self) -> Result<UserInfo, ApiError> {
        self.record(Call::Profile).await?;
        Ok(self.data.lock().profile.clone())
    }

    async fn get_user_repos(&self) -> Result<Vec<MoneyRepo>, ApiError> {
        self.record(Call::Repos).await?;
        Ok(self.data.lock().repos.clone())
    }

    async fn create_repo(&self, repo: &MoneyRepoRequest) -> Result<MoneyRepo, ApiError> {
        self.record(Call::CreateRepo(repo.repo_name.clone())).await?;
        let mut data = self.data.lock();
        let id = data.repos.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let created = MoneyRepo {
            id,
            repo_name: repo.repo_name.clone(),
            description: repo.description.clone(),
            start_balance: repo.start_balance.parse().unwrap_or(0.0),
            start_balance_date: repo.start_balance_date,
            currency: repo.currency.clone(),
        };
        data.repos.push(created.clone());
        Ok(created)
    }

    async fn update_repo(&self, repo_id: i64, repo: &MoneyRepoRequest) -> Result<MoneyRepo, ApiError> {
        self.record(Call::UpdateRepo(repo_id)).await?;
        let mut data = self.data.lock();
        let existing = data
            .repos
            .iter_mut()
            .find(|r| r.id == repo_id)
            .ok_or(ApiError::NotFound)?;
        existing.repo_name = repo.repo_name.clone();
        existing.description = repo.description.clone();
        existing.start_balance = repo.start_balance.parse().unwrap_or(0.0);
        existing.start_balance_date = repo.start_balance_date;
        existing.currency = repo.currency.clone();
        Ok(existing.clone())
    }

    async fn delete_repo(&self, repo_id: i64) -> Result<(), ApiError> {
        self.record(Call::DeleteRepo(repo_id)).await?;
        let mut data = self.data.lock();
        data.repos.retain(|r| r.id != repo_id);
        data.transfers.retain(|t| t.money_repo_id != repo_id);
        Ok(())
    }

    async fn get_repo_transfers(&self, repo_id: i64) -> Result<Vec<Transfer>, ApiError> {
        self.record(Call::RepoTransfers(repo_id)).await?;
        Ok(self
            .data
            .lock()
            .transfers
            .iter()
            .filter(|t| t.money_repo_id == repo_id)
            .cloned()
            .collect())
    }

    async fn get_all_transfers(&self) -> Result<Vec<Transfer>, ApiError> {
        self.record(Call::AllTransfers).await?;
        Ok(self.data.lock().transfers.clone())
    }

    async fn create_transfer(&self, repo_id: i64, transfer: &TransferRequest) -> Result<Transfer, ApiError> {
        self.record(Call::CreateTransfer(repo_id)).await?;
        let mut data = self.data.lock();
        let id = data.transfers.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let created = Transfer {
            id,
            money_repo_id: repo_id,
            amount: transfer.amount.parse().unwrap_or(0.0),
            transfer_type: transfer.transfer_type,
            description: transfer.description.clone(),
            timestamp: transfer.timestamp,
        };
        data.transfers.push(created.clone());
        Ok(created)
    }

    async fn update_transfer(
        &self,
        repo_id: i64,
        transfer_id: i64,
        transfer: &TransferRequest,
    ) -> Result<Transfer, ApiError> {
        self.record(Call::UpdateTransfer(repo_id, transfer_id)).await?;
        let mut data = self.data.lock();
        let existing = data
            .transfers
            .iter_mut()
            .find(|t| t.id == transfer_id && t.money_repo_id == repo_id)
            .ok_or(ApiError::NotFound)?;
        existing.amount = transfer.amount.parse().unwrap_or(0.0);
        existing.transfer_type = transfer.transfer_type;
        existing.description = transfer.description.clone();
        existing.timestamp = transfer.timestamp;
        Ok(existing.clone())
    }

    async fn delete_transfer(&self, repo_id: i64, transfer_id: i64) -> Result<(), ApiError> {
        self.record(Call::DeleteTransfer(repo_id, transfer_id)).await?;
        self.data
            .lock()
            .transfers
            .retain(|t| !(t.id == transfer_id && t.money_repo_id == repo_id));
        Ok(())
    }

    async fn get_repo_balance(&self, repo_id: i64) -> Result<Balance, ApiError> {
        self.record(Call::RepoBalance(repo_id)).await?;
        Ok(self
            .data
            .lock()
            .repo_balances
            .get(&repo_id)
            .copied()
            .unwrap_or_default())
    }

    async fn get_user_balance(&self) -> Result<Balance, ApiError> {
        self.record(Call::UserBalance).await?;
        Ok(self.data.lock().user_balance)
    }
}

pub fn repo(id: i64, name: &str) -> MoneyRepo {
    MoneyRepo {
        id,
        repo_name: name.to_string(),
        description: String::new(),
        start_balance: 0.0,
        start_balance_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        currency: "EUR".to_string(),
    }
}

pub fn transfer(id: i64, repo_id: i64, amount: f64, transfer_type: TransferType, day: u32) -> Transfer {
    Transfer {
        id,
        money_repo_id: repo_id,
        amount,
        transfer_type,
        description: format!("transfer {}", id),
        timestamp: Utc.with_ymd_and_hms(2026, 1, day, 12, 0, 0).unwrap(),
    }
}

pub fn balance(balance: f64, initial_balance: f64) -> Balance {
    Balance {
        total_income: (balance - initial_balance).max(0.0),
        total_expenses: (initial_balance - balance).max(0.0),
        balance,
        initial_balance,
    }
}
