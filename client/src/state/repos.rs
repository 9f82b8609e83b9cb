//! # Repo / Transfer / Balance Store
//!
//! The one stateful coordinator of the client. It holds:
//!
//! - the current [`Selection`] (a watch channel, so the sync task can react)
//! - the list of money repos
//! - the transfer list of the current selection
//! - the balance snapshot of the current selection
//!
//! ## Refresh Rules
//!
//! CRUD operations never patch local state. Each success explicitly refetches
//! what it invalidated:
//!
//! | Operation                      | Refetch                                       |
//! |--------------------------------|-----------------------------------------------|
//! | create / update account        | account list + balance                        |
//! | delete account                 | account list, then selection reset + transfers + balance, or balance |
//! | create / update / delete transfer | transfers + balance of the selection       |
//!
//! ## Stale Responses
//!
//! Overlapping fetches are neither cancelled nor de-duplicated. Each fetch
//! takes a generation number; a response whose generation has been
//! superseded by a newer fetch of the same kind is discarded instead of
//! overwriting newer data. This replaces plain last-response-wins, where a
//! slow response for an old selection could overwrite the current one.

use parking_lot::RwLock;
use shared::{Balance, MoneyRepo, MoneyRepoRequest, Transfer, TransferRequest};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::core::error::ApiError;
use crate::core::service::ApiService;

/// Which repos the transfer list and balance are scoped to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Every repo of the user
    #[default]
    All,
    /// One repo, identified by its name
    Account(String),
}

impl Selection {
    pub fn account(name: impl Into<String>) -> Self {
        Selection::Account(name.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Account(name) => f.write_str(name),
        }
    }
}

/// Resolved target of a transfer/balance fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    All,
    Repo(i64),
}

/// Data held by the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoState {
    pub repos: Vec<MoneyRepo>,
    pub transfers: Vec<Transfer>,
    pub balance: Balance,
}

/// Monotonic fetch counter
#[derive(Debug, Default)]
struct Generation(AtomicU64);

impl Generation {
    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

/// Reactive store of repos, transfers, and balance.
pub struct RepoStore {
    api: Arc<dyn ApiService>,
    selection: watch::Sender<Selection>,
    state: RwLock<RepoState>,
    revision: watch::Sender<u64>,
    repos_generation: Generation,
    transfers_generation: Generation,
    balance_generation: Generation,
}

impl RepoStore {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        let (selection, _) = watch::channel(Selection::All);
        let (revision, _) = watch::channel(0);
        Self {
            api,
            selection,
            state: RwLock::new(RepoState::default()),
            revision,
            repos_generation: Generation::default(),
            transfers_generation: Generation::default(),
            balance_generation: Generation::default(),
        }
    }

    // ========== Read Access ==========

    pub fn selection(&self) -> Selection {
        self.selection.borrow().clone()
    }

    pub fn repos(&self) -> Vec<MoneyRepo> {
        self.state.read().repos.clone()
    }

    pub fn transfers(&self) -> Vec<Transfer> {
        self.state.read().transfers.clone()
    }

    pub fn balance(&self) -> Balance {
        self.state.read().balance
    }

    pub fn snapshot(&self) -> RepoState {
        self.state.read().clone()
    }

    /// Id of the repo with the given name
    pub fn repo_id_for(&self, name: &str) -> Option<i64> {
        self.state
            .read()
            .repos
            .iter()
            .find(|repo| repo.repo_name == name)
            .map(|repo| repo.id)
    }

    /// The selected repo, `None` for [`Selection::All`] or an unknown name
    pub fn selected_repo(&self) -> Option<MoneyRepo> {
        match self.selection() {
            Selection::All => None,
            Selection::Account(name) => self
                .state
                .read()
                .repos
                .iter()
                .find(|repo| repo.repo_name == name)
                .cloned(),
        }
    }

    /// Watch selection changes
    pub fn subscribe_selection(&self) -> watch::Receiver<Selection> {
        self.selection.subscribe()
    }

    /// Watch state changes; the value is a revision counter bumped on every write
    pub fn subscribe_updates(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    // ========== Selection ==========

    /// Change the selection. Selecting the current value is a no-op and does
    /// not notify subscribers.
    pub fn select_account(&self, selection: Selection) {
        let changed = self.selection.send_if_modified(|current| {
            if *current == selection {
                false
            } else {
                *current = selection.clone();
                true
            }
        });
        if changed {
            debug!(selection = %selection, "Selection changed");
        }
    }

    // ========== Fetching ==========

    /// Refetch the account list. Errors are logged and the list is kept.
    #[tracing::instrument(skip(self))]
    pub async fn request_repos(&self) {
        let generation = self.repos_generation.next();
        match self.api.get_user_repos().await {
            Ok(repos) => {
                if self.repos_generation.is_current(generation) {
                    debug!(count = repos.len(), "Repos updated");
                    self.write(|state| state.repos = repos);
                } else {
                    debug!(generation, "Discarding stale repo list");
                }
            }
            Err(e) => warn!(error = %e, "Failed to fetch repos"),
        }
    }

    /// Refetch transfers and balance for the current selection.
    ///
    /// A name without a matching repo clears the transfer list, leaves the
    /// balance untouched, and issues no request.
    #[tracing::instrument(skip(self), fields(selection = %self.selection()))]
    pub async fn refresh_selection(&self) {
        let transfers_generation = self.transfers_generation.next();

        let Some(scope) = self.scope_of(&self.selection()) else {
            debug!("No repo matches the selection, clearing transfers");
            self.apply_transfers(transfers_generation, Ok(Vec::new()));
            return;
        };

        let balance_generation = self.balance_generation.next();
        let (transfers, balance) =
            futures::join!(self.fetch_transfers(scope), self.fetch_balance(scope));

        self.apply_transfers(transfers_generation, transfers);
        self.apply_balance(balance_generation, balance);
    }

    /// Refetch only the balance for the current selection.
    #[tracing::instrument(skip(self), fields(selection = %self.selection()))]
    pub async fn refresh_balance(&self) {
        let Some(scope) = self.scope_of(&self.selection()) else {
            debug!("No repo matches the selection, keeping balance");
            return;
        };
        let generation = self.balance_generation.next();
        let balance = self.fetch_balance(scope).await;
        self.apply_balance(generation, balance);
    }

    /// Forget everything; used on logout.
    pub fn reset(&self) {
        // Outstanding fetches must not repopulate the cleared state
        self.repos_generation.next();
        self.transfers_generation.next();
        self.balance_generation.next();
        self.write(|state| *state = RepoState::default());
        self.select_account(Selection::All);
        debug!("Repo store reset");
    }

    // ========== Account CRUD ==========

    pub async fn create_account(&self, request: &MoneyRepoRequest) -> Result<MoneyRepo, ApiError> {
        let repo = self.api.create_repo(request).await?;
        info!(repo_id = repo.id, repo_name = %repo.repo_name, "Repo created");
        futures::join!(self.request_repos(), self.refresh_balance());
        Ok(repo)
    }

    /// Update a repo. If the selected repo is renamed, the selection follows
    /// the new name.
    pub async fn update_account(&self, repo_id: i64, request: &MoneyRepoRequest) -> Result<MoneyRepo, ApiError> {
        let previous_name = self
            .state
            .read()
            .repos
            .iter()
            .find(|repo| repo.id == repo_id)
            .map(|repo| repo.repo_name.clone());

        let repo = self.api.update_repo(repo_id, request).await?;
        info!(repo_id, repo_name = %repo.repo_name, "Repo updated");

        self.request_repos().await;

        let renamed_selected = matches!(
            (&previous_name, self.selection()),
            (Some(old), Selection::Account(selected)) if *old == selected && *old != repo.repo_name
        );
        if renamed_selected {
            // The sync task refetches for the new selection
            self.select_account(Selection::Account(repo.repo_name.clone()));
        } else {
            self.refresh_balance().await;
        }
        Ok(repo)
    }

    /// Delete a repo. Deleting the selected repo resets the selection to
    /// [`Selection::All`] and refetches transfers and balance for it.
    pub async fn delete_account(&self, repo_id: i64) -> Result<(), ApiError> {
        let was_selected = self.selected_repo().is_some_and(|repo| repo.id == repo_id);

        self.api.delete_repo(repo_id).await?;
        info!(repo_id, "Repo deleted");

        self.request_repos().await;
        if was_selected {
            self.select_account(Selection::All);
            self.refresh_selection().await;
        } else {
            self.refresh_balance().await;
        }
        Ok(())
    }

    // ========== Transfer CRUD ==========

    pub async fn create_transfer(&self, repo_id: i64, request: &TransferRequest) -> Result<Transfer, ApiError> {
        let transfer = self.api.create_transfer(repo_id, request).await?;
        info!(repo_id, transfer_id = transfer.id, "Transfer created");
        self.refresh_selection().await;
        Ok(transfer)
    }

    pub async fn update_transfer(
        &self,
        repo_id: i64,
        transfer_id: i64,
        request: &TransferRequest,
    ) -> Result<Transfer, ApiError> {
        let transfer = self.api.update_transfer(repo_id, transfer_id, request).await?;
        info!(repo_id, transfer_id, "Transfer updated");
        self.refresh_selection().await;
        Ok(transfer)
    }

    pub async fn delete_transfer(&self, repo_id: i64, transfer_id: i64) -> Result<(), ApiError> {
        self.api.delete_transfer(repo_id, transfer_id).await?;
        info!(repo_id, transfer_id, "Transfer deleted");
        self.refresh_selection().await;
        Ok(())
    }

    // ========== Internals ==========

    fn scope_of(&self, selection: &Selection) -> Option<Scope> {
        match selection {
            Selection::All => Some(Scope::All),
            Selection::Account(name) => self.repo_id_for(name).map(Scope::Repo),
        }
    }

    async fn fetch_transfers(&self, scope: Scope) -> Result<Vec<Transfer>, ApiError> {
        match scope {
            Scope::All => self.api.get_all_transfers().await,
            Scope::Repo(id) => self.api.get_repo_transfers(id).await,
        }
    }

    async fn fetch_balance(&self, scope: Scope) -> Result<Balance, ApiError> {
        match scope {
            Scope::All => self.api.get_user_balance().await,
            Scope::Repo(id) => self.api.get_repo_balance(id).await,
        }
    }

    fn apply_transfers(&self, generation: u64, result: Result<Vec<Transfer>, ApiError>) {
        match result {
            Ok(transfers) if self.transfers_generation.is_current(generation) => {
                debug!(count = transfers.len(), "Transfers updated");
                self.write(|state| state.transfers = transfers);
            }
            Ok(_) => debug!(generation, "Discarding stale transfers"),
            Err(e) => warn!(error = %e, "Failed to fetch transfers"),
        }
    }

    fn apply_balance(&self, generation: u64, result: Result<Balance, ApiError>) {
        match result {
            Ok(balance) if self.balance_generation.is_current(generation) => {
                debug!(balance = balance.balance, "Balance updated");
                self.write(|state| state.balance = balance);
            }
            Ok(_) => debug!(generation, "Discarding stale balance"),
            Err(e) => warn!(error = %e, "Failed to fetch balance"),
        }
    }

    fn write(&self, update: impl FnOnce(&mut RepoState)) {
        {
            let mut state = self.state.write();
            update(&mut *state);
        } // Lock released before notifying
        self.revision.send_modify(|revision| *revision += 1);
    }
}

impl fmt::Debug for RepoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepoStore")
            .field("selection", &self.selection())
            .field("state", &*self.state.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{balance, repo, transfer, Call, MockApi};
    use chrono::{TimeZone, Utc};
    use shared::TransferType;
    use std::time::Duration;

    fn store_with(api: &Arc<MockApi>) -> RepoStore {
        RepoStore::new(api.clone())
    }

    fn income(amount: &str) -> TransferRequest {
        TransferRequest {
            amount: amount.to_string(),
            transfer_type: TransferType::Income,
            description: "Salary".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    fn account_request(name: &str) -> MoneyRepoRequest {
        MoneyRepoRequest {
            repo_name: name.to_string(),
            description: String::new(),
            start_balance: "100.00".to_string(),
            start_balance_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            currency: "EUR".to_string(),
        }
    }

    // ========== Selection Tests ==========

    #[test]
    fn test_initial_selection_is_all() {
        let api = Arc::new(MockApi::new());
        let store = store_with(&api);

        assert_eq!(store.selection(), Selection::All);
        assert!(store.repos().is_empty());
        assert_eq!(store.balance(), Balance::default());
    }

    #[test]
    fn test_selecting_same_value_does_not_notify() {
        let api = Arc::new(MockApi::new());
        let store = store_with(&api);
        let rx = store.subscribe_selection();

        store.select_account(Selection::All);
        assert!(!rx.has_changed().unwrap());

        store.select_account(Selection::account("Cash"));
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_all_selection_uses_all_accounts_endpoints() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        let store = store_with(&api);
        store.request_repos().await;
        api.clear_calls();

        store.refresh_selection().await;

        assert_eq!(api.count(&Call::AllTransfers), 1);
        assert_eq!(api.count(&Call::UserBalance), 1);
        assert_eq!(api.count(&Call::RepoTransfers(1)), 0);
        assert_eq!(api.count(&Call::RepoBalance(1)), 0);
    }

    #[tokio::test]
    async fn test_named_selection_uses_repo_endpoints() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash"), repo(2, "Bank")]));
        api.set_transfers(vec![
            transfer(1, 1, 10.0, TransferType::Income, 2),
            transfer(2, 2, 20.0, TransferType::Expense, 3),
        ]);
        api.set_repo_balance(2, balance(80.0, 100.0));
        let store = store_with(&api);
        store.request_repos().await;

        store.select_account(Selection::account("Bank"));
        store.refresh_selection().await;

        assert_eq!(api.count(&Call::RepoTransfers(2)), 1);
        assert_eq!(api.count(&Call::RepoBalance(2)), 1);
        assert_eq!(store.transfers().len(), 1);
        assert_eq!(store.transfers()[0].id, 2);
        assert_eq!(store.balance().balance, 80.0);
    }

    #[tokio::test]
    async fn test_unknown_name_clears_transfers_and_keeps_balance() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        api.set_transfers(vec![transfer(1, 1, 10.0, TransferType::Income, 2)]);
        api.set_user_balance(balance(110.0, 100.0));
        let store = store_with(&api);
        store.request_repos().await;
        store.refresh_selection().await;
        assert_eq!(store.transfers().len(), 1);
        api.clear_calls();

        store.select_account(Selection::account("Nope"));
        store.refresh_selection().await;

        assert!(store.transfers().is_empty());
        assert_eq!(store.balance().balance, 110.0);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_error_keeps_previous_state() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        api.set_transfers(vec![transfer(1, 1, 10.0, TransferType::Income, 2)]);
        let store = store_with(&api);
        store.request_repos().await;
        store.refresh_selection().await;

        api.fail_with(ApiError::Server);
        store.request_repos().await;
        store.refresh_selection().await;

        assert_eq!(store.repos().len(), 1);
        assert_eq!(store.transfers().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        api.set_transfers(vec![
            transfer(1, 1, 10.0, TransferType::Income, 2),
            transfer(2, 7, 5.0, TransferType::Expense, 3),
        ]);
        api.delay(Call::AllTransfers, Duration::from_millis(100));
        let store = Arc::new(store_with(&api));
        store.request_repos().await;

        // Slow fetch for "all" is overtaken by a fast fetch for "Cash"
        let slow = {
            let store = store.clone();
            tokio::spawn(async move { store.refresh_selection().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        store.select_account(Selection::account("Cash"));
        store.refresh_selection().await;
        slow.await.unwrap();

        let transfers = store.transfers();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].money_repo_id, 1);
    }

    // ========== CRUD Refresh Tests ==========

    #[tokio::test]
    async fn test_create_transfer_refetches_selected_account_once() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        let store = store_with(&api);
        store.request_repos().await;
        store.select_account(Selection::account("Cash"));
        api.clear_calls();

        let created = store.create_transfer(1, &income("10.00")).await.unwrap();

        assert_eq!(created.amount, 10.0);
        assert_eq!(
            api.calls(),
            vec![Call::CreateTransfer(1), Call::RepoTransfers(1), Call::RepoBalance(1)]
        );
        assert_eq!(store.transfers().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_create_transfer_refetches_nothing() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        let store = store_with(&api);
        store.request_repos().await;
        api.clear_calls();
        api.fail_with(ApiError::Forbidden);

        let result = store.create_transfer(1, &income("10.00")).await;

        assert_eq!(result.unwrap_err(), ApiError::Forbidden);
        assert_eq!(api.calls(), vec![Call::CreateTransfer(1)]);
    }

    #[tokio::test]
    async fn test_delete_transfer_refetches_all_scope() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        api.set_transfers(vec![transfer(4, 1, 10.0, TransferType::Expense, 2)]);
        let store = store_with(&api);
        store.request_repos().await;
        api.clear_calls();

        store.delete_transfer(1, 4).await.unwrap();

        assert_eq!(api.count(&Call::AllTransfers), 1);
        assert_eq!(api.count(&Call::UserBalance), 1);
        assert!(store.transfers().is_empty());
    }

    #[tokio::test]
    async fn test_create_account_refetches_repos_and_balance() {
        let api = Arc::new(MockApi::new());
        let store = store_with(&api);

        let created = store.create_account(&account_request("Savings")).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(api.count(&Call::Repos), 1);
        assert_eq!(api.count(&Call::UserBalance), 1);
        assert_eq!(store.repos().len(), 1);
    }

    #[tokio::test]
    async fn test_rename_selected_account_follows_selection() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        let store = store_with(&api);
        store.request_repos().await;
        store.select_account(Selection::account("Cash"));

        store.update_account(1, &account_request("Wallet")).await.unwrap();

        assert_eq!(store.selection(), Selection::account("Wallet"));
        assert_eq!(store.repo_id_for("Wallet"), Some(1));
    }

    #[tokio::test]
    async fn test_delete_selected_account_resets_selection() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash"), repo(2, "Bank")]));
        let store = store_with(&api);
        store.request_repos().await;
        store.select_account(Selection::account("Cash"));

        store.delete_account(1).await.unwrap();

        assert_eq!(store.selection(), Selection::All);
        assert_eq!(store.repos().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_selected_account_refetches_all_accounts() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash"), repo(2, "Bank")]));
        api.set_transfers(vec![
            transfer(1, 1, 10.0, TransferType::Expense, 1),
            transfer(2, 2, 20.0, TransferType::Income, 2),
        ]);
        let store = store_with(&api);
        store.request_repos().await;
        store.select_account(Selection::account("Cash"));
        store.refresh_selection().await;
        assert_eq!(store.transfers().len(), 1);
        api.clear_calls();

        store.delete_account(1).await.unwrap();

        assert_eq!(api.count(&Call::AllTransfers), 1);
        assert_eq!(api.count(&Call::UserBalance), 1);
        assert_eq!(api.count(&Call::RepoTransfers(1)), 0);
        let transfers = store.transfers();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].money_repo_id, 2);
    }

    #[tokio::test]
    async fn test_delete_other_account_refetches_balance() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash"), repo(2, "Bank")]));
        let store = store_with(&api);
        store.request_repos().await;
        store.select_account(Selection::account("Cash"));
        api.clear_calls();

        store.delete_account(2).await.unwrap();

        assert_eq!(store.selection(), Selection::account("Cash"));
        assert_eq!(
            api.calls(),
            vec![Call::DeleteRepo(2), Call::Repos, Call::RepoBalance(1)]
        );
    }

    #[tokio::test]
    async fn test_reset_clears_state() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        api.set_user_balance(balance(50.0, 0.0));
        let store = store_with(&api);
        store.request_repos().await;
        store.select_account(Selection::account("Cash"));
        store.refresh_balance().await;

        store.reset();

        assert_eq!(store.selection(), Selection::All);
        assert_eq!(store.snapshot(), RepoState::default());
    }

    #[tokio::test]
    async fn test_updates_bump_revision() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        let store = store_with(&api);
        let mut updates = store.subscribe_updates();

        store.request_repos().await;

        assert!(updates.has_changed().unwrap());
        assert_eq!(*updates.borrow_and_update(), 1);
    }
}
