//! # Application Wiring
//!
//! Builds the shared services once and hands out `Arc`s to them.
//!
//! ```text
//! ClientConfig ──▶ FileTokenStorage ──▶ AuthStore ──┐
//!              └─────────────────────▶ ApiClient ◀──┘
//!                                         │
//!                           ┌─────────────┴────────────┐
//!                           ▼                          ▼
//!                       RepoStore                  UserStore
//! ```

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::core::service::ApiService;
use crate::services::api::ApiClient;
use crate::services::auth::{AuthStore, FileTokenStorage, TokenStorage};
use crate::state::{spawn_sync, RepoStore, SyncHandle, UserStore};

/// All long-lived client services
pub struct App {
    pub config: ClientConfig,
    pub auth: Arc<AuthStore>,
    pub api: Arc<dyn ApiService>,
    pub repos: Arc<RepoStore>,
    pub user: Arc<UserStore>,
}

impl App {
    /// Wire the services with the token persisted in `config.token_file`.
    pub fn new(config: ClientConfig) -> Self {
        let storage = Arc::new(FileTokenStorage::new(&config.token_file));
        Self::with_storage(config, storage)
    }

    /// Wire the services with a custom token storage.
    pub fn with_storage(config: ClientConfig, storage: Arc<dyn TokenStorage>) -> Self {
        let auth = Arc::new(AuthStore::new(storage));
        let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(&config, auth.clone()));
        Self::with_api(config, auth, api)
    }

    /// Wire the stores around an existing gateway.
    pub fn with_api(config: ClientConfig, auth: Arc<AuthStore>, api: Arc<dyn ApiService>) -> Self {
        let repos = Arc::new(RepoStore::new(api.clone()));
        let user = Arc::new(UserStore::new(api.clone()));
        tracing::debug!(
            api_base_url = %config.api_base_url,
            authenticated = auth.is_authenticated(),
            "Application services created"
        );
        Self {
            config,
            auth,
            api,
            repos,
            user,
        }
    }

    /// Start the background sync task for the repo store.
    pub fn start_sync(&self) -> SyncHandle {
        spawn_sync(self.repos.clone(), self.auth.clone())
    }

    /// Load everything the current session needs, in order: account list,
    /// then transfers and balance of the selection, plus the user profile.
    pub async fn load_session(&self) {
        self.repos.request_repos().await;
        futures::join!(self.repos.refresh_selection(), self.user.request_user_info());
    }

    /// Log out and forget all cached data.
    pub fn logout(&self) {
        self.auth.logout();
        self.repos.reset();
        self.user.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::MemoryTokenStorage;
    use crate::testing::{repo, Call, MockApi};

    fn app_with(api: Arc<MockApi>) -> App {
        let auth = Arc::new(AuthStore::new(Arc::new(MemoryTokenStorage::default())));
        auth.set_token("t".to_string());
        App::with_api(ClientConfig::default(), auth, api)
    }

    #[tokio::test]
    async fn test_load_session_fetches_repos_first() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        let app = app_with(api.clone());

        app.load_session().await;

        let calls = api.calls();
        assert_eq!(calls[0], Call::Repos);
        assert!(calls.contains(&Call::AllTransfers));
        assert!(calls.contains(&Call::UserBalance));
        assert!(calls.contains(&Call::Profile));
        assert_eq!(app.repos.repos().len(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let api = Arc::new(MockApi::with_repos(vec![repo(1, "Cash")]));
        let app = app_with(api);
        app.load_session().await;

        app.logout();

        assert!(!app.auth.is_authenticated());
        assert!(app.repos.repos().is_empty());
        assert!(app.user.user_info().is_empty());
    }
}
