//! # Service Traits
//!
//! Traits for dependency injection, so the stores can run against the real
//! HTTP gateway or a recording mock in tests.

use async_trait::async_trait;
use shared::{
    Balance, LoginRequest, LoginResponse, MoneyRepo, MoneyRepoRequest, RegistrationRequest,
    RegistrationResponse, Transfer, TransferRequest, UserInfo,
};

use crate::core::error::ApiError;

/// Remote operations of the money-repo API.
///
/// Implementations apply the gateway error policy: read operations resolve a
/// 404 to an empty value, a 401 logs the user out, everything else surfaces
/// as [`ApiError`].
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Exchange credentials for a bearer token (unauthenticated)
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError>;

    /// Create a new user (unauthenticated)
    async fn register(&self, data: &RegistrationRequest) -> Result<RegistrationResponse, ApiError>;

    /// Profile of the current user
    async fn get_user_profile(&self) -> Result<UserInfo, ApiError>;

    /// All money repos of the current user
    async fn get_user_repos(&self) -> Result<Vec<MoneyRepo>, ApiError>;

    async fn create_repo(&self, repo: &MoneyRepoRequest) -> Result<MoneyRepo, ApiError>;

    async fn update_repo(&self, repo_id: i64, repo: &MoneyRepoRequest) -> Result<MoneyRepo, ApiError>;

    async fn delete_repo(&self, repo_id: i64) -> Result<(), ApiError>;

    /// Transfers of one repo
    async fn get_repo_transfers(&self, repo_id: i64) -> Result<Vec<Transfer>, ApiError>;

    /// Transfers across all repos of the current user
    async fn get_all_transfers(&self) -> Result<Vec<Transfer>, ApiError>;

    async fn create_transfer(&self, repo_id: i64, transfer: &TransferRequest) -> Result<Transfer, ApiError>;

    async fn update_transfer(
        &self,
        repo_id: i64,
        transfer_id: i64,
        transfer: &TransferRequest,
    ) -> Result<Transfer, ApiError>;

    async fn delete_transfer(&self, repo_id: i64, transfer_id: i64) -> Result<(), ApiError>;

    /// Balance snapshot of one repo
    async fn get_repo_balance(&self, repo_id: i64) -> Result<Balance, ApiError>;

    /// Balance snapshot across all repos
    async fn get_user_balance(&self) -> Result<Balance, ApiError>;
}
