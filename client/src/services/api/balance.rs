//! # Balance Endpoints
//!
//! A 404 yields the all-zero snapshot.

use shared::Balance;

use super::client::ApiClient;
use crate::core::error::ApiError;

#[tracing::instrument(skip(client))]
pub async fn get_repo_balance(client: &ApiClient, repo_id: i64) -> Result<Balance, ApiError> {
    client
        .fetch(&format!("/money-repos/{}/balance", repo_id), Balance::default)
        .await
}

#[tracing::instrument(skip(client))]
pub async fn get_user_balance(client: &ApiClient) -> Result<Balance, ApiError> {
    client.fetch("/money-repos/balance", Balance::default).await
}
