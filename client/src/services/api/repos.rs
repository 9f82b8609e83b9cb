//! # Money Repo Endpoints
//!
//! List, create, update, and delete the current user's money repos.

use reqwest::Method;
use shared::{MoneyRepo, MoneyRepoRequest};

use super::client::ApiClient;
use crate::core::error::ApiError;

/// All repos of the current user; 404 yields an empty list.
#[tracing::instrument(skip(client))]
pub async fn get_user_repos(client: &ApiClient) -> Result<Vec<MoneyRepo>, ApiError> {
    let repos: Vec<MoneyRepo> = client.fetch("/money-repos/my", Vec::new).await?;
    tracing::debug!(count = repos.len(), "Fetched money repos");
    Ok(repos)
}

#[tracing::instrument(skip(client, repo), fields(repo_name = %repo.repo_name))]
pub async fn create_repo(client: &ApiClient, repo: &MoneyRepoRequest) -> Result<MoneyRepo, ApiError> {
    client.write(Method::POST, "/money-repos", Some(repo)).await
}

#[tracing::instrument(skip(client, repo))]
pub async fn update_repo(
    client: &ApiClient,
    repo_id: i64,
    repo: &MoneyRepoRequest,
) -> Result<MoneyRepo, ApiError> {
    client
        .write(Method::PUT, &format!("/money-repos/{}", repo_id), Some(repo))
        .await
}

#[tracing::instrument(skip(client))]
pub async fn delete_repo(client: &ApiClient, repo_id: i64) -> Result<(), ApiError> {
    client.remove(&format!("/money-repos/{}", repo_id)).await
}
