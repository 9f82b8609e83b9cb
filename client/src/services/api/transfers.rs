//! # Transfer Endpoints
//!
//! Transfers are always addressed through their owning repo, except for the
//! all-repos listing.

use reqwest::Method;
use shared::{Transfer, TransferRequest};

use super::client::ApiClient;
use crate::core::error::ApiError;

/// Transfers of one repo; 404 yields an empty list.
#[tracing::instrument(skip(client))]
pub async fn get_repo_transfers(client: &ApiClient, repo_id: i64) -> Result<Vec<Transfer>, ApiError> {
    client
        .fetch(&format!("/money-repos/{}/transfers", repo_id), Vec::new)
        .await
}

/// Transfers across all repos; 404 yields an empty list.
#[tracing::instrument(skip(client))]
pub async fn get_all_transfers(client: &ApiClient) -> Result<Vec<Transfer>, ApiError> {
    client.fetch("/money-repos/transfers", Vec::new).await
}

#[tracing::instrument(skip(client, transfer), fields(amount = %transfer.amount, kind = %transfer.transfer_type))]
pub async fn create_transfer(
    client: &ApiClient,
    repo_id: i64,
    transfer: &TransferRequest,
) -> Result<Transfer, ApiError> {
    client
        .write(
            Method::POST,
            &format!("/money-repos/{}/transfers", repo_id),
            Some(transfer),
        )
        .await
}

#[tracing::instrument(skip(client, transfer))]
pub async fn update_transfer(
    client: &ApiClient,
    repo_id: i64,
    transfer_id: i64,
    transfer: &TransferRequest,
) -> Result<Transfer, ApiError> {
    client
        .write(
            Method::PUT,
            &format!("/money-repos/{}/transfers/{}", repo_id, transfer_id),
            Some(transfer),
        )
        .await
}

#[tracing::instrument(skip(client))]
pub async fn delete_transfer(client: &ApiClient, repo_id: i64, transfer_id: i64) -> Result<(), ApiError> {
    client
        .remove(&format!("/money-repos/{}/transfers/{}", repo_id, transfer_id))
        .await
}
