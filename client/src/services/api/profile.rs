//! # Profile Endpoint

use shared::UserInfo;

use super::client::ApiClient;
use crate::core::error::ApiError;

/// Profile of the current user. A missing profile (404) yields an empty one.
#[tracing::instrument(skip(client))]
pub async fn get_user_profile(client: &ApiClient) -> Result<UserInfo, ApiError> {
    client.fetch("/users/my-info", UserInfo::default).await
}
