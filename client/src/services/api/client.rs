//! # API Client
//!
//! Main HTTP client for money-repo API communication.
//!
//! Endpoint functions live in the sibling modules and share the request
//! helpers defined here: bearer header injection, 404-as-empty for reads,
//! logout on 401, and error normalization.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::ErrorResponse;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, warn};

use crate::config::ClientConfig;
use crate::core::error::ApiError;
use crate::core::service::ApiService;
use crate::services::auth::AuthStore;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS);

/// HTTP client for the money-repo API.
///
/// Holds the auth store so that every call can attach the current bearer
/// token and so that a 401 can log the user out.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    auth: Arc<AuthStore>,
}

impl ApiClient {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig, auth: Arc<AuthStore>) -> Self {
        Self::build(&config.api_base_url, config.request_timeout, auth)
    }

    /// Create a client for the given base URL with the default timeout.
    pub fn with_base_url(base_url: impl AsRef<str>, auth: Arc<AuthStore>) -> Self {
        Self::build(base_url.as_ref(), DEFAULT_TIMEOUT, auth)
    }

    fn build(base_url: &str, timeout: Duration, auth: Arc<AuthStore>) -> Self {
        // Timeout so a dead server cannot stall a store refresh forever
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth(&self) -> &Arc<AuthStore> {
        &self.auth
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request with the bearer header of the current token.
    pub(crate) fn authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match self.auth.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request, mapping transport failures.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        request.send().await.map_err(|e| {
            error!(error = %e, "Network error");
            ApiError::Network(e.to_string())
        })
    }

    /// Authenticated GET whose 404 resolves to `empty()`.
    pub(crate) async fn fetch<T, F>(&self, path: &str, empty: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let response = self.send(self.authorized(Method::GET, path)).await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            warn!(path, "404 Not Found, using empty result");
            return Ok(empty());
        }
        if !status.is_success() {
            return Err(self.error_for(response).await);
        }
        decode(response).await
    }

    /// Authenticated write with an optional JSON body and a JSON response.
    pub(crate) async fn write<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.authorized(method, path);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(self.error_for(response).await);
        }
        decode(response).await
    }

    /// Authenticated DELETE; the response body is ignored.
    pub(crate) async fn remove(&self, path: &str) -> Result<(), ApiError> {
        let response = self.send(self.authorized(Method::DELETE, path)).await?;
        if !response.status().is_success() {
            return Err(self.error_for(response).await);
        }
        Ok(())
    }

    /// Normalize an unsuccessful response. A 401 logs the user out.
    pub(crate) async fn error_for(&self, response: Response) -> ApiError {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("401 Unauthorized, dropping session");
            self.auth.logout();
        }

        let body = read_error_body(response).await;
        let err = ApiError::from_status(status.as_u16(), status.canonical_reason(), body.message);
        match status.as_u16() {
            401 => {}
            403 => error!("403 Forbidden - Insufficient permissions"),
            404 => error!("404 Not Found - Resource does not exist"),
            500 => error!("500 Internal Server Error - Server error occurred"),
            code => error!(status = code, error = %err, "HTTP error"),
        }
        err
    }
}

/// Parse a JSON success body.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|e| {
        error!(error = %e, "Response parse error");
        ApiError::Decode(e.to_string())
    })
}

/// Parse an error body, tolerating empty or non-JSON bodies.
pub(crate) async fn read_error_body(response: Response) -> ErrorResponse {
    let text = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorResponse>(&text).unwrap_or_default()
}

// Implement ApiService trait for ApiClient
#[async_trait::async_trait]
impl ApiService for ApiClient {
    async fn login(&self, credentials: &shared::LoginRequest) -> Result<shared::LoginResponse, ApiError> {
        crate::services::api::auth::login(self, credentials).await
    }

    async fn register(
        &self,
        data: &shared::RegistrationRequest,
    ) -> Result<shared::RegistrationResponse, ApiError> {
        crate::services::api::auth::register(self, data).await
    }

    async fn get_user_profile(&self) -> Result<shared::UserInfo, ApiError> {
        crate::services::api::profile::get_user_profile(self).await
    }

    async fn get_user_repos(&self) -> Result<Vec<shared::MoneyRepo>, ApiError> {
        crate::services::api::repos::get_user_repos(self).await
    }

    async fn create_repo(&self, repo: &shared::MoneyRepoRequest) -> Result<shared::MoneyRepo, ApiError> {
        crate::services::api::repos::create_repo(self, repo).await
    }

    async fn update_repo(
        &self,
        repo_id: i64,
        repo: &shared::MoneyRepoRequest,
    ) -> Result<shared::MoneyRepo, ApiError> {
        crate::services::api::repos::update_repo(self, repo_id, repo).await
    }

    async fn delete_repo(&self, repo_id: i64) -> Result<(), ApiError> {
        crate::services::api::repos::delete_repo(self, repo_id).await
    }

    async fn get_repo_transfers(&self, repo_id: i64) -> Result<Vec<shared::Transfer>, ApiError> {
        crate::services::api::transfers::get_repo_transfers(self, repo_id).await
    }

    async fn get_all_transfers(&self) -> Result<Vec<shared::Transfer>, ApiError> {
        crate::services::api::transfers::get_all_transfers(self).await
    }

    async fn create_transfer(
        &self,
        repo_id: i64,
        transfer: &shared::TransferRequest,
    ) -> Result<shared::Transfer, ApiError> {
        crate::services::api::transfers::create_transfer(self, repo_id, transfer).await
    }

    async fn update_transfer(
        &self,
        repo_id: i64,
        transfer_id: i64,
        transfer: &shared::TransferRequest,
    ) -> Result<shared::Transfer, ApiError> {
        crate::services::api::transfers::update_transfer(self, repo_id, transfer_id, transfer).await
    }

    async fn delete_transfer(&self, repo_id: i64, transfer_id: i64) -> Result<(), ApiError> {
        crate::services::api::transfers::delete_transfer(self, repo_id, transfer_id).await
    }

    async fn get_repo_balance(&self, repo_id: i64) -> Result<shared::Balance, ApiError> {
        crate::services::api::balance::get_repo_balance(self, repo_id).await
    }

    async fn get_user_balance(&self) -> Result<shared::Balance, ApiError> {
        crate::services::api::balance::get_user_balance(self).await
    }
}
