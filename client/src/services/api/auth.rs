//! # Authentication Endpoints
//!
//! Login and registration. Both are unauthenticated and never trigger the
//! 401 logout: a rejected login is just a failed login.

use shared::{LoginRequest, LoginResponse, RegistrationRequest, RegistrationResponse};

use super::client::{decode, read_error_body, ApiClient};
use crate::core::error::ApiError;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";
const REGISTRATION_FAILED: &str = "Registration failed";
const REGISTRATION_CONFLICT: &str = "Username or email address is already taken";
const REGISTRATION_INVALID: &str = "Invalid input data";

/// Login with username and password.
#[tracing::instrument(skip(client, credentials), fields(username = %credentials.username))]
pub async fn login(client: &ApiClient, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let response = client
        .send(client.client.post(client.url("/login_check")).json(credentials))
        .await?;

    let status = response.status();
    let duration = start.elapsed();

    if status.is_success() {
        let result = decode::<LoginResponse>(response).await;
        if result.is_ok() {
            tracing::info!(duration_ms = duration.as_millis(), "Login accepted");
        }
        result
    } else {
        let body = read_error_body(response).await;
        tracing::warn!(
            status = status.as_u16(),
            error = ?body.message,
            duration_ms = duration.as_millis(),
            "Login failed"
        );
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message: body.message.unwrap_or_else(|| LOGIN_FAILED.to_string()),
        })
    }
}

/// Register a new user.
#[tracing::instrument(skip(client, data), fields(username = %data.username))]
pub async fn register(
    client: &ApiClient,
    data: &RegistrationRequest,
) -> Result<RegistrationResponse, ApiError> {
    let response = client
        .send(client.client.post(client.url("/register")).json(data))
        .await?;

    let status = response.status();
    if status.is_success() {
        return decode(response).await;
    }

    let body = read_error_body(response).await;
    let err = registration_error(status.as_u16(), body.message);
    tracing::warn!(status = status.as_u16(), error = %err, "Registration failed");
    Err(err)
}

/// Registration-specific error messages.
pub(crate) fn registration_error(status: u16, server_message: Option<String>) -> ApiError {
    let message = match status {
        409 => REGISTRATION_CONFLICT.to_string(),
        422 => server_message.unwrap_or_else(|| REGISTRATION_INVALID.to_string()),
        _ => server_message.unwrap_or_else(|| REGISTRATION_FAILED.to_string()),
    };
    ApiError::Rejected { status, message }
}
