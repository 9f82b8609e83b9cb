//! # Login Form

use shared::LoginRequest;
use tracing::warn;

use super::validation::validate_required;
use super::{FieldErrors, FormStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::services::auth::AuthStore;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub status: FormStatus,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> std::result::Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("username", validate_required("Username", &self.username));
        errors.check("password", validate_required("Password", &self.password));

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }

    /// Log in and keep the token. The fields are cleared on success.
    pub async fn submit(&mut self, auth: &AuthStore, api: &dyn ApiService) -> Result<()> {
        self.status.ensure_idle()?;
        let request = self.validate().map_err(|e| self.status.reject(e))?;

        self.status.begin();
        match auth.login(api, &request).await {
            Ok(()) => {
                self.status.succeed();
                self.username.clear();
                self.password.clear();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Login form submission failed");
                self.status.fail(e.to_string());
                Err(AppError::Api(e))
            }
        }
    }
}
