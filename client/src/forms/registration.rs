//! # Registration Form
//!
//! Registers a user, then logs in with the same credentials. A failed
//! follow-up login is not an error: the account exists, so the caller is
//! told to show the login form instead.

use shared::{LoginRequest, RegistrationRequest};
use tracing::{info, warn};

use super::validation::{
    validate_email, validate_min_length, validate_passwords_match, validate_required,
};
use super::{FieldErrors, FormStatus};
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;
use crate::services::auth::AuthStore;

const NAME_MIN: usize = 2;
const USERNAME_MIN: usize = 3;
const PASSWORD_MIN: usize = 8;

/// What to show after a successful registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Registered and logged in
    LoggedIn,
    /// Registered, but the automatic login failed
    SwitchToLogin,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    pub password_confirm: String,
    pub status: FormStatus,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> std::result::Result<RegistrationRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("first_name", validate_min_length("First name", &self.first_name, NAME_MIN));
        errors.check("last_name", validate_min_length("Last name", &self.last_name, NAME_MIN));
        errors.check("email", validate_email(self.email.trim()));
        errors.check("username", validate_min_length("Username", &self.username, USERNAME_MIN));
        errors.check("password", validate_min_length("Password", &self.password, PASSWORD_MIN));

        let confirm = validate_required("Password confirmation", &self.password_confirm);
        if confirm.is_valid {
            errors.check(
                "password_confirm",
                validate_passwords_match(&self.password, &self.password_confirm),
            );
        } else {
            errors.check("password_confirm", confirm);
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RegistrationRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        })
    }

    #[tracing::instrument(skip_all, fields(username = %self.username))]
    pub async fn submit(&mut self, api: &dyn ApiService, auth: &AuthStore) -> Result<RegistrationOutcome> {
        self.status.ensure_idle()?;
        let request = self.validate().map_err(|e| self.status.reject(e))?;

        self.status.begin();
        if let Err(e) = api.register(&request).await {
            warn!(error = %e, "Registration failed");
            self.status.fail(e.to_string());
            return Err(AppError::Api(e));
        }
        info!("Registration successful, logging in");

        let credentials = LoginRequest {
            username: request.username,
            password: request.password,
        };
        let outcome = match auth.login(api, &credentials).await {
            Ok(()) => RegistrationOutcome::LoggedIn,
            Err(e) => {
                warn!(error = %e, "Automatic login after registration failed");
                RegistrationOutcome::SwitchToLogin
            }
        };

        // Clears the fields and the submitting flag
        *self = Self::default();
        Ok(outcome)
    }
}
