//! # Forms
//!
//! Form-driven CRUD components. Each form owns its field values as strings
//! (what a user typed), validates them locally, converts them to a wire
//! request, and calls the matching store or API operation.
//!
//! On failure the normalized message is kept in [`FormStatus::error`] and the
//! form stays open so the user can retry; on success the form closes.

pub mod account;
pub mod login;
pub mod registration;
pub mod transfer;
pub mod validation;

pub use account::AccountForm;
pub use login::LoginForm;
pub use registration::{RegistrationForm, RegistrationOutcome};
pub use transfer::TransferForm;

use crate::core::error::AppError;
use validation::ValidationResult;

/// Whether a form creates a new record or edits the one with the given id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Validation failure of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All validation failures of a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a validator for `field`
    pub fn check(&mut self, field: &'static str, result: ValidationResult) {
        if let Some(message) = result.error {
            self.push(field, message);
        }
    }

    /// Record the error side of a parse, returning the parsed value
    pub fn parsed<T>(&mut self, field: &'static str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.push(field, message);
                None
            }
        }
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First message recorded for `field`
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// All messages joined for a one-line display
    pub fn summary(&self) -> String {
        self.0
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Submission state shared by every form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormStatus {
    /// Message of the last failed submission
    pub error: Option<String>,
    /// Field errors of the last validation
    pub field_errors: FieldErrors,
    pub is_submitting: bool,
}

impl FormStatus {
    /// Reject a second submit while one is in flight
    pub(crate) fn ensure_idle(&self) -> Result<(), AppError> {
        if self.is_submitting {
            return Err(AppError::State("Submission already in progress".to_string()));
        }
        Ok(())
    }

    /// Keep the field errors and turn them into an error for the caller
    pub(crate) fn reject(&mut self, errors: FieldErrors) -> AppError {
        let err = AppError::Validation(errors.summary());
        self.field_errors = errors;
        err
    }

    pub(crate) fn begin(&mut self) {
        self.is_submitting = true;
        self.error = None;
        self.field_errors = FieldErrors::default();
    }

    pub(crate) fn succeed(&mut self) {
        self.is_submitting = false;
        self.error = None;
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.is_submitting = false;
        self.error = Some(message.into());
    }
}
