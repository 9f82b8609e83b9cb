/// Validation utilities for user input

use chrono::NaiveDate;

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Validate that a field is not blank
pub fn validate_required(label: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::err(format!("{} is required", label));
    }
    ValidationResult::ok()
}

/// Validate a required field with a minimum length (in characters)
pub fn validate_min_length(label: &str, value: &str, min: usize) -> ValidationResult {
    let required = validate_required(label, value);
    if !required.is_valid {
        return required;
    }

    if value.trim().chars().count() < min {
        return ValidationResult::err(format!("{} must be at least {} characters", label, min));
    }

    ValidationResult::ok()
}

/// Validate email format
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return ValidationResult::err("Email is required");
    }

    if !email.contains('@') {
        return ValidationResult::err("Invalid email format");
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return ValidationResult::err("Invalid email format");
    }

    if parts[0].is_empty() {
        return ValidationResult::err("Email username cannot be empty");
    }

    if parts[1].is_empty() || !parts[1].contains('.') {
        return ValidationResult::err("Invalid email domain");
    }

    ValidationResult::ok()
}

/// Validate that both password fields match
pub fn validate_passwords_match(password: &str, confirm: &str) -> ValidationResult {
    if password != confirm {
        return ValidationResult::err("Passwords do not match");
    }
    ValidationResult::ok()
}

/// Validate a number against a lower bound (inclusive)
pub fn validate_min_value(label: &str, value: f64, min: f64) -> ValidationResult {
    if value < min {
        return ValidationResult::err(format!("{} must be at least {}", label, min));
    }
    ValidationResult::ok()
}

/// Validate an ISO 4217 currency code (three ASCII letters)
pub fn validate_currency_code(code: &str) -> ValidationResult {
    let code = code.trim();
    if code.is_empty() {
        return ValidationResult::err("Currency is required");
    }
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return ValidationResult::err("Currency must be a three-letter code");
    }
    ValidationResult::ok()
}

/// Parse a user-entered amount. Accepts `.` or `,` as decimal separator.
pub fn parse_amount(label: &str, text: &str) -> Result<f64, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(format!("{} is required", label));
    }

    let normalized = text.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("{} must be a number", label)),
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(label: &str, text: &str) -> Result<NaiveDate, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err(format!("{} is required", label));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| format!("{} must be a date (YYYY-MM-DD)", label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("test@example.com").is_valid);
        assert!(validate_email("user@domain.co.uk").is_valid);
        assert!(!validate_email("").is_valid);
        assert!(!validate_email("invalid").is_valid);
        assert!(!validate_email("@example.com").is_valid);
        assert!(!validate_email("test@").is_valid);
    }

    #[test]
    fn test_min_length_validation() {
        assert!(validate_min_length("Username", "bob", 3).is_valid);
        assert!(!validate_min_length("Username", "bo", 3).is_valid);
        assert_eq!(
            validate_min_length("Username", "  ", 3).error.as_deref(),
            Some("Username is required")
        );
    }

    #[test]
    fn test_passwords_match() {
        assert!(validate_passwords_match("Secret123", "Secret123").is_valid);
        assert!(!validate_passwords_match("Secret123", "secret123").is_valid);
    }

    #[test]
    fn test_currency_code_validation() {
        assert!(validate_currency_code("EUR").is_valid);
        assert!(validate_currency_code("usd").is_valid);
        assert!(!validate_currency_code("EURO").is_valid);
        assert!(!validate_currency_code("E1R").is_valid);
        assert!(!validate_currency_code("").is_valid);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("Amount", "10"), Ok(10.0));
        assert_eq!(parse_amount("Amount", " 12,50 "), Ok(12.5));
        assert_eq!(parse_amount("Amount", "-3.25"), Ok(-3.25));
        assert!(parse_amount("Amount", "ten").is_err());
        assert!(parse_amount("Amount", "inf").is_err());
        assert_eq!(parse_amount("Amount", ""), Err("Amount is required".to_string()));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("Date", "2026-01-05"),
            Ok(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap())
        );
        assert!(parse_date("Date", "05.01.2026").is_err());
    }
}
