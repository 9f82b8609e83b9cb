//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the finance client and the
//! money-repo REST API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login and registration DTOs
//!   - **[`dto::user`]**: Current user profile
//!   - **[`dto::repo`]**: Money repositories (accounts)
//!   - **[`dto::transfer`]**: Income/expense transfers
//!   - **[`dto::balance`]**: Balance snapshots
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::currency_symbol`]**: Look up the display symbol of an ISO currency code
//!   - **[`utils::format_currency`]**: Format an amount for display (`1.234,56 €`)
//!   - **[`utils::format_amount`]**: Format an amount for the wire (`"1234.56"`)
//!
//! ## Wire Format
//!
//! The API speaks camelCase JSON:
//! - Rust fields are snake_case and renamed with `#[serde(rename_all = "camelCase")]`
//! - Amounts are read from either JSON numbers or numeric strings
//! - Amounts are written as strings with two decimals
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::auth::{LoginRequest, LoginResponse};
//!
//! let request = LoginRequest {
//!     username: "alice".to_string(),
//!     password: "secret".to_string(),
//! };
//! let body = serde_json::to_string(&request).unwrap();
//! assert_eq!(body, r#"{"username":"alice","password":"secret"}"#);
//!
//! let response: LoginResponse = serde_json::from_str(r#"{"token":"jwt"}"#).unwrap();
//! assert_eq!(response.token, "jwt");
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
