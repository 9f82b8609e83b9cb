//! # Core Abstractions
//!
//! Core traits and error types shared by every layer of the client.
//!
//! ## Modules
//!
//! - **[`error`]**: Error types (`ApiError`, `AppError`, `Result<T>`)
//! - **[`service`]**: The `ApiService` trait the stores depend on
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use moneyrepo_client::core::service::ApiService;
//! use moneyrepo_client::services::api::ApiClient;
//! use moneyrepo_client::services::auth::AuthStore;
//!
//! // In production: the HTTP gateway
//! let auth = Arc::new(AuthStore::in_memory());
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::with_base_url("http://127.0.0.1:8000/api", auth));
//!
//! // In tests: a recording mock implementing the same trait
//! ```

pub mod error;
pub mod service;

pub use error::{ApiError, AppError, Result};
pub use service::ApiService;
