//! # Money-Repo Finance Client - Library Root
//!
//! Client for a personal-finance REST API: user accounts ("money repos"),
//! income/expense transfers, and balance snapshots.
//! This library crate contains all modules used by the binary crate (`main.rs`).
//!
//! ## Features
//!
//! - **Authentication**: Login, registration, persisted bearer token
//! - **Accounts**: Create, edit, and delete money repos
//! - **Transfers**: Income and expense entries per account
//! - **Balances**: Per-account or combined snapshots, change and history
//! - **Reactive Sync**: Selection and login changes refetch automatically
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              moneyrepo-client (this crate)             │
//! ├────────────────────────────────────────────────────────┤
//! │  forms    - validated input → CRUD calls               │
//! │  views    - balance change, history series             │
//! │  state    - RepoStore, UserStore, sync task            │
//! │  services - ApiClient (reqwest), AuthStore             │
//! └────────────────────────────────────────────────────────┘
//!                          │
//!                          │ HTTP/JSON (bearer token)
//!                          ▼
//!               ┌─────────────────────┐
//!               │   money-repo API    │
//!               └─────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: Wiring of config, auth, gateway, and stores
//! - **cli**: Command-line front end (clap)
//! - **config**: Environment-based configuration
//! - **core**: Error types and the `ApiService` trait
//! - **forms**: Login, registration, account, and transfer forms
//! - **logging**: Rolling file logs via `tracing`
//! - **services**: HTTP gateway and token store
//! - **state**: Reactive stores and the sync task
//! - **views**: Display computations
//!
//! ### Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   ├── cli ──▶ app
//!   │            ├── services::api (HTTP requests)
//!   │            ├── services::auth (token)
//!   │            └── state (stores, sync)
//!   │
//!   ├── forms ──▶ state / services
//!   └── views ──▶ state
//! ```
//!
//! ## Core Concepts
//!
//! ### Explicit Refresh
//!
//! Stores never patch their data locally after a write. Every successful
//! CRUD call refetches what it invalidated, so displayed data is always a
//! server response.
//!
//! ### State Management
//!
//! Store data lives behind `parking_lot::RwLock`:
//! - **Thread-safe**: Multiple readers, exclusive writers
//! - **Locked briefly**: Never held across an `.await`
//!
//! Selection and authentication are `tokio::sync::watch` channels; the sync
//! task (`state::sync`) listens to both.
//!
//! ## Usage
//!
//! ```bash
//! moneyrepo login alice
//! moneyrepo show --account Cash
//! moneyrepo interactive
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p moneyrepo-client
//! ```
//!
//! Unit tests use a recording in-memory `ApiService`; `tests/` runs the real
//! `ApiClient` against an axum mock server.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod forms;
pub mod logging;
pub mod services;
pub mod state;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types for convenience
pub use app::App;
pub use config::ClientConfig;
pub use core::{ApiError, ApiService, AppError, Result};
pub use services::api::ApiClient;
pub use services::auth::{AuthStore, FileTokenStorage, MemoryTokenStorage, TokenStorage};
pub use state::{spawn_sync, RepoStore, Selection, SyncHandle, UserStore};
