//! # Services Module
//!
//! External integrations of the finance client.
//!
//! ```text
//! services/
//! ├── api/     - HTTP gateway for the money-repo API
//! └── auth.rs  - Bearer token store and its persistence
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Stores / Forms                       │
//! │                                                         │
//! │  ┌──────────────────┐  token   ┌──────────────────┐     │
//! │  │  ApiClient       │ ───────▶ │  AuthStore       │     │
//! │  │  (api/)          │ ◀─────── │  (auth.rs)       │     │
//! │  └────────┬─────────┘  logout  └────────┬─────────┘     │
//! │           │                             │               │
//! └───────────┼─────────────────────────────┼───────────────┘
//!             │ HTTP/JSON                   │
//!             ▼                             ▼
//! ┌─────────────────────────┐    ┌──────────────────────────┐
//! │  money-repo API         │    │  TokenStorage            │
//! │                         │    │  (file or memory)        │
//! │  /login_check           │    └──────────────────────────┘
//! │  /register              │
//! │  /users/my-info         │
//! │  /money-repos/*         │
//! └─────────────────────────┘
//! ```
//!
//! The auth store never calls the network itself except through the
//! `ApiService` passed to [`auth::AuthStore::login`], so there is no
//! ownership cycle between the two.

pub mod api;
pub mod auth;
