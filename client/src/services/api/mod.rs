//! # Money-Repo API Client Module
//!
//! HTTP gateway for the money-repo REST API.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs        - Module exports and documentation
//! ├── client.rs     - ApiClient struct, request helpers, error policy
//! ├── auth.rs       - Login and registration (unauthenticated)
//! ├── profile.rs    - Current user profile
//! ├── repos.rs      - Money repo CRUD
//! ├── transfers.rs  - Transfer CRUD and listings
//! └── balance.rs    - Balance snapshots
//! ```
//!
//! ## Error Policy
//!
//! | Response            | Reads                  | Writes              |
//! |---------------------|------------------------|---------------------|
//! | 2xx                 | decoded body           | decoded body        |
//! | 404                 | empty value            | `ApiError::NotFound`|
//! | 401                 | logout + `Unauthorized`| same                |
//! | 403 / 500 / other   | normalized `ApiError`  | same                |
//! | no response         | `ApiError::Network`    | same                |

pub mod auth;
pub mod balance;
pub mod client;
pub mod profile;
pub mod repos;
pub mod transfers;

pub use client::ApiClient;
