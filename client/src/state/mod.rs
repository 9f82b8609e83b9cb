//! # Client State
//!
//! Stores that mirror server-side data and the task that keeps them in sync.
//!
//! - **[`repos`]**: selection, repo list, transfers, balance
//! - **[`user`]**: profile of the logged-in user
//! - **[`sync`]**: refetch on selection or login changes
//!
//! State is kept behind `parking_lot::RwLock` and locked only for the copy
//! in or out, never across an `.await`.

pub mod repos;
pub mod sync;
pub mod user;

pub use repos::{RepoState, RepoStore, Selection};
pub use sync::{spawn_sync, SyncHandle};
pub use user::UserStore;
