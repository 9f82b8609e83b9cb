//! # Auth Store
//!
//! Holds the bearer token and exposes the authenticated state.
//!
//! The token is the only piece of client state that survives a restart. It
//! is persisted through a [`TokenStorage`]; [`FileTokenStorage`] keeps it in a
//! plain file, [`MemoryTokenStorage`] keeps it for the life of the process.
//!
//! Authenticated state is published on a `tokio::sync::watch` channel so the
//! sync task can react to login and logout.

use parking_lot::Mutex;
use shared::LoginRequest;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::core::error::ApiError;
use crate::core::service::ApiService;

/// Token persistence failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Token file error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where the bearer token lives between sessions.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn store(&self, token: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// Stores the token in a single file, creating parent directories on demand.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn store(&self, token: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, token).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Keeps the token in memory only.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: Mutex<Option<String>>,
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.token.lock().clone())
    }

    fn store(&self, token: &str) -> Result<(), StorageError> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self.token.lock() = None;
        Ok(())
    }
}

/// Bearer token holder.
///
/// Authenticated means a token is present. There is no refresh or expiry
/// handling: the gateway calls [`AuthStore::logout`] on the first 401.
pub struct AuthStore {
    token: watch::Sender<Option<String>>,
    storage: Arc<dyn TokenStorage>,
}

impl AuthStore {
    /// Create the store, restoring a previously persisted token.
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        let initial = storage.load().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load persisted token, starting logged out");
            None
        });
        debug!(restored = initial.is_some(), "Auth store initialized");

        let (token, _) = watch::channel(initial);
        Self { token, storage }
    }

    /// Store without persistence, for tests and one-off sessions.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStorage::default()))
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }

    /// Watch token changes; `Some` means authenticated.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }

    /// Exchange credentials for a token and keep it.
    #[tracing::instrument(skip(self, api, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, api: &dyn ApiService, credentials: &LoginRequest) -> Result<(), ApiError> {
        let response = api.login(credentials).await?;
        self.set_token(response.token);
        info!("Login successful");
        Ok(())
    }

    /// Replace the current token and persist it.
    ///
    /// A persistence failure is logged; the session still proceeds with the
    /// in-memory token.
    pub fn set_token(&self, token: String) {
        if let Err(e) = self.storage.store(&token) {
            warn!(error = %e, "Failed to persist token");
        }
        self.token.send_replace(Some(token));
    }

    /// Drop the token. Subscribers are only notified if a token was present.
    pub fn logout(&self) {
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "Failed to clear persisted token");
        }
        if self.token.send_if_modified(|token| token.take().is_some()) {
            info!("Logged out");
        }
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
