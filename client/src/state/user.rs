//! # User Profile Store
//!
//! Caches the display info of the logged-in user. Fetched on demand.

use parking_lot::RwLock;
use shared::UserInfo;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::service::ApiService;

pub struct UserStore {
    api: Arc<dyn ApiService>,
    info: RwLock<UserInfo>,
}

impl UserStore {
    pub fn new(api: Arc<dyn ApiService>) -> Self {
        Self {
            api,
            info: RwLock::new(UserInfo::default()),
        }
    }

    /// Load the profile of the token's owner. Errors are logged and the
    /// cached profile is kept.
    #[tracing::instrument(skip(self))]
    pub async fn request_user_info(&self) {
        match self.api.get_user_profile().await {
            Ok(info) => {
                debug!(email = %info.email, "User info updated");
                *self.info.write() = info;
            }
            Err(e) if e.is_unauthorized() => debug!("Session expired, profile not loaded"),
            Err(e) => warn!(error = %e, "Failed to fetch user info"),
        }
    }

    pub fn user_info(&self) -> UserInfo {
        self.info.read().clone()
    }

    pub fn set_user_info(&self, info: UserInfo) {
        *self.info.write() = info;
    }

    /// "First Last", falling back to the email, then to an empty string
    pub fn display_name(&self) -> String {
        let info = self.info.read();
        let full = format!("{} {}", info.first_name, info.last_name);
        let full = full.trim();
        if full.is_empty() {
            info.email.clone()
        } else {
            full.to_string()
        }
    }

    pub fn clear(&self) {
        *self.info.write() = UserInfo::default();
    }
}
