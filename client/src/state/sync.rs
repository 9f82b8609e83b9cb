//! # Sync Task
//!
//! The standing reactive rule of the client: whenever the authenticated flag
//! or the selection changes, and the user is authenticated, refetch the
//! transfers and balance of the selection.
//!
//! - logging in fetches the repo list first, then the selection
//! - logging out aborts in-flight refreshes and resets the store
//!
//! Every refresh runs as its own task inside a `JoinSet` owned by the sync
//! loop, so dropping the [`SyncHandle`] tears down the loop and all of its
//! in-flight requests at once.

use std::sync::Arc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info};

use crate::services::auth::AuthStore;
use crate::state::repos::RepoStore;

/// Owner of the running sync task. Dropping it stops the task.
#[derive(Debug)]
pub struct SyncHandle {
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Stop the task now.
    pub fn shutdown(self) {
        // Drop does the work
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start the sync task on the current tokio runtime.
pub fn spawn_sync(store: Arc<RepoStore>, auth: Arc<AuthStore>) -> SyncHandle {
    let task = tokio::spawn(run(store, auth));
    SyncHandle { task }
}

async fn run(store: Arc<RepoStore>, auth: Arc<AuthStore>) {
    let mut token_rx = auth.subscribe();
    let mut selection_rx = store.subscribe_selection();
    let mut in_flight: JoinSet<()> = JoinSet::new();

    let mut authenticated = token_rx.borrow_and_update().is_some();
    selection_rx.borrow_and_update();
    if authenticated {
        spawn_session_load(&mut in_flight, &store);
    }
    info!(authenticated, "Sync task started");

    loop {
        tokio::select! {
            changed = token_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let now = token_rx.borrow_and_update().is_some();
                match (authenticated, now) {
                    (false, true) => {
                        debug!("Authenticated, loading session data");
                        spawn_session_load(&mut in_flight, &store);
                    }
                    (true, false) => {
                        debug!("Logged out, resetting store");
                        in_flight.abort_all();
                        store.reset();
                    }
                    (true, true) => spawn_refresh(&mut in_flight, &store),
                    (false, false) => {}
                }
                authenticated = now;
            }
            changed = selection_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let selection = selection_rx.borrow_and_update().clone();
                if authenticated {
                    debug!(selection = %selection, "Selection changed, refreshing");
                    spawn_refresh(&mut in_flight, &store);
                }
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(e) = joined {
                    if e.is_panic() {
                        error!(error = %e, "Refresh task panicked");
                    }
                }
            }
        }
    }

    debug!("Sync task stopped");
}

fn spawn_refresh(in_flight: &mut JoinSet<()>, store: &Arc<RepoStore>) {
    let store = Arc::clone(store);
    in_flight.spawn(async move { store.refresh_selection().await });
}

fn spawn_session_load(in_flight: &mut JoinSet<()>, store: &Arc<RepoStore>) {
    let store = Arc::clone(store);
    in_flight.spawn(async move {
        store.request_repos().await;
        store.refresh_selection().await;
    });
}
