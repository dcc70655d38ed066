//! In-memory session store.
//!
//! # Responsibilities
//! - Hold the currently signed-in user (or none)
//! - Notify listeners (nav bar, etc.) when the user changes
//!
//! # Design Decisions
//! - Lock-free reads via `ArcSwapOption`; guards read on every navigation
//! - Change notifications over a broadcast channel, lagging receivers just
//!   miss intermediate states

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::sync::broadcast;

use crate::auth::provider::{AuthProvider, User};

/// Current-user holder implementing [`AuthProvider`].
pub struct SessionStore {
    current: ArcSwapOption<User>,
    changes: broadcast::Sender<Option<Arc<User>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            current: ArcSwapOption::empty(),
            changes,
        }
    }

    /// Replace the current user after a login or token refresh.
    pub fn sign_in(&self, user: User) {
        tracing::info!(user = %user.email, admin = user.is_admin(), "Session established");
        let user = Arc::new(user);
        self.current.store(Some(Arc::clone(&user)));
        let _ = self.changes.send(Some(user));
    }

    /// Clear the session after logout or a failed refresh.
    pub fn sign_out(&self) {
        if self.current.swap(None).is_some() {
            tracing::info!("Session cleared");
            let _ = self.changes.send(None);
        }
    }

    /// Receive every user change from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Option<Arc<User>>> {
        self.changes.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for SessionStore {
    fn is_authenticated(&self) -> bool {
        self.current.load().is_some()
    }

    fn is_admin(&self) -> bool {
        self.current.load().as_deref().is_some_and(User::is_admin)
    }

    fn user(&self) -> Option<User> {
        self.current.load_full().map(|u| (*u).clone())
    }
}
