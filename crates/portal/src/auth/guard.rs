//! Route guards.

use std::sync::Arc;

use tracing::{debug, warn};

use super::AuthState;

/// Decides whether navigation to a route may proceed.
pub trait CanActivate: Send + Sync {
    fn can_activate(&self, route: &str) -> bool;
}

/// Allows navigation only while a token is present.
pub struct AuthGuard {
    auth: Arc<AuthState>,
    login_route: String,
}

impl AuthGuard {
    pub fn new(auth: Arc<AuthState>, login_route: impl Into<String>) -> Self {
        Self {
            auth,
            login_route: login_route.into(),
        }
    }

    /// Route unauthenticated users should be sent to.
    pub fn login_route(&self) -> &str {
        &self.login_route
    }
}

impl CanActivate for AuthGuard {
    fn can_activate(&self, route: &str) -> bool {
        if self.auth.is_authenticated() {
            debug!(route, "Navigation allowed");
            return true;
        }

        warn!(route, login_route = %self.login_route, "Navigation blocked, sign-in required");
        false
    }
}

/// A route activates only if every guard allows it.
pub fn can_activate_all(guards: &[Arc<dyn CanActivate>], route: &str) -> bool {
    guards.iter().all(|guard| guard.can_activate(route))
}
