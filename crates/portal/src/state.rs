//! Application state for dependency injection.

use std::sync::Arc;

use common::{AppResult, ClientConfig};

use crate::auth::{AuthGuard, AuthInterceptor, AuthState};
use crate::clients::{HttpClient, UserClient, UserService};
use crate::components::{SignInComponent, SignUpComponent, SubscribeComponent};
use crate::notify::Notifier;

/// Services shared by every controller, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub auth: Arc<AuthState>,
    pub user_service: Arc<dyn UserService>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create new app state from already-built services.
    pub fn new(
        config: ClientConfig,
        auth: Arc<AuthState>,
        user_service: Arc<dyn UserService>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            auth,
            user_service,
            notifier,
        }
    }

    /// Wire the HTTP stack: one client, the auth interceptor and the user
    /// API on top.
    pub fn from_config(config: ClientConfig, notifier: Arc<dyn Notifier>) -> AppResult<Self> {
        let auth = Arc::new(AuthState::new());
        let http = HttpClient::new(config.request_timeout())?
            .with_interceptor(Arc::new(AuthInterceptor::new(auth.clone())));
        let user_service = Arc::new(UserClient::new(http, config.clone()));

        Ok(Self::new(config, auth, user_service, notifier))
    }

    pub fn sign_up(&self) -> SignUpComponent {
        SignUpComponent::new(self.user_service.clone(), self.notifier.clone())
    }

    pub fn sign_in(&self) -> SignInComponent {
        SignInComponent::new(
            self.auth.clone(),
            self.user_service.clone(),
            self.notifier.clone(),
        )
    }

    pub fn subscribe(&self) -> SubscribeComponent {
        SubscribeComponent::new(self.notifier.clone())
    }

    pub fn auth_guard(&self) -> AuthGuard {
        AuthGuard::new(self.auth.clone(), self.config.login_route.clone())
    }
}
