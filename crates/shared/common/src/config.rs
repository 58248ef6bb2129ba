//! Client configuration loaded from environment variables.

use std::env;
use std::time::Duration;

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default route the guard sends unauthenticated users to
pub const DEFAULT_LOGIN_ROUTE: &str = "/login";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Portal client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub api_url: String,
    /// Route shown to users who fail the auth guard
    pub login_route: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables (and `.env`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_url: env::var("PORTAL_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            login_route: env::var("PORTAL_LOGIN_ROUTE")
                .unwrap_or_else(|_| DEFAULT_LOGIN_ROUTE.to_string()),
            request_timeout_secs: env::var("PORTAL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Override the backend URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Join an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
