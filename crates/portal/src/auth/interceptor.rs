//! Outgoing request interceptors.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::Request;
use tracing::{debug, warn};

use super::AuthState;

/// Marker header for requests that must go out without credentials.
/// It is stripped before the request leaves the client.
pub const NO_AUTH_HEADER: &str = "No-Auth";

/// Value of [`NO_AUTH_HEADER`] that enables the bypass.
pub const NO_AUTH_VALUE: &str = "True";

/// Hook applied to every request before it is sent.
pub trait HttpInterceptor: Send + Sync {
    fn intercept(&self, request: &mut Request);
}

/// Attaches `Authorization: Bearer <token>` to outgoing requests.
pub struct AuthInterceptor {
    auth: Arc<AuthState>,
}

impl AuthInterceptor {
    pub fn new(auth: Arc<AuthState>) -> Self {
        Self { auth }
    }
}

impl HttpInterceptor for AuthInterceptor {
    fn intercept(&self, request: &mut Request) {
        let headers = request.headers_mut();

        let skip = headers
            .remove(NO_AUTH_HEADER)
            .map(|marker| marker.as_bytes().eq_ignore_ascii_case(NO_AUTH_VALUE.as_bytes()))
            .unwrap_or(false);
        if skip {
            debug!(url = %request.url(), "Sending request without credentials");
            return;
        }

        let Some(bearer) = self.auth.bearer() else {
            return;
        };

        match HeaderValue::from_str(&bearer) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("Access token is not a valid header value, request sent without it"),
        }
    }
}
