//! In-memory authentication state shared by the guard, the interceptor
//! and the sign-in flow.

use std::sync::{PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};

use domain::BEARER_TOKEN_PREFIX;

/// Holds the current access token, if any.
///
/// The token is wrapped in `SecretString` so it never shows up in debug
/// output or logs.
#[derive(Default)]
pub struct AuthState {
    token: RwLock<Option<SecretString>>,
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start out signed in with the given token.
    pub fn with_token(token: impl Into<String>) -> Self {
        let state = Self::new();
        state.set_token(token);
        state
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(SecretString::new(token.into()));
    }

    pub fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// `Authorization` header value for the current token.
    pub fn bearer(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|token| format!("{}{}", BEARER_TOKEN_PREFIX, token.expose_secret()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lifecycle() {
        let state = AuthState::new();
        assert!(!state.is_authenticated());
        assert_eq!(state.bearer(), None);

        state.set_token("abc123");
        assert!(state.is_authenticated());
        assert_eq!(state.bearer().as_deref(), Some("Bearer abc123"));

        state.clear();
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_debug_hides_token() {
        let state = AuthState::with_token("super-secret");
        let debug = format!("{:?}", state);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("authenticated: true"));
    }
}
