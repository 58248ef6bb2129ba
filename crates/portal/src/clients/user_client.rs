//! HTTP client for the user API.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use common::{AppError, AppResult, ClientConfig};
use domain::{RegistrationResponse, UserRegistrationData};

use super::http::{handle_response, HttpClient};
use crate::auth::{NO_AUTH_HEADER, NO_AUTH_VALUE};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Registration endpoint path
pub const REGISTER_PATH: &str = "/api/User/Register";

/// Token endpoint path
pub const TOKEN_PATH: &str = "/token";

/// Token response from the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: i64,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// User API operations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user
    async fn register_user(&self, data: &UserRegistrationData) -> AppResult<RegistrationResponse>;

    /// Exchange credentials for an access token
    async fn authenticate(&self, user_name: &str, password: &str) -> AppResult<TokenResponse>;
}

/// `UserService` backed by the HTTP API.
pub struct UserClient {
    http: HttpClient,
    config: ClientConfig,
}

impl UserClient {
    pub fn new(http: HttpClient, config: ClientConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl UserService for UserClient {
    #[instrument(skip(self, data), fields(user_name = %data.user_name))]
    async fn register_user(&self, data: &UserRegistrationData) -> AppResult<RegistrationResponse> {
        data.check()?;

        let request = self
            .http
            .request(Method::POST, &self.config.endpoint(REGISTER_PATH))
            .header(NO_AUTH_HEADER, NO_AUTH_VALUE)
            .json(data);

        let response = self.http.execute(request).await?;

        // Identity errors may come back as 400 with the usual body
        if response.status() == StatusCode::BAD_REQUEST {
            let body = response.text().await?;
            return match serde_json::from_str::<RegistrationResponse>(&body) {
                Ok(result) => Ok(result),
                Err(_) => Err(AppError::from_status(StatusCode::BAD_REQUEST, body)),
            };
        }

        let result: RegistrationResponse = handle_response(response).await?;
        debug!(succeeded = result.succeeded, "Registration response");
        Ok(result)
    }

    #[instrument(skip(self, password))]
    async fn authenticate(&self, user_name: &str, password: &str) -> AppResult<TokenResponse> {
        let request = self
            .http
            .request(Method::POST, &self.config.endpoint(TOKEN_PATH))
            .header(NO_AUTH_HEADER, NO_AUTH_VALUE)
            .form(&[
                ("username", user_name),
                ("password", password),
                ("grant_type", "password"),
            ]);

        let response = self.http.execute(request).await?;
        handle_response(response).await
    }
}
