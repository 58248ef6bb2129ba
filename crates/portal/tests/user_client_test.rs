//! HTTP tests for the user API client and the auth interceptor.
//!
//! A wiremock server stands in for the backend.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{AppError, ClientConfig};
use domain::UserRegistrationData;
use portal_lib::clients::{handle_response, REGISTER_PATH, TOKEN_PATH};
use portal_lib::{AuthInterceptor, AuthState, HttpClient, UserClient, UserService};

fn registration() -> UserRegistrationData {
    UserRegistrationData {
        user_name: "john_doe".to_string(),
        password: "secret1".to_string(),
        password_confirm: "secret1".to_string(),
        email: "john@example.com".to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
    }
}

fn create_client(server: &MockServer, auth: Arc<AuthState>) -> (HttpClient, UserClient) {
    let http = HttpClient::new(Duration::from_secs(5))
        .unwrap()
        .with_interceptor(Arc::new(AuthInterceptor::new(auth)));
    let config = ClientConfig::default().with_api_url(server.uri());
    (http.clone(), UserClient::new(http, config))
}

/// Fails the test if a request carrying credentials reaches `route`.
async fn forbid_credentials(server: &MockServer, route: &str) {
    Mock::given(path(route.to_string()))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_register_posts_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REGISTER_PATH))
        .and(body_json(json!({
            "userName": "john_doe",
            "password": "secret1",
            "passwordConfirm": "secret1",
            "email": "john@example.com",
            "firstName": "John",
            "lastName": "Doe"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Succeeded": true,
            "Errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, client) = create_client(&server, Arc::new(AuthState::new()));
    let response = client.register_user(&registration()).await.unwrap();

    assert!(response.succeeded);
}

#[tokio::test]
async fn test_register_never_sends_credentials() {
    let server = MockServer::start().await;
    forbid_credentials(&server, REGISTER_PATH).await;

    Mock::given(method("POST"))
        .and(path(REGISTER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Succeeded": false,
            "Errors": ["Name john_doe is already taken."]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, client) = create_client(&server, Arc::new(AuthState::with_token("abc")));
    let response = client.register_user(&registration()).await.unwrap();

    assert!(!response.succeeded);
    assert_eq!(response.first_error(), Some("Name john_doe is already taken."));
}

#[tokio::test]
async fn test_register_reads_errors_from_bad_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REGISTER_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "Succeeded": false,
            "Errors": ["Passwords must have at least one digit."]
        })))
        .mount(&server)
        .await;

    let (_, client) = create_client(&server, Arc::new(AuthState::new()));
    let response = client.register_user(&registration()).await.unwrap();

    assert_eq!(
        response.first_error(),
        Some("Passwords must have at least one digit.")
    );
}

#[tokio::test]
async fn test_register_rejects_invalid_payload_locally() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_, client) = create_client(&server, Arc::new(AuthState::new()));
    let data = UserRegistrationData {
        password_confirm: "secret2".to_string(),
        ..registration()
    };

    let result = client.register_user(&data).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_register_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(REGISTER_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let (_, client) = create_client(&server, Arc::new(AuthState::new()));
    let result = client.register_user(&registration()).await;

    assert!(matches!(result, Err(AppError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn test_authenticate_uses_password_grant() {
    let server = MockServer::start().await;
    forbid_credentials(&server, TOKEN_PATH).await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=john_doe"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "jwt-token",
            "token_type": "bearer",
            "expires_in": 86399
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_, client) = create_client(&server, Arc::new(AuthState::with_token("stale")));
    let token = client.authenticate("john_doe", "secret1").await.unwrap();

    assert_eq!(token.access_token, "jwt-token");
    assert_eq!(token.expires_in, 86399);
}

#[tokio::test]
async fn test_authenticate_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let (_, client) = create_client(&server, Arc::new(AuthState::new()));
    let result = client.authenticate("john_doe", "wrong").await;

    assert!(matches!(result, Err(AppError::Api { status: 400, .. })));
}

#[tokio::test]
async fn test_interceptor_attaches_token_to_other_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/GetUserClaims"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"UserName": "john_doe"})))
        .expect(1)
        .mount(&server)
        .await;

    let (http, _) = create_client(&server, Arc::new(AuthState::with_token("abc")));
    let request = http.request(Method::GET, &format!("{}/api/GetUserClaims", server.uri()));
    let response = http.execute(request).await.unwrap();
    let claims: serde_json::Value = handle_response(response).await.unwrap();

    assert_eq!(claims["UserName"], "john_doe");
}

#[tokio::test]
async fn test_request_without_token_is_unauthorized() {
    let server = MockServer::start().await;
    forbid_credentials(&server, "/api/GetUserClaims").await;

    Mock::given(method("GET"))
        .and(path("/api/GetUserClaims"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (http, _) = create_client(&server, Arc::new(AuthState::new()));
    let request = http.request(Method::GET, &format!("{}/api/GetUserClaims", server.uri()));
    let response = http.execute(request).await.unwrap();
    let result: Result<serde_json::Value, _> = handle_response(response).await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
}
