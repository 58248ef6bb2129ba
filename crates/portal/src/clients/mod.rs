//! HTTP clients for calling the backend.

mod http;
mod user_client;

pub use http::{handle_response, HttpClient};
pub use user_client::{TokenResponse, UserClient, UserService, REGISTER_PATH, TOKEN_PATH};

#[cfg(any(test, feature = "test-utils"))]
pub use user_client::MockUserService;
