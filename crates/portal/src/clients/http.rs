//! HTTP client with request interceptors.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use common::{AppError, AppResult};

use crate::auth::HttpInterceptor;

/// Wraps `reqwest::Client` and runs every registered interceptor, in
/// order, on each request before it is sent.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
}

impl HttpClient {
    /// Create a client with the given per-request timeout.
    pub fn new(timeout: Duration) -> AppResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            interceptors: Vec::new(),
        })
    }

    /// Register an interceptor. Interceptors run in registration order.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Start building a request.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client.request(method, url)
    }

    /// Build the request, run the interceptors and send it.
    pub async fn execute(&self, builder: RequestBuilder) -> AppResult<Response> {
        let mut request = builder.build()?;
        self.intercept(&mut request);

        debug!(method = %request.method(), url = %request.url(), "Sending request");
        let response = self.client.execute(request).await?;
        debug!(status = %response.status(), "Received response");

        Ok(response)
    }

    /// Run the interceptor chain on a built request.
    pub fn intercept(&self, request: &mut Request) {
        for interceptor in &self.interceptors {
            interceptor.intercept(request);
        }
    }
}

/// Decode a JSON body, mapping non-success statuses to errors.
pub async fn handle_response<T: DeserializeOwned>(response: Response) -> AppResult<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AppError::from_status(status, body));
    }

    Ok(serde_json::from_str(&body)?)
}
