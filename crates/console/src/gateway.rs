//! Single choke point for every backend HTTP call.
//!
//! The gateway attaches the session's bearer token, classifies the HTTP
//! outcome into an [`ApiError`], and hands successful bodies back as raw
//! JSON for the repositories to normalize. It never retries.
//!
//! # API Reference
//!
//! - Base URL: configured via `ORDERDESK_API_URL` (e.g. `http://localhost:5000/admin/api`)
//! - Authentication: `Authorization: Bearer <token>` on every call except login

use std::sync::Arc;

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::config::{ConsoleConfig, Credentials};
use crate::error::ApiError;
use crate::session::Session;

/// Login endpoint, relative to the API base URL.
const LOGIN_PATH: &str = "auth/login";

/// Keys that may carry the token in a login response, in lookup order.
const TOKEN_KEYS: &[&str] = &["token", "access_token", "accessToken"];

/// Request body for the login endpoint.
#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// HTTP gateway to the backend admin API.
#[derive(Clone)]
pub struct ApiGateway {
    inner: Arc<ApiGatewayInner>,
}

struct ApiGatewayInner {
    client: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiGateway {
    /// Create a gateway for the configured backend using the given session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client fails to build.
    pub fn new(config: &ConsoleConfig, session: Session) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            inner: Arc::new(ApiGatewayInner {
                client,
                base_url: config.api_url.clone(),
                session,
            }),
        })
    }

    /// The session this gateway authenticates with.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Exchange credentials for a bearer token and store it in the session.
    ///
    /// This is the only call sent without an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` for rejected credentials,
    /// `ApiError::Decode` if the response carries no token, and the usual
    /// HTTP/transport errors otherwise.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let body = LoginRequest {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        };
        let request = self
            .inner
            .client
            .post(self.url(LOGIN_PATH)?)
            .json(&body);

        let response = self.dispatch(request, None).await?;
        let token = extract_token(&response).ok_or_else(|| {
            ApiError::Decode("login response did not contain a token".to_string())
        })?;

        self.inner.session.set_token(token).await;
        Ok(())
    }

    /// End the session locally.
    pub async fn logout(&self) {
        self.inner.session.clear_token().await;
    }

    // =========================================================================
    // Request Execution
    // =========================================================================

    /// Send an authenticated JSON request and return the decoded body.
    ///
    /// Without a session token the call fails fast and nothing is sent. An
    /// empty 2xx body decodes to `Value::Null`.
    ///
    /// # Errors
    ///
    /// - `ApiError::Unauthorized` if there is no token or the server answers 401
    ///   (the session is cleared in that case)
    /// - `ApiError::Http` for any other non-2xx status
    /// - `ApiError::Transport` if no response was received
    /// - `ApiError::Decode` if a 2xx body is not valid JSON
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let Some(token) = self.inner.session.token().await else {
            warn!("No session token; refusing to send request");
            return Err(ApiError::Unauthorized);
        };

        let mut request = self
            .inner
            .client
            .request(method, self.url(path)?)
            .bearer_auth(token.expose_secret());
        if let Some(body) = body {
            request = request.json(body);
        }

        self.dispatch(request, Some(&token)).await
    }

    /// Execute a GET request.
    pub(crate) async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, None).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let body = to_json(body)?;
        self.request(Method::POST, path, Some(&body)).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let body = to_json(body)?;
        self.request(Method::PUT, path, Some(&body)).await
    }

    /// Execute a DELETE request.
    pub(crate) async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    /// Resolve a resource path against the base URL.
    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::Decode(format!("invalid request path {path}: {e}")))
    }

    /// Send a prepared request and classify the outcome.
    async fn dispatch(
        &self,
        request: reqwest::RequestBuilder,
        sent_token: Option<&SecretString>,
    ) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Request failed before a response arrived");
            ApiError::Transport(e)
        })?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Server rejected the session token");
            match sent_token {
                Some(token) => {
                    self.inner.session.invalidate(token).await;
                }
                None => {
                    self.inner.session.clear_token().await;
                }
            }
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(error = %e, "Failed to read error response body");
                String::new()
            });
            warn!(status = status.as_u16(), "Server rejected request");
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), len = bytes.len(), "Request succeeded");

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            error!(error = %e, "Malformed JSON in success response");
            ApiError::Decode(e.to_string())
        })
    }
}

impl std::fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Serialize a request body.
fn to_json<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(format!("invalid request body: {e}")))
}

/// Find the bearer token in a login response.
///
/// Looks at the top level first, then inside a `data` envelope.
fn extract_token(response: &Value) -> Option<SecretString> {
    let from = |value: &Value| {
        TOKEN_KEYS
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str))
            .filter(|token| !token.is_empty())
            .map(SecretString::from)
    };
    from(response).or_else(|| response.get("data").and_then(from))
}
