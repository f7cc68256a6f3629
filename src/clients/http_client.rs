//! HTTP client for the Frank Energie GraphQL endpoint.
//!
//! This module provides the [`HttpClient`] type, which owns or borrows the
//! underlying `reqwest` session and posts JSON bodies to the configured
//! endpoint.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::{Endpoint, FrankEnergieConfig};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for posting requests to the GraphQL endpoint.
///
/// The client handles:
/// - Default headers including User-Agent and Accept
/// - The `Authorization: Bearer` header when a token is supplied
/// - The per-request timeout from configuration
/// - The session lifecycle: a session passed to [`with_session`](Self::with_session)
///   is borrowed and never closed here; otherwise a session is created on
///   first use and released by [`close`](Self::close)
///
/// Requests are never retried.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    /// The reqwest session, created lazily when owned.
    session: Mutex<Option<reqwest::Client>>,
    /// Whether `session` was created by this client.
    owns_session: bool,
    /// The GraphQL endpoint.
    endpoint: Endpoint,
    /// Per-request timeout.
    timeout: Duration,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client that opens its own session on first use.
    #[must_use]
    pub fn new(config: &FrankEnergieConfig) -> Self {
        Self::create_client(None, config)
    }

    /// Creates a client that borrows an existing `reqwest` session.
    ///
    /// [`close`](Self::close) leaves a borrowed session untouched.
    #[must_use]
    pub fn with_session(session: reqwest::Client, config: &FrankEnergieConfig) -> Self {
        Self::create_client(Some(session), config)
    }

    fn create_client(session: Option<reqwest::Client>, config: &FrankEnergieConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent = format!(
            "{user_agent_prefix}frank-energie-rs v{SDK_VERSION} | Rust {rust_version}"
        );

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            owns_session: session.is_none(),
            session: Mutex::new(session),
            endpoint: config.endpoint().clone(),
            timeout: config.timeout(),
            default_headers,
        }
    }

    /// Returns the endpoint this client posts to.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns `true` if the session was created by this client.
    #[must_use]
    pub const fn owns_session(&self) -> bool {
        self.owns_session
    }

    /// Returns `true` if a session is currently held.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.lock_session().is_some()
    }

    /// Releases an owned session.
    ///
    /// Safe to call multiple times; only the first call after a session was
    /// opened releases it. A later request opens a fresh session. Borrowed
    /// sessions are left to their owner.
    ///
    /// Returns `true` if a session was released by this call.
    pub fn close(&self) -> bool {
        if !self.owns_session {
            return false;
        }
        let released = self.lock_session().take().is_some();
        if released {
            tracing::debug!("Closed HTTP session for {}", self.endpoint);
        }
        released
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<reqwest::Client>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current session, opening one if none is held.
    fn session(&self) -> Result<reqwest::Client, HttpError> {
        let mut guard = self.lock_session();
        if let Some(session) = guard.as_ref() {
            return Ok(session.clone());
        }

        let session = reqwest::Client::builder().use_rustls_tls().build()?;
        tracing::debug!("Opened HTTP session for {}", self.endpoint);
        *guard = Some(session.clone());
        Ok(session)
    }

    /// Posts a request to the GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - A network error or timeout occurs (`Network`)
    /// - The body is not valid JSON (`InvalidBody`)
    /// - A non-2xx response without GraphQL errors is received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut headers = self.default_headers.clone();
        if let Some(token) = &request.bearer_token {
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        }

        let mut req_builder = self
            .session()?
            .post(self.endpoint.as_ref())
            .timeout(self.timeout)
            .json(&request.body);
        for (key, value) in &headers {
            let name = reqwest::header::HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                InvalidHttpRequestError::InvalidHeader { name: key.clone() }
            })?;
            req_builder = req_builder.header(name, value);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let reason = res.status().canonical_reason().unwrap_or_default();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let body = if body_text.trim().is_empty() {
            serde_json::json!({})
        } else {
            match serde_json::from_str(&body_text) {
                Ok(body) => body,
                Err(_) if !(200..300).contains(&code) => {
                    return Err(HttpError::Response(HttpResponseError {
                        code,
                        message: body_text,
                        error_reference: Self::first_header(&res_headers, "x-request-id"),
                    }));
                }
                Err(source) => return Err(HttpError::InvalidBody { code, source }),
            }
        };

        let response = HttpResponse::new(code, res_headers, body);

        if response.is_ok() || response.has_graphql_errors() {
            return Ok(response);
        }

        let message = if body_text.trim().is_empty() {
            reason.to_string()
        } else {
            body_text
        };
        Err(HttpError::Response(HttpResponseError {
            code,
            message,
            error_reference: response.request_id().map(String::from),
        }))
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    fn first_header(headers: &HashMap<String, Vec<String>>, name: &str) -> Option<String> {
        headers.get(name).and_then(|v| v.first()).cloned()
    }
}
