//! HTTP request types for the Frank Energie client.
//!
//! Every call to the GraphQL endpoint is a `POST` with a JSON object body, so
//! [`HttpRequest`] only carries the body and an optional bearer token.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// An HTTP request to be sent to the GraphQL endpoint.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use frank_energie::clients::HttpRequest;
/// use serde_json::json;
///
/// let request = HttpRequest::builder(json!({"query": "query { __typename }"}))
///     .bearer_token("token")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.bearer_token.as_deref(), Some("token"));
/// ```
#[derive(Clone)]
pub struct HttpRequest {
    /// The JSON request body.
    pub body: serde_json::Value,
    /// Token sent as `Authorization: Bearer <token>`.
    pub bearer_token: Option<String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(body: impl Into<serde_json::Value>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(body)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::BodyNotObject`] if `body` is not a
    /// JSON object.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.body.is_object() {
            return Err(InvalidHttpRequestError::BodyNotObject);
        }
        Ok(())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The body may carry a password and the token is a credential.
        f.debug_struct("HttpRequest")
            .field("operation_name", &self.body.get("operationName"))
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "*****"))
            .finish_non_exhaustive()
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(body: impl Into<serde_json::Value>) -> Self {
        Self {
            request: HttpRequest {
                body: body.into(),
                bearer_token: None,
            },
        }
    }

    /// Sets the bearer token for the `Authorization` header.
    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.request.bearer_token = Some(token.into());
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.request.verify()?;
        Ok(self.request)
    }
}
