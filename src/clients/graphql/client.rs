//! GraphQL client implementation.
//!
//! This module provides the [`GraphqlClient`] type for posting named
//! operations to the Frank Energie GraphQL endpoint.

use crate::clients::graphql::{GraphqlError, GraphqlRequest};
use crate::clients::{HttpClient, HttpRequest, HttpResponse};
use crate::config::{Endpoint, FrankEnergieConfig};

/// GraphQL client for the Frank Energie API.
///
/// Wraps an [`HttpClient`] and turns a [`GraphqlRequest`] into a `POST`
/// with the `{query, operationName, variables}` body.
///
/// # Thread Safety
///
/// `GraphqlClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct GraphqlClient {
    http_client: HttpClient,
}

// Verify GraphqlClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GraphqlClient>();
};

impl GraphqlClient {
    /// Creates a GraphQL client that opens its own session on first use.
    #[must_use]
    pub fn new(config: &FrankEnergieConfig) -> Self {
        Self {
            http_client: HttpClient::new(config),
        }
    }

    /// Creates a GraphQL client that borrows an existing `reqwest` session.
    #[must_use]
    pub fn with_session(session: reqwest::Client, config: &FrankEnergieConfig) -> Self {
        Self {
            http_client: HttpClient::with_session(session, config),
        }
    }

    /// Returns the endpoint requests are posted to.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        self.http_client.endpoint()
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Releases an owned session. See [`HttpClient::close`].
    pub fn close(&self) -> bool {
        self.http_client.close()
    }

    /// Executes a GraphQL operation.
    ///
    /// # Arguments
    ///
    /// * `request` - The operation to send
    /// * `token` - Optional auth token for the `Authorization: Bearer` header
    ///
    /// # Errors
    ///
    /// Returns [`GraphqlError::InvalidRequest`] if the document fails
    /// validation and [`GraphqlError::Http`] for transport-level errors.
    ///
    /// GraphQL-level errors come back inside `response.body["errors"]`.
    pub async fn execute(
        &self,
        request: &GraphqlRequest,
        token: Option<&str>,
    ) -> Result<HttpResponse, GraphqlError> {
        let body = request.to_body()?;

        let mut builder = HttpRequest::builder(body);
        if let Some(token) = token {
            builder = builder.bearer_token(token);
        }

        let http_request = builder.build().map_err(|e| GraphqlError::Http(e.into()))?;

        tracing::debug!(
            operation = request.operation_name(),
            endpoint = %self.endpoint(),
            authenticated = token.is_some(),
            "Sending GraphQL operation"
        );

        self.http_client
            .request(http_request)
            .await
            .map_err(Into::into)
    }
}
