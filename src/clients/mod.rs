//! HTTP and GraphQL client types for Frank Energie API communication.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client, owning or borrowing a `reqwest` session
//! - [`HttpRequest`]: A JSON `POST` to be sent to the endpoint
//! - [`HttpResponse`]: A parsed response from the endpoint
//! - [`HttpError`]: Transport-level errors
//! - [`graphql::GraphqlClient`]: Higher-level GraphQL client
//! - [`graphql::GraphqlRequest`]: A named GraphQL operation
//! - [`graphql::GraphqlError`]: GraphQL-layer error type
//!
//! # Retry Behavior
//!
//! Requests are attempted exactly once. Callers that want retries wrap
//! the call themselves.

mod errors;
pub mod graphql;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use graphql::{GraphqlClient, GraphqlError, GraphqlRequest, InvalidGraphqlRequestError};
