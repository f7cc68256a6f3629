//! GraphQL-layer error types.
//!
//! Only transport-level failures and invalid request documents are errors at
//! this layer. GraphQL-level errors (the `errors` list in a response body) are
//! returned untouched and classified by [`GraphqlResponse`](crate::GraphqlResponse).

use crate::clients::HttpError;
use thiserror::Error;

/// Error returned when a [`GraphqlRequest`](super::GraphqlRequest) fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidGraphqlRequestError {
    /// The query document is empty.
    #[error("GraphQL query cannot be empty.")]
    EmptyQuery,

    /// The operation name is empty.
    #[error("GraphQL operation name cannot be empty.")]
    EmptyOperationName,

    /// The variables are not a JSON object.
    #[error("GraphQL variables for '{operation_name}' must be a JSON object.")]
    VariablesNotObject {
        /// The operation the variables belong to.
        operation_name: String,
    },
}

/// Error type for GraphQL operations.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// An HTTP-level error occurred.
    ///
    /// This includes network errors, timeouts, malformed JSON, and non-2xx
    /// responses that carry no GraphQL error list.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The request document failed validation before sending.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidGraphqlRequestError),
}
