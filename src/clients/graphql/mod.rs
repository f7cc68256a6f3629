//! GraphQL client for the Frank Energie API.
//!
//! This module provides a GraphQL layer built on top of the
//! [`HttpClient`](crate::clients::HttpClient).
//!
//! # Overview
//!
//! - [`GraphqlRequest`]: A named operation with its query document and variables
//! - [`GraphqlClient`]: Posts a [`GraphqlRequest`] to the configured endpoint
//! - [`GraphqlError`]: Transport and request-validation errors
//!
//! # Response Structure
//!
//! GraphQL responses contain these fields in the body:
//!
//! - `data`: The query result data, keyed by root field
//! - `errors`: Any GraphQL errors (usually still HTTP 200)
//!
//! The client returns the raw body; [`GraphqlResponse`](crate::GraphqlResponse)
//! classifies the `errors` list and extracts the `data` keys.
//!
//! # Example
//!
//! ```rust,ignore
//! use frank_energie::{FrankEnergieConfig, GraphqlRequest};
//! use frank_energie::clients::GraphqlClient;
//!
//! let client = GraphqlClient::new(&FrankEnergieConfig::default());
//! let request = GraphqlRequest::new("Typename", "query Typename { __typename }");
//! let response = client.execute(&request, None).await?;
//! println!("{}", response.body["data"]);
//! ```

mod client;
mod errors;
mod request;

pub use client::GraphqlClient;
pub use errors::{GraphqlError, InvalidGraphqlRequestError};
pub use request::GraphqlRequest;
