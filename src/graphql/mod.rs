//! Named operations and response handling for the Frank Energie schema.
//!
//! - [`operations`]: one constructor per GraphQL operation the client sends
//! - [`GraphqlResponse`]: the `{data, errors}` envelope and error classification
//! - [`FromResponse`]: implemented by value objects built from one data key

pub mod operations;
mod response;

pub(crate) use response::deserialize_payload;
pub use response::{FromResponse, GraphqlErrorEntry, GraphqlResponse};
