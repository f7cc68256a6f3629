//! Error types for the Frank Energie client.
//!
//! This module contains the configuration error type and the crate-level
//! [`FrankEnergieError`] returned by every operation on
//! [`FrankEnergie`](crate::FrankEnergie).
//!
//! # Error Handling
//!
//! Errors are classified by where they originate:
//!
//! - [`FrankEnergieError::AuthRequired`]: no token present, checked before any
//!   request is sent
//! - [`FrankEnergieError::Auth`]: credentials rejected or the response did not
//!   carry the expected data
//! - [`FrankEnergieError::Request`]: transport, timeout, or malformed JSON
//! - [`FrankEnergieError::SmartTradingNotEnabled`], [`FrankEnergieError::Validation`],
//!   [`FrankEnergieError::NoData`]: service-side errors with a known code
//! - [`FrankEnergieError::EmptySelection`]: a price aggregate over an empty selection
//!
//! # Example
//!
//! ```rust
//! use frank_energie::{Endpoint, ConfigError};
//!
//! let result = Endpoint::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
//! ```

use thiserror::Error;

use crate::clients::GraphqlError;

/// Errors that can occur while building the client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The endpoint URL is invalid.
    #[error("Invalid endpoint URL '{url}'. Expected an http(s) URL such as 'https://frank-graphql-prod.graphcdn.app/'.")]
    InvalidEndpoint {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A site reference cannot be empty.
    #[error("Site reference cannot be empty. Use the reference of one of your delivery sites.")]
    EmptySiteReference,

    /// A user agent prefix contains characters that are not valid in a header.
    #[error("Invalid user agent prefix '{prefix}'. Header values must be visible ASCII.")]
    InvalidUserAgent {
        /// The rejected prefix.
        prefix: String,
    },
}

/// Errors returned by [`FrankEnergie`](crate::FrankEnergie) operations.
#[derive(Debug, Error)]
pub enum FrankEnergieError {
    /// The operation requires authentication and no token is present.
    #[error("Authentication required for this request")]
    AuthRequired,

    /// Authentication failed, or the service returned an unexpected response.
    #[error("Authentication failed: {message}")]
    Auth {
        /// The reason reported by the service, or "Unexpected response".
        message: String,
    },

    /// Smart trading is not enabled for this account.
    #[error("Smart trading is not enabled for this user")]
    SmartTradingNotEnabled,

    /// The service rejected the GraphQL document.
    #[error("Request failed: {message}")]
    Validation {
        /// The validation message from the service.
        message: String,
    },

    /// The service has no data for the requested range.
    #[error("No data found: {message}")]
    NoData {
        /// The message from the service.
        message: String,
    },

    /// A price aggregate was requested over an empty selection.
    #[error("No price entries for {selection}")]
    EmptySelection {
        /// The selection that came up empty (e.g. "today").
        selection: &'static str,
    },

    /// The request could not be completed.
    #[error(transparent)]
    Request(#[from] GraphqlError),

    /// A configuration value was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl FrankEnergieError {
    pub(crate) const UNEXPECTED_RESPONSE: &'static str = "Unexpected response";

    pub(crate) fn unexpected_response() -> Self {
        Self::Auth {
            message: Self::UNEXPECTED_RESPONSE.to_string(),
        }
    }

    /// Returns `true` for errors that mean the current tokens are unusable.
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthRequired | Self::Auth { .. })
    }
}

// Verify FrankEnergieError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FrankEnergieError>();
};
