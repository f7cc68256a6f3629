//! Configuration types for the Frank Energie client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`FrankEnergieConfig`]: The configuration struct holding all client settings
//! - [`FrankEnergieConfigBuilder`]: A builder for constructing [`FrankEnergieConfig`] instances
//! - [`Endpoint`]: A validated GraphQL endpoint URL
//! - [`SiteReference`]: A validated delivery site reference
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use frank_energie::{FrankEnergieConfig, Endpoint};
//!
//! let config = FrankEnergieConfig::builder()
//!     .endpoint(Endpoint::new("https://frank-graphql-prod.graphcdn.app/").unwrap())
//!     .timeout(Duration::from_secs(10))
//!     .user_agent_prefix("MyApp/1.0")
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{Endpoint, SiteReference};

use std::time::Duration;

use crate::error::ConfigError;

/// Default transport timeout for a single request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Frank Energie client.
///
/// `FrankEnergieConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct FrankEnergieConfig {
    endpoint: Endpoint,
    user_agent_prefix: Option<String>,
    timeout: Duration,
}

impl FrankEnergieConfig {
    /// Creates a new builder for constructing a `FrankEnergieConfig`.
    #[must_use]
    pub fn builder() -> FrankEnergieConfigBuilder {
        FrankEnergieConfigBuilder::new()
    }

    /// Returns the GraphQL endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request transport timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for FrankEnergieConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::production(),
            user_agent_prefix: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Verify FrankEnergieConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FrankEnergieConfig>();
};

/// Builder for constructing [`FrankEnergieConfig`] instances.
///
/// No field is required.
///
/// # Defaults
///
/// - `endpoint`: [`Endpoint::PRODUCTION`]
/// - `timeout`: [`DEFAULT_TIMEOUT`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct FrankEnergieConfigBuilder {
    endpoint: Option<Endpoint>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl FrankEnergieConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the GraphQL endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request transport timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`FrankEnergieConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUserAgent`] if the user agent prefix
    /// contains characters that cannot be sent in a header.
    pub fn build(self) -> Result<FrankEnergieConfig, ConfigError> {
        if let Some(prefix) = &self.user_agent_prefix {
            if !prefix.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
                return Err(ConfigError::InvalidUserAgent {
                    prefix: prefix.clone(),
                });
            }
        }

        Ok(FrankEnergieConfig {
            endpoint: self.endpoint.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = FrankEnergieConfig::builder().build().unwrap();

        assert_eq!(config.endpoint().as_ref(), Endpoint::PRODUCTION);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let endpoint = Endpoint::new("http://localhost:4000/graphql").unwrap();
        let config = FrankEnergieConfig::builder()
            .endpoint(endpoint.clone())
            .timeout(Duration::from_secs(5))
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.endpoint(), &endpoint);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_builder_rejects_control_characters_in_user_agent() {
        let result = FrankEnergieConfig::builder()
            .user_agent_prefix("bad\nprefix")
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidUserAgent { .. })));
    }

    #[test]
    fn test_default_matches_empty_builder() {
        let built = FrankEnergieConfig::builder().build().unwrap();
        let default = FrankEnergieConfig::default();
        assert_eq!(built.endpoint(), default.endpoint());
        assert_eq!(built.timeout(), default.timeout());
    }
}
