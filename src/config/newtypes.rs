//! Validated newtype wrappers for configuration and request values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated GraphQL endpoint URL.
///
/// The URL must use the `http` or `https` scheme and carry a host.
///
/// # Example
///
/// ```rust
/// use frank_energie::Endpoint;
///
/// let endpoint = Endpoint::new("https://frank-graphql-prod.graphcdn.app/").unwrap();
/// assert_eq!(endpoint.scheme(), "https");
/// assert_eq!(endpoint.host_name(), "frank-graphql-prod.graphcdn.app");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl Endpoint {
    /// The production endpoint of the Frank Energie API.
    pub const PRODUCTION: &'static str = "https://frank-graphql-prod.graphcdn.app/";

    /// Creates a new validated endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEndpoint`] if the URL is invalid.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url: String = url.into();
        let url = url.trim().to_string();
        let invalid = || ConfigError::InvalidEndpoint { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start || url[host_start..host_end].contains(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the production endpoint.
    #[must_use]
    pub fn production() -> Self {
        Self {
            url: Self::PRODUCTION.to_string(),
            scheme_end: 5,
            host_start: 8,
            host_end: Self::PRODUCTION.len() - 1,
        }
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::production()
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// A reference to one of the user's delivery sites.
///
/// Customer-specific queries (month summary, invoices, customer prices,
/// usage and costs) are scoped to a site reference.
///
/// # Example
///
/// ```rust
/// use frank_energie::SiteReference;
///
/// let site = SiteReference::new("1234AB 10").unwrap();
/// assert_eq!(site.as_ref(), "1234AB 10");
/// assert!(SiteReference::new("  ").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SiteReference(String);

impl SiteReference {
    /// Creates a new validated site reference.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySiteReference`] if the reference is blank.
    pub fn new(reference: impl Into<String>) -> Result<Self, ConfigError> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(ConfigError::EmptySiteReference);
        }
        Ok(Self(reference))
    }
}

impl AsRef<str> for SiteReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for SiteReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SiteReference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
