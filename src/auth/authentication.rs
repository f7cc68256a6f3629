//! The in-memory token pair returned by `Login` and `RenewToken`.

use std::fmt;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::error::FrankEnergieError;
use crate::graphql::{FromResponse, GraphqlResponse};

/// An auth token and refresh token pair.
///
/// Created by [`FrankEnergie::login`](crate::FrankEnergie::login) and
/// replaced wholesale by
/// [`FrankEnergie::renew_token`](crate::FrankEnergie::renew_token). The
/// library never persists it; callers that want to keep a session across
/// restarts store both tokens themselves and pass them to
/// [`FrankEnergie::with_authentication`](crate::FrankEnergie::with_authentication).
///
/// # Example
///
/// ```rust
/// use frank_energie::Authentication;
///
/// let auth = Authentication::new("auth-token", "refresh-token");
/// assert_eq!(auth.auth_token(), "auth-token");
///
/// // Both tokens are masked in debug output
/// assert!(!format!("{auth:?}").contains("auth-token"));
///
/// // Not a JWT, so it cannot be shown to be unexpired
/// assert!(!auth.auth_token_valid());
/// ```
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    auth_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: i64,
}

impl Authentication {
    /// Creates a token pair from previously stored tokens.
    #[must_use]
    pub fn new(auth_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Returns the auth token sent as the bearer credential.
    #[must_use]
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Returns the refresh token used by `RenewToken`.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Parses the payload of a `Login` response.
    ///
    /// # Errors
    ///
    /// Returns the classified GraphQL error, or "Unexpected response" if the
    /// `login` payload is missing.
    pub fn from_login_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        response.into_data("login")
    }

    /// Parses the payload of a `RenewToken` response.
    ///
    /// # Errors
    ///
    /// Returns the classified GraphQL error, or "Unexpected response" if the
    /// `renewToken` payload is missing.
    pub fn from_renew_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        response.into_data("renewToken")
    }

    /// Returns the expiry encoded in the auth token's `exp` claim.
    ///
    /// The signature is not checked. Returns `None` if the token is not a
    /// JWT or carries no usable `exp` claim.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let key = DecodingKey::from_secret(&[]);
        let data = decode::<ExpiryClaims>(&self.auth_token, &key, &validation).ok()?;
        DateTime::from_timestamp(data.claims.exp, 0)
    }

    /// Returns `true` if the auth token's `exp` lies in the future.
    #[must_use]
    pub fn auth_token_valid(&self) -> bool {
        self.auth_token_valid_at(Utc::now())
    }

    /// Returns `true` if the auth token's `exp` lies after `now`.
    #[must_use]
    pub fn auth_token_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp > now)
    }
}

impl FromResponse for Authentication {
    const DATA_KEY: &'static str = "login";

    fn from_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        Self::from_login_response(response)
    }
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authentication")
            .field("auth_token", &"*****")
            .field("refresh_token", &"*****")
            .finish()
    }
}

// Verify Authentication is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Authentication>();
};
