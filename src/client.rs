//! The [`FrankEnergie`] client.

use std::sync::{PoisonError, RwLock};

use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::auth::Authentication;
use crate::clients::{GraphqlClient, GraphqlRequest};
use crate::config::{FrankEnergieConfig, SiteReference};
use crate::error::FrankEnergieError;
use crate::graphql::{operations, FromResponse, GraphqlResponse};
use crate::models::{
    Invoices, MarketPrices, Me, MonthSummary, PeriodUsageAndCosts, SmartBatteries,
    SmartBatterySessions, User,
};

/// Client for the Frank Energie GraphQL API.
///
/// Public prices need no account. Every other operation needs an auth token,
/// obtained with [`login`](Self::login) or supplied up front with
/// [`with_authentication`](Self::with_authentication). Operations that need
/// a token fail with [`FrankEnergieError::AuthRequired`] before anything is
/// sent when none is present.
///
/// # Session
///
/// The client either owns its HTTP session (created lazily on first use) or
/// borrows one passed to [`with_session`](Self::with_session). Only an owned
/// session is released by [`close`](Self::close).
///
/// # Thread Safety
///
/// `FrankEnergie` is `Send + Sync`. All operations take `&self`, so one
/// client can be shared across tasks.
///
/// # Example
///
/// ```rust,ignore
/// use chrono::Utc;
/// use frank_energie::FrankEnergie;
///
/// let client = FrankEnergie::new();
/// let prices = client.prices(Utc::now().date_naive(), None).await?;
/// println!("Now: {}", prices.electricity.current_hour()?);
///
/// client.login("someone@example.com", "password").await?;
/// let me = client.me(None).await?;
/// client.close();
/// ```
#[derive(Debug)]
pub struct FrankEnergie {
    graphql: GraphqlClient,
    auth: RwLock<Option<Authentication>>,
}

// Verify FrankEnergie is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FrankEnergie>();
};

impl Default for FrankEnergie {
    fn default() -> Self {
        Self::new()
    }
}

impl FrankEnergie {
    /// Creates an unauthenticated client for the production endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&FrankEnergieConfig::default())
    }

    /// Creates an unauthenticated client with the given configuration.
    #[must_use]
    pub fn with_config(config: &FrankEnergieConfig) -> Self {
        Self {
            graphql: GraphqlClient::new(config),
            auth: RwLock::new(None),
        }
    }

    /// Creates a client that borrows an existing `reqwest` session.
    ///
    /// The session's own timeout and TLS settings apply; only the endpoint,
    /// user agent, and per-request timeout are taken from `config`.
    #[must_use]
    pub fn with_session(session: reqwest::Client, config: &FrankEnergieConfig) -> Self {
        Self {
            graphql: GraphqlClient::with_session(session, config),
            auth: RwLock::new(None),
        }
    }

    /// Seeds the client with a previously obtained token pair.
    #[must_use]
    pub fn with_authentication(self, authentication: Authentication) -> Self {
        *self.auth.write().unwrap_or_else(PoisonError::into_inner) = Some(authentication);
        self
    }

    /// Returns `true` if a token pair is present. The token is not checked.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read_auth().is_some()
    }

    /// Returns `true` if a token pair is present and its auth token has not
    /// expired.
    #[must_use]
    pub fn authentication_valid(&self) -> bool {
        self.read_auth()
            .as_ref()
            .is_some_and(Authentication::auth_token_valid)
    }

    /// Returns a copy of the current token pair.
    #[must_use]
    pub fn authentication(&self) -> Option<Authentication> {
        self.read_auth().clone()
    }

    /// Releases an owned HTTP session.
    ///
    /// Returns `true` if a session was released. Calling it again, or on a
    /// client with a borrowed session, is a no-op. A later request opens a
    /// fresh session.
    pub fn close(&self) -> bool {
        self.graphql.close()
    }

    /// Logs in and stores the returned token pair.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::Auth`] for rejected credentials or an
    /// unexpected response, and [`FrankEnergieError::Request`] if the request
    /// could not be completed. The stored tokens are left unchanged on error.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Authentication, FrankEnergieError> {
        let response = self.send(&operations::login(email, password)).await?;
        let authentication = Authentication::from_login_response(response)?;

        self.store_auth(authentication.clone());
        tracing::debug!("Logged in");
        Ok(authentication)
    }

    /// Exchanges the stored token pair for a fresh one.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::AuthRequired`] without sending anything if
    /// no token pair is stored. On any error the stored tokens are kept.
    pub async fn renew_token(&self) -> Result<Authentication, FrankEnergieError> {
        let current = self.authentication().ok_or(FrankEnergieError::AuthRequired)?;
        let request = operations::renew_token(current.auth_token(), current.refresh_token());

        let response = self.send(&request).await?;
        let authentication = Authentication::from_renew_response(response)?;

        self.store_auth(authentication.clone());
        tracing::debug!("Renewed auth token");
        Ok(authentication)
    }

    /// Fetches the month-to-date cost summary for a site.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::AuthRequired`] if not logged in,
    /// [`FrankEnergieError::Config`] for a blank site reference, or the
    /// classified service error.
    pub async fn month_summary(
        &self,
        site_reference: &str,
    ) -> Result<MonthSummary, FrankEnergieError> {
        self.require_auth()?;
        let site = SiteReference::new(site_reference)?;
        self.fetch(&operations::month_summary(site.as_ref())).await
    }

    /// Fetches the invoices for a site.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::AuthRequired`] if not logged in,
    /// [`FrankEnergieError::Config`] for a blank site reference, or the
    /// classified service error.
    pub async fn invoices(&self, site_reference: &str) -> Result<Invoices, FrankEnergieError> {
        self.require_auth()?;
        let site = SiteReference::new(site_reference)?;
        self.fetch(&operations::invoices(site.as_ref())).await
    }

    /// Fetches the account profile, with the advance payment for
    /// `site_reference` if one is given.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::AuthRequired`] if not logged in,
    /// [`FrankEnergieError::Config`] for a blank site reference, or the
    /// classified service error.
    pub async fn me(&self, site_reference: Option<&str>) -> Result<Me, FrankEnergieError> {
        self.require_auth()?;
        let site = site_reference.map(SiteReference::new).transpose()?;
        self.fetch(&operations::me(site.as_ref().map(|site| site.as_ref())))
            .await
    }

    /// Fetches the legacy account profile.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::AuthRequired`] if not logged in, or the
    /// classified service error.
    pub async fn user(&self) -> Result<User, FrankEnergieError> {
        self.require_auth()?;
        self.fetch(&operations::user()).await
    }

    /// Fetches public market prices from `start_date` to `end_date`.
    ///
    /// `end_date` defaults to the day after `start_date`. No login is needed.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::NoData`] if the service has no prices for
    /// the range, or another classified service error.
    pub async fn prices(
        &self,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Result<MarketPrices, FrankEnergieError> {
        let end_date = end_date.unwrap_or(start_date + Duration::days(1));
        let response = self
            .send(&operations::market_prices(start_date, end_date))
            .await?;
        MarketPrices::from_public_response(response)
    }

    /// Fetches the prices for one day as billed to a site, including the
    /// customer's own markup.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::AuthRequired`] if not logged in,
    /// [`FrankEnergieError::Config`] for a blank site reference, or the
    /// classified service error.
    pub async fn user_prices(
        &self,
        date: NaiveDate,
        site_reference: &str,
    ) -> Result<MarketPrices, FrankEnergieError> {
        self.require_auth()?;
        let site = SiteReference::new(site_reference)?;
        let response = self
            .send(&operations::customer_market_prices(date, site.as_ref()))
            .await?;
        MarketPrices::from_customer_response(response)
    }

    /// Lists the account's smart batteries.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::AuthRequired`] if not logged in,
    /// [`FrankEnergieError::SmartTradingNotEnabled`] for accounts without
    /// smart trading, or another classified service error.
    pub async fn smart_batteries(&self) -> Result<SmartBatteries, FrankEnergieError> {
        self.require_auth()?;
        self.fetch(&operations::smart_batteries()).await
    }

    /// Fetches the trading sessions of one battery between two dates.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::AuthRequired`] if not logged in, or the
    /// classified service error.
    pub async fn smart_battery_sessions(
        &self,
        device_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<SmartBatterySessions, FrankEnergieError> {
        self.require_auth()?;
        self.fetch(&operations::smart_battery_sessions(device_id, start_date, end_date))
            .await
    }

    /// Fetches usage and costs for one site and day.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::AuthRequired`] if not logged in,
    /// [`FrankEnergieError::Config`] for a blank site reference, or the
    /// classified service error.
    pub async fn period_usage_and_costs(
        &self,
        site_reference: &str,
        date: NaiveDate,
    ) -> Result<PeriodUsageAndCosts, FrankEnergieError> {
        self.require_auth()?;
        let site = SiteReference::new(site_reference)?;
        self.fetch(&operations::period_usage_and_costs(site.as_ref(), date))
            .await
    }

    /// Sends an arbitrary operation and returns its `data` object.
    ///
    /// The stored auth token is attached when present. Requests marked with
    /// [`GraphqlRequest::authenticated`] fail without a token.
    ///
    /// # Errors
    ///
    /// Returns the classified service error, or an "Unexpected response"
    /// auth error if the response has no `data`.
    pub async fn query(&self, request: &GraphqlRequest) -> Result<Value, FrankEnergieError> {
        let response = self.send(request).await?;
        if let Some(error) = response.classify_errors() {
            return Err(error);
        }
        response
            .data
            .map(Value::Object)
            .ok_or_else(FrankEnergieError::unexpected_response)
    }

    async fn fetch<T: FromResponse>(
        &self,
        request: &GraphqlRequest,
    ) -> Result<T, FrankEnergieError> {
        let response = self.send(request).await?;
        T::from_response(response)
    }

    async fn send(&self, request: &GraphqlRequest) -> Result<GraphqlResponse, FrankEnergieError> {
        let token = if request.requires_auth() {
            Some(self.require_auth()?)
        } else {
            self.read_auth()
                .as_ref()
                .map(|auth| auth.auth_token().to_string())
        };

        let response = self
            .graphql
            .execute(request, token.as_deref())
            .await?;
        Ok(GraphqlResponse::from_value(response.body))
    }

    fn require_auth(&self) -> Result<String, FrankEnergieError> {
        self.read_auth()
            .as_ref()
            .map(|auth| auth.auth_token().to_string())
            .ok_or(FrankEnergieError::AuthRequired)
    }

    fn read_auth(&self) -> std::sync::RwLockReadGuard<'_, Option<Authentication>> {
        self.auth.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn store_auth(&self, authentication: Authentication) {
        *self.auth.write().unwrap_or_else(PoisonError::into_inner) = Some(authentication);
    }
}
