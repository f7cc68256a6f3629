//! The account profile returned by the `Me` and `User` queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::{deserialize_nullable_list, deserialize_optional_date};
use crate::error::FrankEnergieError;
use crate::graphql::{FromResponse, GraphqlResponse};

/// A postal address. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street name.
    pub street: Option<String>,

    /// House number without addition.
    pub house_number: Option<String>,

    /// House number addition, e.g. `A` or `bis`.
    pub house_number_addition: Option<String>,

    /// Postal code, e.g. `1234AB`.
    pub zip_code: Option<String>,

    /// City or town.
    pub city: Option<String>,
}

/// A delivery address and the contract running on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySite {
    /// The site reference used by site-scoped queries.
    pub reference: String,

    /// Delivered segments, e.g. `ELECTRICITY` and `GAS`.
    #[serde(default, deserialize_with = "deserialize_nullable_list")]
    pub segments: Vec<String>,

    /// The postal address of the site.
    pub address: Option<Address>,

    /// Contract status, e.g. `IN_DELIVERY`.
    pub status: Option<String>,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Me {
    /// The account id.
    pub id: String,

    /// The login email address.
    pub email: String,

    /// ISO country code of the account, e.g. `NL`.
    pub country_code: Option<String>,

    /// Monthly advance payment for the requested site, if any.
    pub advanced_payment_amount: Option<f64>,

    /// Trees planted on behalf of the user.
    pub trees_count: Option<u32>,

    /// Whether the user has a referral link.
    pub has_invite_link: Option<bool>,

    /// Whether CO2 compensation is enabled.
    #[serde(rename = "hasCO2Compensation")]
    pub has_co2_compensation: Option<bool>,

    /// All delivery sites on the account.
    #[serde(default, deserialize_with = "deserialize_nullable_list")]
    pub delivery_sites: Vec<DeliverySite>,
}

impl Me {
    /// Looks up a delivery site by reference.
    #[must_use]
    pub fn delivery_site(&self, reference: &str) -> Option<&DeliverySite> {
        self.delivery_sites
            .iter()
            .find(|site| site.reference == reference)
    }
}

impl FromResponse for Me {
    const DATA_KEY: &'static str = "me";

    fn from_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        response.into_data(Self::DATA_KEY)
    }
}

/// The legacy profile shape, also read from the `me` root field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Smart meter connection status, e.g. `READY`.
    pub connections_status: Option<String>,
    /// First day with meter readings.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub first_meter_reading_date: Option<NaiveDate>,
    /// Last day with meter readings.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub last_meter_reading_date: Option<NaiveDate>,
    /// Monthly advance payment.
    pub advanced_payment_amount: Option<f64>,
    /// Whether CO2 compensation is enabled.
    #[serde(rename = "hasCO2Compensation")]
    pub has_co2_compensation: Option<bool>,
}

impl FromResponse for User {
    const DATA_KEY: &'static str = "me";

    fn from_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        response.into_data(Self::DATA_KEY)
    }
}
