//! Smart batteries enrolled in smart trading, and their trading sessions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{deserialize_date, deserialize_nullable_list};
use crate::error::FrankEnergieError;
use crate::graphql::{FromResponse, GraphqlResponse};

/// One battery registered for smart trading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartBattery {
    /// Battery manufacturer.
    pub brand: String,
    /// Usable capacity in kWh.
    pub capacity: f64,
    /// When the battery was registered.
    pub created_at: DateTime<Utc>,
    /// The id the provider uses for this battery.
    pub external_reference: String,
    /// Device id passed to [`smart_battery_sessions`](crate::FrankEnergie::smart_battery_sessions).
    pub id: String,
    /// Maximum charge power in kW.
    pub max_charge_power: f64,
    /// Maximum discharge power in kW.
    pub max_discharge_power: f64,
    /// The integration controlling the battery, e.g. `SOLAREDGE`.
    pub provider: String,
    /// When the registration last changed.
    pub updated_at: DateTime<Utc>,
}

/// The user's smart batteries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SmartBatteries {
    /// Batteries in the order the service lists them.
    pub batteries: Vec<SmartBattery>,
}

impl SmartBatteries {
    /// Looks up a battery by device id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SmartBattery> {
        self.batteries.iter().find(|battery| battery.id == id)
    }
}

impl FromResponse for SmartBatteries {
    const DATA_KEY: &'static str = "smartBatteries";

    fn from_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        response.into_data(Self::DATA_KEY)
    }
}

/// The trading result of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartBatterySession {
    /// The trading day.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// Result of the day in euros.
    pub trading_result: f64,
    /// Running total since enrolment, in euros.
    pub cumulative_trading_result: f64,
}

/// Trading results of one battery over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartBatterySessions {
    /// The battery the sessions belong to.
    pub device_id: String,
    /// First day of the requested period.
    #[serde(deserialize_with = "deserialize_date")]
    pub period_start_date: NaiveDate,
    /// Last day of the requested period.
    #[serde(deserialize_with = "deserialize_date")]
    pub period_end_date: NaiveDate,
    /// Result over the requested period, in euros.
    pub period_trading_result: f64,
    /// Result since enrolment, in euros.
    pub total_trading_result: f64,
    /// One entry per trading day. `null` reads as no sessions.
    #[serde(default, deserialize_with = "deserialize_nullable_list")]
    pub sessions: Vec<SmartBatterySession>,
}

impl FromResponse for SmartBatterySessions {
    const DATA_KEY: &'static str = "smartBatterySessions";

    fn from_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        response.into_data(Self::DATA_KEY)
    }
}
