//! The month-to-date cost summary of one delivery site.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dates::deserialize_optional_date;
use crate::error::FrankEnergieError;
use crate::graphql::{FromResponse, GraphqlResponse};

/// Actual and expected costs for the current month of one site.
///
/// Any figure the service leaves out or sends as `null` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// Costs incurred up to the last meter reading.
    #[serde(default)]
    pub actual_costs_until_last_meter_reading_date: Option<f64>,
    /// Costs expected up to the last meter reading.
    #[serde(default)]
    pub expected_costs_until_last_meter_reading_date: Option<f64>,
    /// Costs expected for the whole month.
    #[serde(default)]
    pub expected_costs: Option<f64>,
    /// Date of the last meter reading.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub last_meter_reading_date: Option<NaiveDate>,
    /// Fraction of the last reading day covered by readings.
    #[serde(default)]
    pub meter_reading_day_completeness: Option<f64>,
    /// Whether gas costs are left out of the figures.
    #[serde(default)]
    pub gas_excluded: Option<bool>,
}

impl MonthSummary {
    /// Difference between actual and expected costs so far; positive means
    /// more was spent than expected. `None` if either figure is missing.
    #[must_use]
    pub fn difference_until_last_meter_reading_date(&self) -> Option<f64> {
        Some(
            self.actual_costs_until_last_meter_reading_date?
                - self.expected_costs_until_last_meter_reading_date?,
        )
    }
}

impl FromResponse for MonthSummary {
    const DATA_KEY: &'static str = "monthSummary";

    fn from_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        response.into_data(Self::DATA_KEY)
    }
}
