//! Metered usage and costs for one site and day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{deserialize_date, deserialize_nullable_list};
use crate::error::FrankEnergieError;
use crate::graphql::{FromResponse, GraphqlResponse};

/// Usage and costs for one interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageItem {
    /// The day the interval belongs to.
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    /// Start of the interval.
    pub from: DateTime<Utc>,
    /// End of the interval (exclusive).
    pub till: DateTime<Utc>,
    /// Metered usage in `unit`.
    pub usage: f64,
    /// Costs in euros.
    pub costs: f64,
    /// Unit of `usage`.
    pub unit: String,
}

/// Totals and per-interval items for one segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageAndCosts {
    /// Total usage in `unit`.
    pub usage_total: f64,
    /// Total costs in euros.
    pub costs_total: f64,
    /// Unit of `usage_total`, e.g. `KWH` or `M3`.
    pub unit: String,
    /// Per-interval breakdown. `null` reads as no items.
    #[serde(default, deserialize_with = "deserialize_nullable_list")]
    pub items: Vec<UsageItem>,
}

/// Usage and costs per segment. Segments the site does not have are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodUsageAndCosts {
    /// Identifier of the site and day.
    #[serde(rename = "_id")]
    pub id: String,
    /// Electricity taken from the grid.
    #[serde(default)]
    pub electricity: Option<UsageAndCosts>,
    /// Gas usage.
    #[serde(default)]
    pub gas: Option<UsageAndCosts>,
    /// Electricity returned to the grid.
    #[serde(default)]
    pub feed_in: Option<UsageAndCosts>,
}

impl PeriodUsageAndCosts {
    /// Electricity costs minus feed-in revenue, plus gas costs.
    #[must_use]
    pub fn net_costs(&self) -> f64 {
        let costs = |segment: &Option<UsageAndCosts>| {
            segment.as_ref().map_or(0.0, |s| s.costs_total)
        };
        costs(&self.electricity) + costs(&self.gas) - costs(&self.feed_in)
    }
}

impl FromResponse for PeriodUsageAndCosts {
    const DATA_KEY: &'static str = "periodUsageAndCosts";

    fn from_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        response.into_data(Self::DATA_KEY)
    }
}
