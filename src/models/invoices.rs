//! Invoices for one delivery site.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::dates::{deserialize_date, deserialize_nullable_list, start_of_day};
use super::time_period::TimePeriod;
use crate::error::FrankEnergieError;
use crate::graphql::{FromResponse, GraphqlResponse};

/// One invoice. Field names follow the service's PascalCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Invoice {
    /// First day of the invoiced period.
    #[serde(deserialize_with = "deserialize_date")]
    pub start_date: NaiveDate,
    /// Human readable period, e.g. "Maart 2023".
    pub period_description: String,
    /// Invoiced amount in euros.
    pub total_amount: f64,
}

/// The previous, current, and upcoming invoice plus the full history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoices {
    /// The invoice for the previous period, if any.
    #[serde(default)]
    pub previous_period_invoice: Option<Invoice>,
    /// The invoice for the current period, if any.
    #[serde(default)]
    pub current_period_invoice: Option<Invoice>,
    /// The invoice for the upcoming period, if any.
    #[serde(default)]
    pub upcoming_period_invoice: Option<Invoice>,
    /// Every invoice on record.
    #[serde(default, deserialize_with = "deserialize_nullable_list")]
    pub all_invoices: Vec<Invoice>,
}

impl Invoices {
    /// Invoices whose start date falls within `period` resolved at `now`.
    #[must_use]
    pub fn for_period_at(&self, period: TimePeriod, now: DateTime<Utc>) -> Vec<&Invoice> {
        let window = period.window_at(now);
        self.all_invoices
            .iter()
            .filter(|invoice| window.contains(start_of_day(invoice.start_date)))
            .collect()
    }

    /// Invoices whose start date falls within `period`.
    #[must_use]
    pub fn for_period(&self, period: TimePeriod) -> Vec<&Invoice> {
        self.for_period_at(period, Utc::now())
    }

    /// Sum of [`for_period_at`](Self::for_period_at), rounded to cents.
    #[must_use]
    pub fn total_for_period_at(&self, period: TimePeriod, now: DateTime<Utc>) -> f64 {
        let total: f64 = self
            .for_period_at(period, now)
            .iter()
            .map(|invoice| invoice.total_amount)
            .sum();
        (total * 100.0).round() / 100.0
    }

    /// Sum of [`for_period`](Self::for_period), rounded to cents.
    #[must_use]
    pub fn total_for_period(&self, period: TimePeriod) -> f64 {
        self.total_for_period_at(period, Utc::now())
    }
}

impl FromResponse for Invoices {
    const DATA_KEY: &'static str = "invoices";

    fn from_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        response.into_data(Self::DATA_KEY)
    }
}
