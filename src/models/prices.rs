//! Hourly price entries and the series built from them.
//!
//! [`MarketPrices`] holds one [`PriceSeries`] for electricity and one for gas.
//! Each [`PriceEntry`] covers a half-open interval `[from, till)` and carries
//! the four price components the service reports.
//!
//! Filters and aggregates that depend on "now" come in two forms: one reading
//! the system clock, and an `_at` variant taking the instant explicitly.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use frank_energie::{PriceEntry, PriceSeries};
//!
//! let hour = |h| Utc.with_ymd_and_hms(2023, 6, 1, h, 0, 0).unwrap();
//! let series = PriceSeries::new(vec![
//!     PriceEntry::new(hour(0), hour(1), 0.10, 0.021, 0.02, 0.12),
//!     PriceEntry::new(hour(1), hour(2), 0.08, 0.017, 0.02, 0.12),
//! ]);
//!
//! let now = Utc.with_ymd_and_hms(2023, 6, 1, 0, 30, 0).unwrap();
//! assert_eq!(series.current_hour_at(now).unwrap().total(), 0.261);
//! assert_eq!(series.today_min_at(now).unwrap().from(), hour(1));
//! ```

use std::fmt;
use std::ops::{Add, AddAssign};

use chrono::{DateTime, Duration, DurationRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dates::start_of_day;
use super::time_period::TimePeriod;
use crate::error::FrankEnergieError;
use crate::graphql::{deserialize_payload, GraphqlResponse};

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// The price for one interval, usually an hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    from: DateTime<Utc>,
    till: DateTime<Utc>,
    market_price: f64,
    market_price_tax: f64,
    sourcing_markup_price: f64,
    energy_tax_price: f64,
}

impl PriceEntry {
    /// Creates an entry from its interval and price components.
    #[must_use]
    pub const fn new(
        from: DateTime<Utc>,
        till: DateTime<Utc>,
        market_price: f64,
        market_price_tax: f64,
        sourcing_markup_price: f64,
        energy_tax_price: f64,
    ) -> Self {
        Self {
            from,
            till,
            market_price,
            market_price_tax,
            sourcing_markup_price,
            energy_tax_price,
        }
    }

    /// Start of the interval (inclusive).
    #[must_use]
    pub const fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// End of the interval (exclusive).
    #[must_use]
    pub const fn till(&self) -> DateTime<Utc> {
        self.till
    }

    /// Wholesale market price.
    #[must_use]
    pub const fn market_price(&self) -> f64 {
        self.market_price
    }

    /// VAT on the market price.
    #[must_use]
    pub const fn market_price_tax(&self) -> f64 {
        self.market_price_tax
    }

    /// Supplier markup.
    #[must_use]
    pub const fn sourcing_markup_price(&self) -> f64 {
        self.sourcing_markup_price
    }

    /// Energy tax.
    #[must_use]
    pub const fn energy_tax_price(&self) -> f64 {
        self.energy_tax_price
    }

    /// Market price including VAT, rounded to 4 decimals.
    #[must_use]
    pub fn market_price_with_tax(&self) -> f64 {
        round_to(self.market_price + self.market_price_tax, 4)
    }

    /// All-in price, rounded to 4 decimals.
    #[must_use]
    pub fn total(&self) -> f64 {
        round_to(
            self.market_price
                + self.market_price_tax
                + self.sourcing_markup_price
                + self.energy_tax_price,
            4,
        )
    }

    /// Returns the value of one price attribute.
    #[must_use]
    pub fn value(&self, attribute: PriceAttribute) -> f64 {
        match attribute {
            PriceAttribute::MarketPrice => self.market_price,
            PriceAttribute::MarketPriceTax => self.market_price_tax,
            PriceAttribute::SourcingMarkupPrice => self.sourcing_markup_price,
            PriceAttribute::EnergyTaxPrice => self.energy_tax_price,
            PriceAttribute::MarketPriceWithTax => self.market_price_with_tax(),
            PriceAttribute::Total => self.total(),
        }
    }

    /// Returns `true` if `from <= now < till`.
    #[must_use]
    pub fn is_current_hour_at(&self, now: DateTime<Utc>) -> bool {
        self.from <= now && now < self.till
    }

    /// Returns `true` if the entry lies within the UTC day containing `now`.
    #[must_use]
    pub fn is_today_at(&self, now: DateTime<Utc>) -> bool {
        let day_start = start_of_day(now.date_naive());
        let day_end = day_start + Duration::days(1);
        self.from >= day_start && self.till <= day_end
    }

    /// Returns `true` if the entry starts in an hour after the one containing `now`.
    #[must_use]
    pub fn is_future_at(&self, now: DateTime<Utc>) -> bool {
        let current_hour = now.duration_trunc(Duration::hours(1)).unwrap_or(now);
        self.from >= current_hour + Duration::hours(1)
    }
}

impl fmt::Display for PriceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}: {}", self.from, self.till, self.total())
    }
}

/// A price attribute that can be exported with [`PriceSeries::as_records`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceAttribute {
    /// [`PriceEntry::market_price`]
    MarketPrice,
    /// [`PriceEntry::market_price_tax`]
    MarketPriceTax,
    /// [`PriceEntry::sourcing_markup_price`]
    SourcingMarkupPrice,
    /// [`PriceEntry::energy_tax_price`]
    EnergyTaxPrice,
    /// [`PriceEntry::market_price_with_tax`]
    MarketPriceWithTax,
    /// [`PriceEntry::total`]
    Total,
}

/// One exported `(from, till, price)` record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRecord {
    /// Start of the interval.
    pub from: DateTime<Utc>,
    /// End of the interval.
    pub till: DateTime<Utc>,
    /// The exported attribute value.
    pub price: f64,
}

/// An ordered collection of [`PriceEntry`] values.
///
/// Series concatenate with `+`, `+=` and [`extend`](Self::extend), keeping
/// the order of both sides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    entries: Vec<PriceEntry>,
}

impl PriceSeries {
    /// Creates a series from entries in their given order.
    #[must_use]
    pub const fn new(entries: Vec<PriceEntry>) -> Self {
        Self { entries }
    }

    /// All entries, in order.
    #[must_use]
    pub fn all(&self) -> &[PriceEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the series has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, PriceEntry> {
        self.entries.iter()
    }

    /// Appends the entries of `other` after the entries of `self`.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// The entry covering the current instant.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::EmptySelection`] if no entry covers it.
    pub fn current_hour(&self) -> Result<&PriceEntry, FrankEnergieError> {
        self.current_hour_at(Utc::now())
    }

    /// The first entry with `from <= now < till`.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::EmptySelection`] if no entry covers `now`.
    pub fn current_hour_at(&self, now: DateTime<Utc>) -> Result<&PriceEntry, FrankEnergieError> {
        self.iter()
            .find(|entry| entry.is_current_hour_at(now))
            .ok_or(FrankEnergieError::EmptySelection {
                selection: "current hour",
            })
    }

    /// Entries within the current UTC day.
    #[must_use]
    pub fn today(&self) -> Vec<&PriceEntry> {
        self.today_at(Utc::now())
    }

    /// Entries within the UTC day containing `now`.
    #[must_use]
    pub fn today_at(&self, now: DateTime<Utc>) -> Vec<&PriceEntry> {
        self.iter().filter(|entry| entry.is_today_at(now)).collect()
    }

    /// Entries for hours after the current one.
    #[must_use]
    pub fn future(&self) -> Vec<&PriceEntry> {
        self.future_at(Utc::now())
    }

    /// Entries for hours after the one containing `now`.
    #[must_use]
    pub fn future_at(&self, now: DateTime<Utc>) -> Vec<&PriceEntry> {
        self.iter().filter(|entry| entry.is_future_at(now)).collect()
    }

    /// Entries within `period`, resolved against the current time.
    #[must_use]
    pub fn for_period(&self, period: TimePeriod) -> Vec<&PriceEntry> {
        self.for_period_at(period, Utc::now())
    }

    /// Entries within `period`, resolved against `now`.
    #[must_use]
    pub fn for_period_at(&self, period: TimePeriod, now: DateTime<Utc>) -> Vec<&PriceEntry> {
        let window = period.window_at(now);
        self.iter()
            .filter(|entry| window.contains_interval(entry.from, entry.till))
            .collect()
    }

    /// The cheapest entry today.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::EmptySelection`] if there are no entries today.
    pub fn today_min(&self) -> Result<&PriceEntry, FrankEnergieError> {
        self.today_min_at(Utc::now())
    }

    /// The cheapest entry in the day containing `now`; the first one on ties.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::EmptySelection`] if there are no entries that day.
    pub fn today_min_at(&self, now: DateTime<Utc>) -> Result<&PriceEntry, FrankEnergieError> {
        self.today_at(now)
            .into_iter()
            .min_by(|a, b| a.total().total_cmp(&b.total()))
            .ok_or(EMPTY_TODAY)
    }

    /// The most expensive entry today.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::EmptySelection`] if there are no entries today.
    pub fn today_max(&self) -> Result<&PriceEntry, FrankEnergieError> {
        self.today_max_at(Utc::now())
    }

    /// The most expensive entry in the day containing `now`; the first one on ties.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::EmptySelection`] if there are no entries that day.
    pub fn today_max_at(&self, now: DateTime<Utc>) -> Result<&PriceEntry, FrankEnergieError> {
        // Reversed comparison so the first maximum wins.
        self.today_at(now)
            .into_iter()
            .min_by(|a, b| b.total().total_cmp(&a.total()))
            .ok_or(EMPTY_TODAY)
    }

    /// Average total today, rounded to 5 decimals.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::EmptySelection`] if there are no entries today.
    pub fn today_avg(&self) -> Result<f64, FrankEnergieError> {
        self.today_avg_at(Utc::now())
    }

    /// Average total in the day containing `now`, rounded to 5 decimals.
    ///
    /// # Errors
    ///
    /// Returns [`FrankEnergieError::EmptySelection`] if there are no entries that day.
    #[allow(clippy::cast_precision_loss)]
    pub fn today_avg_at(&self, now: DateTime<Utc>) -> Result<f64, FrankEnergieError> {
        let today = self.today_at(now);
        if today.is_empty() {
            return Err(EMPTY_TODAY);
        }
        let sum: f64 = today.iter().map(|entry| entry.total()).sum();
        Ok(round_to(sum / today.len() as f64, 5))
    }

    /// Exports every entry as a `(from, till, price)` record for `attribute`.
    #[must_use]
    pub fn as_records(&self, attribute: PriceAttribute) -> Vec<PriceRecord> {
        self.iter()
            .map(|entry| PriceRecord {
                from: entry.from,
                till: entry.till,
                price: entry.value(attribute),
            })
            .collect()
    }
}

const EMPTY_TODAY: FrankEnergieError = FrankEnergieError::EmptySelection { selection: "today" };

impl From<Vec<PriceEntry>> for PriceSeries {
    fn from(entries: Vec<PriceEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<PriceEntry> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PriceEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for PriceSeries {
    type Item = PriceEntry;
    type IntoIter = std::vec::IntoIter<PriceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a PriceEntry;
    type IntoIter = std::slice::Iter<'a, PriceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Add for PriceSeries {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.extend(rhs);
        self
    }
}

impl AddAssign for PriceSeries {
    fn add_assign(&mut self, rhs: Self) {
        self.extend(rhs);
    }
}

/// Electricity and gas prices for a date range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketPrices {
    /// Electricity prices, per hour.
    pub electricity: PriceSeries,
    /// Gas prices, per hour.
    pub gas: PriceSeries,
}

impl MarketPrices {
    /// Builds prices from a public `MarketPrices` response.
    ///
    /// A missing or null series is empty, but at least one of
    /// `marketPricesElectricity` and `marketPricesGas` must be present.
    ///
    /// # Errors
    ///
    /// Returns the classified GraphQL error, or an "Unexpected response" auth
    /// error if neither series is present or one is malformed.
    pub fn from_public_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        if let Some(error) = response.classify_errors() {
            return Err(error);
        }
        let mut data = response
            .data
            .ok_or_else(FrankEnergieError::unexpected_response)?;
        Self::from_series_map(&mut data, "marketPricesElectricity", "marketPricesGas")
    }

    /// Builds prices from a customer `customerMarketPrices` response.
    ///
    /// # Errors
    ///
    /// Returns the classified GraphQL error, or an "Unexpected response" auth
    /// error if the payload is missing, carries neither series, or is malformed.
    pub fn from_customer_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError> {
        match response.into_value("customerMarketPrices")? {
            Value::Object(mut data) => {
                Self::from_series_map(&mut data, "electricityPrices", "gasPrices")
            }
            _ => Err(FrankEnergieError::unexpected_response()),
        }
    }

    fn from_series_map(
        data: &mut Map<String, Value>,
        electricity_key: &str,
        gas_key: &str,
    ) -> Result<Self, FrankEnergieError> {
        let electricity = take_series(data, electricity_key)?;
        let gas = take_series(data, gas_key)?;

        if electricity.is_none() && gas.is_none() {
            return Err(FrankEnergieError::unexpected_response());
        }

        Ok(Self {
            electricity: electricity.unwrap_or_default(),
            gas: gas.unwrap_or_default(),
        })
    }
}

fn take_series(
    data: &mut Map<String, Value>,
    key: &str,
) -> Result<Option<PriceSeries>, FrankEnergieError> {
    match data.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => deserialize_payload(key, value).map(Some),
    }
}
