//! Typed value objects built from GraphQL responses.
//!
//! - [`MarketPrices`], [`PriceSeries`], [`PriceEntry`]: hourly prices
//! - [`MonthSummary`]: month-to-date costs
//! - [`Invoices`], [`Invoice`]: invoice history
//! - [`Me`], [`User`]: the account profile
//! - [`SmartBatteries`], [`SmartBatterySessions`]: smart trading
//! - [`PeriodUsageAndCosts`]: metered usage and costs
//! - [`TimePeriod`]: named periods for filtering prices and invoices

mod dates;
mod invoices;
mod month_summary;
mod prices;
mod smart_batteries;
mod time_period;
mod usage;
mod user;

pub use invoices::{Invoice, Invoices};
pub use month_summary::MonthSummary;
pub use prices::{MarketPrices, PriceAttribute, PriceEntry, PriceRecord, PriceSeries};
pub use smart_batteries::{SmartBatteries, SmartBattery, SmartBatterySession, SmartBatterySessions};
pub use time_period::{ParseTimePeriodError, TimePeriod, TimeWindow};
pub use usage::{PeriodUsageAndCosts, UsageAndCosts, UsageItem};
pub use user::{Address, DeliverySite, Me, User};
