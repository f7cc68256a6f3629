//! # Frank Energie API client
//!
//! An async client for the Frank Energie GraphQL API: dynamic energy prices,
//! invoices, month summaries, the account profile, smart batteries, and
//! metered usage.
//!
//! ## Overview
//!
//! This crate provides:
//! - The [`FrankEnergie`] client with one async method per operation
//! - Type-safe configuration via [`FrankEnergieConfig`] and [`FrankEnergieConfigBuilder`]
//! - Typed value objects for every response, in [`models`]
//! - Error classification of the service's GraphQL errors into [`FrankEnergieError`]
//! - Price filters and aggregates over [`PriceSeries`], by hour, day, or [`TimePeriod`]
//!
//! ## Quick Start
//!
//! Public market prices need no account:
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use frank_energie::FrankEnergie;
//!
//! let client = FrankEnergie::new();
//! let prices = client.prices(Utc::now().date_naive(), None).await?;
//!
//! println!("Cheapest hour today: {}", prices.electricity.today_min()?);
//! println!("Average today: {}", prices.electricity.today_avg()?);
//! client.close();
//! ```
//!
//! ## Authenticated Operations
//!
//! ```rust,ignore
//! use frank_energie::FrankEnergie;
//!
//! let client = FrankEnergie::new();
//! let auth = client.login("someone@example.com", "password").await?;
//!
//! let me = client.me(None).await?;
//! for site in &me.delivery_sites {
//!     let summary = client.month_summary(&site.reference).await?;
//!     if let Some(costs) = summary.actual_costs_until_last_meter_reading_date {
//!         println!("{}: {costs:.2} so far", site.reference);
//!     }
//! }
//!
//! // Store both tokens to resume later with `with_authentication`
//! let stored = auth.clone();
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use std::time::Duration;
//! use frank_energie::{Endpoint, FrankEnergieConfig};
//!
//! let config = FrankEnergieConfig::builder()
//!     .endpoint(Endpoint::new("https://frank-graphql-prod.graphcdn.app/").unwrap())
//!     .user_agent_prefix("my-dashboard/1.0")
//!     .timeout(Duration::from_secs(10))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.timeout(), Duration::from_secs(10));
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: one `debug` event per operation sent
//! and a `warn` event for unrecognized service errors. Tokens and passwords
//! are never logged. Install a subscriber to see them.

pub mod auth;
pub mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod graphql;
pub mod models;

pub use auth::Authentication;
pub use client::FrankEnergie;
pub use clients::{GraphqlError, GraphqlRequest, HttpError};
pub use config::{
    Endpoint, FrankEnergieConfig, FrankEnergieConfigBuilder, SiteReference, DEFAULT_TIMEOUT,
};
pub use error::{ConfigError, FrankEnergieError};
pub use graphql::{FromResponse, GraphqlResponse};
pub use models::{
    Invoice, Invoices, MarketPrices, Me, MonthSummary, PeriodUsageAndCosts, PriceAttribute,
    PriceEntry, PriceRecord, PriceSeries, SmartBatteries, SmartBattery, SmartBatterySessions,
    TimePeriod, TimeWindow, User,
};
