//! The fixed set of named GraphQL operations sent to the endpoint.
//!
//! Each function renders one [`GraphqlRequest`] with its operation name,
//! query document, and variables. Dates are sent as `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use serde_json::json;

use crate::clients::GraphqlRequest;

const LOGIN: &str = r"
mutation Login($email: String!, $password: String!) {
    login(email: $email, password: $password) {
        authToken
        refreshToken
    }
}
";

const RENEW_TOKEN: &str = r"
mutation RenewToken($authToken: String!, $refreshToken: String!) {
    renewToken(authToken: $authToken, refreshToken: $refreshToken) {
        authToken
        refreshToken
    }
}
";

const MONTH_SUMMARY: &str = r"
query MonthSummary($siteReference: String!) {
    monthSummary(siteReference: $siteReference) {
        actualCostsUntilLastMeterReadingDate
        expectedCostsUntilLastMeterReadingDate
        expectedCosts
        lastMeterReadingDate
        meterReadingDayCompleteness
        gasExcluded
    }
}
";

const INVOICES: &str = r"
query Invoices($siteReference: String!) {
    invoices(siteReference: $siteReference) {
        previousPeriodInvoice {
            StartDate
            PeriodDescription
            TotalAmount
        }
        currentPeriodInvoice {
            StartDate
            PeriodDescription
            TotalAmount
        }
        upcomingPeriodInvoice {
            StartDate
            PeriodDescription
            TotalAmount
        }
        allInvoices {
            StartDate
            PeriodDescription
            TotalAmount
        }
    }
}
";

const ME: &str = r"
query Me($siteReference: String) {
    me {
        ...UserFields
    }
}
fragment UserFields on User {
    id
    email
    countryCode
    advancedPaymentAmount(siteReference: $siteReference)
    treesCount
    hasInviteLink
    hasCO2Compensation
    deliverySites {
        reference
        segments
        address {
            street
            houseNumber
            houseNumberAddition
            zipCode
            city
        }
        status
    }
}
";

const USER: &str = r"
query User {
    me {
        connectionsStatus
        firstMeterReadingDate
        lastMeterReadingDate
        advancedPaymentAmount
        hasCO2Compensation
    }
}
";

const MARKET_PRICES: &str = r"
query MarketPrices($startDate: Date!, $endDate: Date!) {
    marketPricesElectricity(startDate: $startDate, endDate: $endDate) {
        from
        till
        marketPrice
        marketPriceTax
        sourcingMarkupPrice
        energyTaxPrice
    }
    marketPricesGas(startDate: $startDate, endDate: $endDate) {
        from
        till
        marketPrice
        marketPriceTax
        sourcingMarkupPrice
        energyTaxPrice
    }
}
";

// Aliases map the customer fields onto the public price entry shape.
const CUSTOMER_MARKET_PRICES: &str = r"
query MarketPrices($date: String!, $siteReference: String!) {
    customerMarketPrices(date: $date, siteReference: $siteReference) {
        electricityPrices {
            from
            till
            marketPrice
            marketPriceTax
            sourcingMarkupPrice: consumptionSourcingMarkupPrice
            energyTaxPrice: energyTax
        }
        gasPrices {
            from
            till
            marketPrice
            marketPriceTax
            sourcingMarkupPrice: consumptionSourcingMarkupPrice
            energyTaxPrice: energyTax
        }
    }
}
";

const SMART_BATTERIES: &str = r"
query SmartBatteries {
    smartBatteries {
        brand
        capacity
        createdAt
        externalReference
        id
        maxChargePower
        maxDischargePower
        provider
        updatedAt
    }
}
";

const SMART_BATTERY_SESSIONS: &str = r"
query SmartBatterySessions($startDate: String!, $endDate: String!, $deviceId: String!) {
    smartBatterySessions(startDate: $startDate, endDate: $endDate, deviceId: $deviceId) {
        deviceId
        periodEndDate
        periodStartDate
        periodTradingResult
        sessions {
            cumulativeTradingResult
            date
            tradingResult
        }
        totalTradingResult
    }
}
";

const PERIOD_USAGE_AND_COSTS: &str = r"
query PeriodUsageAndCosts($date: String!, $siteReference: String!) {
    periodUsageAndCosts(date: $date, siteReference: $siteReference) {
        _id
        electricity {
            ...UsageAndCostsFields
        }
        gas {
            ...UsageAndCostsFields
        }
        feedIn {
            ...UsageAndCostsFields
        }
    }
}
fragment UsageAndCostsFields on UsageAndCosts {
    usageTotal
    costsTotal
    unit
    items {
        date
        from
        till
        usage
        costs
        unit
    }
}
";

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `Login` mutation.
#[must_use]
pub fn login(email: &str, password: &str) -> GraphqlRequest {
    GraphqlRequest::new("Login", LOGIN).variables(json!({
        "email": email,
        "password": password,
    }))
}

/// `RenewToken` mutation.
#[must_use]
pub fn renew_token(auth_token: &str, refresh_token: &str) -> GraphqlRequest {
    GraphqlRequest::new("RenewToken", RENEW_TOKEN)
        .variables(json!({
            "authToken": auth_token,
            "refreshToken": refresh_token,
        }))
        .authenticated()
}

/// `MonthSummary` query.
#[must_use]
pub fn month_summary(site_reference: &str) -> GraphqlRequest {
    GraphqlRequest::new("MonthSummary", MONTH_SUMMARY)
        .variables(json!({ "siteReference": site_reference }))
        .authenticated()
}

/// `Invoices` query.
#[must_use]
pub fn invoices(site_reference: &str) -> GraphqlRequest {
    GraphqlRequest::new("Invoices", INVOICES)
        .variables(json!({ "siteReference": site_reference }))
        .authenticated()
}

/// `Me` query. A missing site reference is sent as `null`.
#[must_use]
pub fn me(site_reference: Option<&str>) -> GraphqlRequest {
    GraphqlRequest::new("Me", ME)
        .variables(json!({ "siteReference": site_reference }))
        .authenticated()
}

/// Legacy `User` profile query.
#[must_use]
pub fn user() -> GraphqlRequest {
    GraphqlRequest::new("User", USER).authenticated()
}

/// Public `MarketPrices` query for `[start_date, end_date]`.
#[must_use]
pub fn market_prices(start_date: NaiveDate, end_date: NaiveDate) -> GraphqlRequest {
    GraphqlRequest::new("MarketPrices", MARKET_PRICES).variables(json!({
        "startDate": format_date(start_date),
        "endDate": format_date(end_date),
    }))
}

/// Customer-specific prices. Sent with operation name `MarketPrices`.
#[must_use]
pub fn customer_market_prices(date: NaiveDate, site_reference: &str) -> GraphqlRequest {
    GraphqlRequest::new("MarketPrices", CUSTOMER_MARKET_PRICES)
        .variables(json!({
            "date": format_date(date),
            "siteReference": site_reference,
        }))
        .authenticated()
}

/// `SmartBatteries` query.
#[must_use]
pub fn smart_batteries() -> GraphqlRequest {
    GraphqlRequest::new("SmartBatteries", SMART_BATTERIES).authenticated()
}

/// `SmartBatterySessions` query for one device.
#[must_use]
pub fn smart_battery_sessions(
    device_id: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> GraphqlRequest {
    GraphqlRequest::new("SmartBatterySessions", SMART_BATTERY_SESSIONS)
        .variables(json!({
            "deviceId": device_id,
            "startDate": format_date(start_date),
            "endDate": format_date(end_date),
        }))
        .authenticated()
}

/// `PeriodUsageAndCosts` query for one site and day.
#[must_use]
pub fn period_usage_and_costs(site_reference: &str, date: NaiveDate) -> GraphqlRequest {
    GraphqlRequest::new("PeriodUsageAndCosts", PERIOD_USAGE_AND_COSTS)
        .variables(json!({
            "siteReference": site_reference,
            "date": format_date(date),
        }))
        .authenticated()
}
