//! Integration tests for the account-scoped operations.

mod common;

use chrono::NaiveDate;
use common::{authenticated_client_for, fixture, mount_operation};
use frank_energie::{FrankEnergieError, TimePeriod};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Month summary and invoices
// ============================================================================

#[tokio::test]
async fn test_month_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer a"))
        .and(body_partial_json(json!({
            "operationName": "MonthSummary",
            "variables": {"siteReference": "1234AB 10"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("month_summary.json")))
        .expect(1)
        .mount(&server)
        .await;

    let summary = authenticated_client_for(&server)
        .month_summary("1234AB 10")
        .await
        .unwrap();

    assert_eq!(summary.actual_costs_until_last_meter_reading_date, Some(12.34));
    assert_eq!(summary.expected_costs_until_last_meter_reading_date, Some(20.0));
    assert_eq!(summary.expected_costs, Some(50.0));
    assert_eq!(summary.last_meter_reading_date, Some(date(2023, 1, 1)));
    assert_eq!(summary.gas_excluded, Some(false));
}

#[tokio::test]
async fn test_invoices() {
    let server = MockServer::start().await;
    mount_operation(&server, "Invoices", fixture("invoices.json")).await;

    let invoices = authenticated_client_for(&server)
        .invoices("1234AB 10")
        .await
        .unwrap();

    let previous = invoices.previous_period_invoice.as_ref().unwrap();
    assert_eq!(previous.start_date, date(2023, 3, 1));
    assert_eq!(previous.period_description, "Maart 2023");
    assert!((previous.total_amount - 140.12).abs() < 1e-9);

    let current = invoices.current_period_invoice.as_ref().unwrap();
    assert_eq!(current.start_date, date(2023, 4, 1));
    assert_eq!(current.period_description, "April 2023");

    let upcoming = invoices.upcoming_period_invoice.as_ref().unwrap();
    assert_eq!(upcoming.start_date, date(2023, 5, 1));
    assert_eq!(upcoming.period_description, "Mei 2023");
    assert!((upcoming.total_amount - 80.34).abs() < 1e-9);

    let now = chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2023, 4, 20, 8, 0, 0).unwrap();
    assert_eq!(invoices.for_period_at(TimePeriod::CurrentYear, now).len(), 4);
    assert!((invoices.total_for_period_at(TimePeriod::PreviousMonth, now) - 140.12).abs() < 1e-9);
}

#[tokio::test]
async fn test_blank_site_reference_is_rejected() {
    let server = MockServer::start().await;
    common::expect_no_requests(&server).await;

    let result = authenticated_client_for(&server).invoices("").await;

    assert!(matches!(result, Err(FrankEnergieError::Config(_))));
}

// ============================================================================
// Profile
// ============================================================================

#[tokio::test]
async fn test_me() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "Me",
            "variables": {"siteReference": null}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("me.json")))
        .expect(1)
        .mount(&server)
        .await;

    let me = authenticated_client_for(&server).me(None).await.unwrap();

    assert_eq!(me.email, "someone@example.com");
    assert_eq!(me.country_code.as_deref(), Some("NL"));
    assert_eq!(me.has_co2_compensation, Some(false));
    assert_eq!(me.delivery_sites.len(), 1);

    let site = me.delivery_site("1234AB 10").unwrap();
    let address = site.address.as_ref().unwrap();
    assert_eq!(address.zip_code.as_deref(), Some("1234AB"));
    assert!(address.house_number_addition.is_none());
}

#[tokio::test]
async fn test_user() {
    let server = MockServer::start().await;
    mount_operation(&server, "User", fixture("user.json")).await;

    let user = authenticated_client_for(&server).user().await.unwrap();

    assert_eq!(user.connections_status.as_deref(), Some("READY"));
    assert_eq!(user.first_meter_reading_date, Some(date(2022, 11, 20)));
    assert_eq!(user.last_meter_reading_date, Some(date(2022, 12, 5)));
    assert_eq!(user.advanced_payment_amount, Some(99.0));
    assert_eq!(user.has_co2_compensation, Some(false));
}

#[tokio::test]
async fn test_user_null_payload_is_unexpected_response() {
    let server = MockServer::start().await;
    mount_operation(&server, "User", json!({"data": {"me": null}})).await;

    let result = authenticated_client_for(&server).user().await;

    assert!(matches!(
        result,
        Err(FrankEnergieError::Auth { message }) if message == "Unexpected response"
    ));
}

// ============================================================================
// Smart batteries
// ============================================================================

#[tokio::test]
async fn test_smart_batteries() {
    let server = MockServer::start().await;
    mount_operation(&server, "SmartBatteries", fixture("smart_batteries.json")).await;

    let batteries = authenticated_client_for(&server)
        .smart_batteries()
        .await
        .unwrap();

    assert_eq!(batteries.batteries.len(), 1);
    let battery = batteries.get("battery-1").unwrap();
    assert_eq!(battery.brand, "SolarEdge");
    assert_eq!(battery.external_reference, "SE-1234");
    assert!((battery.capacity - 9.7).abs() < 1e-9);
}

#[tokio::test]
async fn test_smart_trading_not_enabled() {
    let server = MockServer::start().await;
    mount_operation(&server, "SmartBatteries", fixture("smart_trading_not_enabled.json")).await;

    let result = authenticated_client_for(&server).smart_batteries().await;

    assert!(matches!(result, Err(FrankEnergieError::SmartTradingNotEnabled)));
}

#[tokio::test]
async fn test_error_entry_without_message_does_not_hide_classification() {
    let server = MockServer::start().await;
    mount_operation(
        &server,
        "SmartBatteries",
        json!({
            "errors": [
                {"message": "user-error:smart-trading-not-enabled"},
                {"message": null}
            ],
            "data": null
        }),
    )
    .await;

    let result = authenticated_client_for(&server).smart_batteries().await;

    assert!(matches!(result, Err(FrankEnergieError::SmartTradingNotEnabled)));
}

#[tokio::test]
async fn test_non_object_data_does_not_hide_classification() {
    let server = MockServer::start().await;
    mount_operation(
        &server,
        "Me",
        json!({"errors": [{"message": "user-error:auth-not-authorised"}], "data": []}),
    )
    .await;

    let result = authenticated_client_for(&server).me(None).await;

    assert!(matches!(
        result,
        Err(FrankEnergieError::Auth { message }) if message == "Not authorized"
    ));
}

#[tokio::test]
async fn test_smart_battery_sessions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "SmartBatterySessions",
            "variables": {
                "deviceId": "battery-1",
                "startDate": "2023-10-01",
                "endDate": "2023-10-03"
            }
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(fixture("smart_battery_sessions.json")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sessions = authenticated_client_for(&server)
        .smart_battery_sessions("battery-1", date(2023, 10, 1), date(2023, 10, 3))
        .await
        .unwrap();

    assert_eq!(sessions.device_id, "battery-1");
    assert_eq!(sessions.period_start_date, date(2023, 10, 1));
    assert_eq!(sessions.sessions.len(), 3);
    assert!((sessions.total_trading_result - 15.5).abs() < 1e-9);
    assert!((sessions.sessions[1].cumulative_trading_result - 14.75).abs() < 1e-9);
}

// ============================================================================
// Usage and costs
// ============================================================================

#[tokio::test]
async fn test_period_usage_and_costs() {
    let server = MockServer::start().await;
    mount_operation(&server, "PeriodUsageAndCosts", fixture("period_usage_and_costs.json")).await;

    let usage = authenticated_client_for(&server)
        .period_usage_and_costs("1234AB 10", date(2023, 6, 1))
        .await
        .unwrap();

    assert_eq!(usage.id, "1234AB 10-2023-06-01");
    assert!(usage.feed_in.is_none());
    assert_eq!(usage.gas.as_ref().unwrap().unit, "M3");
    assert_eq!(usage.electricity.as_ref().unwrap().items.len(), 1);
    assert!((usage.net_costs() - 3.75).abs() < 1e-9);
}

#[tokio::test]
async fn test_null_lists_in_payloads_read_as_empty() {
    let server = MockServer::start().await;
    mount_operation(
        &server,
        "SmartBatterySessions",
        json!({"data": {"smartBatterySessions": {
            "deviceId": "battery-1",
            "periodStartDate": "2023-10-01",
            "periodEndDate": "2023-10-03",
            "periodTradingResult": 0.0,
            "totalTradingResult": 15.5,
            "sessions": null
        }}}),
    )
    .await;
    mount_operation(
        &server,
        "Me",
        json!({"data": {"me": {
            "id": "user-1",
            "email": "someone@example.com",
            "deliverySites": null
        }}}),
    )
    .await;
    mount_operation(
        &server,
        "MonthSummary",
        json!({"data": {"monthSummary": {
            "actualCostsUntilLastMeterReadingDate": 1.0,
            "expectedCostsUntilLastMeterReadingDate": 2.0,
            "expectedCosts": null,
            "lastMeterReadingDate": null
        }}}),
    )
    .await;

    let client = authenticated_client_for(&server);

    let sessions = client
        .smart_battery_sessions("battery-1", date(2023, 10, 1), date(2023, 10, 3))
        .await
        .unwrap();
    assert!(sessions.sessions.is_empty());

    let me = client.me(None).await.unwrap();
    assert!(me.delivery_sites.is_empty());

    let summary = client.month_summary("1234AB 10").await.unwrap();
    assert!(summary.last_meter_reading_date.is_none());
    assert!(summary.expected_costs.is_none());
    assert_eq!(summary.difference_until_last_meter_reading_date(), Some(-1.0));
}

// ============================================================================
// Error classification through the client
// ============================================================================

#[tokio::test]
async fn test_known_error_codes_map_to_variants() {
    let cases = [
        ("user-error:password-invalid", "auth:Invalid password"),
        ("user-error:auth-not-authorised", "auth:Not authorized"),
        ("user-error:auth-required", "auth-required"),
        ("user-error:smart-trading-not-enabled", "smart-trading"),
        ("Graphql validation error", "validation"),
        ("No data found for this period", "no-data"),
        ("something else entirely", "auth:something else entirely"),
    ];

    for (message, expected) in cases {
        let server = MockServer::start().await;
        mount_operation(&server, "MonthSummary", json!({"errors": [{"message": message}]})).await;

        let error = authenticated_client_for(&server)
            .month_summary("site")
            .await
            .unwrap_err();

        let actual = match &error {
            FrankEnergieError::Auth { message } => format!("auth:{message}"),
            FrankEnergieError::AuthRequired => "auth-required".to_string(),
            FrankEnergieError::SmartTradingNotEnabled => "smart-trading".to_string(),
            FrankEnergieError::Validation { .. } => "validation".to_string(),
            FrankEnergieError::NoData { .. } => "no-data".to_string(),
            other => format!("unexpected:{other}"),
        };
        assert_eq!(actual, expected, "for message {message:?}");
    }
}
