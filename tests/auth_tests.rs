//! Integration tests for login, token renewal, and the auth-required guard.

mod common;

use chrono::NaiveDate;
use common::{authenticated_client_for, client_for, expect_no_requests, fixture, mount_operation};
use frank_energie::{Authentication, FrankEnergieError};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Serialize)]
struct TestClaims {
    exp: i64,
}

fn token_expiring_in(seconds: i64) -> String {
    encode(
        &Header::default(),
        &TestClaims {
            exp: chrono::Utc::now().timestamp() + seconds,
        },
        &EncodingKey::from_secret(b"test-secret"),
    )
    .unwrap()
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_stores_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(json!({
            "operationName": "Login",
            "variables": {"email": "a", "password": "b"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("authentication.json")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let auth = client.login("a", "b").await.unwrap();

    assert!(client.is_authenticated());
    assert_eq!(auth.auth_token(), "hello");
    assert_eq!(auth.refresh_token(), "world");
    assert_eq!(client.authentication(), Some(auth));
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = MockServer::start().await;
    mount_operation(&server, "Login", fixture("response_with_error.json")).await;

    let client = client_for(&server);
    let result = client.login("a", "b").await;

    assert!(matches!(
        result,
        Err(FrankEnergieError::Auth { message }) if message == "Invalid password"
    ));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_login_empty_object_is_unexpected_response() {
    let server = MockServer::start().await;
    mount_operation(&server, "Login", json!({})).await;

    let client = client_for(&server);
    let result = client.login("a", "b").await;

    assert!(matches!(
        result,
        Err(FrankEnergieError::Auth { message }) if message == "Unexpected response"
    ));
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_login_empty_body_is_unexpected_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let result = client_for(&server).login("a", "b").await;

    assert!(matches!(
        result,
        Err(FrankEnergieError::Auth { message }) if message == "Unexpected response"
    ));
}

#[tokio::test]
async fn test_login_unrecognized_error_carries_message() {
    let server = MockServer::start().await;
    mount_operation(&server, "Login", json!({"errors": [{"message": "help me"}]})).await;

    let result = client_for(&server).login("a", "b").await;

    assert!(matches!(
        result,
        Err(FrankEnergieError::Auth { message }) if message == "help me"
    ));
}

// ============================================================================
// RenewToken
// ============================================================================

#[tokio::test]
async fn test_renew_token_replaces_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer a"))
        .and(body_partial_json(json!({
            "operationName": "RenewToken",
            "variables": {"authToken": "a", "refreshToken": "b"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture("renew_token.json")))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client_for(&server);
    let auth = client.renew_token().await.unwrap();

    assert_eq!(auth, Authentication::new("hello-again", "world-again"));
    assert_eq!(client.authentication(), Some(auth));
}

#[tokio::test]
async fn test_failed_renew_keeps_previous_tokens() {
    let server = MockServer::start().await;
    mount_operation(
        &server,
        "RenewToken",
        json!({"errors": [{"message": "user-error:auth-not-authorised"}]}),
    )
    .await;

    let client = authenticated_client_for(&server);
    let result = client.renew_token().await;

    assert!(matches!(
        result,
        Err(FrankEnergieError::Auth { message }) if message == "Not authorized"
    ));
    assert_eq!(client.authentication(), Some(Authentication::new("a", "b")));
}

#[tokio::test]
async fn test_renew_with_unexpected_response_keeps_previous_tokens() {
    let server = MockServer::start().await;
    mount_operation(&server, "RenewToken", json!({"data": {"renewToken": null}})).await;

    let client = authenticated_client_for(&server);
    assert!(client.renew_token().await.is_err());
    assert_eq!(client.authentication(), Some(Authentication::new("a", "b")));
}

// ============================================================================
// Auth-required guard
// ============================================================================

#[tokio::test]
async fn test_auth_only_operations_send_nothing_without_token() {
    let server = MockServer::start().await;
    expect_no_requests(&server).await;

    let client = client_for(&server);
    let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();

    assert!(matches!(client.renew_token().await, Err(FrankEnergieError::AuthRequired)));
    assert!(matches!(client.month_summary("site").await, Err(FrankEnergieError::AuthRequired)));
    assert!(matches!(client.invoices("site").await, Err(FrankEnergieError::AuthRequired)));
    assert!(matches!(client.me(Some("site")).await, Err(FrankEnergieError::AuthRequired)));
    assert!(matches!(client.user().await, Err(FrankEnergieError::AuthRequired)));
    assert!(matches!(
        client.user_prices(date, "site").await,
        Err(FrankEnergieError::AuthRequired)
    ));
    assert!(matches!(client.smart_batteries().await, Err(FrankEnergieError::AuthRequired)));
    assert!(matches!(
        client.smart_battery_sessions("battery-1", date, date).await,
        Err(FrankEnergieError::AuthRequired)
    ));
    assert!(matches!(
        client.period_usage_and_costs("site", date).await,
        Err(FrankEnergieError::AuthRequired)
    ));

    server.verify().await;
}

#[tokio::test]
async fn test_server_side_auth_required_is_classified() {
    let server = MockServer::start().await;
    mount_operation(
        &server,
        "MonthSummary",
        json!({"errors": [{"message": "user-error:auth-required"}], "data": null}),
    )
    .await;

    let result = authenticated_client_for(&server).month_summary("site").await;
    assert!(matches!(result, Err(FrankEnergieError::AuthRequired)));
}

// ============================================================================
// Token validity
// ============================================================================

#[test]
fn test_authentication_valid_reads_jwt_expiry() {
    let fresh = frank_energie::FrankEnergie::new()
        .with_authentication(Authentication::new(token_expiring_in(3600), "refresh"));
    assert!(fresh.is_authenticated());
    assert!(fresh.authentication_valid());

    let expired = frank_energie::FrankEnergie::new()
        .with_authentication(Authentication::new(token_expiring_in(-3600), "refresh"));
    assert!(expired.is_authenticated());
    assert!(!expired.authentication_valid());
}
