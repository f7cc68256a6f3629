//! Shared helpers for the integration tests.

#![allow(dead_code)]

use frank_energie::{Authentication, Endpoint, FrankEnergie, FrankEnergieConfig};
use serde_json::Value;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Loads a JSON fixture from `tests/fixtures/`.
pub fn fixture(name: &str) -> Value {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    let text = std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("{path}: {e}"));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("{path}: {e}"))
}

/// Builds a configuration pointing at the mock server.
pub fn config_for(server: &MockServer) -> FrankEnergieConfig {
    FrankEnergieConfig::builder()
        .endpoint(Endpoint::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

/// An unauthenticated client pointing at the mock server.
pub fn client_for(server: &MockServer) -> FrankEnergie {
    FrankEnergie::with_config(&config_for(server))
}

/// A client holding the tokens `a` / `b`, pointing at the mock server.
pub fn authenticated_client_for(server: &MockServer) -> FrankEnergie {
    client_for(server).with_authentication(Authentication::new("a", "b"))
}

/// Answers every `POST /` carrying `operation` with `body`.
pub async fn mount_operation(server: &MockServer, operation: &str, body: Value) {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_partial_json(serde_json::json!({ "operationName": operation })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Fails the test if any request reaches the server.
pub async fn expect_no_requests(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}
