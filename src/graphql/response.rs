//! The GraphQL response envelope and error classification.
//!
//! Every response body is an object with an optional `data` map and an
//! optional `errors` list. [`GraphqlResponse::into_data`] turns that envelope
//! into either the payload under one data key or a [`FrankEnergieError`].

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::FrankEnergieError;

/// One entry in a GraphQL `errors` list.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphqlErrorEntry {
    /// The error message, possibly a `user-error:*` code.
    pub message: String,
    /// The response path the error applies to.
    pub path: Option<Vec<Value>>,
    /// Vendor-specific error details.
    pub extensions: Option<Value>,
}

impl GraphqlErrorEntry {
    /// Reads one raw error entry. Entries without a string `message` yield `None`.
    fn from_raw(entry: &Value) -> Option<Self> {
        let message = entry.get("message")?.as_str()?.to_string();
        Some(Self {
            message,
            path: entry.get("path").and_then(Value::as_array).cloned(),
            extensions: entry.get("extensions").filter(|v| !v.is_null()).cloned(),
        })
    }
}

/// A parsed GraphQL response body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphqlResponse {
    /// Root fields of the result, or `None` if `data` was absent or not an object.
    pub data: Option<Map<String, Value>>,
    /// Errors reported by the service. Empty when none were reported.
    pub errors: Vec<GraphqlErrorEntry>,
}

impl GraphqlResponse {
    /// Parses a raw response body.
    ///
    /// `data` and `errors` are read independently, so a malformed `data`
    /// value never hides the error list. Error entries without a string
    /// message are skipped. A body that is not an object counts as an empty
    /// response, which later surfaces as "Unexpected response".
    #[must_use]
    pub fn from_value(body: Value) -> Self {
        let Value::Object(mut envelope) = body else {
            return Self::default();
        };

        let errors = match envelope.get("errors") {
            Some(Value::Array(entries)) => {
                entries.iter().filter_map(GraphqlErrorEntry::from_raw).collect()
            }
            _ => Vec::new(),
        };
        let data = match envelope.remove("data") {
            Some(Value::Object(data)) => Some(data),
            _ => None,
        };

        Self { data, errors }
    }

    /// Maps the error list onto a typed error, if there is one.
    ///
    /// Messages are checked in order and the first recognized code wins. If
    /// none is recognized the first message is reported as an auth failure.
    #[must_use]
    pub fn classify_errors(&self) -> Option<FrankEnergieError> {
        let first = self.errors.first()?;

        for entry in &self.errors {
            if let Some(error) = classify_message(&entry.message) {
                return Some(error);
            }
        }

        tracing::warn!(message = %first.message, "Unrecognized GraphQL error");
        Some(FrankEnergieError::Auth {
            message: first.message.clone(),
        })
    }

    /// Returns the raw value under `key` after error classification.
    ///
    /// # Errors
    ///
    /// Returns the classified error if the error list is non-empty, or an
    /// "Unexpected response" auth error if `key` is absent or null.
    pub fn into_value(mut self, key: &str) -> Result<Value, FrankEnergieError> {
        if let Some(error) = self.classify_errors() {
            return Err(error);
        }

        match self.data.as_mut().and_then(|data| data.remove(key)) {
            Some(Value::Null) | None => Err(FrankEnergieError::unexpected_response()),
            Some(value) => Ok(value),
        }
    }

    /// Deserializes the payload under `key` into `T`.
    ///
    /// # Errors
    ///
    /// As [`into_value`](Self::into_value), plus an auth error naming the key
    /// if the payload does not have the expected shape.
    pub fn into_data<T: DeserializeOwned>(self, key: &str) -> Result<T, FrankEnergieError> {
        let value = self.into_value(key)?;
        deserialize_payload(key, value)
    }
}

pub(crate) fn deserialize_payload<T: DeserializeOwned>(
    key: &str,
    value: Value,
) -> Result<T, FrankEnergieError> {
    serde_json::from_value(value).map_err(|e| FrankEnergieError::Auth {
        message: format!("Unexpected response for '{key}': {e}"),
    })
}

fn classify_message(message: &str) -> Option<FrankEnergieError> {
    match message {
        "user-error:password-invalid" => Some(FrankEnergieError::Auth {
            message: "Invalid password".to_string(),
        }),
        "user-error:auth-not-authorised" => Some(FrankEnergieError::Auth {
            message: "Not authorized".to_string(),
        }),
        "user-error:auth-required" => Some(FrankEnergieError::AuthRequired),
        "Graphql validation error" => Some(FrankEnergieError::Validation {
            message: message.to_string(),
        }),
        m if m.starts_with("user-error:smart-trading-not-enabled") => {
            Some(FrankEnergieError::SmartTradingNotEnabled)
        }
        m if m.starts_with("No ") && m.contains(" found") => Some(FrankEnergieError::NoData {
            message: m.to_string(),
        }),
        _ => None,
    }
}

/// A value object built from the payload under one data key.
pub trait FromResponse: Sized {
    /// The root field holding this object's payload.
    const DATA_KEY: &'static str;

    /// Builds the object from a response envelope, usually by deserializing
    /// the value under [`DATA_KEY`](Self::DATA_KEY).
    ///
    /// # Errors
    ///
    /// Returns an auth error if the payload is missing or malformed.
    fn from_response(response: GraphqlResponse) -> Result<Self, FrankEnergieError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn with_errors(messages: &[&str]) -> GraphqlResponse {
        let errors: Vec<Value> = messages.iter().map(|m| json!({"message": m})).collect();
        GraphqlResponse::from_value(json!({"errors": errors, "data": null}))
    }

    #[test]
    fn test_known_codes_map_to_variants() {
        assert!(matches!(
            with_errors(&["user-error:password-invalid"]).classify_errors(),
            Some(FrankEnergieError::Auth { message }) if message == "Invalid password"
        ));
        assert!(matches!(
            with_errors(&["user-error:auth-not-authorised"]).classify_errors(),
            Some(FrankEnergieError::Auth { message }) if message == "Not authorized"
        ));
        assert!(matches!(
            with_errors(&["user-error:auth-required"]).classify_errors(),
            Some(FrankEnergieError::AuthRequired)
        ));
        assert!(matches!(
            with_errors(&["user-error:smart-trading-not-enabled:batteries"]).classify_errors(),
            Some(FrankEnergieError::SmartTradingNotEnabled)
        ));
        assert!(matches!(
            with_errors(&["Graphql validation error"]).classify_errors(),
            Some(FrankEnergieError::Validation { .. })
        ));
        assert!(matches!(
            with_errors(&["No marketprices found for segment"]).classify_errors(),
            Some(FrankEnergieError::NoData { message })
                if message == "No marketprices found for segment"
        ));
    }

    #[test]
    fn test_unrecognized_message_is_auth_failure_with_first_message() {
        assert!(matches!(
            with_errors(&["help me", "and me"]).classify_errors(),
            Some(FrankEnergieError::Auth { message }) if message == "help me"
        ));
    }

    #[test]
    fn test_first_recognized_code_wins() {
        assert!(matches!(
            with_errors(&["something odd", "user-error:auth-required"]).classify_errors(),
            Some(FrankEnergieError::AuthRequired)
        ));
    }

    #[test]
    fn test_empty_or_null_errors_are_no_errors() {
        assert!(GraphqlResponse::from_value(json!({"errors": [], "data": {}}))
            .classify_errors()
            .is_none());
        assert!(GraphqlResponse::from_value(json!({"errors": null}))
            .classify_errors()
            .is_none());
    }

    #[test]
    fn test_error_entries_without_message_are_skipped() {
        let response = GraphqlResponse::from_value(json!({
            "errors": [
                {"message": "user-error:smart-trading-not-enabled"},
                {"message": null},
                {"path": ["smartBatteries"]}
            ],
            "data": null
        }));

        assert_eq!(response.errors.len(), 1);
        assert!(matches!(
            response.classify_errors(),
            Some(FrankEnergieError::SmartTradingNotEnabled)
        ));
    }

    #[test]
    fn test_non_object_data_keeps_errors() {
        let response = GraphqlResponse::from_value(json!({
            "errors": [{"message": "user-error:auth-not-authorised", "path": ["me"]}],
            "data": []
        }));

        assert!(response.data.is_none());
        assert_eq!(response.errors[0].path, Some(vec![json!("me")]));
        assert!(matches!(
            response.into_value("me"),
            Err(FrankEnergieError::Auth { message }) if message == "Not authorized"
        ));
    }

    #[test]
    fn test_missing_or_null_key_is_unexpected_response() {
        for body in [json!({}), json!({"data": null}), json!({"data": {"login": null}})] {
            let result = GraphqlResponse::from_value(body).into_value("login");
            assert!(matches!(
                result,
                Err(FrankEnergieError::Auth { message }) if message == "Unexpected response"
            ));
        }
    }

    #[test]
    fn test_non_envelope_body_is_unexpected_response() {
        let result = GraphqlResponse::from_value(json!("oops")).into_value("me");
        assert!(matches!(result, Err(FrankEnergieError::Auth { .. })));
    }

    #[test]
    fn test_into_data_reports_shape_errors_with_key() {
        #[derive(Debug, Deserialize)]
        struct Payload {
            #[allow(dead_code)]
            count: u32,
        }

        let response = GraphqlResponse::from_value(json!({"data": {"thing": {"count": "x"}}}));
        let result: Result<Payload, _> = response.into_data("thing");

        assert!(matches!(
            result,
            Err(FrankEnergieError::Auth { message })
                if message.starts_with("Unexpected response for 'thing'")
        ));
    }
}
