//! The GraphQL request document.

use std::fmt;

use serde::Serialize;

use super::errors::InvalidGraphqlRequestError;

/// A named GraphQL operation ready to be posted.
///
/// Serializes to the wire body `{query, operationName, variables}`;
/// `variables` is omitted when unset.
///
/// # Example
///
/// ```rust
/// use frank_energie::GraphqlRequest;
/// use serde_json::json;
///
/// let request = GraphqlRequest::new("Hello", "query Hello { __typename }")
///     .variables(json!({"answer": 42}));
///
/// let body = request.to_body().unwrap();
/// assert_eq!(body["operationName"], "Hello");
/// assert_eq!(body["variables"]["answer"], 42);
/// ```
#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    query: String,
    operation_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<serde_json::Value>,
    #[serde(skip)]
    requires_auth: bool,
}

impl GraphqlRequest {
    /// Creates a request for the given operation name and query document.
    #[must_use]
    pub fn new(operation_name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: operation_name.into(),
            variables: None,
            requires_auth: false,
        }
    }

    /// Sets the operation variables.
    #[must_use]
    pub fn variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Marks the operation as requiring an auth token.
    #[must_use]
    pub const fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Returns the query document.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the operation name.
    #[must_use]
    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    /// Returns `true` if the operation must carry an auth token.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.requires_auth
    }

    /// Validates the request document.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGraphqlRequestError`] if the query or operation name
    /// is blank, or the variables are not a JSON object.
    pub fn verify(&self) -> Result<(), InvalidGraphqlRequestError> {
        if self.query.trim().is_empty() {
            return Err(InvalidGraphqlRequestError::EmptyQuery);
        }
        if self.operation_name.trim().is_empty() {
            return Err(InvalidGraphqlRequestError::EmptyOperationName);
        }
        if self.variables.as_ref().is_some_and(|v| !v.is_object()) {
            return Err(InvalidGraphqlRequestError::VariablesNotObject {
                operation_name: self.operation_name.clone(),
            });
        }
        Ok(())
    }

    /// Validates the request and renders its JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidGraphqlRequestError`] if validation fails.
    pub fn to_body(&self) -> Result<serde_json::Value, InvalidGraphqlRequestError> {
        self.verify()?;
        let mut body = serde_json::Map::new();
        body.insert("query".to_string(), self.query.clone().into());
        body.insert(
            "operationName".to_string(),
            self.operation_name.clone().into(),
        );
        if let Some(variables) = &self.variables {
            body.insert("variables".to_string(), variables.clone());
        }
        Ok(serde_json::Value::Object(body))
    }
}

impl fmt::Debug for GraphqlRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Variables may hold credentials (Login, RenewToken).
        f.debug_struct("GraphqlRequest")
            .field("operation_name", &self.operation_name)
            .field("requires_auth", &self.requires_auth)
            .finish_non_exhaustive()
    }
}
