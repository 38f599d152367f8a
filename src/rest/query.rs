//! Query bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named query parameter such as `@name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParameter {
    /// Parameter name including the `@` prefix.
    pub name: String,
    /// Parameter value.
    pub value: Value,
}

/// A SQL query with named parameters.
///
/// Values are sent as JSON, so they never need quoting or escaping inside
/// the query text.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::rest::QueryWithParameters;
///
/// let query = QueryWithParameters::new("SELECT * FROM c WHERE c.age > @age AND c.city = @city")
///     .parameter("@age", 21)
///     .parameter("@city", "O'Fallon");
///
/// let body = serde_json::to_value(&query).unwrap();
/// assert_eq!(body["parameters"][1]["value"], "O'Fallon");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryWithParameters {
    /// Query text.
    pub query: String,
    /// Parameters referenced by the query.
    #[serde(default)]
    pub parameters: Vec<QueryParameter>,
}

impl QueryWithParameters {
    /// Creates a query without parameters.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: Vec::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.push(QueryParameter {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

impl From<&str> for QueryWithParameters {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for QueryWithParameters {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}
