//! Response headers and status validation.
//!
//! Decoded bodies are returned separately; [`Response`] keeps the status and
//! raw headers so callers can pick up continuation tokens, session tokens,
//! request charges and query metrics.

use reqwest::header::HeaderMap;

use crate::clients::errors::ParseError;
use crate::clients::headers;
use crate::clients::metrics::{parse_request_charge, Metrics};

/// The status a call must receive to count as a success.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::clients::ExpectedStatus;
///
/// assert!(ExpectedStatus::Exact(201).matches(201));
/// assert!(!ExpectedStatus::Exact(201).matches(200));
/// assert!(ExpectedStatus::Class(400).matches(499));
/// assert!(!ExpectedStatus::Class(400).matches(500));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedStatus {
    /// Exactly this status.
    Exact(u16),
    /// Any status in the same hundred.
    Class(u16),
}

impl ExpectedStatus {
    /// Returns `true` if `status` satisfies this expectation.
    #[must_use]
    pub const fn matches(self, status: u16) -> bool {
        match self {
            Self::Exact(expected) => status == expected,
            Self::Class(expected) => status / 100 == expected / 100,
        }
    }
}

/// Status and headers of a successful call.
#[derive(Clone, Debug, Default)]
pub struct Response {
    status: u16,
    headers: HeaderMap,
}

impl Response {
    /// Creates a response from a status and header map.
    #[must_use]
    pub const fn new(status: u16, headers: HeaderMap) -> Self {
        Self { status, headers }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the first value of a header, if it is valid text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn non_empty(&self, name: &str) -> Option<&str> {
        self.header(name).filter(|v| !v.is_empty())
    }

    /// Returns the continuation token, or `None` when there are no more pages.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.non_empty(headers::CONTINUATION)
    }

    /// Returns the session token.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.non_empty(headers::SESSION_TOKEN)
    }

    /// Returns the service's activity id for support requests.
    #[must_use]
    pub fn activity_id(&self) -> Option<&str> {
        self.non_empty(headers::ACTIVITY_ID)
    }

    /// Returns the request units consumed, zero if the header is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidRequestCharge`] if the header is not numeric.
    pub fn request_charge(&self) -> Result<f64, ParseError> {
        self.header(headers::REQUEST_CHARGE)
            .map_or(Ok(0.0), parse_request_charge)
    }

    /// Decodes the query metrics header together with the request charge.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoMetrics`] if the response carries no metrics,
    /// for example because the request was not a query or metrics were not
    /// requested.
    pub fn query_metrics(&self) -> Result<Metrics, ParseError> {
        Metrics::decode(
            self.header(headers::QUERY_METRICS).unwrap_or_default(),
            self.header(headers::REQUEST_CHARGE),
        )
    }
}
