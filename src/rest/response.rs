//! Typed response wrapper.
//!
//! [`ResourceResponse<T>`] pairs a decoded body with the [`Response`] it came
//! from, so callers can read the data directly and still reach continuation
//! tokens, session tokens, request charges and query metrics.
//!
//! # Deref Pattern
//!
//! `ResourceResponse<T>` implements `Deref<Target = T>`:
//!
//! ```rust,ignore
//! let dbs: ResourceResponse<Vec<Database>> = client.query_databases("", &[]).await?;
//!
//! for db in dbs.iter() {
//!     println!("{}", db.id);
//! }
//! println!("charge: {}", dbs.request_charge()?);
//! ```

use std::ops::{Deref, DerefMut};

use crate::clients::{Metrics, ParseError, Response};

/// Decoded data plus the status and headers of the call that produced it.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::clients::Response;
/// use cosmosdb_api::rest::ResourceResponse;
///
/// let response = ResourceResponse::new(vec!["a", "b"], Response::default());
///
/// assert_eq!(response.len(), 2);
/// assert_eq!(response[0], "a");
/// assert_eq!(response.continuation(), None);
/// ```
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    response: Response,
}

impl<T> ResourceResponse<T> {
    /// Creates a response from decoded data and the raw response.
    #[must_use]
    pub const fn new(data: T, response: Response) -> Self {
        Self { data, response }
    }

    /// Consumes the response and returns the inner data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Splits into data and raw response.
    #[must_use]
    pub fn into_parts(self) -> (T, Response) {
        (self.data, self.response)
    }

    /// Returns a reference to the inner data.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Returns a mutable reference to the inner data.
    #[must_use]
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Returns the status and headers.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }

    /// Returns the continuation token, or `None` on the last page.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.response.continuation()
    }

    /// Returns the session token.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.response.session_token()
    }

    /// Returns the request units consumed.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidRequestCharge`] if the header is malformed.
    pub fn request_charge(&self) -> Result<f64, ParseError> {
        self.response.request_charge()
    }

    /// Decodes the query metrics of this call.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::NoMetrics`] if none were returned.
    pub fn query_metrics(&self) -> Result<Metrics, ParseError> {
        self.response.query_metrics()
    }

    /// Maps the inner data, keeping the headers.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ResourceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ResourceResponse {
            data: f(self.data),
            response: self.response,
        }
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::headers;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

    fn with_headers(pairs: &[(&'static str, &'static str)]) -> Response {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
        }
        Response::new(200, map)
    }

    #[test]
    fn test_deref_reaches_inner_data() {
        let mut response = ResourceResponse::new(vec![1, 2, 3], Response::default());
        assert_eq!(response.len(), 3);
        response.push(4);
        assert_eq!(response.data(), &vec![1, 2, 3, 4]);
        assert_eq!(response.into_inner(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_header_accessors_delegate() {
        let response = ResourceResponse::new(
            (),
            with_headers(&[
                (headers::CONTINUATION, "token-2"),
                (headers::SESSION_TOKEN, "0:42"),
                (headers::REQUEST_CHARGE, "3.5"),
            ]),
        );
        assert_eq!(response.continuation(), Some("token-2"));
        assert_eq!(response.session_token(), Some("0:42"));
        assert_eq!(response.request_charge().unwrap(), 3.5);
        assert!(matches!(response.query_metrics(), Err(ParseError::NoMetrics)));
    }

    #[test]
    fn test_map_keeps_response() {
        let response = ResourceResponse::new(vec!["a"], with_headers(&[(headers::CONTINUATION, "c")]));
        let mapped = response.map(|v| v.len());
        assert_eq!(*mapped, 1);
        assert_eq!(mapped.continuation(), Some("c"));

        let (data, raw) = mapped.into_parts();
        assert_eq!(data, 1);
        assert_eq!(raw.status(), 200);
    }
}
