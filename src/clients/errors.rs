//! Error types for Cosmos DB requests.
//!
//! # Error Handling
//!
//! Every operation returns [`CosmosError`], which wraps one of:
//!
//! - [`ConfigError`]: The client could not be constructed
//! - [`AuthError`]: The master key could not sign the request
//! - [`TransportError`]: A request that could not be sent at all
//! - [`ContextError`]: The attached [`RequestContext`](super::RequestContext) ended
//! - [`RequestError`]: The service answered with an unexpected status
//! - [`MaxRetriesExceededError`]: Every attempt failed with a retryable error
//! - [`ParseError`]: A body or header could not be decoded
//! - [`UsageError`]: The caller passed an unusable argument
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmosdb_api::clients::CosmosError;
//!
//! match client.read_database("dbs/mydb", &[]).await {
//!     Ok(db) => println!("found {}", db.resource.id),
//!     Err(CosmosError::Request(e)) if e.status_code == 404 => println!("missing"),
//!     Err(e) if e.is_cancellation() => println!("gave up: {e}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::context::ContextError;
use crate::error::ConfigError;

/// The service answered with a status other than the one the operation
/// expects.
///
/// `code` and `message` come from the JSON error body; a body that is not
/// JSON is kept verbatim in `message`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{method} {url} failed with status {status_code}: {code}, {message}")]
pub struct RequestError {
    /// Service error code, e.g. `NotFound`.
    pub code: String,
    /// Service error message.
    pub message: String,
    /// HTTP status of the response.
    pub status_code: u16,
    /// Id parsed from the request link.
    pub resource_id: String,
    /// Type parsed from the request link.
    pub resource_type: String,
    /// HTTP method of the request.
    pub method: String,
    /// Full request URL.
    pub url: String,
}

/// Every attempt failed with a transport error or a 5xx status.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("giving up after {attempts} attempts: {message}")]
pub struct MaxRetriesExceededError {
    /// Number of attempts made.
    pub attempts: u32,
    /// Status of the last response, if one was received.
    pub last_status: Option<u16>,
    /// Description of the last failure.
    pub message: String,
    /// Id parsed from the request link.
    pub resource_id: String,
    /// Type parsed from the request link.
    pub resource_type: String,
}

/// A request that failed before any response was received and was not
/// retried, e.g. because the URL could not be built.
#[derive(Debug, Error)]
#[error("{method} {url} (resource id '{resource_id}', type '{resource_type}'): {source}")]
pub struct TransportError {
    /// Id parsed from the request link.
    pub resource_id: String,
    /// Type parsed from the request link.
    pub resource_type: String,
    /// HTTP method of the request.
    pub method: String,
    /// Full request URL.
    pub url: String,
    /// The underlying failure.
    #[source]
    pub source: reqwest::Error,
}

/// A body or header could not be decoded.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The response body was not the expected JSON.
    #[error("failed to decode response body: {0}")]
    Json(#[from] serde_json::Error),

    /// The query metrics header was absent or empty.
    #[error("no metrics in response")]
    NoMetrics,

    /// A query metrics entry had a non-numeric value.
    #[error("invalid query metric '{key}': '{value}'")]
    InvalidMetric {
        /// The metric name.
        key: String,
        /// The value that failed to parse.
        value: String,
    },

    /// The request charge header was not numeric.
    #[error("invalid request charge '{value}'")]
    InvalidRequestCharge {
        /// The header value.
        value: String,
    },

    /// A partition key value could not be encoded as JSON.
    #[error("failed to encode partition key: {reason}")]
    PartitionKey {
        /// The encoder's message.
        reason: String,
    },

    /// An option produced a value that is not a legal header value.
    #[error("invalid value for header '{name}'")]
    InvalidHeaderValue {
        /// The header name.
        name: &'static str,
    },
}

/// The caller passed an argument the operation cannot use.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    /// A query operation was given empty query text.
    #[error("query text cannot be empty")]
    EmptyQuery,

    /// A conditional replace was given a body without `_etag`.
    #[error("_etag does not exist for conditional replace")]
    MissingEtag,
}

/// Unified error type for all client operations.
#[derive(Debug, Error)]
pub enum CosmosError {
    /// Client construction failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Request signing failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request could not be sent.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request context was cancelled or timed out.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Unexpected response status.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxRetriesExceededError),

    /// Decoding failed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Invalid argument.
    #[error(transparent)]
    Usage(#[from] UsageError),
}

impl CosmosError {
    /// Returns `true` if the request was stopped by its context.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Context(_))
    }

    /// Returns the HTTP status that caused the error, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request(e) => Some(e.status_code),
            Self::MaxRetries(e) => e.last_status,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CosmosError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(ParseError::Json(error))
    }
}
