//! Per-call request options.
//!
//! A [`CallOption`] sets exactly one concern on a [`ResourceRequest`]. Options
//! are applied in order after the default headers, and the first failure
//! stops the pipeline. Headers already written by earlier options are kept.
//!
//! # Header semantics
//!
//! Every option replaces any previous value of its header, so applying
//! `Limit(100)` twice leaves a single `x-ms-max-item-count: 100`. The one
//! exception is [`CallOption::QueryVersion`], which appends and therefore
//! accumulates values.
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmosdb_api::clients::{CallOption, ConsistencyLevel, PartitionKey};
//!
//! let options = [
//!     CallOption::PartitionKey(PartitionKey::from("PO-1234")),
//!     CallOption::ConsistencyLevel(ConsistencyLevel::Session),
//!     CallOption::Limit(50),
//! ];
//! let orders: Vec<Order> = client
//!     .query_documents("dbs/shop/colls/orders", "SELECT * FROM c", &options)
//!     .await?
//!     .into_inner();
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::clients::context::RequestContext;
use crate::clients::errors::{CosmosError, ParseError};
use crate::clients::headers;
use crate::clients::http_request::ResourceRequest;

/// Read consistency requested for a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConsistencyLevel {
    /// Linearizable reads.
    Strong,
    /// Reads lag writes by a bounded amount.
    Bounded,
    /// Read-your-writes within a session.
    Session,
    /// No ordering guarantee.
    Eventual,
}

impl ConsistencyLevel {
    /// Returns the header value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Bounded => "Bounded",
            Self::Session => "Session",
            Self::Eventual => "Eventual",
        }
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a write is added to the collection's index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexingDirective {
    /// Index the document.
    Include,
    /// Do not index the document.
    Exclude,
}

impl IndexingDirective {
    /// Returns the header value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Include => "Include",
            Self::Exclude => "Exclude",
        }
    }
}

/// A JSON-encoded partition key header value.
///
/// Scalar values are wrapped in a single-element array, so `"abc"` becomes
/// `["abc"]`. [`PartitionKey::from_json`] keeps a caller-encoded value
/// unchanged.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::clients::PartitionKey;
///
/// assert_eq!(PartitionKey::from("abc").as_str(), r#"["abc"]"#);
/// assert_eq!(PartitionKey::from(42_i64).as_str(), "[42]");
/// assert_eq!(
///     PartitionKey::from_json(serde_json::json!(["a", 1])).as_str(),
///     r#"["a",1]"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PartitionKey(String);

impl PartitionKey {
    /// Encodes any serializable value as `[value]`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::PartitionKey`] if the value cannot be encoded.
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Result<Self, ParseError> {
        serde_json::to_string(&[value])
            .map(Self)
            .map_err(|e| ParseError::PartitionKey {
                reason: e.to_string(),
            })
    }

    /// Uses an already encoded value as is.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        Self(value.to_string())
    }

    /// Returns the encoded header value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn wrap(value: Value) -> Self {
        Self(Value::Array(vec![value]).to_string())
    }
}

impl From<&str> for PartitionKey {
    fn from(value: &str) -> Self {
        Self::wrap(Value::from(value))
    }
}

impl From<String> for PartitionKey {
    fn from(value: String) -> Self {
        Self::wrap(Value::from(value))
    }
}

impl From<i64> for PartitionKey {
    fn from(value: i64) -> Self {
        Self::wrap(Value::from(value))
    }
}

impl From<bool> for PartitionKey {
    fn from(value: bool) -> Self {
        Self::wrap(Value::from(value))
    }
}

/// One request option.
#[derive(Clone, Debug)]
pub enum CallOption {
    /// Routes the request to a partition.
    PartitionKey(PartitionKey),
    /// Makes a create behave as create-or-replace.
    Upsert,
    /// Maximum number of items per page; `-1` lets the service decide.
    Limit(i32),
    /// Resumes a paged read or query. Empty tokens are ignored.
    Continuation(String),
    /// Overrides the account's default consistency for this call.
    ConsistencyLevel(ConsistencyLevel),
    /// Session token for session consistency. Empty tokens are ignored.
    SessionToken(String),
    /// Allows a query to fan out over all partitions.
    CrossPartition,
    /// Only succeed if the resource's etag matches.
    IfMatch(String),
    /// Only succeed if the resource's etag differs.
    IfNoneMatch(String),
    /// Only succeed if the resource changed after the given HTTP date.
    IfModifiedSince(String),
    /// Reads a feed as a change feed.
    ChangeFeed,
    /// Throughput to provision when creating a collection.
    ThroughputRUs(u32),
    /// Restricts a read or query to one partition key range.
    PartitionKeyRangeId(String),
    /// Allows queries that need a scan.
    EnableQueryScan,
    /// Runs a cross-partition query in parallel.
    ParallelizeCrossPartition,
    /// Asks the service to return query metrics.
    PopulateQueryMetrics,
    /// Appends the supported query version.
    QueryVersion,
    /// Include or exclude a write from indexing.
    IndexingDirective(IndexingDirective),
    /// Attaches a cancellation context.
    Context(RequestContext),
}

impl CallOption {
    /// Convenience for `CallOption::PartitionKey(PartitionKey::new(value)?)`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::PartitionKey`] if the value cannot be encoded.
    pub fn partition_key<T: Serialize + ?Sized>(value: &T) -> Result<Self, ParseError> {
        PartitionKey::new(value).map(Self::PartitionKey)
    }

    /// Applies this option to a request.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidHeaderValue`] if the option's value is
    /// not a legal header value.
    pub fn apply(&self, request: &mut ResourceRequest) -> Result<(), CosmosError> {
        match self {
            Self::PartitionKey(key) => request.set_header(headers::PARTITION_KEY, key.as_str())?,
            Self::Upsert => request.set_header(headers::UPSERT, "true")?,
            Self::Limit(limit) => {
                request.set_header(headers::MAX_ITEM_COUNT, &limit.to_string())?;
            }
            Self::Continuation(token) => {
                if !token.is_empty() {
                    request.set_header(headers::CONTINUATION, token)?;
                }
            }
            Self::ConsistencyLevel(level) => {
                request.set_header(headers::CONSISTENCY_LEVEL, level.as_str())?;
            }
            Self::SessionToken(token) => {
                if !token.is_empty() {
                    request.set_header(headers::SESSION_TOKEN, token)?;
                }
            }
            Self::CrossPartition => request.set_header(headers::ENABLE_CROSS_PARTITION, "true")?,
            Self::IfMatch(etag) => request.set_header(headers::IF_MATCH, etag)?,
            Self::IfNoneMatch(etag) => request.set_header(headers::IF_NONE_MATCH, etag)?,
            Self::IfModifiedSince(date) => request.set_header(headers::IF_MODIFIED_SINCE, date)?,
            Self::ChangeFeed => request.set_header(headers::A_IM, headers::INCREMENTAL_FEED)?,
            Self::ThroughputRUs(rus) => {
                request.set_header(headers::OFFER_THROUGHPUT, &rus.to_string())?;
            }
            Self::PartitionKeyRangeId(id) => {
                request.set_header(headers::PARTITION_KEY_RANGE_ID, id)?;
            }
            Self::EnableQueryScan => request.set_header(headers::ENABLE_QUERY_SCAN, "true")?,
            Self::ParallelizeCrossPartition => {
                request.set_header(headers::PARALLELIZE_CROSS_PARTITION_QUERY, "true")?;
            }
            Self::PopulateQueryMetrics => {
                request.set_header(headers::POPULATE_QUERY_METRICS, "true")?;
            }
            Self::QueryVersion => {
                request.add_header(headers::QUERY_VERSION, headers::SUPPORTED_QUERY_VERSION)?;
            }
            Self::IndexingDirective(directive) => {
                request.set_header(headers::INDEXING_DIRECTIVE, directive.as_str())?;
            }
            Self::Context(ctx) => request.context = Some(ctx.clone()),
        }
        Ok(())
    }
}
