//! Header names used by the Cosmos DB REST API.
//!
//! Names are lowercase so they can be used with
//! [`HeaderName::from_static`](reqwest::header::HeaderName::from_static);
//! HTTP header names are case-insensitive on the wire.

/// Service-assigned id of one request, for support cases.
pub const ACTIVITY_ID: &str = "x-ms-activity-id";
/// Requests incremental (change feed) reads.
pub const A_IM: &str = "a-im";
/// Master-key authorization token.
pub const AUTHORIZATION: &str = "authorization";
/// Consistency level override for one request.
pub const CONSISTENCY_LEVEL: &str = "x-ms-consistency-level";
/// Body content type.
pub const CONTENT_TYPE: &str = "content-type";
/// Continuation token of a paged read or query.
pub const CONTINUATION: &str = "x-ms-continuation";
/// Allows a query to span partitions.
pub const ENABLE_CROSS_PARTITION: &str = "x-ms-documentdb-query-enablecrosspartition";
/// Allows a query to scan when no index serves it.
pub const ENABLE_QUERY_SCAN: &str = "x-ms-documentdb-query-enable-scan";
/// Etag a write is conditional on.
pub const IF_MATCH: &str = "if-match";
/// Only return changes after this date.
pub const IF_MODIFIED_SINCE: &str = "if-modified-since";
/// Etag a read is conditional on not matching.
pub const IF_NONE_MATCH: &str = "if-none-match";
/// Includes or excludes a document from the index.
pub const INDEXING_DIRECTIVE: &str = "x-ms-indexing-directive";
/// Marks a POST as a query.
pub const IS_QUERY: &str = "x-ms-documentdb-isquery";
/// Maximum number of items per page.
pub const MAX_ITEM_COUNT: &str = "x-ms-max-item-count";
/// Provisioned throughput in request units.
pub const OFFER_THROUGHPUT: &str = "x-ms-offer-throughput";
/// Runs a cross-partition query in parallel.
pub const PARALLELIZE_CROSS_PARTITION_QUERY: &str =
    "x-ms-documentdb-query-parallelizecrosspartitionquery";
/// Partition key of the target document, as a JSON array.
pub const PARTITION_KEY: &str = "x-ms-documentdb-partitionkey";
/// Restricts a read to one partition key range.
pub const PARTITION_KEY_RANGE_ID: &str = "x-ms-documentdb-partitionkeyrangeid";
/// Asks the service for query metrics.
pub const POPULATE_QUERY_METRICS: &str = "x-ms-documentdb-populatequerymetrics";
/// Query metrics returned by the service.
pub const QUERY_METRICS: &str = "x-ms-documentdb-query-metrics";
/// Query protocol version.
pub const QUERY_VERSION: &str = "x-ms-cosmos-query-version";
/// Request units consumed by a request.
pub const REQUEST_CHARGE: &str = "x-ms-request-charge";
/// Session token for session consistency.
pub const SESSION_TOKEN: &str = "x-ms-session-token";
/// Turns a create into an upsert.
pub const UPSERT: &str = "x-ms-documentdb-is-upsert";
/// Client user agent.
pub const USER_AGENT: &str = "user-agent";
/// REST API version.
pub const VERSION: &str = "x-ms-version";
/// Request date the signature covers.
pub const DATE: &str = "x-ms-date";

/// `a-im` value that turns a feed read into a change feed read.
pub const INCREMENTAL_FEED: &str = "Incremental feed";

/// Content type of query requests.
pub const QUERY_CONTENT_TYPE: &str = "application/query+json";

/// Value of the query-version header.
pub const SUPPORTED_QUERY_VERSION: &str = "1.0";
