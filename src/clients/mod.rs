//! Request pipeline for the Cosmos DB REST API.
//!
//! This module turns a resource link plus a list of options into a signed
//! HTTP request, sends it with retries and classifies the answer.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ResourceLink`]: A parsed resource path (type, id, signing link)
//! - [`ResourceRequest`]: An outbound request addressed to one link
//! - [`CallOption`]: One request option, applied in order after signing
//! - [`HttpClient`]: The transport and retry executor
//! - [`RetryPolicy`]: Backoff bounds and attempt limit
//! - [`RequestContext`]: Cancellation and deadline for one call
//! - [`Response`]: Status and headers of a successful call
//! - [`Metrics`]: Decoded query metrics
//! - [`CosmosError`]: Everything a call can fail with
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmosdb_api::clients::{CallOption, ExpectedStatus, HttpClient, HttpMethod, ResourceRequest};
//!
//! let mut request = ResourceRequest::new(HttpMethod::Get, config.endpoint().as_ref(), "dbs/mydb");
//! request.apply_options(&config, &[CallOption::ConsistencyLevel(ConsistencyLevel::Session)])?;
//!
//! let client = HttpClient::new(&config)?;
//! let raw = client.execute(&request, ExpectedStatus::Exact(200)).await?;
//! println!("{} RU", raw.response.request_charge()?);
//! ```
//!
//! # Retry Behavior
//!
//! - **Transport failures and 5xx**: retried with exponential backoff from
//!   `min_wait` to `max_wait`, up to `max_attempts` attempts in total
//! - **Any other unexpected status**: returned at once as a [`RequestError`]
//! - **Context cancelled or expired**: returned at once, even mid-backoff

mod context;
mod errors;
pub mod headers;
mod http_client;
mod http_request;
mod http_response;
mod link;
mod metrics;
mod options;
mod retry;

pub use context::{ContextError, RequestContext};
pub use errors::{
    CosmosError, MaxRetriesExceededError, ParseError, RequestError, TransportError, UsageError,
};
pub use http_client::{HttpClient, RawResponse};
pub use http_request::{HttpMethod, ResourceRequest};
pub use http_response::{ExpectedStatus, Response};
pub use link::{feed_link, ResourceLink, ResourceType};
pub use metrics::{parse_request_charge, Metrics};
pub use options::{CallOption, ConsistencyLevel, IndexingDirective, PartitionKey};
pub use retry::{
    RetryPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_WAIT_MAX, DEFAULT_RETRY_WAIT_MIN,
};
