//! Configuration types for the Cosmos DB client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`CosmosConfig`]: All settings a client needs, immutable once built
//! - [`CosmosConfigBuilder`]: A builder for constructing [`CosmosConfig`] instances
//! - [`MasterKey`]: The account key, masked in debug output
//! - [`EndpointUrl`]: A validated account endpoint
//! - [`ApiVersion`]: The REST API version sent with each request
//!
//! # Example
//!
//! ```rust
//! use cosmosdb_api::{CosmosConfig, EndpointUrl, MasterKey};
//!
//! let config = CosmosConfig::builder()
//!     .endpoint(EndpointUrl::new("https://myaccount.documents.azure.com").unwrap())
//!     .master_key(MasterKey::new("YXJpZWwNCg==").unwrap())
//!     .partition_key_path("/ponumber")
//!     .build()
//!     .unwrap();
//!
//! assert!(config.is_partitioned());
//! ```

mod newtypes;
mod version;

pub use newtypes::{EndpointUrl, MasterKey};
pub use version::ApiVersion;

use crate::clients::RetryPolicy;
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for a [`CosmosClient`](crate::CosmosClient).
///
/// # Thread Safety
///
/// `CosmosConfig` is `Clone`, `Send`, and `Sync`. Each client owns its own
/// copy; nothing is shared between clients.
#[derive(Clone, Debug)]
pub struct CosmosConfig {
    endpoint: EndpointUrl,
    master_key: MasterKey,
    api_version: ApiVersion,
    debug: bool,
    verbose: bool,
    partition_key_path: Option<String>,
    retry: RetryPolicy,
    pooled: bool,
    user_agent_prefix: Option<String>,
}

impl CosmosConfig {
    /// Creates a new builder for constructing a `CosmosConfig`.
    #[must_use]
    pub fn builder() -> CosmosConfigBuilder {
        CosmosConfigBuilder::new()
    }

    /// Returns the account endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &EndpointUrl {
        &self.endpoint
    }

    /// Returns the master key.
    #[must_use]
    pub const fn master_key(&self) -> &MasterKey {
        &self.master_key
    }

    /// Returns the API version.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns whether request tracing and query metrics are enabled.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns whether response headers are traced as well.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Returns the collection's partition key path, if any.
    #[must_use]
    pub fn partition_key_path(&self) -> Option<&str> {
        self.partition_key_path.as_deref()
    }

    /// Returns `true` if a partition key path is configured.
    #[must_use]
    pub const fn is_partitioned(&self) -> bool {
        self.partition_key_path.is_some()
    }

    /// Returns the retry policy.
    #[must_use]
    pub const fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns whether idle connections are pooled between requests.
    #[must_use]
    pub const fn pooled(&self) -> bool {
        self.pooled
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the User-Agent header value.
    #[must_use]
    pub fn user_agent(&self) -> String {
        self.user_agent_prefix.as_deref().map_or_else(
            || format!("cosmosdb-api-rust/{SDK_VERSION}"),
            |prefix| format!("{prefix} | cosmosdb-api-rust/{SDK_VERSION}"),
        )
    }

    pub(crate) fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }
}

// Verify CosmosConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CosmosConfig>();
};

/// Builder for constructing [`CosmosConfig`] instances.
///
/// Required fields are `endpoint` and `master_key`.
///
/// # Defaults
///
/// - `api_version`: [`ApiVersion::latest()`]
/// - `debug`, `verbose`: `false`
/// - `partition_key_path`: `None`
/// - `retry`: [`RetryPolicy::default()`] (10ms / 50ms / 5 attempts)
/// - `pooled`: `true`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct CosmosConfigBuilder {
    endpoint: Option<EndpointUrl>,
    master_key: Option<MasterKey>,
    api_version: Option<ApiVersion>,
    debug: Option<bool>,
    verbose: Option<bool>,
    partition_key_path: Option<String>,
    retry: Option<RetryPolicy>,
    pooled: Option<bool>,
    user_agent_prefix: Option<String>,
}

impl CosmosConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the account endpoint (required).
    #[must_use]
    pub fn endpoint(mut self, endpoint: EndpointUrl) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Sets the master key (required).
    #[must_use]
    pub fn master_key(mut self, key: MasterKey) -> Self {
        self.master_key = Some(key);
        self
    }

    /// Sets the API version.
    #[must_use]
    pub fn api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Enables request tracing and query metrics collection.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Enables response header tracing.
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Sets the partition key path of the collection this client writes to,
    /// e.g. `/ponumber`. A missing leading `/` is added.
    #[must_use]
    pub fn partition_key_path(mut self, path: impl Into<String>) -> Self {
        self.partition_key_path = Some(path.into());
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Sets whether idle connections are kept for reuse.
    #[must_use]
    pub const fn pooled(mut self, pooled: bool) -> Self {
        self.pooled = Some(pooled);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`CosmosConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `endpoint` or
    /// `master_key` are not set.
    pub fn build(self) -> Result<CosmosConfig, ConfigError> {
        let endpoint = self
            .endpoint
            .ok_or(ConfigError::MissingRequiredField { field: "endpoint" })?;
        let master_key = self.master_key.ok_or(ConfigError::MissingRequiredField {
            field: "master_key",
        })?;

        Ok(CosmosConfig {
            endpoint,
            master_key,
            api_version: self.api_version.unwrap_or_else(ApiVersion::latest),
            debug: self.debug.unwrap_or(false),
            verbose: self.verbose.unwrap_or(false),
            partition_key_path: self
                .partition_key_path
                .filter(|p| !p.is_empty())
                .map(|p| if p.starts_with('/') { p } else { format!("/{p}") }),
            retry: self.retry.unwrap_or_default(),
            pooled: self.pooled.unwrap_or(true),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}
