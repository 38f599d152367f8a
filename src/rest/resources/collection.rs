//! Collections and their indexing and partitioning settings.

use serde::{Deserialize, Serialize};

use crate::clients::{feed_link, CallOption, CosmosError, Response};
use crate::rest::{CosmosClient, CosmosResource, HasResource, ResourceResponse};

use super::common::Resource;

/// When the index is updated relative to writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexingMode {
    /// Synchronously with every write.
    Consistent,
    /// Asynchronously.
    Lazy,
    /// No index.
    None,
}

/// One index on an included path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    /// `String`, `Number`, `Point`, ...
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_type: String,

    /// `Hash`, `Range` or `Spatial`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Index precision; `-1` for maximum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,
}

/// A path to index, e.g. `/*`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludedPath {
    /// Document path.
    pub path: String,

    /// Indexes kept for this path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<Index>,
}

/// A path left out of the index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedPath {
    /// Document path.
    pub path: String,
}

/// How documents of a collection are indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexingPolicy {
    /// Index every document unless it opts out.
    #[serde(default)]
    pub automatic: bool,

    /// Index update mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_mode: Option<IndexingMode>,

    /// Indexed paths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_paths: Vec<IncludedPath>,

    /// Paths not indexed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_paths: Vec<ExcludedPath>,
}

/// The document paths a collection is partitioned by.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::rest::resources::PartitionKeyDefinition;
///
/// let definition = PartitionKeyDefinition::hash("/tenant");
/// assert_eq!(
///     serde_json::to_string(&definition).unwrap(),
///     r#"{"kind":"Hash","paths":["/tenant"]}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionKeyDefinition {
    /// Partitioning scheme, `Hash` in practice.
    pub kind: String,

    /// Partition key paths.
    pub paths: Vec<String>,

    /// Hash version, set by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

impl PartitionKeyDefinition {
    /// Hash partitioning on one path.
    #[must_use]
    pub fn hash(path: impl Into<String>) -> Self {
        Self {
            kind: "Hash".to_string(),
            paths: vec![path.into()],
            version: None,
        }
    }
}

/// A collection of documents, stored procedures and functions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// System properties.
    #[serde(flatten)]
    pub resource: Resource,

    /// Indexing policy; the service default when absent.
    #[serde(rename = "indexingPolicy", default, skip_serializing_if = "Option::is_none")]
    pub indexing_policy: Option<IndexingPolicy>,

    /// Partitioning; `None` for a single-partition collection.
    #[serde(rename = "partitionKey", default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<PartitionKeyDefinition>,

    /// Default document time to live in seconds, `-1` for no expiry.
    #[serde(rename = "defaultTtl", default, skip_serializing_if = "Option::is_none")]
    pub default_ttl: Option<i64>,

    /// Link to the documents feed.
    #[serde(rename = "_docs", default, skip_serializing_if = "String::is_empty")]
    pub docs: String,

    /// Link to the user defined functions feed.
    #[serde(rename = "_udfs", default, skip_serializing_if = "String::is_empty")]
    pub udfs: String,

    /// Link to the stored procedures feed.
    #[serde(rename = "_sprocs", default, skip_serializing_if = "String::is_empty")]
    pub sprocs: String,

    /// Link to the triggers feed.
    #[serde(rename = "_triggers", default, skip_serializing_if = "String::is_empty")]
    pub triggers: String,

    /// Link to the conflicts feed.
    #[serde(rename = "_conflicts", default, skip_serializing_if = "String::is_empty")]
    pub conflicts: String,
}

impl Collection {
    /// Creates a collection body with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            resource: Resource::with_id(id),
            ..Self::default()
        }
    }

    /// Sets the partition key definition.
    #[must_use]
    pub fn with_partition_key(mut self, definition: PartitionKeyDefinition) -> Self {
        self.partition_key = Some(definition);
        self
    }

    /// Sets the indexing policy.
    #[must_use]
    pub fn with_indexing_policy(mut self, policy: IndexingPolicy) -> Self {
        self.indexing_policy = Some(policy);
        self
    }
}

impl CosmosResource for Collection {
    const FEED: &'static str = "colls";
    const LIST_KEY: &'static str = "DocumentCollections";
}

impl HasResource for Collection {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl CosmosClient {
    /// Reads a collection, e.g. `dbs/mydb/colls/orders`.
    ///
    /// # Errors
    ///
    /// Returns any error of [`read`](Self::read).
    pub async fn read_collection(
        &self,
        link: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Collection>, CosmosError> {
        self.read(link, options).await
    }

    /// Lists the collections of a database.
    ///
    /// # Errors
    ///
    /// Returns any error of [`read_feed`](Self::read_feed).
    pub async fn read_collections(
        &self,
        db: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<Collection>>, CosmosError> {
        self.list_resources(db, "", options).await
    }

    /// Lists the collections of a database matching `query`, or all of them
    /// for empty text.
    ///
    /// # Errors
    ///
    /// Returns any error of [`query`](Self::query).
    pub async fn query_collections(
        &self,
        db: &str,
        query: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<Collection>>, CosmosError> {
        self.list_resources(db, query, options).await
    }

    /// Creates a collection. Pass [`CallOption::ThroughputRUs`] to provision
    /// throughput.
    ///
    /// # Errors
    ///
    /// Returns any error of [`create`](Self::create).
    pub async fn create_collection(
        &self,
        db: &str,
        collection: &Collection,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Collection>, CosmosError> {
        self.create(&feed_link(db, Collection::FEED), collection, options)
            .await
    }

    /// Replaces a collection, e.g. to change its indexing policy.
    ///
    /// # Errors
    ///
    /// Returns any error of [`replace`](Self::replace).
    pub async fn replace_collection(
        &self,
        link: &str,
        collection: &Collection,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Collection>, CosmosError> {
        self.replace(link, collection, options).await
    }

    /// Deletes a collection and everything in it.
    ///
    /// # Errors
    ///
    /// Returns any error of [`delete`](Self::delete).
    pub async fn delete_collection(
        &self,
        link: &str,
        options: &[CallOption],
    ) -> Result<Response, CosmosError> {
        self.delete(link, options).await
    }
}
