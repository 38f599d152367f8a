//! Resource capabilities.
//!
//! Every typed resource implements [`CosmosResource`], which names the feed
//! segment it lives under and the key its list envelope uses:
//!
//! ```text
//! GET dbs/mydb/colls/
//! {"_rid": "...", "DocumentCollections": [...], "_count": 2}
//! ```
//!
//! [`HasResource`] exposes the shared system properties and
//! [`PartitionKeyed`] lets a body name its own partition key, so writes to
//! partitioned collections can attach the partition key header without
//! looking fields up by name.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::{ParseError, PartitionKey};
use crate::rest::resources::Resource;

/// A resource type addressable through a feed.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::rest::CosmosResource;
/// use cosmosdb_api::rest::resources::Collection;
///
/// assert_eq!(Collection::FEED, "colls");
/// assert_eq!(Collection::LIST_KEY, "DocumentCollections");
/// ```
pub trait CosmosResource: Serialize + DeserializeOwned + Send + Sync {
    /// Path segment of the feed, e.g. `colls`.
    const FEED: &'static str;

    /// Key holding the items in a feed or query response.
    const LIST_KEY: &'static str;
}

/// Access to the system properties shared by every resource.
pub trait HasResource {
    /// Returns the system properties.
    fn resource(&self) -> &Resource;

    /// Returns the system properties mutably.
    fn resource_mut(&mut self) -> &mut Resource;

    /// Returns the resource id.
    fn id(&self) -> &str {
        &self.resource().id
    }

    /// Returns the etag, if the resource has been stored.
    fn etag(&self) -> Option<&str> {
        Some(self.resource().etag.as_str()).filter(|e| !e.is_empty())
    }
}

/// A body that knows its partition key.
///
/// Document writes to a partitioned collection attach the value returned
/// here as the partition key header. Returning `None` falls back to
/// looking up the configured partition key path in the serialized body.
///
/// # Example
///
/// ```rust
/// use cosmosdb_api::clients::PartitionKey;
/// use cosmosdb_api::rest::PartitionKeyed;
///
/// struct Order {
///     tenant: String,
/// }
///
/// impl PartitionKeyed for Order {
///     fn partition_key(&self) -> Option<PartitionKey> {
///         Some(PartitionKey::from(self.tenant.as_str()))
///     }
/// }
///
/// let order = Order { tenant: "acme".into() };
/// assert_eq!(order.partition_key().unwrap().as_str(), r#"["acme"]"#);
/// ```
pub trait PartitionKeyed {
    /// Returns the partition key of this body.
    fn partition_key(&self) -> Option<PartitionKey> {
        None
    }
}

impl PartitionKeyed for Value {}

impl<T: PartitionKeyed + ?Sized> PartitionKeyed for &T {
    fn partition_key(&self) -> Option<PartitionKey> {
        (**self).partition_key()
    }
}

/// Items of a feed or query response and the service's item count.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceList<T> {
    /// Decoded items.
    pub items: Vec<T>,
    /// The `_count` reported by the service.
    pub count: u64,
}

impl<T> Default for ResourceList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
        }
    }
}

impl<T: DeserializeOwned> ResourceList<T> {
    /// Decodes a response body, taking the items from `key`.
    ///
    /// A missing key yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Json`] if the body or an item does not decode.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cosmosdb_api::rest::ResourceList;
    ///
    /// let body = br#"{"_rid":"x","Documents":[{"n":1},{"n":2}],"_count":2}"#;
    /// let list: ResourceList<serde_json::Value> = ResourceList::decode(body, "Documents").unwrap();
    /// assert_eq!(list.items.len(), 2);
    /// assert_eq!(list.count, 2);
    /// ```
    pub fn decode(body: &[u8], key: &str) -> Result<Self, ParseError> {
        let mut envelope: Value = serde_json::from_slice(body)?;
        let count = envelope.get("_count").and_then(Value::as_u64).unwrap_or(0);
        let items = match envelope.get_mut(key).map(Value::take) {
            Some(Value::Null) | None => Vec::new(),
            Some(items) => serde_json::from_value(items)?,
        };
        Ok(Self { items, count })
    }
}

impl<T> IntoIterator for ResourceList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::resources::{Collection, Database};

    #[test]
    fn test_decode_uses_list_key() {
        let body = br#"{"_rid":"","Databases":[{"id":"a","_rid":"r1"},{"id":"b"}],"_count":2}"#;
        let list: ResourceList<Database> = ResourceList::decode(body, Database::LIST_KEY).unwrap();

        assert_eq!(list.count, 2);
        let ids: Vec<_> = list.into_iter().map(|db| db.resource.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_missing_key_is_empty() {
        let list: ResourceList<Collection> = ResourceList::decode(br#"{"_count":0}"#, "DocumentCollections").unwrap();
        assert!(list.items.is_empty());

        let list: ResourceList<Collection> =
            ResourceList::decode(br#"{"DocumentCollections":null}"#, "DocumentCollections").unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed_body() {
        let result: Result<ResourceList<Value>, _> = ResourceList::decode(b"not json", "Documents");
        assert!(matches!(result, Err(ParseError::Json(_))));

        let result: Result<ResourceList<Database>, _> =
            ResourceList::decode(br#"{"Databases":"nope"}"#, "Databases");
        assert!(result.is_err());
    }

    #[test]
    fn test_has_resource_etag() {
        let mut db = Database::default();
        assert_eq!(db.etag(), None);
        db.resource_mut().etag = "\"0000\"".to_string();
        assert_eq!(db.etag(), Some("\"0000\""));
    }

    #[test]
    fn test_value_has_no_explicit_partition_key() {
        assert!(serde_json::json!({"pk": "a"}).partition_key().is_none());
    }
}
