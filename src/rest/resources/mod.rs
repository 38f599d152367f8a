//! Resource models and their typed operations.
//!
//! Each resource type lives in its own module together with the
//! `CosmosClient` methods that read, query, create, replace and delete it:
//!
//! ```text
//! dbs/{db}                               Database
//! dbs/{db}/colls/{coll}                  Collection
//! dbs/{db}/colls/{coll}/docs/{doc}       Document (any serde type)
//! dbs/{db}/colls/{coll}/sprocs/{sproc}   StoredProcedure
//! dbs/{db}/colls/{coll}/udfs/{udf}       UserDefinedFunction
//! dbs/{db}/colls/{coll}/pkranges         PartitionKeyRange
//! ```
//!
//! Methods that take a parent (`db`, `coll`) accept either a named link
//! such as `dbs/mydb` or a `_self` link; the feed segment is appended.
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmosdb_api::rest::resources::{Collection, Database, PartitionKeyDefinition};
//!
//! let db = client.create_database(&Database::new("shop"), &[]).await?;
//!
//! let orders = Collection::new("orders").with_partition_key(PartitionKeyDefinition::hash("/tenant"));
//! let orders = client.create_collection("dbs/shop", &orders, &[]).await?;
//!
//! for coll in client.query_collections("dbs/shop", "", &[]).await?.iter() {
//!     println!("{}", coll.resource.id);
//! }
//! ```

use serde_json::Value;

use crate::clients::{feed_link, CallOption, CosmosError, PartitionKey};
use crate::rest::{CosmosClient, CosmosResource, PartitionKeyed, ResourceResponse};

mod collection;
mod common;
mod database;
mod document;
mod partition_key_range;
mod stored_procedure;
mod user_defined_function;

pub use collection::{
    Collection, ExcludedPath, IncludedPath, Index, IndexingMode, IndexingPolicy,
    PartitionKeyDefinition,
};
pub use common::{Expirable, Resource};
pub use database::Database;
pub use document::{Document, DOCUMENTS_KEY, DOCUMENTS_FEED};
pub use partition_key_range::PartitionKeyRange;
pub use stored_procedure::StoredProcedure;
pub use user_defined_function::UserDefinedFunction;

impl CosmosClient {
    /// Lists the `T` resources under `parent`: a feed read for empty query
    /// text, a query otherwise.
    pub(crate) async fn list_resources<T: CosmosResource>(
        &self,
        parent: &str,
        query: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<T>>, CosmosError> {
        let link = feed_link(parent, T::FEED);
        let list = if query.trim().is_empty() {
            self.read_feed(&link, T::LIST_KEY, options).await?
        } else {
            self.query(&link, T::LIST_KEY, query, options).await?
        };
        Ok(list.map(|list| list.items))
    }

    /// Returns `options` plus a partition key for a document write.
    ///
    /// Nothing is added for unpartitioned accounts or when the caller passed
    /// a partition key. Otherwise the key comes from
    /// [`PartitionKeyed::partition_key`], falling back to the configured
    /// partition key path looked up in the serialized body.
    pub(crate) fn document_write_options<T: PartitionKeyed + ?Sized>(
        &self,
        doc: &T,
        body: &Value,
        options: &[CallOption],
    ) -> Result<Vec<CallOption>, CosmosError> {
        let mut options = options.to_vec();
        let Some(path) = self.config().partition_key_path() else {
            return Ok(options);
        };
        if options
            .iter()
            .any(|option| matches!(option, CallOption::PartitionKey(_)))
        {
            return Ok(options);
        }

        let key = match doc.partition_key() {
            Some(key) => Some(key),
            None => body.pointer(path).map(PartitionKey::new).transpose()?,
        };
        match key {
            Some(key) => options.push(CallOption::PartitionKey(key)),
            None => tracing::warn!(
                partition_key_path = path,
                "document has no partition key on a partitioned account"
            ),
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CosmosConfig, EndpointUrl, MasterKey};
    use serde_json::json;

    fn client(partition_key_path: Option<&str>) -> CosmosClient {
        let mut builder = CosmosConfig::builder()
            .endpoint(EndpointUrl::new("https://localhost:8081").unwrap())
            .master_key(MasterKey::new("YXJpZWwNCg==").unwrap());
        if let Some(path) = partition_key_path {
            builder = builder.partition_key_path(path);
        }
        CosmosClient::with_transport(builder.build().unwrap(), reqwest::Client::new())
    }

    struct Tenant(&'static str);

    impl PartitionKeyed for Tenant {
        fn partition_key(&self) -> Option<PartitionKey> {
            Some(PartitionKey::from(self.0))
        }
    }

    fn partition_keys(options: &[CallOption]) -> Vec<String> {
        options
            .iter()
            .filter_map(|option| match option {
                CallOption::PartitionKey(key) => Some(key.as_str().to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_unpartitioned_account_adds_nothing() {
        let options = client(None)
            .document_write_options(&json!({"tenant": "acme"}), &json!({"tenant": "acme"}), &[CallOption::Upsert])
            .unwrap();
        assert_eq!(options.len(), 1);
        assert!(partition_keys(&options).is_empty());
    }

    #[test]
    fn test_explicit_partition_key_wins() {
        let options = client(Some("/tenant"))
            .document_write_options(&Tenant("explicit"), &json!({"tenant": "body"}), &[])
            .unwrap();
        assert_eq!(partition_keys(&options), vec![r#"["explicit"]"#]);
    }

    #[test]
    fn test_falls_back_to_configured_path() {
        let body = json!({"id": "1", "address": {"city": "Lyon"}});
        let options = client(Some("/address/city"))
            .document_write_options(&body, &body, &[])
            .unwrap();
        assert_eq!(partition_keys(&options), vec![r#"["Lyon"]"#]);
    }

    #[test]
    fn test_path_without_leading_slash_still_matches() {
        let body = json!({"id": "1", "tenant": "acme"});
        let options = client(Some("tenant"))
            .document_write_options(&body, &body, &[])
            .unwrap();
        assert_eq!(partition_keys(&options), vec![r#"["acme"]"#]);
    }

    #[test]
    fn test_caller_partition_key_is_kept() {
        let body = json!({"tenant": "body"});
        let options = client(Some("/tenant"))
            .document_write_options(&body, &body, &[CallOption::PartitionKey("caller".into())])
            .unwrap();
        assert_eq!(partition_keys(&options), vec![r#"["caller"]"#]);
    }

    #[test]
    fn test_missing_key_adds_nothing() {
        let body = json!({"id": "1"});
        let options = client(Some("/tenant"))
            .document_write_options(&body, &body, &[])
            .unwrap();
        assert!(partition_keys(&options).is_empty());
    }
}
