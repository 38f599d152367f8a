//! Documents.
//!
//! Document operations are generic over the caller's own serde types. Flatten
//! [`Document`] into a model to get the system properties, and implement
//! [`PartitionKeyed`] for it:
//!
//! ```rust
//! use cosmosdb_api::clients::PartitionKey;
//! use cosmosdb_api::rest::resources::{Document, Expirable};
//! use cosmosdb_api::rest::PartitionKeyed;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Order {
//!     #[serde(flatten)]
//!     document: Document,
//!     #[serde(flatten)]
//!     expirable: Expirable,
//!     tenant: String,
//!     total: f64,
//! }
//!
//! impl PartitionKeyed for Order {
//!     fn partition_key(&self) -> Option<PartitionKey> {
//!         Some(PartitionKey::from(self.tenant.as_str()))
//!     }
//! }
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{feed_link, CallOption, CosmosError, ParseError, Response};
use crate::rest::{
    CosmosClient, HasResource, PartitionKeyed, QueryWithParameters, ResourceResponse,
};

use super::common::Resource;

/// Feed segment of documents.
pub const DOCUMENTS_FEED: &str = "docs";

/// Envelope key of document lists.
pub const DOCUMENTS_KEY: &str = "Documents";

/// System properties of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// System properties.
    #[serde(flatten)]
    pub resource: Resource,

    /// Link to the attachments feed.
    #[serde(
        rename = "_attachments",
        alias = "attachments",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub attachments: String,
}

impl HasResource for Document {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl PartitionKeyed for Document {}

/// Serializes a document and gives it a random id if it has none.
fn with_id<T: Serialize + ?Sized>(doc: &T) -> Result<Value, ParseError> {
    let mut body = serde_json::to_value(doc)?;
    if let Value::Object(fields) = &mut body {
        let has_id = fields
            .get("id")
            .and_then(Value::as_str)
            .is_some_and(|id| !id.is_empty());
        if !has_id {
            fields.insert("id".to_string(), Value::from(uuid::Uuid::new_v4().to_string()));
        }
    }
    Ok(body)
}

impl CosmosClient {
    /// Reads a document, e.g. `dbs/mydb/colls/orders/docs/42`.
    ///
    /// Partitioned collections need a [`CallOption::PartitionKey`].
    ///
    /// # Errors
    ///
    /// Returns any error of [`read`](Self::read).
    pub async fn read_document<T: DeserializeOwned>(
        &self,
        link: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError> {
        self.read(link, options).await
    }

    /// Reads one page of a collection's documents. Use
    /// [`CallOption::Limit`] and [`CallOption::Continuation`] to page.
    ///
    /// # Errors
    ///
    /// Returns any error of [`read_feed`](Self::read_feed).
    pub async fn read_documents<T: DeserializeOwned>(
        &self,
        coll: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<T>>, CosmosError> {
        let list = self
            .read_feed(&feed_link(coll, DOCUMENTS_FEED), DOCUMENTS_KEY, options)
            .await?;
        Ok(list.map(|list| list.items))
    }

    /// Queries a collection's documents, or reads them for empty text.
    ///
    /// # Errors
    ///
    /// Returns any error of [`query`](Self::query).
    pub async fn query_documents<T: DeserializeOwned>(
        &self,
        coll: &str,
        query: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<T>>, CosmosError> {
        if query.trim().is_empty() {
            return self.read_documents(coll, options).await;
        }
        let list = self
            .query(&feed_link(coll, DOCUMENTS_FEED), DOCUMENTS_KEY, query, options)
            .await?;
        Ok(list.map(|list| list.items))
    }

    /// Runs a parameterized query over a collection's documents.
    ///
    /// # Errors
    ///
    /// Returns any error of [`query_with_parameters`](Self::query_with_parameters).
    pub async fn query_documents_with_parameters<T: DeserializeOwned>(
        &self,
        coll: &str,
        query: &QueryWithParameters,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<T>>, CosmosError> {
        let list = self
            .query_with_parameters(&feed_link(coll, DOCUMENTS_FEED), DOCUMENTS_KEY, query, options)
            .await?;
        Ok(list.map(|list| list.items))
    }

    /// Creates a document in a collection.
    ///
    /// A document without an `id`, or with an empty one, gets a random UUID;
    /// the stored document, id included, is returned.
    ///
    /// # Errors
    ///
    /// Returns any error of [`create`](Self::create).
    pub async fn create_document<T>(
        &self,
        coll: &str,
        doc: &T,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        T: Serialize + DeserializeOwned + PartitionKeyed,
    {
        let body = with_id(doc)?;
        let options = self.document_write_options(doc, &body, options)?;
        self.create(&feed_link(coll, DOCUMENTS_FEED), &body, &options)
            .await
    }

    /// Creates a document or replaces the one with the same id.
    ///
    /// # Errors
    ///
    /// Returns any error of [`upsert`](Self::upsert).
    pub async fn upsert_document<T>(
        &self,
        coll: &str,
        doc: &T,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        T: Serialize + DeserializeOwned + PartitionKeyed,
    {
        let body = serde_json::to_value(doc).map_err(ParseError::from)?;
        let options = self.document_write_options(doc, &body, options)?;
        self.upsert(&feed_link(coll, DOCUMENTS_FEED), &body, &options)
            .await
    }

    /// Replaces a document.
    ///
    /// # Errors
    ///
    /// Returns any error of [`replace`](Self::replace).
    pub async fn replace_document<T>(
        &self,
        link: &str,
        doc: &T,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        T: Serialize + DeserializeOwned + PartitionKeyed,
    {
        let body = serde_json::to_value(doc).map_err(ParseError::from)?;
        let options = self.document_write_options(doc, &body, options)?;
        self.replace(link, &body, &options).await
    }

    /// Replaces a document only if its `_etag` is unchanged on the service.
    ///
    /// # Errors
    ///
    /// Returns any error of [`replace_if_match`](Self::replace_if_match);
    /// a concurrent change is a 412 [`CosmosError::Request`].
    pub async fn replace_document_if_match<T>(
        &self,
        link: &str,
        doc: &T,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        T: Serialize + DeserializeOwned + PartitionKeyed,
    {
        let body = serde_json::to_value(doc).map_err(ParseError::from)?;
        let options = self.document_write_options(doc, &body, options)?;
        self.replace_if_match(link, &body, &options).await
    }

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// Returns any error of [`delete`](Self::delete).
    pub async fn delete_document(
        &self,
        link: &str,
        options: &[CallOption],
    ) -> Result<Response, CosmosError> {
        self.delete(link, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Note {
        #[serde(flatten)]
        document: Document,
        text: &'static str,
    }

    #[test]
    fn test_empty_id_gets_uuid() {
        let body = with_id(&Note {
            document: Document::default(),
            text: "hi",
        })
        .unwrap();

        let id = body["id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
        assert_eq!(body["text"], "hi");
    }

    #[test]
    fn test_existing_id_is_kept() {
        let body = with_id(&json!({"id": "order-1"})).unwrap();
        assert_eq!(body["id"], "order-1");

        let body = with_id(&json!({"id": ""})).unwrap();
        assert_ne!(body["id"], "");
    }

    #[test]
    fn test_document_properties() {
        let doc: Document = serde_json::from_value(json!({
            "id": "SalesOrder1",
            "_rid": "d9RzAJRFKgwBAAAAAAAAAA==",
            "_self": "dbs/d9RzAA==/colls/d9RzAJRFKgw=/docs/d9RzAJRFKgwBAAAAAAAAAA==/",
            "_etag": "\"0000d986-0000-0000-0000-56f9e25b0000\"",
            "_ts": 1_459_216_987,
            "_attachments": "attachments/"
        }))
        .unwrap();

        assert_eq!(doc.id(), "SalesOrder1");
        assert_eq!(doc.attachments, "attachments/");
        assert!(doc.partition_key().is_none());
    }
}
