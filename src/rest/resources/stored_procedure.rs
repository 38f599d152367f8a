//! Stored procedures.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::{feed_link, CallOption, CosmosError, Response};
use crate::rest::{CosmosClient, CosmosResource, HasResource, ResourceResponse};

use super::common::Resource;

/// A JavaScript stored procedure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProcedure {
    /// System properties.
    #[serde(flatten)]
    pub resource: Resource,

    /// JavaScript source.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl StoredProcedure {
    /// Creates a stored procedure body.
    #[must_use]
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            resource: Resource::with_id(id),
            body: body.into(),
        }
    }
}

impl CosmosResource for StoredProcedure {
    const FEED: &'static str = "sprocs";
    const LIST_KEY: &'static str = "StoredProcedures";
}

impl HasResource for StoredProcedure {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl CosmosClient {
    /// Reads a stored procedure.
    ///
    /// # Errors
    ///
    /// Returns any error of [`read`](Self::read).
    pub async fn read_stored_procedure(
        &self,
        link: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<StoredProcedure>, CosmosError> {
        self.read(link, options).await
    }

    /// Lists the stored procedures of a collection.
    ///
    /// # Errors
    ///
    /// Returns any error of [`read_feed`](Self::read_feed).
    pub async fn read_stored_procedures(
        &self,
        coll: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<StoredProcedure>>, CosmosError> {
        self.list_resources(coll, "", options).await
    }

    /// Lists the stored procedures matching `query`, or all of them for
    /// empty text.
    ///
    /// # Errors
    ///
    /// Returns any error of [`query`](Self::query).
    pub async fn query_stored_procedures(
        &self,
        coll: &str,
        query: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<StoredProcedure>>, CosmosError> {
        self.list_resources(coll, query, options).await
    }

    /// Creates a stored procedure.
    ///
    /// # Errors
    ///
    /// Returns any error of [`create`](Self::create).
    pub async fn create_stored_procedure(
        &self,
        coll: &str,
        sproc: &StoredProcedure,
        options: &[CallOption],
    ) -> Result<ResourceResponse<StoredProcedure>, CosmosError> {
        self.create(&feed_link(coll, StoredProcedure::FEED), sproc, options)
            .await
    }

    /// Replaces a stored procedure.
    ///
    /// # Errors
    ///
    /// Returns any error of [`replace`](Self::replace).
    pub async fn replace_stored_procedure(
        &self,
        link: &str,
        sproc: &StoredProcedure,
        options: &[CallOption],
    ) -> Result<ResourceResponse<StoredProcedure>, CosmosError> {
        self.replace(link, sproc, options).await
    }

    /// Deletes a stored procedure.
    ///
    /// # Errors
    ///
    /// Returns any error of [`delete`](Self::delete).
    pub async fn delete_stored_procedure(
        &self,
        link: &str,
        options: &[CallOption],
    ) -> Result<Response, CosmosError> {
        self.delete(link, options).await
    }

    /// Runs a stored procedure with positional parameters and decodes what
    /// it passes to `setBody`.
    ///
    /// Procedures on partitioned collections run inside one partition;
    /// pass its [`CallOption::PartitionKey`].
    ///
    /// # Errors
    ///
    /// Returns any error of [`execute`](Self::execute); a script error is a
    /// 400 [`CosmosError::Request`] carrying the script's message.
    pub async fn execute_stored_procedure<P, T>(
        &self,
        link: &str,
        params: &P,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(link, params, options).await
    }
}
