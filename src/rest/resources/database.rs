//! Databases.

use serde::{Deserialize, Serialize};

use crate::clients::{CallOption, CosmosError, Response};
use crate::rest::{CosmosClient, CosmosResource, HasResource, ResourceResponse};

use super::common::Resource;

/// A database, the container of collections and users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// System properties.
    #[serde(flatten)]
    pub resource: Resource,

    /// Link to the collections feed.
    #[serde(rename = "_colls", default, skip_serializing_if = "String::is_empty")]
    pub colls: String,

    /// Link to the users feed.
    #[serde(rename = "_users", default, skip_serializing_if = "String::is_empty")]
    pub users: String,
}

impl Database {
    /// Creates a database body with the given id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            resource: Resource::with_id(id),
            ..Self::default()
        }
    }
}

impl CosmosResource for Database {
    const FEED: &'static str = "dbs";
    const LIST_KEY: &'static str = "Databases";
}

impl HasResource for Database {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl CosmosClient {
    /// Reads a database by link, e.g. `dbs/mydb`.
    ///
    /// # Errors
    ///
    /// Returns any error of [`read`](Self::read).
    pub async fn read_database(
        &self,
        link: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Database>, CosmosError> {
        self.read(link, options).await
    }

    /// Lists every database of the account.
    ///
    /// # Errors
    ///
    /// Returns any error of [`read_feed`](Self::read_feed).
    pub async fn read_databases(
        &self,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<Database>>, CosmosError> {
        self.list_resources("", "", options).await
    }

    /// Lists the databases matching `query`, or all of them for empty text.
    ///
    /// # Errors
    ///
    /// Returns any error of [`query`](Self::query).
    pub async fn query_databases(
        &self,
        query: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<Database>>, CosmosError> {
        self.list_resources("", query, options).await
    }

    /// Creates a database.
    ///
    /// # Errors
    ///
    /// Returns any error of [`create`](Self::create); a duplicate id is a
    /// 409 [`CosmosError::Request`].
    pub async fn create_database(
        &self,
        database: &Database,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Database>, CosmosError> {
        self.create(Database::FEED, database, options).await
    }

    /// Replaces a database.
    ///
    /// # Errors
    ///
    /// Returns any error of [`replace`](Self::replace).
    pub async fn replace_database(
        &self,
        link: &str,
        database: &Database,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Database>, CosmosError> {
        self.replace(link, database, options).await
    }

    /// Deletes a database and everything in it.
    ///
    /// # Errors
    ///
    /// Returns any error of [`delete`](Self::delete).
    pub async fn delete_database(
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

    #[test]
    fn test_deserialize_service_body() {
        let db: Database = serde_json::from_value(json!({
            "id": "volcanodb",
            "_rid": "CqNBAA==",
            "_ts": 1_449_602_962,
            "_self": "dbs/CqNBAA==/",
            "_etag": "\"00000a00-0000-0000-0000-56672f920000\"",
            "_colls": "colls/",
            "_users": "users/"
        }))
        .unwrap();

        assert_eq!(db.id(), "volcanodb");
        assert_eq!(db.colls, "colls/");
        assert_eq!(db.users, "users/");
        assert_eq!(db.resource.rid, "CqNBAA==");
    }

    #[test]
    fn test_new_sends_only_id() {
        assert_eq!(serde_json::to_value(Database::new("shop")).unwrap(), json!({"id": "shop"}));
    }
}
