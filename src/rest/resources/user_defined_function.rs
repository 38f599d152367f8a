//! User defined functions.

use serde::{Deserialize, Serialize};

use crate::clients::{feed_link, CallOption, CosmosError, Response};
use crate::rest::{CosmosClient, CosmosResource, HasResource, ResourceResponse};

use super::common::Resource;

/// A JavaScript function callable from queries as `udf.<id>(...)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDefinedFunction {
    /// System properties.
    #[serde(flatten)]
    pub resource: Resource,

    /// JavaScript source.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl UserDefinedFunction {
    /// Creates a function body.
    #[must_use]
    pub fn new(id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            resource: Resource::with_id(id),
            body: body.into(),
        }
    }
}

impl CosmosResource for UserDefinedFunction {
    const FEED: &'static str = "udfs";
    const LIST_KEY: &'static str = "UserDefinedFunctions";
}

impl HasResource for UserDefinedFunction {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl CosmosClient {
    /// Reads a user defined function.
    ///
    /// # Errors
    ///
    /// Returns any error of [`read`](Self::read).
    pub async fn read_user_defined_function(
        &self,
        link: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<UserDefinedFunction>, CosmosError> {
        self.read(link, options).await
    }

    /// Lists the user defined functions of a collection.
    ///
    /// # Errors
    ///
    /// Returns any error of [`read_feed`](Self::read_feed).
    pub async fn read_user_defined_functions(
        &self,
        coll: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<UserDefinedFunction>>, CosmosError> {
        self.list_resources(coll, "", options).await
    }

    /// Lists the user defined functions matching `query`, or all of them for
    /// empty text.
    ///
    /// # Errors
    ///
    /// Returns any error of [`query`](Self::query).
    pub async fn query_user_defined_functions(
        &self,
        coll: &str,
        query: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<Vec<UserDefinedFunction>>, CosmosError> {
        self.list_resources(coll, query, options).await
    }

    /// Creates a user defined function.
    ///
    /// # Errors
    ///
    /// Returns any error of [`create`](Self::create).
    pub async fn create_user_defined_function(
        &self,
        coll: &str,
        udf: &UserDefinedFunction,
        options: &[CallOption],
    ) -> Result<ResourceResponse<UserDefinedFunction>, CosmosError> {
        self.create(&feed_link(coll, UserDefinedFunction::FEED), udf, options)
            .await
    }

    /// Replaces a user defined function.
    ///
    /// # Errors
    ///
    /// Returns any error of [`replace`](Self::replace).
    pub async fn replace_user_defined_function(
        &self,
        link: &str,
        udf: &UserDefinedFunction,
        options: &[CallOption],
    ) -> Result<ResourceResponse<UserDefinedFunction>, CosmosError> {
        self.replace(link, udf, options).await
    }

    /// Deletes a user defined function.
    ///
    /// # Errors
    ///
    /// Returns any error of [`delete`](Self::delete).
    pub async fn delete_user_defined_function(
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
    use crate::rest::ResourceList;

    #[test]
    fn test_decode_feed() {
        let body = br#"{
            "_rid": "Sl8fAI4ZrQ4=",
            "UserDefinedFunctions": [{
                "body": "function tax(income) { return income * 0.1; }",
                "id": "tax",
                "_rid": "Sl8fAI4ZrQ4BAAAAAAAAYA==",
                "_ts": 1449687949,
                "_self": "dbs/Sl8fAA==/colls/Sl8fAI4ZrQ4=/udfs/Sl8fAI4ZrQ4BAAAAAAAAYA==/",
                "_etag": "\"06003ee1-0000-0000-0000-566883330000\""
            }],
            "_count": 1
        }"#;
        let list: ResourceList<UserDefinedFunction> =
            ResourceList::decode(body, UserDefinedFunction::LIST_KEY).unwrap();

        assert_eq!(list.count, 1);
        assert_eq!(list.items[0].id(), "tax");
        assert!(list.items[0].body.contains("income * 0.1"));
    }
}
