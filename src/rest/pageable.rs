//! Paged document queries.
//!
//! A [`PageableQuery`] runs one parameterized query over a collection page by
//! page. The first call sends only the page size; it records the
//! continuation and session tokens the service returns. Every later call
//! sends the page size, the latest continuation and the first session token,
//! and records the new continuation.
//!
//! The cursor does not detect the end of the result set: check
//! [`PageableQuery::has_more`] before asking for another page, or accept an
//! empty page.
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmosdb_api::rest::QueryWithParameters;
//!
//! let query = QueryWithParameters::new("SELECT * FROM c WHERE c.kind = @kind")
//!     .parameter("@kind", "order");
//! let mut pages = client.pageable_query::<Order>("dbs/shop/colls/orders/", query, 100);
//!
//! let mut orders = Vec::new();
//! loop {
//!     pages.next(&mut orders).await?;
//!     process(&orders);
//!     if !pages.has_more() {
//!         break;
//!     }
//! }
//! ```

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::clients::{feed_link, CallOption, CosmosError};
use crate::rest::resources::{DOCUMENTS_FEED, DOCUMENTS_KEY};
use crate::rest::{CosmosClient, QueryWithParameters};

/// Cursor over the pages of a document query.
///
/// A cursor keeps mutable paging state; calls to [`next`](Self::next) must
/// be serialized by the caller, which `&mut self` enforces.
#[derive(Debug)]
pub struct PageableQuery<'a, T> {
    client: &'a CosmosClient,
    collection: String,
    query: QueryWithParameters,
    limit: i32,
    offset: u64,
    continuation: Option<String>,
    session_token: Option<String>,
    marker: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> PageableQuery<'a, T> {
    /// Creates a cursor for `query` over the documents of `collection`.
    #[must_use]
    pub fn new(
        client: &'a CosmosClient,
        collection: impl Into<String>,
        query: QueryWithParameters,
        limit: i32,
    ) -> Self {
        Self {
            client,
            collection: collection.into(),
            query,
            limit,
            offset: 0,
            continuation: None,
            session_token: None,
            marker: PhantomData,
        }
    }

    /// Fetches the next page into `docs`, replacing its contents.
    ///
    /// On error `docs` and the cursor state are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns any error of
    /// [`query_with_parameters`](CosmosClient::query_with_parameters).
    pub async fn next(&mut self, docs: &mut Vec<T>) -> Result<(), CosmosError> {
        let mut options = vec![CallOption::Limit(self.limit)];
        if self.offset > 0 {
            if let Some(continuation) = &self.continuation {
                options.push(CallOption::Continuation(continuation.clone()));
            }
            if let Some(session_token) = &self.session_token {
                options.push(CallOption::SessionToken(session_token.clone()));
            }
        }

        let link = feed_link(&self.collection, DOCUMENTS_FEED);
        let page = self
            .client
            .query_with_parameters::<T>(&link, DOCUMENTS_KEY, &self.query, &options)
            .await?;

        self.continuation = page.continuation().map(ToString::to_string);
        if self.offset == 0 {
            self.session_token = page.session_token().map(ToString::to_string);
        }
        self.offset += 1;

        tracing::debug!(
            collection = self.collection.as_str(),
            page = self.offset,
            items = page.items.len(),
            has_more = self.continuation.is_some(),
            "fetched query page"
        );

        *docs = page.into_inner().items;
        Ok(())
    }

    /// Returns the number of pages fetched so far.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the continuation token of the last page.
    #[must_use]
    pub fn continuation(&self) -> Option<&str> {
        self.continuation.as_deref()
    }

    /// Returns the session token captured from the first page.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Returns `true` before the first page and while the service keeps
    /// returning a continuation token.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        self.offset == 0 || self.continuation.is_some()
    }
}

impl CosmosClient {
    /// Starts a paged query over the documents of `collection`, fetching at
    /// most `limit` documents per page.
    ///
    /// `collection` is a collection link such as `dbs/mydb/colls/orders`.
    #[must_use]
    pub fn pageable_query<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: impl Into<QueryWithParameters>,
        limit: i32,
    ) -> PageableQuery<'_, T> {
        PageableQuery::new(self, collection, query.into(), limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CosmosConfig, EndpointUrl, MasterKey};

    fn client() -> CosmosClient {
        let config = CosmosConfig::builder()
            .endpoint(EndpointUrl::new("https://localhost:8081").unwrap())
            .master_key(MasterKey::new("YXJpZWwNCg==").unwrap())
            .build()
            .unwrap();
        CosmosClient::with_transport(config, reqwest::Client::new())
    }

    #[test]
    fn test_fresh_cursor_state() {
        let client = client();
        let pages = client.pageable_query::<serde_json::Value>("dbs/db/colls/c", "SELECT * FROM c", 10);

        assert_eq!(pages.offset(), 0);
        assert_eq!(pages.continuation(), None);
        assert_eq!(pages.session_token(), None);
        assert!(pages.has_more());
    }
}
