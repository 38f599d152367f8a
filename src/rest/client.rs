//! The Cosmos DB client.
//!
//! [`CosmosClient`] owns the configuration and the transport and exposes the
//! primitive operations every resource call is built from:
//!
//! | Operation | Method | Expected status |
//! |-----------|--------|-----------------|
//! | [`read`](CosmosClient::read), [`read_feed`](CosmosClient::read_feed) | `GET` | 200 |
//! | [`query`](CosmosClient::query), [`query_with_parameters`](CosmosClient::query_with_parameters) | `POST` | 200 |
//! | [`create`](CosmosClient::create) | `POST` | 201 |
//! | [`upsert`](CosmosClient::upsert) | `POST` | any 2xx |
//! | [`replace`](CosmosClient::replace), [`replace_if_match`](CosmosClient::replace_if_match) | `PUT` | 200 |
//! | [`execute`](CosmosClient::execute) | `POST` | 200 |
//! | [`delete`](CosmosClient::delete) | `DELETE` | 204 |
//!
//! Typed wrappers such as `read_database` or `create_document` live next to
//! their resource models in [`resources`](crate::rest::resources).
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmosdb_api::{CosmosClient, CosmosConfig, EndpointUrl, MasterKey};
//! use cosmosdb_api::clients::CallOption;
//!
//! let config = CosmosConfig::builder()
//!     .endpoint(EndpointUrl::new("https://myaccount.documents.azure.com")?)
//!     .master_key(MasterKey::new(std::env::var("COSMOS_KEY")?)?)
//!     .build()?;
//! let client = CosmosClient::new(config)?;
//!
//! let doc: ResourceResponse<serde_json::Value> = client
//!     .read("dbs/mydb/colls/orders/docs/1", &[CallOption::partition_key("acme")?])
//!     .await?;
//! println!("{} RU", doc.request_charge()?);
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::{
    headers, CallOption, CosmosError, ExpectedStatus, HttpClient, HttpMethod, ParseError,
    ResourceRequest, Response, UsageError,
};
use crate::config::{ApiVersion, CosmosConfig};
use crate::rest::{QueryWithParameters, ResourceList, ResourceResponse};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for one Cosmos DB account.
///
/// Cloning is cheap: clones share the connection pool.
#[derive(Clone, Debug)]
pub struct CosmosClient {
    http_client: HttpClient,
    config: CosmosConfig,
}

// Verify CosmosClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CosmosClient>();
};

impl CosmosClient {
    /// Creates a client with its own transport.
    ///
    /// # Errors
    ///
    /// Returns [`CosmosError::Config`] if the transport cannot be built.
    pub fn new(config: CosmosConfig) -> Result<Self, CosmosError> {
        let http_client = HttpClient::new(&config)?;
        tracing::debug!(
            endpoint = config.endpoint().as_ref(),
            api_version = %config.api_version(),
            partitioned = config.is_partitioned(),
            "created cosmos client"
        );
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Creates a client on an existing `reqwest::Client`, e.g. one shared by
    /// several accounts.
    #[must_use]
    pub fn with_transport(config: CosmosConfig, transport: reqwest::Client) -> Self {
        Self {
            http_client: HttpClient::with_transport(transport, &config),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CosmosConfig {
        &self.config
    }

    /// Returns the account endpoint.
    #[must_use]
    pub fn uri(&self) -> &str {
        self.config.endpoint().as_ref()
    }

    /// Returns the transport.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Logs every request as a curl command and asks the service for query
    /// metrics.
    pub fn enable_debug(&mut self) {
        self.set_debug(true);
    }

    /// Turns debug logging off again.
    pub fn disable_debug(&mut self) {
        self.set_debug(false);
    }

    fn set_debug(&mut self, debug: bool) {
        self.config.set_debug(debug);
        self.http_client.set_debug(debug);
    }

    /// Builds and signs a request.
    fn prepare<'a>(
        &self,
        method: HttpMethod,
        link: &str,
        body: Option<Vec<u8>>,
        options: impl IntoIterator<Item = &'a CallOption>,
    ) -> Result<ResourceRequest, CosmosError> {
        let mut request = ResourceRequest::new(method, self.uri(), link);
        if let Some(body) = body {
            request = request.with_body(body);
            request.set_header(headers::CONTENT_TYPE, JSON_CONTENT_TYPE)?;
        }
        request.apply_options(&self.config, options)?;
        if self.config.debug() {
            CallOption::PopulateQueryMetrics.apply(&mut request)?;
        }
        Ok(request)
    }

    /// Builds a query request: the caller's options, cross-partition for
    /// partitioned accounts, then the query headers.
    fn prepare_query(
        &self,
        link: &str,
        body: Vec<u8>,
        options: &[CallOption],
    ) -> Result<ResourceRequest, CosmosError> {
        let cross_partition = self
            .config
            .is_partitioned()
            .then_some(CallOption::CrossPartition);
        let mut request = self.prepare(
            HttpMethod::Post,
            link,
            Some(body),
            options.iter().chain(cross_partition.as_ref()),
        )?;
        request.query_headers()?;
        if !self.config.is_partitioned() {
            request.set_header(headers::VERSION, &ApiVersion::no_partition().to_string())?;
        }
        Ok(request)
    }

    async fn call<T, F>(
        &self,
        request: ResourceRequest,
        expected: ExpectedStatus,
        decode: F,
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        F: FnOnce(&[u8]) -> Result<T, ParseError>,
    {
        let raw = self.http_client.execute(&request, expected).await?;
        let data = decode(&raw.body)?;
        Ok(ResourceResponse::new(data, raw.response))
    }

    fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>, CosmosError> {
        Ok(serde_json::to_vec(body).map_err(ParseError::from)?)
    }

    /// Reads one resource.
    ///
    /// # Errors
    ///
    /// Returns any signing, transport, status or decoding error.
    pub async fn read<T: DeserializeOwned>(
        &self,
        link: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError> {
        let request = self.prepare(HttpMethod::Get, link, None, options)?;
        self.call(request, ExpectedStatus::Exact(200), decode_json)
            .await
    }

    /// Reads a feed, taking the items from the envelope field `key`.
    ///
    /// # Errors
    ///
    /// Returns any signing, transport, status or decoding error.
    pub async fn read_feed<T: DeserializeOwned>(
        &self,
        link: &str,
        key: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<ResourceList<T>>, CosmosError> {
        let request = self.prepare(HttpMethod::Get, link, None, options)?;
        self.call(request, ExpectedStatus::Exact(200), |body| {
            ResourceList::decode(body, key)
        })
        .await
    }

    /// Deletes a resource.
    ///
    /// # Errors
    ///
    /// Returns any signing, transport or status error.
    pub async fn delete(
        &self,
        link: &str,
        options: &[CallOption],
    ) -> Result<Response, CosmosError> {
        let request = self.prepare(HttpMethod::Delete, link, None, options)?;
        let raw = self
            .http_client
            .execute(&request, ExpectedStatus::Exact(204))
            .await?;
        Ok(raw.response)
    }

    /// Runs a SQL query against a feed, taking the items from `key`.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::EmptyQuery`] for empty text, otherwise any
    /// signing, transport, status or decoding error.
    pub async fn query<T: DeserializeOwned>(
        &self,
        link: &str,
        key: &str,
        query: &str,
        options: &[CallOption],
    ) -> Result<ResourceResponse<ResourceList<T>>, CosmosError> {
        if query.trim().is_empty() {
            return Err(UsageError::EmptyQuery.into());
        }
        let body = Self::to_body(&serde_json::json!({ "query": query }))?;
        let request = self.prepare_query(link, body, options)?;
        self.call(request, ExpectedStatus::Exact(200), |body| {
            ResourceList::decode(body, key)
        })
        .await
    }

    /// Runs a parameterized SQL query against a feed.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::EmptyQuery`] for empty text, otherwise any
    /// signing, transport, status or decoding error.
    pub async fn query_with_parameters<T: DeserializeOwned>(
        &self,
        link: &str,
        key: &str,
        query: &QueryWithParameters,
        options: &[CallOption],
    ) -> Result<ResourceResponse<ResourceList<T>>, CosmosError> {
        if query.query.trim().is_empty() {
            return Err(UsageError::EmptyQuery.into());
        }
        let body = Self::to_body(query)?;
        let request = self.prepare_query(link, body, options)?;
        self.call(request, ExpectedStatus::Exact(200), |body| {
            ResourceList::decode(body, key)
        })
        .await
    }

    /// Creates a resource under a feed.
    ///
    /// # Errors
    ///
    /// Returns any encoding, signing, transport, status or decoding error.
    pub async fn create<B, T>(
        &self,
        link: &str,
        body: &B,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.prepare(HttpMethod::Post, link, Some(Self::to_body(body)?), options)?;
        self.call(request, ExpectedStatus::Exact(201), decode_json)
            .await
    }

    /// Creates a resource or replaces the one with the same id.
    ///
    /// # Errors
    ///
    /// Returns any encoding, signing, transport, status or decoding error.
    pub async fn upsert<B, T>(
        &self,
        link: &str,
        body: &B,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.prepare(
            HttpMethod::Post,
            link,
            Some(Self::to_body(body)?),
            options.iter().chain([&CallOption::Upsert]),
        )?;
        self.call(request, ExpectedStatus::Class(200), decode_json)
            .await
    }

    /// Replaces a resource.
    ///
    /// # Errors
    ///
    /// Returns any encoding, signing, transport, status or decoding error.
    pub async fn replace<B, T>(
        &self,
        link: &str,
        body: &B,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.prepare(HttpMethod::Put, link, Some(Self::to_body(body)?), options)?;
        self.call(request, ExpectedStatus::Exact(200), decode_json)
            .await
    }

    /// Replaces a resource only if it still carries the `_etag` found in
    /// `body`.
    ///
    /// A concurrent write changes the etag and the service answers 412,
    /// surfaced as [`CosmosError::Request`].
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::MissingEtag`] if `body` has no string `_etag`,
    /// otherwise any encoding, signing, transport, status or decoding error.
    pub async fn replace_if_match<B, T>(
        &self,
        link: &str,
        body: &B,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let value = serde_json::to_value(body).map_err(ParseError::from)?;
        let etag = value
            .get("_etag")
            .and_then(Value::as_str)
            .ok_or(UsageError::MissingEtag)?
            .to_string();
        let if_match = CallOption::IfMatch(etag);
        let request = self.prepare(
            HttpMethod::Put,
            link,
            Some(Self::to_body(&value)?),
            options.iter().chain([&if_match]),
        )?;
        self.call(request, ExpectedStatus::Exact(200), decode_json)
            .await
    }

    /// Posts `body` to an executable resource, such as a stored procedure,
    /// and decodes its result.
    ///
    /// # Errors
    ///
    /// Returns any encoding, signing, transport, status or decoding error.
    pub async fn execute<B, T>(
        &self,
        link: &str,
        body: &B,
        options: &[CallOption],
    ) -> Result<ResourceResponse<T>, CosmosError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.prepare(HttpMethod::Post, link, Some(Self::to_body(body)?), options)?;
        self.call(request, ExpectedStatus::Exact(200), decode_json)
            .await
    }
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ParseError> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EndpointUrl, MasterKey};

    fn config(partition_key_path: Option<&str>) -> CosmosConfig {
        let mut builder = CosmosConfig::builder()
            .endpoint(EndpointUrl::new("https://localhost:8081/").unwrap())
            .master_key(MasterKey::new("YXJpZWwNCg==").unwrap());
        if let Some(path) = partition_key_path {
            builder = builder.partition_key_path(path);
        }
        builder.build().unwrap()
    }

    fn client(partition_key_path: Option<&str>) -> CosmosClient {
        CosmosClient::with_transport(config(partition_key_path), reqwest::Client::new())
    }

    #[test]
    fn test_prepare_signs_and_sets_body_headers() {
        let client = client(None);
        let request = client
            .prepare(HttpMethod::Post, "dbs/mydb/colls/", Some(b"{}".to_vec()), &[] as &[CallOption])
            .unwrap();

        assert_eq!(request.url, "https://localhost:8081/dbs/mydb/colls/");
        assert_eq!(request.header(headers::CONTENT_TYPE), Some("application/json"));
        assert!(request.header(headers::AUTHORIZATION).is_some());
        assert!(request.header(headers::POPULATE_QUERY_METRICS).is_none());
    }

    #[test]
    fn test_debug_requests_query_metrics() {
        let mut client = client(None);
        client.enable_debug();
        assert!(client.config().debug());

        let request = client.prepare(HttpMethod::Get, "dbs", None, &[] as &[CallOption]).unwrap();
        assert_eq!(request.header(headers::POPULATE_QUERY_METRICS), Some("true"));

        client.disable_debug();
        let request = client.prepare(HttpMethod::Get, "dbs", None, &[] as &[CallOption]).unwrap();
        assert!(request.header(headers::POPULATE_QUERY_METRICS).is_none());
    }

    #[test]
    fn test_query_on_unpartitioned_account_pins_version() {
        let client = client(None);
        let request = client
            .prepare_query("dbs/mydb/colls/c/docs/", b"{}".to_vec(), &[])
            .unwrap();

        assert_eq!(request.header(headers::VERSION), Some("2017-02-22"));
        assert_eq!(request.header(headers::IS_QUERY), Some("true"));
        assert_eq!(request.header(headers::CONTENT_TYPE), Some("application/query+json"));
        assert!(request.header(headers::ENABLE_CROSS_PARTITION).is_none());
    }

    #[test]
    fn test_query_on_partitioned_account_crosses_partitions() {
        let client = client(Some("/tenant"));
        let request = client
            .prepare_query("dbs/mydb/colls/c/docs/", b"{}".to_vec(), &[CallOption::Limit(5)])
            .unwrap();

        assert_eq!(request.header(headers::ENABLE_CROSS_PARTITION), Some("true"));
        assert_eq!(request.header(headers::MAX_ITEM_COUNT), Some("5"));
        assert_eq!(request.header(headers::VERSION), Some("2018-12-31"));
    }

    #[test]
    fn test_uri_has_no_trailing_slash() {
        assert_eq!(client(None).uri(), "https://localhost:8081");
    }
}
