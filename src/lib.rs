//! # Cosmos DB API Rust SDK
//!
//! A Rust client for the Azure Cosmos DB SQL REST API, providing type-safe
//! configuration, master-key request signing, retrying transport and typed
//! resource operations.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`CosmosConfig`] and [`CosmosConfigBuilder`]
//! - Validated newtypes for the endpoint and master key
//! - HMAC-SHA256 master-key signing via [`auth`]
//! - Resource link parsing and a composable [`CallOption`](clients::CallOption) pipeline
//! - Async HTTP transport with exponential backoff and cancellation
//! - Typed CRUD and query operations on databases, collections, documents,
//!   stored procedures and user defined functions via [`CosmosClient`]
//! - Continuation-token paging via [`rest::PageableQuery`]
//! - Query metrics decoding
//!
//! ## Quick Start
//!
//! ```rust
//! use cosmosdb_api::{CosmosClient, CosmosConfig, EndpointUrl, MasterKey};
//!
//! let config = CosmosConfig::builder()
//!     .endpoint(EndpointUrl::new("https://myaccount.documents.azure.com").unwrap())
//!     .master_key(MasterKey::new("YXJpZWwNCg==").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = CosmosClient::new(config).unwrap();
//! assert_eq!(client.uri(), "https://myaccount.documents.azure.com");
//! ```
//!
//! ## Working With Documents
//!
//! ```rust,ignore
//! use cosmosdb_api::clients::CallOption;
//! use cosmosdb_api::rest::resources::Document;
//! use cosmosdb_api::rest::PartitionKeyed;
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Order {
//!     #[serde(flatten)]
//!     document: Document,
//!     tenant: String,
//!     total: f64,
//! }
//!
//! impl PartitionKeyed for Order {}
//!
//! let coll = "dbs/shop/colls/orders";
//! let order = client
//!     .create_document(coll, &Order { tenant: "acme".into(), total: 12.5, ..Default::default() }, &[])
//!     .await?;
//! println!("stored {} ({} RU)", order.document.resource.id, order.request_charge()?);
//!
//! let link = order.document.resource.self_link.clone();
//! let mut order = order.into_inner();
//! order.total = 15.0;
//! client.replace_document_if_match(&link, &order, &[]).await?;
//! ```
//!
//! ## Paging
//!
//! ```rust,ignore
//! let mut pages = client.pageable_query::<Order>("dbs/shop/colls/orders", "SELECT * FROM c", 100);
//! let mut orders = Vec::new();
//! while pages.has_more() {
//!     pages.next(&mut orders).await?;
//!     println!("{} orders", orders.len());
//! }
//! ```
//!
//! ## Cancellation
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use cosmosdb_api::clients::{CallOption, RequestContext};
//!
//! let ctx = RequestContext::with_timeout(Duration::from_secs(2));
//! let dbs = client.read_databases(&[CallOption::Context(ctx)]).await;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: Clients are `Send + Sync` and share one connection pool
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **One request per call**: No background tasks; retries happen inside the call

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiVersion, CosmosConfig, CosmosConfigBuilder, EndpointUrl, MasterKey, SDK_VERSION};
pub use error::ConfigError;

pub use clients::{CallOption, CosmosError, RequestContext, RetryPolicy};
pub use rest::{CosmosClient, PageableQuery, QueryWithParameters, ResourceResponse};
