//! Typed access to Cosmos DB resources.
//!
//! This module builds on the request pipeline in [`clients`](crate::clients):
//!
//! - **[`CosmosClient`]**: primitive read, query, create, upsert, replace,
//!   execute and delete calls, plus typed wrappers per resource
//! - **[`ResourceResponse<T>`]**: decoded data that derefs to `T` and keeps
//!   the response headers
//! - **[`CosmosResource`], [`HasResource`], [`PartitionKeyed`]**: capabilities
//!   of resource models
//! - **[`PageableQuery`]**: continuation-driven paging over a document query
//! - **[`resources`]**: the resource models
//!
//! # Example
//!
//! ```rust,ignore
//! use cosmosdb_api::rest::resources::Database;
//! use cosmosdb_api::rest::QueryWithParameters;
//!
//! let db = client.create_database(&Database::new("shop"), &[]).await?;
//! println!("created {} for {} RU", db.resource.id, db.request_charge()?);
//!
//! let query = QueryWithParameters::new("SELECT * FROM c WHERE c.total > @min").parameter("@min", 100);
//! let orders: ResourceResponse<Vec<Order>> = client
//!     .query_documents_with_parameters("dbs/shop/colls/orders", &query, &[])
//!     .await?;
//! for order in orders.iter() {
//!     println!("{order:?}");
//! }
//! ```

mod client;
mod pageable;
mod query;
mod resource;
mod response;

pub mod resources;

pub use client::CosmosClient;
pub use pageable::PageableQuery;
pub use query::{QueryParameter, QueryWithParameters};
pub use resource::{CosmosResource, HasResource, PartitionKeyed, ResourceList};
pub use response::ResourceResponse;
